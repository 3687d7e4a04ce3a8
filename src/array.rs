//! Owned arrays and non-owning views over data-parallel buffers
//!
//! An [`Array`] owns its storage and has a fixed [`Extent`] from
//! construction; it never resizes. Kernels and host loops access the data
//! through views: [`ArrayView`] grants read access, [`ArrayViewMut`] grants
//! read/write access and may be shared across lanes of a single launch.
//! Views borrow from the array and must not outlive it, which the lifetime
//! parameter enforces.

use crate::error::AmpError;
use crate::index::{Extent, Index};
use crate::Result;
use std::marker::PhantomData;

/// Owned, extent-shaped buffer of `T`.
#[derive(Debug)]
pub struct Array<T> {
    data: Vec<T>,
    extent: Extent,
}

impl<T: Copy + Default> Array<T> {
    /// Allocate an array of `extent.size()` default-initialised elements.
    pub fn new(extent: Extent) -> Result<Self> {
        if extent.size() == 0 {
            return Err(AmpError::InvalidExtent(format!(
                "cannot allocate zero-sized extent {extent}"
            )));
        }
        Ok(Self {
            data: vec![T::default(); extent.size()],
            extent,
        })
    }
}

impl<T: Copy> Array<T> {
    /// Wrap an existing vector. `data.len()` must equal `extent.size()`.
    pub fn from_vec(extent: Extent, data: Vec<T>) -> Result<Self> {
        if data.len() != extent.size() {
            return Err(AmpError::ShapeMismatch {
                expected: extent.size(),
                actual: data.len(),
            });
        }
        Ok(Self { data, extent })
    }

    /// Shape of this array.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the array holds no elements. Construction rejects empty
    /// extents, so this is always false for a live array.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only slice over the elements, lane order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable slice over the elements, lane order.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Read-only view for kernel capture.
    pub fn view(&self) -> ArrayView<'_, T> {
        ArrayView {
            data: &self.data,
            extent: self.extent,
        }
    }

    /// Read/write view for kernel capture.
    pub fn view_mut(&mut self) -> ArrayViewMut<'_, T> {
        ArrayViewMut {
            ptr: self.data.as_mut_ptr(),
            extent: self.extent,
            _marker: PhantomData,
        }
    }

    /// Consume the array and return its backing vector.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

/// Non-owning read view over an [`Array`].
#[derive(Clone, Copy)]
pub struct ArrayView<'a, T> {
    data: &'a [T],
    extent: Extent,
}

impl<T: Copy> ArrayView<'_, T> {
    /// Shape of the viewed array.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the view is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read the element at `idx`.
    ///
    /// # Panics
    /// Panics if `idx` lies outside the extent, matching slice indexing.
    pub fn get(&self, idx: Index) -> T {
        assert!(
            self.extent.contains(idx),
            "index {idx:?} outside extent {}",
            self.extent
        );
        self.data[self.extent.lane_of(idx)]
    }

    /// Read-only slice over the viewed elements.
    pub fn as_slice(&self) -> &[T] {
        self.data
    }
}

/// Non-owning read/write view over an [`Array`].
///
/// A launch shares one `ArrayViewMut` across all lanes by reference, so the
/// element accessors go through a raw pointer and are `unsafe`: an
/// unsynchronized overlapping access to one element from two lanes is a data
/// race and therefore undefined behavior, regardless of element type or
/// alignment. The caller upholds the launch discipline instead — each
/// element is written by at most one lane per launch, and no lane reads an
/// element another lane may be writing. That is the same contract the
/// programming model imposes on a real accelerator; here it is a safety
/// requirement, not just a correctness one.
pub struct ArrayViewMut<'a, T> {
    ptr: *mut T,
    extent: Extent,
    _marker: PhantomData<&'a mut [T]>,
}

// SAFETY: sharing the view only grants access to the `unsafe` element
// accessors below, whose contracts forbid overlapping unsynchronized
// access; `T: Send` is required so values may be produced on worker
// threads.
unsafe impl<T: Send> Send for ArrayViewMut<'_, T> {}
unsafe impl<T: Send> Sync for ArrayViewMut<'_, T> {}

impl<T: Copy> ArrayViewMut<'_, T> {
    /// Shape of the viewed array.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.extent.size()
    }

    /// Whether the view is empty.
    pub fn is_empty(&self) -> bool {
        self.extent.size() == 0
    }

    /// Read the element at `idx`.
    ///
    /// # Safety
    /// No other lane may be concurrently writing the element at `idx`.
    ///
    /// # Panics
    /// Panics if `idx` lies outside the extent.
    pub unsafe fn get(&self, idx: Index) -> T {
        assert!(
            self.extent.contains(idx),
            "index {idx:?} outside extent {}",
            self.extent
        );
        // Offset is within the borrowed allocation per the check above.
        unsafe { *self.ptr.add(self.extent.lane_of(idx)) }
    }

    /// Write `value` to the element at `idx`.
    ///
    /// Takes `&self` so a launch can share the view across lanes.
    ///
    /// # Safety
    /// Within one launch, the element at `idx` must be written by this lane
    /// alone and not concurrently accessed by any other lane. The usual
    /// pattern — each lane writing only its own index — satisfies this:
    ///
    /// ```
    /// use amp_rust::prelude::*;
    ///
    /// # fn main() -> amp_rust::Result<()> {
    /// let extent = Extent::new(8);
    /// let mut out: Array<f32> = Array::new(extent)?;
    /// let view = out.view_mut();
    /// parallel_for_each(extent, |idx: Index| {
    ///     // SAFETY: each lane writes only its own index.
    ///     unsafe { view.set(idx, idx.x as f32) };
    /// })?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Panics
    /// Panics if `idx` lies outside the extent.
    pub unsafe fn set(&self, idx: Index, value: T) {
        assert!(
            self.extent.contains(idx),
            "index {idx:?} outside extent {}",
            self.extent
        );
        // Offset is within the borrowed allocation per the check above, and
        // T: Copy means no drop runs on the overwritten element.
        unsafe {
            *self.ptr.add(self.extent.lane_of(idx)) = value;
        }
    }
}
