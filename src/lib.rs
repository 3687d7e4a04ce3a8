//! # AMP-Rust
//!
//! A CPU-executing implementation of an AMP-style data-parallel programming
//! model: extents and indices describing a launch shape, owned arrays with
//! non-owning views, a synchronous `parallel_for_each` dispatch over a
//! worker pool, accelerator-profile `fast_math` routines, and a parity
//! harness that checks a routine's data-parallel and sequential-host
//! results agree in magnitude within a configured tolerance.
//!
//! The accelerator here is the CPU lanes backend: kernels fan out over OS
//! threads, with the same programming-model contract a device backend would
//! enforce — no ordering between lanes, disjoint writes per launch, and a
//! blocking launch-and-wait call.
//!
//! ## Example
//!
//! ```
//! use amp_rust::prelude::*;
//!
//! # fn main() -> amp_rust::Result<()> {
//! let extent = Extent::new(4);
//! let input = Array::from_vec(extent, vec![1.0f32, 10.0, 100.0, 1000.0])?;
//! let mut output: Array<f32> = Array::new(extent)?;
//!
//! {
//!     let src = input.view();
//!     let dst = output.view_mut();
//!     parallel_for_each(extent, |idx: Index| {
//!         // SAFETY: each lane writes only its own index.
//!         unsafe { dst.set(idx, fast_math::log10(src.get(idx))) };
//!     })?;
//! }
//!
//! assert!((output.as_slice()[1] - 1.0).abs() < 1e-5);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod array;
pub mod error;
pub mod fast_math;
pub mod index;
pub mod parity;
pub mod runtime;

pub use array::{Array, ArrayView, ArrayViewMut};
pub use error::{AmpError, Result};
pub use index::{Extent, Index};

/// Commonly used types and functions.
pub mod prelude {
    pub use crate::array::{Array, ArrayView, ArrayViewMut};
    pub use crate::error::{AmpError, Result};
    pub use crate::fast_math;
    pub use crate::index::{Extent, Index};
    pub use crate::parity::{ParityConfig, ParityReport};
    pub use crate::runtime::{
        parallel_for_each, parallel_for_each_on, Accelerator, AmpKernel, CommandQueue, Runtime,
    };
}
