//! Extent and index types describing data-parallel index spaces
//!
//! An [`Extent`] is the shape of a launch: up to three dimensions, with
//! unused dimensions held at 1. An [`Index`] identifies a single lane
//! within that shape. Lane ids are linearised x-fastest, matching the
//! layout of the backing arrays.

use std::fmt;

/// Shape of a data-parallel index space.
///
/// The common case is rank-1: `Extent::new(n)` describes `n` lanes along x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// Lanes along the fastest-varying dimension.
    pub x: usize,
    /// Lanes along the second dimension.
    pub y: usize,
    /// Lanes along the slowest-varying dimension.
    pub z: usize,
}

impl Extent {
    /// Rank-1 extent of `x` lanes.
    pub fn new(x: usize) -> Self {
        Self { x, y: 1, z: 1 }
    }

    /// Rank-2 extent.
    pub fn new_2d(x: usize, y: usize) -> Self {
        Self { x, y, z: 1 }
    }

    /// Rank-3 extent.
    pub fn new_3d(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Total number of lanes described by this extent.
    pub fn size(&self) -> usize {
        self.x * self.y * self.z
    }

    /// Effective rank: the highest dimension with more than one lane.
    pub fn rank(&self) -> usize {
        if self.z > 1 {
            3
        } else if self.y > 1 {
            2
        } else {
            1
        }
    }

    /// Whether `idx` falls inside this extent.
    pub fn contains(&self, idx: Index) -> bool {
        idx.x < self.x && idx.y < self.y && idx.z < self.z
    }

    /// Map a linear lane id to its index, x-fastest.
    pub fn index_of(&self, lane: usize) -> Index {
        let x = lane % self.x;
        let rest = lane / self.x;
        Index {
            x,
            y: rest % self.y,
            z: rest / self.y,
        }
    }

    /// Map an index back to its linear lane id.
    pub fn lane_of(&self, idx: Index) -> usize {
        (idx.z * self.y + idx.y) * self.x + idx.x
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank() {
            1 => write!(f, "<{}>", self.x),
            2 => write!(f, "<{}, {}>", self.x, self.y),
            _ => write!(f, "<{}, {}, {}>", self.x, self.y, self.z),
        }
    }
}

/// Position of a single lane within an [`Extent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Index {
    /// Position along x.
    pub x: usize,
    /// Position along y.
    pub y: usize,
    /// Position along z.
    pub z: usize,
}

impl Index {
    /// Rank-1 index at position `x`.
    pub fn new(x: usize) -> Self {
        Self { x, y: 0, z: 0 }
    }
}

impl From<usize> for Index {
    fn from(x: usize) -> Self {
        Self::new(x)
    }
}
