//! Dense two-channel distance fields.

mod downsample;
mod grid;

use bytemuck::{Pod, Zeroable};
use log::debug;

pub use downsample::Normalization;
pub use grid::MAX_DIMENSION;

use crate::error::FieldResult;
use crate::mask::Mask;
use grid::Grid;

/// Distances from one pixel to the nearest pixel of each class.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Distances {
    pub outside: f32,
    pub inside: f32,
}

impl Distances {
    /// Positive inside the shape (distance to its edge), negative outside it
    /// (distance to the shape). Pixels where both distances tie count as
    /// outside.
    pub fn signed(&self) -> f32 {
        if self.inside >= self.outside {
            -self.inside
        } else {
            self.outside
        }
    }
}

/// Row-major grid of [`Distances`], one per mask pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    width: usize,
    height: usize,
    data: Vec<Distances>,
}

impl DistanceField {
    /// Compute the exact Euclidean distance field of `mask`.
    pub fn from_mask(mask: &Mask) -> FieldResult<Self> {
        let mut grid = Grid::from_mask(mask)?;
        grid.propagate();
        debug!(
            "Propagated {}x{} mask ({} inside cells)",
            mask.width(),
            mask.height(),
            mask.inside_count()
        );
        Ok(grid.into_field())
    }

    pub(crate) fn from_raw(width: usize, height: usize, data: Vec<Distances>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> Distances {
        self.data[x + y * self.width]
    }

    pub fn as_slice(&self) -> &[Distances] {
        &self.data
    }

    /// Iterate `(x, y, distances)` in row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = (usize, usize, Distances)> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, d)| (i % width, i / width, *d))
    }
}
