//! Padded nearest-point grid and the two-pass sweep that fills it.
//!
//! Every cell tracks the offset to the nearest outside cell and the offset to
//! the nearest inside cell. Two directional passes over the grid, each
//! relaxing a cell from its already-visited 8-neighbours, leave exact squared
//! Euclidean distances in both channels.

use super::{DistanceField, Distances};
use crate::error::{FieldError, FieldResult};
use crate::mask::Mask;

/// Offset meaning "no point known yet"
const LARGE_OFFSET: i32 = 1 << 15;
/// Squared distance meaning "no point known yet"
const LARGE_SQ_DIST: i64 = 1 << 31;

/// Largest mask width or height accepted.
///
/// Unknown offsets start at `LARGE_OFFSET` and drift by at most one unit per
/// grid step while propagating, so a sentinel-derived squared distance never
/// drops below `2 * (LARGE_OFFSET - MAX_DIMENSION - 2)^2`. That has to stay
/// well above the largest real squared distance, `2 * (MAX_DIMENSION + 1)^2`.
pub const MAX_DIMENSION: usize = 8192;

/// Offset to the nearest known point of one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NearestPoint {
    dx: i32,
    dy: i32,
    sq_dist: i64,
}

impl NearestPoint {
    const HERE: Self = Self {
        dx: 0,
        dy: 0,
        sq_dist: 0,
    };

    const UNKNOWN: Self = Self {
        dx: LARGE_OFFSET,
        dy: LARGE_OFFSET,
        sq_dist: LARGE_SQ_DIST,
    };

    /// Take `src` shifted by `(dx, dy)` if it is strictly closer.
    #[inline]
    fn relax(&mut self, src: NearestPoint, dx: i32, dy: i32) {
        let cx = src.dx + dx;
        let cy = src.dy + dy;
        let sq_dist = cx as i64 * cx as i64 + cy as i64 * cy as i64;
        if sq_dist < self.sq_dist {
            *self = Self { dx: cx, dy: cy, sq_dist };
        }
    }

    fn distance(&self) -> f32 {
        (self.sq_dist as f64).sqrt() as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    outside: NearestPoint,
    inside: NearestPoint,
}

impl Cell {
    const OUTSIDE: Self = Self {
        outside: NearestPoint::HERE,
        inside: NearestPoint::UNKNOWN,
    };

    const INSIDE: Self = Self {
        outside: NearestPoint::UNKNOWN,
        inside: NearestPoint::HERE,
    };
}

/// Mask-sized grid with a one-cell outside border on every side.
pub(crate) struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Seed a grid from `mask`, rejecting masks too large for the sentinels.
    pub fn from_mask(mask: &Mask) -> FieldResult<Self> {
        if mask.width() > MAX_DIMENSION || mask.height() > MAX_DIMENSION {
            return Err(FieldError::DimensionsTooLarge {
                width: mask.width(),
                height: mask.height(),
                max: MAX_DIMENSION,
            });
        }

        let width = mask.width() + 2;
        let height = mask.height() + 2;
        let mut cells = vec![Cell::OUTSIDE; width * height];

        for y in 0..mask.height() {
            for x in 0..mask.width() {
                if mask.get(x, y) {
                    cells[(x + 1) + (y + 1) * width] = Cell::INSIDE;
                }
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Run both sweeps. Border cells are read but never written.
    pub fn propagate(&mut self) {
        self.forward_pass();
        self.backward_pass();
    }

    fn forward_pass(&mut self) {
        for y in 1..self.height - 1 {
            for x in 1..self.width - 1 {
                self.relax(x, y, -1, 0);
                self.relax(x, y, 0, -1);
                self.relax(x, y, -1, -1);
                self.relax(x, y, 1, -1);
            }
            for x in (1..self.width - 1).rev() {
                self.relax(x, y, 1, 0);
            }
        }
    }

    fn backward_pass(&mut self) {
        for y in (1..self.height - 1).rev() {
            for x in (1..self.width - 1).rev() {
                self.relax(x, y, 1, 0);
                self.relax(x, y, 0, 1);
                self.relax(x, y, 1, 1);
                self.relax(x, y, -1, 1);
            }
            for x in 1..self.width - 1 {
                self.relax(x, y, -1, 0);
            }
        }
    }

    /// Relax cell `(x, y)` from its neighbour at `(x + dx, y + dy)`.
    #[inline]
    fn relax(&mut self, x: usize, y: usize, dx: isize, dy: isize) {
        let src = self.cells[x.wrapping_add_signed(dx) + y.wrapping_add_signed(dy) * self.width];
        let dst = &mut self.cells[x + y * self.width];
        dst.outside.relax(src.outside, dx as i32, dy as i32);
        dst.inside.relax(src.inside, dx as i32, dy as i32);
    }

    /// Strip the border and convert squared distances to distances.
    pub fn into_field(self) -> DistanceField {
        let width = self.width - 2;
        let height = self.height - 2;
        let mut data = Vec::with_capacity(width * height);
        for y in 1..self.height - 1 {
            for cell in &self.cells[1 + y * self.width..(self.width - 1) + y * self.width] {
                data.push(Distances {
                    outside: cell.outside.distance(),
                    inside: cell.inside.distance(),
                });
            }
        }
        DistanceField::from_raw(width, height, data)
    }
}
