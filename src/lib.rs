//! Signed distance fields from raster masks.
//!
//! A [`Mask`] classifies every pixel as inside or outside a shape.
//! [`DistanceField::from_mask`] computes, for every pixel, the exact Euclidean
//! distance to the nearest outside pixel and to the nearest inside pixel.
//! The [`render`] module turns a field into grayscale distance maps, glows,
//! color outlines or raw float buffers.
//!
//! ```
//! use distancefield::{DistanceField, Mask};
//!
//! let mask = Mask::from_fn(4, 4, |x, y| (1..=2).contains(&x) && (1..=2).contains(&y));
//! let field = DistanceField::from_mask(&mask).unwrap();
//! assert_eq!(field.get(1, 1).outside, 1.0);
//! assert_eq!(field.get(1, 1).inside, 0.0);
//! ```

pub mod config;
mod error;
pub mod field;
mod mask;
pub mod pipeline;
pub mod render;

pub use error::{FieldError, FieldResult};
pub use field::{DistanceField, Distances, MAX_DIMENSION, Normalization};
pub use mask::{Mask, Threshold};
pub use pipeline::Pipeline;
