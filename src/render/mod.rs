//! Renderers turning a distance field into images or raw buffers.

mod color;
mod distance_map;
mod glow;
mod outline;
mod raw;

pub use color::{YCbCr, parse_color};
pub use distance_map::{DistanceMode, render_distance_map};
pub use glow::Glow;
pub use outline::{ColorStop, Outline};
pub use raw::{RawFormat, write_raw};
