use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::field::{DistanceField, Distances};

/// How distances are quantized into an 8-bit grayscale map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMode {
    /// Distance to the nearest outside pixel, 0 outside the shape.
    Unsigned,
    /// Centered on 128: darker inside the shape, brighter outside.
    #[default]
    Signed,
    /// Two's complement `i8` stored as `u8`, 0 on the boundary.
    Signed2,
}

impl DistanceMode {
    fn quantize(self, d: Distances, scale: f32) -> u8 {
        match self {
            DistanceMode::Unsigned => (d.outside * scale).min(255.0) as u8,
            DistanceMode::Signed => {
                if d.inside == d.outside {
                    128
                } else if d.inside < d.outside {
                    (128.0 - d.outside * scale).max(0.0) as u8
                } else {
                    (128.0 + d.inside * scale).min(255.0) as u8
                }
            }
            DistanceMode::Signed2 => {
                let v = if d.inside == d.outside {
                    0.0
                } else if d.inside < d.outside {
                    (-d.outside * scale - 0.5).max(-128.0)
                } else {
                    (d.inside * scale + 0.5).min(127.0)
                };
                v as i8 as u8
            }
        }
    }
}

/// Quantize `field` into a grayscale distance map.
pub fn render_distance_map(field: &DistanceField, mode: DistanceMode, scale: f32) -> GrayImage {
    let mut img = GrayImage::new(field.width() as u32, field.height() as u32);
    for (x, y, d) in field.enumerate() {
        img.put_pixel(x as u32, y as u32, image::Luma([mode.quantize(d, scale)]));
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSIDE: Distances = Distances { outside: 3.0, inside: 0.0 };
    const OUTSIDE: Distances = Distances { outside: 0.0, inside: 2.0 };
    const EDGE: Distances = Distances { outside: 0.5, inside: 0.5 };

    #[test]
    fn test_unsigned() {
        let m = DistanceMode::Unsigned;
        assert_eq!(m.quantize(INSIDE, 10.0), 30);
        assert_eq!(m.quantize(OUTSIDE, 10.0), 0);
        assert_eq!(m.quantize(INSIDE, 100.0), 255);
    }

    #[test]
    fn test_signed() {
        let m = DistanceMode::Signed;
        assert_eq!(m.quantize(EDGE, 4.0), 128);
        assert_eq!(m.quantize(INSIDE, 4.0), 116);
        assert_eq!(m.quantize(OUTSIDE, 4.0), 136);
        assert_eq!(m.quantize(INSIDE, 100.0), 0);
        assert_eq!(m.quantize(OUTSIDE, 100.0), 255);
    }

    #[test]
    fn test_signed2() {
        let m = DistanceMode::Signed2;
        assert_eq!(m.quantize(EDGE, 4.0), 0);
        // -12.5 truncates toward zero to -12
        assert_eq!(m.quantize(INSIDE, 4.0) as i8, -12);
        assert_eq!(m.quantize(OUTSIDE, 4.0) as i8, 8);
        assert_eq!(m.quantize(INSIDE, 100.0) as i8, -128);
        assert_eq!(m.quantize(OUTSIDE, 100.0) as i8, 127);
    }

    #[test]
    fn test_render_distance_map_layout() {
        let field = DistanceField::from_raw(2, 1, vec![INSIDE, OUTSIDE]);
        let img = render_distance_map(&field, DistanceMode::Signed, 1.0);
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.get_pixel(0, 0).0, [125]);
        assert_eq!(img.get_pixel(1, 0).0, [130]);
    }
}
