use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};

use crate::field::{DistanceField, Distances};

/// Parameters for the glow renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Multiplier for distances outside the shape
    pub outer_scale: f32,
    /// Multiplier for distances inside the shape
    pub inner_scale: f32,
    pub gamma: f32,
    /// Glow color. Without one the output is a grayscale intensity map.
    pub color: Option<Rgba<u8>>,
}

impl Default for Glow {
    fn default() -> Self {
        Self {
            outer_scale: 16.0,
            inner_scale: 64.0,
            gamma: 2.0,
            color: None,
        }
    }
}

impl Glow {
    /// Glow intensity for one pixel, 255 on the boundary fading to 0.
    fn intensity(&self, d: Distances) -> u8 {
        let dist = (d.inside * self.inner_scale).max(d.outside * self.outer_scale);
        let dist = (dist / 256.0).powf(self.gamma) * 256.0;
        let dist = (dist + 0.5).min(255.0);
        255 - dist as u8
    }

    pub fn render(&self, field: &DistanceField) -> DynamicImage {
        let (width, height) = (field.width() as u32, field.height() as u32);
        match self.color {
            None => {
                let mut img = GrayImage::new(width, height);
                for (x, y, d) in field.enumerate() {
                    img.put_pixel(x as u32, y as u32, Luma([self.intensity(d)]));
                }
                DynamicImage::ImageLuma8(img)
            }
            Some(Rgba([r, g, b, _])) => {
                let mut img = RgbaImage::new(width, height);
                for (x, y, d) in field.enumerate() {
                    img.put_pixel(x as u32, y as u32, Rgba([r, g, b, self.intensity(d)]));
                }
                DynamicImage::ImageRgba8(img)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_falls_off() {
        let glow = Glow::default();
        let at = |outside: f32, inside: f32| glow.intensity(Distances { outside, inside });

        assert_eq!(at(0.0, 0.0), 255);
        // 16 * 4 = 64 -> (0.25^2) * 256 = 16, +0.5 -> 16
        assert_eq!(at(4.0, 0.0), 239);
        // Inner distances are scaled harder: 64 * 2 = 128 -> 64
        assert_eq!(at(0.0, 2.0), 191);
        assert_eq!(at(100.0, 0.0), 0);
    }

    #[test]
    fn test_colored_glow_uses_alpha() {
        let glow = Glow {
            color: Some(Rgba([10, 20, 30, 255])),
            ..Glow::default()
        };
        let field = DistanceField::from_raw(1, 1, vec![Distances { outside: 4.0, inside: 0.0 }]);
        let img = glow.render(&field).into_rgba8();
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 239]);
    }

    #[test]
    fn test_gray_glow() {
        let field = DistanceField::from_raw(2, 1, vec![Distances::default(); 2]);
        let img = Glow::default().render(&field);
        assert!(matches!(img, DynamicImage::ImageLuma8(_)));
        assert_eq!(img.into_luma8().get_pixel(1, 0).0, [255]);
    }
}
