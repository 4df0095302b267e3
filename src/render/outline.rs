use std::str::FromStr;

use image::{Rgba, RgbaImage};

use super::color::{YCbCr, parse_color};
use crate::error::{FieldError, FieldResult};
use crate::field::DistanceField;

/// A color pinned to a signed distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub dist: f32,
    pub alpha: f32,
    pub color: YCbCr,
}

impl ColorStop {
    pub fn new(dist: f32, rgba: Rgba<u8>) -> Self {
        let [r, g, b, a] = rgba.0;
        Self {
            dist,
            alpha: a as f32,
            color: YCbCr::from_rgb(r, g, b),
        }
    }

    fn to_rgba(self) -> Rgba<u8> {
        let [r, g, b] = self.color.to_rgb();
        Rgba([r, g, b, self.alpha.round().clamp(0.0, 255.0) as u8])
    }
}

impl FromStr for ColorStop {
    type Err = FieldError;

    /// Parse `dist:color`, e.g. `-2.5:#ff8800`.
    fn from_str(s: &str) -> FieldResult<Self> {
        let (dist, color) = s
            .split_once(':')
            .ok_or_else(|| FieldError::InvalidColorStop(s.to_string()))?;
        let dist: f32 = dist
            .trim()
            .parse()
            .map_err(|_| FieldError::InvalidColorStop(s.to_string()))?;
        Ok(Self::new(dist, parse_color(color.trim())?))
    }
}

/// Multi-stop color ramp over the signed distance.
///
/// Outside the shape the signed distance is negative, inside it is positive
/// (see [`Distances::signed`](crate::field::Distances::signed)).
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    stops: Vec<ColorStop>,
}

impl Outline {
    pub fn new(mut stops: Vec<ColorStop>) -> FieldResult<Self> {
        if stops.is_empty() {
            return Err(FieldError::EmptyColorStops);
        }
        stops.sort_by(|a, b| a.dist.total_cmp(&b.dist));
        Ok(Self { stops })
    }

    /// Color at signed distance `dist`, clamped to the outermost stops.
    pub fn sample(&self, dist: f32) -> Rgba<u8> {
        let first = self.stops[0];
        if dist <= first.dist {
            return first.to_rgba();
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if dist <= b.dist {
                let t = (dist - a.dist) / (b.dist - a.dist);
                return ColorStop {
                    dist,
                    alpha: a.alpha + (b.alpha - a.alpha) * t,
                    color: a.color.lerp(b.color, t),
                }
                .to_rgba();
            }
        }
        self.stops[self.stops.len() - 1].to_rgba()
    }

    pub fn render(&self, field: &DistanceField) -> RgbaImage {
        let mut img = RgbaImage::new(field.width() as u32, field.height() as u32);
        for (x, y, d) in field.enumerate() {
            img.put_pixel(x as u32, y as u32, self.sample(d.signed()));
        }
        img
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Distances;

    fn outline(stops: &[&str]) -> Outline {
        Outline::new(stops.iter().map(|s| s.parse().unwrap()).collect()).unwrap()
    }

    #[test]
    fn test_parse_stop() {
        let stop: ColorStop = "-2.5:#ff0000".parse().unwrap();
        assert_eq!(stop.dist, -2.5);
        assert_eq!(stop.alpha, 255.0);
        assert_eq!(stop.to_rgba().0, [255, 0, 0, 255]);

        assert_eq!(
            "2.5".parse::<ColorStop>(),
            Err(FieldError::InvalidColorStop("2.5".to_string()))
        );
        assert_eq!(
            "abc:#fff".parse::<ColorStop>(),
            Err(FieldError::InvalidColorStop("abc:#fff".to_string()))
        );
        assert!(matches!(
            "1:fff".parse::<ColorStop>(),
            Err(FieldError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_requires_stops() {
        assert_eq!(Outline::new(Vec::new()), Err(FieldError::EmptyColorStops));
    }

    #[test]
    fn test_sample_clamps_and_interpolates() {
        // Given out of order on purpose
        let o = outline(&["4:#00ffffff", "0:#ffffffff", "-4:#00000000"]);

        assert_eq!(o.sample(-10.0).0, [0, 0, 0, 0]);
        assert_eq!(o.sample(0.0).0, [255, 255, 255, 255]);
        assert_eq!(o.sample(10.0).0[3], 0);

        let mid = o.sample(-2.0).0;
        for c in mid {
            assert!((c as i32 - 128).abs() <= 1, "{mid:?}");
        }
    }

    #[test]
    fn test_render_uses_signed_distance() {
        let o = outline(&["-1:#000", "1:#fff"]);
        let field = DistanceField::from_raw(
            2,
            1,
            vec![
                Distances { outside: 0.0, inside: 5.0 },
                Distances { outside: 5.0, inside: 0.0 },
            ],
        );
        let img = o.render(&field);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255, 255]);
    }
}
