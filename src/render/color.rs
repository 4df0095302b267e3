use image::Rgba;

use crate::error::{FieldError, FieldResult};

/// Parse `#rgb`, `#argb`, `#rrggbb` or `#aarrggbb` into straight-alpha RGBA.
pub fn parse_color(hex: &str) -> FieldResult<Rgba<u8>> {
    let invalid = || FieldError::InvalidColor(hex.to_string());

    let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;

    // Expand a 4-bit channel to 8 bits
    let nibble = |shift: u32| ((value >> shift) & 0xf) as u8 * 0x11;
    let byte = |shift: u32| (value >> shift) as u8;

    match digits.len() {
        3 => Ok(Rgba([nibble(8), nibble(4), nibble(0), 255])),
        4 => Ok(Rgba([nibble(8), nibble(4), nibble(0), nibble(12)])),
        6 => Ok(Rgba([byte(16), byte(8), byte(0), 255])),
        8 => Ok(Rgba([byte(16), byte(8), byte(0), byte(24)])),
        _ => Err(invalid()),
    }
}

/// Full-range (JFIF) YCbCr triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YCbCr {
    pub y: f32,
    pub cb: f32,
    pub cr: f32,
}

impl YCbCr {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        Self {
            y: 0.299 * r + 0.587 * g + 0.114 * b,
            cb: 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b,
            cr: 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b,
        }
    }

    pub fn to_rgb(self) -> [u8; 3] {
        let cb = self.cb - 128.0;
        let cr = self.cr - 128.0;
        let quantize = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        [
            quantize(self.y + 1.402 * cr),
            quantize(self.y - 0.344136 * cb - 0.714136 * cr),
            quantize(self.y + 1.772 * cb),
        ]
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            y: self.y + (other.y - self.y) * t,
            cb: self.cb + (other.cb - self.cb) * t,
            cr: self.cr + (other.cr - self.cr) * t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_formats() {
        assert_eq!(parse_color("#f80").unwrap(), Rgba([0xff, 0x88, 0x00, 255]));
        assert_eq!(parse_color("#8f80").unwrap(), Rgba([0xff, 0x88, 0x00, 0x88]));
        assert_eq!(parse_color("#12ab34").unwrap(), Rgba([0x12, 0xab, 0x34, 255]));
        assert_eq!(parse_color("#8012ab34").unwrap(), Rgba([0x12, 0xab, 0x34, 0x80]));
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        for bad in ["", "f80", "#", "#12345", "#ggg", "#+123", "#123456789"] {
            assert_eq!(
                parse_color(bad),
                Err(FieldError::InvalidColor(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_ycbcr_round_trip_primaries() {
        for rgb in [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255], [0, 0, 0], [12, 200, 90]] {
            let back = YCbCr::from_rgb(rgb[0], rgb[1], rgb[2]).to_rgb();
            for c in 0..3 {
                assert!((back[c] as i32 - rgb[c] as i32).abs() <= 1, "{rgb:?} -> {back:?}");
            }
        }
    }
}
