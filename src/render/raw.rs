use std::io::{self, Write};

use half::f16;

use crate::field::DistanceField;

/// Element type for raw field dumps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RawFormat {
    /// 32-bit floats (RG32F texture layout)
    #[default]
    F32,
    /// 16-bit floats (RG16F texture layout)
    F16,
}

impl RawFormat {
    pub fn bytes_per_value(self) -> usize {
        match self {
            RawFormat::F32 => 4,
            RawFormat::F16 => 2,
        }
    }
}

/// Write the field as interleaved `(outside, inside)` little-endian floats,
/// row-major, with no header.
pub fn write_raw(field: &DistanceField, format: RawFormat, mut out: impl Write) -> io::Result<()> {
    let values: &[f32] = bytemuck::cast_slice(field.as_slice());
    let mut bytes = Vec::with_capacity(values.len() * format.bytes_per_value());
    match format {
        RawFormat::F32 => {
            for v in values {
                bytes.extend_from_slice(&v.to_le_bytes());
            }
        }
        RawFormat::F16 => {
            for v in values {
                bytes.extend_from_slice(&f16::from_f32(*v).to_le_bytes());
            }
        }
    }
    out.write_all(&bytes)
}
