use serde::{Deserialize, Serialize};

use super::{DistanceField, Distances};
use crate::error::{FieldError, FieldResult};

/// Divisor applied to each block sum when downsampling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Divide by `factor³`. Matches previously generated outputs, which come
    /// out scaled down by an extra `1 / factor`.
    #[default]
    Legacy,
    /// Divide by `factor²`, a plain box average.
    Area,
}

impl Normalization {
    fn divisor(self, factor: usize) -> f32 {
        let f = factor as f32;
        match self {
            Normalization::Legacy => f * f * f,
            Normalization::Area => f * f,
        }
    }
}

impl DistanceField {
    /// Shrink the field by `factor` in both directions, summing each
    /// `factor × factor` block per channel.
    ///
    /// `factor` must divide both dimensions; nothing is truncated.
    pub fn downsample(&self, factor: usize, normalization: Normalization) -> FieldResult<Self> {
        if factor == 0 || self.width % factor != 0 || self.height % factor != 0 {
            return Err(FieldError::InvalidFactor {
                factor,
                width: self.width,
                height: self.height,
            });
        }

        let width = self.width / factor;
        let height = self.height / factor;
        let divisor = normalization.divisor(factor);
        let mut data = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                let mut sum_outside = 0.0;
                let mut sum_inside = 0.0;
                for sy in y * factor..(y + 1) * factor {
                    for sx in x * factor..(x + 1) * factor {
                        let d = self.get(sx, sy);
                        sum_outside += d.outside;
                        sum_inside += d.inside;
                    }
                }
                data.push(Distances {
                    outside: sum_outside / divisor,
                    inside: sum_inside / divisor,
                });
            }
        }

        Ok(Self::from_raw(width, height, data))
    }
}
