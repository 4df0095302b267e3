use image::RgbaImage;

use crate::error::{FieldError, FieldResult};

/// Luma weights summing to 256 (54 + 184 + 18)
const LUMA_WEIGHTS: [u32; 3] = [54, 184, 18];

/// Threshold rules that classify an image pixel as inside the shape.
///
/// A pixel is inside when its alpha reaches `alpha`, or when its
/// alpha-weighted luma reaches `gray`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold {
    pub gray: u8,
    pub alpha: u8,
}

impl Default for Threshold {
    fn default() -> Self {
        Self { gray: 16, alpha: 32 }
    }
}

impl Threshold {
    /// Classify one straight-alpha RGBA pixel.
    pub fn is_inside(&self, [r, g, b, a]: [u8; 4]) -> bool {
        let a = a as u32;
        let luma = (r as u32 * LUMA_WEIGHTS[0]
            + g as u32 * LUMA_WEIGHTS[1]
            + b as u32 * LUMA_WEIGHTS[2])
            * a;
        a >= self.alpha as u32 || luma >= self.gray as u32 * 256 * 255
    }
}

/// Row-major boolean grid, `true` meaning inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Mask {
    /// Create a mask with every cell outside.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Wrap an existing row-major cell buffer.
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> FieldResult<Self> {
        let expected = width * height;
        if cells.len() != expected {
            return Err(FieldError::CellCount {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a mask by evaluating `inside(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut inside: impl FnMut(usize, usize) -> bool) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(inside(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Threshold an RGBA image into a mask.
    pub fn from_image(image: &RgbaImage, threshold: Threshold) -> Self {
        Self::from_fn(image.width() as usize, image.height() as usize, |x, y| {
            threshold.is_inside(image.get_pixel(x as u32, y as u32).0)
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[x + y * self.width]
    }

    pub fn set(&mut self, x: usize, y: usize, inside: bool) {
        self.cells[x + y * self.width] = inside;
    }

    /// Number of inside cells
    pub fn inside_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Swap the inside and outside classification of every cell.
    pub fn inverted(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|c| !c).collect(),
        }
    }

    /// Surround the mask with `pad` outside cells on every side.
    pub fn padded(&self, pad: usize) -> Self {
        if pad == 0 {
            return self.clone();
        }
        let width = self.width + 2 * pad;
        let height = self.height + 2 * pad;
        let mut padded = Self::new(width, height);
        for y in 0..self.height {
            let src = &self.cells[y * self.width..(y + 1) * self.width];
            let start = pad + (y + pad) * width;
            padded.cells[start..start + self.width].copy_from_slice(src);
        }
        padded
    }
}
