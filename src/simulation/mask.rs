//! Opacity bitmaps used for pixel-accurate collision.
//!
//! A mask records which pixels of a sprite are opaque. Masks are built either
//! from simple shapes or from RGBA pixel data, so collision never depends on
//! the renderer.

/// Alpha above which a pixel counts as opaque.
pub const ALPHA_THRESHOLD: u8 = 127;

/// A width × height grid of opaque/transparent pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpacityMask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl OpacityMask {
    /// Creates a fully opaque mask.
    pub fn filled(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![true; width * height],
        }
    }

    /// Creates a mask with an opaque ellipse inscribed in the bounding box.
    pub fn ellipse(width: usize, height: usize) -> Self {
        let rx = width as f32 / 2.0;
        let ry = height as f32 / 2.0;
        Self::from_fn(width, height, |x, y| {
            let dx = (x as f32 + 0.5 - rx) / rx;
            let dy = (y as f32 + 0.5 - ry) / ry;
            dx * dx + dy * dy <= 1.0
        })
    }

    /// Creates a mask by evaluating `opaque(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, opaque: impl Fn(usize, usize) -> bool) -> Self {
        let mut bits = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                bits.push(opaque(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Builds a mask from tightly packed RGBA8 pixels.
    ///
    /// Returns `None` when `rgba` does not hold exactly `width * height` pixels.
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> Option<Self> {
        if rgba.len() != width * height * 4 {
            return None;
        }
        let bits = rgba
            .chunks_exact(4)
            .map(|px| px[3] > ALPHA_THRESHOLD)
            .collect();
        Some(Self {
            width,
            height,
            bits,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the pixel at (x, y) is opaque. Out-of-range pixels are not.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        self.bits[y as usize * self.width + x as usize]
    }

    /// Number of opaque pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Returns the mask mirrored top to bottom.
    pub fn flipped_vertically(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.bits[(self.height - 1 - y) * self.width + x]
        })
    }

    /// Returns the mask scaled by two with nearest-neighbour sampling.
    pub fn scaled2x(&self) -> Self {
        Self::from_fn(self.width * 2, self.height * 2, |x, y| {
            self.bits[(y / 2) * self.width + x / 2]
        })
    }

    /// First opaque pixel shared with `other` placed at `offset`, in this
    /// mask's coordinates.
    ///
    /// `offset` is the position of `other`'s top-left corner relative to this
    /// mask's top-left corner.
    pub fn overlap_point(&self, other: &OpacityMask, offset: (i32, i32)) -> Option<(i32, i32)> {
        let (ox, oy) = offset;
        let x_start = ox.max(0);
        let y_start = oy.max(0);
        let x_end = (self.width as i32).min(ox + other.width as i32);
        let y_end = (self.height as i32).min(oy + other.height as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x, y) && other.get(x - ox, y - oy) {
                    return Some((x, y));
                }
            }
        }
        None
    }

    /// Whether any opaque pixel of `other`, placed at `offset`, covers an
    /// opaque pixel of this mask.
    pub fn overlaps(&self, other: &OpacityMask, offset: (i32, i32)) -> bool {
        self.overlap_point(other, offset).is_some()
    }
}
