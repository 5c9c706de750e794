use std::path::Path;

/// A decoded 2D texture: width, height and packed ARGB pixels.
///
/// The mesh/asset layer owns the texture; the rasterizer only borrows it
/// read-only while sampling.
pub struct Texture {
    data: Vec<u32>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Wrap already-decoded ARGB pixels.
    ///
    /// # Panics
    /// Panics if `data.len()` doesn't match `width * height`.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Self {
        assert_eq!(
            data.len(),
            (width * height) as usize,
            "pixel data size doesn't match dimensions"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        // Convert RGBA bytes to ARGB u32
        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Sample the nearest texel for normalized UV coordinates.
    ///
    /// Coordinates map to texels via truncation and wrap with repeat
    /// addressing; the absolute value tolerates UVs that interpolation
    /// pushed slightly negative.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        let x = ((u * self.width as f32) as i32).unsigned_abs() % self.width;
        let y = ((v * self.height as f32) as i32).unsigned_abs() % self.height;

        self.data[(y * self.width + x) as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
