/// An RGB colour with one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Same intensity on all three channels.
    pub const fn gray(v: u8) -> Self {
        Color { r: v, g: v, b: v }
    }

    /// Saturates each channel into `0..=255`.
    pub fn clamped(r: i32, g: i32, b: i32) -> Self {
        Color {
            r: r.clamp(0, 255) as u8,
            g: g.clamp(0, 255) as u8,
            b: b.clamp(0, 255) as u8,
        }
    }
}

impl From<u8> for Color {
    fn from(v: u8) -> Self {
        Color::gray(v)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from(rgb: (u8, u8, u8)) -> Self {
        Color::rgb(rgb.0, rgb.1, rgb.2)
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Color::rgb(rgb[0], rgb[1], rgb[2])
    }
}

/// The drawable surface handed to sketches.
///
/// Pixels are stored row-major as packed RGB triples, so `as_rgb()` is
/// `width * height * 3` bytes long. Writes outside the canvas are dropped
/// without error so generative code can wander past the edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Bytes needed for a `width` x `height` canvas, `None` if that does not
    /// fit in `usize`.
    pub fn byte_len(width: u32, height: u32) -> Option<usize> {
        (width as usize).checked_mul(height as usize)?.checked_mul(3)
    }

    pub fn try_new(width: u32, height: u32) -> Option<Self> {
        let len = Self::byte_len(width, height)?;
        Some(Canvas {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// # Panics
    ///
    /// If the pixel data would not fit in `usize`. `Config::validate`
    /// rejects such sizes.
    pub fn new(width: u32, height: u32) -> Self {
        match Self::try_new(width, height) {
            Some(canvas) => canvas,
            None => panic!("canvas of {width}x{height} does not fit in memory"),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: impl Into<Color>) {
        let c = color.into();
        for px in self.data.chunks_exact_mut(3) {
            px[0] = c.r;
            px[1] = c.g;
            px[2] = c.b;
        }
    }

    pub fn pixel(&mut self, x: i32, y: i32, color: impl Into<Color>) {
        let Some(base) = self.offset(x, y) else {
            return;
        };
        let c = color.into();
        self.data[base] = c.r;
        self.data[base + 1] = c.g;
        self.data[base + 2] = c.b;
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        let base = self.offset(x, y)?;
        Some(Color::rgb(
            self.data[base],
            self.data[base + 1],
            self.data[base + 2],
        ))
    }

    pub fn as_rgb(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 3)
    }
}
