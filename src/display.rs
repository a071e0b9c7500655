//! The monochrome frame buffer.
use crate::definitions::display;

/// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
/// `(64 x 32)` on the original hardware. The pixels are stored row-major, a pixel is only ever
/// toggled by a sprite or reset by a full clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Default for Display {
    fn default() -> Self {
        Self::new(display::WIDTH, display::HEIGHT)
    }
}

impl Display {
    /// Both dimensions have to be positive, callers go through [`Config::validate`] first.
    ///
    /// [`Config::validate`]: crate::config::Config::validate
    pub(crate) fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "empty display {}x{}", width, height);
        Self {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All pixels, row after row.
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// Iterates over the rows of the display.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks(self.width)
    }

    /// Returns the pixel at the given coordinates, `None` if outside of the display.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Will clear the display
    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|pixel| *pixel = false);
    }

    /// XORs the sprite into the display and reports whether a set pixel was turned off.
    ///
    /// Each byte of `sprite` is one row of eight pixels, most significant bit first. The
    /// anchor `(x, y)` is wrapped into the display once. With `clip` the parts of the sprite
    /// reaching over the right or bottom edge are dropped, otherwise they wrap around.
    ///
    /// # Example
    /// ```rust
    /// # use chip::display::Display;
    /// let mut display = Display::default();
    /// assert!(!display.draw(62, 0, &[0b1010_0000], true));
    /// assert_eq!(display.get(62, 0), Some(true));
    /// assert_eq!(display.get(63, 0), Some(false));
    /// assert!(display.draw(62, 0, &[0b1000_0000], true));
    /// assert_eq!(display.get(62, 0), Some(false));
    /// ```
    pub fn draw(&mut self, x: usize, y: usize, sprite: &[u8], clip: bool) -> bool {
        let coorx = x % self.width;
        let coory = y % self.height;

        let mut collision = false;

        for (i, row) in sprite.iter().enumerate() {
            let mut y = coory + i;
            if y >= self.height {
                if clip {
                    break;
                }
                y %= self.height;
            }

            for j in 0..display::SPRITE_WIDTH {
                let mut x = coorx + j;
                if x >= self.width {
                    if clip {
                        break;
                    }
                    x %= self.width;
                }

                let mask = 0x80u8 >> j;
                if row & mask == 0 {
                    continue;
                }

                let pixel = &mut self.pixels[y * self.width + x];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }

        collision
    }
}
