//! Colors and color assignment strategies
//!
//! Representations receive their color once, at construction. Which color
//! they get is decided by a [`ColorStrategy`], so callers choose between a
//! reproducible assignment (cycling or hashing over the palette) and a
//! seeded random one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_hex(0xFFFFFF);
    pub const YELLOW: Color = Color::from_hex(0xFFFF00);

    /// Build a color from a `0xRRGGBB` literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Fixed palette representations draw their colors from
pub const PALETTE: [Color; 40] = [
    Color::from_hex(0xFF1E00), Color::from_hex(0xFFB300), Color::from_hex(0x1533AD),
    Color::from_hex(0x00BF32), Color::from_hex(0xBF4030), Color::from_hex(0xBF9430),
    Color::from_hex(0x2C3D82), Color::from_hex(0x248F40), Color::from_hex(0xA61300),
    Color::from_hex(0xA67400), Color::from_hex(0x071C71), Color::from_hex(0x007C21),
    Color::from_hex(0xFF5640), Color::from_hex(0xFFC640), Color::from_hex(0x4965D6),
    Color::from_hex(0x38DF64), Color::from_hex(0xFF8373), Color::from_hex(0xFFD573),
    Color::from_hex(0x6F83D6), Color::from_hex(0x64DF85), Color::from_hex(0xFF5600),
    Color::from_hex(0xFF7C00), Color::from_hex(0x04859D), Color::from_hex(0x00AA72),
    Color::from_hex(0x60D4AE), Color::from_hex(0xBF6030), Color::from_hex(0xBF7630),
    Color::from_hex(0x206876), Color::from_hex(0x207F60), Color::from_hex(0x5FBDCE),
    Color::from_hex(0xA63800), Color::from_hex(0xA65100), Color::from_hex(0x015666),
    Color::from_hex(0x006E4A), Color::from_hex(0xFFB773), Color::from_hex(0xFF8040),
    Color::from_hex(0xFF9D40), Color::from_hex(0x37B6CE), Color::from_hex(0x35D4A0),
    Color::from_hex(0xFFA273),
];

/// Decides the color of the `key`-th representation
pub trait ColorStrategy {
    fn pick(&mut self, key: usize) -> Color;
}

/// `palette[key % len]`
#[derive(Debug, Clone)]
pub struct PaletteCycle {
    palette: Vec<Color>,
}

impl PaletteCycle {
    pub fn new(palette: Vec<Color>) -> Self {
        Self { palette }
    }
}

impl Default for PaletteCycle {
    fn default() -> Self {
        Self::new(PALETTE.to_vec())
    }
}

impl ColorStrategy for PaletteCycle {
    fn pick(&mut self, key: usize) -> Color {
        pick_from(&self.palette, key)
    }
}

/// Pure pseudo-random assignment: the same `(seed, key)` always maps to
/// the same palette entry.
#[derive(Debug, Clone)]
pub struct HashedPalette {
    palette: Vec<Color>,
    seed: u64,
}

impl HashedPalette {
    pub fn new(seed: u64) -> Self {
        Self {
            palette: PALETTE.to_vec(),
            seed,
        }
    }
}

impl ColorStrategy for HashedPalette {
    fn pick(&mut self, key: usize) -> Color {
        if self.palette.is_empty() {
            return Color::default();
        }
        let mut rng = StdRng::seed_from_u64(self.seed ^ key as u64);
        self.palette[rng.gen_range(0..self.palette.len())]
    }
}

/// Uniform random choice from the palette, driven by an explicitly seeded RNG
#[derive(Debug, Clone)]
pub struct SeededPalette {
    palette: Vec<Color>,
    rng: StdRng,
}

impl SeededPalette {
    pub fn new(seed: u64) -> Self {
        Self {
            palette: PALETTE.to_vec(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ColorStrategy for SeededPalette {
    fn pick(&mut self, _key: usize) -> Color {
        if self.palette.is_empty() {
            return Color::default();
        }
        let index = self.rng.gen_range(0..self.palette.len());
        self.palette[index]
    }
}

fn pick_from(palette: &[Color], index: usize) -> Color {
    if palette.is_empty() {
        Color::default()
    } else {
        palette[index % palette.len()]
    }
}
