use crate::systems::rng::Rng;

/// One of the two symbols a particle can be drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Glyph {
    Zero = 0,
    One = 1,
}

impl Glyph {
    /// Pick a glyph with equal odds.
    pub fn random(rng: &mut Rng) -> Self {
        if rng.next_bool() {
            Glyph::Zero
        } else {
            Glyph::One
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Glyph::Zero => '0',
            Glyph::One => '1',
        }
    }

    /// Float code written into the draw-instruction buffer (0.0 or 1.0).
    pub fn code(self) -> f32 {
        self as u8 as f32
    }
}

/// Size of the drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether either side is zero, negative or NaN.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// `width + height`: past this radius a ripple is guaranteed off-canvas.
    pub fn ripple_horizon(&self) -> f32 {
        self.width + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_chars_and_codes() {
        assert_eq!(Glyph::Zero.as_char(), '0');
        assert_eq!(Glyph::One.as_char(), '1');
        assert_eq!(Glyph::Zero.code(), 0.0);
        assert_eq!(Glyph::One.code(), 1.0);
    }

    #[test]
    fn random_glyphs_use_both_symbols() {
        let mut rng = Rng::new(3);
        let glyphs: Vec<Glyph> = (0..64).map(|_| Glyph::random(&mut rng)).collect();
        assert!(glyphs.contains(&Glyph::Zero));
        assert!(glyphs.contains(&Glyph::One));
    }

    #[test]
    fn degenerate_viewport() {
        assert!(Viewport::new(0.0, 100.0).is_degenerate());
        assert!(Viewport::new(100.0, f32::NAN).is_degenerate());
        assert!(!Viewport::new(1.0, 1.0).is_degenerate());
    }
}
