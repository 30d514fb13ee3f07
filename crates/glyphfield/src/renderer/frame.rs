use bytemuck::{Pod, Zeroable};

use crate::api::config::Palette;

/// One glyph draw, read by the host straight out of linear memory.
/// 4 floats = 16 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GlyphInstance {
    /// X of the glyph anchor in viewport space, jitter included.
    pub x: f32,
    /// Y of the glyph anchor in viewport space, jitter included.
    pub y: f32,
    /// Font size in CSS pixels.
    pub size: f32,
    /// Glyph code (0.0 = '0', 1.0 = '1').
    pub glyph: f32,
}

impl GlyphInstance {
    pub const FLOATS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Full-canvas translucent fill drawn before the glyphs.
/// Leaves fading trails instead of clearing the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub rgb: [u8; 3],
    pub alpha: u8,
}

impl Overlay {
    /// Alpha as a 0.0–1.0 fraction, the form canvas `rgba()` strings expect.
    pub fn alpha_fraction(&self) -> f32 {
        self.alpha as f32 / 255.0
    }
}

/// Everything the host needs to paint one frame.
pub struct FrameBuffer {
    pub overlay: Overlay,
    pub glyph_color: [u8; 3],
    pub instances: Vec<GlyphInstance>,
}

impl FrameBuffer {
    pub fn new(palette: &Palette) -> Self {
        Self {
            overlay: Overlay {
                rgb: palette.background,
                alpha: palette.overlay_alpha,
            },
            glyph_color: palette.glyph,
            instances: Vec::with_capacity(1024),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: GlyphInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for zero-copy reads from JS.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances[..])
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(&Palette::default())
    }
}
