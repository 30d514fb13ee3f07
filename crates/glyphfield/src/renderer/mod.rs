pub mod frame;

pub use frame::{FrameBuffer, GlyphInstance, Overlay};
