//! Image sampling: turns a raster image into particle home positions.
//!
//! The image is contain-fitted into the viewport with a margin, centered, and
//! walked on a coarse grid. Every grid pixel brighter than the threshold
//! becomes one home position in viewport coordinates.

use glam::Vec2;

use crate::api::config::SamplerConfig;
use crate::api::types::Viewport;
use crate::assets::raster::RasterImage;

/// Placement of a contain-fitted image inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    /// Uniform image-to-viewport scale factor.
    pub scale: f32,
    /// Top-left corner of the scaled image in viewport coordinates.
    pub offset: Vec2,
    /// Scaled image size.
    pub scaled_size: Vec2,
}

/// Largest uniform scale that fits `image_size` into `fit_fraction` of the
/// viewport on both axes, centered.
pub fn contain_fit(image_width: u32, image_height: u32, viewport: Viewport, fit_fraction: f32) -> Fit {
    let iw = image_width as f32;
    let ih = image_height as f32;
    let scale = ((viewport.width * fit_fraction) / iw).min((viewport.height * fit_fraction) / ih);
    let scaled_size = Vec2::new(iw * scale, ih * scale);
    let offset = (Vec2::new(viewport.width, viewport.height) - scaled_size) / 2.0;
    Fit {
        scale,
        offset,
        scaled_size,
    }
}

/// Grid step in image pixels: denser sampling below the breakpoint.
pub fn grid_step(viewport: Viewport, config: &SamplerConfig, breakpoint: f32) -> u32 {
    let step = if viewport.width < breakpoint {
        config.narrow_step
    } else {
        config.wide_step
    };
    step.max(1)
}

/// Sample `image` into home positions for `viewport`.
///
/// Points are emitted column by column (outer loop over x, inner over y).
/// A degenerate viewport yields no points.
pub fn sample_homes(
    image: &RasterImage,
    viewport: Viewport,
    config: &SamplerConfig,
    breakpoint: f32,
) -> Vec<Vec2> {
    if viewport.is_degenerate() {
        return Vec::new();
    }

    let fit = contain_fit(image.width(), image.height(), viewport, config.fit_fraction);
    let step = grid_step(viewport, config, breakpoint) as usize;

    let mut homes = Vec::new();
    for x in (0..image.width()).step_by(step) {
        for y in (0..image.height()).step_by(step) {
            if image.brightness(x, y) > config.brightness_threshold {
                homes.push(fit.offset + Vec2::new(x as f32, y as f32) * fit.scale);
            }
        }
    }
    homes
}
