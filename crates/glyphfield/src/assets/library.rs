use super::error::AssetError;
use super::raster::RasterImage;

/// The source images available to the portrait.
///
/// The primary image is required for anything to show up. The narrow image is
/// optional: when it is missing or failed to load, the primary image is used
/// at every viewport width.
#[derive(Debug, Default)]
pub struct ImageLibrary {
    primary: Option<RasterImage>,
    narrow: Option<RasterImage>,
}

impl ImageLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_primary(&mut self, image: RasterImage) {
        log::info!("primary image loaded ({}x{})", image.width(), image.height());
        self.primary = Some(image);
    }

    pub fn set_narrow(&mut self, image: RasterImage) {
        log::info!("narrow image loaded ({}x{})", image.width(), image.height());
        self.narrow = Some(image);
    }

    /// Record that the narrow image could not be obtained.
    /// Never fatal: the primary image takes its place.
    pub fn narrow_unavailable(&mut self, reason: &str) {
        log::warn!("narrow image unavailable, using primary image: {}", reason);
        self.narrow = None;
    }

    /// Accept the outcome of loading the narrow image.
    pub fn load_narrow(&mut self, result: Result<RasterImage, AssetError>) {
        match result {
            Ok(image) => self.set_narrow(image),
            Err(e) => self.narrow_unavailable(&e.to_string()),
        }
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    pub fn has_narrow(&self) -> bool {
        self.narrow.is_some()
    }

    /// Pick the image for a viewport width: the narrow image at or below the
    /// breakpoint when it loaded, otherwise the primary image.
    pub fn select(&self, viewport_width: f32, breakpoint: f32) -> Option<&RasterImage> {
        match &self.narrow {
            Some(narrow) if viewport_width <= breakpoint => Some(narrow),
            _ => self.primary.as_ref(),
        }
    }
}
