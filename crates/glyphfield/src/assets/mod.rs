pub mod error;
pub mod library;
pub mod raster;

pub use error::AssetError;
pub use library::ImageLibrary;
pub use raster::RasterImage;
