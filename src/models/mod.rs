pub mod history;
pub mod raster;
pub mod threshold;

pub use history::{RecentPage, RecentPages};
pub use raster::RasterImage;
pub use threshold::ThresholdConfig;
