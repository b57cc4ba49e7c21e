//! Persistence: netCDF static drivers, JSON projects and PNG previews

pub mod netcdf;
pub mod preview;
pub mod project;
pub mod raster;

pub use project::{MergeSummary, PixelRecord, ProjectFile};
pub use raster::DecodedRaster;
