//! I/O modules for filesystem housekeeping, rasters, and credentials

pub mod credentials;
pub mod fs;
pub mod raster;

pub use credentials::{CredentialStore, Credentials, NetrcStore, EARTHDATA_HOST};
pub use fs::{download_stream, new_directory, path_exists, unzip, DOWNLOAD_CHUNK_SIZE};
pub use raster::{polarization_exists, remove_empty_rasters, RasterSweep};
