//! Core selection and filtering modules

pub mod aoi;
pub mod download;
pub mod filter;
pub mod polarization;

// Re-export main types
pub use aoi::{
    mercator_to_wgs84, Aoi, MapEvent, MapPoint, MapSurface, MapTool, MapView, SelectionGeometry,
    WEB_MERCATOR_MAX_X, WEB_MERCATOR_MAX_Y,
};
pub use download::{download_products, product_name_from_url, DownloadOptions, PRODUCT_PAGE_SIZE};
pub use filter::{
    acquisition_date, date_range_valid, filter_date_range, flight_direction_valid, product_filter,
    ProductNameFormat, VALID_FLIGHT_DIRECTIONS,
};
pub use polarization::select_polarization;
