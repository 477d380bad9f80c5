//! sarfetch: Search, Download, and AOI Selection for ASF SAR Products
//!
//! This library backs satellite-imagery notebooks with the plumbing they need
//! around the ASF data services: granule search and download, subscription
//! product retrieval with date/flight-direction/path filtering, polarization
//! selection from what is present on disk, and an area-of-interest selection
//! state machine that any map surface can drive.

pub mod api;
pub mod core;
pub mod io;
pub mod prompt;
pub mod types;

// Re-export main types and functions for easier access
pub use types::{
    AsfError, AsfResult, GranuleInfo, Polarization, ProcessType, Product, Subscription,
};

pub use api::{
    list_subscriptions, login, pick_subscription, GranuleSearch, Hyp3Api, Hyp3Client, SearchClient,
};

pub use core::{
    download_products, select_polarization, Aoi, DownloadOptions, MapEvent, MapPoint, MapSurface,
    MapView, SelectionGeometry,
};

pub use io::{CredentialStore, NetrcStore};

pub use prompt::{Prompt, ScriptedPrompt, StdinPrompt};
