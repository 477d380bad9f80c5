use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Polarization bands produced by RTC processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarization {
    VV,
    VH,
    HV,
    HH,
}

impl Polarization {
    /// All bands, in the order they are probed for on disk
    pub const ALL: [Polarization; 4] = [
        Polarization::VV,
        Polarization::VH,
        Polarization::HV,
        Polarization::HH,
    ];
}

impl std::fmt::Display for Polarization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarization::VV => write!(f, "VV"),
            Polarization::VH => write!(f, "VH"),
            Polarization::HV => write!(f, "HV"),
            Polarization::HH => write!(f, "HH"),
        }
    }
}

/// RTC processing pipeline that produced a product set
///
/// The wire codes (2 and 18) are the subscription service's process type ids.
/// The pipelines name output files differently: GAMMA separates the band with
/// an underscore, S1TBX with a hyphen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessType {
    Gamma,
    S1tbx,
}

impl ProcessType {
    /// Numeric process type id used by the subscription service
    pub fn code(&self) -> u32 {
        match self {
            ProcessType::Gamma => 2,
            ProcessType::S1tbx => 18,
        }
    }

    /// Separator between the product stem and the polarization band
    pub fn band_separator(&self) -> char {
        match self {
            ProcessType::Gamma => '_',
            ProcessType::S1tbx => '-',
        }
    }
}

impl TryFrom<u32> for ProcessType {
    type Error = AsfError;

    fn try_from(code: u32) -> AsfResult<Self> {
        match code {
            2 => Ok(ProcessType::Gamma),
            18 => Ok(ProcessType::S1tbx),
            other => Err(AsfError::InvalidInput(format!(
                "process type must be 2 (GAMMA) or 18 (S1TBX), got {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ProcessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessType::Gamma => write!(f, "GAMMA"),
            ProcessType::S1tbx => write!(f, "S1TBX"),
        }
    }
}

/// A saved recurring processing request on the subscription service
///
/// Fetched fresh per request and never cached; anything beyond the id and
/// display name is kept opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A processed product associated with a subscription
///
/// The record is externally defined; only the name (which positionally encodes
/// the acquisition date) and the download url are interpreted locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub url: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A granule record returned by the search API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GranuleInfo {
    #[serde(rename = "granuleName")]
    pub granule_name: String,
    #[serde(rename = "downloadUrl")]
    pub download_url: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "processingLevel", default)]
    pub processing_level: Option<String>,
    #[serde(rename = "flightDirection", default)]
    pub flight_direction: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Error types for ASF data access
#[derive(Debug, thiserror::Error)]
pub enum AsfError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Login failed: {0}")]
    Login(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("No match: {0}")]
    NoMatch(String),

    #[error("Download failed: {0}")]
    Download(String),
}

/// Result type for ASF data operations
pub type AsfResult<T> = Result<T, AsfError>;
