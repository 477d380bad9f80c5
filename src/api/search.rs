use crate::io::fs::download_stream;
use crate::types::{AsfError, AsfResult, GranuleInfo};
use std::path::PathBuf;

/// Granule search endpoint
pub const SEARCH_API_URL: &str = "https://api.daac.asf.alaska.edu/services/search/param";

/// Search-API surface used by the filter chain
///
/// Kept as a trait so `product_filter` can be exercised without the network.
pub trait GranuleSearch {
    /// Look up a granule by name and processing level
    fn lookup(&self, granule_name: &str, processing_level: &str) -> AsfResult<GranuleInfo>;

    /// Check whether the search API echoes the granule back for the given
    /// flight direction and/or relative orbit
    fn confirm(
        &self,
        granule_name: &str,
        flight_direction: Option<&str>,
        path: Option<u32>,
    ) -> AsfResult<bool>;
}

/// Blocking client for the granule search and download service
pub struct SearchClient {
    url: String,
    client: reqwest::blocking::Client,
}

impl Default for SearchClient {
    fn default() -> Self {
        SearchClient::new(SEARCH_API_URL)
    }
}

impl SearchClient {
    pub fn new(url: &str) -> Self {
        SearchClient {
            url: url.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn search(&self, params: &[(&str, String)]) -> AsfResult<Vec<Vec<GranuleInfo>>> {
        let response = self.client.post(&self.url).query(params).send()?;
        if !response.status().is_success() {
            return Err(AsfError::Api(format!(
                "search request failed with status: {}",
                response.status()
            )));
        }
        Ok(response.json()?)
    }

    /// Resolve a granule and download it into the current directory
    ///
    /// A local file already matching the expected byte size is skipped. A
    /// download that comes up short of the declared `content-length` is an
    /// error, not a silent truncation.
    pub fn download_granule(
        &self,
        granule_name: &str,
        processing_level: &str,
    ) -> AsfResult<PathBuf> {
        let info = self.lookup(granule_name, processing_level)?;
        let local_path = PathBuf::from(&info.file_name);

        let response = self.client.post(&info.download_url).send()?;
        if !response.status().is_success() {
            return Err(AsfError::Api(format!(
                "download request for {} failed with status: {}",
                info.download_url,
                response.status()
            )));
        }
        let total_length = response.content_length().ok_or_else(|| {
            AsfError::Download(format!(
                "response for {} has no content-length header",
                info.download_url
            ))
        })?;

        if local_path.exists() {
            let local_length = std::fs::metadata(&local_path)?.len();
            if local_length == total_length {
                log::info!(
                    "{} is already present in current working directory",
                    local_path.display()
                );
                return Ok(local_path);
            }
        }

        log::info!("Downloading {}", info.download_url);
        download_stream(&local_path, response)?;

        let downloaded_length = std::fs::metadata(&local_path)?.len();
        if downloaded_length < total_length {
            return Err(AsfError::Download(format!(
                "{}: got {} of {} bytes",
                local_path.display(),
                downloaded_length,
                total_length
            )));
        }
        Ok(local_path)
    }
}

impl GranuleSearch for SearchClient {
    fn lookup(&self, granule_name: &str, processing_level: &str) -> AsfResult<GranuleInfo> {
        let params = [
            ("granule_list", granule_name.to_string()),
            ("output", "json".to_string()),
            ("processingLevel", processing_level.to_string()),
        ];
        let results = self.search(&params)?;
        first_granule(results)
    }

    fn confirm(
        &self,
        granule_name: &str,
        flight_direction: Option<&str>,
        path: Option<u32>,
    ) -> AsfResult<bool> {
        let mut params = vec![
            ("granule_list", granule_name.to_string()),
            ("output", "json".to_string()),
        ];
        if let Some(direction) = flight_direction {
            params.push(("flightDirection", direction.to_string()));
        }
        if let Some(path) = path {
            params.push(("relativeOrbit", path.to_string()));
        }
        let results = self.search(&params)?;
        Ok(results.first().map_or(false, |r| !r.is_empty()))
    }
}

/// First record of the first result array
///
/// Zero results means the granule name and processing level do not match.
pub fn first_granule(results: Vec<Vec<GranuleInfo>>) -> AsfResult<GranuleInfo> {
    results
        .into_iter()
        .next()
        .and_then(|inner| inner.into_iter().next())
        .ok_or_else(|| AsfError::NoMatch("granule/processing level mismatch".to_string()))
}
