use crate::types::{AsfError, AsfResult};
use gdal::Dataset;
use ndarray::Array2;
use std::path::Path;

/// Counts from a [`remove_empty_rasters`] sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterSweep {
    pub examined: usize,
    pub removed: usize,
}

/// Delete rasters whose first band contains no non-zero pixel
///
/// `names` must contain at least one file name. Files that cannot be opened
/// as rasters are skipped with a warning, matching the behavior of a failed
/// raster open in the notebooks this replaces.
pub fn remove_empty_rasters<P: AsRef<Path>>(dir: P, names: &[String]) -> AsfResult<RasterSweep> {
    if names.is_empty() {
        return Err(AsfError::InvalidInput(
            "names must contain at least 1 file name".to_string(),
        ));
    }

    let dir = dir.as_ref();
    let mut removed = 0;
    for name in names {
        let path = dir.join(name);
        let dataset = match Dataset::open(&path) {
            Ok(dataset) => dataset,
            Err(e) => {
                log::warn!("Skipping unreadable raster {}: {}", path.display(), e);
                continue;
            }
        };

        let (width, height) = dataset.raster_size();
        let band = dataset.rasterband(1)?;
        let band_data = band.read_as::<f32>((0, 0), (width, height), (width, height), None)?;
        let pixels = Array2::from_shape_vec((height, width), band_data.data)
            .map_err(|e| AsfError::InvalidFormat(format!("Failed to reshape raster data: {}", e)))?;

        if pixels.iter().all(|v| *v == 0.0) {
            std::fs::remove_file(&path)?;
            removed += 1;
            log::debug!("Removed empty raster: {}", path.display());
        }
    }

    log::info!("GeoTiffs examined: {}", names.len());
    log::info!("GeoTiffs removed:  {}", removed);
    Ok(RasterSweep {
        examined: names.len(),
        removed,
    })
}

/// Probe whether any file matches a wildcard path
///
/// e.g. `rtc_products/*/*_VV.tif`
pub fn polarization_exists(pattern: &str) -> bool {
    match glob::glob(pattern) {
        Ok(paths) => paths.filter_map(Result::ok).next().is_some(),
        Err(e) => {
            log::warn!("Invalid wildcard path {}: {}", pattern, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_remove_empty_rasters_requires_names() {
        let temp_dir = TempDir::new().unwrap();
        let result = remove_empty_rasters(temp_dir.path(), &[]);
        assert!(matches!(result, Err(AsfError::InvalidInput(_))));
    }

    #[test]
    fn test_remove_empty_rasters_skips_unreadable_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("not_a_raster.tif"), b"plain text").unwrap();

        let names = vec!["not_a_raster.tif".to_string()];
        let sweep = remove_empty_rasters(temp_dir.path(), &names).unwrap();
        assert_eq!(sweep.examined, 1);
        assert_eq!(sweep.removed, 0);
        assert!(temp_dir.path().join("not_a_raster.tif").exists());
    }

    #[test]
    fn test_polarization_exists_probes_wildcards() {
        let temp_dir = TempDir::new().unwrap();
        let product_dir = temp_dir.path().join("S1A_20200615");
        std::fs::create_dir_all(&product_dir).unwrap();
        std::fs::write(product_dir.join("S1A_20200615_VV.tif"), b"").unwrap();

        let base = temp_dir.path().display();
        assert!(polarization_exists(&format!("{}/*/*_VV.tif", base)));
        assert!(!polarization_exists(&format!("{}/*/*_HH.tif", base)));
    }
}
