use crate::types::{AsfError, AsfResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Download chunk size, 1 MiB
pub const DOWNLOAD_CHUNK_SIZE: usize = 1024 * 1024;

/// Check whether a path exists, reporting invalid paths
///
/// Never fails; an absent path is logged and reported as `false` so callers
/// can guard follow-up work without unwinding.
pub fn path_exists<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    if path.exists() {
        true
    } else {
        log::warn!("Invalid path: {}", path.display());
        false
    }
}

/// Create a directory and any missing parents
///
/// Idempotent: an existing directory is reported and left untouched.
pub fn new_directory<P: AsRef<Path>>(path: P) -> AsfResult<()> {
    let path = path.as_ref();
    if path.exists() {
        log::info!("{} already exists", path.display());
    } else {
        std::fs::create_dir_all(path)?;
        log::info!("Created: {}", path.display());
    }
    Ok(())
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("[{bar:50}] {bytes} {bytes_per_sec}, {percent}%")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("= ")
}

/// Stream an HTTP response body to `filename` in 1 MiB chunks
///
/// The response must carry a `content-length` header; the progress bar is
/// sized from it. Any existing file at `filename` is overwritten. Returns the
/// number of bytes written. There is no partial-resume support.
pub fn download_stream<P: AsRef<Path>>(
    filename: P,
    mut response: reqwest::blocking::Response,
) -> AsfResult<u64> {
    let filename = filename.as_ref();
    let total_length = response.content_length().ok_or_else(|| {
        AsfError::Download(format!(
            "response for {} has no content-length header",
            filename.display()
        ))
    })?;

    let mut file = File::create(filename)?;
    let bar = ProgressBar::new(total_length);
    bar.set_style(progress_style());

    let mut buffer = vec![0u8; DOWNLOAD_CHUNK_SIZE];
    let mut written: u64 = 0;
    loop {
        let n = response.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        file.write_all(&buffer[..n])?;
        written += n as u64;
        bar.inc(n as u64);
    }
    file.flush()?;
    bar.finish();

    log::debug!("Wrote {} bytes to {}", written, filename.display());
    Ok(written)
}

/// Extract every entry of a zip archive into `output_dir`
///
/// `file_path` must end in `.zip`; both paths must already exist.
pub fn unzip<P: AsRef<Path>, Q: AsRef<Path>>(output_dir: P, file_path: Q) -> AsfResult<()> {
    let output_dir = output_dir.as_ref();
    let file_path = file_path.as_ref();

    let extension = file_path.extension().and_then(|e| e.to_str());
    if extension != Some("zip") {
        return Err(AsfError::InvalidInput(format!(
            "{} is not the path of a zip",
            file_path.display()
        )));
    }
    if !path_exists(output_dir) || !path_exists(file_path) {
        return Err(AsfError::InvalidInput(format!(
            "unzip requires both {} and {} to exist",
            output_dir.display(),
            file_path.display()
        )));
    }

    log::info!("Extracting: {}", file_path.display());
    let file = File::open(file_path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| AsfError::InvalidFormat(format!("Failed to open ZIP: {}", e)))?;
    archive
        .extract(output_dir)
        .map_err(|e| AsfError::InvalidFormat(format!("Failed to extract ZIP: {}", e)))?;
    Ok(())
}
