use crate::io::raster::polarization_exists;
use crate::prompt::Prompt;
use crate::types::{AsfError, AsfResult, Polarization, ProcessType};
use std::path::Path;

/// Pick the polarization band to work with from what is present on disk
///
/// Probes `base_path/*/*<sep><band>.tif` for each band with the process
/// type's separator. A single match is auto-selected without prompting;
/// multiple matches are offered as an indexed choice; none is a
/// [`AsfError::NoMatch`]. Returns the wildcard path of the selected band.
pub fn select_polarization<P: Prompt>(
    process_type: ProcessType,
    base_path: &Path,
    prompt: &mut P,
) -> AsfResult<String> {
    if !base_path.exists() {
        return Err(AsfError::InvalidInput(format!(
            "select_polarization was passed an invalid base path: {}",
            base_path.display()
        )));
    }

    let separator = process_type.band_separator();
    let base = base_path.display();
    let mut bands: Vec<String> = Vec::new();
    for polarization in Polarization::ALL {
        let band = format!("{}{}", separator, polarization);
        if polarization_exists(&format!("{}/*/*{}.tif", base, band)) {
            bands.push(band);
        }
    }

    match bands.len() {
        0 => Err(AsfError::NoMatch(
            "found no available polarizations".to_string(),
        )),
        1 => {
            log::info!("Selecting the only available polarization: {}", bands[0]);
            Ok(format!("{}/*/*{}.tif", base, bands[0]))
        }
        _ => {
            println!("Select a polarization:");
            for (i, band) in bands.iter().enumerate() {
                println!("[{}]: {}", i, band);
            }
            loop {
                let answer = prompt.read_line("Enter the number of a polarization:")?;
                match answer.trim().parse::<usize>() {
                    Ok(choice) if choice < bands.len() => {
                        return Ok(format!("{}/*/*{}.tif", base, bands[choice]));
                    }
                    _ => println!("Please enter the number of an available polarization."),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;
    use tempfile::TempDir;

    fn touch(dir: &Path, product: &str, file: &str) {
        let product_dir = dir.join(product);
        std::fs::create_dir_all(&product_dir).unwrap();
        std::fs::write(product_dir.join(file), b"").unwrap();
    }

    #[test]
    fn test_single_polarization_is_auto_selected() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "S1A_20200615", "S1A_20200615_VH.tif");

        // no scripted answers: selection must not prompt
        let mut prompt = ScriptedPrompt::new(Vec::<String>::new());
        let path = select_polarization(ProcessType::Gamma, temp_dir.path(), &mut prompt).unwrap();
        assert_eq!(path, format!("{}/*/*_VH.tif", temp_dir.path().display()));
    }

    #[test]
    fn test_no_polarizations_is_no_match() {
        let temp_dir = TempDir::new().unwrap();
        let mut prompt = ScriptedPrompt::new(Vec::<String>::new());
        let result = select_polarization(ProcessType::Gamma, temp_dir.path(), &mut prompt);
        assert!(matches!(result, Err(AsfError::NoMatch(_))));
    }

    #[test]
    fn test_multiple_polarizations_prompt_for_an_index() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "S1A_20200615", "S1A_20200615-VV.tif");
        touch(temp_dir.path(), "S1A_20200615", "S1A_20200615-VH.tif");

        // out-of-range then valid; bands keep the VV, VH probe order
        let mut prompt = ScriptedPrompt::new(["5", "1"]);
        let path = select_polarization(ProcessType::S1tbx, temp_dir.path(), &mut prompt).unwrap();
        assert_eq!(path, format!("{}/*/*-VH.tif", temp_dir.path().display()));
    }

    #[test]
    fn test_missing_base_path_is_invalid_input() {
        let temp_dir = TempDir::new().unwrap();
        let mut prompt = ScriptedPrompt::new(Vec::<String>::new());
        let result = select_polarization(
            ProcessType::Gamma,
            &temp_dir.path().join("missing"),
            &mut prompt,
        );
        assert!(matches!(result, Err(AsfError::InvalidInput(_))));
    }
}
