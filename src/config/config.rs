use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;

/// The default configuration YAML content, embedded from `default_config.yml`
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../default_config.yml");

fn default_emission_factors() -> HashMap<String, f64> {
    let mut map = HashMap::new();
    let _ = map.insert("HFO".to_owned(), 3.114);
    let _ = map.insert("MGO".to_owned(), 3.206);
    let _ = map.insert("VLSFO".to_owned(), 3.151);
    map
}

const fn default_emission_factor() -> f64 {
    3.1
}

const fn default_base_intensity() -> f64 {
    90.0
}

fn default_intensity_surcharges() -> HashMap<String, f64> {
    let mut map = HashMap::new();
    let _ = map.insert("HFO".to_owned(), 10.0);
    map
}

const fn default_target_intensity() -> f64 {
    89.3
}

const fn default_penalty_rate() -> f64 {
    2400.0
}

/// Assessment constants. All values are placeholders preserving the shape of
/// the computation, not regulatory figures.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Emission factor (cf) per fuel type, in t CO2 per t fuel.
    #[serde(default = "default_emission_factors")]
    pub emission_factors: HashMap<String, f64>,

    /// Factor used when a fuel type is absent or not in the table.
    #[serde(default = "default_emission_factor")]
    pub default_emission_factor: f64,

    /// Baseline GHG intensity assigned to every ship (gCO2eq/MJ).
    #[serde(default = "default_base_intensity")]
    pub base_intensity: f64,

    /// Per-fuel additions to the baseline intensity.
    #[serde(default = "default_intensity_surcharges")]
    pub intensity_surcharges: HashMap<String, f64>,

    /// Intensity at or below which a ship is compliant (gCO2eq/MJ).
    #[serde(default = "default_target_intensity")]
    pub target_intensity: f64,

    /// Penalty in EUR per unit of intensity above the target.
    #[serde(default = "default_penalty_rate")]
    pub penalty_rate: f64,
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_path: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading fueleu-audit configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let candidates = [
                base_path.join("audit.toml"),
                base_path.join("audit.yml"),
                base_path.join("audit.yaml"),
                base_path.join("audit.json"),
            ];

            let mut found = None;
            for path in &candidates {
                match fs::read_to_string(path) {
                    Ok(text) => {
                        found = Some((path.clone(), text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading fueleu-audit configuration from {path}")),
                }
            }

            let Some(result) = found else {
                return Ok((Self::default(), Vec::new()));
            };
            result
        };

        let extension = final_path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML configuration from {final_path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML configuration from {final_path}"))?,
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON configuration from {final_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        Ok((config, warnings))
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => {
                toml::to_string_pretty(self).into_app_err_with(|| format!("serializing configuration to TOML for saving to {output_path}"))?
            }
            "yml" | "yaml" => serde_yaml::to_string(self)
                .into_app_err_with(|| format!("serializing configuration to YAML for saving to {output_path}"))?,
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))?;
        Ok(())
    }

    /// Save the default configuration to a file, preserving comments for YAML format
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default_with_comments(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();

        if matches!(extension, "yml" | "yaml") {
            // For YAML, write the raw default content with comments preserved
            fs::write(output_path, DEFAULT_CONFIG_YAML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        } else {
            self.save(output_path)?;
        }

        Ok(())
    }

    /// Validate the configuration to detect non-sensical values
    fn validate(&self, warnings: &mut Vec<String>) {
        if self.emission_factors.is_empty() {
            warnings.push("emission_factors is empty; every fuel type will use the default factor".to_owned());
        }

        for (fuel, factor) in &self.emission_factors {
            if *factor <= 0.0 {
                warnings.push(format!("emission factor for {fuel} is not positive: {factor}"));
            }
        }

        if self.default_emission_factor <= 0.0 {
            warnings.push(format!("default_emission_factor is not positive: {}", self.default_emission_factor));
        }

        for (fuel, surcharge) in &self.intensity_surcharges {
            if *surcharge < 0.0 {
                warnings.push(format!("intensity surcharge for {fuel} is negative: {surcharge}"));
            }
        }

        if self.target_intensity <= 0.0 {
            warnings.push(format!("target_intensity is not positive: {}", self.target_intensity));
        }

        if self.penalty_rate < 0.0 {
            warnings.push(format!("penalty_rate is negative: {}", self.penalty_rate));
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        serde_yaml::from_str(DEFAULT_CONFIG_YAML).expect("default_config.yml should be valid YAML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_defaults_match_documented_constants() {
        let config = Config::default();

        assert_eq!(config.emission_factors.get("HFO"), Some(&3.114));
        assert_eq!(config.emission_factors.get("MGO"), Some(&3.206));
        assert_eq!(config.emission_factors.get("VLSFO"), Some(&3.151));
        assert_eq!(config.default_emission_factor, 3.1);
        assert_eq!(config.base_intensity, 90.0);
        assert_eq!(config.intensity_surcharges.get("HFO"), Some(&10.0));
        assert_eq!(config.target_intensity, 89.3);
        assert_eq!(config.penalty_rate, 2400.0);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let base = Utf8PathBuf::from("/definitely/not/a/real/path");
        let (config, warnings) = Config::load(&base, None).unwrap();

        assert_eq!(config.target_intensity, Config::default().target_intensity);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_toml_with_partial_overrides() {
        let path = Utf8PathBuf::from_path_buf(env::temp_dir().join("fueleu_audit_test_config.toml")).unwrap();
        fs::write(&path, "target_intensity = 95.0\npenalty_rate = 1000.0\n").unwrap();

        let (config, warnings) = Config::load(Utf8Path::new("."), Some(&path)).unwrap();
        assert_eq!(config.target_intensity, 95.0);
        assert_eq!(config.penalty_rate, 1000.0);
        // unspecified fields keep their defaults
        assert_eq!(config.base_intensity, 90.0);
        assert!(warnings.is_empty());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let path = Utf8PathBuf::from_path_buf(env::temp_dir().join("fueleu_audit_test_unknown.toml")).unwrap();
        fs::write(&path, "not_a_real_field = 1\n").unwrap();

        assert!(Config::load(Utf8Path::new("."), Some(&path)).is_err());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_validation_warnings() {
        let path = Utf8PathBuf::from_path_buf(env::temp_dir().join("fueleu_audit_test_warnings.toml")).unwrap();
        fs::write(&path, "penalty_rate = -5.0\ndefault_emission_factor = 0.0\n").unwrap();

        let (_, warnings) = Config::load(Utf8Path::new("."), Some(&path)).unwrap();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.contains("penalty_rate")));
        assert!(warnings.iter().any(|w| w.contains("default_emission_factor")));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let path = Utf8PathBuf::from_path_buf(env::temp_dir().join("fueleu_audit_test_roundtrip.json")).unwrap();

        let config = Config::default();
        config.save(&path).unwrap();

        let (reloaded, _) = Config::load(Utf8Path::new("."), Some(&path)).unwrap();
        assert_eq!(reloaded.emission_factors, config.emission_factors);
        assert_eq!(reloaded.target_intensity, config.target_intensity);

        let _ = fs::remove_file(&path);
    }
}
