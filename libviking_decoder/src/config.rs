use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::ConfigError;

/// Which transmission grammar the dat files carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TelemetryFormat {
    /// Multi-line `[NOM]`…`[FIN]` frames with compact 2-digit-year dates.
    #[default]
    Viking,
    /// Single-line `[INIT]`…`[END]` frames with full ISO dates.
    Metis,
}

/// Structure representing the application configuration. Contains pathing,
/// the telemetry format and the century hint.
/// Configs are serializable and deserializable to YAML using serde and serde_yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the raw `.dat` transmission files.
    pub dat_path: PathBuf,
    /// Directory receiving the per-buoy YAML exports.
    pub export_path: PathBuf,
    pub format: TelemetryFormat,
    /// Century hint for the Viking compact dates, e.g. 21 for 20xx.
    /// Mandatory for the Viking format; the Metis format ignores it.
    pub century: Option<i32>,
}

impl Default for Config {
    /// Generate a new Config object. All fields will be empty/invalid
    fn default() -> Self {
        Self {
            dat_path: PathBuf::from("None"),
            export_path: PathBuf::from("None"),
            format: TelemetryFormat::default(),
            century: Some(21),
        }
    }
}

impl Config {
    /// Read the configuration in a YAML file
    /// Returns a Config if successful
    pub fn read_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::BadFilePath(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;

        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    /// Check that the input directory exists
    pub fn get_dat_directory(&self) -> Result<PathBuf, ConfigError> {
        if self.dat_path.exists() {
            Ok(self.dat_path.clone())
        } else {
            Err(ConfigError::BadFilePath(self.dat_path.clone()))
        }
    }

    /// Check that the export directory exists
    pub fn get_export_directory(&self) -> Result<PathBuf, ConfigError> {
        if self.export_path.exists() {
            Ok(self.export_path.clone())
        } else {
            Err(ConfigError::BadFilePath(self.export_path.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_round_trip() {
        let config = Config::default();
        let yaml_str = serde_yaml::to_string(&config).unwrap();
        let reread: Config = serde_yaml::from_str(&yaml_str).unwrap();
        assert_eq!(reread.format, TelemetryFormat::Viking);
        assert_eq!(reread.century, Some(21));
    }

    #[test]
    fn test_format_is_lowercase_in_yaml() {
        let yaml_str = serde_yaml::to_string(&Config::default()).unwrap();
        assert!(yaml_str.contains("format: viking"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let missing = std::env::temp_dir().join("viking_decoder_no_such_config.yaml");
        match Config::read_config_file(&missing) {
            Err(ConfigError::BadFilePath(_)) => (),
            other => panic!("expected bad-file-path, got {other:?}"),
        }
    }
}
