use crate::error::{HallTabError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OUTPUT_NAME: &str = "output.csv";
pub const DEFAULT_INPUT_SUFFIX: &str = ".txt";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub suffix: String,
    pub on_malformed: MalformedPolicy,
}

/// What to do when a report has a marker but not the data that should follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Leave the file out of the table and keep going
    #[default]
    Skip,
    /// Stop the whole run at the first malformed file
    Abort,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_INPUT_SUFFIX.to_string(),
            on_malformed: MalformedPolicy::Skip,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(HallTabError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| HallTabError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| HallTabError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["halltab.toml", ".halltab.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref name) = cli_args.output_name {
            self.output.file_name = name.clone();
        }

        if let Some(policy) = cli_args.on_malformed {
            self.extraction.on_malformed = policy;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| HallTabError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| HallTabError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate_output_name(&self.output.file_name)?;

        let suffix = &self.extraction.suffix;
        if suffix.len() < 2 || !suffix.starts_with('.') {
            return Err(HallTabError::Config {
                message: format!(
                    "Input suffix must start with '.' and name an extension, got '{}'",
                    suffix
                ),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

/// The output table always lives inside the scanned directory, so its name
/// cannot carry any path components.
pub fn validate_output_name(name: &str) -> Result<()> {
    let bare = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0');

    if bare {
        Ok(())
    } else {
        Err(HallTabError::InvalidOutputName {
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub output_name: Option<String>,
    pub on_malformed: Option<MalformedPolicy>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_name(mut self, name: Option<String>) -> Self {
        self.output_name = name;
        self
    }

    pub fn with_on_malformed(mut self, policy: Option<MalformedPolicy>) -> Self {
        self.on_malformed = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.file_name, "output.csv");
        assert_eq!(config.extraction.suffix, ".txt");
        assert_eq!(config.extraction.on_malformed, MalformedPolicy::Skip);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.output.file_name = "../escape.csv".to_string();
        assert!(matches!(
            config.validate(),
            Err(HallTabError::InvalidOutputName { .. })
        ));

        config.output.file_name = "ok.csv".to_string();
        config.extraction.suffix = "txt".to_string();
        assert!(matches!(config.validate(), Err(HallTabError::Config { .. })));
    }

    #[test]
    fn test_output_name_validation() {
        assert!(validate_output_name("output.csv").is_ok());
        assert!(validate_output_name("results.txt").is_ok());
        assert!(validate_output_name("").is_err());
        assert!(validate_output_name("..").is_err());
        assert!(validate_output_name("sub/output.csv").is_err());
        assert!(validate_output_name("sub\\output.csv").is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.extraction.on_malformed = MalformedPolicy::Abort;
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.extraction.on_malformed, MalformedPolicy::Abort);
        assert_eq!(loaded_config.output.file_name, config.output.file_name);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let config: Config = toml::from_str("[output]\nfile_name = \"hall.csv\"\n").unwrap();
        assert_eq!(config.output.file_name, "hall.csv");
        assert_eq!(config.extraction.suffix, ".txt");
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/definitely/not/here/halltab.toml");
        assert!(matches!(result, Err(HallTabError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_output_name(Some("hall.csv".to_string()))
            .with_on_malformed(Some(MalformedPolicy::Abort));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.output.file_name, "hall.csv");
        assert_eq!(config.extraction.on_malformed, MalformedPolicy::Abort);
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("[output]"));
        assert!(sample.contains("[extraction]"));
        assert!(sample.contains("on_malformed = \"skip\""));
    }
}
