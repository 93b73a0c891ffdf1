//! Yamelinno tool configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main yamelinno configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schema lookup
    pub schema: SchemaConfig,

    /// Extra search directories
    pub search: SearchConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .yamelinno.yml
        let local_config = PathBuf::from(".yamelinno.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/yamelinno/yamelinno.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("yamelinno").join("yamelinno.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::debug!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Schema lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// File name of the schema looked up next to the input when none is given
    #[serde(rename = "file-name")]
    pub file_name: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            file_name: "schema.yml".to_string(),
        }
    }
}

/// Directories searched after the environment's search paths
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Template directories
    pub templates: Vec<String>,

    /// Schema directories
    pub schemas: Vec<String>,
}

impl SearchConfig {
    pub fn template_paths(&self) -> Vec<PathBuf> {
        expand(&self.templates)
    }

    pub fn schema_paths(&self) -> Vec<PathBuf> {
        expand(&self.schemas)
    }
}

/// Expand `~/` to the home directory
fn expand(paths: &[String]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter_map(|p| {
            if let Some(rest) = p.strip_prefix("~/") {
                dirs::home_dir().map(|home| home.join(rest))
            } else {
                Some(PathBuf::from(p))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.schema.file_name, "schema.yml");
        assert!(config.search.templates.is_empty());
        assert!(config.search.schemas.is_empty());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
schema:
  file-name: inno-schema.yml

search:
  templates:
    - /opt/yamelinno/templates
    - shared
  schemas:
    - /opt/yamelinno/schemas
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.schema.file_name, "inno-schema.yml");
        assert_eq!(
            config.search.template_paths(),
            vec![PathBuf::from("/opt/yamelinno/templates"), PathBuf::from("shared")]
        );
        assert_eq!(config.search.schema_paths(), vec![PathBuf::from("/opt/yamelinno/schemas")]);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
search:
  templates: [shared]
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.schema.file_name, "schema.yml");
        assert_eq!(config.search.templates, vec!["shared"]);
    }

    #[test]
    fn test_home_expansion() {
        let search = SearchConfig {
            templates: vec!["~/inno/templates".to_string()],
            schemas: vec![],
        };

        if let Some(home) = dirs::home_dir() {
            assert_eq!(search.template_paths(), vec![home.join("inno/templates")]);
        }
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("yamelinno.yml");
        fs::write(&path, "schema:\n  file-name: custom.yml\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.schema.file_name, "custom.yml");
    }

    #[test]
    fn test_load_explicit_path_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yml");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
