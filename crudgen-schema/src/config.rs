//! `crudgen.toml` configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result, SourceContext};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "crudgen.toml";

/// Content written by `crudgen init`.
pub const DEFAULT_CONFIG: &str = r#"[schema]
# Schema dump (TOML or JSON) describing tables and columns
source = "schema.toml"

[output]
dir = "generated"

[generate]
# Emit utility/response.js and utility/prepare.js
middleware = true
continue_on_error = false
# HTTP status for request validation failures
validation_status = 400
"#;

/// Root schema for crudgen.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub schema: SchemaConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub generate: GenerateConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    #[serde(default = "default_source")]
    pub source: PathBuf,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    #[serde(default = "default_true")]
    pub middleware: bool,

    #[serde(default)]
    pub continue_on_error: bool,

    #[serde(default = "default_validation_status")]
    pub validation_status: u16,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            middleware: true,
            continue_on_error: false,
            validation_status: default_validation_status(),
        }
    }
}

fn default_source() -> PathBuf {
    PathBuf::from("schema.toml")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_true() -> bool {
    true
}

fn default_validation_status() -> u16 {
    400
}

impl Config {
    /// Open and parse a config file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let filename = path.display().to_string();
        Self::from_str_with_filename(&content, &filename)
    }

    /// Open `path` if it exists, otherwise use defaults.
    pub fn open_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::open(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let config: Config = toml::from_str(content).map_err(|e| ctx.toml_error(e))?;
        config.validate(&ctx)?;
        Ok(config)
    }

    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        let status = self.generate.validation_status;
        if !(400..=599).contains(&status) {
            return Err(ctx.validation_error(
                format!("validation_status must be an HTTP error status (400-599), got {status}"),
                "validation_status",
            ));
        }
        if self.output.dir.as_os_str().is_empty() {
            return Err(ctx.validation_error("output directory must not be empty", "dir"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_config_text_matches_defaults() {
        let config = Config::from_str_with_filename(DEFAULT_CONFIG, CONFIG_FILE_NAME).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str_with_filename("", CONFIG_FILE_NAME).unwrap();
        assert_eq!(config.schema.source, PathBuf::from("schema.toml"));
        assert_eq!(config.output.dir, PathBuf::from("generated"));
        assert!(config.generate.middleware);
        assert!(!config.generate.continue_on_error);
        assert_eq!(config.generate.validation_status, 400);
    }

    #[test]
    fn test_partial_section() {
        let src = "[generate]\nvalidation_status = 500\n";
        let config = Config::from_str_with_filename(src, CONFIG_FILE_NAME).unwrap();
        assert_eq!(config.generate.validation_status, 500);
        assert!(config.generate.middleware);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let src = "[generate]\nmiddelware = false\n";
        let err = Config::from_str_with_filename(src, CONFIG_FILE_NAME).unwrap_err();
        match *err {
            Error::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_validation_status() {
        let src = "[generate]\nvalidation_status = 200\n";
        let err = Config::from_str_with_filename(src, CONFIG_FILE_NAME).unwrap_err();
        match *err {
            Error::Validation { span, ref message, .. } => {
                assert!(message.contains("got 200"));
                assert_eq!(span.map(|s| s.offset()), Some(11));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_open_or_default_without_file() {
        let temp = TempDir::new().unwrap();
        let config = Config::open_or_default(temp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_open_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[output]\ndir = \"out\"\n").unwrap();

        let config = Config::open(&path).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("out"));
    }
}
