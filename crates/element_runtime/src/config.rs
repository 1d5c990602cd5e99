//! Runtime configuration loaded from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How enum-typed property writes treat tokens outside the declared set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumPolicy {
    /// Store any text; rendering falls back to the documented default.
    #[default]
    Fallback,
    /// Reject unknown tokens at the write boundary.
    Reject,
}

/// Tunables for an [`ElementRuntime`](crate::ElementRuntime).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Virtual milliseconds between animation frames.
    pub frame_interval_ms: u64,
    /// Maximum renders processed by a single [`flush`](crate::ElementRuntime::flush).
    pub max_render_passes: usize,
    /// Enum validation at the property boundary.
    pub enum_policy: EnumPolicy,
    /// Library prefix used by the naming audit.
    pub event_prefix: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            max_render_passes: 1024,
            enum_policy: EnumPolicy::Fallback,
            event_prefix: "sh".to_string(),
        }
    }
}

/// Configuration load failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Config path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The TOML body did not deserialize.
    #[error("failed to parse runtime config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value parsed but is not usable.
    #[error("invalid runtime config: {0}")]
    Invalid(String),
}

impl RuntimeConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(body: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(body)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let body = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&body)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "frame_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.max_render_passes == 0 {
            return Err(ConfigError::Invalid(
                "max_render_passes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = RuntimeConfig::from_toml_str("").expect("parse");
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.frame_interval_ms, 16);
        assert_eq!(config.enum_policy, EnumPolicy::Fallback);
    }

    #[test]
    fn partial_document_overrides_named_keys() {
        let config = RuntimeConfig::from_toml_str(
            "enum_policy = \"reject\"\nframe_interval_ms = 10\n",
        )
        .expect("parse");
        assert_eq!(config.enum_policy, EnumPolicy::Reject);
        assert_eq!(config.frame_interval_ms, 10);
        assert_eq!(config.max_render_passes, 1024);
        assert_eq!(config.event_prefix, "sh");
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = RuntimeConfig::from_toml_str("frame_interval_ms = 0").expect_err("zero frame");
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = RuntimeConfig::from_toml_str("enum_policy = \"strict\"").expect_err("bad enum");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file_path() {
        let path = std::env::temp_dir().join("element-runtime-missing-config.toml");
        let err = RuntimeConfig::load(&path).expect_err("missing file");
        assert!(err.to_string().contains("element-runtime-missing-config.toml"));
    }
}
