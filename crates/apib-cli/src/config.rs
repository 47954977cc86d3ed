//! # Config File
//!
//! Optional YAML file with the same option names as the library API, in
//! camelCase:
//!
//! ```yaml
//! validateRequests: true
//! validateResponses: true
//! failOnWarnings: false
//! requireBlueprintName: false
//! ```
//!
//! Keys left out keep their default. Unknown keys are rejected so typos do
//! not silently fall back to defaults.

use std::path::{Path, PathBuf};

use apib_lint::LintOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Contents of a config file. `None` means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct LintConfig {
    pub validate_requests: Option<bool>,
    pub validate_responses: Option<bool>,
    pub fail_on_warnings: Option<bool>,
    pub require_blueprint_name: Option<bool>,
}

impl LintConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses config text. An empty document is an empty config.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Overlays the values that are set onto `options`.
    pub fn apply(&self, options: LintOptions) -> LintOptions {
        LintOptions {
            validate_requests: self.validate_requests.unwrap_or(options.validate_requests),
            validate_responses: self
                .validate_responses
                .unwrap_or(options.validate_responses),
            fail_on_warnings: self.fail_on_warnings.unwrap_or(options.fail_on_warnings),
            require_blueprint_name: self
                .require_blueprint_name
                .unwrap_or(options.require_blueprint_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = LintConfig::from_yaml("failOnWarnings: true\n").unwrap();
        let options = config.apply(LintOptions::default());
        assert!(options.fail_on_warnings);
        assert!(options.validate_requests);
        assert!(options.validate_responses);
        assert!(!options.require_blueprint_name);
    }

    #[test]
    fn full_config() {
        let yaml = "validateRequests: false\nvalidateResponses: false\nfailOnWarnings: true\nrequireBlueprintName: true\n";
        let options = LintConfig::from_yaml(yaml)
            .unwrap()
            .apply(LintOptions::default());
        assert_eq!(
            options,
            LintOptions {
                validate_requests: false,
                validate_responses: false,
                fail_on_warnings: true,
                require_blueprint_name: true,
            }
        );
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(LintConfig::from_yaml("").unwrap(), LintConfig::default());
        assert_eq!(LintConfig::from_yaml("{}").unwrap(), LintConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = LintConfig::from_yaml("failOnWarning: true\n").unwrap_err();
        assert!(err.to_string().contains("failOnWarning"));
    }

    #[test]
    fn load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let err = LintConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("missing.yaml"));

        let bad = dir.path().join("bad.yaml");
        std::fs::write(&bad, "validateRequests: maybe\n").unwrap();
        assert!(matches!(
            LintConfig::load(&bad).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }
}
