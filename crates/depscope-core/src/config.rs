//! Configuration for ignore rules and report output.
//!
//! Load order: config file (`.depscope.toml`) → environment variables →
//! defaults. Defaults reproduce the classic ruleset: exact-ignore
//! `runtime/cgo`, reserved prefix `k8s.io/`, report at
//! `package-dependencies.csv`.

use crate::error::DepscopeError;
use crate::package::IgnoreRules;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = ".depscope.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DepscopeConfig {
    pub rules: RulesConfig,
    pub report: ReportConfig,
}

/// Ignore-rule configuration. These are static constants of a run, not
/// dynamic state: classification is a pure function of the record and this
/// ruleset.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Import paths ignored by exact match.
    pub ignore_exact: Vec<String>,
    /// Reserved-namespace prefix; packages under it are ignored. Empty
    /// disables the rule.
    pub ignore_prefix: String,
}

/// Report output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Path of the persisted delimited report.
    pub path: PathBuf,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            ignore_exact: vec!["runtime/cgo".to_string()],
            ignore_prefix: "k8s.io/".to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("package-dependencies.csv"),
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl DepscopeConfig {
    /// Load config from an explicit path, or from `.depscope.toml` in the
    /// working directory, with env var overrides. Falls back to defaults when
    /// no file exists; an explicitly named file must exist and parse.
    pub fn load(path: Option<&Path>) -> Result<Self, DepscopeError> {
        let mut config = match path {
            Some(explicit) => Self::parse_file(explicit)?,
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.exists() {
                    Self::parse_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        // Environment variable overrides
        env_override("DEPSCOPE_REPORT_PATH", &mut config.report.path);
        env_override("DEPSCOPE_IGNORE_PREFIX", &mut config.rules.ignore_prefix);

        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<Self, DepscopeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DepscopeError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&content).map_err(|e| {
            DepscopeError::Config(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Materialize the classification ruleset from this config.
    pub fn ignore_rules(&self) -> IgnoreRules {
        IgnoreRules {
            exact: self.rules.ignore_exact.iter().cloned().collect(),
            prefix: self.rules.ignore_prefix.clone(),
        }
    }
}
