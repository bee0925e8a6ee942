//! TOML-based application configuration.
//!
//! Stores:
//! - Scoring weights and recommendation thresholds
//! - Optional path to a custom question catalog
//! - Report presentation settings
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::catalog::Catalog;
use crate::error::{CatalogError, ConfigError, CoreError};
use crate::scoring::ScoringPolicy;

/// Where the question catalog comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// TOML catalog file; the built-in ESG catalog when unset.
    #[serde(default)]
    pub path: Option<String>,
}

/// Results view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_career_paths_shown")]
    pub career_paths_shown: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringPolicy,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

fn default_career_paths_shown() -> usize {
    3
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            career_paths_shown: default_career_paths_shown(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(unknown());
                    }
                    // Optional strings: an empty value clears them.
                    serde_json::Value::Null | serde_json::Value::String(_) if value.is_empty() => {
                        serde_json::Value::Null
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory or return (and write) the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation, or if the default config cannot be written.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit file, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit file.
    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            // unset optional value
            serde_json::Value::Null => Some(String::new()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without persisting.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting config fails validation. On error `self` is unchanged.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save to the data directory.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.apply(key, value)?;
        self.save()?;
        Ok(())
    }

    /// Check weights and thresholds are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.scoring.weights;
        for (key, weight) in [
            ("scoring.weights.psychometric", w.psychometric),
            ("scoring.weights.technical", w.technical),
            ("scoring.weights.wiscar", w.wiscar),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: format!("{weight} is outside 0.0..=1.0"),
                });
            }
        }
        if (w.sum() - 1.0).abs() > 1e-6 {
            return Err(ConfigError::InvalidValue {
                key: "scoring.weights".into(),
                message: format!("weights sum to {}, expected 1.0", w.sum()),
            });
        }

        let t = &self.scoring.thresholds;
        if t.yes > 100 {
            return Err(ConfigError::InvalidValue {
                key: "scoring.thresholds.yes".into(),
                message: format!("{} is above 100", t.yes),
            });
        }
        if t.maybe > t.yes {
            return Err(ConfigError::InvalidValue {
                key: "scoring.thresholds.maybe".into(),
                message: format!("{} is above the yes threshold {}", t.maybe, t.yes),
            });
        }
        Ok(())
    }

    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog.path {
            Some(path) => Catalog::load(Path::new(path)),
            None => Ok(Catalog::esg_governance()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Thresholds, Weights};

    #[test]
    fn defaults_match_standard_policy() {
        let cfg = Config::default();
        assert_eq!(cfg.scoring.weights, Weights::default());
        assert_eq!(cfg.scoring.thresholds, Thresholds { yes: 70, maybe: 50 });
        assert_eq!(cfg.report.career_paths_shown, 3);
        assert!(cfg.catalog.path.is_none());
        cfg.validate().unwrap();
    }

    #[test]
    fn get_by_dotted_key() {
        let cfg = Config::default();
        assert_eq!(cfg.get("scoring.thresholds.yes").as_deref(), Some("70"));
        assert_eq!(cfg.get("scoring.weights.technical").as_deref(), Some("0.4"));
        assert_eq!(cfg.get("report.career_paths_shown").as_deref(), Some("3"));
        assert!(cfg.get("scoring.nope").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_and_validates() {
        let mut cfg = Config::default();
        cfg.apply("scoring.thresholds.yes", "80").unwrap();
        assert_eq!(cfg.scoring.thresholds.yes, 80);

        let err = cfg.apply("scoring.thresholds.maybe", "90").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(cfg.scoring.thresholds.maybe, 50);

        let err = cfg.apply("scoring.weights.technical", "0.5").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        assert!(matches!(
            cfg.apply("scoring.unknown", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.apply("scoring", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn apply_sets_and_clears_catalog_path() {
        let mut cfg = Config::default();
        assert_eq!(cfg.get("catalog.path").as_deref(), Some(""));
        cfg.apply("catalog.path", "/tmp/catalog.toml").unwrap();
        assert_eq!(cfg.catalog.path.as_deref(), Some("/tmp/catalog.toml"));
        assert_eq!(cfg.get("catalog.path").as_deref(), Some("/tmp/catalog.toml"));
        cfg.apply("catalog.path", "").unwrap();
        assert!(cfg.catalog.path.is_none());
        assert_eq!(cfg.get("catalog.path").as_deref(), Some(""));
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.apply("report.career_paths_shown", "5").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), changed);
    }

    #[test]
    fn load_from_rejects_invalid_weights() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scoring.weights]\ntechnical = 0.9\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
    }
}
