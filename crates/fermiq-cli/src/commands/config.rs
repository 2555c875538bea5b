//! YAML run configuration.
//!
//! Precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Configuration file
//! 3. Default values

use std::path::Path;

use fermiq_rbm::SrConfig;
use serde::{Deserialize, Serialize};

/// Complete run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// RBM training settings
    #[serde(default)]
    pub rbm: RbmSection,

    /// Circuit regression settings
    #[serde(default)]
    pub regression: RegressionSection,
}

/// RBM training settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RbmSection {
    /// Number of SR epochs
    #[serde(default = "default_epochs")]
    pub epochs: usize,

    /// SR step size
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    /// Diagonal shift added to the metric
    #[serde(default = "default_diag_shift")]
    pub diag_shift: f64,

    /// Initialization seed
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Standard deviation of the initial parameters
    #[serde(default = "default_init_std")]
    pub init_std: f64,

    /// Hidden units (defaults to the number of visible units)
    #[serde(default)]
    pub hidden: Option<usize>,
}

/// Circuit regression settings; unset fields keep the preset's values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegressionSection {
    /// Number of optimizer steps
    #[serde(default)]
    pub iterations: Option<usize>,

    /// Optimizer step size
    #[serde(default)]
    pub stepsize: Option<f64>,
}

fn default_epochs() -> usize {
    SrConfig::default().epochs
}

fn default_learning_rate() -> f64 {
    SrConfig::default().learning_rate
}

fn default_diag_shift() -> f64 {
    SrConfig::default().diag_shift
}

fn default_seed() -> u64 {
    fermiq_rbm::machine::DEFAULT_SEED
}

fn default_init_std() -> f64 {
    fermiq_rbm::machine::DEFAULT_INIT_STD
}

impl Default for RbmSection {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            learning_rate: default_learning_rate(),
            diag_shift: default_diag_shift(),
            seed: default_seed(),
            init_std: default_init_std(),
            hidden: None,
        }
    }
}

impl RbmSection {
    /// SR hyper-parameters.
    pub fn sr_config(&self) -> SrConfig {
        SrConfig {
            epochs: self.epochs,
            learning_rate: self.learning_rate,
            diag_shift: self.diag_shift,
        }
    }
}

impl RunConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = serde_yaml_ng::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Reject values no run can use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rbm.learning_rate.is_finite() && self.rbm.learning_rate > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "rbm.learning_rate must be positive, got {}",
                self.rbm.learning_rate
            )));
        }
        if !(self.rbm.diag_shift.is_finite() && self.rbm.diag_shift >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "rbm.diag_shift must be non-negative, got {}",
                self.rbm.diag_shift
            )));
        }
        if self.rbm.hidden == Some(0) {
            return Err(ConfigError::ValidationError(
                "rbm.hidden must be at least 1".to_string(),
            ));
        }
        if let Some(s) = self.regression.stepsize {
            if !(s.is_finite() && s > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "regression.stepsize must be positive, got {s}"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.rbm.epochs, 50);
        assert_eq!(config.rbm.learning_rate, 0.001);
        assert_eq!(config.rbm.seed, 42);
        assert!(config.rbm.hidden.is_none());
        assert!(config.regression.iterations.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = RunConfig::from_yaml("rbm:\n  epochs: 7\n  hidden: 3\n").unwrap();
        assert_eq!(config.rbm.epochs, 7);
        assert_eq!(config.rbm.hidden, Some(3));
        assert_eq!(config.rbm.diag_shift, 1e-3);
        assert_eq!(config.regression, RegressionSection::default());
    }

    #[test]
    fn test_regression_section() {
        let config =
            RunConfig::from_yaml("regression:\n  iterations: 12\n  stepsize: 0.02\n").unwrap();
        assert_eq!(config.regression.iterations, Some(12));
        assert_eq!(config.regression.stepsize, Some(0.02));
        assert_eq!(config.rbm, RbmSection::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            RunConfig::from_yaml("rbm:\n  learning_rate: -1.0\n"),
            Err(ConfigError::ValidationError(_))
        ));
        assert!(matches!(
            RunConfig::from_yaml("rbm:\n  hidden: 0\n"),
            Err(ConfigError::ValidationError(_))
        ));
        assert!(matches!(
            RunConfig::from_yaml("rbm: [1, 2"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            RunConfig::from_file("/nonexistent/fermiq.yaml"),
            Err(ConfigError::IoError(_))
        ));
    }
}
