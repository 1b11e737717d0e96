//! Optimizer configuration.
//!
//! Every section has defaults, so an empty TOML document is a valid
//! configuration.
//!
//! # Examples
//!
//! ```
//! use u_logistics::config::{AssignmentStrategy, OptimizerConfig};
//! use u_logistics::geo::MetricKind;
//!
//! let config = OptimizerConfig::from_toml_str(r#"
//!     metric = "euclidean"
//!
//!     [sequencing]
//!     urgency_weight = 0.6
//!
//!     [assignment]
//!     strategy = "augmenting_path"
//! "#).unwrap();
//!
//! assert_eq!(config.metric, MetricKind::Euclidean);
//! assert_eq!(config.sequencing.urgency_weight, 0.6);
//! assert_eq!(config.sequencing.distance_weight, 0.5);
//! assert_eq!(config.assignment.strategy, AssignmentStrategy::AugmentingPath);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::MetricKind;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level optimizer configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct OptimizerConfig {
    /// Distance metric applied to point coordinates.
    pub metric: MetricKind,
    /// Route sequencing parameters.
    pub sequencing: SequencingConfig,
    /// Clarke-Wright parameters.
    pub vehicle_routing: VehicleRoutingConfig,
    /// Assignment parameters.
    pub assignment: AssignmentConfig,
    /// Worker pool parameters.
    pub dispatch: DispatchConfig,
}

impl OptimizerConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid TOML, or
    /// fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the distance metric.
    pub fn with_metric(mut self, metric: MetricKind) -> Self {
        self.metric = metric;
        self
    }

    /// Sets the assignment strategy.
    pub fn with_assignment_strategy(mut self, strategy: AssignmentStrategy) -> Self {
        self.assignment.strategy = strategy;
        self
    }

    /// Sets the travel speed used by both sequencing and vehicle routing.
    pub fn with_speed(mut self, speed_mps: f64) -> Self {
        self.sequencing.average_speed_mps = speed_mps;
        self.vehicle_routing.average_speed_mps = speed_mps;
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sequencing.validate()?;
        self.vehicle_routing.validate()
    }
}

/// Parameters for single-vehicle route sequencing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SequencingConfig {
    /// Weight of normalized travel distance in the time-window blend.
    pub distance_weight: f64,
    /// Weight of inverse priority in the time-window blend.
    pub priority_weight: f64,
    /// Weight of normalized window slack in the time-window blend.
    pub urgency_weight: f64,
    /// Travel speed converting meters to seconds.
    pub average_speed_mps: f64,
    /// Upper bound on full 2-opt passes.
    pub max_two_opt_passes: usize,
    /// Minimum length reduction for a 2-opt move to count as improving.
    pub improvement_epsilon: f64,
}

impl Default for SequencingConfig {
    fn default() -> Self {
        Self {
            distance_weight: 0.5,
            priority_weight: 0.2,
            urgency_weight: 0.3,
            average_speed_mps: 10.0,
            max_two_opt_passes: 1000,
            improvement_epsilon: 1e-9,
        }
    }
}

impl SequencingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("distance_weight", self.distance_weight),
            ("priority_weight", self.priority_weight),
            ("urgency_weight", self.urgency_weight),
        ];
        for (name, w) in weights {
            if !w.is_finite() || w < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "sequencing.{name} must be a finite non-negative number, got {w}"
                )));
            }
        }
        if self.distance_weight + self.priority_weight + self.urgency_weight <= 0.0 {
            return Err(ConfigError::Invalid(
                "sequencing weights must not all be zero".to_string(),
            ));
        }
        validate_speed("sequencing.average_speed_mps", self.average_speed_mps)?;
        if self.max_two_opt_passes == 0 {
            return Err(ConfigError::Invalid(
                "sequencing.max_two_opt_passes must be at least 1".to_string(),
            ));
        }
        if !self.improvement_epsilon.is_finite() || self.improvement_epsilon < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "sequencing.improvement_epsilon must be non-negative, got {}",
                self.improvement_epsilon
            )));
        }
        Ok(())
    }
}

/// Parameters for the Clarke-Wright vehicle routing solver.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct VehicleRoutingConfig {
    /// Constant travel speed for forward time propagation.
    pub average_speed_mps: f64,
    /// Optional shift length in seconds.
    pub max_route_duration: Option<f64>,
}

impl Default for VehicleRoutingConfig {
    fn default() -> Self {
        Self {
            average_speed_mps: 10.0,
            max_route_duration: None,
        }
    }
}

impl VehicleRoutingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        validate_speed(
            "vehicle_routing.average_speed_mps",
            self.average_speed_mps,
        )?;
        if let Some(max) = self.max_route_duration {
            if !max.is_finite() || max <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "vehicle_routing.max_route_duration must be positive, got {max}"
                )));
            }
        }
        Ok(())
    }
}

fn validate_speed(name: &str, speed: f64) -> Result<(), ConfigError> {
    if !speed.is_finite() || speed <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "{name} must be positive, got {speed}"
        )));
    }
    Ok(())
}

/// Algorithm used by the assignment solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStrategy {
    /// Kuhn-Munkres with potentials, O(n³), minimum total cost.
    #[default]
    Optimal,
    /// Depth-first augmenting paths, cheapest candidates first.
    AugmentingPath,
}

/// Parameters for the assignment solver.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AssignmentConfig {
    /// Matching algorithm.
    pub strategy: AssignmentStrategy,
}

/// Parameters for the background worker pool.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DispatchConfig {
    /// Worker thread count; 0 lets rayon decide.
    pub worker_threads: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = OptimizerConfig::from_toml_str("").expect("valid");
        assert_eq!(config, OptimizerConfig::default());
        assert_eq!(config.metric, MetricKind::Haversine);
        assert_eq!(config.assignment.strategy, AssignmentStrategy::Optimal);
    }

    #[test]
    fn test_sections_override() {
        let config = OptimizerConfig::from_toml_str(
            r#"
            [vehicle_routing]
            average_speed_mps = 12.5
            max_route_duration = 28800.0

            [dispatch]
            worker_threads = 4
            "#,
        )
        .expect("valid");
        assert_eq!(config.vehicle_routing.average_speed_mps, 12.5);
        assert_eq!(config.vehicle_routing.max_route_duration, Some(28800.0));
        assert_eq!(config.dispatch.worker_threads, 4);
    }

    #[test]
    fn test_rejects_negative_weight() {
        let err = OptimizerConfig::from_toml_str(
            r#"
            [sequencing]
            priority_weight = -1.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_all_zero_weights() {
        let err = OptimizerConfig::from_toml_str(
            r#"
            [sequencing]
            distance_weight = 0.0
            priority_weight = 0.0
            urgency_weight = 0.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_speed() {
        let config = OptimizerConfig::new().with_speed(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = OptimizerConfig::from_toml_str("metric = [").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = OptimizerConfig::load("/nonexistent/u-logistics.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
