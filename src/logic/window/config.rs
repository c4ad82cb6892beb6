//! Window Configuration
//!
//! Bounds and adaptation thresholds for the adaptive window.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_FLOW_COUNT, DEFAULT_MAX_TIME_SECONDS, DEFAULT_MIN_FLOW_COUNT,
    DEFAULT_MIN_TIME_SECONDS, DEFAULT_RECURRENCE_EXPANSION_THRESHOLD,
    DEFAULT_SIMILARITY_EXPANSION_THRESHOLD, DEFAULT_SIMILARITY_SHRINKAGE_THRESHOLD,
};
use crate::logic::config::ConfigError;

/// Window Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window duration floor (seconds)
    pub min_time_seconds: f64,

    /// Window duration ceiling (seconds)
    pub max_time_seconds: f64,

    /// Flows required before a flush is considered
    pub min_flow_count: usize,

    /// Buffer capacity (oldest evicted beyond this)
    pub max_flow_count: usize,

    /// Mean recent similarity above this grows the window
    pub similarity_expansion_threshold: f32,

    /// Mean recent similarity below this shrinks the window
    pub similarity_shrinkage_threshold: f32,

    /// Repeated-label count that forces growth
    pub recurrence_expansion_threshold: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            min_time_seconds: DEFAULT_MIN_TIME_SECONDS,
            max_time_seconds: DEFAULT_MAX_TIME_SECONDS,
            min_flow_count: DEFAULT_MIN_FLOW_COUNT,
            max_flow_count: DEFAULT_MAX_FLOW_COUNT,
            similarity_expansion_threshold: DEFAULT_SIMILARITY_EXPANSION_THRESHOLD,
            similarity_shrinkage_threshold: DEFAULT_SIMILARITY_SHRINKAGE_THRESHOLD,
            recurrence_expansion_threshold: DEFAULT_RECURRENCE_EXPANSION_THRESHOLD,
        }
    }
}

impl WindowConfig {
    /// Short horizon - faster verdicts, less evidence per batch
    pub fn short_horizon() -> Self {
        Self {
            min_time_seconds: 2.0,
            max_time_seconds: 20.0,
            min_flow_count: 10,
            ..Default::default()
        }
    }

    /// Long horizon - slower verdicts, more evidence per batch
    pub fn long_horizon() -> Self {
        Self {
            min_time_seconds: 10.0,
            max_time_seconds: 120.0,
            min_flow_count: 40,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_time_seconds.is_finite()
            || !self.max_time_seconds.is_finite()
            || self.min_time_seconds <= 0.0
            || self.min_time_seconds >= self.max_time_seconds
        {
            return Err(ConfigError::WindowBounds {
                min: self.min_time_seconds,
                max: self.max_time_seconds,
            });
        }
        if self.min_flow_count == 0 || self.min_flow_count > self.max_flow_count {
            return Err(ConfigError::FlowCounts {
                min: self.min_flow_count,
                max: self.max_flow_count,
            });
        }
        let shrink = self.similarity_shrinkage_threshold;
        let expand = self.similarity_expansion_threshold;
        if !(0.0..=1.0).contains(&shrink) || !(0.0..=1.0).contains(&expand) || shrink >= expand {
            return Err(ConfigError::SimilarityThresholds { shrink, expand });
        }
        if self.recurrence_expansion_threshold == 0 {
            return Err(ConfigError::RecurrenceThreshold {
                value: self.recurrence_expansion_threshold,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = WindowConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_flow_count, 20);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(WindowConfig::short_horizon().validate().is_ok());
        assert!(WindowConfig::long_horizon().validate().is_ok());
    }

    #[test]
    fn test_inverted_time_bounds_rejected() {
        let config = WindowConfig {
            min_time_seconds: 60.0,
            max_time_seconds: 5.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::WindowBounds { .. })));
    }

    #[test]
    fn test_inverted_flow_counts_rejected() {
        let config = WindowConfig {
            min_flow_count: 600,
            max_flow_count: 500,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::FlowCounts { .. })));
    }

    #[test]
    fn test_inverted_similarity_thresholds_rejected() {
        let config = WindowConfig {
            similarity_expansion_threshold: 0.4,
            similarity_shrinkage_threshold: 0.6,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SimilarityThresholds { .. })
        ));
    }

    #[test]
    fn test_zero_recurrence_threshold_rejected() {
        let config = WindowConfig {
            recurrence_expansion_threshold: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RecurrenceThreshold { .. })
        ));
    }
}
