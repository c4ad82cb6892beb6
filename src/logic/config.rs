//! Detector Configuration
//!
//! Full configuration for one detector instance. Bad parameters are
//! rejected here, at construction time, so they never reach the stream.

use serde::{Deserialize, Serialize};

use crate::constants::{get_embedding_dim, get_retrieval_k};
use crate::logic::decision::DecisionThresholds;
use crate::logic::window::WindowConfig;

/// Configuration rejected at construction
#[derive(Debug)]
pub enum ConfigError {
    WindowBounds { min: f64, max: f64 },
    FlowCounts { min: usize, max: usize },
    SimilarityThresholds { shrink: f32, expand: f32 },
    RecurrenceThreshold { value: u32 },
    RetrievalDepth { value: usize },
    EmbeddingDim { value: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::WindowBounds { min, max } => {
                write!(f, "Config Error: window bounds [{}, {}] are not a valid range", min, max)
            }
            ConfigError::FlowCounts { min, max } => {
                write!(f, "Config Error: flow counts min={} max={} are not a valid range", min, max)
            }
            ConfigError::SimilarityThresholds { shrink, expand } => {
                write!(
                    f,
                    "Config Error: similarity thresholds shrink={} expand={} must satisfy 0 <= shrink < expand <= 1",
                    shrink, expand
                )
            }
            ConfigError::RecurrenceThreshold { value } => {
                write!(f, "Config Error: recurrence threshold {} must be >= 1", value)
            }
            ConfigError::RetrievalDepth { value } => {
                write!(f, "Config Error: retrieval depth {} must be >= 1", value)
            }
            ConfigError::EmbeddingDim { value } => {
                write!(f, "Config Error: embedding dimension {} must be >= 1", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Everything one detector needs; `Default` reads env overrides for the
/// retrieval depth and embedding dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    pub window: WindowConfig,
    pub thresholds: DecisionThresholds,
    /// Nearest neighbors requested per flow
    pub retrieval_k: usize,
    /// Expected embedding dimension for ingested flows
    pub embedding_dim: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            thresholds: DecisionThresholds::default(),
            retrieval_k: get_retrieval_k(),
            embedding_dim: get_embedding_dim(),
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        if self.retrieval_k == 0 {
            return Err(ConfigError::RetrievalDepth { value: self.retrieval_k });
        }
        if self.embedding_dim == 0 {
            return Err(ConfigError::EmbeddingDim { value: self.embedding_dim });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(DetectorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_retrieval_depth_rejected() {
        let config = DetectorConfig { retrieval_k: 0, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RetrievalDepth { value: 0 })
        ));
    }

    #[test]
    fn test_zero_embedding_dim_rejected() {
        let config = DetectorConfig { embedding_dim: 0, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmbeddingDim { value: 0 })
        ));
    }

    #[test]
    fn test_window_errors_propagate() {
        let mut config = DetectorConfig::default();
        config.window.min_time_seconds = 90.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WindowBounds { .. })
        ));
    }
}
