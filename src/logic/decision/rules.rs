//! Decision Rules & Thresholds
//!
//! Thresholds and weights for the attack verdict. No decide logic here,
//! only constants and config.

use serde::{Deserialize, Serialize};

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Base probability bar for declaring an attack
pub const BASE_ATTACK_THRESHOLD: f32 = 0.50;

/// How much high confidence lowers the bar
pub const CONFIDENCE_DISCOUNT: f32 = 0.20;

/// Confidence floor below which no attack is declared
/// This is the CONFIDENCE GUARD - prevents false positives on thin evidence
pub const MIN_ATTACK_CONFIDENCE: f32 = 0.4;

// ============================================================================
// SEVERITY GRADING
// ============================================================================

/// Weight of probability in the severity score
pub const SEVERITY_PROBABILITY_WEIGHT: f32 = 0.4;

/// Weight of confidence in the severity score
pub const SEVERITY_CONFIDENCE_WEIGHT: f32 = 0.3;

/// Severity score above this = CRITICAL
pub const CRITICAL_SCORE: f32 = 0.8;

/// Severity score above this = HIGH
pub const HIGH_SCORE: f32 = 0.6;

// ============================================================================
// CONFIGURABLE THRESHOLDS (for runtime adjustment)
// ============================================================================

/// Thresholds for the verdict (configurable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionThresholds {
    /// Base probability bar
    pub base_attack_threshold: f32,
    /// Confidence discount applied to the bar
    pub confidence_discount: f32,
    /// Minimum confidence for an attack verdict
    pub min_attack_confidence: f32,
    /// Severity score for CRITICAL
    pub critical_score: f32,
    /// Severity score for HIGH
    pub high_score: f32,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            base_attack_threshold: BASE_ATTACK_THRESHOLD,
            confidence_discount: CONFIDENCE_DISCOUNT,
            min_attack_confidence: MIN_ATTACK_CONFIDENCE,
            critical_score: CRITICAL_SCORE,
            high_score: HIGH_SCORE,
        }
    }
}

impl DecisionThresholds {
    /// High sensitivity - lower bars, more alerts
    pub fn high_sensitivity() -> Self {
        Self {
            base_attack_threshold: 0.4,
            min_attack_confidence: 0.3,
            critical_score: 0.6,
            high_score: 0.45,
            ..Default::default()
        }
    }

    /// Low sensitivity - higher bars, fewer alerts
    pub fn low_sensitivity() -> Self {
        Self {
            base_attack_threshold: 0.6,
            min_attack_confidence: 0.5,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let thresholds = DecisionThresholds::default();
        assert_eq!(thresholds.base_attack_threshold, 0.50);
        assert_eq!(thresholds.min_attack_confidence, 0.4);
    }

    #[test]
    fn test_sensitivity_presets_ordered() {
        let high = DecisionThresholds::high_sensitivity();
        let low = DecisionThresholds::low_sensitivity();
        assert!(high.base_attack_threshold < low.base_attack_threshold);
        assert!(high.min_attack_confidence < low.min_attack_confidence);
    }
}
