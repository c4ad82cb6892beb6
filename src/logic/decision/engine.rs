//! Decision Engine
//!
//! CORE STEP - converts the fused hypotheses into a graded verdict.
//! Deterministic, no state carried across calls: two terminal outcomes,
//! benign or attack.

use std::collections::BTreeMap;

use crate::logic::fusion::ThreatHypothesis;
use crate::logic::labels::AttackLabel;

use super::rules::{DecisionThresholds, SEVERITY_CONFIDENCE_WEIGHT, SEVERITY_PROBABILITY_WEIGHT};
use super::types::{Severity, ThreatDecision};

/// Decide with the default thresholds
pub fn decide(hypotheses: &BTreeMap<AttackLabel, ThreatHypothesis>) -> ThreatDecision {
    decide_with_thresholds(hypotheses, &DecisionThresholds::default())
}

/// Decide with custom thresholds
pub fn decide_with_thresholds(
    hypotheses: &BTreeMap<AttackLabel, ThreatHypothesis>,
    thresholds: &DecisionThresholds,
) -> ThreatDecision {
    let top = match select_top(hypotheses) {
        Some(top) => top,
        None => return ThreatDecision::benign("Monitor", "No patterns"),
    };

    // Reserved labels short-circuit: whitelisted traffic passes no matter
    // how much probability mass it holds
    if top.attack_type.is_benign() {
        return ThreatDecision {
            is_attack: false,
            severity: Severity::Benign,
            attack_type: Some(top.attack_type.clone()),
            probability: top.probability,
            confidence: top.confidence,
            recommendation: "PASS".to_string(),
            evidence_summary: format!("Identified as {}", top.attack_type),
        };
    }

    // Higher confidence lowers the bar for declaring an attack
    let threshold =
        thresholds.base_attack_threshold - thresholds.confidence_discount * top.confidence;
    let is_attack =
        top.probability > threshold && top.confidence > thresholds.min_attack_confidence;

    if is_attack {
        let score = SEVERITY_PROBABILITY_WEIGHT * top.probability
            + SEVERITY_CONFIDENCE_WEIGHT * top.confidence;
        let severity = if score > thresholds.critical_score {
            Severity::Critical
        } else if score > thresholds.high_score {
            Severity::High
        } else {
            Severity::Medium
        };

        ThreatDecision {
            is_attack: true,
            severity,
            attack_type: Some(top.attack_type.clone()),
            probability: top.probability,
            confidence: top.confidence,
            recommendation: format!("BLOCK {}", top.attack_type.as_str().to_uppercase()),
            evidence_summary: format!(
                "Detected {} ({:.1}% confidence)",
                top.attack_type,
                top.confidence * 100.0
            ),
        }
    } else {
        // Observed but below threshold: the label and its scores are still
        // reported for visibility
        ThreatDecision {
            is_attack: false,
            severity: Severity::Benign,
            attack_type: Some(top.attack_type.clone()),
            probability: top.probability,
            confidence: top.confidence,
            recommendation: "Monitor".to_string(),
            evidence_summary: "Below threshold".to_string(),
        }
    }
}

/// Maximum probability wins; equal probabilities resolve to the
/// lexicographically smallest label via map iteration order.
fn select_top(
    hypotheses: &BTreeMap<AttackLabel, ThreatHypothesis>,
) -> Option<&ThreatHypothesis> {
    let mut top: Option<&ThreatHypothesis> = None;
    for hypothesis in hypotheses.values() {
        if top.map_or(true, |t| hypothesis.probability > t.probability) {
            top = Some(hypothesis);
        }
    }
    top
}

// ============================================================================
// TESTS
// ============================================================================
