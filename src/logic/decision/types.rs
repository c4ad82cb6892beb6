//! Decision Types
//!
//! Data structures only, no decide logic.

use serde::{Deserialize, Serialize};

use crate::logic::labels::AttackLabel;

// ============================================================================
// SEVERITY
// ============================================================================

/// Ordinal severity grade attached to a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Benign,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
            Severity::Benign => "BENIGN",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
            Severity::Benign => 0,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// DECISION
// ============================================================================

/// Terminal output of one window flush.
///
/// A benign verdict may still carry the top label and its scores: that is
/// "observed but below threshold", reported for visibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatDecision {
    pub is_attack: bool,
    pub severity: Severity,
    pub attack_type: Option<AttackLabel>,
    pub probability: f32,
    pub confidence: f32,
    pub recommendation: String,
    pub evidence_summary: String,
}

impl ThreatDecision {
    /// Benign verdict with no leading hypothesis
    pub(crate) fn benign(recommendation: &str, evidence_summary: &str) -> Self {
        Self {
            is_attack: false,
            severity: Severity::Benign,
            attack_type: None,
            probability: 0.0,
            confidence: 0.0,
            recommendation: recommendation.to_string(),
            evidence_summary: evidence_summary.to_string(),
        }
    }
}
