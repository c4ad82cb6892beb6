//! Attack Labels
//!
//! Labels arrive as free text from the retrieval backend. Everything
//! downstream keys evidence and hypotheses on a validated, case-normalized
//! form so `"Botnet"` and `"botnet "` never split one signal in two.

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Labels reserved for non-attack traffic
static BENIGN_LABELS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["normal", "benign", "legitimate"].into_iter().collect());

/// Catch-all bucket for labels that fail validation
pub const UNKNOWN_LABEL: &str = "unknown";

/// Case-normalized attack-type label.
///
/// Construction goes through [`AttackLabel::parse`]; labels that are empty
/// after trimming land in the `"unknown"` bucket instead of propagating
/// free text through severity logic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttackLabel(String);

impl AttackLabel {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            Self(UNKNOWN_LABEL.to_string())
        } else {
            Self(normalized)
        }
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_LABEL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reserved labels denote non-attack traffic
    pub fn is_benign(&self) -> bool {
        BENIGN_LABELS.contains(self.0.as_str())
    }
}

impl fmt::Display for AttackLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
