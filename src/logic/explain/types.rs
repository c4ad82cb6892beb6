use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::logic::labels::AttackLabel;

/// Compact view of one retrieval match, for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub label: AttackLabel,
    pub similarity: f32,
    /// Flow the match was retrieved for
    pub flow_id: String,
}

/// Human-readable breakdown of one verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatExplanation {
    pub narrative: String,
    /// Up to three "src -> dst" descriptors from the batch
    pub top_flows: Vec<String>,
    /// Strongest matches across the batch
    pub top_matches: Vec<MatchSummary>,
    pub decision_factors: BTreeMap<String, f32>,
    pub confidence_breakdown: BTreeMap<String, f32>,
    /// Reserved for the gateway's event history
    pub timeline: Vec<String>,
}
