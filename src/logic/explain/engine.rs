use std::collections::BTreeMap;

use crate::logic::decision::ThreatDecision;
use crate::logic::evidence::AttackEvidence;
use crate::logic::flow::FlowRecord;
use crate::logic::fusion::ThreatHypothesis;
use crate::logic::labels::AttackLabel;

use super::types::{MatchSummary, ThreatExplanation};

/// Flows quoted in an explanation
const TOP_FLOW_LIMIT: usize = 3;

/// Matches quoted in an explanation
const TOP_MATCH_LIMIT: usize = 3;

/// Render the decision, evidence, and hypotheses into a narrative plus
/// factor breakdowns.
pub fn explain(
    decision: &ThreatDecision,
    evidence: &BTreeMap<AttackLabel, AttackEvidence>,
    hypotheses: &BTreeMap<AttackLabel, ThreatHypothesis>,
    batch: &[FlowRecord],
) -> ThreatExplanation {
    let narrative = match &decision.attack_type {
        Some(label) if decision.is_attack => {
            format!("Detected {} pattern across {} flows.", label, batch.len())
        }
        Some(label) => format!("Observed {} activity below the attack threshold.", label),
        None => "No threat patterns in current window.".to_string(),
    };

    let mut decision_factors = BTreeMap::new();
    decision_factors.insert("probability".to_string(), decision.probability);
    decision_factors.insert("confidence".to_string(), decision.confidence);
    if let Some(hypothesis) = decision
        .attack_type
        .as_ref()
        .and_then(|label| hypotheses.get(label))
    {
        decision_factors.insert("evidence_count".to_string(), hypothesis.evidence_count as f32);
    }

    let mut confidence_breakdown = BTreeMap::new();
    if let Some(ev) = decision
        .attack_type
        .as_ref()
        .and_then(|label| evidence.get(label))
    {
        confidence_breakdown.insert("recurrence".to_string(), ev.recurrence_score);
        confidence_breakdown.insert("similarity".to_string(), ev.avg_similarity);
    }

    ThreatExplanation {
        narrative,
        top_flows: batch
            .iter()
            .take(TOP_FLOW_LIMIT)
            .map(|flow| flow.endpoint_pair())
            .collect(),
        top_matches: top_matches(batch),
        decision_factors,
        confidence_breakdown,
        timeline: Vec::new(),
    }
}

/// Strongest matches across the whole batch, by similarity
fn top_matches(batch: &[FlowRecord]) -> Vec<MatchSummary> {
    let mut all: Vec<MatchSummary> = batch
        .iter()
        .flat_map(|flow| {
            flow.matches.iter().map(|m| MatchSummary {
                label: m.label.clone(),
                similarity: m.similarity,
                flow_id: flow.flow_id.clone(),
            })
        })
        .collect();

    all.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    all.truncate(TOP_MATCH_LIMIT);
    all
}

// ============================================================================
// TESTS
// ============================================================================
