//! Evidence Accumulator
//!
//! Reduces one flushed batch into per-label aggregate evidence. Recomputed
//! per batch, never mutated after creation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::logic::flow::FlowRecord;
use crate::logic::labels::AttackLabel;

/// Weight of label recurrence in the threat score (60%)
pub const RECURRENCE_WEIGHT: f32 = 0.6;

/// Weight of mean similarity in the threat score (40%)
pub const SIMILARITY_WEIGHT: f32 = 0.4;

/// Aggregate statistics for one attack-type label within a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackEvidence {
    pub attack_type: AttackLabel,
    pub count: u32,
    pub avg_similarity: f32,
    /// Matches per flow in the batch, capped at 1.0
    pub recurrence_score: f32,
    pub threat_score: f32,
}

/// Group all matches in a batch by label.
///
/// Flows without matches contribute nothing; a batch with zero matches
/// yields an empty map.
pub fn accumulate(batch: &[FlowRecord]) -> BTreeMap<AttackLabel, AttackEvidence> {
    if batch.is_empty() {
        return BTreeMap::new();
    }

    let mut grouped: BTreeMap<AttackLabel, (f32, u32)> = BTreeMap::new();
    for flow in batch {
        for m in &flow.matches {
            let entry = grouped.entry(m.label.clone()).or_insert((0.0, 0));
            entry.0 += m.similarity;
            entry.1 += 1;
        }
    }

    let batch_len = batch.len() as f32;
    grouped
        .into_iter()
        .map(|(label, (similarity_sum, count))| {
            let avg_similarity = similarity_sum / count as f32;
            let recurrence_score = (count as f32 / batch_len).min(1.0);
            let threat_score =
                RECURRENCE_WEIGHT * recurrence_score + SIMILARITY_WEIGHT * avg_similarity;
            let evidence = AttackEvidence {
                attack_type: label.clone(),
                count,
                avg_similarity,
                recurrence_score,
                threat_score,
            };
            (label, evidence)
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
