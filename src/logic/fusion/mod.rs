//! Hypothesis Fusion
//!
//! Converts per-label evidence into a normalized probability distribution
//! over attack hypotheses using squared-amplitude weighting, plus an
//! independent per-label confidence score.
//!
//! The two tracks are deliberately decoupled: probability says how much of
//! the mass a label holds relative to its competitors, confidence says how
//! much standalone evidence exists for it. A label can dominate probability
//! while still carrying low confidence when overall evidence is sparse.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::logic::evidence::AttackEvidence;
use crate::logic::labels::AttackLabel;

/// Confidence weight of label recurrence (40%)
const CONFIDENCE_RECURRENCE_WEIGHT: f32 = 0.4;

/// Confidence weight of mean similarity (30%)
const CONFIDENCE_SIMILARITY_WEIGHT: f32 = 0.3;

/// Confidence weight of count saturation (30%)
const CONFIDENCE_COUNT_WEIGHT: f32 = 0.3;

/// Match count at which the count term saturates
const COUNT_SATURATION: f32 = 10.0;

/// A candidate attack-type explanation for one batch.
///
/// Exists only within one fusion pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatHypothesis {
    pub attack_type: AttackLabel,
    /// Share of probability mass relative to competing labels
    pub probability: f32,
    /// Standalone evidence strength, independent of probability
    pub confidence: f32,
    pub evidence_count: u32,
}

/// Fuse evidence into hypotheses. Empty input, or evidence whose
/// amplitudes are all zero, yields an empty map.
pub fn fuse(
    evidence: &BTreeMap<AttackLabel, AttackEvidence>,
) -> BTreeMap<AttackLabel, ThreatHypothesis> {
    if evidence.is_empty() {
        return BTreeMap::new();
    }

    // Amplitude is 0 whenever any factor is 0; all inputs are
    // non-negative so the sqrt argument never goes negative
    let amplitudes: Vec<(&AttackLabel, &AttackEvidence, f32)> = evidence
        .iter()
        .map(|(label, ev)| {
            let amp = (ev.count as f32 * ev.recurrence_score * ev.avg_similarity).sqrt();
            (label, ev, amp)
        })
        .collect();

    let total: f32 = amplitudes.iter().map(|(_, _, amp)| amp * amp).sum();
    if total == 0.0 {
        return BTreeMap::new();
    }

    amplitudes
        .into_iter()
        .map(|(label, ev, amp)| {
            let probability = (amp * amp) / total;
            let confidence = CONFIDENCE_RECURRENCE_WEIGHT * ev.recurrence_score
                + CONFIDENCE_SIMILARITY_WEIGHT * ev.avg_similarity
                + CONFIDENCE_COUNT_WEIGHT * (ev.count as f32 / COUNT_SATURATION).min(1.0);
            let hypothesis = ThreatHypothesis {
                attack_type: label.clone(),
                probability,
                confidence,
                evidence_count: ev.count,
            };
            (label.clone(), hypothesis)
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn evidence(label: &str, count: u32, avg_similarity: f32, recurrence: f32) -> AttackEvidence {
        AttackEvidence {
            attack_type: AttackLabel::parse(label),
            count,
            avg_similarity,
            recurrence_score: recurrence,
            threat_score: 0.6 * recurrence + 0.4 * avg_similarity,
        }
    }

    fn evidence_map(entries: Vec<AttackEvidence>) -> BTreeMap<AttackLabel, AttackEvidence> {
        entries
            .into_iter()
            .map(|ev| (ev.attack_type.clone(), ev))
            .collect()
    }

    #[test]
    fn test_empty_evidence_yields_empty_hypotheses() {
        assert!(fuse(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_zero_amplitude_yields_empty_hypotheses() {
        // Zero similarity kills the amplitude even with a high count
        let map = evidence_map(vec![evidence("scan", 50, 0.0, 1.0)]);
        assert!(fuse(&map).is_empty());
    }

    #[test]
    fn test_single_label_takes_all_probability() {
        let map = evidence_map(vec![evidence("botnet", 15, 0.9, 0.75)]);
        let hypotheses = fuse(&map);
        assert_eq!(hypotheses.len(), 1);

        let botnet = &hypotheses[&AttackLabel::parse("botnet")];
        assert!((botnet.probability - 1.0).abs() < 1e-6);
        // 0.4*0.75 + 0.3*0.9 + 0.3*min(1, 15/10)
        assert!((botnet.confidence - 0.87).abs() < 1e-6);
        assert_eq!(botnet.evidence_count, 15);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let map = evidence_map(vec![
            evidence("botnet", 15, 0.9, 0.75),
            evidence("ddos", 4, 0.6, 0.2),
            evidence("scan", 1, 0.3, 0.05),
        ]);
        let hypotheses = fuse(&map);
        assert_eq!(hypotheses.len(), 3);

        let sum: f32 = hypotheses.values().map(|h| h.probability).sum();
        assert!((sum - 1.0).abs() < 1e-4);
        for h in hypotheses.values() {
            assert!(h.probability >= 0.0 && h.probability <= 1.0);
        }
    }

    #[test]
    fn test_stronger_evidence_dominates() {
        let map = evidence_map(vec![
            evidence("botnet", 15, 0.9, 0.75),
            evidence("scan", 1, 0.3, 0.05),
        ]);
        let hypotheses = fuse(&map);

        let botnet = &hypotheses[&AttackLabel::parse("botnet")];
        let scan = &hypotheses[&AttackLabel::parse("scan")];
        assert!(botnet.probability > 0.99);
        assert!(scan.probability < 0.01);
    }

    #[test]
    fn test_confidence_independent_of_competitors() {
        // Same botnet evidence, with and without a competitor: probability
        // shifts, confidence does not
        let alone = fuse(&evidence_map(vec![evidence("botnet", 5, 0.8, 0.5)]));
        let contested = fuse(&evidence_map(vec![
            evidence("botnet", 5, 0.8, 0.5),
            evidence("ddos", 5, 0.8, 0.5),
        ]));

        let label = AttackLabel::parse("botnet");
        assert!(alone[&label].probability > contested[&label].probability);
        assert!((alone[&label].confidence - contested[&label].confidence).abs() < 1e-6);
    }
}
