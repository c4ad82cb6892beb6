//! Stream Detector - Pipeline Orchestrator
//!
//! Owns one instance of each stage and drives a flow through
//! retrieval -> windowing -> accumulation -> fusion -> decision ->
//! explanation.
//!
//! The window state is mutated in place and is not safe for concurrent
//! mutation, so one mutex serializes the stream: it is held for the whole
//! `process_flow` call. Gateways with concurrent handlers can share one
//! detector behind an `Arc` and calls will queue.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::config::{ConfigError, DetectorConfig};
use crate::logic::decision::{decide_with_thresholds, DecisionThresholds, ThreatDecision};
use crate::logic::evidence::{accumulate, AttackEvidence};
use crate::logic::explain::{explain, ThreatExplanation};
use crate::logic::flow::{validate_flow, FlowError, FlowRecord};
use crate::logic::fusion::{fuse, ThreatHypothesis};
use crate::logic::labels::AttackLabel;
use crate::logic::retrieval::Retriever;
use crate::logic::window::{AdaptiveWindow, WindowStatus};

// ============================================================================
// RESULTS
// ============================================================================

/// Everything one window flush produced
#[derive(Debug, Clone, Serialize)]
pub struct DetectionResult {
    pub result_id: Uuid,
    pub decision: ThreatDecision,
    pub explanation: ThreatExplanation,
    pub evidence: BTreeMap<AttackLabel, AttackEvidence>,
    pub hypotheses: BTreeMap<AttackLabel, ThreatHypothesis>,
    /// Adaptive window duration at flush time (seconds)
    pub window_seconds: f64,
    pub batch_len: usize,
    pub completed_at: DateTime<Utc>,
}

/// Read-only engine snapshot for the gateway's health surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineStats {
    pub vector_count: usize,
    pub buffered_flows: usize,
    pub adaptive_window_seconds: f64,
    pub dropped_flows: u64,
}

// ============================================================================
// DETECTOR
// ============================================================================

pub struct StreamDetector {
    retriever: Box<dyn Retriever + Send + Sync>,
    window: Mutex<AdaptiveWindow>,
    thresholds: DecisionThresholds,
    retrieval_k: usize,
    embedding_dim: usize,
}

impl StreamDetector {
    /// Build a detector; invalid configuration is rejected here, never at
    /// first use.
    pub fn new(
        config: DetectorConfig,
        retriever: Box<dyn Retriever + Send + Sync>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let window = AdaptiveWindow::new(config.window)?;

        log::info!(
            "stream detector online ({} vectors in archive, window floor {:.1}s)",
            retriever.vector_count(),
            window.window_seconds()
        );

        Ok(Self {
            retriever,
            window: Mutex::new(window),
            thresholds: config.thresholds,
            retrieval_k: config.retrieval_k,
            embedding_dim: config.embedding_dim,
        })
    }

    /// Push one flow through the pipeline.
    ///
    /// `Ok(None)` means the window is still buffering - not an error.
    /// Retrieval failures degrade to zero evidence for that flow and never
    /// abort the stream; malformed flows are rejected before touching
    /// window state.
    pub fn process_flow(&self, flow: FlowRecord) -> Result<Option<DetectionResult>, FlowError> {
        validate_flow(&flow, self.embedding_dim)?;

        // Single writer for the rest of the call
        let mut window = self.window.lock();

        let matches = match self.retriever.query(&flow.embedding, self.retrieval_k) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!(
                    "retrieval failed for flow {}: {} - continuing with zero evidence",
                    flow.flow_id,
                    e
                );
                Vec::new()
            }
        };

        let batch = match window.add_flow(flow, matches) {
            Some(batch) => batch,
            None => return Ok(None),
        };

        let evidence = accumulate(&batch);
        let hypotheses = fuse(&evidence);
        let decision = decide_with_thresholds(&hypotheses, &self.thresholds);
        let explanation = explain(&decision, &evidence, &hypotheses, &batch);

        if decision.is_attack {
            log::info!(
                "{} verdict: {} (p={:.2}, confidence={:.2}, {} flows)",
                decision.severity,
                decision
                    .attack_type
                    .as_ref()
                    .map(|label| label.as_str())
                    .unwrap_or("unknown"),
                decision.probability,
                decision.confidence,
                batch.len()
            );
        }

        Ok(Some(DetectionResult {
            result_id: Uuid::new_v4(),
            window_seconds: window.window_seconds(),
            batch_len: batch.len(),
            decision,
            explanation,
            evidence,
            hypotheses,
            completed_at: Utc::now(),
        }))
    }

    /// Read-only snapshot; does not mutate window state
    pub fn get_stats(&self) -> EngineStats {
        let window = self.window.lock();
        EngineStats {
            vector_count: self.retriever.vector_count(),
            buffered_flows: window.buffered_flows(),
            adaptive_window_seconds: window.window_seconds(),
            dropped_flows: window.dropped_flows(),
        }
    }

    /// Detailed window snapshot
    pub fn window_status(&self) -> WindowStatus {
        self.window.lock().status()
    }
}
