//! Flow Sentinel - Streaming Detection Core
//!
//! Classifies a continuous stream of network-flow embeddings as benign or
//! attack by comparing each flow against a nearest-neighbor archive of
//! labeled behavior and aggregating evidence over an adaptively-sized time
//! window.
//!
//! The vector archive, the request/response gateway, and any dashboard are
//! external collaborators. This crate is the decision pipeline only:
//! windowing, evidence accumulation, hypothesis fusion, the graded verdict,
//! and its explanation.

pub mod constants;
pub mod logic;

// Re-export the public surface for gateway consumers
pub use logic::config::{ConfigError, DetectorConfig};
pub use logic::decision::{DecisionThresholds, Severity, ThreatDecision};
pub use logic::detector::{DetectionResult, EngineStats, StreamDetector};
pub use logic::evidence::AttackEvidence;
pub use logic::explain::{MatchSummary, ThreatExplanation};
pub use logic::flow::{FlowError, FlowRecord};
pub use logic::fusion::ThreatHypothesis;
pub use logic::labels::AttackLabel;
pub use logic::retrieval::{Match, RetrievalError, Retriever};
pub use logic::window::{AdaptiveWindow, WindowConfig, WindowStatus};
