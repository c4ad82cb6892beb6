//! Decision Module
//!
//! Turns fused hypotheses into a graded verdict. This is where
//! attack/benign is decided.
//!
//! ## Structure
//! - `types`: `Severity`, `ThreatDecision`
//! - `rules`: thresholds and weights
//! - `engine`: the decision logic

pub mod types;
pub mod rules;
pub mod engine;

pub use types::{Severity, ThreatDecision};
pub use rules::{
    DecisionThresholds, BASE_ATTACK_THRESHOLD, CONFIDENCE_DISCOUNT, MIN_ATTACK_CONFIDENCE,
};
pub use engine::{decide, decide_with_thresholds};
