//! Explain Module
//!
//! Renders a decision's contributing factors for humans. Pure functions
//! of the pipeline outputs, no side effects, no state.

pub mod types;
pub mod engine;

pub use types::{MatchSummary, ThreatExplanation};
pub use engine::explain;
