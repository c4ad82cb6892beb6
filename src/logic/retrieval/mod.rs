//! Retrieval Gateway Contract
//!
//! The vector archive is an external collaborator. The core only consumes
//! ranked nearest-neighbor matches through the [`Retriever`] trait; query
//! timeout and retry policy belong to the implementor, not to this crate.

use serde::{Deserialize, Serialize};

use crate::logic::labels::AttackLabel;

// ============================================================================
// MATCH
// ============================================================================

/// One nearest-neighbor result for a flow's embedding.
///
/// Read-only downstream of retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub label: AttackLabel,
    /// Clamped to [0, 1]
    pub similarity: f32,
    /// Raw index distance, never negative
    pub distance: f32,
    /// Opaque backend metadata, passed through for the gateway
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Match {
    pub fn new(label: &str, similarity: f32, distance: f32) -> Self {
        Self {
            label: AttackLabel::parse(label),
            similarity: similarity.clamp(0.0, 1.0),
            distance: distance.max(0.0),
            metadata: serde_json::Value::Null,
        }
    }

    /// Build from an index distance using the backend's `1 - distance`
    /// similarity convention.
    pub fn from_distance(label: &str, distance: f32) -> Self {
        Self::new(label, 1.0 - distance, distance)
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

// ============================================================================
// RETRIEVER CONTRACT
// ============================================================================

/// Retrieval backend failure.
///
/// The pipeline absorbs these: a failed query degrades to zero evidence
/// for that flow instead of aborting buffering.
#[derive(Debug)]
pub struct RetrievalError {
    message: String,
}

impl RetrievalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl std::fmt::Display for RetrievalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Retrieval Error: {}", self.message)
    }
}

impl std::error::Error for RetrievalError {}

/// Nearest-neighbor archive consumed by the detector.
///
/// Injected at construction so hosts can swap backends (or stub them in
/// tests) without touching pipeline code.
pub trait Retriever {
    /// Nearest neighbors for an embedding, ordered by descending
    /// similarity, at most `k` entries. An empty list is a valid answer
    /// and is treated the same as "no matches found".
    fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<Match>, RetrievalError>;

    /// Number of vectors in the archive, for stats reporting
    fn vector_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_clamps_similarity() {
        assert_eq!(Match::new("botnet", 1.7, 0.0).similarity, 1.0);
        assert_eq!(Match::new("botnet", -0.3, 0.0).similarity, 0.0);
        assert_eq!(Match::new("botnet", 0.5, -1.0).distance, 0.0);
    }

    #[test]
    fn test_from_distance() {
        let m = Match::from_distance("ddos", 0.25);
        assert!((m.similarity - 0.75).abs() < 1e-6);
        assert_eq!(m.distance, 0.25);

        // Distances beyond 1.0 clamp to zero similarity
        let far = Match::from_distance("ddos", 1.8);
        assert_eq!(far.similarity, 0.0);
    }

    #[test]
    fn test_label_normalized_on_construction() {
        let m = Match::new(" Botnet", 0.9, 0.1);
        assert_eq!(m.label.as_str(), "botnet");
    }
}
