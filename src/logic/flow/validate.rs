//! Flow Ingestion Validation
//!
//! Malformed flows fail fast at the pipeline entrance. The core never
//! silently coerces an embedding into the expected shape.

use super::types::FlowRecord;

#[derive(Debug)]
pub enum FlowError {
    EmptyFlowId,
    DimensionMismatch { expected: usize, actual: usize },
    NonFiniteValue { index: usize },
    InvalidTimestamp { value: f64 },
}

impl std::fmt::Display for FlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowError::EmptyFlowId => write!(f, "Flow rejected: empty flow id"),
            FlowError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Flow rejected: embedding dimension {} (expected {})",
                    actual, expected
                )
            }
            FlowError::NonFiniteValue { index } => {
                write!(f, "Flow rejected: non-finite embedding value at index {}", index)
            }
            FlowError::InvalidTimestamp { value } => {
                write!(f, "Flow rejected: invalid timestamp {}", value)
            }
        }
    }
}

impl std::error::Error for FlowError {}

/// Validate a flow against the configured embedding dimension
pub fn validate_flow(flow: &FlowRecord, embedding_dim: usize) -> Result<(), FlowError> {
    if flow.flow_id.trim().is_empty() {
        return Err(FlowError::EmptyFlowId);
    }
    if !flow.timestamp.is_finite() || flow.timestamp < 0.0 {
        return Err(FlowError::InvalidTimestamp { value: flow.timestamp });
    }
    if flow.embedding.len() != embedding_dim {
        return Err(FlowError::DimensionMismatch {
            expected: embedding_dim,
            actual: flow.embedding.len(),
        });
    }
    if let Some(index) = flow.embedding.iter().position(|v| !v.is_finite()) {
        return Err(FlowError::NonFiniteValue { index });
    }
    Ok(())
}
