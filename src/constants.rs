//! Central Configuration Constants
//!
//! Single source of truth for all detection defaults.
//! To retune the engine defaults, only edit this file.

/// Embedding dimension produced by the upstream feature pipeline
pub const DEFAULT_EMBEDDING_DIM: usize = 99;

/// Nearest neighbors requested from the archive per flow
pub const DEFAULT_RETRIEVAL_K: usize = 5;

/// Window duration floor (seconds)
pub const DEFAULT_MIN_TIME_SECONDS: f64 = 5.0;

/// Window duration ceiling (seconds)
pub const DEFAULT_MAX_TIME_SECONDS: f64 = 60.0;

/// Flows required in the buffer before a flush is considered
pub const DEFAULT_MIN_FLOW_COUNT: usize = 20;

/// Buffer capacity; the oldest flow is evicted beyond this
pub const DEFAULT_MAX_FLOW_COUNT: usize = 500;

/// Mean recent similarity above this grows the window
pub const DEFAULT_SIMILARITY_EXPANSION_THRESHOLD: f32 = 0.75;

/// Mean recent similarity below this shrinks the window
pub const DEFAULT_SIMILARITY_SHRINKAGE_THRESHOLD: f32 = 0.50;

/// Repeated-label count that forces window growth
pub const DEFAULT_RECURRENCE_EXPANSION_THRESHOLD: u32 = 3;

/// Rolling similarity history capacity
pub const SIMILARITY_HISTORY_LEN: usize = 10;

/// History samples required before the window starts adapting
pub const MIN_HISTORY_SAMPLES: usize = 5;

/// Per-flow window growth step (5%)
pub const WINDOW_GROWTH_FACTOR: f64 = 1.05;

/// Per-flow window shrink step (5%)
pub const WINDOW_SHRINK_FACTOR: f64 = 0.95;

/// Within this margin of the floor, recurrence counters reset to baseline
pub const BASELINE_RESET_MARGIN_SECONDS: f64 = 1.0;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get retrieval depth from environment or use default
pub fn get_retrieval_k() -> usize {
    std::env::var("FLOW_SENTINEL_RETRIEVAL_K")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RETRIEVAL_K)
}

/// Get embedding dimension from environment or use default
pub fn get_embedding_dim() -> usize {
    std::env::var("FLOW_SENTINEL_EMBEDDING_DIM")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_EMBEDDING_DIM)
}
