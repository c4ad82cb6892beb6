//! Window Module - Adaptive Stream Buffering
//!
//! Buffers incoming flows and decides when enough evidence has been seen
//! to emit a batch downstream. The observation horizon is self-tuning:
//! strong or recurring match signals widen it, sustained weak similarity
//! narrows it back toward the floor.
//!
//! - `config`: bounds and adaptation thresholds
//! - `manager`: the window state machine

pub mod config;
pub mod manager;

pub use config::WindowConfig;
pub use manager::{AdaptiveWindow, WindowStatus};
