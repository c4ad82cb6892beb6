//! Flow Module
//!
//! The unit of work for the pipeline: one observed network flow reduced to
//! a fixed-dimension embedding plus endpoint metadata.
//!
//! - `types`: `FlowRecord`
//! - `validate`: fail-fast ingestion checks

pub mod types;
pub mod validate;

pub use types::FlowRecord;
pub use validate::{validate_flow, FlowError};
