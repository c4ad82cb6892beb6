//! Logic Module - Detection Pipeline Stages
//!
//! One stage per submodule, wired together by `detector`:
//! - `flow/` - flow records and ingestion validation
//! - `retrieval/` - nearest-neighbor gateway contract
//! - `window/` - adaptive buffering window
//! - `evidence/` - per-label evidence aggregation
//! - `fusion/` - hypothesis probabilities and confidence
//! - `decision/` - graded verdicts
//! - `explain/` - decision factors for humans
//! - `detector` - orchestrator owning one instance of each stage

pub mod labels;
pub mod config;
pub mod flow;
pub mod retrieval;
pub mod window;
pub mod evidence;
pub mod fusion;
pub mod decision;
pub mod explain;
pub mod detector;
