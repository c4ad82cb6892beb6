//! Flow Types
//!
//! Data structures only, no pipeline logic.

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::logic::retrieval::Match;

/// One observed network flow.
///
/// Owned exclusively by the pipeline for the duration of one processing
/// pass; becomes part of an immutable batch once the window flushes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowRecord {
    /// Unique per flow within a stream
    pub flow_id: String,
    /// Capture time in seconds, non-decreasing within one stream
    pub timestamp: f64,
    /// Fixed-dimension behavioral embedding
    pub embedding: Vec<f32>,
    pub src_ip: IpAddr,
    pub dst_ip: IpAddr,
    pub src_port: u16,
    pub dst_port: u16,
    pub protocol: String,
    /// Nearest-neighbor matches, attached during processing
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl FlowRecord {
    /// New flow with unspecified endpoints; fill the fields the capture
    /// layer actually knows.
    pub fn new(flow_id: impl Into<String>, timestamp: f64, embedding: Vec<f32>) -> Self {
        Self {
            flow_id: flow_id.into(),
            timestamp,
            embedding,
            src_ip: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            dst_ip: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            src_port: 0,
            dst_port: 0,
            protocol: "UNKNOWN".to_string(),
            matches: Vec::new(),
        }
    }

    /// "src -> dst" descriptor used in explanations
    pub fn endpoint_pair(&self) -> String {
        format!("{} -> {}", self.src_ip, self.dst_ip)
    }

    /// Strongest attached match similarity (0.0 when none)
    pub fn top_similarity(&self) -> f32 {
        self.matches.iter().map(|m| m.similarity).fold(0.0, f32::max)
    }
}
