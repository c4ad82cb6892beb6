//! Adaptive Window - the only cross-flow mutable state in the pipeline
//!
//! Mutated exactly once per incoming flow, never shared: multi-segment
//! deployments construct one window per detector instance.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::constants::{
    BASELINE_RESET_MARGIN_SECONDS, MIN_HISTORY_SAMPLES, SIMILARITY_HISTORY_LEN,
    WINDOW_GROWTH_FACTOR, WINDOW_SHRINK_FACTOR,
};
use crate::logic::config::ConfigError;
use crate::logic::flow::FlowRecord;
use crate::logic::labels::AttackLabel;
use crate::logic::retrieval::Match;

use super::config::WindowConfig;

// ============================================================================
// STATE
// ============================================================================

/// Bounded flow buffer with a self-tuning time horizon.
///
/// The horizon adapts asymmetrically: it grows on either strong mean
/// similarity or repeated identical labels, and shrinks only on sustained
/// weak similarity. Between the two thresholds it holds steady
/// (hysteresis against oscillation).
pub struct AdaptiveWindow {
    config: WindowConfig,
    buffer: VecDeque<FlowRecord>,
    window_seconds: f64,
    recent_avg_similarities: VecDeque<f32>,
    recurrence: HashMap<AttackLabel, u32>,
    dropped_flows: u64,
}

impl AdaptiveWindow {
    pub fn new(config: WindowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let window_seconds = config.min_time_seconds;
        Ok(Self {
            config,
            buffer: VecDeque::new(),
            window_seconds,
            recent_avg_similarities: VecDeque::with_capacity(SIMILARITY_HISTORY_LEN),
            recurrence: HashMap::new(),
            dropped_flows: 0,
        })
    }

    // ========================================================================
    // STREAM INPUT
    // ========================================================================

    /// Buffer one flow and adapt the horizon.
    ///
    /// Returns the full buffered batch once the flush conditions hold:
    /// at least `min_flow_count` flows AND a first-to-last timestamp span
    /// of at least the current window duration. Flushing empties the
    /// buffer but keeps the adapted duration and similarity history.
    ///
    /// Timestamps are expected to be non-decreasing within one stream;
    /// the span check reads the buffer ends.
    pub fn add_flow(&mut self, mut flow: FlowRecord, matches: Vec<Match>) -> Option<Vec<FlowRecord>> {
        flow.matches = matches;

        let avg_similarity = if flow.matches.is_empty() {
            0.0
        } else {
            flow.matches.iter().map(|m| m.similarity).sum::<f32>() / flow.matches.len() as f32
        };

        for m in &flow.matches {
            if !m.label.is_benign() {
                *self.recurrence.entry(m.label.clone()).or_insert(0) += 1;
            }
        }

        if self.buffer.len() >= self.config.max_flow_count {
            if let Some(evicted) = self.buffer.pop_front() {
                self.dropped_flows += 1;
                log::warn!(
                    "window buffer full ({} flows), dropped oldest flow {}",
                    self.config.max_flow_count,
                    evicted.flow_id
                );
            }
        }
        self.buffer.push_back(flow);

        if self.recent_avg_similarities.len() >= SIMILARITY_HISTORY_LEN {
            self.recent_avg_similarities.pop_front();
        }
        self.recent_avg_similarities.push_back(avg_similarity);

        self.adapt();
        self.try_flush()
    }

    // ========================================================================
    // ADAPTATION
    // ========================================================================

    fn adapt(&mut self) {
        if self.recent_avg_similarities.len() < MIN_HISTORY_SAMPLES {
            return;
        }

        let recent_mean = self.recent_avg_similarities.iter().sum::<f32>()
            / self.recent_avg_similarities.len() as f32;
        let max_recurrence = self.recurrence.values().copied().max().unwrap_or(0);

        if recent_mean > self.config.similarity_expansion_threshold
            || max_recurrence >= self.config.recurrence_expansion_threshold
        {
            self.window_seconds =
                (self.window_seconds * WINDOW_GROWTH_FACTOR).min(self.config.max_time_seconds);
        } else if recent_mean < self.config.similarity_shrinkage_threshold {
            self.window_seconds =
                (self.window_seconds * WINDOW_SHRINK_FACTOR).max(self.config.min_time_seconds);

            // Back near the floor: the stream has gone quiet, forget which
            // labels were recurring
            if self.window_seconds <= self.config.min_time_seconds + BASELINE_RESET_MARGIN_SECONDS {
                self.recurrence.clear();
            }
        }
        // Between the thresholds the horizon holds steady
    }

    fn try_flush(&mut self) -> Option<Vec<FlowRecord>> {
        if self.buffer.len() < self.config.min_flow_count {
            return None;
        }
        let span = match (self.buffer.front(), self.buffer.back()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => return None,
        };
        if span < self.window_seconds {
            return None;
        }

        log::debug!(
            "flushing {} flows spanning {:.1}s (window {:.1}s)",
            self.buffer.len(),
            span,
            self.window_seconds
        );
        Some(self.buffer.drain(..).collect())
    }

    // ========================================================================
    // SNAPSHOTS
    // ========================================================================

    pub fn window_seconds(&self) -> f64 {
        self.window_seconds
    }

    pub fn buffered_flows(&self) -> usize {
        self.buffer.len()
    }

    pub fn dropped_flows(&self) -> u64 {
        self.dropped_flows
    }

    pub fn status(&self) -> WindowStatus {
        WindowStatus {
            buffered_flows: self.buffer.len(),
            required_flows: self.config.min_flow_count,
            window_seconds: self.window_seconds,
            fill_percent: (self.buffer.len() as f32 / self.config.min_flow_count as f32 * 100.0)
                .min(100.0),
            dropped_flows: self.dropped_flows,
            tracked_labels: self.recurrence.len(),
        }
    }
}

/// Window status information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowStatus {
    pub buffered_flows: usize,
    pub required_flows: usize,
    pub window_seconds: f64,
    pub fill_percent: f32,
    pub dropped_flows: u64,
    pub tracked_labels: usize,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn window(config: WindowConfig) -> AdaptiveWindow {
        AdaptiveWindow::new(config).unwrap()
    }

    fn flow(id: u32, timestamp: f64) -> FlowRecord {
        FlowRecord::new(format!("flow_{}", id), timestamp, vec![0.0; 4])
    }

    fn matches(label: &str, similarity: f32) -> Vec<Match> {
        vec![Match::new(label, similarity, 1.0 - similarity)]
    }

    #[test]
    fn test_duration_stays_in_bounds() {
        let config = WindowConfig::default();
        let (min, max) = (config.min_time_seconds, config.max_time_seconds);
        let mut win = window(config);

        // Sustained strong similarity pushes toward the ceiling, never
        // past it (benign labels so recurrence stays out of the picture)
        for i in 0..300 {
            win.add_flow(flow(i, i as f64 * 0.001), matches("normal", 0.95));
            assert!(win.window_seconds() >= min && win.window_seconds() <= max);
        }
        assert!((win.window_seconds() - max).abs() < 1e-9);

        // Sustained weak signal returns to the floor, never below it
        for i in 300..900 {
            win.add_flow(flow(i, i as f64 * 0.001), Vec::new());
            assert!(win.window_seconds() >= min && win.window_seconds() <= max);
        }
        assert!((win.window_seconds() - min).abs() < 1e-9);
    }

    #[test]
    fn test_recurring_label_keeps_window_wide() {
        let mut win = window(WindowConfig::default());

        // Once a non-benign label recurs past the threshold, even weak
        // similarity keeps the horizon growing instead of shrinking
        for i in 0..10 {
            win.add_flow(flow(i, i as f64 * 0.001), matches("botnet", 0.3));
        }
        let widened = win.window_seconds();
        assert!(widened > 5.0);

        for i in 10..20 {
            win.add_flow(flow(i, i as f64 * 0.001), Vec::new());
        }
        assert!(win.window_seconds() >= widened);
    }

    #[test]
    fn test_no_flush_below_min_flow_count() {
        let mut win = window(WindowConfig::default());

        // Huge span but only 19 flows: never ready
        for i in 0..19 {
            let batch = win.add_flow(flow(i, i as f64 * 100.0), Vec::new());
            assert!(batch.is_none());
        }
        assert_eq!(win.buffered_flows(), 19);
    }

    #[test]
    fn test_flush_requires_span() {
        let mut win = window(WindowConfig::default());

        // 30 flows packed into 3 seconds: count is met, span is not
        for i in 0..30 {
            assert!(win.add_flow(flow(i, i as f64 * 0.1), Vec::new()).is_none());
        }

        // One flow far enough out closes the window
        let batch = win.add_flow(flow(30, 10.0), Vec::new());
        let batch = batch.expect("span reached, batch should flush");
        assert_eq!(batch.len(), 31);
        assert_eq!(win.buffered_flows(), 0);
    }

    #[test]
    fn test_flush_preserves_adapted_duration() {
        let mut win = window(WindowConfig::default());

        // Packed timestamps keep the span below the growing window
        for i in 0..20 {
            assert!(win
                .add_flow(flow(i, i as f64 * 0.1), matches("botnet", 0.9))
                .is_none());
        }
        let grown = win.window_seconds();
        assert!(grown > 5.0);

        let batch = win.add_flow(flow(20, 50.0), matches("botnet", 0.9));
        assert!(batch.is_some());
        assert_eq!(win.buffered_flows(), 0);
        // Adapted duration survives the flush
        assert!(win.window_seconds() >= grown);
    }

    #[test]
    fn test_eviction_counts_dropped_flows() {
        let config = WindowConfig {
            min_flow_count: 10,
            max_flow_count: 10,
            ..Default::default()
        };
        let mut win = window(config);

        // Timestamps packed under the floor so no flush can occur
        for i in 0..15 {
            assert!(win.add_flow(flow(i, i as f64 * 0.01), Vec::new()).is_none());
        }
        assert_eq!(win.buffered_flows(), 10);
        assert_eq!(win.dropped_flows(), 5);
        assert_eq!(win.status().dropped_flows, 5);
    }

    #[test]
    fn test_recurrence_clears_at_baseline() {
        let mut win = window(WindowConfig::default());

        // Two ddos sightings stay under the recurrence threshold; strong
        // benign similarity does the growing
        win.add_flow(flow(0, 0.0), matches("ddos", 0.9));
        win.add_flow(flow(1, 0.001), matches("ddos", 0.9));
        for i in 2..30 {
            win.add_flow(flow(i, i as f64 * 0.001), matches("normal", 0.9));
        }
        assert!(win.window_seconds() > 5.0);
        assert_eq!(win.status().tracked_labels, 1);

        // Quiet traffic shrinks back to the floor and resets the counters
        for i in 30..300 {
            win.add_flow(flow(i, i as f64 * 0.001), Vec::new());
        }
        assert!((win.window_seconds() - 5.0).abs() < 1e-9);
        assert_eq!(win.status().tracked_labels, 0);
    }

    #[test]
    fn test_dead_zone_holds_duration() {
        let mut win = window(WindowConfig::default());

        // Mean similarity of 0.6 sits between both thresholds; benign
        // labels keep recurrence out of the picture
        for i in 0..50 {
            win.add_flow(flow(i, i as f64 * 0.001), matches("normal", 0.6));
        }
        assert!((win.window_seconds() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_benign_labels_not_counted_as_recurrence() {
        let mut win = window(WindowConfig::default());
        for i in 0..10 {
            win.add_flow(flow(i, i as f64 * 0.001), matches("normal", 0.2));
        }
        assert_eq!(win.status().tracked_labels, 0);
    }

    #[test]
    fn test_status_fill_percent() {
        let mut win = window(WindowConfig::default());
        for i in 0..10 {
            win.add_flow(flow(i, i as f64 * 0.01), Vec::new());
        }
        let status = win.status();
        assert_eq!(status.buffered_flows, 10);
        assert_eq!(status.required_flows, 20);
        assert!((status.fill_percent - 50.0).abs() < 1e-3);
    }
}
