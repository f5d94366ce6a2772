//! Adapter configuration.
//!
//! Everything the adapter would otherwise hardcode: which engine build to
//! start, the options applied during the handshake, search budgets and the
//! side the engine plays.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::Side;
use crate::uci::{analysis_options, EngineOption};
use crate::worker::EngineBundle;

/// Search budget for the warm-up search sent after `readyok` (ms)
pub const WARMUP_MOVETIME_MS: u64 = 1500;

/// Search budget for each position sent by the board (ms)
pub const SEARCH_MOVETIME_MS: u64 = 2000;

/// Time the engine gets to exit after `quit` (ms)
pub const SHUTDOWN_GRACE_MS: u64 = 500;

/// Side whose moves the adapter applies to the board
pub const ENGINE_SIDE: Side = Side::Black;

/// Configuration for an [`EngineAdapter`](super::EngineAdapter) and its session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AdapterConfig {
    /// Engine builds to choose from at startup
    pub bundle: EngineBundle,
    /// Options set after `uciok`, in order
    pub options: Vec<EngineOption>,
    /// `go movetime` for the warm-up search
    pub warmup_movetime_ms: u64,
    /// `go movetime` after each `send_position`
    pub search_movetime_ms: u64,
    /// Turn on which engine moves are applied to the board
    pub engine_side: Side,
    /// How long shutdown waits for the engine before killing it
    pub shutdown_grace_ms: u64,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            bundle: EngineBundle::default(),
            options: analysis_options(),
            warmup_movetime_ms: WARMUP_MOVETIME_MS,
            search_movetime_ms: SEARCH_MOVETIME_MS,
            engine_side: ENGINE_SIDE,
            shutdown_grace_ms: SHUTDOWN_GRACE_MS,
        }
    }
}

impl AdapterConfig {
    #[must_use]
    pub fn with_bundle(mut self, bundle: EngineBundle) -> Self {
        self.bundle = bundle;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<EngineOption>) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_warmup_movetime(mut self, movetime: Duration) -> Self {
        self.warmup_movetime_ms = millis(movetime);
        self
    }

    #[must_use]
    pub fn with_search_movetime(mut self, movetime: Duration) -> Self {
        self.search_movetime_ms = millis(movetime);
        self
    }

    #[must_use]
    pub fn with_engine_side(mut self, side: Side) -> Self {
        self.engine_side = side;
        self
    }

    #[must_use]
    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace_ms = millis(grace);
        self
    }

    #[must_use]
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_protocol_constants() {
        let config = AdapterConfig::default();
        assert_eq!(config.warmup_movetime_ms, 1500);
        assert_eq!(config.search_movetime_ms, 2000);
        assert_eq!(config.engine_side, Side::Black);
        assert_eq!(config.options, analysis_options());
    }

    #[test]
    fn builders_override_fields() {
        let config = AdapterConfig::default()
            .with_bundle(EngineBundle::single("engine"))
            .with_search_movetime(Duration::from_millis(250))
            .with_warmup_movetime(Duration::from_millis(50))
            .with_shutdown_grace(Duration::from_secs(2))
            .with_options(Vec::new());
        assert_eq!(config.bundle, EngineBundle::single("engine"));
        assert_eq!(config.search_movetime_ms, 250);
        assert_eq!(config.warmup_movetime_ms, 50);
        assert_eq!(config.shutdown_grace(), Duration::from_secs(2));
        assert!(config.options.is_empty());
    }

    #[test]
    fn oversized_durations_saturate() {
        let config = AdapterConfig::default()
            .with_search_movetime(Duration::MAX)
            .with_shutdown_grace(Duration::MAX);
        assert_eq!(config.search_movetime_ms, u64::MAX);
        assert_eq!(config.shutdown_grace_ms, u64::MAX);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_defaults() {
        let config: AdapterConfig =
            serde_json::from_str(r#"{"search_movetime_ms": 500, "engine_side": "white"}"#).unwrap();
        assert_eq!(config.search_movetime_ms, 500);
        assert_eq!(config.engine_side, Side::White);
        assert_eq!(config.warmup_movetime_ms, WARMUP_MOVETIME_MS);
        assert_eq!(config.bundle, EngineBundle::default());
    }
}
