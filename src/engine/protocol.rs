//! Handshake phases of the engine protocol.

use std::fmt;

use crate::uci::EngineReply;

/// Where the adapter is in the `uci` / `isready` handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProtocolPhase {
    /// Nothing sent yet
    #[default]
    Start,
    /// `uci` sent, waiting for `uciok`
    AwaitingUciOk,
    /// Options, `ucinewgame` and `isready` sent, waiting for `readyok`
    AwaitingReady,
    /// Handshake done; `bestmove` replies are acted on
    Idle,
}

impl ProtocolPhase {
    /// The phase a reply moves the handshake to, if it is the one this phase waits for.
    ///
    /// Replies arriving out of phase return `None` and are ignored by the adapter.
    #[must_use]
    pub fn advance(self, reply: &EngineReply) -> Option<ProtocolPhase> {
        match (self, reply) {
            (ProtocolPhase::AwaitingUciOk, EngineReply::UciOk) => Some(ProtocolPhase::AwaitingReady),
            (ProtocolPhase::AwaitingReady, EngineReply::ReadyOk) => Some(ProtocolPhase::Idle),
            _ => None,
        }
    }

    /// Whether `bestmove` replies should be acted on.
    #[inline]
    #[must_use]
    pub fn accepts_moves(self) -> bool {
        self == ProtocolPhase::Idle
    }
}

impl fmt::Display for ProtocolPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProtocolPhase::Start => "start",
            ProtocolPhase::AwaitingUciOk => "awaiting uciok",
            ProtocolPhase::AwaitingReady => "awaiting readyok",
            ProtocolPhase::Idle => "idle",
        };
        f.write_str(name)
    }
}
