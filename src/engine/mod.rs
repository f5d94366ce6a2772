//! Engine adapter and session management.
//!
//! [`EngineAdapter`] holds the protocol logic and is generic over its worker
//! and board, so it can be driven directly in tests. [`EngineSession`] runs
//! it against a real engine process.

mod adapter;
pub mod config;
mod protocol;
mod session;

pub use adapter::EngineAdapter;
pub use config::AdapterConfig;
pub use protocol::ProtocolPhase;
pub use session::EngineSession;
