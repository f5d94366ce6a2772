//! Universal Chess Interface (UCI) protocol model, engine-client side.
//!
//! Commands flow to the engine as [`EngineCommand`] lines; engine output is
//! classified into [`EngineReply`] values. Both types format back to the
//! exact wire text, so the same model serves the adapter and the scripted
//! test engine.

pub mod command;
pub mod options;
pub mod reply;

pub use command::{parse_engine_command, EngineCommand};
pub use options::{analysis_options, EngineOption, ANALYSE_MODE, ANALYSIS_CONTEMPT};
pub use reply::{parse_engine_reply, EngineReply};
