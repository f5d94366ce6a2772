//! Background engine worker.
//!
//! The adapter talks to its engine through two narrow capabilities:
//!
//! - [`EngineWorker`]: post one text command to the engine.
//! - [`WorkerListener`]: react to a message, a hard error, or a message that
//!   could not be decoded.
//!
//! [`ProcessWorker`] implements the first over a child process; its
//! [`EngineOutput`] produces [`WorkerEvent`]s for the second. Tests swap in
//! recording doubles.

mod bundle;
mod process;

use std::fmt;
use std::io;

pub use bundle::{host_supports_acceleration, EngineBundle};
pub use process::{pump_lines, EngineOutput, ProcessWorker};

/// Error type for worker transport failures
#[derive(Debug)]
pub enum WorkerError {
    /// The engine program could not be started
    Spawn { program: String, source: io::Error },
    /// Reading from or writing to the engine failed
    Io(io::Error),
    /// The engine closed its output
    Disconnected,
    /// The worker was shut down and accepts no more commands
    Terminated,
}

impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerError::Spawn { program, source } => {
                write!(f, "Failed to start engine '{program}': {source}")
            }
            WorkerError::Io(e) => write!(f, "Engine I/O error: {e}"),
            WorkerError::Disconnected => write!(f, "Engine closed its output"),
            WorkerError::Terminated => write!(f, "Engine worker has been terminated"),
        }
    }
}

impl std::error::Error for WorkerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorkerError::Spawn { source, .. } => Some(source),
            WorkerError::Io(e) => Some(e),
            WorkerError::Disconnected | WorkerError::Terminated => None,
        }
    }
}

impl From<io::Error> for WorkerError {
    fn from(e: io::Error) -> Self {
        WorkerError::Io(e)
    }
}

/// Sending half of a worker: one command line per call.
pub trait EngineWorker {
    /// Deliver `line` to the engine. The line terminator is added by the worker.
    fn post_message(&mut self, line: &str) -> Result<(), WorkerError>;

    /// Stop the worker. Later posts fail with [`WorkerError::Terminated`].
    fn terminate(&mut self) {}
}

impl<W: EngineWorker + ?Sized> EngineWorker for Box<W> {
    fn post_message(&mut self, line: &str) -> Result<(), WorkerError> {
        (**self).post_message(line)
    }

    fn terminate(&mut self) {
        (**self).terminate();
    }
}

/// Something the worker's output can be delivered to.
pub trait WorkerListener {
    /// A complete text message from the engine.
    fn on_message(&mut self, line: &str);

    /// The worker failed; no further messages should be expected.
    fn on_error(&mut self, error: &WorkerError);

    /// A message arrived but could not be decoded as text.
    fn on_message_error(&mut self, raw: &[u8]);
}

/// One item read from the worker's output channel.
#[derive(Debug)]
pub enum WorkerEvent {
    Message(String),
    Error(WorkerError),
    MessageError(Vec<u8>),
}

impl WorkerEvent {
    /// Hand the event to the matching listener reaction.
    pub fn dispatch<L: WorkerListener + ?Sized>(&self, listener: &mut L) {
        match self {
            WorkerEvent::Message(line) => listener.on_message(line),
            WorkerEvent::Error(error) => listener.on_error(error),
            WorkerEvent::MessageError(raw) => listener.on_message_error(raw),
        }
    }

    /// Whether this event ends the output stream.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, WorkerEvent::Error(_))
    }
}
