//! A running engine process wired to an adapter.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error, info};
use parking_lot::Mutex;

use super::adapter::EngineAdapter;
use super::config::AdapterConfig;
use super::protocol::ProtocolPhase;
use crate::board::BoardApi;
use crate::worker::{EngineWorker, ProcessWorker, WorkerError};

type SharedAdapter<B> = Arc<Mutex<EngineAdapter<ProcessWorker, B>>>;

/// Engine process, reader thread and adapter for one board session.
///
/// The reader thread is the only place engine output is handled; calls made
/// through the session take the same lock, so the adapter never sees two
/// events at once. Dropping the session shuts the engine down.
pub struct EngineSession<B: BoardApi + Send + 'static> {
    adapter: SharedAdapter<B>,
    closing: Arc<AtomicBool>,
    reader: Option<JoinHandle<()>>,
}

impl<B: BoardApi + Send + 'static> EngineSession<B> {
    /// Start the engine build suited to this host and begin the handshake.
    pub fn start(config: AdapterConfig, board: B) -> Result<Self, WorkerError> {
        let program = config.bundle.select().to_path_buf();
        let (worker, output) = ProcessWorker::spawn(&program)?;
        let worker = worker.with_shutdown_grace(config.shutdown_grace());
        info!("engine session on '{}' (pid {})", worker.program(), worker.id());

        let adapter = Arc::new(Mutex::new(EngineAdapter::new(worker, board, config)));
        let closing = Arc::new(AtomicBool::new(false));

        let shared = Arc::clone(&adapter);
        let stop = Arc::clone(&closing);
        let reader = thread::Builder::new()
            .name("engine-output".to_string())
            .spawn(move || {
                output.pump(|event| {
                    if stop.load(Ordering::Relaxed) && event.is_fatal() {
                        debug!("engine output closed during shutdown");
                        return;
                    }
                    event.dispatch(&mut *shared.lock());
                });
            })
            .map_err(WorkerError::Io)?;

        Ok(EngineSession {
            adapter,
            closing,
            reader: Some(reader),
        })
    }

    /// See [`EngineAdapter::send_position`].
    pub fn send_position(&self, moves: &str) {
        self.adapter.lock().send_position(moves);
    }

    #[must_use]
    pub fn best_move(&self) -> Option<String> {
        self.adapter.lock().best_move().map(str::to_string)
    }

    #[must_use]
    pub fn phase(&self) -> ProtocolPhase {
        self.adapter.lock().phase()
    }

    #[must_use]
    pub fn engine_name(&self) -> Option<String> {
        self.adapter.lock().engine_name().map(str::to_string)
    }

    /// Run `f` with the board while no engine event is being handled.
    ///
    /// The adapter lock is held for the whole call and is not reentrant:
    /// calling back into this session from `f` (for example
    /// [`send_position`](Self::send_position)) deadlocks.
    pub fn with_board<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        f(self.adapter.lock().board_mut())
    }

    /// Send `quit`, wait for the engine to exit and stop the reader thread.
    pub fn shutdown(mut self) {
        self.close();
    }

    fn close(&mut self) {
        let Some(reader) = self.reader.take() else {
            return;
        };
        self.closing.store(true, Ordering::Relaxed);
        self.adapter.lock().worker_mut().terminate();
        if reader.join().is_err() {
            error!("engine reader thread panicked");
        }
    }
}

impl<B: BoardApi + Send + 'static> Drop for EngineSession<B> {
    fn drop(&mut self) {
        self.close();
    }
}
