//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use uci_adapter::board::{BoardApi, Side, Square};
use uci_adapter::worker::{EngineWorker, WorkerError};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn sq(s: &str) -> Square {
    s.parse().expect("valid square")
}

/// Worker that records every command instead of sending it anywhere.
#[derive(Default)]
pub struct RecordingWorker {
    pub sent: Vec<String>,
}

impl EngineWorker for RecordingWorker {
    fn post_message(&mut self, line: &str) -> Result<(), WorkerError> {
        self.sent.push(line.to_string());
        Ok(())
    }
}

/// Board whose turn and received moves can be inspected from another thread.
#[derive(Clone)]
pub struct SharedBoard {
    inner: Arc<Mutex<(Side, Vec<(Square, Square)>)>>,
}

impl SharedBoard {
    pub fn new(turn: Side) -> Self {
        SharedBoard {
            inner: Arc::new(Mutex::new((turn, Vec::new()))),
        }
    }

    pub fn set_turn(&self, turn: Side) {
        self.inner.lock().0 = turn;
    }

    pub fn moves(&self) -> Vec<(Square, Square)> {
        self.inner.lock().1.clone()
    }
}

impl BoardApi for SharedBoard {
    fn turn_color(&self) -> Side {
        self.inner.lock().0
    }

    fn apply_move(&mut self, from: Square, to: Square) {
        self.inner.lock().1.push((from, to));
    }
}

/// Poll `condition` until it holds, failing the test after five seconds.
pub fn wait_until(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        std::thread::sleep(Duration::from_millis(10));
    }
}
