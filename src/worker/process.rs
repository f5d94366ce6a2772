//! Engine worker backed by a child process speaking over stdin/stdout.

use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use super::{EngineWorker, WorkerError, WorkerEvent};
use crate::uci::EngineCommand;

/// Poll interval while waiting for the engine to exit
const EXIT_POLL_MS: u64 = 10;

/// Default time an engine gets to honour `quit` before it is killed
const DEFAULT_SHUTDOWN_GRACE_MS: u64 = 500;

/// A UCI engine running as a child process.
///
/// Dropping the worker terminates the process.
pub struct ProcessWorker {
    program: String,
    child: Child,
    stdin: Option<BufWriter<ChildStdin>>,
    shutdown_grace: Duration,
    reaped: bool,
}

/// Output side of a [`ProcessWorker`], consumed by a reader thread.
pub struct EngineOutput {
    reader: BufReader<ChildStdout>,
}

impl ProcessWorker {
    /// Start `program` with piped stdin/stdout.
    pub fn spawn(program: &Path) -> Result<(Self, EngineOutput), WorkerError> {
        let name = program.display().to_string();
        let mut child = Command::new(program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| WorkerError::Spawn {
                program: name.clone(),
                source,
            })?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(WorkerError::Disconnected);
        };

        debug!("started engine '{}' (pid {})", name, child.id());

        let worker = ProcessWorker {
            program: name,
            child,
            stdin: Some(BufWriter::new(stdin)),
            shutdown_grace: Duration::from_millis(DEFAULT_SHUTDOWN_GRACE_MS),
            reaped: false,
        };
        let output = EngineOutput {
            reader: BufReader::new(stdout),
        };
        Ok((worker, output))
    }

    /// Time the engine gets to exit after `quit` before it is killed.
    #[must_use]
    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    /// Program the worker was started from.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// OS process id of the engine.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    fn wait_for_exit(&mut self) {
        // None when the grace period is too long to represent: wait indefinitely
        let deadline = Instant::now().checked_add(self.shutdown_grace);
        loop {
            match self.child.try_wait() {
                Ok(Some(status)) => {
                    debug!("engine '{}' exited with {}", self.program, status);
                    break;
                }
                Ok(None) if deadline.map_or(true, |d| Instant::now() < d) => {
                    thread::sleep(Duration::from_millis(EXIT_POLL_MS));
                }
                Ok(None) => {
                    warn!(
                        "engine '{}' still running after {:?}, killing it",
                        self.program, self.shutdown_grace
                    );
                    let _ = self.child.kill();
                    let _ = self.child.wait();
                    break;
                }
                Err(e) => {
                    warn!("failed to wait for engine '{}': {}", self.program, e);
                    break;
                }
            }
        }
        self.reaped = true;
    }
}

impl EngineWorker for ProcessWorker {
    fn post_message(&mut self, line: &str) -> Result<(), WorkerError> {
        let stdin = self.stdin.as_mut().ok_or(WorkerError::Terminated)?;
        writeln!(stdin, "{line}")?;
        stdin.flush()?;
        Ok(())
    }

    fn terminate(&mut self) {
        if let Some(mut stdin) = self.stdin.take() {
            let quit = writeln!(stdin, "{}", EngineCommand::Quit).and_then(|()| stdin.flush());
            if let Err(e) = quit {
                debug!("could not send quit to '{}': {}", self.program, e);
            }
            // stdin is closed here, which also ends engines that ignore quit
        }
        if !self.reaped {
            self.wait_for_exit();
        }
    }
}

impl Drop for ProcessWorker {
    fn drop(&mut self) {
        self.terminate();
    }
}

impl EngineOutput {
    /// Read engine output until it ends, feeding every line to `sink`.
    pub fn pump(self, sink: impl FnMut(WorkerEvent)) {
        pump_lines(self.reader, sink);
    }
}

/// Split `reader` into newline-delimited messages.
///
/// Lines that are not UTF-8 become [`WorkerEvent::MessageError`] and reading
/// continues. End of stream or a read error emits one [`WorkerEvent::Error`]
/// and returns.
pub fn pump_lines<R: BufRead>(mut reader: R, mut sink: impl FnMut(WorkerEvent)) {
    let mut buf = Vec::with_capacity(256);
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                sink(WorkerEvent::Error(WorkerError::Disconnected));
                return;
            }
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
                match std::str::from_utf8(&buf) {
                    Ok(line) => sink(WorkerEvent::Message(line.to_string())),
                    Err(_) => sink(WorkerEvent::MessageError(buf.clone())),
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                sink(WorkerEvent::Error(WorkerError::Io(e)));
                return;
            }
        }
    }
}
