//! Estimator backend that runs an external program.
//!
//! The request is written to the program's stdin as a single JSON document
//! (`values` plus the flattened parameters). The program must print one JSON
//! document on stdout and exit with status zero; that document becomes the
//! opaque [`EstimationResult`].

use std::ffi::OsString;
use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use inflexion_traits::{
    ChangePointEstimator, EstimationRequest, EstimationResult, InflexionError, Result,
};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// How long pipe threads get to finish after the program was killed.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

fn failed(message: impl Into<String>) -> InflexionError {
    InflexionError::EstimationFailed(message.into())
}

/// Waits up to `grace` for `handles` to finish, joining those that do.
///
/// Returns how many were still running. Those are left detached; they end
/// once the last process holding the pipe open exits.
fn settle<T>(handles: Vec<JoinHandle<T>>, grace: Duration) -> usize {
    let deadline = Instant::now() + grace;
    let mut pending = handles;
    loop {
        let (finished, running): (Vec<_>, Vec<_>) =
            pending.into_iter().partition(JoinHandle::is_finished);
        for handle in finished {
            let _ = handle.join();
        }
        pending = running;

        let now = Instant::now();
        if pending.is_empty() || now >= deadline {
            return pending.len();
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

fn drain<R: Read + Send + 'static>(source: Option<R>) -> JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut source) = source {
            source.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

/// Runs an external estimator program per request.
#[derive(Debug, Clone)]
pub struct CommandEstimator {
    program: OsString,
    args: Vec<OsString>,
    timeout: Option<Duration>,
}

impl CommandEstimator {
    /// A backend that runs `program` with no arguments and no timeout.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Appends arguments passed to the program.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Kills the program if it runs longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The configured timeout, if any.
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus> {
        let Some(timeout) = self.timeout else {
            return child.wait().map_err(|e| failed(format!("wait failed: {}", e)));
        };

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child
                .try_wait()
                .map_err(|e| failed(format!("wait failed: {}", e)))?
            {
                return Ok(status);
            }

            let now = Instant::now();
            if now >= deadline {
                // Already exited or unkillable; either way the result is a timeout.
                let _ = child.kill();
                let _ = child.wait();
                return Err(failed(format!(
                    "{} timed out after {:?}",
                    self.program_name(),
                    timeout
                )));
            }
            thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }
}

impl ChangePointEstimator for CommandEstimator {
    fn name(&self) -> &str {
        "command"
    }

    fn estimate(&self, request: &EstimationRequest) -> Result<EstimationResult> {
        let payload = serde_json::to_vec(request)
            .map_err(|e| failed(format!("failed to encode request: {}", e)))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(format!("failed to start {}: {}", self.program_name(), e)))?;
        debug!(
            program = %self.program_name(),
            pid = child.id(),
            bytes = payload.len(),
            "spawned estimator"
        );

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let stdin = child.stdin.take();
        let writer = thread::spawn(move || -> std::io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&payload)?;
            }
            Ok(())
        });

        let status = match self.wait(&mut child) {
            Ok(status) => status,
            Err(err) => {
                let stuck =
                    settle(vec![stdout, stderr], DRAIN_GRACE) + settle(vec![writer], DRAIN_GRACE);
                if stuck > 0 {
                    warn!(
                        program = %self.program_name(),
                        stuck,
                        "estimator pipes still held open after kill, leaving their threads detached"
                    );
                }
                return Err(err);
            }
        };

        let stderr = stderr
            .join()
            .map_err(|_| failed("stderr reader panicked"))?
            .unwrap_or_default();
        let stderr = String::from_utf8_lossy(&stderr);

        if !status.success() {
            return Err(failed(format!(
                "{} exited with {}: {}",
                self.program_name(),
                status,
                stderr.trim()
            )));
        }

        // A program that exits successfully without reading its input is its own business.
        if let Ok(Err(e)) = writer.join() {
            debug!(error = %e, "estimator did not consume its whole input");
        }

        let stdout = stdout
            .join()
            .map_err(|_| failed("stdout reader panicked"))?
            .map_err(|e| failed(format!("failed to read estimator output: {}", e)))?;

        let document: serde_json::Value = serde_json::from_slice(&stdout).map_err(|e| {
            failed(format!(
                "{} produced invalid JSON: {}",
                self.program_name(),
                e
            ))
        })?;

        Ok(EstimationResult::from_json(document))
    }
}
