//! External detector invocation and merged output capture
//!
//! The detector is a `file(1)`-compatible executable invoked once per run
//! with `--brief --mime-type`, so each input produces a single bare
//! `type/subtype` line. Its stdout and stderr are captured through one pipe
//! so failure lines land at the same positional slot as the path that
//! caused them.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::diagnostics::{CheckError, CheckResult};
use crate::resolve::{InputSource, ResolvedInput};

/// Detector executable used when no override is given.
pub const DEFAULT_DETECTOR: &str = "file";

/// One configured detector invocation.
#[derive(Debug, Clone)]
pub struct DetectorCommand {
    program: PathBuf,
}

impl Default for DetectorCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectorCommand {
    /// The stock `file` detector, found through `PATH`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_DETECTOR),
        }
    }

    /// A detector at an explicit program path.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run the detector once over the whole resolved set and capture its
    /// merged output.
    ///
    /// File and directory modes pass the resolved paths as arguments after
    /// `--`; batch mode passes the batch file via `--files-from` and lets
    /// the detector read the list itself. A non-zero detector exit is not
    /// fatal here: `file` exits non-zero when any input was unclassifiable,
    /// and those lines are per-file outcomes, not run failures.
    pub fn invoke(&self, input: &ResolvedInput) -> CheckResult<DetectorOutput> {
        let pipe_err = |source| CheckError::PipeCreate { source };
        let (mut reader, stdout_writer) = io::pipe().map_err(pipe_err)?;
        let stderr_writer = stdout_writer.try_clone().map_err(pipe_err)?;

        let mut command = Command::new(&self.program);
        command.arg("--brief").arg("--mime-type");
        match input.source() {
            InputSource::Batch(batch) => {
                command.arg("--files-from").arg(batch);
            }
            InputSource::Files(_) | InputSource::Dir(_) => {
                command.arg("--").args(input.paths());
            }
        }
        tracing::debug!(
            program = %self.program.display(),
            args = ?command.get_args().collect::<Vec<_>>(),
            "invoking detector"
        );

        command.stdin(Stdio::null());
        command.stdout(stdout_writer);
        command.stderr(stderr_writer);
        let mut child = command.spawn().map_err(|source| CheckError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        // The Command still holds both write ends; drop it so the read
        // below sees EOF once the child exits.
        drop(command);

        let mut raw = Vec::new();
        reader
            .read_to_end(&mut raw)
            .map_err(|source| CheckError::CaptureRead { source })?;
        let status = child.wait().map_err(|source| CheckError::Wait { source })?;
        if !status.success() {
            tracing::debug!(%status, "detector exited non-zero");
        }

        Ok(DetectorOutput {
            raw: String::from_utf8_lossy(&raw).into_owned(),
            status,
        })
    }
}

/// Captured result of one detector run.
#[derive(Debug)]
pub struct DetectorOutput {
    /// Merged stdout and stderr, in write order.
    pub raw: String,
    /// The detector's exit status, recorded but not acted on.
    pub status: ExitStatus,
}
