//! Input resolution: explicit file lists, batch files, and directories
//!
//! Whatever the mode, resolution produces one ordered `Vec<PathBuf>` whose
//! length is fixed before the detector runs. The detector emits exactly one
//! line per entry, so this length is what the output parser later checks
//! against; see [`crate::parse`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::diagnostics::{CheckError, CheckResult};

/// Upper bound on explicit `--file` paths in a single run.
pub const MAX_EXPLICIT_FILES: usize = 10;

/// The input mode selected on the command line, exactly one per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Explicit paths, kept in the order they were given.
    Files(Vec<PathBuf>),
    /// A text file naming one path per line.
    Batch(PathBuf),
    /// A directory whose immediate entries are analyzed. Not recursive.
    Dir(PathBuf),
}

/// Ordered input set for one run, with the source it came from.
///
/// The path list never changes after construction; positional pairing with
/// the detector output depends on that.
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    source: InputSource,
    paths: Vec<PathBuf>,
}

impl ResolvedInput {
    pub fn source(&self) -> &InputSource {
        &self.source
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Batch runs hand the list file to the detector instead of argv paths,
    /// and they are the only mode with progress-signal support.
    pub fn is_batch(&self) -> bool {
        matches!(self.source, InputSource::Batch(_))
    }
}

/// Resolve `source` into the ordered path list the rest of the run uses.
///
/// Explicit lists pass through untouched. Batch files are read here (a
/// missing or unreadable batch file aborts the run), and directories are
/// enumerated non-recursively in whatever order the OS returns entries.
pub fn resolve(source: InputSource) -> CheckResult<ResolvedInput> {
    let paths = match &source {
        InputSource::Files(paths) => paths.clone(),
        InputSource::Batch(path) => batch_paths(path)?,
        InputSource::Dir(path) => dir_entries(path)?,
    };
    tracing::debug!(count = paths.len(), "resolved input set");
    Ok(ResolvedInput { source, paths })
}

fn batch_paths(batch: &Path) -> CheckResult<Vec<PathBuf>> {
    let content = fs::read_to_string(batch).map_err(|source| match source.kind() {
        // The file opened fine; its contents are the problem.
        io::ErrorKind::InvalidData => CheckError::BatchEncoding {
            path: batch.to_path_buf(),
            source,
        },
        _ => CheckError::OpenBatch {
            path: batch.to_path_buf(),
            source,
        },
    })?;
    let lines = usable_lines(&content);
    if lines.iter().all(|line| line.is_empty()) {
        return Err(CheckError::EmptyInput {
            path: batch.to_path_buf(),
        });
    }
    Ok(lines.into_iter().map(PathBuf::from).collect())
}

/// Split batch content on `\n`, dropping only the empty tail a terminating
/// newline produces. Interior blank lines stay: the detector reads the same
/// file line by line and emits a line for each, so dropping them here would
/// desync the positional pairing.
fn usable_lines(content: &str) -> Vec<&str> {
    if content.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<&str> = content.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

fn dir_entries(dir: &Path) -> CheckResult<Vec<PathBuf>> {
    let open_dir_err = |source| CheckError::OpenDir {
        path: dir.to_path_buf(),
        source,
    };
    let base = normalized_dir(dir);
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(open_dir_err)? {
        // read_dir never yields `.` or `..`.
        let entry = entry.map_err(open_dir_err)?;
        paths.push(base.join(entry.file_name()));
    }
    Ok(paths)
}

/// Strip trailing separators so `join` introduces exactly one.
///
/// Trims at the byte level: a directory name that is not valid UTF-8 must
/// come back out unchanged, not rewritten with replacement characters.
#[cfg(unix)]
fn normalized_dir(dir: &Path) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let bytes = dir.as_os_str().as_bytes();
    if bytes.last() != Some(&b'/') {
        return dir.to_path_buf();
    }
    match bytes.iter().rposition(|byte| *byte != b'/') {
        Some(last) => PathBuf::from(OsStr::from_bytes(&bytes[..=last])),
        None => PathBuf::from("/"),
    }
}

/// Strip trailing separators so `join` introduces exactly one. Paths have
/// no byte view off unix, so this trim is lossy for names that are not
/// valid UTF-8.
#[cfg(not(unix))]
fn normalized_dir(dir: &Path) -> PathBuf {
    let text = dir.to_string_lossy();
    if !text.ends_with('/') {
        return dir.to_path_buf();
    }
    let trimmed = text.trim_end_matches('/');
    if trimmed.is_empty() {
        PathBuf::from("/")
    } else {
        PathBuf::from(trimmed)
    }
}
