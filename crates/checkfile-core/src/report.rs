//! Per-file reports, summary counters, and line rendering
//!
//! Rendering lives here rather than in the CLI so the exact report lines
//! are testable without spawning the binary, and so the JSON payload and
//! the text output can never drift apart.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::matcher::{FileErrorKind, Outcome};

/// One classified input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
}

impl FileReport {
    /// Render the report line for this file, or `None` for skipped
    /// directories, which produce no output at all.
    pub fn render(&self) -> Option<String> {
        let path = self.path.display();
        match &self.outcome {
            Outcome::Ok { extension, subtype } => Some(format!(
                "[OK] '{path}': extension '{extension}' matches file type '{subtype}'"
            )),
            Outcome::Mismatch { extension, subtype } => Some(format!(
                "[MISMATCH] '{path}': extension is '{extension}', file type is '{subtype}'"
            )),
            Outcome::NoExtension { subtype } => Some(format!(
                "[INFO] '{path}' has no extension, file type is '{subtype}'"
            )),
            Outcome::Unsupported { line } => Some(format!(
                "[UNSUPPORTED] '{path}': type '{line}' is not supported"
            )),
            Outcome::Error {
                error: FileErrorKind::Unreadable { message },
            } => Some(format!("[ERROR] cannot open file '{path}' -- {message}")),
            Outcome::Error {
                error: FileErrorKind::DetectorFailure { line },
            } => Some(format!("[ERROR] '{path}': detector reported '{line}'")),
            Outcome::SkippedDirectory => None,
        }
    }

    /// Error reports belong on the diagnostic stream, everything else on
    /// the report stream.
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error { .. })
    }
}

/// Counter block behind the end-of-run summary line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub ok: usize,
    pub mismatch: usize,
    pub no_extension: usize,
    pub unsupported: usize,
    pub errors: usize,
}

impl Summary {
    /// Count one classified entry. Every outcome increments exactly one
    /// category counter plus the total; skipped directories touch nothing.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Ok { .. } => self.ok += 1,
            Outcome::Mismatch { .. } => self.mismatch += 1,
            Outcome::NoExtension { .. } => self.no_extension += 1,
            Outcome::Unsupported { .. } => self.unsupported += 1,
            Outcome::Error { .. } => self.errors += 1,
            Outcome::SkippedDirectory => return,
        }
        self.total += 1;
    }

    /// `total` must equal the sum of the category counters.
    pub fn is_consistent(&self) -> bool {
        self.total == self.ok + self.mismatch + self.no_extension + self.unsupported + self.errors
    }

    pub fn render(&self) -> String {
        format!(
            "[SUMMARY] files analyzed: {}; files OK: {}; files mismatched: {}; \
             files without extension: {}; unsupported files: {}; errors: {}",
            self.total, self.ok, self.mismatch, self.no_extension, self.unsupported, self.errors
        )
    }
}

/// Everything one run produced; the payload for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub summary: Summary,
}
