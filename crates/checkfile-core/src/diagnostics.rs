//! Fatal error taxonomy and process exit codes

use std::path::PathBuf;
use thiserror::Error;

pub type CheckResult<T> = Result<T, CheckError>;

/// Failures that abort a run before the summary is produced.
///
/// Per-file problems (unreadable path, detector could not classify) are not
/// errors at this level; they become [`Outcome::Error`] entries and count
/// toward the summary instead.
///
/// [`Outcome::Error`]: crate::matcher::Outcome::Error
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("cannot open file '{path}'")]
    OpenBatch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("batch file '{path}' is not valid UTF-8")]
    BatchEncoding {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("batch file '{path}' has no usable lines")]
    EmptyInput { path: PathBuf },

    #[error("cannot open directory '{path}'")]
    OpenDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot create capture pipe")]
    PipeCreate {
        #[source]
        source: std::io::Error,
    },

    #[error("cannot launch detector '{program}'")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read detector output")]
    CaptureRead {
        #[source]
        source: std::io::Error,
    },

    #[error("cannot wait for detector exit")]
    Wait {
        #[source]
        source: std::io::Error,
    },

    #[error("detector produced {actual} output line(s) for {expected} input file(s)")]
    ParseCountMismatch { expected: usize, actual: usize },

    #[error("cannot register signal handlers")]
    SignalSetup {
        #[source]
        source: std::io::Error,
    },
}

impl CheckError {
    /// Process exit code for this failure, one distinct value per category.
    ///
    /// Successful runs exit 0 even when individual files mismatched or
    /// errored; only these abort conditions produce non-zero exits.
    pub fn exit_code(&self) -> u8 {
        match self {
            CheckError::ParseCountMismatch { .. } => 1,
            CheckError::Wait { .. } => 2,
            CheckError::Spawn { .. } => 3,
            CheckError::PipeCreate { .. } => 4,
            CheckError::OpenBatch { .. } => 5,
            CheckError::BatchEncoding { .. } => 6,
            CheckError::CaptureRead { .. } => 7,
            CheckError::OpenDir { .. } => 8,
            CheckError::EmptyInput { .. } => 10,
            CheckError::SignalSetup { .. } => 11,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::error::Error as _;
    use std::io;

    fn sample_errors() -> Vec<CheckError> {
        vec![
            CheckError::OpenBatch {
                path: PathBuf::from("list.txt"),
                source: io::Error::new(io::ErrorKind::NotFound, "gone"),
            },
            CheckError::BatchEncoding {
                path: PathBuf::from("list.txt"),
                source: io::Error::new(io::ErrorKind::InvalidData, "invalid utf-8"),
            },
            CheckError::EmptyInput {
                path: PathBuf::from("list.txt"),
            },
            CheckError::OpenDir {
                path: PathBuf::from("dir"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            },
            CheckError::PipeCreate {
                source: io::Error::new(io::ErrorKind::Other, "pipe"),
            },
            CheckError::Spawn {
                program: PathBuf::from("file"),
                source: io::Error::new(io::ErrorKind::NotFound, "missing"),
            },
            CheckError::CaptureRead {
                source: io::Error::new(io::ErrorKind::BrokenPipe, "broken"),
            },
            CheckError::Wait {
                source: io::Error::new(io::ErrorKind::Other, "wait"),
            },
            CheckError::ParseCountMismatch {
                expected: 3,
                actual: 2,
            },
            CheckError::SignalSetup {
                source: io::Error::new(io::ErrorKind::Other, "sig"),
            },
        ]
    }

    // ===== exit_code() tests =====

    #[test]
    fn test_exit_codes_are_distinct_and_nonzero() {
        let codes: HashSet<u8> = sample_errors().iter().map(CheckError::exit_code).collect();
        assert_eq!(codes.len(), sample_errors().len());
        assert!(!codes.contains(&0));
    }

    #[test]
    fn test_exit_code_values_are_stable() {
        let err = CheckError::ParseCountMismatch {
            expected: 1,
            actual: 0,
        };
        assert_eq!(err.exit_code(), 1);
        let err = CheckError::OpenBatch {
            path: PathBuf::from("x"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.exit_code(), 5);
        let err = CheckError::BatchEncoding {
            path: PathBuf::from("x"),
            source: io::Error::new(io::ErrorKind::InvalidData, "invalid utf-8"),
        };
        assert_eq!(err.exit_code(), 6);
        let err = CheckError::EmptyInput {
            path: PathBuf::from("x"),
        };
        assert_eq!(err.exit_code(), 10);
    }

    // ===== Display tests =====

    #[test]
    fn test_open_batch_message_names_the_path() {
        let err = CheckError::OpenBatch {
            path: PathBuf::from("paths.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "cannot open file 'paths.txt'");
    }

    #[test]
    fn test_count_mismatch_message_carries_both_counts() {
        let err = CheckError::ParseCountMismatch {
            expected: 4,
            actual: 6,
        };
        assert_eq!(
            err.to_string(),
            "detector produced 6 output line(s) for 4 input file(s)"
        );
    }

    #[test]
    fn test_source_chain_is_preserved() {
        let err = CheckError::Spawn {
            program: PathBuf::from("file"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such program"),
        };
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("no such program"));
    }
}
