//! # checkfile-core
//!
//! Classification engine for the `checkfile` audit tool.
//!
//! A run takes an ordered set of input paths (explicit list, batch file,
//! or directory), invokes an external `file(1)`-compatible detector once
//! over the whole set, pairs the detector's line-per-file output with the
//! inputs positionally, and classifies each file:
//! - OK: the name's extension matches the detected subtype
//! - MISMATCH: both known, but they disagree
//! - NO_EXT: the name has no extension to compare
//! - UNSUPPORTED: the detected type is outside the audited set
//! - ERROR: the file could not be classified
//! - skipped: directories, which produce no report at all
//!
//! Results aggregate into a [`Summary`] whose category counters always sum
//! to the analyzed total. The `checkfile` binary in `checkfile-cli` owns
//! the argument surface, console rendering, and signal wiring on top of
//! this crate.

pub mod detector;
pub mod diagnostics;
pub mod fs;
pub mod matcher;
pub mod parse;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod resolve;

pub use detector::{DEFAULT_DETECTOR, DetectorCommand, DetectorOutput};
pub use diagnostics::{CheckError, CheckResult};
pub use fs::{FileSystem, RealFileSystem};
pub use matcher::{FileErrorKind, Outcome, SUPPORTED_SUBTYPES, classify, extensions_match};
pub use parse::split_detector_lines;
pub use pipeline::{CollectSink, DiscardSink, ReportSink, run};
pub use progress::{ProgressSnapshot, ProgressTracker};
pub use report::{FileReport, RunReport, Summary};
pub use resolve::{InputSource, MAX_EXPLICIT_FILES, ResolvedInput, resolve};
