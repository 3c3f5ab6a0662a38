//! Run orchestration: invoke, pair, classify, aggregate
//!
//! [`run`] is the whole audit after input resolution: one detector
//! invocation, a strict positional pairing of its output, then a per-file
//! classification loop that feeds the report sink, the progress tracker,
//! and the summary.

use crate::detector::DetectorCommand;
use crate::diagnostics::CheckResult;
use crate::fs::FileSystem;
use crate::matcher::classify;
use crate::parse::split_detector_lines;
use crate::progress::ProgressTracker;
use crate::report::{FileReport, RunReport, Summary};
use crate::resolve::ResolvedInput;

/// Receives each per-file report as the loop produces them.
///
/// The CLI streams lines to the console through this seam; tests collect
/// reports instead. Results also come back in the returned [`RunReport`],
/// so a sink only matters when output must appear while the loop runs.
pub trait ReportSink {
    fn on_file(&mut self, report: &FileReport);
}

/// Sink that drops every report; callers read the [`RunReport`] instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl ReportSink for DiscardSink {
    fn on_file(&mut self, _report: &FileReport) {}
}

/// Sink that keeps every report in order.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub reports: Vec<FileReport>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for CollectSink {
    fn on_file(&mut self, report: &FileReport) {
        self.reports.push(report.clone());
    }
}

/// Classify every resolved entry and aggregate the run summary.
///
/// The detector runs exactly once, before the loop; an empty input set
/// short-circuits to an all-zero report without spawning it. Fatal
/// conditions (spawn, capture, pairing) abort before any per-file report
/// is produced, so partial output below a summary line cannot happen.
pub fn run(
    input: &ResolvedInput,
    detector: &DetectorCommand,
    fs: &dyn FileSystem,
    tracker: &ProgressTracker,
    sink: &mut dyn ReportSink,
) -> CheckResult<RunReport> {
    if input.is_empty() {
        tracing::info!("no files to analyze");
        return Ok(RunReport {
            files: Vec::new(),
            summary: Summary::default(),
        });
    }

    let output = detector.invoke(input)?;
    let lines = split_detector_lines(&output.raw, input.len())?;

    let total = input.len();
    let mut files = Vec::with_capacity(total);
    let mut summary = Summary::default();
    for (index, (path, line)) in input.paths().iter().zip(lines).enumerate() {
        tracker.begin_entry(index, total, path);
        let report = FileReport {
            path: path.clone(),
            outcome: classify(path, line, fs),
        };
        summary.record(&report.outcome);
        sink.on_file(&report);
        files.push(report);
    }
    tracker.finish();
    debug_assert!(summary.is_consistent());

    Ok(RunReport { files, summary })
}
