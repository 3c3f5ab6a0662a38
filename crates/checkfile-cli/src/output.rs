//! Console and JSON rendering for run reports.

use anyhow::Context;
use checkfile_core::{FileReport, Outcome, ReportSink, RunReport, Summary};
use colored::Colorize;

/// Streams each report line as the run produces it.
///
/// Error lines go to stderr, every other line to stdout, so a redirected
/// report stream stays clean while failures remain visible.
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn on_file(&mut self, report: &FileReport) {
        let Some(line) = report.render() else {
            return;
        };
        let line = colorize_tag(&line, &report.outcome);
        if report.is_error() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}

/// Color the leading `[TAG]` by outcome. `colored` drops the escapes when
/// the stream is not a terminal, so redirected output stays byte-stable.
fn colorize_tag(line: &str, outcome: &Outcome) -> String {
    let Some(end) = line.find(']') else {
        return line.to_string();
    };
    let (tag, rest) = line.split_at(end + 1);
    let tag = match outcome {
        Outcome::Ok { .. } => tag.green().bold(),
        Outcome::Mismatch { .. } => tag.red().bold(),
        Outcome::NoExtension { .. } => tag.cyan().bold(),
        Outcome::Unsupported { .. } => tag.yellow().bold(),
        Outcome::Error { .. } => tag.red().bold(),
        Outcome::SkippedDirectory => return line.to_string(),
    };
    format!("{tag}{rest}")
}

pub fn print_summary(summary: &Summary) {
    let line = summary.render();
    match line.split_once(']') {
        Some((tag, rest)) => {
            let tag = format!("{tag}]");
            println!("{}{rest}", tag.bold());
        }
        None => println!("{line}"),
    }
}

pub fn print_json(report: &RunReport) -> anyhow::Result<()> {
    let payload = serde_json::to_string_pretty(report).context("serializing run report")?;
    println!("{payload}");
    Ok(())
}
