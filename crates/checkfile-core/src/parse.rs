//! Positional pairing of detector output with input paths

use crate::diagnostics::{CheckError, CheckResult};

/// Split a merged capture into exactly `expected` lines, one per input.
///
/// A single trailing newline is the detector terminating its last line and
/// is not counted. Any other difference between line count and input count
/// means the pairing cannot be trusted, and the run aborts rather than
/// attribute results to the wrong files.
pub fn split_detector_lines(raw: &str, expected: usize) -> CheckResult<Vec<&str>> {
    let mut lines: Vec<&str> = if raw.is_empty() {
        Vec::new()
    } else {
        raw.split('\n').collect()
    };
    if lines.last() == Some(&"") {
        lines.pop();
    }
    if lines.len() != expected {
        return Err(CheckError::ParseCountMismatch {
            expected,
            actual: lines.len(),
        });
    }
    Ok(lines)
}
