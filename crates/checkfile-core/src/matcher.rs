//! Extension-versus-content decision logic
//!
//! One detector line plus one path goes in, one [`Outcome`] comes out. The
//! decision is purely positional: the line is trusted to describe the path
//! it was paired with, and the only filesystem access is a readability
//! probe when the detector reports a failure.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::fs::FileSystem;

/// MIME subtypes the audit knows how to check, in help-text order.
///
/// `jpg` and `jpeg` are both listed because detectors and file names
/// disagree on the spelling; [`extensions_match`] treats them as one type.
pub const SUPPORTED_SUBTYPES: [&str; 8] = [
    "pdf", "gif", "jpg", "jpeg", "png", "mp4", "zip", "html",
];

/// Substring marking a detector line that reports a failure instead of a
/// type, e.g. `cannot open 'x' (No such file or directory)`.
const FAILURE_MARKER: &str = "cannot";

/// Substring marking a directory entry, e.g. `inode/directory`.
const DIRECTORY_MARKER: &str = "/directory";

/// Terminal classification for one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The name's extension agrees with the detected subtype.
    Ok { extension: String, subtype: String },
    /// Both sides are known but disagree.
    Mismatch { extension: String, subtype: String },
    /// The name carries no extension to compare.
    NoExtension { subtype: String },
    /// The detected subtype is outside [`SUPPORTED_SUBTYPES`]; carries the
    /// full detector line for display.
    Unsupported { line: String },
    /// The file could not be classified; counted in the summary.
    Error { error: FileErrorKind },
    /// Directories are not files to audit; skipped and never counted.
    SkippedDirectory,
}

/// Why a per-file error outcome was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FileErrorKind {
    /// The readability probe failed; `message` is the OS reason.
    Unreadable { message: String },
    /// The path is readable but the detector still failed on it.
    DetectorFailure { line: String },
}

/// Decide the [`Outcome`] for one path from its paired detector line.
///
/// Checks run in order and the first hit is terminal: directory skip,
/// failure marker (disambiguated by probing the path through `fs`),
/// missing extension, unsupported subtype, then the match comparison.
/// A file with no extension is reported as such even when its detected
/// subtype is unsupported.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use checkfile_core::fs::RealFileSystem;
/// use checkfile_core::matcher::{classify, Outcome};
///
/// let outcome = classify(Path::new("report.pdf"), "application/pdf", &RealFileSystem);
/// assert_eq!(
///     outcome,
///     Outcome::Ok {
///         extension: "pdf".into(),
///         subtype: "pdf".into(),
///     }
/// );
/// ```
pub fn classify(path: &Path, detected_line: &str, fs: &dyn FileSystem) -> Outcome {
    if detected_line.contains(DIRECTORY_MARKER) {
        return Outcome::SkippedDirectory;
    }
    if detected_line.contains(FAILURE_MARKER) {
        let error = match fs.probe_readable(path) {
            Err(probe) => FileErrorKind::Unreadable {
                message: probe.to_string(),
            },
            Ok(()) => FileErrorKind::DetectorFailure {
                line: detected_line.to_string(),
            },
        };
        return Outcome::Error { error };
    }

    let subtype = extract_subtype(detected_line);
    let Some(extension) = path.extension().map(|ext| ext.to_string_lossy()) else {
        return Outcome::NoExtension {
            // Lines without a recognizable type/subtype show as-is.
            subtype: subtype.unwrap_or(detected_line).to_string(),
        };
    };
    let Some(subtype) = subtype.filter(|sub| SUPPORTED_SUBTYPES.contains(sub)) else {
        return Outcome::Unsupported {
            line: detected_line.to_string(),
        };
    };

    if extensions_match(&extension, subtype) {
        Outcome::Ok {
            extension: extension.into_owned(),
            subtype: subtype.to_string(),
        }
    } else {
        Outcome::Mismatch {
            extension: extension.into_owned(),
            subtype: subtype.to_string(),
        }
    }
}

/// Case-sensitive equality plus the JPEG interchange: either spelling of
/// the extension matches either detected JPEG subtype. No other pair is
/// interchangeable, so `photo.png` against `jpeg` is still a mismatch.
pub fn extensions_match(extension: &str, subtype: &str) -> bool {
    extension == subtype || (is_jpeg_name(extension) && is_jpeg_name(subtype))
}

fn is_jpeg_name(name: &str) -> bool {
    name == "jpg" || name == "jpeg"
}

/// Extract the MIME subtype from a detector line.
///
/// Any `<path>: ` prefix is stripped first (splitting on the last `: ` so
/// a `/` inside the path never masquerades as the type separator), then
/// the text after the first `/` is cut at `;` and trimmed. Returns `None`
/// when no `type/subtype` shape is present.
fn extract_subtype(line: &str) -> Option<&str> {
    let typed = match line.rfind(": ") {
        Some(idx) => &line[idx + 2..],
        None => line,
    };
    let (_, rest) = typed.split_once('/')?;
    let subtype = match rest.split_once(';') {
        Some((sub, _)) => sub,
        None => rest,
    }
    .trim();
    if subtype.is_empty() { None } else { Some(subtype) }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use proptest::prelude::*;
    use proptest::sample::select;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn classify_never_panics(path in ".*", line in ".*") {
            let _ = classify(Path::new(&path), &line, &MockFileSystem::new());
        }

        #[test]
        fn extensionless_names_always_report_no_extension(
            name in "[a-z0-9_-]{1,12}",
            subtype in "[a-z]{1,8}"
        ) {
            prop_assume!(subtype != "directory" && !subtype.contains("cannot"));
            let outcome = classify(
                Path::new(&name),
                &format!("image/{subtype}"),
                &MockFileSystem::new(),
            );
            prop_assert_eq!(outcome, Outcome::NoExtension { subtype });
        }

        #[test]
        fn supported_pairs_split_into_ok_or_mismatch(
            extension in select(SUPPORTED_SUBTYPES.to_vec()),
            subtype in select(SUPPORTED_SUBTYPES.to_vec())
        ) {
            let outcome = classify(
                Path::new(&format!("f.{extension}")),
                &format!("x/{subtype}"),
                &MockFileSystem::new(),
            );
            let expected = if extensions_match(extension, subtype) {
                Outcome::Ok {
                    extension: extension.to_string(),
                    subtype: subtype.to_string(),
                }
            } else {
                Outcome::Mismatch {
                    extension: extension.to_string(),
                    subtype: subtype.to_string(),
                }
            };
            prop_assert_eq!(outcome, expected);
        }

        #[test]
        fn unknown_subtypes_are_always_unsupported(
            extension in "[a-z0-9]{1,4}",
            subtype in "[a-z]{1,8}"
        ) {
            prop_assume!(!SUPPORTED_SUBTYPES.contains(&subtype.as_str()));
            prop_assume!(subtype != "directory" && !subtype.contains("cannot"));
            let line = format!("application/{subtype}");
            let outcome = classify(
                Path::new(&format!("f.{extension}")),
                &line,
                &MockFileSystem::new(),
            );
            prop_assert_eq!(outcome, Outcome::Unsupported { line });
        }
    }
}
