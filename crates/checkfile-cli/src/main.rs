//! checkfile command line entry point.
//!
//! Wiring order:
//! 1. Parse arguments (clap owns usage errors and exits 2)
//! 2. Install the tracing subscriber (stderr, `RUST_LOG`-filtered)
//! 3. Print the PID banner so an operator can address the run with signals
//! 4. Resolve inputs, start the signal thread, run the audit
//! 5. Render text or JSON, then exit 0 or the failure's category code

mod output;
mod signals;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use checkfile_core::{
    CheckError, DEFAULT_DETECTOR, DetectorCommand, DiscardSink, InputSource, MAX_EXPLICIT_FILES,
    ProgressTracker, RealFileSystem, SUPPORTED_SUBTYPES, resolve,
};
use clap::{ArgGroup, CommandFactory, Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "checkfile",
    version,
    about = "Audit file name extensions against content-detected types",
    group(ArgGroup::new("input").required(true).multiple(false)),
    after_help = supported_types_help(),
)]
struct Cli {
    /// File to analyze; may be repeated up to 10 times
    #[arg(short, long, value_name = "PATH", group = "input")]
    file: Vec<PathBuf>,

    /// Text file naming one input path per line
    #[arg(short, long, value_name = "PATH", group = "input")]
    batch: Option<PathBuf>,

    /// Directory whose immediate entries are analyzed (not recursive)
    #[arg(short, long, value_name = "PATH", group = "input")]
    dir: Option<PathBuf>,

    /// Content-type detector executable to invoke
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_DETECTOR)]
    detector: PathBuf,

    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Rendering selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable lines, colorized on a terminal
    Text,
    /// One JSON document carrying every file outcome and the summary
    Json,
}

impl Cli {
    /// Exactly one mode is set; the argument group guarantees it.
    fn input_source(&self) -> InputSource {
        if let Some(batch) = &self.batch {
            InputSource::Batch(batch.clone())
        } else if let Some(dir) = &self.dir {
            InputSource::Dir(dir.clone())
        } else {
            InputSource::Files(self.file.clone())
        }
    }
}

fn supported_types_help() -> String {
    let mut help = String::from("Supported file types:");
    for subtype in SUPPORTED_SUBTYPES {
        help.push_str("\n  .");
        help.push_str(subtype);
    }
    help
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    // clap has no occurrence cap for repeated flags; enforce the limit
    // here with a standard usage error.
    if cli.file.len() > MAX_EXPLICIT_FILES {
        let mut command = Cli::command();
        command
            .error(
                clap::error::ErrorKind::TooManyValues,
                format!("at most {MAX_EXPLICIT_FILES} --file paths per run"),
            )
            .exit();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[ERROR] {err:#}");
            let code = err
                .downcast_ref::<CheckError>()
                .map_or(1, CheckError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    // Printed before any work so signals can be aimed at the run from
    // another terminal. JSON mode keeps stdout a single parseable
    // document, so the banner moves to stderr there.
    let banner = format!("[INFO] PID: '{}'", std::process::id());
    match cli.format {
        OutputFormat::Text => println!("{banner}"),
        OutputFormat::Json => eprintln!("{banner}"),
    }

    let input = resolve(cli.input_source())?;
    tracing::debug!(files = input.len(), batch = input.is_batch(), "input resolved");

    let tracker = Arc::new(ProgressTracker::new());
    let monitor = signals::SignalMonitor::start(Arc::clone(&tracker), input.is_batch())?;

    let detector = DetectorCommand::with_program(&cli.detector);
    let report = match cli.format {
        OutputFormat::Text => {
            let mut sink = output::ConsoleSink;
            checkfile_core::run(&input, &detector, &RealFileSystem, &tracker, &mut sink)?
        }
        OutputFormat::Json => {
            checkfile_core::run(&input, &detector, &RealFileSystem, &tracker, &mut DiscardSink)?
        }
    };
    monitor.shutdown();

    // Always after the full per-file loop.
    match cli.format {
        OutputFormat::Text => output::print_summary(&report.summary),
        OutputFormat::Json => output::print_json(&report)?,
    }
    Ok(())
}
