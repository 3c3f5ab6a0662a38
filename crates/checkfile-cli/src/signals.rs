//! Operator signal handling: quit acknowledgement and progress queries.
//!
//! Signals are consumed on a dedicated thread through `signal-hook`'s
//! iterator, so reporting happens in ordinary code instead of inside an
//! async-signal handler. The thread shares the [`ProgressTracker`] with
//! the run loop and reads a whole snapshot at a time; what it prints is
//! always one file's index paired with that same file's path.
//!
//! SIGQUIT is acknowledged in every mode without exiting; SIGINT keeps its
//! default disposition and remains the way to stop the process. SIGUSR1
//! progress queries are only registered for batch runs and leave their
//! default disposition (terminate) otherwise.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use checkfile_core::{CheckError, CheckResult, ProgressSnapshot, ProgressTracker};
use signal_hook::consts::signal::{SIGQUIT, SIGUSR1};
use signal_hook::iterator::SignalsInfo;
use signal_hook::iterator::exfiltrator::WithOrigin;

/// Background signal consumer for the lifetime of one run.
pub struct SignalMonitor {
    handle: signal_hook::iterator::backend::Handle,
    thread: Option<JoinHandle<()>>,
}

impl SignalMonitor {
    /// Register the watched signals and spawn the consumer thread.
    pub fn start(tracker: Arc<ProgressTracker>, batch_mode: bool) -> CheckResult<Self> {
        let mut watched = vec![SIGQUIT];
        if batch_mode {
            watched.push(SIGUSR1);
        }
        let mut signals = SignalsInfo::<WithOrigin>::new(&watched)
            .map_err(|source| CheckError::SignalSetup { source })?;
        let handle = signals.handle();

        let thread = thread::spawn(move || {
            for origin in &mut signals {
                match origin.signal {
                    SIGQUIT => {
                        let sender = origin.process.map(|process| process.pid).unwrap_or(0);
                        println!("{}", quit_notice(sender));
                    }
                    SIGUSR1 => {
                        let snapshot = tracker.snapshot();
                        println!(
                            "{}",
                            progress_report(tracker.started_at_secs(), snapshot.as_ref())
                        );
                    }
                    _ => {}
                }
            }
        });

        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }

    /// Unregister the handlers and join the thread.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for SignalMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

fn quit_notice(sender_pid: i32) -> String {
    format!(
        "Captured SIGQUIT signal (sent by PID: {sender_pid}). \
         Use SIGINT to terminate the application."
    )
}

fn progress_report(started_at_secs: u64, snapshot: Option<&ProgressSnapshot>) -> String {
    let mut text = format!(
        "Captured SIGUSR1 signal.\nStarted processing at: {started_at_secs} (unix epoch seconds)\n"
    );
    match snapshot {
        Some(current) => {
            text.push_str(&format!(
                "Processing file number '{}' -- '{}'.",
                current.index,
                current.path.display()
            ));
        }
        None => text.push_str("No file is currently being processed."),
    }
    text
}
