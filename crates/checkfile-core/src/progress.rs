//! Run progress state shared with the signal thread

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Point-in-time view of the per-file loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Zero-based position of the entry in the resolved set.
    pub index: usize,
    /// Length of the resolved set.
    pub total: usize,
    /// The path being processed.
    pub path: PathBuf,
}

/// Single-writer progress cell.
///
/// The pipeline overwrites the snapshot right before classifying each entry
/// and clears it when the loop finishes; any thread may read. Readers clone
/// the whole snapshot under the lock, so index, total, and path always come
/// from the same write and a torn view is impossible.
#[derive(Debug)]
pub struct ProgressTracker {
    started_at_secs: u64,
    current: Mutex<Option<ProgressSnapshot>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        let started_at_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        Self {
            started_at_secs,
            current: Mutex::new(None),
        }
    }

    /// Unix timestamp (seconds) taken when the tracker was created.
    pub fn started_at_secs(&self) -> u64 {
        self.started_at_secs
    }

    /// Record that `path`, entry `index` of `total`, is being processed.
    pub fn begin_entry(&self, index: usize, total: usize, path: &Path) {
        *self.lock() = Some(ProgressSnapshot {
            index,
            total,
            path: path.to_path_buf(),
        });
    }

    /// Clear the snapshot once the loop is done.
    pub fn finish(&self) {
        *self.lock() = None;
    }

    /// Clone the current snapshot, or `None` when no file is in flight.
    pub fn snapshot(&self) -> Option<ProgressSnapshot> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<ProgressSnapshot>> {
        match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_snapshot_is_none_before_first_entry() {
        let tracker = ProgressTracker::new();
        assert_eq!(tracker.snapshot(), None);
    }

    #[test]
    fn test_begin_entry_overwrites_previous_snapshot() {
        let tracker = ProgressTracker::new();
        tracker.begin_entry(0, 3, Path::new("a.pdf"));
        tracker.begin_entry(1, 3, Path::new("b.png"));
        assert_eq!(
            tracker.snapshot(),
            Some(ProgressSnapshot {
                index: 1,
                total: 3,
                path: PathBuf::from("b.png"),
            })
        );
    }

    #[test]
    fn test_finish_clears_snapshot() {
        let tracker = ProgressTracker::new();
        tracker.begin_entry(0, 1, Path::new("a.pdf"));
        tracker.finish();
        assert_eq!(tracker.snapshot(), None);
    }

    #[test]
    fn test_started_at_is_a_plausible_unix_time() {
        let tracker = ProgressTracker::new();
        // 2021-01-01 in epoch seconds; anything earlier means a bogus clock.
        assert!(tracker.started_at_secs() > 1_609_459_200);
    }

    #[test]
    fn test_concurrent_reader_never_sees_torn_snapshot() {
        let tracker = Arc::new(ProgressTracker::new());
        let done = Arc::new(AtomicBool::new(false));

        let reader = {
            let tracker = Arc::clone(&tracker);
            let done = Arc::clone(&done);
            std::thread::spawn(move || {
                while !done.load(Ordering::Acquire) {
                    if let Some(snapshot) = tracker.snapshot() {
                        // Fields written together must be read together.
                        assert_eq!(snapshot.total, 100);
                        assert_eq!(
                            snapshot.path,
                            PathBuf::from(format!("file-{}", snapshot.index))
                        );
                    }
                }
            })
        };

        for index in 0..100 {
            tracker.begin_entry(index, 100, Path::new(&format!("file-{index}")));
        }
        tracker.finish();
        done.store(true, Ordering::Release);
        reader.join().unwrap();
    }
}
