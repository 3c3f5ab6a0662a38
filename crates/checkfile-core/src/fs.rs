//! Filesystem abstraction for dependency injection in the matcher.
//!
//! The matcher only touches the filesystem to tell an unreadable path apart
//! from a readable file the detector could not classify. That single probe
//! sits behind a `FileSystem` trait so the decision logic can be tested
//! without staging real files.
//!
//! Production code uses `RealFileSystem`:
//!
//! ```ignore
//! let fs = RealFileSystem;
//! fs.probe_readable(Path::new("photo.jpg"))?;
//! ```
//!
//! Test code can use `MockFileSystem` to simulate either answer:
//!
//! ```ignore
//! let mut mock = MockFileSystem::new();
//! mock.add_readable("photo.jpg");
//! mock.add_unreadable("locked.pdf");
//! ```

use std::fs::File;
use std::io;
use std::path::Path;

/// Trait abstracting the readability probe used for error reporting.
pub trait FileSystem: Send + Sync + std::fmt::Debug {
    /// Try to open `path` for reading, discarding the handle on success.
    ///
    /// The returned error carries the OS-level reason (not found, permission
    /// denied, ...) that ends up in the per-file error line.
    fn probe_readable(&self, path: &Path) -> io::Result<()>;
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn probe_readable(&self, path: &Path) -> io::Result<()> {
        File::open(path).map(|_| ())
    }
}

#[cfg(test)]
pub mod mock {
    //! Mock filesystem for testing the matcher without real files.

    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// In-memory readability map.
    ///
    /// Paths registered with [`add_readable`] probe as openable, paths
    /// registered with [`add_unreadable`] fail with `PermissionDenied`, and
    /// everything else fails with `NotFound`.
    ///
    /// [`add_readable`]: MockFileSystem::add_readable
    /// [`add_unreadable`]: MockFileSystem::add_unreadable
    #[derive(Debug, Default)]
    pub struct MockFileSystem {
        entries: HashMap<PathBuf, bool>,
    }

    impl MockFileSystem {
        /// Create a new empty mock filesystem.
        pub fn new() -> Self {
            Self::default()
        }

        /// Register a path whose probe succeeds.
        pub fn add_readable(&mut self, path: impl Into<PathBuf>) -> &mut Self {
            self.entries.insert(path.into(), true);
            self
        }

        /// Register a path whose probe fails with `PermissionDenied`.
        pub fn add_unreadable(&mut self, path: impl Into<PathBuf>) -> &mut Self {
            self.entries.insert(path.into(), false);
            self
        }
    }

    impl FileSystem for MockFileSystem {
        fn probe_readable(&self, path: &Path) -> io::Result<()> {
            match self.entries.get(path) {
                Some(true) => Ok(()),
                Some(false) => Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "Permission denied",
                )),
                None => Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    "No such file or directory",
                )),
            }
        }
    }
}
