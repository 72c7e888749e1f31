//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core
//! services. The intent is to avoid reading process-wide environment variables
//! during request handling, which can lead to inconsistent behaviour in
//! multi-threaded runtimes and test harnesses.

use crate::constants::UPDATES_DIR_NAME;
use crate::{UpdateError, UpdateResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The data directory must already exist; the `updates/` subdirectory is
    /// created lazily by the store on first write.
    pub fn new(data_dir: PathBuf) -> UpdateResult<Self> {
        if !data_dir.is_dir() {
            return Err(UpdateError::InvalidInput(format!(
                "data directory does not exist: {}",
                data_dir.display()
            )));
        }
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn updates_dir(&self) -> PathBuf {
        self.data_dir.join(UPDATES_DIR_NAME)
    }
}
