//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! core services. The intent is to avoid reading process-wide environment
//! variables during request handling, which can lead to inconsistent
//! behaviour in multi-threaded runtimes and test harnesses.

use std::path::{Path, PathBuf};

/// Default data directory when `CONSULT_DATA_DIR` is not set.
pub const DEFAULT_CONSULT_DATA_DIR: &str = "./consult_data";

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    consult_data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig` rooted at the given data directory.
    pub fn new(consult_data_dir: PathBuf) -> Self {
        Self { consult_data_dir }
    }

    pub fn consult_data_dir(&self) -> &Path {
        &self.consult_data_dir
    }

    /// Directory holding one JSON document per consult.
    pub fn consults_dir(&self) -> PathBuf {
        self.consult_data_dir.join("consults")
    }
}
