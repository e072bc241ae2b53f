// src/batch.rs
//! Sequential batch encrypt/decrypt over a list of files
//!
//! Each file is transformed independently. A failure is recorded as that
//! file's outcome and the batch moves on; nothing here aborts the run.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::{transform_file, KeyMaterial};
use crate::enums::{CipherMode, WriteMode};
use crate::error::CoreError;

/// Result of one file in a batch
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Bytes written on success
    pub result: Result<u64, CoreError>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&CoreError> {
        self.result.as_ref().err()
    }
}

/// Progress snapshot passed to the callback after each file
#[derive(Debug, Clone, Copy)]
pub struct BatchProgress<'a> {
    pub processed: usize,
    pub total: usize,
    pub path: &'a Path,
    pub succeeded: bool,
}

/// All outcomes of a batch, in input order
#[derive(Debug)]
pub struct BatchReport {
    pub mode: CipherMode,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchProcessor {
    write_mode: WriteMode,
}

impl BatchProcessor {
    pub fn new(write_mode: WriteMode) -> Self {
        Self { write_mode }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.batch.write_mode)
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Transform every path in order, without progress reporting
    pub fn run<P: AsRef<Path>>(&self, paths: &[P], key: &KeyMaterial, mode: CipherMode) -> BatchReport {
        self.run_with_progress(paths, key, mode, |_| {})
    }

    /// Transform every path in order, calling `on_progress` after each file
    pub fn run_with_progress<P, F>(
        &self,
        paths: &[P],
        key: &KeyMaterial,
        mode: CipherMode,
        mut on_progress: F,
    ) -> BatchReport
    where
        P: AsRef<Path>,
        F: FnMut(BatchProgress<'_>),
    {
        let total = paths.len();
        info!(%mode, total, write_mode = ?self.write_mode, "starting batch");

        let mut outcomes = Vec::with_capacity(total);
        for (idx, path) in paths.iter().enumerate() {
            let path = path.as_ref();
            let result = transform_file(path, key, mode, self.write_mode);

            match &result {
                Ok(bytes) => debug!(path = %path.display(), bytes, "{mode}ed {}/{total}", idx + 1),
                Err(e) => warn!(path = %path.display(), error = %e, "{mode} failed {}/{total}", idx + 1),
            }

            on_progress(BatchProgress {
                processed: idx + 1,
                total,
                path,
                succeeded: result.is_ok(),
            });
            outcomes.push(FileOutcome {
                path: path.to_path_buf(),
                result,
            });
        }

        let report = BatchReport { mode, outcomes };
        info!(
            %mode,
            succeeded = report.succeeded(),
            failed = report.failed(),
            "batch complete"
        );
        report
    }
}
