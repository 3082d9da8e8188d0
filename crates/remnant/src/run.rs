//! The run orchestrator: one staged pipeline per mode.
//!
//! `validate root → enumerate subdirectories → keep leaves → resolve
//! candidates`, then — unless this is a preview — append the run log and
//! delete, both hanging off the success path. A failure at any stage stops
//! everything after it, and an empty candidate set is itself a (silent)
//! failure, so logging and deletion can never run for an empty run.

use std::path::{Path, PathBuf};

use crate::config::CleanupConfig;
use crate::fs::Filesystem;
use crate::outcome::Outcome;
use crate::resolve::{resolve, CandidateKind, CandidateSet};
use crate::runlog;
use crate::scan::{filter_leaf_directories, list_directories, validate_root};

#[derive(Debug)]
pub struct RunReport {
    pub candidates: CandidateSet,
    pub deleted: usize,
    pub reclaimed_bytes: u64,
    pub log_path: Option<PathBuf>,
}

pub struct Runner<'a> {
    fs: &'a dyn Filesystem,
    config: &'a CleanupConfig,
}

impl<'a> Runner<'a> {
    pub fn new(fs: &'a dyn Filesystem, config: &'a CleanupConfig) -> Self {
        Self { fs, config }
    }

    /// Scan and classify only. Returns the validated root together with the
    /// candidate set so a caller can confirm before committing.
    pub fn plan(&self, root: &str) -> Outcome<(PathBuf, CandidateSet)> {
        validate_root(self.fs, root).bind(|root_dir| {
            list_directories(self.fs, &root_dir, true)
                .bind(|dirs| filter_leaf_directories(self.fs, self.config, dirs))
                .bind(|leaves| resolve(self.fs, self.config, &leaves))
                .bind(move |set| Outcome::success((root_dir, set)))
        })
    }

    /// Log and delete a computed candidate set.
    pub fn commit(&self, root_dir: &Path, set: CandidateSet) -> Outcome<RunReport> {
        let log_path = root_dir.join(&self.config.log_file);

        Outcome::success(set)
            .try_tee(|set| self.append_log(&log_path, set))
            .bind(|set| match self.delete_candidates(&set) {
                Ok((deleted, reclaimed_bytes)) => Outcome::success(RunReport {
                    candidates: set,
                    deleted,
                    reclaimed_bytes,
                    log_path: Some(log_path),
                }),
                Err(err) => Outcome::failure(err),
            })
    }

    /// The full pipeline. A preview run stops after planning: zero deletions,
    /// zero log writes, same candidate set.
    pub fn execute(&self, root: &str) -> Outcome<RunReport> {
        self.plan(root).bind(|(root_dir, set)| {
            if self.config.preview {
                return Outcome::success(RunReport {
                    candidates: set,
                    deleted: 0,
                    reclaimed_bytes: 0,
                    log_path: None,
                });
            }
            self.commit(&root_dir, set)
        })
    }

    fn append_log(&self, log_path: &Path, set: &CandidateSet) -> crate::Result<()> {
        let label = format!("{} cleanup", self.config.mode);
        let items: Vec<String> = set
            .items
            .iter()
            .map(|candidate| candidate.path.display().to_string())
            .collect();
        runlog::append_run(log_path, &label, &items)
    }

    /// Deletes in candidate order. A candidate that vanished since listing is
    /// tolerated per item; any other OS error aborts the batch.
    fn delete_candidates(&self, set: &CandidateSet) -> crate::Result<(usize, u64)> {
        let mut deleted = 0;
        let mut reclaimed = 0;

        for candidate in &set.items {
            let result = match set.kind {
                CandidateKind::Files => self.fs.delete_file(&candidate.path),
                CandidateKind::Directories => self.fs.delete_directory(&candidate.path),
            };

            match result {
                Ok(()) => {
                    log::info!("Deleted {}", candidate.path.display());
                    deleted += 1;
                    reclaimed += candidate.size_bytes;
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    log::warn!("Already gone: {}", candidate.path.display());
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok((deleted, reclaimed))
    }
}
