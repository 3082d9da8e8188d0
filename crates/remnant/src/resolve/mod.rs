//! Per-mode orphan resolution. A leaf directory's files are split into
//! `main` (primary media: big enough, or a recognized media extension) and
//! `extra` (artwork, subtitles, metadata); the mode then decides what a
//! deletion candidate is — individual orphaned extras for TV, whole
//! directories for Movies and Music.

pub mod normalize;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{CleanupConfig, Mode};
use crate::error::{RemnantError, Result};
use crate::fs::{FileEntry, Filesystem};
use crate::outcome::Outcome;
use crate::scan::directory_size;
use crate::util::format_bytes;

use normalize::normalize_stem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    Files,
    Directories,
}

#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub path: PathBuf,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateSet {
    pub kind: CandidateKind,
    pub items: Vec<Candidate>,
}

impl CandidateSet {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.items.iter().map(|item| item.size_bytes).sum()
    }
}

#[derive(Debug)]
pub struct Partition {
    pub main: Vec<FileEntry>,
    pub extra: Vec<FileEntry>,
}

/// A file is main iff it is larger than the mode threshold (compared in the
/// mode's unit) or carries a recognized media extension.
pub fn is_main_file(config: &CleanupConfig, file: &FileEntry) -> bool {
    if config.size_in_units(file.size_bytes) > config.threshold_in_units() {
        return true;
    }
    Path::new(&file.name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| config.is_media_extension(ext))
        .unwrap_or(false)
}

pub fn partition_files(config: &CleanupConfig, files: Vec<FileEntry>) -> Partition {
    let (main, extra) = files
        .into_iter()
        .partition(|file| is_main_file(config, file));
    Partition { main, extra }
}

// `folder.jpg` and friends are reusable default artwork and invisible to
// resolution entirely; so are files matching an exclude glob.
fn eligible_files(config: &CleanupConfig, files: Vec<FileEntry>) -> Vec<FileEntry> {
    files
        .into_iter()
        .filter(|file| !file.name.starts_with("folder"))
        .filter(|file| !config.is_excluded(&file.path))
        .collect()
}

/// An extra is orphaned iff no main file's name contains its normalized stem.
/// With no main files at all there is nothing to protect.
pub fn is_orphan(extra: &FileEntry, main: &[FileEntry]) -> bool {
    let stem = match Path::new(&extra.name).file_stem() {
        Some(stem) => stem.to_string_lossy(),
        None => return true,
    };
    let base = normalize_stem(&stem);
    !main.iter().any(|file| file.name.contains(base))
}

/// Reduce the leaf set to this mode's deletion candidates, sorted by path.
pub fn resolve(
    fs: &dyn Filesystem,
    config: &CleanupConfig,
    leaves: &[PathBuf],
) -> Outcome<CandidateSet> {
    let collected = match config.mode {
        Mode::Movies => undersized_directories(fs, config, leaves),
        Mode::Tv => orphaned_files(fs, config, leaves),
        Mode::Music => orphaned_directories(fs, config, leaves),
    };

    let mut items = match collected {
        Ok(items) => items,
        Err(err) => return Outcome::failure(err),
    };

    if items.is_empty() {
        return Outcome::failure(match config.mode {
            Mode::Tv => RemnantError::FilesNotFound,
            Mode::Movies | Mode::Music => RemnantError::SubdirectoriesBelowThresholdDoNotExist,
        });
    }

    items.sort_by(|a, b| a.path.cmp(&b.path));

    let kind = match config.mode {
        Mode::Tv => CandidateKind::Files,
        Mode::Movies | Mode::Music => CandidateKind::Directories,
    };
    let set = CandidateSet { kind, items };
    let summary = format!(
        "{} candidates, {}",
        set.len(),
        format_bytes(set.total_bytes())
    );
    Outcome::success(set).note(summary)
}

/// Movies: the whole leaf is a candidate iff its top-level size, in
/// megabytes, is strictly below the threshold.
fn undersized_directories(
    fs: &dyn Filesystem,
    config: &CleanupConfig,
    leaves: &[PathBuf],
) -> Result<Vec<Candidate>> {
    let mut candidates = Vec::new();

    for leaf in leaves {
        let total = directory_size(fs, leaf)?;
        if config.size_in_units(total) < config.threshold_in_units() {
            candidates.push(Candidate {
                path: leaf.clone(),
                size_bytes: total,
            });
        }
    }

    Ok(candidates)
}

/// TV: every extra whose normalized stem survives in no main file's name.
fn orphaned_files(
    fs: &dyn Filesystem,
    config: &CleanupConfig,
    leaves: &[PathBuf],
) -> Result<Vec<Candidate>> {
    let mut candidates = Vec::new();

    for leaf in leaves {
        let files = eligible_files(config, fs.list_files(leaf)?);
        let partition = partition_files(config, files);

        for extra in partition.extra {
            if is_orphan(&extra, &partition.main) {
                candidates.push(Candidate {
                    path: extra.path,
                    size_bytes: extra.size_bytes,
                });
            }
        }
    }

    Ok(candidates)
}

/// Music: the whole leaf is a candidate iff the audio is gone entirely.
fn orphaned_directories(
    fs: &dyn Filesystem,
    config: &CleanupConfig,
    leaves: &[PathBuf],
) -> Result<Vec<Candidate>> {
    let mut candidates = Vec::new();

    for leaf in leaves {
        let files = eligible_files(config, fs.list_files(leaf)?);
        let partition = partition_files(config, files);

        if partition.main.is_empty() {
            candidates.push(Candidate {
                path: leaf.clone(),
                size_bytes: directory_size(fs, leaf)?,
            });
        }
    }

    Ok(candidates)
}
