//! Narrow filesystem boundary the engine runs against. Everything the core
//! needs from the OS goes through [`Filesystem`], so the classification and
//! resolution logic can be driven over any directory tree handed to it.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Immutable snapshot of a file taken at listing time. May go stale if the
/// tree changes underneath a run; the delete path tolerates that.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

pub trait Filesystem {
    fn is_directory(&self, path: &Path) -> bool;

    /// Immediate subdirectories, or every subdirectory at any depth when
    /// `recursive` is set. The path itself is never part of the result.
    fn list_subdirectories(&self, path: &Path, recursive: bool) -> Result<Vec<PathBuf>>;

    /// Immediate files only, with their byte lengths.
    fn list_files(&self, path: &Path) -> Result<Vec<FileEntry>>;

    fn delete_file(&self, path: &Path) -> std::io::Result<()>;

    /// Recursive directory delete.
    fn delete_directory(&self, path: &Path) -> std::io::Result<()>;
}

/// [`Filesystem`] backed by `std::fs` and walkdir.
#[derive(Debug, Default)]
pub struct RealFilesystem;

impl Filesystem for RealFilesystem {
    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_subdirectories(&self, path: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();

        if recursive {
            for entry in WalkDir::new(path).min_depth(1) {
                let entry = entry.map_err(std::io::Error::from)?;
                if entry.file_type().is_dir() {
                    dirs.push(entry.into_path());
                }
            }
        } else {
            for entry in fs::read_dir(path)? {
                let entry = entry?;
                if entry.file_type()?.is_dir() {
                    dirs.push(entry.path());
                }
            }
        }

        dirs.sort();
        Ok(dirs)
    }

    fn list_files(&self, path: &Path) -> Result<Vec<FileEntry>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let metadata = entry.metadata()?;
            files.push(FileEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.path(),
                size_bytes: metadata.len(),
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    fn delete_file(&self, path: &Path) -> std::io::Result<()> {
        fs::remove_file(path)
    }

    fn delete_directory(&self, path: &Path) -> std::io::Result<()> {
        fs::remove_dir_all(path)
    }
}
