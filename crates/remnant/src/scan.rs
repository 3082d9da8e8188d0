//! Directory classification: root validation, subdirectory enumeration and
//! leaf-folder detection. Leaf folders (no subdirectories apart from
//! dot-named ones) are where media files are expected to live, so they are
//! the unit everything downstream works on.

use std::path::{Path, PathBuf};

use crate::config::CleanupConfig;
use crate::error::{RemnantError, Result};
use crate::fs::Filesystem;
use crate::outcome::Outcome;

/// Dot-named directories (`.thumbnails`, `.actors`) are invisible to leaf
/// detection and never become candidates themselves.
pub fn is_special(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Checks the path string before touching the filesystem, then requires an
/// existing directory there.
pub fn validate_root(fs: &dyn Filesystem, raw: &str) -> Outcome<PathBuf> {
    if raw.trim().is_empty() {
        return Outcome::failure(RemnantError::PathNameCannotBeEmpty);
    }

    let path = PathBuf::from(raw);
    if !fs.is_directory(&path) {
        return Outcome::failure(RemnantError::DirectoryNotFound(path));
    }

    Outcome::success(path)
}

pub fn list_directories(
    fs: &dyn Filesystem,
    path: &Path,
    recursive: bool,
) -> Outcome<Vec<PathBuf>> {
    match fs.list_subdirectories(path, recursive) {
        Ok(dirs) if dirs.is_empty() => Outcome::failure(RemnantError::SubdirectoriesDoNotExist),
        Ok(dirs) => Outcome::success(dirs),
        Err(err) => Outcome::failure(err),
    }
}

/// True iff the directory has no subdirectories once dot-named ones are
/// excluded. A folder holding only `.thumbnails` still counts as a leaf.
pub fn is_leaf_node(fs: &dyn Filesystem, path: &Path) -> Result<bool> {
    let subdirs = fs.list_subdirectories(path, false)?;
    Ok(subdirs.iter().all(|dir| is_special(dir)))
}

pub fn filter_leaf_directories(
    fs: &dyn Filesystem,
    config: &CleanupConfig,
    dirs: Vec<PathBuf>,
) -> Outcome<Vec<PathBuf>> {
    let mut leaves = Vec::new();

    for dir in dirs {
        if is_special(&dir) || config.is_excluded(&dir) {
            continue;
        }
        match is_leaf_node(fs, &dir) {
            Ok(true) => leaves.push(dir),
            Ok(false) => {}
            Err(err) => return Outcome::failure(err),
        }
    }

    if leaves.is_empty() {
        return Outcome::failure(RemnantError::NoLeafNodesFound);
    }

    let count = leaves.len();
    Outcome::success(leaves).note(format!("{} leaf folders to inspect", count))
}

/// Sum of the immediate file lengths, in bytes. Conversion to the mode's
/// comparison unit is the caller's business.
pub fn directory_size(fs: &dyn Filesystem, path: &Path) -> Result<u64> {
    Ok(fs
        .list_files(path)?
        .iter()
        .map(|file| file.size_bytes)
        .sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::fs::{FileEntry, RealFilesystem};
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    /// Fails the test if validation reaches the filesystem at all.
    struct UnreachableFs;

    impl Filesystem for UnreachableFs {
        fn is_directory(&self, _: &Path) -> bool {
            panic!("validation touched the filesystem");
        }
        fn list_subdirectories(&self, _: &Path, _: bool) -> Result<Vec<PathBuf>> {
            panic!("validation touched the filesystem");
        }
        fn list_files(&self, _: &Path) -> Result<Vec<FileEntry>> {
            panic!("validation touched the filesystem");
        }
        fn delete_file(&self, _: &Path) -> std::io::Result<()> {
            panic!("validation touched the filesystem");
        }
        fn delete_directory(&self, _: &Path) -> std::io::Result<()> {
            panic!("validation touched the filesystem");
        }
    }

    #[test]
    fn test_empty_path_fails_before_filesystem_access() {
        for raw in ["", "   ", "\t"] {
            let out = validate_root(&UnreachableFs, raw);
            assert!(matches!(
                out,
                Outcome::Failure(RemnantError::PathNameCannotBeEmpty)
            ));
        }
    }

    #[test]
    fn test_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let out = validate_root(&RealFilesystem, missing.to_str().unwrap());
        assert!(matches!(
            out,
            Outcome::Failure(RemnantError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_valid_root_passes_through_unchanged() {
        let temp = TempDir::new().unwrap();
        let raw = temp.path().to_str().unwrap();
        let (path, _) = validate_root(&RealFilesystem, raw).into_result().unwrap();
        assert_eq!(path, temp.path());
    }

    #[test]
    fn test_leaf_detection_ignores_dot_directories() {
        let temp = TempDir::new().unwrap();
        let show = temp.path().join("Show");
        fs::create_dir_all(show.join(".thumbnails")).unwrap();

        assert!(is_leaf_node(&RealFilesystem, &show).unwrap());

        fs::create_dir(show.join("Season 1")).unwrap();
        assert!(!is_leaf_node(&RealFilesystem, &show).unwrap());
    }

    #[test]
    fn test_filter_keeps_only_leaves() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("Show/Season 1")).unwrap();
        fs::create_dir(temp.path().join(".hidden")).unwrap();

        let config = CleanupConfig::for_mode(Mode::Tv);
        let dirs = RealFilesystem
            .list_subdirectories(temp.path(), true)
            .unwrap();
        let (leaves, _) = filter_leaf_directories(&RealFilesystem, &config, dirs)
            .into_result()
            .unwrap();

        assert_eq!(leaves, vec![temp.path().join("Show/Season 1")]);
    }

    #[test]
    fn test_no_leaves_is_a_failure() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".hidden")).unwrap();

        let config = CleanupConfig::for_mode(Mode::Tv);
        let dirs = vec![temp.path().join(".hidden")];
        let out = filter_leaf_directories(&RealFilesystem, &config, dirs);
        assert!(matches!(
            out,
            Outcome::Failure(RemnantError::NoLeafNodesFound)
        ));
    }

    #[test]
    fn test_list_directories_empty_is_a_failure() {
        let temp = TempDir::new().unwrap();
        let out = list_directories(&RealFilesystem, temp.path(), true);
        assert!(matches!(
            out,
            Outcome::Failure(RemnantError::SubdirectoriesDoNotExist)
        ));
    }

    #[test]
    fn test_directory_size_sums_immediate_files_only() {
        let temp = TempDir::new().unwrap();
        File::create(temp.path().join("a.nfo"))
            .unwrap()
            .write_all(&[0u8; 10])
            .unwrap();
        File::create(temp.path().join("b.jpg"))
            .unwrap()
            .write_all(&[0u8; 32])
            .unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        File::create(temp.path().join("nested/c.jpg"))
            .unwrap()
            .write_all(&[0u8; 100])
            .unwrap();

        assert_eq!(directory_size(&RealFilesystem, temp.path()).unwrap(), 42);
    }
}
