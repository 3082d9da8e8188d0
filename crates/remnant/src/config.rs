//! Per-run configuration: the cleanup mode, its size threshold and extension
//! set, exclude globs and the run-log name. Defaults are compiled in;
//! a TOML file (explicit path or XDG `remnant/config.toml`) can override
//! them per mode, and the CLI can override the threshold per invocation.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;

use crate::error::{RemnantError, Result};
use crate::util::size::{bytes_to_kilobytes, bytes_to_megabytes, parse_size_string};

pub const DEFAULT_LOG_FILE: &str = "cleanLog.log";

pub const VIDEO_EXTENSIONS: &[&str] = &["avi", "flv", "mkv", "mp4", "mpeg", "mpg", "wmv", "3gp"];

pub const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "m4a", "flac", "wav", "wma", "aac", "aiff", "m4b", "m4p", "ogg",
];

const VIDEO_THRESHOLD_BYTES: u64 = 100 * 1024 * 1024;
const AUDIO_THRESHOLD_BYTES: u64 = 500 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Movies,
    Tv,
    Music,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Movies => "movies",
            Mode::Tv => "tv",
            Mode::Music => "music",
        }
    }

    /// Extensions that mark a file as primary media content for this mode.
    pub fn media_extensions(&self) -> &'static [&'static str] {
        match self {
            Mode::Movies | Mode::Tv => VIDEO_EXTENSIONS,
            Mode::Music => AUDIO_EXTENSIONS,
        }
    }

    pub fn default_threshold_bytes(&self) -> u64 {
        match self {
            Mode::Movies | Mode::Tv => VIDEO_THRESHOLD_BYTES,
            Mode::Music => AUDIO_THRESHOLD_BYTES,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional TOML override file.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub exclude: Vec<String>,
    pub log_file: Option<String>,
    pub tv: Option<ModeSection>,
    pub movies: Option<ModeSection>,
    pub music: Option<ModeSection>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ModeSection {
    pub threshold: Option<String>,
    pub extensions: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl ConfigFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| RemnantError::Config(format!("Failed to parse config: {}", e)))
    }

    fn section(&self, mode: Mode) -> Option<&ModeSection> {
        match mode {
            Mode::Tv => self.tv.as_ref(),
            Mode::Movies => self.movies.as_ref(),
            Mode::Music => self.music.as_ref(),
        }
    }
}

/// Locate the override file: an explicit path wins, otherwise the XDG
/// config directory is searched. No file at all is not an error.
pub fn load_config_file(explicit: Option<&Path>) -> Result<Option<ConfigFile>> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => xdg::BaseDirectories::with_prefix("remnant")
            .ok()
            .and_then(|xdg| xdg.find_config_file("config.toml")),
    };

    match path {
        Some(p) => Ok(Some(ConfigFile::from_file(&p)?)),
        None => Ok(None),
    }
}

/// Everything one run needs to know. Fixed for the run's lifetime.
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    pub mode: Mode,
    pub threshold_bytes: u64,
    pub extensions: Vec<String>,
    pub excludes: GlobSet,
    pub log_file: String,
    pub preview: bool,
}

impl CleanupConfig {
    pub fn for_mode(mode: Mode) -> Self {
        Self {
            mode,
            threshold_bytes: mode.default_threshold_bytes(),
            extensions: mode
                .media_extensions()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            excludes: GlobSet::empty(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            preview: false,
        }
    }

    /// Layer the override file, then an explicit threshold string, on top of
    /// the mode defaults.
    pub fn build(
        mode: Mode,
        file: Option<&ConfigFile>,
        threshold_override: Option<&str>,
        preview: bool,
    ) -> Result<Self> {
        let mut config = Self::for_mode(mode);
        config.preview = preview;

        if let Some(file) = file {
            if let Some(ref log_file) = file.log_file {
                config.log_file = log_file.clone();
            }

            let mut patterns: Vec<&str> = file.exclude.iter().map(String::as_str).collect();

            if let Some(section) = file.section(mode) {
                if let Some(ref threshold) = section.threshold {
                    config.threshold_bytes = parse_size_string(threshold)?;
                }
                if let Some(ref extensions) = section.extensions {
                    config.extensions = extensions.clone();
                }
                patterns.extend(section.exclude.iter().map(String::as_str));
            }

            config.excludes = build_globset(&patterns)?;
        }

        if let Some(threshold) = threshold_override {
            config.threshold_bytes = parse_size_string(threshold)?;
        }

        Ok(config)
    }

    /// A size in this mode's comparison unit (MB for Movies/TV, KB for Music),
    /// via the truncating conversions.
    pub fn size_in_units(&self, bytes: u64) -> u64 {
        match self.mode {
            Mode::Music => bytes_to_kilobytes(bytes),
            Mode::Movies | Mode::Tv => bytes_to_megabytes(bytes),
        }
    }

    pub fn threshold_in_units(&self) -> u64 {
        self.size_in_units(self.threshold_bytes)
    }

    pub fn is_media_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.excludes.is_match(path)
    }
}

fn build_globset(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| RemnantError::Config(format!("Invalid glob pattern '{}': {}", pattern, e)))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| RemnantError::Config(format!("Failed to build globset: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_defaults() {
        let tv = CleanupConfig::for_mode(Mode::Tv);
        assert_eq!(tv.threshold_in_units(), 100);
        assert!(tv.is_media_extension("mkv"));
        assert!(tv.is_media_extension("MKV"));
        assert!(!tv.is_media_extension("jpg"));

        let music = CleanupConfig::for_mode(Mode::Music);
        assert_eq!(music.threshold_in_units(), 500);
        assert!(music.is_media_extension("flac"));
        assert!(!music.is_media_extension("mkv"));
    }

    #[test]
    fn test_build_with_toml_overrides() {
        let file = ConfigFile::from_toml(
            r#"
            log_file = "cleanup.log"
            exclude = ["**/@eaDir/**"]

            [movies]
            threshold = "1MB"

            [music]
            extensions = ["mp3", "opus"]
            exclude = ["**/samples/**"]
        "#,
        )
        .unwrap();

        let movies = CleanupConfig::build(Mode::Movies, Some(&file), None, false).unwrap();
        assert_eq!(movies.threshold_bytes, 1024 * 1024);
        assert_eq!(movies.log_file, "cleanup.log");
        assert!(movies.is_excluded(Path::new("/lib/@eaDir/x")));

        let music = CleanupConfig::build(Mode::Music, Some(&file), None, false).unwrap();
        assert!(music.is_media_extension("opus"));
        assert!(!music.is_media_extension("flac"));
        assert!(music.is_excluded(Path::new("/lib/samples/intro")));

        let tv = CleanupConfig::build(Mode::Tv, Some(&file), None, false).unwrap();
        assert_eq!(tv.threshold_bytes, Mode::Tv.default_threshold_bytes());
        assert!(!tv.is_excluded(Path::new("/lib/samples/intro")));
    }

    #[test]
    fn test_cli_threshold_override_wins() {
        let file = ConfigFile::from_toml("[tv]\nthreshold = \"50MB\"\n").unwrap();
        let config = CleanupConfig::build(Mode::Tv, Some(&file), Some("10MB"), false).unwrap();
        assert_eq!(config.threshold_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_bad_threshold_is_a_config_error() {
        let err = CleanupConfig::build(Mode::Tv, None, Some("many"), false).unwrap_err();
        assert!(matches!(err, RemnantError::Config(_)));
    }

    #[test]
    fn test_bad_glob_is_a_config_error() {
        let file = ConfigFile::from_toml("exclude = [\"a[\"]\n").unwrap();
        let err = CleanupConfig::build(Mode::Tv, Some(&file), None, false).unwrap_err();
        assert!(matches!(err, RemnantError::Config(_)));
    }
}
