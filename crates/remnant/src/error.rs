use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemnantError {
    #[error("Path name cannot be empty")]
    PathNameCannotBeEmpty,

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("No orphaned files found")]
    FilesNotFound,

    #[error("No leaf folders found")]
    NoLeafNodesFound,

    #[error("No subdirectories found")]
    SubdirectoriesDoNotExist,

    #[error("No folders below the size threshold")]
    SubdirectoriesBelowThresholdDoNotExist,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User input error: {0}")]
    UserInput(String),
}

impl RemnantError {
    /// "Nothing matched the cleanup criteria this run". These are expected,
    /// frequent outcomes: they print nothing, write nothing and exit 0.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            RemnantError::FilesNotFound
                | RemnantError::NoLeafNodesFound
                | RemnantError::SubdirectoriesDoNotExist
                | RemnantError::SubdirectoriesBelowThresholdDoNotExist
        )
    }
}

impl From<dialoguer::Error> for RemnantError {
    fn from(err: dialoguer::Error) -> Self {
        RemnantError::UserInput(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RemnantError>;
