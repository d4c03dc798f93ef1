use thiserror::Error;

use sitepro_core::errors::SiteError;
use sitepro_io::TrackError;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Profile {index} has {found} bins, expected {expected}")]
    RaggedProfiles {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error(
        "Either a single BED file and multiple track files or multiple BED files and a single track file are allowed (got {tracks} tracks and {groups} BED files)"
    )]
    InvalidLayout { tracks: usize, groups: usize },

    #[error("The number and order of the labels must be the same as the {what} ({expected} expected, {found} given)")]
    LabelMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Track(#[from] TrackError),

    #[error(transparent)]
    Site(#[from] SiteError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type ProfileResult<T> = std::result::Result<T, ProfileError>;
