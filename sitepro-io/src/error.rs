use std::io;
use thiserror::Error;

/// Error type for sitepro-io operations.
#[derive(Error, Debug)]
pub enum TrackError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The track file could not be opened by its backend.
    #[error("Can't open track file {path}: {reason}")]
    OpenError { path: String, reason: String },

    /// Reading values from an opened track failed.
    #[error("Failed to read {chrom}:{start}-{end} from track: {reason}")]
    ReadError {
        chrom: String,
        start: u32,
        end: u32,
        reason: String,
    },

    /// Unknown track format name.
    #[error("Unknown track format '{0}'. Valid options are 'bigwig' or 'wig'")]
    InvalidFormat(String),

    /// Malformed line in a wiggle file.
    #[error("Malformed wiggle line {line}: {reason}")]
    WigParseError { line: usize, reason: String },
}

/// Result type alias for sitepro-io operations.
pub type Result<T> = std::result::Result<T, TrackError>;
