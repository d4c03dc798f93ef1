use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Can't read site file: {0}")]
    FileReadError(String),

    #[error("Error parsing site at {path}:{line}: {reason}")]
    SiteParseError {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("Invalid strand: {0}")]
    InvalidStrand(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type SiteResult<T> = std::result::Result<T, SiteError>;
