use std::fmt::{self, Display};
use std::path::Path;
use std::str::FromStr;

use crate::bigwig::BigWigTrack;
use crate::error::{Result, TrackError};
use crate::wig::WigTrack;

///
/// A genome wide signal track that can be queried base by base.
///
pub trait SignalTrack {
    ///
    /// Get one value per base over the half-open range `[start, end)`.
    ///
    /// Bases without signal, including every base of a chromosome the track
    /// does not know, are `f32::NAN`. The returned vector always has
    /// `end - start` entries (empty when `end <= start`).
    ///
    fn values(&mut self, chrom: &str, start: u32, end: u32) -> Result<Vec<f32>>;
}

impl<T: SignalTrack + ?Sized> SignalTrack for Box<T> {
    fn values(&mut self, chrom: &str, start: u32, end: u32) -> Result<Vec<f32>> {
        (**self).values(chrom, start, end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackFormat {
    #[default]
    BigWig,
    Wig,
}

impl FromStr for TrackFormat {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bigwig" | "bw" => Ok(TrackFormat::BigWig),
            "wig" => Ok(TrackFormat::Wig),
            _ => Err(TrackError::InvalidFormat(s.to_string())),
        }
    }
}

impl Display for TrackFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackFormat::BigWig => write!(f, "bigwig"),
            TrackFormat::Wig => write!(f, "wig"),
        }
    }
}

///
/// Open a track file with the backend selected by `format`.
///
/// # Arguments
/// - path: path to the track file
/// - format: which backend to read it with
pub fn open_track<P: AsRef<Path>>(path: P, format: TrackFormat) -> Result<Box<dyn SignalTrack>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(TrackError::OpenError {
            path: path.display().to_string(),
            reason: "no such file".to_string(),
        });
    }

    let track: Box<dyn SignalTrack> = match format {
        TrackFormat::BigWig => Box::new(BigWigTrack::open(path)?),
        TrackFormat::Wig => Box::new(WigTrack::open(path)?),
    };

    Ok(track)
}
