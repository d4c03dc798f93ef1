use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::SiteError;

///
/// Strand of a site, as recorded in the sixth column of a BED record.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
pub enum Strand {
    Forward,
    Reverse,
}

impl FromStr for Strand {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            _ => Err(SiteError::InvalidStrand(s.to_string())),
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

///
/// Site struct, one record of a site list (BED-like file).
///
/// Coordinates are kept signed: the window rule downstream decides what to do
/// with sites that sit too close to the chromosome start.
///
#[derive(PartialEq, Eq, Hash, Debug, Clone)]
pub struct Site {
    pub chr: String,
    pub start: i64,
    pub end: i64,
    pub name: Option<String>,
    pub score: Option<String>,
    pub strand: Option<Strand>,

    /// number of whitespace separated fields in the source record
    pub n_fields: usize,
}

impl Site {
    ///
    /// Create a plain three column site.
    ///
    pub fn new(chr: &str, start: i64, end: i64) -> Self {
        Site {
            chr: chr.to_string(),
            start,
            end,
            name: None,
            score: None,
            strand: None,
            n_fields: 3,
        }
    }

    ///
    /// Get width of the site
    ///
    pub fn width(&self) -> i64 {
        self.end - self.start
    }

    /// Center of the site, `floor((start + end) / 2)`.
    pub fn center(&self) -> i64 {
        (self.start + self.end).div_euclid(2)
    }

    ///
    /// Coordinates of the site as written in dump files: `chr\tstart\tend`,
    /// followed by the name column when the record carried one.
    ///
    pub fn as_string(&self) -> String {
        let coords = format!("{}\t{}\t{}", self.chr, self.start, self.end);
        match (self.n_fields >= 4, self.name.as_deref()) {
            (true, Some(name)) => format!("{}\t{}", coords, name),
            _ => coords,
        }
    }
}

impl Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
