use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::consts::standard_chrom;
use crate::errors::{SiteError, SiteResult};
use crate::models::{Site, Strand};
use crate::utils::get_dynamic_reader;

///
/// SiteSet struct, the ordered sites of one site list (one group).
///
#[derive(Clone, Debug, Default)]
pub struct SiteSet {
    pub sites: Vec<Site>,
    pub path: Option<PathBuf>,
}

impl SiteSet {
    ///
    /// Parse sites from any buffered reader.
    ///
    /// Lines starting with `track`, `#` or `browser` and blank lines are
    /// skipped. Every other line is split on whitespace into
    /// `chrom start end [name [score [strand]]]`.
    ///
    /// # Arguments
    /// - reader: source of lines
    /// - origin: name used in error messages
    pub fn from_reader<R: BufRead>(reader: R, origin: &str) -> SiteResult<Self> {
        let mut sites: Vec<Site> = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;

            if line.starts_with("track")
                || line.starts_with('#')
                || line.starts_with("browser")
                || line.trim().is_empty()
            {
                continue;
            }

            sites.push(parse_site_line(&line).map_err(|reason| {
                SiteError::SiteParseError {
                    path: origin.to_string(),
                    line: idx + 1,
                    reason,
                }
            })?);
        }

        Ok(SiteSet { sites, path: None })
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Site> {
        self.sites.iter()
    }
}

fn parse_site_line(line: &str) -> Result<Site, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    if fields.len() < 3 {
        return Err(format!(
            "expected at least 3 fields (chrom, start, end), found {}",
            fields.len()
        ));
    }

    let start = fields[1]
        .parse::<i64>()
        .map_err(|_| format!("start position is not an integer: {:?}", fields[1]))?;
    let end = fields[2]
        .parse::<i64>()
        .map_err(|_| format!("end position is not an integer: {:?}", fields[2]))?;

    Ok(Site {
        chr: standard_chrom(fields[0]).to_string(),
        start,
        end,
        name: fields.get(3).map(|s| s.to_string()),
        score: fields.get(4).map(|s| s.to_string()),
        // anything but +/- (e.g. '.') means the strand is unknown
        strand: fields.get(5).and_then(|s| s.parse::<Strand>().ok()),
        n_fields: fields.len(),
    })
}

impl TryFrom<&Path> for SiteSet {
    type Error = SiteError;

    ///
    /// Read a site list from a (possibly gzipped) BED-like file on disk.
    ///
    fn try_from(value: &Path) -> SiteResult<Self> {
        let reader = get_dynamic_reader(value)
            .map_err(|e| SiteError::FileReadError(format!("{}: {}", value.display(), e)))?;

        let mut site_set = SiteSet::from_reader(reader, &value.display().to_string())?;
        site_set.path = Some(value.to_owned());

        Ok(site_set)
    }
}

impl TryFrom<&str> for SiteSet {
    type Error = SiteError;

    fn try_from(value: &str) -> SiteResult<Self> {
        SiteSet::try_from(Path::new(value))
    }
}

impl TryFrom<PathBuf> for SiteSet {
    type Error = SiteError;

    fn try_from(value: PathBuf) -> SiteResult<Self> {
        SiteSet::try_from(value.as_path())
    }
}

impl From<Vec<Site>> for SiteSet {
    fn from(sites: Vec<Site>) -> Self {
        SiteSet { sites, path: None }
    }
}

impl<'a> IntoIterator for &'a SiteSet {
    type Item = &'a Site;
    type IntoIter = std::slice::Iter<'a, Site>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.iter()
    }
}
