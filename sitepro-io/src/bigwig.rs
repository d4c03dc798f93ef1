use std::collections::HashMap;
use std::path::Path;

use bigtools::BigWigRead;
use bigtools::utils::reopen::ReopenableFile;

use crate::error::{Result, TrackError};
use crate::track::SignalTrack;

///
/// bigWig backed signal track. The file stays open for the lifetime of the
/// track so that every group profiled against it reuses the same reader.
///
pub struct BigWigTrack {
    reader: BigWigRead<ReopenableFile>,
    chrom_sizes: HashMap<String, u32>,
}

impl BigWigTrack {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let open_error = |reason: String| TrackError::OpenError {
            path: path.display().to_string(),
            reason,
        };

        let path_str = path
            .to_str()
            .ok_or_else(|| open_error("path is not valid UTF-8".to_string()))?;

        let reader =
            BigWigRead::open_file(path_str).map_err(|e| open_error(format!("{:?}", e)))?;

        let chrom_sizes: HashMap<String, u32> = reader
            .chroms()
            .iter()
            .map(|chrom| (chrom.name.clone(), chrom.length))
            .collect();

        log::debug!(
            "Opened bigWig {} with {} chromosomes",
            path.display(),
            chrom_sizes.len()
        );

        Ok(BigWigTrack {
            reader,
            chrom_sizes,
        })
    }

    pub fn chrom_size(&self, chrom: &str) -> Option<u32> {
        self.chrom_sizes.get(chrom).copied()
    }
}

impl SignalTrack for BigWigTrack {
    fn values(&mut self, chrom: &str, start: u32, end: u32) -> Result<Vec<f32>> {
        if end <= start {
            return Ok(Vec::new());
        }

        let mut values = vec![f32::NAN; (end - start) as usize];

        // bases past the chromosome end (or on an unknown chromosome) have no signal
        let chrom_end = match self.chrom_size(chrom) {
            Some(size) => end.min(size),
            None => return Ok(values),
        };
        if chrom_end <= start {
            return Ok(values);
        }

        let read = self
            .reader
            .values(chrom, start, chrom_end)
            .map_err(|e| TrackError::ReadError {
                chrom: chrom.to_string(),
                start,
                end: chrom_end,
                reason: format!("{:?}", e),
            })?;

        let n = read.len().min(values.len());
        values[..n].copy_from_slice(&read[..n]);

        Ok(values)
    }
}
