use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use sitepro_core::utils::get_dynamic_reader;

use crate::error::{Result, TrackError};
use crate::track::SignalTrack;

/// One covered stretch of a chromosome, 0-based half-open.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WigInterval {
    start: u32,
    end: u32,
    value: f32,
}

/// Intervals of one chromosome sorted by start, with the running maximum of
/// their ends so that a lookup can binary search even when they overlap.
#[derive(Debug, Default)]
struct ChromIntervals {
    intervals: Vec<WigInterval>,
    max_end: Vec<u32>,
}

impl ChromIntervals {
    fn new(mut intervals: Vec<WigInterval>) -> Self {
        // stable: equal starts keep file order
        intervals.sort_by_key(|iv| iv.start);

        let max_end = intervals
            .iter()
            .scan(0u32, |running, iv| {
                *running = (*running).max(iv.end);
                Some(*running)
            })
            .collect();

        ChromIntervals { intervals, max_end }
    }

    /// Intervals that may overlap `[start, end)`, in start order.
    fn overlapping(&self, start: u32, end: u32) -> impl Iterator<Item = &WigInterval> {
        // every interval before `first` ends at or before `start`
        let first = self.max_end.partition_point(|e| *e <= start);
        self.intervals[first..]
            .iter()
            .take_while(move |iv| iv.start < end)
            .filter(move |iv| iv.end > start)
    }
}

enum BlockState {
    None,
    Fixed {
        chrom: String,
        next_start: u32,
        step: u32,
        span: u32,
    },
    Variable {
        chrom: String,
        span: u32,
    },
}

///
/// Text wiggle track held in memory.
///
/// Understands `fixedStep` and `variableStep` blocks (1-based positions) as
/// well as plain 4 column bedGraph lines (0-based, half-open), in any mix.
/// Overlapping intervals are allowed; where they overlap, the one starting
/// later wins (file order for equal starts).
///
#[derive(Debug, Default)]
pub struct WigTrack {
    chroms: HashMap<String, ChromIntervals>,
}

impl WigTrack {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path).map_err(|e| TrackError::OpenError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let track = WigTrack::from_reader(reader)?;
        log::debug!(
            "Loaded wiggle track {} ({} chromosomes)",
            path.display(),
            track.chroms.len()
        );

        Ok(track)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut chroms: HashMap<String, Vec<WigInterval>> = HashMap::new();
        let mut state = BlockState::None;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            let parse_error = |reason: String| TrackError::WigParseError {
                line: idx + 1,
                reason,
            };

            if line.is_empty()
                || line.starts_with("track")
                || line.starts_with("browser")
                || line.starts_with('#')
            {
                continue;
            }

            if let Some(declaration) = line.strip_prefix("fixedStep") {
                let params = parse_declaration(declaration);
                let chrom = required_param(&params, "chrom").map_err(parse_error)?;
                let start: u32 = required_param(&params, "start")
                    .and_then(|s| parse_number(&s, "start"))
                    .map_err(parse_error)?;
                state = BlockState::Fixed {
                    chrom,
                    next_start: start.saturating_sub(1),
                    step: optional_number(&params, "step").map_err(parse_error)?,
                    span: optional_number(&params, "span").map_err(parse_error)?,
                };
                continue;
            }

            if let Some(declaration) = line.strip_prefix("variableStep") {
                let params = parse_declaration(declaration);
                state = BlockState::Variable {
                    chrom: required_param(&params, "chrom").map_err(parse_error)?,
                    span: optional_number(&params, "span").map_err(parse_error)?,
                };
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();

            if fields.len() == 4 {
                let start: u32 = parse_number(fields[1], "start").map_err(parse_error)?;
                let end: u32 = parse_number(fields[2], "end").map_err(parse_error)?;
                let value: f32 = parse_number(fields[3], "value").map_err(parse_error)?;
                chroms
                    .entry(fields[0].to_string())
                    .or_default()
                    .push(WigInterval { start, end, value });
                continue;
            }

            match (&mut state, fields.as_slice()) {
                (
                    BlockState::Fixed {
                        chrom,
                        next_start,
                        step,
                        span,
                    },
                    [value],
                ) => {
                    let value: f32 = parse_number(value, "value").map_err(parse_error)?;
                    chroms.entry(chrom.clone()).or_default().push(WigInterval {
                        start: *next_start,
                        end: next_start.saturating_add(*span),
                        value,
                    });
                    *next_start = next_start.saturating_add(*step);
                }
                (BlockState::Variable { chrom, span }, [position, value]) => {
                    let position: u32 = parse_number(position, "position").map_err(parse_error)?;
                    let value: f32 = parse_number(value, "value").map_err(parse_error)?;
                    let start = position.saturating_sub(1);
                    chroms.entry(chrom.clone()).or_default().push(WigInterval {
                        start,
                        end: start.saturating_add(*span),
                        value,
                    });
                }
                _ => {
                    return Err(parse_error(format!(
                        "unexpected data line outside of a matching block: {:?}",
                        line
                    )));
                }
            }
        }

        let chroms = chroms
            .into_iter()
            .map(|(chrom, intervals)| (chrom, ChromIntervals::new(intervals)))
            .collect();

        Ok(WigTrack { chroms })
    }
}

fn parse_declaration(declaration: &str) -> HashMap<String, String> {
    declaration
        .split_whitespace()
        .filter_map(|kv| kv.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn required_param(params: &HashMap<String, String>, key: &str) -> std::result::Result<String, String> {
    params
        .get(key)
        .cloned()
        .ok_or_else(|| format!("missing '{}=' in declaration", key))
}

fn optional_number(params: &HashMap<String, String>, key: &str) -> std::result::Result<u32, String> {
    match params.get(key) {
        Some(v) => parse_number(v, key),
        None => Ok(1),
    }
}

fn parse_number<T: std::str::FromStr>(s: &str, what: &str) -> std::result::Result<T, String> {
    s.parse::<T>()
        .map_err(|_| format!("invalid {}: {:?}", what, s))
}

impl SignalTrack for WigTrack {
    fn values(&mut self, chrom: &str, start: u32, end: u32) -> Result<Vec<f32>> {
        if end <= start {
            return Ok(Vec::new());
        }

        let mut values = vec![f32::NAN; (end - start) as usize];

        let intervals = match self.chroms.get(chrom) {
            Some(intervals) => intervals,
            None => return Ok(values),
        };

        for iv in intervals.overlapping(start, end) {
            let from = iv.start.max(start);
            let to = iv.end.min(end);
            if from < to {
                values[(from - start) as usize..(to - start) as usize].fill(iv.value);
            }
        }

        Ok(values)
    }
}
