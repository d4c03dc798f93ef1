use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

use sitepro_core::utils::label_from_path;
use sitepro_io::TrackFormat;

use crate::consts::{DEFAULT_NAME_PREFIX, DEFAULT_RESOLUTION, DEFAULT_SPAN};
use crate::errors::{ProfileError, ProfileResult};
use crate::window::WindowParams;

///
/// Everything a profiling run needs. Built by the command line layer, or read
/// from a TOML file and then overridden by flags.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// signal track files, profiled in order
    #[serde(alias = "wig")]
    pub tracks: Vec<PathBuf>,
    /// site list (BED) files, one group each
    #[serde(alias = "bed")]
    pub site_files: Vec<PathBuf>,
    /// track backend, `bigwig` or `wig`
    pub format: String,
    pub span: i64,
    #[serde(alias = "pf_res")]
    pub resolution: i64,
    #[serde(alias = "dir")]
    pub directional: bool,
    pub confidence: bool,
    pub dump: bool,
    #[serde(alias = "label")]
    pub labels: Option<Vec<String>>,
    pub name: Option<String>,
    pub output_dir: PathBuf,
    pub run_r: bool,
    pub json: bool,
    pub progress: bool,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        ProfileConfig {
            tracks: vec![],
            site_files: vec![],
            format: TrackFormat::default().to_string(),
            span: DEFAULT_SPAN,
            resolution: DEFAULT_RESOLUTION,
            directional: false,
            confidence: false,
            dump: false,
            labels: None,
            name: None,
            output_dir: PathBuf::from("."),
            run_r: true,
            json: false,
            progress: false,
        }
    }
}

impl TryFrom<&Path> for ProfileConfig {
    type Error = ProfileError;

    fn try_from(path: &Path) -> ProfileResult<Self> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

///
/// How tracks and site groups are paired. Many tracks against many groups
/// is not supported.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunLayout {
    /// one track, one group
    Single,
    /// several tracks against one group
    ManyTracks(usize),
    /// one track against several groups
    ManyGroups(usize),
}

impl RunLayout {
    pub fn new(tracks: usize, groups: usize) -> ProfileResult<Self> {
        match (tracks, groups) {
            (0, _) => Err(ProfileError::InvalidConfig(
                "at least one track file is required".to_string(),
            )),
            (_, 0) => Err(ProfileError::InvalidConfig(
                "at least one BED file is required".to_string(),
            )),
            (1, 1) => Ok(RunLayout::Single),
            (n, 1) => Ok(RunLayout::ManyTracks(n)),
            (1, n) => Ok(RunLayout::ManyGroups(n)),
            (tracks, groups) => Err(ProfileError::InvalidLayout { tracks, groups }),
        }
    }

    /// Number of (track, group) pairs, which is also the number of labels.
    pub fn n_pairs(&self) -> usize {
        match self {
            RunLayout::Single => 1,
            RunLayout::ManyTracks(n) | RunLayout::ManyGroups(n) => *n,
        }
    }
}

impl ProfileConfig {
    pub fn track_format(&self) -> ProfileResult<TrackFormat> {
        Ok(self.format.parse()?)
    }

    pub fn window_params(&self) -> WindowParams {
        WindowParams {
            span: self.span,
            resolution: self.resolution,
            directional: self.directional,
        }
    }

    ///
    /// Check the configuration before anything is read: input counts and
    /// layout, files on disk, window geometry, track format.
    ///
    pub fn validate(&self) -> ProfileResult<RunLayout> {
        let layout = RunLayout::new(self.tracks.len(), self.site_files.len())?;

        for path in self.tracks.iter().chain(self.site_files.iter()) {
            if !path.is_file() {
                return Err(ProfileError::InvalidConfig(format!(
                    "no such file: {}",
                    path.display()
                )));
            }
        }

        if self.span <= 0 {
            return Err(ProfileError::InvalidConfig(format!(
                "span must be positive, got {}",
                self.span
            )));
        }
        if self.resolution < 1 {
            return Err(ProfileError::InvalidConfig(format!(
                "profiling resolution must be at least 1, got {}",
                self.resolution
            )));
        }

        self.track_format()?;

        Ok(layout)
    }

    ///
    /// One legend label per (track, group) pair.
    ///
    /// User labels must match the number of tracks, or the number of BED files
    /// when there are several. Without user labels, file names are used with
    /// their extension cut off.
    ///
    pub fn resolve_labels(&self, layout: RunLayout) -> ProfileResult<Vec<String>> {
        let (what, expected) = match layout {
            RunLayout::ManyGroups(n) => ("BED files", n),
            _ => ("track files", self.tracks.len()),
        };

        if let Some(labels) = &self.labels {
            if labels.len() != expected {
                return Err(ProfileError::LabelMismatch {
                    what: what.to_string(),
                    expected,
                    found: labels.len(),
                });
            }
            return Ok(labels.clone());
        }

        let labels = match layout {
            RunLayout::ManyGroups(_) => self
                .site_files
                .iter()
                .map(|path| label_from_path(path, ".bed"))
                .collect(),
            _ => {
                let suffix = match self.track_format()? {
                    TrackFormat::BigWig => ".bw",
                    TrackFormat::Wig => ".wig",
                };
                self.tracks
                    .iter()
                    .map(|path| label_from_path(path, suffix))
                    .collect()
            }
        };

        Ok(labels)
    }

    /// The run name, defaulting to a local timestamp.
    pub fn run_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!(
                "{}_{}",
                DEFAULT_NAME_PREFIX,
                Local::now().format("%Y.%b.%d.%H-%M-%S")
            ),
        }
    }
}
