use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

use sitepro_core::models::{SiteProfile, SiteSet};
use sitepro_io::{DumpWrite, SignalTrack, TrackFormat, open_track};

use crate::aggregate::aggregate;
use crate::config::{ProfileConfig, RunLayout};
use crate::consts::DUMP_SUFFIX;
use crate::errors::ProfileResult;
use crate::models::{NamedProfile, ProfilePlot};
use crate::summarize::summarize;
use crate::window::{WindowParams, build_window, orient_profile};

///
/// Profile every site of a group against one track.
///
/// Sites whose window falls off the start of the chromosome, or for which
/// the track has no signal at all, are skipped without notice. The returned
/// profiles keep the order of the group.
///
/// # Arguments
/// - track: the signal source
/// - sites: the group
/// - params: window geometry and strand handling
/// - progress: ticked once per site
pub fn profile_sites<T: SignalTrack + ?Sized>(
    track: &mut T,
    sites: &SiteSet,
    params: &WindowParams,
    progress: &ProgressBar,
) -> ProfileResult<Vec<SiteProfile>> {
    let mut profiles = Vec::with_capacity(sites.len());

    for site in sites {
        progress.inc(1);

        let Some(window) = build_window(site, params.span, params.resolution) else {
            continue;
        };
        let (Ok(start), Ok(end)) = (u32::try_from(window.start), u32::try_from(window.end)) else {
            continue;
        };

        if let Some(values) = summarize(track, &window.chrom, start, end, window.bins)? {
            let values = orient_profile(values, site.strand, params.directional);
            profiles.push(SiteProfile::new(site.clone(), values));
        }
    }

    Ok(profiles)
}

///
/// A validated profiling run: every site file is parsed and every label is
/// resolved when the session is created, so that configuration problems show
/// up before any track is read.
///
#[derive(Debug)]
pub struct Session {
    config: ProfileConfig,
    layout: RunLayout,
    format: TrackFormat,
    labels: Vec<String>,
    groups: Vec<SiteSet>,
    name: String,
}

impl Session {
    pub fn new(config: ProfileConfig) -> ProfileResult<Self> {
        let layout = config.validate()?;
        let format = config.track_format()?;
        let labels = config.resolve_labels(layout)?;

        let groups = config
            .site_files
            .iter()
            .map(|path| SiteSet::try_from(path.as_path()))
            .collect::<Result<Vec<SiteSet>, _>>()?;

        let name = config.run_name();

        Ok(Session {
            config,
            layout,
            format,
            labels,
            groups,
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn layout(&self) -> RunLayout {
        self.layout
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Where the dump of the pair labelled `label` goes.
    pub fn dump_path(&self, label: &str) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}{}", label, DUMP_SUFFIX))
    }

    ///
    /// Run every (track, group) pair, opening tracks with the configured
    /// backend.
    ///
    pub fn run(&self) -> ProfileResult<ProfilePlot> {
        let format = self.format;
        self.run_with(|path| Ok(open_track(path, format)?))
    }

    ///
    /// Run every (track, group) pair, opening tracks with `open`.
    ///
    /// Every track is opened once, before the first pair is profiled, so an
    /// unreadable track fails the run before any dump is written. Tracks are
    /// then taken in order; for each track the groups are taken in order. The
    /// pair `(track i, group j)` gets label `i + j` (one of the two is always 0).
    ///
    pub fn run_with<F>(&self, mut open: F) -> ProfileResult<ProfilePlot>
    where
        F: FnMut(&Path) -> ProfileResult<Box<dyn SignalTrack>>,
    {
        let params = self.config.window_params();
        let mut profiles = Vec::with_capacity(self.layout.n_pairs());

        let mut tracks = Vec::with_capacity(self.config.tracks.len());
        for track_path in &self.config.tracks {
            debug!("Opening track {}", track_path.display());
            tracks.push(open(track_path)?);
        }

        for (iw, track) in tracks.iter_mut().enumerate() {
            for (ib, group) in self.groups.iter().enumerate() {
                let label = &self.labels[iw + ib];

                let progress = self.progress_bar(group.len(), label);
                let site_profiles = profile_sites(&mut **track, group, &params, &progress)?;
                progress.finish_and_clear();

                info!(
                    "{}: {} of {} sites profiled",
                    label,
                    site_profiles.len(),
                    group.len()
                );

                if self.config.dump {
                    let dump_path = self.dump_path(label);
                    site_profiles.write_dump(&dump_path)?;
                    info!("Dumped site profiles to {}", dump_path.display());
                }

                let aggregated = aggregate(&site_profiles, params.bins(), self.config.confidence)?;
                profiles.push(NamedProfile::new(label, aggregated, group.len()));
            }
        }

        Ok(ProfilePlot {
            name: self.name.clone(),
            breaks: params.offsets(),
            profiles,
        })
    }

    fn progress_bar(&self, len: usize, label: &str) -> ProgressBar {
        if !self.config.progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(len as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(label.to_string());
        bar
    }
}
