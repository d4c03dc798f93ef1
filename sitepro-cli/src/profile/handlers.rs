use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use sitepro_profile::{JsonRenderer, ProfileConfig, ProfileRenderer, RScriptRenderer, Session};

/// True when the command line names some input, directly or through a config file.
pub fn has_inputs(matches: &ArgMatches) -> bool {
    ["wig", "bed", "config"]
        .iter()
        .any(|id| matches.contains_id(id))
}

fn paths(matches: &ArgMatches, id: &str) -> Option<Vec<PathBuf>> {
    matches
        .get_many::<String>(id)
        .map(|values| values.map(PathBuf::from).collect())
}

///
/// Build the run configuration: start from `--config` when given (or the
/// defaults), then apply every option given on the command line.
///
pub fn build_config(matches: &ArgMatches) -> Result<ProfileConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => {
            let path = Path::new(path);
            let mut config = ProfileConfig::try_from(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            // relative inputs in the config file are relative to the file
            let base = path.parent().unwrap_or(Path::new(""));
            config.tracks = config.tracks.iter().map(|p| base.join(p)).collect();
            config.site_files = config.site_files.iter().map(|p| base.join(p)).collect();
            config
        }
        None => ProfileConfig::default(),
    };

    if let Some(tracks) = paths(matches, "wig") {
        config.tracks = tracks;
    }
    if let Some(site_files) = paths(matches, "bed") {
        config.site_files = site_files;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        config.format = format.clone();
    }
    if let Some(span) = matches.get_one::<i64>("span") {
        config.span = *span;
    }
    if let Some(resolution) = matches.get_one::<i64>("pf-res") {
        config.resolution = *resolution;
    }
    if let Some(labels) = matches.get_many::<String>("label") {
        config.labels = Some(labels.cloned().collect());
    }
    if let Some(name) = matches.get_one::<String>("name") {
        config.name = Some(name.clone());
    }
    if let Some(output) = matches.get_one::<String>("output") {
        config.output_dir = PathBuf::from(output);
    }

    config.directional |= matches.get_flag("dir");
    config.confidence |= matches.get_flag("confidence");
    config.dump |= matches.get_flag("dump");
    config.json |= matches.get_flag("json");
    config.progress |= matches.get_flag("progress");
    if matches.get_flag("no-r") {
        config.run_r = false;
    }

    Ok(config)
}

pub fn run_profile(matches: &ArgMatches) -> Result<()> {
    let config = build_config(matches)?;

    info!(
        "Profiling {} track(s) against {} BED file(s): span {} bp, resolution {} bp, direction {}",
        config.tracks.len(),
        config.site_files.len(),
        config.span,
        config.resolution,
        if config.directional { "ON" } else { "OFF" }
    );

    let session = Session::new(config).context("Invalid run configuration")?;
    let plot = session.run().context("Failed to compute site profiles")?;

    let output_dir = &session.config().output_dir;
    let mut renderers: Vec<Box<dyn ProfileRenderer>> =
        vec![Box::new(RScriptRenderer::new(output_dir, session.config().run_r))];
    if session.config().json {
        renderers.push(Box::new(JsonRenderer::new(output_dir)));
    }

    for renderer in renderers {
        let written = renderer
            .render(&plot)
            .with_context(|| format!("Failed to write the output of {}", plot.name))?;
        for path in written {
            info!("Wrote {}", path.display());
        }
    }

    Ok(())
}
