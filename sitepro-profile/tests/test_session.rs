use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rstest::*;

use sitepro_core::models::{Site, SiteProfile, SiteSet, Strand};
use sitepro_io::{DumpWrite, Result as TrackResult, SignalTrack};
use sitepro_profile::config::RunLayout;
use sitepro_profile::summarize::summarize;
use sitepro_profile::window::orient_profile;
use sitepro_profile::{ProfileConfig, ProfileError, ProfileRenderer, RScriptRenderer, Session};

/// 1.0 over [0,100), 2.0 over [100,200), 3.0 over [200,300) of chr1.
struct StepTrack;

impl SignalTrack for StepTrack {
    fn values(&mut self, chrom: &str, start: u32, end: u32) -> TrackResult<Vec<f32>> {
        Ok((start..end)
            .map(|pos| match (chrom, pos) {
                ("chr1", 0..=99) => 1.0,
                ("chr1", 100..=199) => 2.0,
                ("chr1", 200..=299) => 3.0,
                _ => f32::NAN,
            })
            .collect())
    }
}

#[fixture]
fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("tests/data")
}

#[fixture]
fn config(data_dir: PathBuf) -> ProfileConfig {
    ProfileConfig {
        tracks: vec![data_dir.join("tracks/steps.wig")],
        site_files: vec![data_dir.join("sites/stranded.bed")],
        format: "wig".to_string(),
        span: 100,
        resolution: 100,
        name: Some("test".to_string()),
        run_r: false,
        ..Default::default()
    }
}

/// Last column of every dump line.
fn dumped_values(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.rsplit('\t').next().unwrap_or_default().to_string())
        .collect()
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[rstest]
fn test_direction_reverses_minus_strand_sites() {
    // sites at [100,200) on either strand; their window is [0,300) in 3 bins
    let mut plus = Site::new("chr1", 100, 200);
    plus.strand = Some(Strand::Forward);
    let mut minus = Site::new("chr1", 100, 200);
    minus.strand = Some(Strand::Reverse);

    let profiles: Vec<SiteProfile> = [plus, minus]
        .into_iter()
        .map(|site| {
            let values = summarize(&mut StepTrack, "chr1", 0, 300, 3).unwrap().unwrap();
            let values = orient_profile(values, site.strand, true);
            SiteProfile::new(site, values)
        })
        .collect();

    let tempdir = tempfile::tempdir().unwrap();
    let dump_path = tempdir.path().join("test_dump.txt");
    profiles.write_dump(&dump_path).unwrap();

    assert_eq!(dumped_values(&dump_path), vec!["1.0,2.0,3.0", "3.0,2.0,1.0"]);
}

#[rstest]
fn test_session_direction_and_dump(mut config: ProfileConfig) {
    let tempdir = tempfile::tempdir().unwrap();
    config.output_dir = tempdir.path().to_path_buf();
    config.directional = true;
    config.dump = true;

    let session = Session::new(config).unwrap();
    let plot = session.run().unwrap();

    assert_eq!(session.labels(), &["steps".to_string()]);
    assert_eq!(plot.breaks, vec![-100, 0, 100]);

    let dump = std::fs::read_to_string(session.dump_path("steps")).unwrap();
    assert_eq!(
        dump,
        "chr1\t1100\t1200\tsite1\t1.0,2.0,3.0\n\
         chr1\t1100\t1200\tsite2\t3.0,2.0,1.0\n\
         chr1\t1150\t1150\tsite3\t1.0,2.0,3.0\n"
    );

    // site4 is on a chromosome the track does not have
    let profile = &plot.profiles[0];
    assert_eq!(profile.n_sites, 4);
    assert_eq!(profile.n_retained, 3);
    assert_eq!(profile.mean, vec![5.0 / 3.0, 2.0, 7.0 / 3.0]);
    assert_eq!(profile.confidence, None);
}

#[rstest]
fn test_session_without_direction(mut config: ProfileConfig) {
    let tempdir = tempfile::tempdir().unwrap();
    config.output_dir = tempdir.path().to_path_buf();
    config.dump = true;

    let session = Session::new(config).unwrap();
    let plot = session.run().unwrap();

    assert_eq!(
        dumped_values(&session.dump_path("steps")),
        vec!["1.0,2.0,3.0"; 3]
    );
    assert_eq!(plot.profiles[0].mean, vec![1.0, 2.0, 3.0]);
}

#[rstest]
fn test_bedgraph_track_matches_fixed_step(mut config: ProfileConfig, data_dir: PathBuf) {
    let from_wig = Session::new(config.clone()).unwrap().run().unwrap();

    config.tracks = vec![data_dir.join("tracks/steps.bedGraph")];
    config.labels = Some(vec!["steps".to_string()]);
    let from_bedgraph = Session::new(config).unwrap().run().unwrap();

    assert_eq!(from_wig, from_bedgraph);
}

#[rstest]
fn test_invalid_window_is_excluded(mut config: ProfileConfig) {
    let tempdir = tempfile::tempdir().unwrap();
    let track = write_file(
        tempdir.path(),
        "low.wig",
        "fixedStep chrom=chr1 start=1 step=100 span=100\n1.0\n2.0\n3.0\n",
    );
    let sites = write_file(
        tempdir.path(),
        "low.bed",
        "chr1\t100\t200\tedge\nchr1\t101\t201\tinside\n",
    );

    config.tracks = vec![track];
    config.site_files = vec![sites];
    config.output_dir = tempdir.path().to_path_buf();
    config.dump = true;

    let session = Session::new(config).unwrap();
    let plot = session.run().unwrap();

    let dump = std::fs::read_to_string(session.dump_path("low")).unwrap();
    assert_eq!(dump.lines().count(), 1);
    assert!(dump.starts_with("chr1\t101\t201\tinside\t"));
    assert_eq!(plot.profiles[0].n_retained, 1);
}

#[rstest]
fn test_group_without_signal_is_all_zero(mut config: ProfileConfig) {
    let tempdir = tempfile::tempdir().unwrap();
    let sites = write_file(tempdir.path(), "far.bed", "chr1\t50000\t50100\n");

    config.site_files = vec![sites];
    config.confidence = true;

    let plot = Session::new(config).unwrap().run().unwrap();
    let profile = &plot.profiles[0];

    assert_eq!(profile.mean, vec![0.0; 3]);
    assert_eq!(profile.n_retained, 0);
    assert_eq!(profile.confidence, Some(vec![None; 3]));
}

#[rstest]
fn test_one_track_many_groups(mut config: ProfileConfig, data_dir: PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    let up = write_file(tempdir.path(), "up.bed", "chr1\t1100\t1200\n");
    let far = write_file(tempdir.path(), "far.bed", "chr1\t50000\t50100\n");

    config.site_files = vec![data_dir.join("sites/stranded.bed.gz"), up, far];

    let session = Session::new(config).unwrap();
    assert_eq!(session.layout(), RunLayout::ManyGroups(3));

    let plot = session.run().unwrap();
    let labels: Vec<&str> = plot.legends();

    assert_eq!(labels, vec!["stranded", "up", "far"]);
    assert_eq!(plot.profiles[1].mean, vec![1.0, 2.0, 3.0]);
    assert_eq!(plot.profiles[2].mean, vec![0.0; 3]);
}

#[rstest]
fn test_many_tracks_one_group_opens_each_track_once(mut config: ProfileConfig, data_dir: PathBuf) {
    config.tracks = vec![
        data_dir.join("tracks/steps.wig"),
        data_dir.join("tracks/steps.bedGraph"),
    ];
    config.labels = Some(vec!["a".to_string(), "b".to_string()]);

    let session = Session::new(config).unwrap();
    let mut opened = vec![];

    let plot = session
        .run_with(|path| {
            opened.push(path.to_path_buf());
            Ok(Box::new(StepTrack))
        })
        .unwrap();

    assert_eq!(opened.len(), 2);
    assert_eq!(plot.legends(), vec!["a", "b"]);
}

#[rstest]
fn test_unreadable_track_fails_before_any_dump(mut config: ProfileConfig, data_dir: PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    config.tracks = vec![
        data_dir.join("tracks/steps.wig"),
        tempdir.path().join("missing.wig"),
    ];
    config.labels = Some(vec!["first".to_string(), "second".to_string()]);
    config.output_dir = tempdir.path().to_path_buf();
    config.dump = true;

    let session = Session::new(config).unwrap();

    assert!(matches!(session.run(), Err(ProfileError::Track(_))));
    assert!(!session.dump_path("first").exists());
}

#[rstest]
fn test_many_by_many_is_rejected(mut config: ProfileConfig, data_dir: PathBuf) {
    config.tracks = vec![
        data_dir.join("tracks/steps.wig"),
        data_dir.join("tracks/steps.bedGraph"),
    ];
    config.site_files = vec![
        data_dir.join("sites/stranded.bed"),
        data_dir.join("sites/stranded.bed.gz"),
    ];

    assert!(matches!(
        Session::new(config),
        Err(ProfileError::InvalidLayout { tracks: 2, groups: 2 })
    ));
}

#[rstest]
fn test_label_mismatch_is_rejected(mut config: ProfileConfig) {
    config.labels = Some(vec!["a".to_string(), "b".to_string()]);

    assert!(matches!(
        Session::new(config),
        Err(ProfileError::LabelMismatch { expected: 1, found: 2, .. })
    ));
}

#[rstest]
fn test_malformed_site_file_is_fatal(mut config: ProfileConfig) {
    let tempdir = tempfile::tempdir().unwrap();
    let sites = write_file(tempdir.path(), "bad.bed", "chr1\tone\t200\n");
    config.site_files = vec![sites];

    assert!(matches!(Session::new(config), Err(ProfileError::Site(_))));
}

#[rstest]
fn test_render_after_run(mut config: ProfileConfig) {
    let tempdir = tempfile::tempdir().unwrap();
    config.confidence = true;

    let plot = Session::new(config).unwrap().run().unwrap();
    let renderer = RScriptRenderer::new(tempdir.path(), false);
    let written = renderer.render(&plot).unwrap();

    let script = std::fs::read_to_string(&written[0]).unwrap();
    assert!(script.contains("plotCI("));
    assert_eq!(written[0], tempdir.path().join("test.R"));
}

#[rstest]
fn test_site_fixture_has_four_sites(data_dir: PathBuf) {
    let sites = SiteSet::try_from(data_dir.join("sites/stranded.bed")).unwrap();
    assert_eq!(sites.len(), 4);
}
