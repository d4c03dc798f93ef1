use sitepro_core::models::{Site, Strand};

///
/// The range and bin count requested from a track for one site.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteWindow {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
    pub bins: usize,
}

///
/// Window geometry shared by every site of a run.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowParams {
    /// half-width of the window, in bp
    pub span: i64,
    /// bin width, in bp
    pub resolution: i64,
    /// reverse profiles of `-` strand sites
    pub directional: bool,
}

impl WindowParams {
    pub fn bins(&self) -> usize {
        bin_count(self.span, self.resolution)
    }

    /// Relative position of every bin, from `-span` in steps of `resolution`.
    pub fn offsets(&self) -> Vec<i64> {
        (0..self.bins() as i64)
            .map(|i| -self.span + i * self.resolution)
            .collect()
    }
}

/// Number of bins of a window: `floor(2*span / resolution) + 1`.
pub fn bin_count(span: i64, resolution: i64) -> usize {
    ((2 * span).div_euclid(resolution) + 1).max(0) as usize
}

///
/// Compute the profiling window of a site.
///
/// The window is centered on `floor((start + end) / 2)` and shifted left by
/// half a bin so that the middle bin is centered on the site:
/// `[center - span - res/2, center + span - res/2 + res)`.
///
/// Returns `None` when either bound is `<= 0`; such sites are skipped.
///
/// # Arguments
/// - site: the site to profile
/// - span: half-width of the window, in bp
/// - resolution: bin width, in bp (must be positive)
pub fn build_window(site: &Site, span: i64, resolution: i64) -> Option<SiteWindow> {
    debug_assert!(resolution > 0, "resolution must be positive");

    let center = site.center();
    let half_bin = resolution.div_euclid(2);

    let start = center - span - half_bin;
    let end = center + span - half_bin + resolution;

    if start <= 0 || end <= 0 {
        return None;
    }

    Some(SiteWindow {
        chrom: site.chr.clone(),
        start,
        end,
        bins: bin_count(span, resolution),
    })
}

///
/// Put a summarized profile in the site's orientation: reversed end to end
/// when direction-awareness is on and the site is on the `-` strand,
/// untouched otherwise.
///
pub fn orient_profile(mut values: Vec<f64>, strand: Option<Strand>, directional: bool) -> Vec<f64> {
    if directional && strand == Some(Strand::Reverse) {
        values.reverse();
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn site(start: i64, end: i64) -> Site {
        Site::new("chr1", start, end)
    }

    #[rstest]
    fn test_window_defaults() {
        let window = build_window(&site(10_000, 10_100), 1000, 50).unwrap();

        assert_eq!(window.start, 10_050 - 1000 - 25);
        assert_eq!(window.end, 10_050 + 1000 - 25 + 50);
        assert_eq!(window.bins, 41);
        assert_eq!((window.end - window.start) as usize, window.bins * 50);
    }

    #[rstest]
    fn test_window_odd_values_truncate() {
        // center = floor(2001 / 2) = 1000, res/2 = 12
        let window = build_window(&site(1000, 1001), 100, 25).unwrap();

        assert_eq!(window.start, 888);
        assert_eq!(window.end, 1113);
        assert_eq!(window.bins, 9);
    }

    #[rstest]
    #[case(100, 200)]
    #[case(0, 10)]
    #[case(-500, -400)]
    fn test_window_non_positive_start_is_skipped(#[case] start: i64, #[case] end: i64) {
        assert_eq!(build_window(&site(start, end), 100, 100), None);
    }

    #[rstest]
    fn test_window_just_inside() {
        let window = build_window(&site(101, 201), 100, 100).unwrap();
        assert_eq!(window.start, 1);
        assert_eq!(window.end, 301);
        assert_eq!(window.bins, 3);
    }

    #[rstest]
    #[case(1000, 50, 41)]
    #[case(100, 100, 3)]
    #[case(100, 30, 7)]
    #[case(5, 50, 1)]
    fn test_bin_count(#[case] span: i64, #[case] res: i64, #[case] expected: usize) {
        assert_eq!(bin_count(span, res), expected);
    }

    #[rstest]
    fn test_offsets_are_symmetric() {
        let params = WindowParams {
            span: 100,
            resolution: 50,
            directional: false,
        };
        assert_eq!(params.offsets(), vec![-100, -50, 0, 50, 100]);
        assert_eq!(params.offsets().len(), params.bins());
    }

    #[rstest]
    fn test_orient_profile() {
        let values = vec![1.0, 2.0, 3.0];

        assert_eq!(
            orient_profile(values.clone(), Some(Strand::Reverse), true),
            vec![3.0, 2.0, 1.0]
        );
        assert_eq!(
            orient_profile(values.clone(), Some(Strand::Reverse), false),
            values
        );
        assert_eq!(orient_profile(values.clone(), Some(Strand::Forward), true), values);
        assert_eq!(orient_profile(values.clone(), None, true), values);
    }

    #[rstest]
    fn test_reversal_is_an_involution() {
        let values = vec![0.5, f64::NAN, 2.0, 7.25];
        let twice = orient_profile(
            orient_profile(values.clone(), Some(Strand::Reverse), true),
            Some(Strand::Reverse),
            true,
        );

        assert_eq!(format!("{:?}", twice), format!("{:?}", values));
    }
}
