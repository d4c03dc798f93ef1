use sitepro_io::SignalTrack;

use crate::errors::{ProfileError, ProfileResult};

///
/// Average a track over `bins` consecutive sub-intervals of `[start, end)`.
///
/// Bin `i` covers `[trunc(start + i*w), trunc(start + (i+1)*w))` with
/// `w = (end - start) / bins` computed in floating point, so bins are not all
/// the same width when the range is not a multiple of `bins`. A bin's value is
/// the mean of its non-NaN bases, or NaN when it has none.
///
/// Returns `Ok(None)` when every bin is NaN: the track has nothing at all
/// over this range.
///
/// # Arguments
/// - track: the signal source
/// - chrom: chromosome name
/// - start: first base of the range (0-based)
/// - end: end of the range (exclusive)
/// - bins: number of bins, at least 1
pub fn summarize<T: SignalTrack + ?Sized>(
    track: &mut T,
    chrom: &str,
    start: u32,
    end: u32,
    bins: usize,
) -> ProfileResult<Option<Vec<f64>>> {
    if bins < 1 {
        return Err(ProfileError::InvalidArgument(format!(
            "bin count must be at least 1, got {}",
            bins
        )));
    }
    if end <= start {
        return Err(ProfileError::InvalidArgument(format!(
            "empty range {}:{}-{}",
            chrom, start, end
        )));
    }

    let raw = track.values(chrom, start, end)?;

    let bin_size = (end - start) as f64 / bins as f64;
    let summary: Vec<f64> = (0..bins)
        .map(|i| {
            let bin_start = (start as f64 + i as f64 * bin_size) as u32;
            let bin_end = (start as f64 + (i + 1) as f64 * bin_size) as u32;

            let from = ((bin_start - start) as usize).min(raw.len());
            let to = (bin_end.saturating_sub(start) as usize).clamp(from, raw.len());

            nan_mean(&raw[from..to])
        })
        .collect();

    if summary.iter().all(|v| v.is_nan()) {
        return Ok(None);
    }

    Ok(Some(summary))
}

/// Mean of the non-NaN values, NaN if there are none.
fn nan_mean(values: &[f32]) -> f64 {
    let (sum, n) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0f64, 0usize), |(sum, n), v| (sum + *v as f64, n + 1));

    match n {
        0 => f64::NAN,
        _ => sum / n as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use sitepro_io::Result as TrackResult;

    /// 1.0 over [0,100), 2.0 over [100,200), 3.0 over [200,300), nothing else.
    struct StepTrack {
        calls: usize,
    }

    impl SignalTrack for StepTrack {
        fn values(&mut self, chrom: &str, start: u32, end: u32) -> TrackResult<Vec<f32>> {
            self.calls += 1;
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
    fn track() -> StepTrack {
        StepTrack { calls: 0 }
    }

    #[rstest]
    fn test_summarize_steps(mut track: StepTrack) {
        let result = summarize(&mut track, "chr1", 0, 300, 3).unwrap();
        assert_eq!(result, Some(vec![1.0, 2.0, 3.0]));
    }

    #[rstest]
    fn test_summarize_reads_track_once(mut track: StepTrack) {
        summarize(&mut track, "chr1", 0, 300, 30).unwrap();
        assert_eq!(track.calls, 1);
    }

    #[rstest]
    #[case(1)]
    #[case(7)]
    #[case(300)]
    #[case(450)]
    fn test_summarize_length(mut track: StepTrack, #[case] bins: usize) {
        let result = summarize(&mut track, "chr1", 0, 300, bins).unwrap().unwrap();
        assert_eq!(result.len(), bins);
    }

    #[rstest]
    fn test_summarize_truncated_bounds(mut track: StepTrack) {
        // w = 100/3: bins are [90,123) [123,156) [156,190)
        let result = summarize(&mut track, "chr1", 90, 190, 3).unwrap().unwrap();

        assert_eq!(result[0], (10.0 * 1.0 + 23.0 * 2.0) / 33.0);
        assert_eq!(result[1], 2.0);
        assert_eq!(result[2], 2.0);
    }

    #[rstest]
    fn test_summarize_partial_coverage(mut track: StepTrack) {
        let result = summarize(&mut track, "chr1", 250, 450, 2).unwrap().unwrap();

        assert_eq!(result[0], 3.0);
        assert!(result[1].is_nan());
    }

    #[rstest]
    fn test_summarize_absent(mut track: StepTrack) {
        assert_eq!(summarize(&mut track, "chr1", 300, 600, 3).unwrap(), None);
        assert_eq!(summarize(&mut track, "chr9", 0, 300, 3).unwrap(), None);
    }

    #[rstest]
    fn test_summarize_more_bins_than_bases(mut track: StepTrack) {
        // some bins are empty (NaN) but others see data
        let result = summarize(&mut track, "chr1", 0, 2, 4).unwrap().unwrap();

        assert_eq!(result.len(), 4);
        assert!(result.iter().any(|v| v.is_nan()));
        assert!(result.iter().any(|v| *v == 1.0));
    }

    #[rstest]
    fn test_summarize_invalid_arguments(mut track: StepTrack) {
        assert!(matches!(
            summarize(&mut track, "chr1", 0, 300, 0),
            Err(ProfileError::InvalidArgument(_))
        ));
        assert!(matches!(
            summarize(&mut track, "chr1", 300, 300, 3),
            Err(ProfileError::InvalidArgument(_))
        ));
    }
}
