use serde::Serialize;

use crate::consts::Z_95;
use crate::errors::{ProfileError, ProfileResult};

/// Two sided 95% normal-approximation interval around a bin mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

///
/// Group average of a set of site profiles.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedProfile {
    /// one mean per bin; 0.0 where no site had data
    pub mean: Vec<f64>,
    /// per bin interval when requested; `None` entries for bins without data
    pub confidence: Option<Vec<Option<ConfidenceInterval>>>,
    /// number of profiles that went into the average
    pub n_profiles: usize,
}

///
/// Per-bin columns of a set of equally long profiles with NaNs removed:
/// column `j` holds `profiles[i][j]` for every `i` where it is not NaN.
///
pub fn transpose_filtered<P: AsRef<[f64]>>(profiles: &[P], n_bins: usize) -> Vec<Vec<f64>> {
    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(profiles.len()); n_bins];

    for profile in profiles {
        for (column, value) in columns.iter_mut().zip(profile.as_ref().iter()) {
            if !value.is_nan() {
                column.push(*value);
            }
        }
    }

    columns
}

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean_or_zero(values: &[f64]) -> f64 {
    match values.len() {
        0 => 0.0,
        n => values.iter().sum::<f64>() / n as f64,
    }
}

///
/// 95% interval `E ± 1.96 * sqrt(S2 / n)` where `S2` is the population
/// variance (no small sample correction). `None` for an empty slice.
///
pub fn confidence_interval(values: &[f64]) -> Option<ConfidenceInterval> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let half_width = Z_95 * (variance / n).sqrt();

    Some(ConfidenceInterval {
        lower: mean - half_width,
        upper: mean + half_width,
    })
}

///
/// Average a group of site profiles bin by bin.
///
/// Every profile must have `n_bins` values. NaNs are dropped per bin before
/// computing the mean; a bin left with no value gets a mean of `0.0` and no
/// interval. With no profiles at all the result is `n_bins` zeros.
///
/// # Arguments
/// - profiles: oriented per-site profiles
/// - n_bins: shared bin count of the group
/// - want_confidence: also compute the per-bin 95% interval
pub fn aggregate<P: AsRef<[f64]>>(
    profiles: &[P],
    n_bins: usize,
    want_confidence: bool,
) -> ProfileResult<AggregatedProfile> {
    for (index, profile) in profiles.iter().enumerate() {
        let found = profile.as_ref().len();
        if found != n_bins {
            return Err(ProfileError::RaggedProfiles {
                index,
                expected: n_bins,
                found,
            });
        }
    }

    let columns = transpose_filtered(profiles, n_bins);

    let mean = columns.iter().map(|column| mean_or_zero(column)).collect();
    let confidence = want_confidence.then(|| {
        columns
            .iter()
            .map(|column| confidence_interval(column))
            .collect()
    });

    Ok(AggregatedProfile {
        mean,
        confidence,
        n_profiles: profiles.len(),
    })
}
