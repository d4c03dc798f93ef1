use serde::Serialize;

use crate::aggregate::{AggregatedProfile, ConfidenceInterval};

///
/// The aggregated profile of one (track, group) pair, ready to be drawn.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedProfile {
    pub label: String,
    pub mean: Vec<f64>,
    pub confidence: Option<Vec<Option<ConfidenceInterval>>>,
    /// sites in the group
    pub n_sites: usize,
    /// sites that had a valid window and some signal
    pub n_retained: usize,
}

impl NamedProfile {
    pub fn new(label: &str, aggregated: AggregatedProfile, n_sites: usize) -> Self {
        NamedProfile {
            label: label.to_string(),
            n_retained: aggregated.n_profiles,
            mean: aggregated.mean,
            confidence: aggregated.confidence,
            n_sites,
        }
    }
}

///
/// Rendering request handed to a [crate::render::ProfileRenderer].
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfilePlot {
    /// run name, used for output file names
    pub name: String,
    /// relative bin positions: `-span + i * resolution`
    pub breaks: Vec<i64>,
    pub profiles: Vec<NamedProfile>,
}

impl ProfilePlot {
    pub fn legends(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn has_confidence(&self) -> bool {
        self.profiles.iter().any(|p| p.confidence.is_some())
    }
}
