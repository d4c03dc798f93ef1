//! # sitepro-profile
//!
//! Average signal profiles around genomic sites.
//!
//! Every site of a group gets a fixed-width window centered on it; the window
//! is cut into bins, each bin is averaged from a [sitepro_io::SignalTrack],
//! and the per-site profiles are averaged bin by bin into one profile per
//! (track, group) pair, optionally with 95% confidence intervals.
//!
//! The [session::Session] drives a whole run from a [config::ProfileConfig]
//! and returns a [models::ProfilePlot] that a [render::ProfileRenderer] turns
//! into an R script or a JSON payload.
//!
//! ```rust
//! use sitepro_profile::aggregate::aggregate;
//!
//! let profiles = vec![vec![1.0, f64::NAN], vec![3.0, f64::NAN]];
//! let result = aggregate(&profiles, 2, false).unwrap();
//!
//! assert_eq!(result.mean, vec![2.0, 0.0]);
//! ```
pub mod aggregate;
pub mod config;
pub mod consts;
pub mod errors;
pub mod models;
pub mod render;
pub mod session;
pub mod summarize;
pub mod window;

pub use config::ProfileConfig;
pub use errors::{ProfileError, ProfileResult};
pub use models::{NamedProfile, ProfilePlot};
pub use render::{JsonRenderer, ProfileRenderer, RScriptRenderer};
pub use session::Session;
