//! # Signal track and dump IO for sitepro.
//!
//! This small crate hides where per-base signal comes from behind the
//! [SignalTrack] trait. Two backends are provided: bigWig files read through
//! `bigtools`, and text wiggle / bedGraph files loaded into memory. It also
//! writes the per-site profile dumps.
//!
pub mod bigwig;
pub mod dump;
pub mod error;
pub mod track;
pub mod wig;

// re-expose core functions
pub use bigwig::*;
pub use dump::*;
pub use error::*;
pub use track::*;
pub use wig::*;
