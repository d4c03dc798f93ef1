//! # sitepro-core
//!
//! Core models shared by the sitepro crates: genomic [models::Site]s as read
//! from BED-like site lists, the ordered [models::SiteSet] making up one
//! group, and the binned [models::SiteProfile] of a single site.
//!
//! ```rust
//! use std::io::Cursor;
//! use sitepro_core::models::{SiteSet, Strand};
//!
//! let sites = SiteSet::from_reader(Cursor::new("X\t100\t200\tpeak\t0\t-\n"), "inline").unwrap();
//! assert_eq!(sites.sites[0].chr, "chrX");
//! assert_eq!(sites.sites[0].strand, Some(Strand::Reverse));
//! ```
pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;
