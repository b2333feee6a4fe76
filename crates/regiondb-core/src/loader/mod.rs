// crates/regiondb-core/src/loader/mod.rs

//! # Data Loader
//!
//! Reads the ETL's raw region dataset and turns it into a
//! [`RegionIndex`](crate::index::RegionIndex) via the [`builder`].

pub mod builder;
pub mod common_io;

#[cfg(feature = "json")]
use crate::error::Result;
#[cfg(feature = "json")]
use crate::model::RegionRaw;
#[cfg(feature = "json")]
use std::path::Path;

/// Loads the raw region list from a JSON array (optionally `.json.gz`).
#[cfg(feature = "json")]
pub fn load_regions_json(path: impl AsRef<Path>) -> Result<Vec<RegionRaw>> {
    let reader = common_io::open_stream(path.as_ref())?;
    let raw: Vec<RegionRaw> = serde_json::from_reader(reader)?;
    Ok(raw)
}
