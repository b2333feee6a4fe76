// crates/regiondb-core/src/lib.rs

//! regiondb-core
//! =============
//!
//! Build-once, query-many lookup of Chinese administrative regions.
//!
//! A flat list of region records (code, name, level, parent, pinyin,
//! abbreviation) is turned into a [`RegionIndex`] holding inverted indices,
//! prefix tries, n-gram maps, level bitmaps and ancestor chains. The index is
//! persisted as a single checksummed binary file and served by a
//! [`RegionSearchEngine`] that accepts native-script names, full or partial
//! pinyin, abbreviations such as `gdfs` and misspellings.
//!
//! ```rust
//! use regiondb_core::prelude::*;
//!
//! let index = IndexBuilder::new(vec![
//!     RegionRaw::new("440000", "广东省", "省级").with_pinyin("guang dong sheng", "gd"),
//!     RegionRaw::new("440600", "佛山市", "市级")
//!         .with_parent("440000", "广东省")
//!         .with_pinyin("fo shan shi", "fs"),
//! ])
//! .build_all_indices();
//!
//! let engine = RegionSearchEngine::new().with_index(index);
//! let hits = engine.search("佛山", 5, SearchType::Auto)?;
//! assert_eq!(hits[0].region.code, "440600");
//! # Ok::<(), regiondb_core::RegionDbError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod config;
pub mod error;
pub mod index;
pub mod loader;
pub mod model;
pub mod search;
pub mod storage;
pub mod text;
pub mod traits;

pub use crate::common::{IndexStats, LogContext};
pub use crate::config::{CompressionMode, SearchConfig};
pub use crate::error::{RegionDbError, Result};
pub use crate::index::{BitmapIndex, RegionIndex};
pub use crate::loader::builder::IndexBuilder;
pub use crate::model::{
    FullInfo, Hierarchy, MatchType, Region, RegionLevel, RegionRaw, SearchResult,
};
pub use crate::search::{AddressStandardizer, RegionSearchEngine, SearchType};
pub use crate::storage::IndexStorage;
pub use crate::traits::RegionLookup;

pub mod prelude {
    pub use crate::config::{CompressionMode, SearchConfig};
    pub use crate::error::{RegionDbError, Result};
    pub use crate::index::RegionIndex;
    pub use crate::loader::builder::IndexBuilder;
    pub use crate::model::{MatchType, Region, RegionRaw, SearchResult};
    pub use crate::search::{RegionSearchEngine, SearchType};
    pub use crate::traits::RegionLookup;
}
