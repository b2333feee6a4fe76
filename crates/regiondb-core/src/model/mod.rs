// crates/regiondb-core/src/model/mod.rs
pub mod raw;
pub mod region;
pub mod result;

pub use raw::RegionRaw;
pub use region::{level_rank, Region, RegionLevel, SearchKeys};
pub use result::{FullInfo, Hierarchy, MatchType, SearchResult};
