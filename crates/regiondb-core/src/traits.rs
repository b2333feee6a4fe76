// crates/regiondb-core/src/traits.rs
use crate::index::RegionIndex;
use crate::model::Region;

/// Read-only navigation over a region hierarchy.
///
/// The search engine only needs these lookups to assemble hierarchy context
/// and expand combos, so it depends on this trait rather than on the
/// concrete index layout.
///
/// # Examples
/// ```rust
/// use regiondb_core::loader::builder::IndexBuilder;
/// use regiondb_core::model::RegionRaw;
/// use regiondb_core::traits::RegionLookup;
///
/// let index = IndexBuilder::new(vec![
///     RegionRaw::new("440000", "广东省", "省级"),
///     RegionRaw::new("440600", "佛山市", "市级").with_parent("440000", "广东省"),
/// ])
/// .build_all_indices();
///
/// assert_eq!(index.ancestors("440600"), ["440000", "440600"]);
/// assert_eq!(index.children("440000")[0].name, "佛山市");
/// ```
pub trait RegionLookup {
    fn region(&self, code: &str) -> Option<&Region>;

    /// Root-first chain ending with `code`; empty for unknown codes.
    fn ancestors(&self, code: &str) -> &[String];

    /// Direct children, ordered by code.
    fn children(&self, code: &str) -> Vec<&Region>;

    /// All regions carrying the given level label, ordered by code.
    fn regions_by_level(&self, level: &str) -> Vec<&Region>;
}

impl RegionLookup for RegionIndex {
    fn region(&self, code: &str) -> Option<&Region> {
        self.code_to_region.get(code)
    }

    fn ancestors(&self, code: &str) -> &[String] {
        self.ancestor_cache
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn children(&self, code: &str) -> Vec<&Region> {
        self.parent_inverted
            .get(code)
            .into_iter()
            .flatten()
            .filter_map(|c| self.code_to_region.get(c))
            .collect()
    }

    fn regions_by_level(&self, level: &str) -> Vec<&Region> {
        self.level_inverted
            .get(level)
            .into_iter()
            .flatten()
            .filter_map(|c| self.code_to_region.get(c))
            .collect()
    }
}
