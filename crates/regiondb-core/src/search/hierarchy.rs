// crates/regiondb-core/src/search/hierarchy.rs
use crate::model::{level_rank, FullInfo, Hierarchy, RegionLevel};
use crate::text::DISPLAY_SEPARATOR;
use crate::traits::RegionLookup;

/// Hierarchy context for `code`, or `None` when the code is unknown.
///
/// Ancestors are bucketed by level label; the display path joins every
/// ancestor name root first.
pub fn build_full_info<L: RegionLookup + ?Sized>(lookup: &L, code: &str) -> Option<FullInfo> {
    let current = lookup.region(code)?;
    let mut hierarchy = Hierarchy::default();
    let mut names = Vec::new();

    for ancestor in lookup.ancestors(code).iter().filter_map(|c| lookup.region(c)) {
        let level = ancestor.level.as_str();
        if level.contains(RegionLevel::Province.label()) {
            hierarchy.province = Some(ancestor.clone());
        } else if level.contains(RegionLevel::City.label()) {
            hierarchy.city = Some(ancestor.clone());
        } else if level.contains(RegionLevel::District.label()) {
            hierarchy.district = Some(ancestor.clone());
        }
        names.push(ancestor.name.as_str());
    }

    Some(FullInfo {
        current: current.clone(),
        hierarchy,
        level_rank: level_rank(&current.level),
        full_path: current.full_path.clone(),
        display_path: names.join(DISPLAY_SEPARATOR),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::builder::IndexBuilder;
    use crate::model::RegionRaw;

    #[test]
    fn buckets_ancestors_by_level() {
        let index = IndexBuilder::new(vec![
            RegionRaw::new("440000", "广东省", "省级"),
            RegionRaw::new("440600", "佛山市", "市级").with_parent("440000", "广东省"),
            RegionRaw::new("440605", "南海区", "区县级").with_parent("440600", "佛山市"),
            RegionRaw::new("440605001", "桂城街道", "街道级").with_parent("440605", "南海区"),
        ])
        .build_all_indices();

        let info = build_full_info(&index, "440605001").unwrap();
        assert_eq!(info.level_rank, 4);
        assert_eq!(info.display_path, "广东省 > 佛山市 > 南海区 > 桂城街道");
        assert_eq!(info.hierarchy.get("province").unwrap().code, "440000");
        assert_eq!(info.hierarchy.get("city").unwrap().code, "440600");
        assert_eq!(info.hierarchy.get("district").unwrap().code, "440605");

        let province = build_full_info(&index, "440000").unwrap();
        assert_eq!(province.display_path, "广东省");
        assert!(province.hierarchy.city.is_none());

        assert!(build_full_info(&index, "999999").is_none());
    }
}
