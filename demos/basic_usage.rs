//! Basic usage example for regiondb-rs
//!
//! This example demonstrates how to:
//! - Build an index from region records
//! - Save it to disk and load it back
//! - Search by name, pinyin, abbreviation and combo
//! - Restrict a search to administrative levels

use regiondb_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== RegionDB-RS Basic Usage Example ===\n");

    let records = vec![
        RegionRaw::new("440000", "广东省", "省级")
            .with_pinyin("guang dong sheng", "gd")
            .with_full_path("广东省"),
        RegionRaw::new("440600", "佛山市", "市级")
            .with_parent("440000", "广东省")
            .with_pinyin("fo shan shi", "fs")
            .with_full_path("广东省>佛山市"),
        RegionRaw::new("440604", "禅城区", "区县级")
            .with_parent("440600", "佛山市")
            .with_pinyin("chan cheng qu", "cc")
            .with_full_path("广东省>佛山市>禅城区"),
        RegionRaw::new("440605", "南海区", "区县级")
            .with_parent("440600", "佛山市")
            .with_pinyin("nan hai qu", "nh")
            .with_full_path("广东省>佛山市>南海区"),
    ];

    // Build and persist
    println!("--- Example 1: Build and save ---");
    let path = std::env::temp_dir().join("regiondb_basic_usage.bin");
    let index = IndexBuilder::new(records).save_to_file(&path, CompressionMode::default())?;
    println!("✓ {} regions written to {}\n", index.region_count(), path.display());

    // Load into an engine
    let mut engine = RegionSearchEngine::new();
    engine.load_index(&path)?;

    // Search type is detected per query
    println!("--- Example 2: Automatic search ---");
    for query in ["佛山", "nanhai", "nh", "gdfs", "fosham"] {
        println!("Query: {query}");
        for result in engine.search(query, 3, SearchType::Auto)? {
            println!("  {result}");
        }
    }
    println!();

    // Only districts
    println!("--- Example 3: Districts only ---");
    for result in engine.search_in_levels("佛山", 5, SearchType::All, &["区县级"])? {
        println!("  {result}");
    }

    std::fs::remove_file(&path).ok();
    Ok(())
}
