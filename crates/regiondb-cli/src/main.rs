//! regiondb-cli — Command-line interface for regiondb-core
//!
//! Builds a binary region index from the ETL's JSON dataset, searches it and
//! prints index statistics.
//!
//! Usage examples
//! --------------
//!
//! - Build an index (zlib-compressed unless `--no-compress`)
//!   $ regiondb build --input regions.json --output regions_index.bin
//!
//! - Search, letting the engine pick the search type
//!   $ regiondb --index regions_index.bin search 佛山
//!   $ regiondb --index regions_index.bin search gdfs
//!
//! - Search cities only, as JSON
//!   $ regiondb --index regions_index.bin search nanhai --level 区县级 --json
//!
//! - Show header and build statistics
//!   $ regiondb --index regions_index.bin stats
//!
//! Logging goes through `pretty_env_logger`; use `RUST_LOG=regiondb=debug`.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use regiondb_core::loader::common_io;
use regiondb_core::{CompressionMode, IndexStorage, RegionSearchEngine, SearchType};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let args = CliArgs::parse();

    let index_path = args
        .index
        .unwrap_or_else(|| common_io::default_data_dir().join(common_io::INDEX_FILENAME));

    match args.command {
        Commands::Build {
            input,
            output,
            no_compress,
        } => build(input, output.unwrap_or(index_path), no_compress)?,

        Commands::Search {
            query,
            limit,
            search_type,
            levels,
            json,
        } => {
            let search_type: SearchType = search_type.parse()?;
            let mut engine = RegionSearchEngine::new();
            engine
                .load_index(&index_path)
                .with_context(|| format!("loading index {}", index_path.display()))?;

            let results = if levels.is_empty() {
                engine.search(&query, limit, search_type)?
            } else {
                let levels: Vec<&str> = levels.iter().map(String::as_str).collect();
                engine.search_in_levels(&query, limit, search_type, &levels)?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if results.is_empty() {
                println!("No regions found matching: {query}");
            } else {
                for (i, result) in results.iter().enumerate() {
                    println!("{:>2}. {result}", i + 1);
                }
            }
        }

        Commands::Stats => {
            let storage = IndexStorage::default();
            let header = storage.inspect(&index_path)?;
            let index = storage.load(&index_path)?;
            let stats = &index.stats;
            println!("Index: {}", index_path.display());
            println!("  Format version: {}", header.version);
            println!("  Compressed: {}", header.is_compressed());
            println!("  Payload bytes: {}", header.payload_len);
            println!("  Regions: {}", stats.regions);
            println!("  Name terms: {}", stats.name_terms);
            println!("  Pinyin terms: {}", stats.pinyin_terms);
            println!("  Short terms: {}", stats.short_terms);
            println!("  N-gram terms: {}", stats.ngram_terms);
            println!("  Bitmaps: {}", stats.bitmap_indices);
            println!("  Build time: {} ms", stats.build_millis);
        }
    }

    Ok(())
}

#[cfg(feature = "json")]
fn build(input: PathBuf, output: PathBuf, no_compress: bool) -> anyhow::Result<()> {
    use regiondb_core::IndexBuilder;

    let compression = if no_compress {
        CompressionMode::None
    } else {
        CompressionMode::default()
    };
    let builder = IndexBuilder::from_json_file(&input)
        .with_context(|| format!("reading dataset {}", input.display()))?;
    log::info!("building index over {} records", builder.region_count());
    let index = builder.save_to_file(&output, compression)?;
    println!(
        "Wrote {} regions to {} ({} ms)",
        index.region_count(),
        output.display(),
        index.stats.build_millis
    );
    Ok(())
}

#[cfg(not(feature = "json"))]
fn build(_input: PathBuf, _output: PathBuf, _no_compress: bool) -> anyhow::Result<()> {
    anyhow::bail!("the build command needs the 'json' feature")
}
