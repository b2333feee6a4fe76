use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for regiondb-cli
#[derive(Debug, Parser)]
#[command(
    name = "regiondb",
    version,
    about = "CLI for building and querying the regiondb-core region index"
)]
pub struct CliArgs {
    /// Path to the binary index (default: <regiondb-core>/data/regions_index.bin)
    #[arg(short = 'x', long = "index", global = true)]
    pub index: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build an index from a JSON region dataset and write it to disk
    Build {
        /// JSON array of region records (.json or .json.gz)
        #[arg(short = 'i', long = "input")]
        input: PathBuf,

        /// Output file; falls back to --index, then the default location
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Store the payload uncompressed
        #[arg(long = "no-compress")]
        no_compress: bool,
    },

    /// Search the index
    Search {
        /// Region name, pinyin, abbreviation or a mix (e.g. 佛山, foshan, gdfs)
        query: String,

        /// Maximum number of results
        #[arg(short = 'n', long = "limit", default_value_t = 10)]
        limit: usize,

        /// auto, all, name, pinyin, short, path, mixed or pinyin_combo
        #[arg(short = 't', long = "type", default_value = "auto")]
        search_type: String,

        /// Restrict to level labels (repeatable, e.g. --level 市级)
        #[arg(short = 'l', long = "level")]
        levels: Vec<String>,

        /// Print results as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Show header and build statistics of an index file
    Stats,
}
