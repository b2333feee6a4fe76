// crates/regiondb-core/src/loader/common_io.rs
use crate::error::{RegionDbError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

/// File name of a persisted index.
pub const INDEX_FILENAME: &str = "regions_index.bin";

/// Opens a file for reading, mapping a missing file to `NotFound`.
pub fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RegionDbError::NotFound(format!("{}", path.display()))
        } else {
            RegionDbError::Io(e)
        }
    })
}

/// Opens a dataset file, transparently gunzipping `*.gz` sources.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let reader = BufReader::new(open_file(path)?);

    let gzipped = path.extension().is_some_and(|ext| ext == "gz");
    if gzipped {
        #[cfg(feature = "compact")]
        {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(RegionDbError::Decompress);
        }
    }
    Ok(Box::new(reader))
}

/// Directory holding bundled indices (`<crate>/data`).
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Conventional index locations for a dataset region, most specific first.
pub fn index_search_paths(data_dir: &Path, region: &str) -> Vec<PathBuf> {
    vec![
        data_dir.join(region).join(INDEX_FILENAME),
        data_dir.join(INDEX_FILENAME),
        PathBuf::from(INDEX_FILENAME),
    ]
}
