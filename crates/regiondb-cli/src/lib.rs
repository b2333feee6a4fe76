//! regiondb-cli
//! ============
//!
//! Command-line interface for the `regiondb-core` region index.
//!
//! This crate primarily provides a binary (`regiondb-cli`). The library
//! target only exists so that the crate has a rendered documentation page.
//!
//! Quick start
//! -----------
//!
//! ```text
//! regiondb-cli build --input regions.json --output regions_index.bin
//! regiondb-cli --index regions_index.bin search 佛山
//! regiondb-cli --index regions_index.bin search gdfs --json
//! regiondb-cli --index regions_index.bin stats
//! ```
//!
//! Set `RUST_LOG=regiondb=debug` to see build phases and load timings.
//!
//! For programmatic access use the [`regiondb-core`] crate directly.
//!
#![cfg_attr(docsrs, feature(doc_cfg))]
