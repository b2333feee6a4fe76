//! Workspace crate for `regiondb-core` and `regiondb-cli`.
//!
//! Re-exports the core library so the demos can `use regiondb_rs::prelude::*`.

pub use regiondb_core::*;
