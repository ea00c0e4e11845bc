//! Exercise content: built-in seed banks and ingestion of generated
//! candidates.
//!
//! Seed banks are compiled in; generated templates are produced offline by
//! an external pipeline and loaded from `data/generated/` at boot. Both go
//! through the same structural validation in the store.

pub mod bank;
pub mod ingest;

pub use bank::seed_templates;
pub use ingest::{load_candidates, parse_candidates, IngestError};
