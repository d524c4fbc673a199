//! Commands module - pipeline operations as library functions
//!
//! Each command wires configuration, the artifact store and one pipeline
//! stage together. The CLI is a thin layer over these.

pub mod ingest;
pub mod journey;
pub mod map;
pub mod preferences;
