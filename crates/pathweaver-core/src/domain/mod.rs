//! Domain layer
//!
//! The three pipeline stages: knowledge extraction, map building and journey
//! generation. Each stage consumes the serializable output of the previous one.

pub mod journey;
pub mod knowledge;
pub mod map;
