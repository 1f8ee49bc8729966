//! CLI command implementations.

pub mod classify;
pub mod common;
pub mod compress;
pub mod connectivities;
pub mod mub;
pub mod prepare;
pub mod sample;
pub mod stats;
pub mod version;
