//! Utility modules for the asset pipeline.

pub mod exec;
pub mod fs;
