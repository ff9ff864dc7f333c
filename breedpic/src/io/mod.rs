//! I/O stages for the fetch pipeline.

pub mod config;
pub mod fetch;
pub mod output;
pub mod prompt;
