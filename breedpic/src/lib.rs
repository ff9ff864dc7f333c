//! Fetch a random image URL for a dog breed and save it to a local file.
//!
//! A run is a strict four-stage pipeline: prompt for a breed, fetch the
//! breed's random-image endpoint, extract the `message` field, and persist it.
//! The crate keeps the same split the rest of the workspace uses:
//!
//! - **[`core`]**: Pure logic (URL templating, field extraction). No I/O.
//! - **[`io`]**: Side effects (stdin prompt, HTTP fetch, file write, config).
//!
//! [`pipeline`] sequences the stages and [`error::PipelineError`] is the single
//! failure type every stage reports.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod pipeline;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
