//! I/O seams for the review workflow.

pub mod process;
pub mod prompt;
pub mod store;
