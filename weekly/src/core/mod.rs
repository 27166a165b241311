//! Deterministic, pure logic shared by the review workflow.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod project;
pub mod types;
pub mod violation;
