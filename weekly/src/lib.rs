//! Interactive weekly-review driver for Taskwarrior.
//!
//! This crate walks an operator through a fixed sequence of review steps over
//! a hierarchical task database. The central piece is the `+next` review: a
//! fixpoint loop that detects violations of the project structure (every leaf
//! project carries exactly one `+next` task, non-leaf projects carry none)
//! and interactively repairs them. The architecture enforces a strict
//! separation:
//!
//! - **[`core`]**: Pure, deterministic logic (project classification,
//!   violation detection). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (`task` invocation, operator
//!   prompts). Isolated behind traits to enable fakes in tests.
//!
//! Orchestration modules ([`step`], [`review`]) coordinate core logic with
//! I/O to implement the workflow.

pub mod core;
pub mod io;
pub mod logging;
pub mod render;
pub mod review;
pub mod step;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
