//! Task store gateway.
//!
//! The [`TaskStore`] trait is the narrow seam to the external task database.
//! [`Taskwarrior`] implements it by shelling out to the `task` binary; tests
//! substitute the in-memory fake from `test_support`. The gateway performs no
//! caching: every call re-reads current store state, which matters because
//! operator actions between calls change the results.

use std::process::Command;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use colored::Colorize;
use regex::Regex;
use tracing::debug;

use crate::core::types::Task;
use crate::io::process::{run_captured, run_passthrough};

/// Implicit scope for read queries: the review only ever reasons about
/// actionable tasks.
const PENDING_OR_WAITING: &str = "( status:pending or status:waiting )";

/// Narrow command interface to the external task database.
pub trait TaskStore {
    /// Line-oriented report query: one trimmed, non-empty value per line for
    /// the requested attribute (e.g. unique project names or task ids).
    fn query_lines(&self, filter: &str, attribute: &str) -> Result<Vec<String>>;

    /// Structured export query returning parsed task records.
    fn query_records(&self, filter: &str) -> Result<Vec<Task>>;

    /// Write command against tasks identified by an id list or filter, with a
    /// trailing modification suffix (e.g. `mod +next`). Failures propagate.
    fn mutate(&self, target: &str, command: &str) -> Result<()>;

    /// Formatted, human-readable display of the given tasks.
    fn render(&self, ids: &[String]) -> Result<()>;

    /// Final synchronization command.
    fn sync(&self) -> Result<()>;
}

/// Collapse a possibly multi-line command into one whitespace-normalized line.
pub fn normalize(command: &str) -> String {
    static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
    WHITESPACE.replace_all(command.trim(), " ").into_owned()
}

/// Prepend the implicit pending/waiting scope unless the filter already
/// constrains status.
pub fn scope_filter(filter: &str) -> String {
    if filter.contains("status:") {
        return filter.to_string();
    }
    if filter.is_empty() {
        return PENDING_OR_WAITING.to_string();
    }
    format!("{PENDING_OR_WAITING} {filter}")
}

/// Split captured report output into trimmed, non-empty lines.
fn parse_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Gateway to a Taskwarrior database via the `task` binary.
pub struct Taskwarrior {
    program: String,
}

impl Taskwarrior {
    pub fn new() -> Self {
        Self {
            program: "task".to_string(),
        }
    }

    /// Build the command for one normalized line, echoing it so the operator
    /// can see what ran.
    fn command(&self, line: &str) -> Command {
        println!("{}", format!("=> {} {line}", self.program).dimmed());
        debug!(command = line, "invoking task");
        let mut cmd = Command::new(&self.program);
        cmd.args(line.split_whitespace());
        cmd
    }
}

impl Default for Taskwarrior {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore for Taskwarrior {
    fn query_lines(&self, filter: &str, attribute: &str) -> Result<Vec<String>> {
        let line = normalize(&format!("{} _unique {attribute}", scope_filter(filter)));
        let output = run_captured(self.command(&line))?;
        Ok(parse_lines(&output))
    }

    fn query_records(&self, filter: &str) -> Result<Vec<Task>> {
        let line = normalize(&format!("{} export", scope_filter(filter)));
        let output = run_captured(self.command(&line))?;
        serde_json::from_str(&output).context("parse task export")
    }

    fn mutate(&self, target: &str, command: &str) -> Result<()> {
        let line = normalize(&format!("{target} {command}"));
        run_passthrough(self.command(&line))
    }

    fn render(&self, ids: &[String]) -> Result<()> {
        let line = normalize(&format!(
            "rc.report.next.filter= rc.verbose=label,sync next {}",
            ids.join(",")
        ));
        run_passthrough(self.command(&line))
    }

    fn sync(&self) -> Result<()> {
        run_passthrough(self.command("sync"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_internal_whitespace() {
        assert_eq!(
            normalize("  1,2   mod\n   -next "),
            "1,2 mod -next".to_string()
        );
    }

    #[test]
    fn scope_filter_prepends_implicit_status_scope() {
        assert_eq!(
            scope_filter("project.is:work"),
            "( status:pending or status:waiting ) project.is:work"
        );
        assert_eq!(scope_filter(""), "( status:pending or status:waiting )");
    }

    #[test]
    fn scope_filter_respects_caller_status_constraint() {
        assert_eq!(scope_filter("status:pending +in"), "status:pending +in");
    }

    #[test]
    fn parse_lines_drops_blanks_and_trims() {
        assert_eq!(
            parse_lines("work\n\n  work.api  \n"),
            vec!["work".to_string(), "work.api".to_string()]
        );
    }
}
