//! Fixpoint loop for the `+next` review.
//!
//! Repeatedly scans the project set for the first structural violation and
//! drives an interactive repair, then re-scans from a fresh project list.
//! The loop terminates only when no violation remains. It places no bound on
//! iteration count: an unrepaired violation leaves the process blocked on an
//! explicit prompt, never busy-spinning.

use anyhow::Result;
use colored::Colorize;
use tracing::{debug, info};

use crate::core::project::child_projects;
use crate::core::violation::{Violation, classify_project};
use crate::io::prompt::{Choice, Prompt};
use crate::io::store::TaskStore;

/// Find the first invariant violation across `projects`, in the order the
/// store enumerates them.
///
/// Short-circuits on the first hit; callers must re-invoke after each repair
/// because fixing one project can change classifications elsewhere.
pub fn scan_for_violation<S: TaskStore>(
    store: &S,
    projects: &[String],
) -> Result<Option<Violation>> {
    for project in projects {
        let children = child_projects(project, projects);
        let filter = format!("project.is:{project}");
        let task_ids = store.query_lines(&filter, "id")?;
        let next_ids = store.query_lines(&format!("{filter} +next"), "id")?;
        if let Some(violation) = classify_project(project, &children, &task_ids, &next_ids) {
            debug!(project = %project, ?violation, "violation found");
            return Ok(Some(violation));
        }
    }
    Ok(None)
}

/// Detect and repair violations until the project tree is clean.
///
/// Every iteration re-fetches the full project list; repairs never continue
/// scanning with stale data.
pub fn run_until_clean<S: TaskStore, P: Prompt>(store: &S, prompt: &mut P) -> Result<()> {
    loop {
        let projects = store.query_lines("", "project")?;
        match scan_for_violation(store, &projects)? {
            None => {
                info!("all projects satisfy the +next invariant");
                return Ok(());
            }
            Some(violation) => repair(store, prompt, &violation)?,
        }
    }
}

fn repair<S: TaskStore, P: Prompt>(store: &S, prompt: &mut P, violation: &Violation) -> Result<()> {
    match violation {
        Violation::NonLeafOwnsTasks {
            project,
            task_ids,
            child_projects,
        } => {
            // No automatic repair: the operator reassigns or completes the
            // tasks in the store, then the next scan re-checks.
            println!(
                "{}",
                format!("Non-leaf project \"{project}\" must have no tasks").red()
            );
            println!("Child projects: {}", child_projects.join(", "));
            store.render(task_ids)?;
            prompt.pause("Press Return when done")?;
        }
        Violation::MultipleNext { project, task_ids } => {
            // The candidates are the over-tagged ids; every non-selected one
            // loses its tag.
            set_next_task(
                store,
                prompt,
                task_ids,
                task_ids,
                &format!(
                    "{} Leaf project \"{project}\" must have no more than one +next task, has multiple. Choose one.",
                    "!".red()
                ),
            )?;
        }
        Violation::MissingNext { project, task_ids } => {
            // None of the candidates carry the tag, so there is nothing to
            // untag.
            set_next_task(
                store,
                prompt,
                task_ids,
                &[],
                &format!(
                    "{} Leaf project \"{project}\" must have a +next task, has none. Choose one.",
                    "!".red()
                ),
            )?;
        }
    }
    Ok(())
}

/// Let the operator pick the single `+next` task among `candidate_ids`:
/// untag every non-selected id in `tagged_ids` (one mutate call), then tag
/// the chosen id.
fn set_next_task<S: TaskStore, P: Prompt>(
    store: &S,
    prompt: &mut P,
    candidate_ids: &[String],
    tagged_ids: &[String],
    message: &str,
) -> Result<()> {
    let records = store.query_records(&candidate_ids.join(","))?;
    let choices: Vec<Choice> = records
        .iter()
        .map(|task| Choice {
            label: format!("{} {}", task.id.to_string().dimmed(), task.description),
            value: task.id.to_string(),
        })
        .collect();
    let chosen = prompt.choose(message, &choices)?;

    let rest: Vec<&str> = tagged_ids
        .iter()
        .map(String::as_str)
        .filter(|id| *id != chosen)
        .collect();
    if !rest.is_empty() {
        store.mutate(&rest.join(","), "mod -next")?;
    }
    store.mutate(&chosen, "mod +next")
}
