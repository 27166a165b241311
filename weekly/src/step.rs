//! Workflow step descriptors and the sequencing engine.
//!
//! The weekly review is a fixed, compiled-in list of steps executed exactly
//! once, in order, synchronously with respect to operator interaction. Step
//! behavior is a closed set of kinds dispatched by match; the `+next` review
//! delegates to the fixpoint loop in [`crate::review`].

use anyhow::Result;
use colored::Colorize;
use tracing::info;

use crate::io::prompt::Prompt;
use crate::io::store::TaskStore;
use crate::render;
use crate::review;

/// Behavior variant of a workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Free-form pause: the work happens outside this process.
    Pause,
    /// Walk every project and show its tasks for manual updating.
    ProjectReview,
    /// Enforce the one-`+next`-per-leaf-project invariant.
    NextReview,
    /// Show the `+someday` list for reconsideration.
    ReviewSomeday,
    /// Loop until the `+in` inbox is empty.
    ProcessIn,
}

/// Static step descriptor. The ordered step list is configuration, not state.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: StepKind,
}

/// The weekly review, in preferred order.
pub const WEEKLY_STEPS: &[Step] = &[
    Step {
        name: "Mini mind sweep",
        description: "Take a minute to mentally review if you have any stuff you have not yet captured. Create +in items about them (in another terminal).",
        kind: StepKind::Pause,
    },
    Step {
        name: "Project review",
        description: "  * Record any tasks not in the system for each project\n  * Mark any done tasks as such",
        kind: StepKind::ProjectReview,
    },
    Step {
        name: "+next review",
        description: "Make sure all projects have exactly one +next item",
        kind: StepKind::NextReview,
    },
    Step {
        name: "Process e-mail",
        description: "Ensure all e-mails in your inbox are handled. This can mean\n  * archiving them and adding an entry (+in) to Taskwarrior on another terminal\n  * organizing them into your e-mail based system - but make sure reminders get an item in Taskwarrior",
        kind: StepKind::Pause,
    },
    Step {
        name: "Check last two weeks and next two weeks in calendars",
        description: "This can often trigger ideas for new +in items",
        kind: StepKind::Pause,
    },
    Step {
        name: "Review +someday list",
        description: "Is there anything else that should be on here? Is it time to activate one of these projects?",
        kind: StepKind::ReviewSomeday,
    },
    Step {
        name: "Process +in",
        description: "Now is the time to turn all +in items into projects or actionable tasks",
        kind: StepKind::ProcessIn,
    },
];

/// Execute `steps` in order, then issue the final synchronization command.
///
/// Any error from a step is fatal to the whole workflow: no step is skipped
/// or retried, and the store is left in whatever state the last successful
/// mutation produced.
pub fn run_steps<S: TaskStore, P: Prompt>(store: &S, prompt: &mut P, steps: &[Step]) -> Result<()> {
    let total = steps.len();
    for (index, step) in steps.iter().enumerate() {
        let header = render::step_header(index + 1, total, step.name);
        println!("{}", render::boxed(&format!("{header}\n{}", step.description)));
        info!(step = step.name, "starting step");
        run_step(store, prompt, step, &header)?;
        println!("{header} {}", "done".green());
    }
    store.sync()
}

fn run_step<S: TaskStore, P: Prompt>(
    store: &S,
    prompt: &mut P,
    step: &Step,
    header: &str,
) -> Result<()> {
    match step.kind {
        StepKind::Pause => prompt.pause("Press Return when done"),
        StepKind::ProjectReview => project_review(store, prompt, header),
        StepKind::NextReview => review::run_until_clean(store, prompt),
        StepKind::ReviewSomeday => review_someday(store, prompt),
        StepKind::ProcessIn => process_in(store, prompt),
    }
}

/// Show each project's pending/waiting tasks and wait for the operator to
/// bring them up to date.
fn project_review<S: TaskStore, P: Prompt>(
    store: &S,
    prompt: &mut P,
    step_header: &str,
) -> Result<()> {
    let projects = store.query_lines("", "project")?;
    let total = projects.len();
    for (index, project) in projects.iter().enumerate() {
        let project_header = render::project_header(index + 1, total, project);
        println!("{}", render::boxed(&format!("{step_header}\n{project_header}")));
        let ids = store.query_lines(&format!("project.is:{project}"), "id")?;
        store.render(&ids)?;
        prompt.pause("Press Return once all tasks for the project updated")?;
    }
    Ok(())
}

fn review_someday<S: TaskStore, P: Prompt>(store: &S, prompt: &mut P) -> Result<()> {
    let ids = store.query_lines("+someday", "id")?;
    if !ids.is_empty() {
        store.render(&ids)?;
    }
    prompt.pause("Press Return when done")
}

/// Re-fetch the `+in` inbox after every acknowledgment; the step completes
/// only once the inbox is empty.
fn process_in<S: TaskStore, P: Prompt>(store: &S, prompt: &mut P) -> Result<()> {
    loop {
        let in_tasks = store.query_records("status:pending +in")?;
        if in_tasks.is_empty() {
            return Ok(());
        }
        let ids: Vec<String> = in_tasks.iter().map(|task| task.id.to_string()).collect();
        store.render(&ids)?;
        prompt.pause(&format!(
            "{} Press Return after you have processed the above +in items",
            "!".red()
        ))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeStore, Reply, ScriptedAnswer, ScriptedPrompt, tagged, task};

    fn pause_step(name: &'static str) -> Step {
        Step {
            name,
            description: "desc",
            kind: StepKind::Pause,
        }
    }

    #[test]
    fn weekly_steps_keep_preferred_order() {
        let names: Vec<&str> = WEEKLY_STEPS.iter().map(|step| step.name).collect();
        assert_eq!(
            names,
            vec![
                "Mini mind sweep",
                "Project review",
                "+next review",
                "Process e-mail",
                "Check last two weeks and next two weeks in calendars",
                "Review +someday list",
                "Process +in",
            ]
        );
    }

    #[test]
    fn engine_runs_every_step_then_syncs() {
        let store = FakeStore::new(Vec::new());
        let steps = [pause_step("one"), pause_step("two")];
        let mut prompt = ScriptedPrompt::new(
            store.table(),
            vec![
                ScriptedAnswer::reply(Reply::Ack),
                ScriptedAnswer::reply(Reply::Ack),
            ],
        );

        run_steps(&store, &mut prompt, &steps).expect("run steps");
        assert_eq!(store.log(), vec!["sync".to_string()]);
    }

    #[test]
    fn engine_aborts_on_step_failure_without_sync() {
        let store = FakeStore::new(Vec::new());
        let steps = [pause_step("one"), pause_step("two")];
        // Only one answer scripted: the second pause fails.
        let mut prompt =
            ScriptedPrompt::new(store.table(), vec![ScriptedAnswer::reply(Reply::Ack)]);

        let err = run_steps(&store, &mut prompt, &steps).unwrap_err();
        assert!(err.to_string().contains("unexpected prompt"));
        assert!(store.log().is_empty());
    }

    #[test]
    fn project_review_renders_and_pauses_per_project() {
        let store = FakeStore::new(vec![
            task(1, "a", "home"),
            task(2, "b", "work"),
            task(3, "c", "work"),
        ]);
        let mut prompt = ScriptedPrompt::new(
            store.table(),
            vec![
                ScriptedAnswer::reply(Reply::Ack),
                ScriptedAnswer::reply(Reply::Ack),
            ],
        );

        project_review(&store, &mut prompt, "header").expect("project review");
        assert_eq!(
            store.log(),
            vec!["render 1".to_string(), "render 2,3".to_string()]
        );
    }

    #[test]
    fn process_in_loops_until_inbox_empty() {
        let store = FakeStore::new(vec![
            tagged(1, "capture this", "in", &["in"]),
            tagged(2, "and this", "in", &["in"]),
        ]);
        // Each acknowledgment clears one inbox item.
        let mut prompt = ScriptedPrompt::new(
            store.table(),
            vec![
                ScriptedAnswer::reply(Reply::Ack).completing(1),
                ScriptedAnswer::reply(Reply::Ack).completing(2),
            ],
        );

        process_in(&store, &mut prompt).expect("process in");
        assert_eq!(
            store.log(),
            vec!["render 1,2".to_string(), "render 2".to_string()]
        );
    }

    #[test]
    fn process_in_with_empty_inbox_issues_no_prompt() {
        let store = FakeStore::new(vec![task(1, "normal", "work")]);
        let mut prompt = ScriptedPrompt::new(store.table(), Vec::new());
        process_in(&store, &mut prompt).expect("process in");
        assert!(store.log().is_empty());
    }
}
