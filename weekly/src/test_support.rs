//! Test-only fakes: an in-memory task store and a scripted prompt.
//!
//! The task table is shared between the store and the prompt so a scripted
//! acknowledgment can carry an operator-side edit (reassigning or completing
//! a task in another terminal) that becomes visible to the next scan.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::{Result, bail};

use crate::core::types::{Status, Task};
use crate::io::prompt::{Choice, Prompt};
use crate::io::store::TaskStore;

/// One row in the fake store.
#[derive(Debug, Clone)]
pub struct FakeTask {
    pub id: u64,
    pub description: String,
    pub project: Option<String>,
    pub status: Status,
    pub tags: Vec<String>,
}

/// Create a pending task with no tags.
pub fn task(id: u64, description: &str, project: &str) -> FakeTask {
    FakeTask {
        id,
        description: description.to_string(),
        project: Some(project.to_string()),
        status: Status::Pending,
        tags: Vec::new(),
    }
}

/// Create a pending task with explicit tags.
pub fn tagged(id: u64, description: &str, project: &str, tags: &[&str]) -> FakeTask {
    let mut t = task(id, description, project);
    t.tags = tags.iter().map(|tag| (*tag).to_string()).collect();
    t
}

/// Shared mutable task table.
pub type TaskTable = Rc<RefCell<Vec<FakeTask>>>;

/// Filter recognizer covering the shapes the crate emits: status constraints,
/// `project.is:`, `+tag`, and bare id lists. Defaults to the implicit
/// pending/waiting scope when no status is constrained.
#[derive(Debug, Default)]
struct ParsedFilter {
    statuses: Vec<Status>,
    project: Option<String>,
    tags: Vec<String>,
    ids: Option<Vec<u64>>,
}

fn parse_filter(filter: &str) -> Result<ParsedFilter> {
    let mut parsed = ParsedFilter::default();
    for token in filter.split_whitespace() {
        if matches!(token, "(" | ")" | "or") {
            continue;
        }
        if let Some(status) = token.strip_prefix("status:") {
            parsed.statuses.push(match status {
                "pending" => Status::Pending,
                "waiting" => Status::Waiting,
                "completed" => Status::Completed,
                "deleted" => Status::Deleted,
                other => bail!("fake store: unknown status '{other}'"),
            });
        } else if let Some(project) = token.strip_prefix("project.is:") {
            parsed.project = Some(project.to_string());
        } else if let Some(tag) = token.strip_prefix('+') {
            parsed.tags.push(tag.to_string());
        } else if token.chars().all(|c| c.is_ascii_digit() || c == ',') {
            let ids = token
                .split(',')
                .filter(|part| !part.is_empty())
                .map(|part| part.parse::<u64>())
                .collect::<Result<Vec<_>, _>>()?;
            parsed.ids = Some(ids);
        } else {
            bail!("fake store: unsupported filter token '{token}'");
        }
    }
    if parsed.statuses.is_empty() {
        parsed.statuses = vec![Status::Pending, Status::Waiting];
    }
    Ok(parsed)
}

impl ParsedFilter {
    fn matches(&self, task: &FakeTask) -> bool {
        if !self.statuses.contains(&task.status) {
            return false;
        }
        if let Some(project) = &self.project
            && task.project.as_deref() != Some(project.as_str())
        {
            return false;
        }
        if let Some(ids) = &self.ids
            && !ids.contains(&task.id)
        {
            return false;
        }
        self.tags
            .iter()
            .all(|tag| task.tags.iter().any(|t| t == tag))
    }
}

/// In-memory [`TaskStore`] with a call log.
pub struct FakeStore {
    tasks: TaskTable,
    log: RefCell<Vec<String>>,
}

impl FakeStore {
    pub fn new(tasks: Vec<FakeTask>) -> Self {
        Self {
            tasks: Rc::new(RefCell::new(tasks)),
            log: RefCell::new(Vec::new()),
        }
    }

    /// Handle to the shared task table, for scripted prompts and assertions.
    pub fn table(&self) -> TaskTable {
        Rc::clone(&self.tasks)
    }

    /// Mutations, renders, and syncs in call order.
    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    fn matching(&self, filter: &str) -> Result<Vec<FakeTask>> {
        let parsed = parse_filter(filter)?;
        Ok(self
            .tasks
            .borrow()
            .iter()
            .filter(|task| parsed.matches(task))
            .cloned()
            .collect())
    }
}

impl TaskStore for FakeStore {
    fn query_lines(&self, filter: &str, attribute: &str) -> Result<Vec<String>> {
        let matching = self.matching(filter)?;
        match attribute {
            "project" => {
                let mut projects = Vec::new();
                for task in &matching {
                    if let Some(project) = &task.project
                        && !projects.contains(project)
                    {
                        projects.push(project.clone());
                    }
                }
                Ok(projects)
            }
            "id" => Ok(matching.iter().map(|task| task.id.to_string()).collect()),
            other => bail!("fake store: unsupported attribute '{other}'"),
        }
    }

    fn query_records(&self, filter: &str) -> Result<Vec<Task>> {
        Ok(self
            .matching(filter)?
            .into_iter()
            .map(|task| Task {
                id: task.id,
                description: task.description,
                project: task.project,
                status: task.status,
                tags: task.tags,
            })
            .collect())
    }

    fn mutate(&self, target: &str, command: &str) -> Result<()> {
        self.log.borrow_mut().push(format!("mutate {target} {command}"));
        let ids = target
            .split(',')
            .map(|part| part.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()?;

        let mut words = command.split_whitespace();
        if words.next() != Some("mod") {
            bail!("fake store: unsupported mutation '{command}'");
        }
        let mut tasks = self.tasks.borrow_mut();
        for word in words {
            for task in tasks.iter_mut().filter(|task| ids.contains(&task.id)) {
                if let Some(tag) = word.strip_prefix('+') {
                    if !task.tags.iter().any(|t| t == tag) {
                        task.tags.push(tag.to_string());
                    }
                } else if let Some(tag) = word.strip_prefix('-') {
                    task.tags.retain(|t| t != tag);
                } else {
                    bail!("fake store: unsupported modification '{word}'");
                }
            }
        }
        Ok(())
    }

    fn render(&self, ids: &[String]) -> Result<()> {
        self.log.borrow_mut().push(format!("render {}", ids.join(",")));
        Ok(())
    }

    fn sync(&self) -> Result<()> {
        self.log.borrow_mut().push("sync".to_string());
        Ok(())
    }
}

/// Scripted operator reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Ack,
    Choice(String),
}

/// Edit applied to the shared task table when an answer is consumed, modeling
/// operator actions taken outside this process.
#[derive(Debug, Clone)]
pub enum Edit {
    Reassign { id: u64, project: String },
    Complete { id: u64 },
}

/// One scripted answer, optionally carrying a store edit.
#[derive(Debug, Clone)]
pub struct ScriptedAnswer {
    pub reply: Reply,
    pub edit: Option<Edit>,
}

impl ScriptedAnswer {
    pub fn reply(reply: Reply) -> Self {
        Self { reply, edit: None }
    }

    pub fn reassigning(mut self, id: u64, project: &str) -> Self {
        self.edit = Some(Edit::Reassign {
            id,
            project: project.to_string(),
        });
        self
    }

    pub fn completing(mut self, id: u64) -> Self {
        self.edit = Some(Edit::Complete { id });
        self
    }
}

/// [`Prompt`] that serves queued answers and fails on any unexpected prompt.
pub struct ScriptedPrompt {
    tasks: TaskTable,
    answers: VecDeque<ScriptedAnswer>,
}

impl ScriptedPrompt {
    pub fn new(tasks: TaskTable, answers: Vec<ScriptedAnswer>) -> Self {
        Self {
            tasks,
            answers: answers.into(),
        }
    }

    fn next_answer(&mut self, message: &str) -> Result<ScriptedAnswer> {
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected prompt: {message}"))
    }

    fn apply_edit(&self, edit: Option<Edit>) {
        let mut tasks = self.tasks.borrow_mut();
        match edit {
            Some(Edit::Reassign { id, project }) => {
                for task in tasks.iter_mut().filter(|task| task.id == id) {
                    task.project = Some(project.clone());
                }
            }
            Some(Edit::Complete { id }) => {
                for task in tasks.iter_mut().filter(|task| task.id == id) {
                    task.status = Status::Completed;
                }
            }
            None => {}
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn pause(&mut self, message: &str) -> Result<()> {
        let answer = self.next_answer(message)?;
        match answer.reply {
            Reply::Ack => {
                self.apply_edit(answer.edit);
                Ok(())
            }
            Reply::Choice(_) => bail!("scripted choice served to a pause prompt: {message}"),
        }
    }

    fn choose(&mut self, message: &str, choices: &[Choice]) -> Result<String> {
        let answer = self.next_answer(message)?;
        match answer.reply {
            Reply::Choice(value) => {
                if !choices.iter().any(|choice| choice.value == value) {
                    bail!("scripted choice '{value}' not among offered choices");
                }
                self.apply_edit(answer.edit);
                Ok(value)
            }
            Reply::Ack => bail!("scripted ack served to a choice prompt: {message}"),
        }
    }
}
