//! Violations of the project/next-task structural invariant.
//!
//! At workflow completion every project must satisfy exactly one of: non-leaf
//! with zero directly-assigned tasks, or leaf with exactly one `+next` task
//! among its pending/waiting tasks. A [`Violation`] carries enough data to
//! drive an interactive repair.

/// A detected breach of the structural invariant for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A non-leaf project owns directly-assigned tasks. Repair is manual:
    /// the operator reassigns or completes them in the store.
    NonLeafOwnsTasks {
        project: String,
        task_ids: Vec<String>,
        child_projects: Vec<String>,
    },
    /// A leaf project has more than one `+next` task; `task_ids` are the
    /// over-tagged ids the operator chooses among.
    MultipleNext {
        project: String,
        task_ids: Vec<String>,
    },
    /// A leaf project has no `+next` task; `task_ids` are all of its
    /// pending/waiting tasks, the candidates for tagging.
    MissingNext {
        project: String,
        task_ids: Vec<String>,
    },
}

impl Violation {
    pub fn project(&self) -> &str {
        match self {
            Violation::NonLeafOwnsTasks { project, .. }
            | Violation::MultipleNext { project, .. }
            | Violation::MissingNext { project, .. } => project,
        }
    }
}

/// Classify one project against the invariant.
///
/// `task_ids` are the project's directly-assigned pending/waiting tasks and
/// `next_task_ids` the subset tagged `+next`. Returns the first matching
/// violation, or `None` when the project is consistent (leaf with exactly
/// one next task, or non-leaf with no tasks).
pub fn classify_project(
    project: &str,
    child_projects: &[&str],
    task_ids: &[String],
    next_task_ids: &[String],
) -> Option<Violation> {
    let is_leaf = child_projects.is_empty();

    if !is_leaf {
        if task_ids.is_empty() {
            return None;
        }
        return Some(Violation::NonLeafOwnsTasks {
            project: project.to_string(),
            task_ids: task_ids.to_vec(),
            child_projects: child_projects.iter().map(|c| (*c).to_string()).collect(),
        });
    }

    if next_task_ids.len() > 1 {
        return Some(Violation::MultipleNext {
            project: project.to_string(),
            task_ids: next_task_ids.to_vec(),
        });
    }
    if next_task_ids.is_empty() {
        return Some(Violation::MissingNext {
            project: project.to_string(),
            task_ids: task_ids.to_vec(),
        });
    }
    None
}
