//! Leaf/non-leaf classification over dotted project paths.
//!
//! Projects are not first-class entities in the store; they are derived from
//! the distinct `project` values across pending/waiting tasks. A project is a
//! leaf when no other project nests under it by dot-path. Classification is
//! recomputed from a fresh project enumeration every time, because task
//! mutations between scans can change it.

/// Return the projects in `all` nested strictly under `project` by dot-path.
pub fn child_projects<'a>(project: &str, all: &'a [String]) -> Vec<&'a str> {
    let prefix = format!("{project}.");
    all.iter()
        .filter(|other| other.starts_with(&prefix))
        .map(String::as_str)
        .collect()
}

/// True if no other project in `all` has `project` as a dot-prefix ancestor.
pub fn is_leaf(project: &str, all: &[String]) -> bool {
    child_projects(project, all).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projects(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn project_without_descendants_is_leaf() {
        let all = projects(&["work", "home"]);
        assert!(is_leaf("work", &all));
        assert!(is_leaf("home", &all));
    }

    #[test]
    fn adding_a_child_flips_parent_to_non_leaf() {
        let mut all = projects(&["work"]);
        assert!(is_leaf("work", &all));

        all.push("work.api".to_string());
        assert!(!is_leaf("work", &all));
        assert!(is_leaf("work.api", &all));
    }

    #[test]
    fn child_match_requires_dot_boundary() {
        // "workshop" shares a prefix with "work" but is not nested under it.
        let all = projects(&["work", "workshop"]);
        assert!(is_leaf("work", &all));
        assert!(child_projects("work", &all).is_empty());
    }

    #[test]
    fn child_projects_collects_all_descendants() {
        let all = projects(&["work", "work.api", "work.ui", "work.api.auth"]);
        assert_eq!(
            child_projects("work", &all),
            vec!["work.api", "work.ui", "work.api.auth"]
        );
        assert_eq!(child_projects("work.api", &all), vec!["work.api.auth"]);
    }
}
