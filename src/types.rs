//! Wire types for the Motion API and the derived report row.
//!
//! The API uses camelCase field names and omits fields freely, so every
//! optional field is modeled explicitly rather than defaulted at the
//! access site. Unknown fields are ignored.

use serde::Deserialize;

/// Response envelope for `GET /workspaces`.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceList {
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
}

/// A top-level tenant that scopes all project and task queries.
#[derive(Debug, Clone, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub id: String,
    #[serde(default = "unnamed_workspace")]
    pub name: String,
}

fn unnamed_workspace() -> String {
    "Unnamed Workspace".to_string()
}

/// Response envelope for `GET /projects?workspaceId=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Used only to resolve a task's project id to a display name.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// Response envelope for `GET /tasks?...`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskList {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub completed: bool,
    pub completed_time: Option<String>,
    pub last_interacted_time: Option<String>,
    /// Present iff this task is an instance of a recurring template.
    pub parent_recurring_task_id: Option<String>,
    pub duration: Option<DurationField>,
    #[serde(default)]
    pub chunks: Vec<Chunk>,
    pub project: Option<ProjectRef>,
    #[serde(default)]
    pub assignees: Vec<Assignee>,
}

/// Motion returns `duration` either as integer minutes or as a label
/// such as `"NONE"` or `"REMINDER"`. Only integer minutes count toward
/// a report row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DurationField {
    Minutes(i64),
    Label(String),
}

impl DurationField {
    pub fn minutes(&self) -> Option<i64> {
        match self {
            DurationField::Minutes(m) => Some(*m),
            DurationField::Label(_) => None,
        }
    }
}

/// A partial work unit recorded against an in-progress task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    pub completed_time: Option<String>,
    pub duration: Option<DurationField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRef {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assignee {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Completed,
    InProgress,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Completed => write!(f, "Completed"),
            TaskStatus::InProgress => write!(f, "In Progress"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Regular,
    Recurring,
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskKind::Regular => write!(f, "Regular"),
            TaskKind::Recurring => write!(f, "Recurring"),
        }
    }
}

/// One exported row, one per task x assignee.
///
/// A task with several assignees yields one row per assignee with the
/// full duration repeated on each, so multi-assignee tasks intentionally
/// count their duration once per assignee in the pivot.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub task_id: String,
    pub workspace: String,
    pub project: String,
    pub task_name: String,
    pub assignee: String,
    pub status: TaskStatus,
    pub kind: TaskKind,
    /// Reference timestamp formatted as `%Y-%m-%d %H:%M`.
    pub last_active: String,
    /// Duration rendered as `"2h 5m"` or `"45m"`.
    pub duration_label: String,
    pub duration_minutes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_field_integer() {
        let d: DurationField = serde_json::from_str("90").unwrap();
        assert_eq!(d.minutes(), Some(90));
    }

    #[test]
    fn test_duration_field_label() {
        let d: DurationField = serde_json::from_str("\"REMINDER\"").unwrap();
        assert_eq!(d, DurationField::Label("REMINDER".to_string()));
        assert_eq!(d.minutes(), None);
    }

    #[test]
    fn test_task_decodes_camel_case_fields() {
        let task: Task = serde_json::from_str(
            r#"{
                "id": "t1",
                "name": "Fix bug",
                "completed": true,
                "completedTime": "2025-04-12T09:30:00Z",
                "parentRecurringTaskId": "rec-1",
                "duration": 90,
                "project": {"id": "p1"},
                "assignees": [{"name": "Ann"}]
            }"#,
        )
        .unwrap();

        assert!(task.completed);
        assert_eq!(task.completed_time.as_deref(), Some("2025-04-12T09:30:00Z"));
        assert_eq!(task.parent_recurring_task_id.as_deref(), Some("rec-1"));
        assert_eq!(task.duration, Some(DurationField::Minutes(90)));
        assert_eq!(task.project.unwrap().id.as_deref(), Some("p1"));
        assert_eq!(task.assignees[0].name.as_deref(), Some("Ann"));
    }

    #[test]
    fn test_task_defaults_for_missing_fields() {
        let task: Task = serde_json::from_str(r#"{"id": "t2"}"#).unwrap();
        assert!(!task.completed);
        assert!(task.completed_time.is_none());
        assert!(task.chunks.is_empty());
        assert!(task.assignees.is_empty());
        assert!(task.duration.is_none());
    }

    #[test]
    fn test_workspace_name_defaults_when_absent() {
        let list: WorkspaceList =
            serde_json::from_str(r#"{"workspaces": [{"id": "w1"}]}"#).unwrap();
        assert_eq!(list.workspaces[0].name, "Unnamed Workspace");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let list: TaskList = serde_json::from_str(
            r#"{"tasks": [{"id": "t", "priority": "HIGH", "labels": []}], "meta": {}}"#,
        )
        .unwrap();
        assert_eq!(list.tasks.len(), 1);
    }

    #[test]
    fn test_status_and_kind_labels() {
        assert_eq!(TaskStatus::Completed.to_string(), "Completed");
        assert_eq!(TaskStatus::InProgress.to_string(), "In Progress");
        assert_eq!(TaskKind::Regular.to_string(), "Regular");
        assert_eq!(TaskKind::Recurring.to_string(), "Recurring");
    }
}
