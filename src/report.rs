//! Fetches tasks across all workspaces and derives report rows for one
//! month.

use crate::api::MotionClient;
use crate::types::{ReportRow, Task, TaskKind, TaskStatus};
use chrono::{DateTime, Datelike, FixedOffset};
use std::collections::HashMap;

const NO_PROJECT: &str = "No Project";
const UNASSIGNED: &str = "Unassigned";

/// The month/year a row's reference timestamp must fall in.
#[derive(Debug, Clone, Copy)]
pub struct MonthFilter {
    pub month: u32,
    pub year: i32,
}

impl MonthFilter {
    fn matches(&self, ts: &DateTime<FixedOffset>) -> bool {
        ts.month() == self.month && ts.year() == self.year
    }
}

/// Walks workspace -> projects -> tasks and accumulates report rows.
///
/// Failures are absorbed here per their severity: a failed workspace
/// list ends the whole run with no rows, a failed task list skips that
/// workspace, a failed project list only degrades project names to
/// "No Project". Nothing propagates past this function.
///
/// `progress` receives user-visible status lines; warnings also go to
/// the tracing subscriber when one is installed.
pub fn fetch_report_rows(
    client: &MotionClient,
    filter: MonthFilter,
    progress: &mut dyn FnMut(String),
) -> Vec<ReportRow> {
    let workspaces = match client.list_workspaces() {
        Ok(workspaces) => workspaces,
        Err(e) => {
            tracing::error!("workspace list failed: {e:#}");
            progress(format!("Failed to fetch workspaces: {e:#}"));
            return Vec::new();
        }
    };

    if workspaces.is_empty() {
        progress("No workspaces found.".to_string());
        return Vec::new();
    }

    let mut rows = Vec::new();
    for workspace in &workspaces {
        progress(format!("Fetching data for workspace: {}", workspace.name));

        let projects: HashMap<String, String> = match client.list_projects(&workspace.id) {
            Ok(projects) => projects.into_iter().map(|p| (p.id, p.name)).collect(),
            Err(e) => {
                // Degraded: tasks in this workspace will show "No Project".
                tracing::warn!(workspace = %workspace.name, "project list failed: {e:#}");
                HashMap::new()
            }
        };

        let tasks = match client.list_tasks(&workspace.id) {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!(workspace = %workspace.name, "task list failed: {e:#}");
                progress(format!("Tasks error for {}: {e:#}", workspace.name));
                continue;
            }
        };

        for task in &tasks {
            rows.extend(rows_for_task(task, &workspace.name, &projects, filter));
        }
    }

    rows
}

/// Derives zero or more rows from one task, applying the month filter
/// and the duration rules. Returns one row per assignee, each carrying
/// the task's full duration.
pub fn rows_for_task(
    task: &Task,
    workspace: &str,
    projects: &HashMap<String, String>,
    filter: MonthFilter,
) -> Vec<ReportRow> {
    let reference_raw = if task.completed {
        task.completed_time.as_deref()
    } else {
        task.last_interacted_time.as_deref()
    };
    let Some(raw) = reference_raw else {
        return Vec::new();
    };
    let Some(reference) = parse_reference_time(raw) else {
        tracing::warn!(task = %task.id, timestamp = raw, "skipping task with unparsable timestamp");
        return Vec::new();
    };
    if !filter.matches(&reference) {
        return Vec::new();
    }
    let last_active = reference.format("%Y-%m-%d %H:%M").to_string();

    let duration_minutes = if task.completed {
        // Completed tasks must carry an integer duration.
        match task.duration.as_ref().and_then(|d| d.minutes()) {
            Some(minutes) => minutes,
            None => return Vec::new(),
        }
    } else {
        // In-progress tasks count only chunks that actually finished.
        let total: i64 = task
            .chunks
            .iter()
            .filter(|chunk| chunk.completed_time.is_some())
            .filter_map(|chunk| chunk.duration.as_ref().and_then(|d| d.minutes()))
            .sum();
        if total <= 0 {
            return Vec::new();
        }
        total
    };

    let status = if task.completed {
        TaskStatus::Completed
    } else {
        TaskStatus::InProgress
    };
    let kind = if task.parent_recurring_task_id.is_some() {
        TaskKind::Recurring
    } else {
        TaskKind::Regular
    };

    let project = task
        .project
        .as_ref()
        .and_then(|p| p.id.as_deref())
        .and_then(|id| projects.get(id))
        .map(String::as_str)
        .unwrap_or(NO_PROJECT)
        .to_string();

    let assignees: Vec<String> = if task.assignees.is_empty() {
        vec![UNASSIGNED.to_string()]
    } else {
        task.assignees
            .iter()
            .map(|a| a.name.clone().unwrap_or_else(|| "Unknown".to_string()))
            .collect()
    };

    let duration_label = format_duration(duration_minutes);
    assignees
        .into_iter()
        .map(|assignee| ReportRow {
            task_id: task.id.clone(),
            workspace: workspace.to_string(),
            project: project.clone(),
            task_name: task.name.clone(),
            assignee,
            status,
            kind,
            last_active: last_active.clone(),
            duration_label: duration_label.clone(),
            duration_minutes,
        })
        .collect()
}

/// Parses an RFC 3339 timestamp, additionally accepting a trailing `Z`
/// by rewriting it to an explicit `+00:00` offset.
pub fn parse_reference_time(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
        let head = raw.strip_suffix('Z')?;
        DateTime::parse_from_rfc3339(&format!("{head}+00:00")).ok()
    })
}

/// Renders minutes as `"2h 5m"`, or just `"45m"` below one hour.
pub fn format_duration(minutes: i64) -> String {
    let (h, m) = (minutes / 60, minutes % 60);
    if h > 0 {
        format!("{h}h {m}m")
    } else {
        format!("{m}m")
    }
}
