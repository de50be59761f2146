//! Blocking HTTP client for the Motion API.

use crate::config::Config;
use crate::types::{Project, ProjectList, Task, TaskList, Workspace, WorkspaceList};
use anyhow::{bail, Context, Result};
use std::time::Duration;

const API_TIMEOUT: Duration = Duration::from_secs(15);

/// Thin client over the three read-only endpoints the report needs.
/// All calls are sequential blocking round-trips; no retries.
pub struct MotionClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl MotionClient {
    pub fn new(config: &Config) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(API_TIMEOUT))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: config.base_url.clone(),
            api_key: config.api_key_header().to_string(),
        }
    }

    pub fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        let body = self.get("/workspaces", &[])?;
        let list: WorkspaceList =
            serde_json::from_str(&body).context("Failed to parse workspace list")?;
        Ok(list.workspaces)
    }

    pub fn list_projects(&self, workspace_id: &str) -> Result<Vec<Project>> {
        let body = self.get("/projects", &[("workspaceId", workspace_id)])?;
        let list: ProjectList =
            serde_json::from_str(&body).context("Failed to parse project list")?;
        Ok(list.projects)
    }

    /// Lists every task in the workspace, open and completed, including
    /// recurring instances.
    pub fn list_tasks(&self, workspace_id: &str) -> Result<Vec<Task>> {
        let body = self.get(
            "/tasks",
            &[("includeAllStatuses", "true"), ("workspaceId", workspace_id)],
        )?;
        let list: TaskList = serde_json::from_str(&body).context("Failed to parse task list")?;
        Ok(list.tasks)
    }

    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .agent
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .header("Content-Type", "application/json");
        for (key, value) in query {
            request = request.query(*key, *value);
        }

        let mut response = request
            .call()
            .with_context(|| format!("GET {} failed", path))?;
        let status = response.status();
        let body = response
            .body_mut()
            .read_to_string()
            .with_context(|| format!("Failed to read response body from {}", path))?;

        if status.as_u16() != 200 {
            bail!("GET {} returned {}: {}", path, status.as_u16(), body);
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubServer;

    fn client_for(server: &StubServer) -> MotionClient {
        MotionClient::new(&Config {
            api_key: Some("test-key".to_string()),
            base_url: server.base_url(),
        })
    }

    #[test]
    fn test_list_workspaces_ok() {
        let server = StubServer::start(vec![(
            "/workspaces",
            200,
            r#"{"workspaces": [{"id": "w1", "name": "Eng"}]}"#,
        )]);

        let workspaces = client_for(&server).list_workspaces().unwrap();
        assert_eq!(workspaces.len(), 1);
        assert_eq!(workspaces[0].name, "Eng");
    }

    #[test]
    fn test_list_workspaces_non_200_is_error() {
        let server = StubServer::start(vec![("/workspaces", 401, r#"{"error": "unauthorized"}"#)]);

        let err = client_for(&server).list_workspaces().unwrap_err();
        assert!(err.to_string().contains("401"), "unexpected error: {err:#}");
    }

    #[test]
    fn test_list_tasks_sends_workspace_query() {
        let server = StubServer::start(vec![(
            "workspaceId=w1",
            200,
            r#"{"tasks": [{"id": "t1", "name": "Fix bug"}]}"#,
        )]);

        let tasks = client_for(&server).list_tasks("w1").unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Fix bug");
    }

    #[test]
    fn test_malformed_body_is_error() {
        let server = StubServer::start(vec![("/workspaces", 200, "not json")]);

        let err = client_for(&server).list_workspaces().unwrap_err();
        assert!(err.to_string().contains("parse"), "unexpected error: {err:#}");
    }
}
