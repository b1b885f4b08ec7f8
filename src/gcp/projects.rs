//! GCP Projects
//!
//! Functions for listing the projects visible to the signed-in account.

use super::client::HealthcareClient;
use anyhow::Result;
use serde_json::Value;
use urlencoding::encode;

/// Project information
#[derive(Debug, Clone)]
pub struct Project {
    pub project_id: String,
    pub name: String,
    pub project_number: String,
    pub lifecycle_state: String,
}

impl From<&Value> for Project {
    fn from(value: &Value) -> Self {
        Self {
            project_id: value
                .get("projectId")
                .and_then(|v| v.as_str())
                .unwrap_or("-")
                .to_string(),
            name: value
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("-")
                .to_string(),
            project_number: value
                .get("projectNumber")
                .and_then(|v| v.as_str())
                .unwrap_or("-")
                .to_string(),
            lifecycle_state: value
                .get("lifecycleState")
                .and_then(|v| v.as_str())
                .unwrap_or("UNKNOWN")
                .to_string(),
        }
    }
}

/// List all accessible GCP projects, following `nextPageToken` until the
/// server stops returning one. Pages are appended in fetch order; a failure
/// on any page discards the pages accumulated so far.
///
/// `None` means the call was abandoned pending sign-in.
pub async fn list_projects(client: &HealthcareClient) -> Result<Option<Vec<Project>>> {
    let mut all_projects = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let url = match &page_token {
            Some(token) => format!(
                "{}?pageToken={}",
                client.resourcemanager_url("projects"),
                encode(token)
            ),
            None => client.resourcemanager_url("projects"),
        };

        let Some(response) = client.get_json(&url).await? else {
            return Ok(None);
        };

        if let Some(items) = response.get("projects").and_then(|v| v.as_array()) {
            all_projects.extend(items.iter().map(Project::from));
        }

        page_token = response
            .get("nextPageToken")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        if page_token.is_none() {
            break;
        }
    }

    Ok(Some(all_projects))
}

/// Get the IDs of active projects as a simple list
pub async fn list_project_ids(client: &HealthcareClient) -> Result<Option<Vec<String>>> {
    let Some(projects) = list_projects(client).await? else {
        return Ok(None);
    };

    Ok(Some(
        projects
            .into_iter()
            .filter(|p| p.lifecycle_state == "ACTIVE")
            .map(|p| p.project_id)
            .collect(),
    ))
}
