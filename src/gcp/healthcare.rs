//! Cloud Healthcare resource hierarchy
//!
//! Listers for locations, datasets, and DICOM stores. Each maps the API's
//! fully-qualified resource names down to their trailing identifier, e.g.
//! `projects/x/locations/y/datasets/z` becomes `z`.

use super::client::HealthcareClient;
use anyhow::Result;
use serde_json::Value;

/// Strip everything before the last `/` in a resource name
pub fn trailing_segment(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Project the `name` field of each record under `key` to its trailing
/// segment. Records without a `name` are skipped.
fn resource_ids(response: &Value, key: &str) -> Vec<String> {
    response
        .get(key)
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("name").and_then(|v| v.as_str()))
                .map(|name| trailing_segment(name).to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// List the Healthcare API locations available to a project.
///
/// `None` means the call was abandoned pending sign-in.
pub async fn list_locations(
    client: &HealthcareClient,
    project: &str,
) -> Result<Option<Vec<String>>> {
    let url = client.locations_url(project);
    let Some(response) = client.get_json(&url).await? else {
        return Ok(None);
    };

    Ok(Some(resource_ids(&response, "locations")))
}

/// List the datasets in a project location.
///
/// Only the first server page is read, so the result silently truncates at
/// the server's default page size. Accepted limitation.
pub async fn list_datasets(
    client: &HealthcareClient,
    project: &str,
    location: &str,
) -> Result<Option<Vec<String>>> {
    let url = client.datasets_url(project, location);
    let Some(response) = client.get_json(&url).await? else {
        return Ok(None);
    };

    Ok(Some(resource_ids(&response, "datasets")))
}

/// List the DICOM stores in a dataset.
///
/// Only the first server page is read, so the result silently truncates at
/// the server's default page size. Accepted limitation.
pub async fn list_dicom_stores(
    client: &HealthcareClient,
    project: &str,
    location: &str,
    dataset: &str,
) -> Result<Option<Vec<String>>> {
    let url = client.dicom_stores_url(project, location, dataset);
    let Some(response) = client.get_json(&url).await? else {
        return Ok(None);
    };

    Ok(Some(resource_ids(&response, "dicomStores")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trailing_segment() {
        assert_eq!(
            trailing_segment("projects/x/locations/y/datasets/z"),
            "z"
        );
        assert_eq!(trailing_segment("no-slashes"), "no-slashes");
        assert_eq!(trailing_segment(""), "");
    }

    #[test]
    fn test_resource_ids_projection() {
        let response = json!({
            "datasets": [
                {"name": "projects/p/locations/l/datasets/first"},
                {"name": "projects/p/locations/l/datasets/second"},
                {"timeZone": "UTC"}
            ]
        });

        assert_eq!(resource_ids(&response, "datasets"), vec!["first", "second"]);
    }

    #[test]
    fn test_resource_ids_missing_key() {
        assert!(resource_ids(&json!({}), "datasets").is_empty());
        assert!(resource_ids(&Value::Null, "datasets").is_empty());
    }
}
