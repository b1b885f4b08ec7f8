//! DicomWeb access for Cloud Healthcare DICOM stores
//!
//! QIDO-style searches for studies, series, and instances return the raw
//! DICOM-JSON records untouched; retrieval returns the DICOM Part 10 file
//! as an opaque byte blob.

use super::client::HealthcareClient;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::Value;
use urlencoding::encode;

/// Accept header for DICOM file retrieval, any transfer syntax
pub const DICOM_ACCEPT: &str = "application/dicom; transfer-syntax=*";

/// Fully-qualified identifier of a DICOM store
#[derive(Debug, Clone)]
pub struct DicomStoreId {
    pub project: String,
    pub location: String,
    pub dataset: String,
    pub store: String,
}

impl DicomStoreId {
    pub fn new(project: &str, location: &str, dataset: &str, store: &str) -> Self {
        Self {
            project: project.to_string(),
            location: location.to_string(),
            dataset: dataset.to_string(),
            store: store.to_string(),
        }
    }

    /// DicomWeb root URL for this store
    pub fn dicomweb_url(&self, client: &HealthcareClient) -> String {
        client.dicomweb_url(&self.project, &self.location, &self.dataset, &self.store)
    }
}

/// The search endpoints return a bare JSON array of records; an empty body
/// (204-style "no matches") maps to an empty list.
fn dicom_records(response: Value) -> Vec<Value> {
    match response {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

/// Search the studies in a DICOM store, returning raw DICOM-JSON records.
///
/// `None` means the call was abandoned pending sign-in.
pub async fn search_studies(
    client: &HealthcareClient,
    store: &DicomStoreId,
) -> Result<Option<Vec<Value>>> {
    let url = format!("{}/studies", store.dicomweb_url(client));
    let Some(response) = client.get_json(&url).await? else {
        return Ok(None);
    };

    Ok(Some(dicom_records(response)))
}

/// Search the series of a study, returning raw DICOM-JSON records
pub async fn search_series(
    client: &HealthcareClient,
    store: &DicomStoreId,
    study_uid: &str,
) -> Result<Option<Vec<Value>>> {
    let url = format!(
        "{}/studies/{}/series",
        store.dicomweb_url(client),
        encode(study_uid)
    );
    let Some(response) = client.get_json(&url).await? else {
        return Ok(None);
    };

    Ok(Some(dicom_records(response)))
}

/// Search the instances of a series, returning raw DICOM-JSON records
pub async fn search_instances(
    client: &HealthcareClient,
    store: &DicomStoreId,
    study_uid: &str,
    series_uid: &str,
) -> Result<Option<Vec<Value>>> {
    let url = format!(
        "{}/studies/{}/series/{}/instances",
        store.dicomweb_url(client),
        encode(study_uid),
        encode(series_uid)
    );
    let Some(response) = client.get_json(&url).await? else {
        return Ok(None);
    };

    Ok(Some(dicom_records(response)))
}

/// Canonical retrieval URL for a single instance
pub fn instance_url(
    client: &HealthcareClient,
    store: &DicomStoreId,
    study_uid: &str,
    series_uid: &str,
    instance_uid: &str,
) -> String {
    format!(
        "{}/studies/{}/series/{}/instances/{}",
        store.dicomweb_url(client),
        encode(study_uid),
        encode(series_uid),
        encode(instance_uid)
    )
}

/// Fetch a DICOM Part 10 file as an opaque byte blob.
///
/// The whole body is read into memory; the content is not inspected.
/// `None` means the call was abandoned pending sign-in.
pub async fn fetch_dicom_file(
    client: &HealthcareClient,
    url: &str,
) -> Result<Option<Vec<u8>>> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(DICOM_ACCEPT));

    let Some(response) = client.http.get(url, headers).await? else {
        return Ok(None);
    };

    let bytes = response
        .bytes()
        .await
        .context("Failed to read DICOM response body")?;

    Ok(Some(bytes.to_vec()))
}
