//! GCP Client
//!
//! Main client for the Cloud Resource Manager and Cloud Healthcare APIs,
//! combining authentication, HTTP, and endpoint templating.

use super::auth::Authenticator;
use super::http::AuthedClient;
use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;
use url::Url;
use urlencoding::encode;

/// Public Cloud Resource Manager endpoint
pub const RESOURCE_MANAGER_BASE: &str = "https://cloudresourcemanager.googleapis.com";

/// Public Cloud Healthcare endpoint
pub const HEALTHCARE_BASE: &str = "https://healthcare.googleapis.com";

/// Main client for the Healthcare resource hierarchy
#[derive(Clone)]
pub struct HealthcareClient {
    pub http: AuthedClient,
    resource_manager_base: String,
    healthcare_base: String,
}

impl HealthcareClient {
    /// Create a new client against the public Google endpoints
    pub fn new(auth: Arc<dyn Authenticator>) -> Result<Self> {
        Self::with_base_urls(auth, RESOURCE_MANAGER_BASE, HEALTHCARE_BASE)
    }

    /// Create a client against custom endpoint bases (emulators, tests)
    pub fn with_base_urls(
        auth: Arc<dyn Authenticator>,
        resource_manager_base: &str,
        healthcare_base: &str,
    ) -> Result<Self> {
        Url::parse(resource_manager_base).context("Invalid Resource Manager base URL")?;
        Url::parse(healthcare_base).context("Invalid Healthcare base URL")?;

        Ok(Self {
            http: AuthedClient::new(auth)?,
            resource_manager_base: resource_manager_base.trim_end_matches('/').to_string(),
            healthcare_base: healthcare_base.trim_end_matches('/').to_string(),
        })
    }

    /// Make an authenticated GET request and parse the response as JSON.
    /// `None` means the call was abandoned pending sign-in.
    pub async fn get_json(&self, url: &str) -> Result<Option<Value>> {
        self.http.get_json(url).await
    }

    // =========================================================================
    // Resource Manager API helpers
    // =========================================================================

    /// Build Resource Manager API URL
    pub fn resourcemanager_url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.resource_manager_base, path)
    }

    // =========================================================================
    // Healthcare API helpers
    // =========================================================================

    /// Build the locations URL for a project.
    /// Location listing is only served by the v1beta1 surface.
    pub fn locations_url(&self, project: &str) -> String {
        format!(
            "{}/v1beta1/projects/{}/locations",
            self.healthcare_base,
            encode(project)
        )
    }

    /// Build the datasets URL for a project location
    pub fn datasets_url(&self, project: &str, location: &str) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/datasets",
            self.healthcare_base,
            encode(project),
            encode(location)
        )
    }

    /// Build the DICOM stores URL for a dataset
    pub fn dicom_stores_url(&self, project: &str, location: &str, dataset: &str) -> String {
        format!("{}/{}/dicomStores", self.datasets_url(project, location), encode(dataset))
    }

    /// Build the DicomWeb root URL for a DICOM store
    pub fn dicomweb_url(
        &self,
        project: &str,
        location: &str,
        dataset: &str,
        store: &str,
    ) -> String {
        format!(
            "{}/{}/dicomWeb",
            self.dicom_stores_url(project, location, dataset),
            encode(store)
        )
    }
}
