//! GCP API interaction module
//!
//! This module provides the core functionality for interacting with the
//! Cloud Resource Manager and Cloud Healthcare APIs: authentication, the
//! authenticated HTTP client, and the resource-hierarchy listers.
//!
//! # Module Structure
//!
//! - [`auth`] - The `Authenticator` seam and Application Default Credentials
//! - [`client`] - Main client combining auth, HTTP, and endpoint templating
//! - [`http`] - Authenticated HTTP wrapper with sign-in-on-401 behavior
//! - [`projects`] - Paginated project listing
//! - [`healthcare`] - Location, dataset, and DICOM store listing
//! - [`dicomweb`] - Study/series/instance search and DICOM file retrieval
//!
//! # Example
//!
//! ```ignore
//! use gcdicom::gcp::auth::AdcAuthenticator;
//! use gcdicom::gcp::client::HealthcareClient;
//! use gcdicom::gcp::healthcare;
//! use std::sync::Arc;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let auth = Arc::new(AdcAuthenticator::new().await?);
//!     let client = HealthcareClient::new(auth)?;
//!     let datasets = healthcare::list_datasets(&client, "my-project", "us-central1").await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod dicomweb;
pub mod healthcare;
pub mod http;
pub mod projects;
