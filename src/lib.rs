//! Client for Google Cloud Healthcare DICOM stores.
//!
//! Enumerates the resource hierarchy (projects → locations → datasets →
//! DICOM stores → studies → series → instances) behind bearer-token
//! authentication, and downloads DICOM Part 10 files. Lister calls resolve
//! to `None` instead of failing when the user still needs to sign in.

pub mod cancel;
pub mod config;
pub mod gcp;

pub use cancel::{run_cancelable, CancelToken, Canceled};
pub use gcp::auth::{AdcAuthenticator, Authenticator};
pub use gcp::client::HealthcareClient;
pub use gcp::dicomweb::DicomStoreId;
