//! Client for the artifact-hosting HTTP API plus the retry dispatcher
//! that wraps its operations.
//!
//! Each client method performs exactly one externally visible attempt;
//! callers compose retries with [`retry::retry`]. Only a status-code
//! mismatch from the API is retryable; transport and configuration
//! failures abort immediately.

pub mod client;
pub mod config;
pub mod error;
pub mod retry;

pub use client::{HostingClient, UploadRequest, VersionUpdate, DEFAULT_BASE_URL};
pub use config::Credentials;
pub use error::{HostingError, Result};
pub use retry::{retry, retry_with_diagnostics, RetryPolicy};
