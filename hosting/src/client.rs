use std::path::PathBuf;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use url::Url;

use crate::config::Credentials;
use crate::error::{HostingError, Result};

/// Base URL of the artifact-hosting REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.bintray.com/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One artifact upload. The uploaded content lands at `remote_path`
/// (defaults to the local file name) under the given package version.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub repo: String,
    pub package: String,
    pub version: String,
    pub file: PathBuf,
    pub remote_path: Option<String>,
    /// Publish the artifact as part of uploading.
    pub publish: bool,
    /// Overwrite an already published artifact. Required for the upload
    /// to be safely repeatable under the retry dispatcher.
    pub override_existing: bool,
    pub explode: bool,
}

impl UploadRequest {
    fn remote_path(&self) -> String {
        match &self.remote_path {
            Some(path) => path.clone(),
            None => self
                .file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.file.display().to_string()),
        }
    }
}

/// Metadata update for an existing package version.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VersionUpdate {
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_release_notes_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_use_tag_release_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
}

/// Client for the artifact-hosting HTTP API.
///
/// Every method performs exactly one attempt and reports an unexpected
/// status code as [`HostingError::Recoverable`]; transport errors are
/// fatal. Compose with [`crate::retry::retry`] for retries.
pub struct HostingClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl HostingClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url = Url::parse(base_url)?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// PUT the file under `content/{subject}/{repo}/{package}/{version}/`.
    /// Expects HTTP 201.
    pub async fn upload(&self, request: &UploadRequest) -> Result<()> {
        let url = self.base_url.join(&format!(
            "content/{}/{}/{}/{}/{}",
            self.credentials.subject,
            request.repo,
            request.package,
            request.version,
            request.remote_path()
        ))?;

        let body = tokio::fs::read(&request.file).await?;

        let response = self
            .client
            .put(url)
            .query(&[
                ("publish", flag(request.publish)),
                ("override", flag(request.override_existing)),
                ("explode", flag(request.explode)),
            ])
            .basic_auth(&self.credentials.username, Some(&self.credentials.api_key))
            .body(body)
            .send()
            .await?;

        if response.status() != StatusCode::CREATED {
            let message = response.text().await.unwrap_or_default();
            return Err(HostingError::recoverable(format!(
                "Upload failed with message: {message}"
            )));
        }
        Ok(())
    }

    /// POST `content/.../publish` to publish (or discard) uploaded
    /// content. Expects HTTP 200.
    pub async fn publish(
        &self,
        repo: &str,
        package: &str,
        version: &str,
        discard: bool,
    ) -> Result<()> {
        let url = self.base_url.join(&format!(
            "content/{}/{repo}/{package}/{version}/publish",
            self.credentials.subject
        ))?;

        let response = self
            .client
            .post(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.api_key))
            .json(&serde_json::json!({
                "discard": discard,
                "publish_wait_for_secs": -1,
            }))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(HostingError::recoverable(format!(
                "Publish failed with status code: {}",
                response.status().as_u16()
            )));
        }
        Ok(())
    }

    /// PUT `file_metadata/{subject}/{repo}/{remote_path}` to add or
    /// remove the file from the repository download list. Expects
    /// HTTP 200.
    pub async fn set_download_list(
        &self,
        repo: &str,
        remote_path: &str,
        list_in_downloads: bool,
    ) -> Result<()> {
        let url = self.base_url.join(&format!(
            "file_metadata/{}/{repo}/{remote_path}",
            self.credentials.subject
        ))?;

        let response = self
            .client
            .put(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.api_key))
            .json(&serde_json::json!({ "list_in_downloads": list_in_downloads }))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let action = if list_in_downloads { "Adding" } else { "Removing" };
            return Err(HostingError::recoverable(format!(
                "{action} file in download list failed with status code: {}",
                response.status().as_u16()
            )));
        }
        Ok(())
    }

    /// DELETE `packages/{subject}/{repo}/{package}/versions/{version}`.
    /// Expects HTTP 200.
    pub async fn delete_version(&self, repo: &str, package: &str, version: &str) -> Result<()> {
        let url = self.version_url(repo, package, version)?;

        let response = self
            .client
            .delete(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.api_key))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(HostingError::recoverable(format!(
                "Deleting version failed with status code: {}",
                response.status().as_u16()
            )));
        }
        Ok(())
    }

    /// PATCH the version metadata. Expects HTTP 200.
    pub async fn update_version(
        &self,
        repo: &str,
        package: &str,
        version: &str,
        update: &VersionUpdate,
    ) -> Result<()> {
        let url = self.version_url(repo, package, version)?;

        let response = self
            .client
            .patch(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.api_key))
            .json(update)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(HostingError::recoverable(format!(
                "Updating version failed with status code: {}",
                response.status().as_u16()
            )));
        }
        Ok(())
    }

    fn version_url(&self, repo: &str, package: &str, version: &str) -> Result<Url> {
        Ok(self.base_url.join(&format!(
            "packages/{}/{repo}/{package}/versions/{version}",
            self.credentials.subject
        ))?)
    }
}

fn flag(enabled: bool) -> &'static str {
    if enabled {
        "1"
    } else {
        "0"
    }
}
