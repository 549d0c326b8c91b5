use tokio::runtime::Runtime;

use hosting::{retry, Credentials, HostingClient, RetryPolicy, UploadRequest, VersionUpdate};

use crate::cli::{ArtifactOperation, ArtifactOptions, DownloadListAction};
use crate::error::{CliError, Result};
use crate::ui;

/// Resolve credentials, then run one hosting operation under the retry
/// dispatcher. Credential resolution happens before any attempt, so a
/// missing key fails fast instead of burning the retry budget.
pub fn execute(options: ArtifactOptions, operation: ArtifactOperation) -> Result<()> {
    let rt = Runtime::new()
        .map_err(|e| CliError::Other(format!("Failed to create async runtime: {}", e)))?;

    let credentials = Credentials::resolve(options.username, options.api_key, options.subject)?;
    let client = HostingClient::new(&options.base_url, credentials)?;
    let policy = RetryPolicy {
        max_retries: options.retries,
        ..RetryPolicy::default()
    };

    rt.block_on(run_operation(&client, policy, operation))?;
    ui::success_message("Hosting operation completed");
    Ok(())
}

async fn run_operation(
    client: &HostingClient,
    policy: RetryPolicy,
    operation: ArtifactOperation,
) -> hosting::Result<()> {
    match operation {
        ArtifactOperation::Upload {
            repo,
            package,
            version,
            file_input,
            filepath,
            publish,
            override_existing,
            explode,
        } => {
            let request = UploadRequest {
                repo,
                package,
                version,
                file: file_input,
                remote_path: filepath,
                publish,
                override_existing,
                explode,
            };
            retry(policy, || client.upload(&request)).await
        }

        ArtifactOperation::Publish {
            repo,
            package,
            version,
            discard,
        } => retry(policy, || client.publish(&repo, &package, &version, discard)).await,

        ArtifactOperation::DownloadList {
            repo,
            filepath,
            action,
        } => {
            let list_in_downloads = matches!(action, DownloadListAction::Add);
            retry(policy, || {
                client.set_download_list(&repo, &filepath, list_in_downloads)
            })
            .await
        }

        ArtifactOperation::DeleteVersion {
            repo,
            package,
            version,
        } => retry(policy, || client.delete_version(&repo, &package, &version)).await,

        ArtifactOperation::UpdateVersion {
            repo,
            package,
            version,
            desc,
            github_release_notes_file,
            github_use_tag_release_notes,
            vcs_tag,
            released,
        } => {
            let update = VersionUpdate {
                desc,
                github_release_notes_file,
                github_use_tag_release_notes,
                vcs_tag,
                released,
            };
            retry(policy, || {
                client.update_version(&repo, &package, &version, &update)
            })
            .await
        }
    }
}
