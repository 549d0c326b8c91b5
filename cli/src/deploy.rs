use std::path::Path;

use changelog::{format_commit_log, COMMIT_SEPARATOR};
use git::repository::{RealGitRepository, Repository};

use crate::error::{Result, ResultExt};
use crate::progress::ProgressTracker;
use crate::ui;
use crate::version;

/// Directory of the upstream mirror submodule inside the wrapper repo.
const MIRROR_DIR: &str = "vim";

const DEFAULT_REMOTE: &str = "origin";

/// Pull upstream changes into the mirror submodule, then record them in
/// the wrapper repository as a version-bump commit carrying a formatted
/// changelog, and move the upstream tag onto that commit.
pub fn execute(verbose: bool) -> Result<()> {
    let mut progress = ProgressTracker::new("Deploy").with_steps(vec![
        "Opening repositories".to_string(),
        "Pulling upstream changes".to_string(),
        "Checking for new patches".to_string(),
        "Formatting changelog".to_string(),
        "Syncing the mirror remote".to_string(),
        "Committing and tagging the bump".to_string(),
    ]);

    progress.start_step();
    let root = RealGitRepository::open(Path::new("."))?;
    root.checkout("master")?;
    let mirror = RealGitRepository::open(Path::new(MIRROR_DIR))?;
    progress.complete_step();

    progress.start_step();
    let current_hash = mirror.head_commit()?;
    mirror
        .fetch_upstream("master")
        .with_context(|| "Failed to pull the upstream mirror")?;
    progress.complete_step();

    progress.start_step();
    let range = format!("{current_hash}..HEAD");
    let changes = mirror.log_subjects(&range)?;
    if changes.is_empty() {
        ui::info_message("No upstream changes.");
        return Ok(());
    }
    progress.complete_step();

    progress.start_step();
    let bodies = mirror.log_bodies(&range, COMMIT_SEPARATOR)?;
    let logs = format_commit_log(&bodies, COMMIT_SEPARATOR);
    if verbose {
        println!("Formatted {} changelog lines from upstream log", logs.len());
    }
    progress.complete_step();

    progress.start_step();
    let latest_tag = mirror.latest_tag()?;
    let remote = mirror.upstream_remote("master")?;
    if remote != DEFAULT_REMOTE {
        mirror
            .push_force()
            .with_context(|| "Failed to push the mirror to its origin")?;
    }
    progress.complete_step();

    progress.start_step();
    let new_version = version::version_from_tag(&latest_tag)?;
    root.stage(MIRROR_DIR)?;
    let message = format!("Bump version to {}\n\n{}", new_version, logs.join("\n"));
    root.commit_from_file(&message)?;
    root.force_tag(&latest_tag)?;
    root.push_force()?;
    // The tag may already exist upstream from a previous deploy; replace
    // it rather than fail the push.
    if root.remote_tag_exists(DEFAULT_REMOTE, &latest_tag)? {
        root.delete_remote_tag(DEFAULT_REMOTE, &latest_tag)?;
    }
    root.push_tag(DEFAULT_REMOTE, &latest_tag)?;
    progress.complete_step();

    progress.complete();
    ui::success_message(&format!("Deployed version {}", new_version));
    Ok(())
}

/// Undo the most recent deploy: drop the bump commit, restore the
/// submodule and remove the tag locally and remotely.
pub fn revert(verbose: bool) -> Result<()> {
    let mut progress = ProgressTracker::new("Revert").with_steps(vec![
        "Resetting to the previous commit".to_string(),
        "Updating the mirror submodule".to_string(),
        "Removing the latest tag".to_string(),
        "Pushing the revert".to_string(),
    ]);

    let root = RealGitRepository::open(Path::new("."))?;

    progress.start_step();
    root.checkout("master")?;
    root.reset_hard("HEAD~1")?;
    progress.complete_step();

    progress.start_step();
    root.submodule_update()?;
    progress.complete_step();

    progress.start_step();
    let latest_tag = root.latest_tag()?;
    if verbose {
        println!("Removing tag {latest_tag}");
    }
    if root.remote_tag_exists(DEFAULT_REMOTE, &latest_tag)? {
        root.delete_remote_tag(DEFAULT_REMOTE, &latest_tag)?;
    }
    root.delete_local_tag(&latest_tag)?;
    progress.complete_step();

    progress.start_step();
    root.push_force()?;
    progress.complete_step();

    progress.complete();
    Ok(())
}
