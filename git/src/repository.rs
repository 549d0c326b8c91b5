use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::Command;

use git2::Repository as GitRepository;
use tempfile::NamedTempFile;

use crate::error::{GitError, Result};

/// Repository operations needed by the deploy and revert flows.
///
/// Local object access goes through git2; network and log-formatting
/// operations shell out to the git CLI, which has no good library
/// equivalent for forced pulls, ls-remote checks and pretty formats.
pub trait Repository {
    fn open(path: &Path) -> Result<Self>
    where
        Self: Sized;
    fn head_commit(&self) -> Result<String>;
    fn checkout(&self, branch: &str) -> Result<()>;
    fn fetch_upstream(&self, branch: &str) -> Result<()>;
    fn log_subjects(&self, range: &str) -> Result<String>;
    fn log_bodies(&self, range: &str, separator: &str) -> Result<String>;
    fn latest_tag(&self) -> Result<String>;
    fn upstream_remote(&self, branch: &str) -> Result<String>;
    fn stage(&self, path: &str) -> Result<()>;
    fn commit_from_file(&self, message: &str) -> Result<()>;
    fn force_tag(&self, tag: &str) -> Result<()>;
    fn push_force(&self) -> Result<()>;
    fn push_tag(&self, remote: &str, tag: &str) -> Result<()>;
    fn remote_tag_exists(&self, remote: &str, tag: &str) -> Result<bool>;
    fn delete_remote_tag(&self, remote: &str, tag: &str) -> Result<()>;
    fn delete_local_tag(&self, tag: &str) -> Result<()>;
    fn reset_hard(&self, revision: &str) -> Result<()>;
    fn submodule_update(&self) -> Result<()>;
}

pub struct RealGitRepository {
    repo: GitRepository,
}

impl RealGitRepository {
    fn workdir(&self) -> Result<&Path> {
        self.repo.workdir().ok_or_else(|| {
            GitError::RepositoryError("Repository has no working directory".to_string())
        })
    }

    /// Run a git subcommand in the repository working directory and
    /// return its trimmed stdout.
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.workdir()?)
            .output()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    GitError::ToolNotFound
                } else {
                    GitError::IoError(e)
                }
            })?;

        if !output.status.success() {
            return Err(GitError::CommandError(
                String::from_utf8_lossy(&output.stderr).to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Repository for RealGitRepository {
    fn open(path: &Path) -> Result<Self> {
        let repo = GitRepository::discover(path).map_err(|e| {
            GitError::RepositoryError(format!(
                "Failed to discover git repository at '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self { repo })
    }

    fn head_commit(&self) -> Result<String> {
        let commit = self
            .repo
            .head()
            .map_err(|e| GitError::RepositoryError(format!("Failed to get HEAD: {}", e)))?
            .peel_to_commit()
            .map_err(|e| {
                GitError::RepositoryError(format!("Failed to peel HEAD to commit: {}", e))
            })?;
        Ok(commit.id().to_string())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        let branch_ref = format!("refs/heads/{}", branch);

        let obj = self.repo.revparse_single(&branch_ref).map_err(|e| {
            GitError::BranchError(format!("Failed to resolve branch '{}': {}", branch, e))
        })?;

        self.repo.checkout_tree(&obj, None).map_err(|e| {
            GitError::BranchError(format!("Failed to checkout branch '{}': {}", branch, e))
        })?;

        self.repo.set_head(&branch_ref).map_err(|e| {
            GitError::BranchError(format!("Failed to set HEAD to '{}': {}", branch, e))
        })?;

        Ok(())
    }

    fn fetch_upstream(&self, branch: &str) -> Result<()> {
        self.run(&["pull", "--tags", "--force", "origin", branch])
            .map(|_| ())
            .map_err(|e| e.with_context("Failed to pull upstream changes"))
    }

    fn log_subjects(&self, range: &str) -> Result<String> {
        self.run(&["log", "--oneline", range])
    }

    fn log_bodies(&self, range: &str, separator: &str) -> Result<String> {
        let pretty = format!("--pretty=format:%B{}", separator);
        self.run(&["log", &pretty, range])
    }

    fn latest_tag(&self) -> Result<String> {
        let commit = self.run(&["rev-list", "--tags", "--max-count=1"])?;
        if commit.is_empty() {
            return Err(GitError::TagNotFound);
        }
        self.run(&["describe", "--tags", &commit])
    }

    fn upstream_remote(&self, branch: &str) -> Result<String> {
        let upstream = self.run(&[
            "rev-parse",
            "--abbrev-ref",
            &format!("{}@{{upstream}}", branch),
        ])?;

        upstream
            .split('/')
            .next()
            .filter(|remote| !remote.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                GitError::BranchError(format!("No upstream configured for '{}'", branch))
            })
    }

    fn stage(&self, path: &str) -> Result<()> {
        self.run(&["add", path]).map(|_| ())
    }

    fn commit_from_file(&self, message: &str) -> Result<()> {
        // The commit message can span many lines; hand it to git through
        // a temporary file, like `git commit -F`.
        let mut file = NamedTempFile::new()?;
        file.write_all(message.as_bytes())?;
        file.flush()?;

        let path = file.path().to_string_lossy().into_owned();
        self.run(&["commit", "-F", &path]).map(|_| ())
    }

    fn force_tag(&self, tag: &str) -> Result<()> {
        self.run(&["tag", "-f", tag]).map(|_| ())
    }

    fn push_force(&self) -> Result<()> {
        self.run(&["push", "-f"]).map(|_| ())
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.run(&["push", remote, tag]).map(|_| ())
    }

    fn remote_tag_exists(&self, remote: &str, tag: &str) -> Result<bool> {
        let output = self.run(&["ls-remote", remote, tag])?;
        Ok(!output.is_empty())
    }

    fn delete_remote_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.run(&["push", remote, &format!(":{}", tag)]).map(|_| ())
    }

    fn delete_local_tag(&self, tag: &str) -> Result<()> {
        self.run(&["tag", "-d", tag]).map(|_| ())
    }

    fn reset_hard(&self, revision: &str) -> Result<()> {
        self.run(&["reset", "--hard", revision]).map(|_| ())
    }

    fn submodule_update(&self) -> Result<()> {
        self.run(&["submodule", "update"]).map(|_| ())
    }
}
