use thiserror::Error;

/// Git operation error type that provides detailed context about the error
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Git2 error: {0}")]
    Git2Error(#[from] git2::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("git tool not found.")]
    ToolNotFound,

    #[error("Failed to execute git command: {0}")]
    CommandError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Branch error: {0}")]
    BranchError(String),

    #[error("No tag found in repository")]
    TagNotFound,

    #[error("{0}: {1}")]
    WithContext(String, Box<GitError>),
}

impl GitError {
    /// Add context to an error
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        GitError::WithContext(context.into(), Box::new(self))
    }

    /// Get a user-friendly message for command line display
    pub fn user_message(&self) -> String {
        match self {
            GitError::Git2Error(e) => {
                let msg = format!("{}", e);
                msg.split(';').next().map_or_else(
                    || format!("Git error: {}", msg),
                    |main_msg| format!("Git error: {}", main_msg.trim()),
                )
            }
            GitError::IoError(e) => format!("I/O error: {}", e),
            GitError::ToolNotFound => "git tool not found.".to_string(),
            GitError::CommandError(msg) => format!("Git command failed: {}", msg),
            GitError::RepositoryError(msg) => format!("Repository error: {}", msg),
            GitError::BranchError(msg) => format!("Branch operation failed: {}", msg),
            GitError::TagNotFound => "No tag found in repository".to_string(),
            GitError::WithContext(ctx, err) => format!("{}: {}", ctx, err.user_message()),
        }
    }
}

pub type Result<T> = std::result::Result<T, GitError>;
