use std::env;

use crate::error::{HostingError, Result};

/// Environment fallback for `--username`
pub const USERNAME_ENV: &str = "VREL_HOSTING_USERNAME";
/// Environment fallback for `--api-key`
pub const API_KEY_ENV: &str = "VREL_HOSTING_API_KEY";

/// Hosting API credentials, resolved once at the CLI boundary.
///
/// `subject` is the account owning the repository; it defaults to the
/// username when not given explicitly.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
    pub subject: String,
}

impl Credentials {
    /// Resolve credentials from CLI flags with environment-variable
    /// fallback. Missing both is a fatal configuration error, reported
    /// before any attempt is made.
    pub fn resolve(
        username: Option<String>,
        api_key: Option<String>,
        subject: Option<String>,
    ) -> Result<Self> {
        let username = resolve_value(username, USERNAME_ENV)?;
        let api_key = resolve_value(api_key, API_KEY_ENV)?;
        let subject = subject.unwrap_or_else(|| username.clone());

        Ok(Self {
            username,
            api_key,
            subject,
        })
    }
}

fn resolve_value(flag: Option<String>, env_name: &str) -> Result<String> {
    match flag {
        Some(value) => Ok(value),
        None => env::var(env_name).map_err(|_| HostingError::MissingCredential {
            name: env_name.to_string(),
        }),
    }
}
