use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CliError, Result};

/// Two to four dot-separated numeric components, e.g. `8.2` or `8.0.123`.
static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]+)(\.([0-9]+)){0,2}$")
        .expect("Failed to compile version regex")
});

/// Strip the tag prefix (`v8.0.123` -> `8.0.123`) and validate the
/// remainder. A malformed version is a fatal configuration error.
pub fn version_from_tag(tag: &str) -> Result<String> {
    let version = tag.strip_prefix('v').unwrap_or(tag);
    if !VERSION_PATTERN.is_match(version) {
        return Err(CliError::InvalidVersion(version.to_string()));
    }
    Ok(version.to_string())
}
