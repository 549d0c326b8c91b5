use once_cell::sync::Lazy;
use regex::Regex;

/// The fixed three-capture convention used by upstream patch commits.
/// Anchored at the start of the (already single-lined) entry.
pub static PATCH_COMMIT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^patch (?P<version>.*): .* Problem:\s+(?P<problem>.*) Solution:\s+(?P<solution>.*)")
        .expect("Failed to compile patch commit regex")
});

/// Collapse internal runs of whitespace (including newlines) to single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
