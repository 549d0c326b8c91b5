//! Turns a raw `git log` dump of upstream patch commits into the
//! word-wrapped bullet list that goes into the version-bump commit message.
//!
//! Parsing is best effort: commits that do not follow the
//! `patch <version>: ... Problem: ... Solution: ...` convention are
//! silently skipped.

pub mod formatter;
pub mod parser;
pub mod types;
mod utils;

pub use formatter::{format_commit_log, format_log, format_subject_log, render_change, WRAP_WIDTH};
pub use parser::{parse_entry, parse_log, parse_subject_log, COMMIT_SEPARATOR};
pub use types::ParsedChange;
