use crate::types::ParsedChange;
use crate::utils::{collapse_whitespace, PATCH_COMMIT_PATTERN};

/// Separator token used when dumping full commit bodies with
/// `git log --pretty=format:%B<separator>`.
pub const COMMIT_SEPARATOR: &str = "------";

/// Apply the patch-commit convention to one single-line entry.
///
/// Returns `None` for entries that do not follow the convention; this is a
/// deliberate best-effort filter, not a parse error. Matched fields have
/// whitespace runs collapsed to single spaces.
pub fn parse_entry(entry: &str) -> Option<ParsedChange> {
    let captures = PATCH_COMMIT_PATTERN.captures(entry)?;

    Some(ParsedChange {
        version: captures["version"].to_string(),
        problem: collapse_whitespace(&captures["problem"]),
        solution: collapse_whitespace(&captures["solution"]),
    })
}

/// Parse a blob of full commit bodies joined by `separator`.
///
/// Each entry's internal newlines are collapsed to single spaces before
/// matching, so a `Problem:` line followed by a `Solution:` line matches
/// as one entry.
pub fn parse_log(raw: &str, separator: &str) -> Vec<ParsedChange> {
    raw.split(separator)
        .map(|entry| {
            entry
                .trim()
                .lines()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter_map(|entry| parse_entry(&entry))
        .collect()
}

/// Parse one-line commit subjects, one entry per line.
pub fn parse_subject_log(raw: &str) -> Vec<ParsedChange> {
    raw.lines().filter_map(parse_entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_matching_entry() {
        let change = parse_entry(
            "patch 8.0.123: fix buffer overflow Problem: crash on empty file Solution: check length before read",
        )
        .unwrap();

        assert_eq!(change.version, "8.0.123");
        assert_eq!(change.problem, "crash on empty file");
        assert_eq!(change.solution, "check length before read");
    }

    #[test]
    fn drops_non_matching_entry() {
        assert!(parse_entry("not a patch message").is_none());
        assert!(parse_entry("").is_none());
    }

    #[test]
    fn collapses_whitespace_in_fields() {
        let change = parse_entry(
            "patch 8.1.0001: tweak Problem:   too   many    spaces Solution:  squeeze   them",
        )
        .unwrap();

        assert_eq!(change.problem, "too many spaces");
        assert_eq!(change.solution, "squeeze them");
    }

    #[test]
    fn empty_capture_still_parses() {
        // Degenerate but valid per the convention.
        let change =
            parse_entry("patch 8.1.2: x Problem:  Solution:  done").unwrap();
        assert_eq!(change.version, "8.1.2");
    }

    #[test]
    fn splits_bodies_on_separator_and_joins_lines() {
        let raw = "patch 8.0.1: one\nProblem:    first\nProblem\nSolution:    first solution\
                   ------patch 8.0.2: two Problem: second Solution: second solution------";

        let changes = parse_log(raw, COMMIT_SEPARATOR);

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].version, "8.0.1");
        assert_eq!(changes[0].problem, "first Problem");
        assert_eq!(changes[1].solution, "second solution");
    }

    #[test]
    fn skips_merge_commits_in_body_log() {
        let raw = "Merge branch 'master' of upstream------\
                   patch 8.0.3: fix Problem: p Solution: s------";

        let changes = parse_log(raw, COMMIT_SEPARATOR);

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].version, "8.0.3");
    }

    #[test]
    fn empty_input_yields_no_changes() {
        assert!(parse_log("", COMMIT_SEPARATOR).is_empty());
        assert!(parse_subject_log("").is_empty());
    }

    #[test]
    fn parses_one_entry_per_subject_line() {
        let raw = "patch 8.0.9: a Problem: p1 Solution: s1\n\
                   not a patch\n\
                   patch 8.0.10: b Problem: p2 Solution: s2";

        let changes = parse_subject_log(raw);

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].version, "8.0.9");
        assert_eq!(changes[1].version, "8.0.10");
    }
}
