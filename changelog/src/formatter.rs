use textwrap::{Options, WrapAlgorithm};

use crate::parser::{parse_log, parse_subject_log};
use crate::types::ParsedChange;

/// Wrap width for rendered changelog lines.
pub const WRAP_WIDTH: usize = 70;

/// Render a parsed change as a single unwrapped line.
pub fn render_change(change: &ParsedChange) -> String {
    format!(
        "{}: {} {}",
        change.version, change.problem, change.solution
    )
}

/// Render changes as a word-wrapped bullet list.
///
/// The input is expected newest-commit-first (conventional `git log`
/// order); output is emitted in reverse so the changelog reads
/// oldest-first. Each change becomes a `- ` bullet whose continuation
/// lines are indented two spaces.
pub fn format_log(changes: &[ParsedChange]) -> Vec<String> {
    let options = Options::new(WRAP_WIDTH).wrap_algorithm(WrapAlgorithm::FirstFit);

    let mut lines = Vec::new();
    for change in changes.iter().rev() {
        let rendered = render_change(change);
        let wrapped = textwrap::wrap(&rendered, &options);
        for (idx, line) in wrapped.iter().enumerate() {
            if idx == 0 {
                lines.push(format!("- {line}"));
            } else {
                lines.push(format!("  {line}"));
            }
        }
    }
    lines
}

/// Parse separator-joined commit bodies and render them in one step.
pub fn format_commit_log(raw: &str, separator: &str) -> Vec<String> {
    format_log(&parse_log(raw, separator))
}

/// Parse newline-delimited one-line subjects and render them in one step.
pub fn format_subject_log(raw: &str) -> Vec<String> {
    format_log(&parse_subject_log(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::COMMIT_SEPARATOR;

    fn change(version: &str, problem: &str, solution: &str) -> ParsedChange {
        ParsedChange {
            version: version.to_string(),
            problem: problem.to_string(),
            solution: solution.to_string(),
        }
    }

    #[test]
    fn renders_version_problem_solution() {
        let line = render_change(&change(
            "8.0.123",
            "crash on empty file",
            "check length before read",
        ));
        assert_eq!(line, "8.0.123: crash on empty file check length before read");
    }

    #[test]
    fn output_is_reverse_of_input_order() {
        let changes = vec![
            change("8.0.3", "c", "cc"),
            change("8.0.2", "b", "bb"),
            change("8.0.1", "a", "aa"),
        ];

        let lines = format_log(&changes);

        assert_eq!(
            lines,
            vec![
                "- 8.0.1: a aa".to_string(),
                "- 8.0.2: b bb".to_string(),
                "- 8.0.3: c cc".to_string(),
            ]
        );
    }

    #[test]
    fn wraps_long_lines_with_indented_continuations() {
        let changes = vec![change(
            "8.0.1",
            "a very long problem description that will not fit on a single line",
            "an equally long solution description that spills over as well",
        )];

        let lines = format_log(&changes);

        assert!(lines.len() > 1);
        assert!(lines[0].starts_with("- "));
        for continuation in &lines[1..] {
            assert!(continuation.starts_with("  "));
        }
        for line in &lines {
            assert!(line.len() <= WRAP_WIDTH + 2);
        }
    }

    #[test]
    fn end_to_end_commit_body() {
        let raw = "patch 8.0.123: fix buffer overflow \
                   Problem:   crash on empty file \
                   Solution:   check length before read";

        let lines = format_commit_log(raw, COMMIT_SEPARATOR);

        assert_eq!(
            lines,
            vec!["- 8.0.123: crash on empty file check length before read".to_string()]
        );
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(format_commit_log("", COMMIT_SEPARATOR).is_empty());
        assert!(format_log(&[]).is_empty());
    }

    #[test]
    fn non_matching_entries_render_nothing() {
        assert!(format_subject_log("not a patch message").is_empty());
    }
}
