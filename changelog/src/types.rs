/// A single upstream patch extracted from a commit message following the
/// `patch <version>: ... Problem: ... Solution: ...` convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChange {
    pub version: String,
    pub problem: String,
    pub solution: String,
}
