//! Integration tests for the vrel workspace crates.
//!
//! The test files live next to this manifest and are declared as
//! explicit `[[test]]` targets.
