//! Snapshot test suite entry point.

mod outline_output;
