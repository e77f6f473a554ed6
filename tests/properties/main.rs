//! Property test suite entry point.


mod rollup_tests;
