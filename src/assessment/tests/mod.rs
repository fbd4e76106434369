//! Cross-module tests for the assessment pipeline.

mod integration_tests;
