//! Tests for the CLI module
//!
//! Argument parsing and configuration loading, kept out of the modules
//! they exercise.
