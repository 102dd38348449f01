//! Config module tests
//!
//! Contains test suites for file-backed configuration:
//! - Binding table loading and parsing
//! - Atomic export writes
//! - Live reload watching
