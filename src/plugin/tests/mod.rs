//! Plugin module tests
//!
//! Contains test suites for the host-facing button:
//! - Construction and settings handling
//! - Press/release reporting
//! - Index refresh triggers
//! - Click sound handling

#[cfg(test)]
mod button_tests;
