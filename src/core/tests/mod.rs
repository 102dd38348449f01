//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Dual-action engine transitions
//! - Action picker index building
//! - Key-string parsing
//! - Binding resolution
//! - Property tests over arbitrary button configurations

#[cfg(test)]
mod index_tests;
