//! Cubefield application library
//!
//! Holds the pieces of the binary that integration tests exercise;
//! currently just configuration loading.

pub mod config;
