//! Utility functions shared by the engine.
//!
//! - `glob_matcher`: Exclusion pattern matching

pub mod glob_matcher;

pub use glob_matcher::*;
