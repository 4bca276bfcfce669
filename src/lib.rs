//! i18n-lens - translation insight for HTML templates
//!
//! Finds `i18n="@@id"` annotations in markup, checks them against XLIFF and
//! JSON translation files of the configured projects, and serves hover text
//! and go-to-definition to editors.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface (`check`, `init`, `serve`)
//! - `config`: Configuration file loading and parsing
//! - `core`: Parsing, indexing and validation engine
//! - `issues`: Issue type definitions for reports
//! - `lsp`: Language server over stdio
//! - `workspace`: File discovery and loading

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod lsp;
pub mod workspace;
