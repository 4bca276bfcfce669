//! Core data types shared by the engine.
//!
//! ## Module Structure
//!
//! - `project`: Project definition and membership predicates
//! - `translation`: Translation units and per-file translation state

pub mod project;
pub mod translation;

pub use project::Project;
pub use translation::{NO_TRANSLATION, TranslationFile, TranslationUnit};
