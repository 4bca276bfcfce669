//! The incremental consistency engine.
//!
//! Leaves first:
//!
//! - `document`: Text documents, positions and document classification
//! - `parsers`: Translation file parsers (XLIFF and JSON)
//! - `data`: Projects, translation units and translation files
//! - `index`: The project list and membership queries
//! - `store`: Parsed translation files keyed by URI
//! - `validation`: Reference scanning and missing-translation diagnostics
//! - `provider`: The orchestrator driven by host notifications
//! - `utils`: Shared helpers

pub mod data;
pub mod document;
pub mod index;
pub mod parsers;
pub mod provider;
pub mod store;
pub mod utils;
pub mod validation;

pub use data::{NO_TRANSLATION, Project, TranslationFile, TranslationUnit};
pub use document::{DocumentKind, LineIndex, Position, Range, TextDocument};
pub use index::ProjectIndex;
pub use parsers::TranslationFormat;
pub use provider::{Hover, Location, PublishDiagnostics, TranslationProvider, UnusedTranslation};
pub use store::TranslationStore;
pub use validation::{Diagnostic, DiagnosticSeverity, IdentifierReference, Validation};
