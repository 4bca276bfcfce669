//! Language server exposing the engine to editors over stdio.
//!
//! ## Module Structure
//!
//! - `convert`: engine types to and from `lsp_types`
//! - `server`: tower-lsp backend and the stdio entry point
//! - `session`: synchronous session state driven by the backend
//! - `types`: custom notification names and parameters

mod convert;
mod server;
pub mod session;
pub mod types;

pub use server::{Backend, run_server};
pub use session::{FileChange, Session};
