//! LegalDost API server
//!
//! Users upload contracts (PDF, image or plain text), the server extracts
//! the text and, on request, analyses it with a generative model while
//! cross-checking a table of Indian consumer and contract law rules. The
//! merged result is stored with the document; users can then chat about the
//! document and ask for plain-English explanations of selected text.
//!
//! ## Architecture
//!
//! - [`store`]: SQLite document records
//! - [`pipeline`]: analysis and chat workflows
//! - [`handlers`] and [`router`]: the HTTP surface
//! - [`auth`]: caller identity forwarded by the gateway

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod router;
pub mod state;
pub mod store;

pub use config::{Args, ServerConfig};
pub use error::ApiError;
pub use router::router;
pub use state::AppState;
pub use store::DocumentStore;
