//! Domain types shared by the LegalDost crates
//!
//! A [`Document`] owns exactly one optional [`Analysis`] and an append-only
//! chat history. Everything serializes to the camelCase JSON shape the web
//! client consumes.

pub mod analysis;
pub mod types;

pub use analysis::{Analysis, Highlight, HighlightKind, RiskLevel, Severity, TextSpan, Violation};
pub use types::{ChatTurn, Document, DocumentStatus, DocumentSummary, FileKind};
