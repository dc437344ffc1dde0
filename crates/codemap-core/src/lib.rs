//! Structural code metadata extraction for multi-language codebases.
//!
//! This crate walks already-parsed concrete syntax trees and normalizes
//! heterogeneous grammar shapes into one entity model:
//! - **Grammar adapter** ([`grammar::Grammar`]) - per-language/dialect table
//!   mapping canonical concepts to tree-sitter node kinds
//! - **Traversal engine** ([`Analyzer`]) - scope-sensitive extraction of
//!   functions, classes, parameters, variables and call edges
//! - **Change detection** ([`fingerprint`]) - SHA-256 content checksums that
//!   let re-analysis skip unchanged files
//! - **Persistence gateway** ([`AnalysisStore`]) - relational store contract
//!   with SQLite and in-memory backends
//!
//! # Example
//!
//! ```ignore
//! use codemap_core::{Analyzer, store::SqliteStore};
//!
//! let store = SqliteStore::open("codemap.db".as_ref())?;
//! let analyzer = Analyzer::new("python", None)?;
//! let outcome = analyzer.analyze(&store, "src/app.py", source)?;
//! for func in &outcome.result.functions {
//!     println!("{} ({}..{})", func.name, func.start_line, func.end_line);
//! }
//! ```

pub mod analyzer;
pub mod error;
pub mod fingerprint;
pub mod grammar;
pub mod model;
pub mod store;

pub use analyzer::Analyzer;
pub use error::AnalyzerError;
pub use model::{
    AnalysisOutcome, AnalysisResult, CallSite, Class, Diagnostic, Function, Parameter,
    ParseStatus, Variable, VariableScope,
};
pub use store::{AnalysisStore, StoreError};
