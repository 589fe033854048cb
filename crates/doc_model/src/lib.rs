//! Document Model - semantic blocks for proposal export
//!
//! This crate holds the typed document model (runs and blocks), the
//! builder that normalizes editor content into blocks, and the live
//! word/character accounting that observes the same blocks.

mod block;
mod builder;
mod content;
mod document;
mod error;
mod html;
mod metrics;
mod run;
pub mod templates;

pub use block::*;
pub use builder::*;
pub use content::*;
pub use document::*;
pub use error::*;
pub use html::parse_html;
pub use metrics::*;
pub use run::*;
