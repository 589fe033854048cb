//! PDF Export Module
//!
//! Converts a paginated [`render_model::RenderModel`] into a PDF file.
//!
//! - `objects`: PDF object model (Dictionary, Array, Stream, Reference)
//! - `encoding`: WinAnsi text encoding for the standard fonts
//! - `document`: Catalog, page tree, resources and Info
//! - `content`: Content stream operators
//! - `fonts`: Standard Type1 font resources
//! - `images`: Image XObjects with soft masks
//! - `renderer`: RenderItem to content stream conversion
//! - `writer`: File structure, xref and trailer
//! - `api`: Public entry points

mod api;
mod content;
mod document;
mod encoding;
mod fonts;
mod images;
mod objects;
mod options;
mod renderer;
mod writer;

pub use api::*;
pub use options::*;
pub use writer::PdfError;
