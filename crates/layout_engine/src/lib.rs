//! Layout Engine - page geometry, line breaking and flow pagination
//!
//! This crate holds the layout arithmetic of the paginated export: page
//! geometry, the render cursor, text measurement, line wrapping and the
//! paginator that flows atomic units onto fixed-size pages.

mod cursor;
mod error;
mod font_metrics;
mod geometry;
mod line_breaker;
mod paginator;

pub use cursor::*;
pub use error::*;
pub use font_metrics::*;
pub use geometry::*;
pub use line_breaker::*;
pub use paginator::*;
