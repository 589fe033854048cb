//! Render Model - paginated drawing instructions
//!
//! This crate lays a Block list out onto fixed-size pages and describes
//! each page as render items that the PDF writer serializes.

mod assets;
mod error;
mod flow;
mod render_item;
mod renderer;

pub use assets::*;
pub use error::*;
pub use flow::BULLET;
pub use render_item::*;
pub use renderer::*;
