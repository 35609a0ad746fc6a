//! Block content and renderers
//!
//! [`BlockContent::for_block`] decides what a block shows; a
//! [`RendererRegistry`] draws it with egui.

mod colors;
mod content;
pub mod renderers;

pub use colors::{categorical_color, heat_color};
pub use content::BlockContent;
pub use renderers::{BlockRenderer, RendererRegistry};
