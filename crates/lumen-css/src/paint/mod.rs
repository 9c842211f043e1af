//! Painting.
//!
//! Converts a box tree into a display list of abstract drawing commands.
//! The list carries no pixels: a consumer renders it and applies its own
//! scroll offset.
//!
//! ```text
//! Style → Layout → Paint → Render
//!                    ↓
//!              DisplayList
//! ```
//!
//! Commands come in document paint order: a box before its children, and
//! children in box-tree order.

mod display_list;
mod painter;

pub use display_list::{DisplayCommand, DisplayList};
pub use painter::{BULLET_COLOR, Painter};
