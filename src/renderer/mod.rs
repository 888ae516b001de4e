//! Renderer-agnostic draw output
//!
//! The simulation produces a [`DrawList`] per frame; a window backend turns
//! it into pixels. Polygons can be flattened to GPU line-list vertices.

pub mod shapes;
pub mod vertex;

pub use shapes::{DrawList, Drawable, colors, game_over_overlay, hud_text, paused_overlay};
pub use vertex::Vertex;
