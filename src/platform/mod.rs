//! Platform abstraction layer
//!
//! The game loop only talks to these seams:
//! - Held-key queries and key press/release events
//! - A render surface that accepts drawables
//! - Frame pacing against the wall clock
//!
//! `HeadlessWindow` implements them without an OS window.

pub mod headless;
pub mod input;
pub mod time;
pub mod window;

pub use headless::{HeadlessWindow, ScriptAction};
pub use input::{EdgeTrigger, Key, KeySource};
pub use time::Pacer;
pub use window::{Window, WindowEvent};
