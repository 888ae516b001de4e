//! Window / render surface seam

use super::input::{Key, KeySource};
use crate::renderer::Drawable;

/// Events delivered by the window between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Closed,
    KeyPressed(Key),
    KeyReleased(Key),
}

/// What the game loop needs from a window backend.
///
/// Closing only flips `is_open`; the loop finishes the frame in flight
/// before it stops.
pub trait Window: KeySource {
    fn is_open(&self) -> bool;

    /// Next pending event, if any
    fn poll_event(&mut self) -> Option<WindowEvent>;

    fn clear(&mut self, color: [f32; 4]);

    fn draw(&mut self, drawable: &Drawable);

    /// Present the frame
    fn display(&mut self);

    fn close(&mut self);

    /// Size in pixels
    fn size(&self) -> (u32, u32);
}
