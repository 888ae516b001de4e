//! Drawable primitives and overlays

use glam::Vec2;

use super::vertex::Vertex;

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const SHIP: [f32; 4] = [0.9, 0.95, 1.0, 1.0];
    /// Ship hull while the respawn grace period is running
    pub const SHIP_GHOST: [f32; 4] = [0.9, 0.95, 1.0, 0.4];
    pub const FLAME: [f32; 4] = [1.0, 0.55, 0.15, 1.0];
    pub const PROJECTILE: [f32; 4] = [1.0, 1.0, 0.6, 1.0];
    pub const HAZARD: [f32; 4] = [0.7, 0.7, 0.8, 1.0];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

/// Character size of the centered overlay texts
pub const OVERLAY_CHAR_SIZE: u32 = 48;
/// Character size of the HUD line
pub const HUD_CHAR_SIZE: u32 = 18;

/// Something the window backend knows how to draw
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    /// Closed polygon in world space
    Polygon {
        points: Vec<Vec2>,
        color: [f32; 4],
        filled: bool,
    },
    /// Text centered on `center`; font handling belongs to the backend
    Text {
        content: String,
        center: Vec2,
        char_size: u32,
        color: [f32; 4],
    },
}

/// Ordered drawables for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    items: Vec<Drawable>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, drawable: Drawable) {
        self.items.push(drawable);
    }

    /// Outline polygon
    pub fn polygon(&mut self, points: Vec<Vec2>, color: [f32; 4]) {
        self.items.push(Drawable::Polygon {
            points,
            color,
            filled: false,
        });
    }

    /// Filled polygon
    pub fn filled(&mut self, points: Vec<Vec2>, color: [f32; 4]) {
        self.items.push(Drawable::Polygon {
            points,
            color,
            filled: true,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Drawable> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Flatten polygon outlines into a line list (two vertices per edge).
    /// Text is skipped.
    pub fn line_vertices(&self) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        for item in &self.items {
            let Drawable::Polygon { points, color, .. } = item else {
                continue;
            };
            if points.len() < 2 {
                // Point-like shapes become a zero-length segment
                if let Some(&p) = points.first() {
                    vertices.push(Vertex::at(p, *color));
                    vertices.push(Vertex::at(p, *color));
                }
                continue;
            }
            for (i, &a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                vertices.push(Vertex::at(a, *color));
                vertices.push(Vertex::at(b, *color));
            }
        }
        vertices
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a Drawable;
    type IntoIter = std::slice::Iter<'a, Drawable>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn centered_text(content: &str, window_size: (u32, u32), char_size: u32) -> Drawable {
    Drawable::Text {
        content: content.to_string(),
        center: Vec2::new(window_size.0 as f32 / 2.0, window_size.1 as f32 / 2.0),
        char_size,
        color: colors::TEXT,
    }
}

/// Static overlay shown instead of the scene while paused
pub fn paused_overlay(window_size: (u32, u32)) -> Drawable {
    centered_text("Game Paused", window_size, OVERLAY_CHAR_SIZE)
}

/// Overlay shown once the last life is lost
pub fn game_over_overlay(window_size: (u32, u32), score: u64) -> Drawable {
    centered_text(
        &format!("Game Over - Score {score} - Press Enter"),
        window_size,
        OVERLAY_CHAR_SIZE,
    )
}

/// Score / lives / wave line along the top of the window
pub fn hud_text(window_size: (u32, u32), score: u64, lives: u8, wave: u32) -> Drawable {
    Drawable::Text {
        content: format!("Score {score}   Lives {lives}   Wave {}", wave + 1),
        center: Vec2::new(
            window_size.0 as f32 / 2.0,
            window_size.1 as f32 - HUD_CHAR_SIZE as f32,
        ),
        char_size: HUD_CHAR_SIZE,
        color: colors::TEXT,
    }
}
