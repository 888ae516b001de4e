//! Windowless surface driven by a per-frame script
//!
//! Used by the native binary (no OS window backend is linked) and by the
//! game loop tests. Drawables are recorded instead of rasterized, along with
//! the clip-space line list a GPU backend would upload.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use glam::Vec2;

use super::input::{Key, KeySource};
use super::window::{Window, WindowEvent};
use crate::renderer::{DrawList, Drawable, Vertex};

/// Something that happens at the start of a scripted frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptAction {
    /// Key goes down (a second press without release acts as OS key repeat)
    Press(Key),
    Release(Key),
    /// User closes the window
    Close,
}

#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    size: (u32, u32),
    open: bool,
    /// Frames presented so far
    frame: u64,
    frame_limit: Option<u64>,
    script: BTreeMap<u64, Vec<ScriptAction>>,
    /// Frame whose script has already been queued
    queued_frame: Option<u64>,
    pending: VecDeque<WindowEvent>,
    held: BTreeSet<Key>,
    clear_color: [f32; 4],
    current: DrawList,
    presented: DrawList,
    /// Outline vertices of the presented frame, in clip space
    uploaded: Vec<Vertex>,
}

impl HeadlessWindow {
    pub fn new(size: (u32, u32)) -> Self {
        Self {
            size,
            open: true,
            frame: 0,
            frame_limit: None,
            script: BTreeMap::new(),
            queued_frame: None,
            pending: VecDeque::new(),
            held: BTreeSet::new(),
            clear_color: [0.0; 4],
            current: DrawList::new(),
            presented: DrawList::new(),
            uploaded: Vec::new(),
        }
    }

    /// Close automatically after `frames` presented frames
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Schedule an action at the start of `frame` (0-based)
    pub fn at(mut self, frame: u64, action: ScriptAction) -> Self {
        self.script.entry(frame).or_default().push(action);
        self
    }

    /// Hold `key` from `start` (inclusive) to `end` (exclusive)
    pub fn hold(self, key: Key, start: u64, end: u64) -> Self {
        self.at(start, ScriptAction::Press(key))
            .at(end, ScriptAction::Release(key))
    }

    pub fn frames_presented(&self) -> u64 {
        self.frame
    }

    /// Drawables of the most recently displayed frame
    pub fn last_frame(&self) -> &DrawList {
        &self.presented
    }

    /// Line-list vertices of the most recently displayed frame
    pub fn last_vertices(&self) -> &[Vertex] {
        &self.uploaded
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    fn queue_script(&mut self) {
        if self.queued_frame == Some(self.frame) {
            return;
        }
        self.queued_frame = Some(self.frame);
        let Some(actions) = self.script.remove(&self.frame) else {
            return;
        };
        for action in actions {
            let event = match action {
                ScriptAction::Press(key) => {
                    self.held.insert(key);
                    WindowEvent::KeyPressed(key)
                }
                ScriptAction::Release(key) => {
                    self.held.remove(&key);
                    WindowEvent::KeyReleased(key)
                }
                ScriptAction::Close => WindowEvent::Closed,
            };
            self.pending.push_back(event);
        }
    }
}

impl KeySource for HeadlessWindow {
    fn is_key_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

impl Window for HeadlessWindow {
    fn is_open(&self) -> bool {
        self.open
    }

    fn poll_event(&mut self) -> Option<WindowEvent> {
        self.queue_script();
        self.pending.pop_front()
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.clear_color = color;
        self.current.clear();
    }

    fn draw(&mut self, drawable: &Drawable) {
        self.current.push(drawable.clone());
    }

    fn display(&mut self) {
        self.presented = std::mem::take(&mut self.current);
        let world = Vec2::new(self.size.0 as f32, self.size.1 as f32);
        self.uploaded = self
            .presented
            .line_vertices()
            .into_iter()
            .map(|v| v.to_clip(world))
            .collect();
        self.frame += 1;
        if self.frame_limit.is_some_and(|limit| self.frame >= limit) {
            self.open = false;
        }
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }
}
