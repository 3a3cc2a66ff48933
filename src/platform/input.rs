//! Input latch between the windowing callbacks and the frame loop
//!
//! Callbacks may fire on another thread, so every field is a word-sized atomic.
//! The loop takes a `FrameInput` snapshot at the top of each frame; the tap is a
//! one-shot and is consumed by the snapshot.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use glam::DVec2;

/// Keys the face reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Held to simulate exertion
    D,
    Escape,
    Other,
}

/// Key or button transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Press,
    Release,
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Input for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Cursor position in device pixels
    pub pointer: DVec2,
    /// Primary tap since the last snapshot, in device pixels
    pub tap: Option<DVec2>,
    /// Exertion key held
    pub exertion: bool,
}

#[derive(Debug, Default)]
struct AtomicPoint {
    x: AtomicU64,
    y: AtomicU64,
}

impl AtomicPoint {
    fn store(&self, p: DVec2) {
        self.x.store(p.x.to_bits(), Ordering::Relaxed);
        self.y.store(p.y.to_bits(), Ordering::Relaxed);
    }

    fn load(&self) -> DVec2 {
        DVec2::new(
            f64::from_bits(self.x.load(Ordering::Relaxed)),
            f64::from_bits(self.y.load(Ordering::Relaxed)),
        )
    }
}

/// Flags written by input callbacks, read once per frame
#[derive(Debug, Default)]
pub struct InputLatch {
    pointer: AtomicPoint,
    tap: AtomicPoint,
    tap_pending: AtomicBool,
    exertion: AtomicBool,
    exit: AtomicBool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continuous cursor sampling
    pub fn set_pointer(&self, x: f64, y: f64) {
        self.pointer.store(DVec2::new(x, y));
    }

    pub fn set_exertion(&self, active: bool) {
        self.exertion.store(active, Ordering::Relaxed);
    }

    /// Record a primary tap; a later tap in the same frame replaces it
    pub fn tap_at(&self, x: f64, y: f64) {
        self.tap.store(DVec2::new(x, y));
        self.tap_pending.store(true, Ordering::Release);
    }

    pub fn request_exit(&self) {
        self.exit.store(true, Ordering::Relaxed);
    }

    pub fn exit_requested(&self) -> bool {
        self.exit.load(Ordering::Relaxed)
    }

    /// Keyboard callback
    pub fn on_key(&self, key: Key, action: Action) {
        match (key, action) {
            (Key::D, Action::Press) => self.set_exertion(true),
            (Key::D, Action::Release) => self.set_exertion(false),
            (Key::Escape, Action::Press) => {
                log::info!("Exit requested");
                self.request_exit();
            }
            _ => {}
        }
    }

    /// Mouse button callback; a left press taps at the last known cursor position
    pub fn on_mouse_button(&self, button: MouseButton, action: Action) {
        if button == MouseButton::Left && action == Action::Press {
            let p = self.pointer.load();
            self.tap_at(p.x, p.y);
        }
    }

    /// Read the flags for this frame, consuming any pending tap
    pub fn snapshot(&self) -> FrameInput {
        let tap = if self.tap_pending.swap(false, Ordering::Acquire) {
            Some(self.tap.load())
        } else {
            None
        };
        FrameInput {
            pointer: self.pointer.load(),
            tap,
            exertion: self.exertion.load(Ordering::Relaxed),
        }
    }
}
