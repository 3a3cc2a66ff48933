//! Screen navigation
//!
//! A linear three-state machine: Clock < Heart < Battery. Only taps near the
//! left or right edge move it, one step at a time, with no wraparound.

use serde::{Deserialize, Serialize};

use crate::consts::TAP_EDGE;

/// Visible screen
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Screen {
    #[default]
    Clock,
    Heart,
    Battery,
}

/// Direction of a navigation tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Forward,
    Back,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Clock, Screen::Heart, Screen::Battery];

    /// Next screen to the right; Battery is terminal
    pub fn next(self) -> Self {
        match self {
            Screen::Clock => Screen::Heart,
            Screen::Heart | Screen::Battery => Screen::Battery,
        }
    }

    /// Previous screen to the left; Clock is terminal
    pub fn prev(self) -> Self {
        match self {
            Screen::Battery => Screen::Heart,
            Screen::Heart | Screen::Clock => Screen::Clock,
        }
    }

    pub fn apply(self, swipe: Swipe) -> Self {
        match swipe {
            Swipe::Forward => self.next(),
            Swipe::Back => self.prev(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Clock => "Clock",
            Screen::Heart => "Heart",
            Screen::Battery => "Battery",
        }
    }
}

/// Normalized horizontal tap position in [-1, 1]
#[inline]
pub fn normalize_tap_x(pointer_x: f64, screen_width: u32) -> f32 {
    pointer_x as f32 / (screen_width as f32 / 2.0) - 1.0
}

/// Classify a normalized tap position; the middle of the screen does nothing
pub fn classify_tap(mx: f32) -> Option<Swipe> {
    if mx > TAP_EDGE {
        Some(Swipe::Forward)
    } else if mx < -TAP_EDGE {
        Some(Swipe::Back)
    } else {
        None
    }
}

/// Owns the current screen; mutated only by taps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenStateMachine {
    current: Screen,
}

impl ScreenStateMachine {
    pub fn new(current: Screen) -> Self {
        Self { current }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Apply a tap at normalized X; returns true if the screen changed
    pub fn on_tap(&mut self, mx: f32) -> bool {
        let Some(swipe) = classify_tap(mx) else {
            return false;
        };
        let next = self.current.apply(swipe);
        if next == self.current {
            return false;
        }
        log::debug!("Screen {} -> {}", self.current.as_str(), next.as_str());
        self.current = next;
        true
    }

    /// Apply a tap given in device pixels
    pub fn on_tap_pixels(&mut self, pointer_x: f64, screen_width: u32) -> bool {
        self.on_tap(normalize_tap_x(pointer_x, screen_width))
    }
}
