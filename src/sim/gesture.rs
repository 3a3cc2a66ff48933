//! Squeeze animation scalar

use serde::{Deserialize, Serialize};

use crate::consts::{SQUEEZE_MAX, SQUEEZE_MIN, SQUEEZE_RATE};
use crate::sanitize_delta;

/// Linear ease between the squeezed and relaxed scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureModel {
    pub scale: f32,
}

impl Default for GestureModel {
    fn default() -> Self {
        Self { scale: SQUEEZE_MAX }
    }
}

impl GestureModel {
    /// Shrink toward `SQUEEZE_MIN` while active, relax toward `SQUEEZE_MAX` otherwise
    pub fn update(&mut self, dt: f64, active: bool) {
        let step = SQUEEZE_RATE * sanitize_delta(dt) as f32;
        let next = if active { self.scale - step } else { self.scale + step };
        self.scale = next.clamp(SQUEEZE_MIN, SQUEEZE_MAX);
    }
}
