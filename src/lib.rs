//! Pulse Face - a simulated wearable watch face
//!
//! Core modules:
//! - `sim`: Deterministic models (clock, battery, vitals, squeeze gesture, screen state)
//! - `scene`: Pure composition of model state into draw commands
//! - `renderer`: Draw contract consumed by the composed frame
//! - `platform`: Time, input, and asset-loading seams
//! - `scheduler`: Fixed-rate frame pacing

pub mod error;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use error::{InitError, LoadError, SettingsError};
pub use settings::Settings;
pub use sim::WatchFace;

use glam::Vec2;

/// Watch face configuration constants
pub mod consts {
    /// Target presentation rate
    pub const TARGET_FPS: u32 = 75;
    /// Sleep this much short of the frame deadline, then spin the rest
    pub const SLEEP_MARGIN_SECS: f64 = 0.001;

    /// One clock tick per second of simulated time
    pub const TICK_NANOS: u64 = 1_000_000_000;
    /// Clock ticks between battery drain events
    pub const BATTERY_DRAIN_TICKS: u32 = 10;
    /// Fraction removed from the battery per drain event
    pub const BATTERY_DRAIN_STEP: f32 = 0.01;

    /// Heart rate at power-on
    pub const INITIAL_BPM: f32 = 70.0;
    /// Heart rate target while exertion is held
    pub const EXERTION_BPM: f32 = 220.0;
    /// Approach gain toward the exertion target (per second)
    pub const EXERTION_GAIN: f32 = 0.5;
    /// Resting wander range
    pub const RESTING_BPM_MIN: f32 = 60.0;
    pub const RESTING_BPM_MAX: f32 = 80.0;
    /// Approach gain toward the resting target (per second)
    pub const RESTING_GAIN: f32 = 1.5;
    /// Minimum time between resting re-targets
    pub const RETARGET_INTERVAL_SECS: f64 = 0.5;
    /// Above this the face switches to the warning overlay
    pub const WARNING_BPM: f32 = 200.0;

    /// Squeeze animation bounds and speed (scale units per second)
    pub const SQUEEZE_MIN: f32 = 0.2;
    pub const SQUEEZE_MAX: f32 = 1.0;
    pub const SQUEEZE_RATE: f32 = 0.2;

    /// Taps beyond this normalized X (in either direction) navigate
    pub const TAP_EDGE: f32 = 0.7;

    /// Clock reading at power-on
    pub const START_TIME: [u8; 3] = [23, 59, 55];
}

/// Clamp a frame delta to something the models can safely integrate.
///
/// Clock discontinuities can produce negative or non-finite deltas; those become zero.
#[inline]
pub fn sanitize_delta(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

/// Convert a pixel position to normalized device coordinates (Y up)
#[inline]
pub fn pixel_to_ndc(x: f64, y: f64, width: u32, height: u32) -> Vec2 {
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    Vec2::new(x as f32 / half_w - 1.0, -(y as f32 / half_h - 1.0))
}
