//! Simulated heart rate and EKG scroll
//!
//! The heart rate eases toward a target with an exponential-decay step. While
//! exertion is held the target is fixed high; at rest it wanders, re-rolled from a
//! seeded generator at most every `RETARGET_INTERVAL_SECS`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sanitize_delta;

/// Seed wrapper so the wander sequence is reproducible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Heart rate, wander target, and EKG scroll offset
#[derive(Debug, Clone)]
pub struct VitalsModel {
    /// Current heart rate (beats per minute)
    pub bpm: f32,
    /// Resting target the rate is easing toward
    pub resting_target: f32,
    /// Horizontal UV offset of the EKG strip; grows without bound
    pub scroll_offset: f32,
    /// Whether the last update ran under exertion
    pub exertion: bool,
    /// Time of the last resting re-target
    last_retarget: f64,
    rng: Pcg32,
}

impl VitalsModel {
    /// Create with a seeded generator; `now` starts the re-target cadence
    pub fn new(rng_state: RngState, now: f64) -> Self {
        let mut rng = rng_state.to_rng();
        let resting_target = rng.random_range(RESTING_BPM_MIN..=RESTING_BPM_MAX);
        Self {
            bpm: INITIAL_BPM,
            resting_target,
            scroll_offset: 0.0,
            exertion: false,
            last_retarget: now,
            rng,
        }
    }

    /// Advance one frame
    pub fn update(&mut self, now: f64, dt: f64, exertion: bool) {
        let dt = sanitize_delta(dt) as f32;
        self.exertion = exertion;

        if exertion {
            self.approach(EXERTION_BPM, dt, EXERTION_GAIN);
        } else {
            if now - self.last_retarget >= RETARGET_INTERVAL_SECS {
                self.resting_target = self.rng.random_range(RESTING_BPM_MIN..=RESTING_BPM_MAX);
                self.last_retarget = now;
            }
            self.approach(self.resting_target, dt, RESTING_GAIN);
        }

        // Faster heart, faster waveform
        self.scroll_offset += (self.bpm / 100.0) * dt;
    }

    /// Whether the presentation layer should raise the warning
    pub fn is_critical(&self) -> bool {
        self.bpm > WARNING_BPM
    }

    fn approach(&mut self, target: f32, dt: f32, gain: f32) {
        // Never step past the target, even after a long stall
        let factor = (dt * gain).min(1.0);
        self.bpm += (target - self.bpm) * factor;
    }
}
