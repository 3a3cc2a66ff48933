//! The watch face engine
//!
//! Owns every model and the resources acquired at startup. One instance per face;
//! nothing is global, so several faces (or tests) can run side by side.

use std::path::PathBuf;

use glam::DVec2;

use super::clock::{BatteryState, ClockModel, WallClock};
use super::gesture::GestureModel;
use super::screen::{Screen, ScreenStateMachine};
use super::vitals::{RngState, VitalsModel};
use crate::error::InitError;
use crate::platform::{AssetLoader, FaceResources, FrameInput};
use crate::renderer::{DrawCommand, DrawTarget, colors, submit_frame};
use crate::scene::{self, FaceView};
use crate::settings::Settings;
use crate::{pixel_to_ndc, sanitize_delta};

/// Simulation and composition engine for one face
#[derive(Debug)]
pub struct WatchFace {
    clock: ClockModel,
    vitals: VitalsModel,
    gesture: GestureModel,
    screen: ScreenStateMachine,
    rng_state: RngState,
    /// Last pointer position in device pixels
    pointer: DVec2,
    screen_size: (u32, u32),
    asset_root: PathBuf,
    resources: Option<FaceResources>,
    last_frame: Option<f64>,
    frame_count: u64,
    warned_uninitialized: bool,
    was_critical: bool,
}

impl WatchFace {
    /// Build the models from settings; `seed` drives the resting heart-rate wander
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let [h, m, s] = settings.start_time;
        let rng_state = RngState::new(seed);
        Self {
            clock: ClockModel::new(
                WallClock::new(h, m, s),
                BatteryState::new(settings.start_battery),
            ),
            vitals: VitalsModel::new(rng_state, 0.0),
            gesture: GestureModel::default(),
            screen: ScreenStateMachine::default(),
            rng_state,
            pointer: DVec2::ZERO,
            screen_size: (settings.screen_width, settings.screen_height),
            asset_root: settings.asset_root.clone(),
            resources: None,
            last_frame: None,
            frame_count: 0,
            warned_uninitialized: false,
            was_critical: false,
        }
    }

    /// Acquire shaders, geometry, and textures. Any required failure is fatal.
    ///
    /// `now` starts the frame and re-target clocks.
    pub fn initialize(
        &mut self,
        loader: &mut dyn AssetLoader,
        width: u32,
        height: u32,
        now: f64,
    ) -> Result<(), InitError> {
        if width == 0 || height == 0 {
            return Err(InitError::InvalidScreenSize { width, height });
        }
        let resources = FaceResources::acquire(loader, &self.asset_root)?;
        if let Some(old) = self.resources.replace(resources) {
            old.release(loader);
        }

        self.screen_size = (width, height);
        self.last_frame = Some(now);
        // Draw the first resting target at startup, as the cadence begins
        self.vitals = VitalsModel::new(self.rng_state, now);

        log::info!(
            "Watch face initialized ({}x{}, seed {})",
            width,
            height,
            self.rng_state.seed
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.resources.is_some()
    }

    /// Update pass: integrate `now - last frame` into every model
    pub fn update(&mut self, now: f64, input: &FrameInput) {
        let dt = match self.last_frame {
            Some(last) => sanitize_delta(now - last),
            None => 0.0,
        };
        self.last_frame = Some(now);
        self.frame_count += 1;

        self.pointer = input.pointer;
        if let Some(tap) = input.tap {
            self.screen.on_tap_pixels(tap.x, self.screen_size.0);
        }

        self.gesture.update(dt, input.exertion);
        self.clock.advance(dt);
        self.vitals.update(now, dt, input.exertion);

        let critical = self.vitals.is_critical();
        if critical != self.was_critical {
            if critical {
                log::warn!("Heart rate critical: {:.0} bpm", self.vitals.bpm);
            } else {
                log::info!("Heart rate back to {:.0} bpm", self.vitals.bpm);
            }
            self.was_critical = critical;
        }
    }

    /// Snapshot of everything composition reads
    pub fn view(&self) -> FaceView {
        let (w, h) = self.screen_size;
        FaceView {
            screen: self.screen.current(),
            time: self.clock.time,
            battery_level: self.clock.battery.level,
            bpm: self.vitals.bpm,
            ekg_scroll: self.vitals.scroll_offset,
            squeeze: self.gesture.scale,
            pointer: pixel_to_ndc(self.pointer.x, self.pointer.y, w, h),
        }
    }

    /// Composition pass; empty until initialized
    pub fn compose(&mut self) -> Vec<DrawCommand> {
        match &self.resources {
            Some(resources) => scene::compose(&self.view(), &resources.textures),
            None => {
                if !self.warned_uninitialized {
                    log::warn!("Composing before initialize; frame left empty");
                    self.warned_uninitialized = true;
                }
                Vec::new()
            }
        }
    }

    /// One full frame: update, compose, submit. Returns the number of primitives drawn.
    pub fn tick(&mut self, now: f64, input: &FrameInput, target: &mut dyn DrawTarget) -> usize {
        self.update(now, input);
        let commands = self.compose();
        submit_frame(colors::BACKGROUND, &commands, target);
        commands.len()
    }

    /// Release everything acquired by `initialize`
    pub fn shutdown(&mut self, loader: &mut dyn AssetLoader) {
        if let Some(resources) = self.resources.take() {
            resources.release(loader);
            log::info!("Watch face shut down after {} frames", self.frame_count);
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen.current()
    }

    pub fn time(&self) -> WallClock {
        self.clock.time
    }

    pub fn battery(&self) -> BatteryState {
        self.clock.battery
    }

    pub fn vitals(&self) -> &VitalsModel {
        &self.vitals
    }

    pub fn squeeze(&self) -> f32 {
        self.gesture.scale
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn resources(&self) -> Option<&FaceResources> {
        self.resources.as_ref()
    }
}
