//! Frame composition
//!
//! A pure mapping from a snapshot of the models to an ordered list of draw
//! commands. Nothing here holds state; the whole frame is re-derived every tick.
//!
//! Draw order: active screen, cursor, identity badge, then the heart-rate warning.

pub mod layout;
pub mod readout;

use glam::Vec2;

use crate::consts::WARNING_BPM;
use crate::platform::TextureSet;
use crate::renderer::{BatteryGauge, DrawCommand, TexturedQuad, UvRect, colors};
use crate::sim::{Screen, WallClock};

use layout::*;
pub use readout::{BatteryReadout, bpm_digits, clock_digits, display_bpm};

/// Everything composition reads from the models for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceView {
    pub screen: Screen,
    pub time: WallClock,
    pub battery_level: f32,
    pub bpm: f32,
    pub ekg_scroll: f32,
    pub squeeze: f32,
    /// Cursor position in NDC
    pub pointer: Vec2,
}

impl FaceView {
    pub fn is_critical(&self) -> bool {
        self.bpm > WARNING_BPM
    }
}

/// Compose the full frame
pub fn compose(view: &FaceView, textures: &TextureSet) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(16);

    match view.screen {
        Screen::Clock => clock_screen(view, textures, &mut out),
        Screen::Heart => heart_screen(view, textures, &mut out),
        Screen::Battery => battery_screen(view, textures, &mut out),
    }

    cursor_and_badge(view, textures, &mut out);
    warning_overlay(view, textures, &mut out);

    out
}

fn quad(out: &mut Vec<DrawCommand>, quad: TexturedQuad) {
    out.push(DrawCommand::Quad(quad));
}

fn clock_screen(view: &FaceView, textures: &TextureSet, out: &mut Vec<DrawCommand>) {
    let digits = clock_digits(&view.time);
    let at = |offset: f32| Vec2::new(CLOCK_START_X + offset, 0.0);

    // HH : MM : SS
    for group in 0..3 {
        for i in group * 2..group * 2 + 2 {
            let glyph = textures.digit(digits[i]);
            quad(out, TexturedQuad::new(glyph, at(CLOCK_DIGIT_OFFSETS[i]), CLOCK_DIGIT_SIZE));
        }
        if let Some(&offset) = CLOCK_COLON_OFFSETS.get(group) {
            quad(out, TexturedQuad::new(textures.colon, at(offset), CLOCK_DIGIT_SIZE));
        }
    }
    quad(out, TexturedQuad::new(textures.arrow_right, ARROW_RIGHT_POS, CLOCK_ARROW_SIZE));
}

fn heart_screen(view: &FaceView, textures: &TextureSet, out: &mut Vec<DrawCommand>) {
    // Past the threshold only the warning overlay is shown
    if view.is_critical() {
        return;
    }

    quad(out, TexturedQuad::new(textures.arrow_left, ARROW_LEFT_POS, ARROW_SIZE));
    quad(out, TexturedQuad::new(textures.arrow_right, ARROW_RIGHT_POS, ARROW_SIZE));

    // Stretch the waveform with heart rate and scroll it horizontally
    let ekg_scale = 1.0 + view.bpm / 100.0;
    let ekg_size = Vec2::new(EKG_WIDTH * view.squeeze, EKG_HEIGHT);
    quad(
        out,
        TexturedQuad::new(textures.ekg, Vec2::ZERO, ekg_size)
            .with_uv(UvRect::new(view.ekg_scroll, 0.0, ekg_scale, 1.0)),
    );

    for (slot, digit) in bpm_digits(display_bpm(view.bpm)) {
        let pos = BPM_BASE + Vec2::new(BPM_DIGIT_OFFSETS[slot], 0.0);
        quad(out, TexturedQuad::new(textures.digit(digit), pos, BPM_DIGIT_SIZE));
    }
}

fn battery_screen(view: &FaceView, textures: &TextureSet, out: &mut Vec<DrawCommand>) {
    quad(out, TexturedQuad::new(textures.arrow_left, ARROW_LEFT_POS, ARROW_SIZE));
    quad(out, TexturedQuad::new(textures.battery_frame, Vec2::ZERO, BATTERY_FRAME_SIZE));
    out.push(DrawCommand::BatteryGauge(BatteryGauge {
        center: BATTERY_GAUGE_POS,
        size: BATTERY_GAUGE_SIZE,
        level: view.battery_level,
    }));

    let at = |dx: f32| PERCENT_BASE + Vec2::new(dx, 0.0);
    match BatteryReadout::from_level(view.battery_level) {
        BatteryReadout::Full => {
            quad(out, TexturedQuad::new(textures.digit(1), at(-0.06), PERCENT_GLYPH_SIZE));
            quad(out, TexturedQuad::new(textures.digit(0), at(0.04), PERCENT_GLYPH_SIZE));
            quad(out, TexturedQuad::new(textures.digit(0), at(0.14), PERCENT_GLYPH_SIZE));
            quad(out, TexturedQuad::new(textures.percent, at(0.26), PERCENT_GLYPH_SIZE));
        }
        BatteryReadout::TwoDigits(tens, ones) => {
            quad(out, TexturedQuad::new(textures.digit(tens), at(0.0), PERCENT_GLYPH_SIZE));
            quad(out, TexturedQuad::new(textures.digit(ones), at(0.10), PERCENT_GLYPH_SIZE));
            quad(out, TexturedQuad::new(textures.percent, at(0.20), PERCENT_SIGN_SMALL));
        }
        BatteryReadout::OneDigit(d) => {
            quad(out, TexturedQuad::new(textures.digit(d), at(0.04), PERCENT_GLYPH_SIZE));
            quad(out, TexturedQuad::new(textures.percent, at(0.14), PERCENT_GLYPH_SIZE));
        }
        BatteryReadout::Empty => {
            quad(out, TexturedQuad::new(textures.percent, at(0.04), PERCENT_GLYPH_SIZE));
        }
    }
}

fn cursor_and_badge(view: &FaceView, textures: &TextureSet, out: &mut Vec<DrawCommand>) {
    let cursor = Vec2::splat(CURSOR_SIZE * view.squeeze);
    quad(out, TexturedQuad::new(textures.heart, view.pointer, cursor));

    quad(
        out,
        TexturedQuad::new(textures.id_badge, badge_center(), BADGE_SIZE).with_tint(colors::BADGE),
    );
}

fn warning_overlay(view: &FaceView, textures: &TextureSet, out: &mut Vec<DrawCommand>) {
    if !view.is_critical() {
        return;
    }
    let overlay = match textures.warning {
        Some(image) => TexturedQuad::new(image, Vec2::ZERO, WARNING_IMAGE_SIZE),
        None => TexturedQuad::flat(Vec2::ZERO, FULL_SCREEN, colors::WARNING_TINT),
    };
    quad(out, overlay);
}
