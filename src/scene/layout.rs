//! Placement of every face element, in normalized device coordinates

use glam::Vec2;

// Clock screen
pub const CLOCK_DIGIT_SIZE: Vec2 = Vec2::new(0.1, 0.15);
pub const CLOCK_START_X: f32 = -0.4;
/// X offsets from `CLOCK_START_X` for HH, MM, SS digit pairs
pub const CLOCK_DIGIT_OFFSETS: [f32; 6] = [0.0, 0.15, 0.4, 0.55, 0.8, 0.95];
pub const CLOCK_COLON_OFFSETS: [f32; 2] = [0.28, 0.68];
pub const CLOCK_ARROW_SIZE: Vec2 = Vec2::new(0.08, 0.1);

// Navigation arrows
pub const ARROW_LEFT_POS: Vec2 = Vec2::new(-0.85, 0.0);
pub const ARROW_RIGHT_POS: Vec2 = Vec2::new(0.85, 0.0);
pub const ARROW_SIZE: Vec2 = Vec2::new(0.08, 0.08);

// Heart screen
pub const EKG_WIDTH: f32 = 0.7;
pub const EKG_HEIGHT: f32 = 0.4;
pub const BPM_DIGIT_SIZE: Vec2 = Vec2::new(0.07, 0.1);
pub const BPM_BASE: Vec2 = Vec2::new(-0.15, 0.45);
/// X offsets from `BPM_BASE` for hundreds, tens, ones
pub const BPM_DIGIT_OFFSETS: [f32; 3] = [0.0, 0.12, 0.24];

// Battery screen
pub const BATTERY_FRAME_SIZE: Vec2 = Vec2::new(0.5, 0.4);
pub const BATTERY_GAUGE_POS: Vec2 = Vec2::new(0.025, 0.0);
pub const BATTERY_GAUGE_SIZE: Vec2 = Vec2::new(0.4, 0.15);
pub const PERCENT_GLYPH_SIZE: Vec2 = Vec2::new(0.05, 0.08);
/// The percent sign after two digits is drawn smaller
pub const PERCENT_SIGN_SMALL: Vec2 = Vec2::new(0.04, 0.06);
pub const PERCENT_BASE: Vec2 = Vec2::new(-0.06, 0.35);

// Overlays
pub const CURSOR_SIZE: f32 = 0.06;
pub const BADGE_SIZE: Vec2 = Vec2::new(0.28, 0.12);
pub const BADGE_MARGIN: f32 = 0.02;
pub const WARNING_IMAGE_SIZE: Vec2 = Vec2::new(1.0, 0.5);
pub const FULL_SCREEN: Vec2 = Vec2::new(2.0, 2.0);

/// Badge center: pinned to the top-right corner from a [0, 1] placement
pub fn badge_center() -> Vec2 {
    let corner = Vec2::ONE - BADGE_SIZE / 2.0 - Vec2::splat(BADGE_MARGIN);
    corner * 2.0 - Vec2::ONE
}
