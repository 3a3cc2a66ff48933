//! Rendering contract
//!
//! The face never talks to a graphics API directly. It emits `DrawCommand`s that a
//! `DrawTarget` consumes; `InstanceBatch` packs them into GPU instance data.

pub mod command;
pub mod instance;

pub use command::{
    BatteryGauge, DrawCommand, DrawList, DrawTarget, TextureHandle, TexturedQuad, UvRect,
    submit_frame,
};
pub use instance::{DrawBatch, InstanceBatch, Program, QuadInstance, QuadVertex};

/// Colors for face elements
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
    pub const BADGE: [f32; 4] = [1.0, 1.0, 1.0, 0.6];
    /// Full-screen fallback when the warning image is unavailable
    pub const WARNING_TINT: [f32; 4] = [1.0, 0.2, 0.2, 0.55];
}
