//! Platform abstraction layer
//!
//! Seams to the collaborators outside the face:
//! - Time (monotonic clock + sleep)
//! - Input events (latched flags)
//! - Asset loading (shaders, textures, quad geometry)

pub mod assets;
pub mod input;
pub mod time;

pub use assets::{AssetLoader, FaceResources, HeadlessLoader, TextureId, TextureSet};
pub use input::{Action, FrameInput, InputLatch, Key, MouseButton};
pub use time::{FrameClock, SystemClock};
