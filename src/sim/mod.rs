//! Face simulation module
//!
//! Everything that changes over time lives here. Models are plain values driven by
//! explicit elapsed time:
//! - Real elapsed seconds only (negative or non-finite deltas count as zero)
//! - Seeded RNG only
//! - No rendering or platform dependencies beyond the loader seam in `face`

pub mod clock;
pub mod face;
pub mod gesture;
pub mod screen;
pub mod vitals;

pub use clock::{BatteryState, ClockModel, WallClock};
pub use face::WatchFace;
pub use gesture::GestureModel;
pub use screen::{Screen, ScreenStateMachine, Swipe, classify_tap, normalize_tap_x};
pub use vitals::{RngState, VitalsModel};
