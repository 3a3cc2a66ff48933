//! Wall clock and battery, both driven by the one-second tick

use serde::{Deserialize, Serialize};

use crate::consts::{BATTERY_DRAIN_STEP, BATTERY_DRAIN_TICKS, START_TIME, TICK_NANOS};
use crate::sanitize_delta;

/// Time of day shown on the clock face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallClock {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl Default for WallClock {
    fn default() -> Self {
        let [hours, minutes, seconds] = START_TIME;
        Self::new(hours, minutes, seconds)
    }
}

impl WallClock {
    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self {
            hours: hours % 24,
            minutes: minutes % 60,
            seconds: seconds % 60,
        }
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    /// Advance by one second, carrying into minutes and hours.
    ///
    /// Out-of-range fields (e.g. from deserialized state) carry instead of overflowing.
    pub fn increment(&mut self) {
        if self.seconds < 59 {
            self.seconds += 1;
            return;
        }
        self.seconds = 0;
        if self.minutes < 59 {
            self.minutes += 1;
            return;
        }
        self.minutes = 0;
        self.hours = (self.hours % 24 + 1) % 24;
    }
}

/// Battery charge, drained on the clock's tick cadence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryState {
    /// Charge fraction in [0, 1]
    pub level: f32,
    /// Ticks since the last drain event
    ticks_since_drain: u32,
}

impl Default for BatteryState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl BatteryState {
    pub fn new(level: f32) -> Self {
        Self {
            level: level.clamp(0.0, 1.0),
            ticks_since_drain: 0,
        }
    }

    /// Count one tick; drains a step every `BATTERY_DRAIN_TICKS`
    pub fn on_tick(&mut self) {
        self.ticks_since_drain += 1;
        if self.ticks_since_drain >= BATTERY_DRAIN_TICKS {
            self.level = (self.level - BATTERY_DRAIN_STEP).max(0.0);
            self.ticks_since_drain = 0;
        }
    }
}

/// Clock and battery sharing a single accumulator so they can never drift apart
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClockModel {
    pub time: WallClock,
    pub battery: BatteryState,
    /// Progress toward the next tick, in nanoseconds
    accumulator_nanos: u64,
    /// Sub-nanosecond rounding error carried into the next call, in [-0.5, 0.5]
    #[serde(default)]
    residue_nanos: f64,
}

impl ClockModel {
    pub fn new(time: WallClock, battery: BatteryState) -> Self {
        Self {
            time,
            battery,
            accumulator_nanos: 0,
            residue_nanos: 0.0,
        }
    }

    /// Accumulate elapsed time and emit whole-second ticks.
    ///
    /// Returns the number of ticks produced by this call.
    pub fn advance(&mut self, elapsed_secs: f64) -> u32 {
        // Sub-nanosecond remainder carries into the next call
        let exact = sanitize_delta(elapsed_secs) * 1e9 + self.residue_nanos;
        let whole = exact.round().max(0.0);
        self.residue_nanos = exact - whole;
        self.accumulator_nanos = self.accumulator_nanos.saturating_add(whole as u64);

        let mut ticks = 0;
        while self.accumulator_nanos >= TICK_NANOS {
            self.accumulator_nanos -= TICK_NANOS;
            self.time.increment();
            self.battery.on_tick();
            ticks += 1;
        }
        ticks
    }

    /// Fractional progress toward the next tick, in seconds
    pub fn pending_secs(&self) -> f64 {
        self.accumulator_nanos as f64 / 1e9
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_increment_carries_and_wraps() {
        let mut clock = WallClock::new(23, 59, 59);
        clock.increment();
        assert_eq!(clock, WallClock::new(0, 0, 0));

        let mut clock = WallClock::new(10, 14, 59);
        clock.increment();
        assert_eq!(clock, WallClock::new(10, 15, 0));
    }

    #[test]
    fn test_default_start_time() {
        let model = ClockModel::default();
        assert_eq!(model.time, WallClock::new(23, 59, 55));
        assert_eq!(model.battery.level, 1.0);
    }

    #[test]
    fn test_advance_emits_one_tick_per_second() {
        let mut model = ClockModel::new(WallClock::new(12, 0, 0), BatteryState::default());
        assert_eq!(model.advance(0.6), 0);
        assert_eq!(model.advance(0.6), 1);
        assert_eq!(model.time.seconds(), 1);
        assert!((model.pending_secs() - 0.2).abs() < 1e-9);

        // A long stall catches up tick by tick
        assert_eq!(model.advance(3.0), 3);
        assert_eq!(model.time.seconds(), 4);
    }

    #[test]
    fn test_invalid_delta_is_ignored() {
        let mut model = ClockModel::default();
        let before = model.time;
        assert_eq!(model.advance(-5.0), 0);
        assert_eq!(model.advance(f64::NAN), 0);
        assert_eq!(model.advance(f64::INFINITY), 0);
        assert_eq!(model.time, before);
        assert_eq!(model.battery.level, 1.0);
    }

    #[test]
    fn test_battery_drains_every_ten_ticks() {
        let mut model = ClockModel::default();
        model.advance(9.0);
        assert_eq!(model.battery.level, 1.0);
        model.advance(1.0);
        assert!((model.battery.level - 0.99).abs() < 1e-6);
        model.advance(10.0);
        assert!((model.battery.level - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_battery_floors_at_zero() {
        let mut battery = BatteryState::new(0.005);
        for _ in 0..50 {
            battery.on_tick();
        }
        assert_eq!(battery.level, 0.0);
    }

    #[test]
    fn test_thirds_of_a_second_make_a_tick() {
        let mut model = ClockModel::new(WallClock::new(8, 30, 0), BatteryState::default());
        let ticks: u32 = (0..3).map(|_| model.advance(1.0 / 3.0)).sum();
        assert_eq!(ticks, 1);
        assert_eq!(model.time, WallClock::new(8, 30, 1));
        assert!(model.pending_secs() < 1e-9);
    }

    #[test]
    fn test_frame_rate_deltas_tick_on_time() {
        let mut model = ClockModel::new(WallClock::new(8, 30, 0), BatteryState::default());
        let frame = 1.0 / 75.0;

        // The first tick lands on frame 75, not 76
        let early: u32 = (0..74).map(|_| model.advance(frame)).sum();
        assert_eq!(early, 0);
        assert_eq!(model.advance(frame), 1);

        let rest: u32 = (75..4500).map(|_| model.advance(frame)).sum();
        assert_eq!(1 + rest, 60);
        assert_eq!(model.time, WallClock::new(8, 31, 0));
    }

    #[test]
    fn test_out_of_range_fields_carry() {
        let mut clock: WallClock =
            serde_json::from_str(r#"{ "hours": 23, "minutes": 255, "seconds": 255 }"#).unwrap();
        clock.increment();
        assert_eq!(clock, WallClock::new(0, 0, 0));

        let mut clock: WallClock =
            serde_json::from_str(r#"{ "hours": 255, "minutes": 59, "seconds": 59 }"#).unwrap();
        clock.increment();
        assert_eq!(clock.hours(), 16);
    }

    proptest! {
        #[test]
        fn prop_minute_is_chunking_invariant(
            chunks in prop::collection::vec(0u64..2_500, 1..200)
        ) {
            // Split 60 s into arbitrary millisecond chunks, remainder goes last
            let mut remaining: u64 = 60_000;
            let mut deltas = Vec::new();
            for c in chunks {
                let c = c.min(remaining);
                deltas.push(c);
                remaining -= c;
            }
            deltas.push(remaining);

            let mut model = ClockModel::new(WallClock::new(8, 30, 0), BatteryState::default());
            let ticks: u32 = deltas.iter().map(|ms| model.advance(*ms as f64 / 1000.0)).sum();

            prop_assert_eq!(ticks, 60);
            prop_assert_eq!(model.time, WallClock::new(8, 31, 0));
            prop_assert_eq!(model.pending_secs(), 0.0);
        }

        #[test]
        fn prop_minute_is_chunking_invariant_for_fractional_splits(
            weights in prop::collection::vec(0.001f64..1.0, 1..400)
        ) {
            // Arbitrary f64 split of 60 s; the last chunk absorbs the float remainder
            let total: f64 = weights.iter().sum();
            let mut deltas: Vec<f64> = weights.iter().map(|w| w / total * 60.0).collect();
            deltas.pop();
            let head: f64 = deltas.iter().sum();
            deltas.push((60.0 - head).max(0.0));

            let mut model = ClockModel::new(WallClock::new(8, 30, 0), BatteryState::default());
            let ticks: u32 = deltas.iter().map(|dt| model.advance(*dt)).sum();

            prop_assert_eq!(ticks, 60);
            prop_assert_eq!(model.time, WallClock::new(8, 31, 0));
        }

        #[test]
        fn prop_minute_is_chunking_invariant_for_uniform_frames(divisor in 1u32..500) {
            // 60 s cut into `60 * divisor` frames of 1/divisor s each
            let dt = 1.0 / divisor as f64;
            let mut model = ClockModel::new(WallClock::new(8, 30, 0), BatteryState::default());
            let ticks: u32 = (0..60 * divisor).map(|_| model.advance(dt)).sum();

            prop_assert_eq!(ticks, 60);
            prop_assert_eq!(model.time, WallClock::new(8, 31, 0));
        }

        #[test]
        fn prop_battery_monotonic_and_bounded(
            deltas in prop::collection::vec(0.0f64..30.0, 1..100)
        ) {
            let mut model = ClockModel::default();
            let mut last = model.battery.level;
            let mut total_ticks = 0u32;
            for dt in deltas {
                total_ticks += model.advance(dt);
                prop_assert!(model.battery.level <= last);
                prop_assert!(model.battery.level >= 0.0);
                last = model.battery.level;
            }
            let drains = (total_ticks / BATTERY_DRAIN_TICKS) as f32;
            let expected = (1.0 - drains * BATTERY_DRAIN_STEP).max(0.0);
            prop_assert!((model.battery.level - expected).abs() < 1e-3);
        }
    }
}
