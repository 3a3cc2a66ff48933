//! Digit selection for the numeric readouts

use crate::sim::WallClock;

/// HH MM SS as six decimal digits
pub fn clock_digits(time: &WallClock) -> [u32; 6] {
    let (h, m, s) = (time.hours() as u32, time.minutes() as u32, time.seconds() as u32);
    [h / 10, h % 10, m / 10, m % 10, s / 10, s % 10]
}

/// Heart rate as printed: rounded to the nearest whole beat
pub fn display_bpm(bpm: f32) -> u32 {
    bpm.round().max(0.0) as u32
}

/// Heart-rate glyphs paired with their slot (0 = hundreds, 1 = tens, 2 = ones).
///
/// Below 100 the hundreds slot is left empty rather than drawing a zero; the tens
/// digit is always drawn.
pub fn bpm_digits(bpm: u32) -> Vec<(usize, u32)> {
    let hundreds = (bpm / 100) % 10;
    let tens = (bpm / 10) % 10;
    let ones = bpm % 10;
    if hundreds > 0 {
        vec![(0, hundreds), (1, tens), (2, ones)]
    } else {
        vec![(1, tens), (2, ones)]
    }
}

/// Battery percentage as the face prints it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryReadout {
    /// "100%"
    Full,
    /// Two digits and a small percent sign
    TwoDigits(u32, u32),
    /// One digit, no leading zero
    OneDigit(u32),
    /// Exactly 0: the percent sign alone
    Empty,
}

impl BatteryReadout {
    pub fn from_percent(percent: u32) -> Self {
        if percent >= 100 {
            BatteryReadout::Full
        } else if percent >= 10 {
            BatteryReadout::TwoDigits(percent / 10, percent % 10)
        } else if percent > 0 {
            BatteryReadout::OneDigit(percent)
        } else {
            BatteryReadout::Empty
        }
    }

    pub fn from_level(level: f32) -> Self {
        Self::from_percent((level * 100.0).round().max(0.0) as u32)
    }
}
