//! Fixed-rate frame loop
//!
//! Each frame samples the clock, runs the face's update and composition passes, then
//! pads the frame out to the target duration: a bounded sleep that stops
//! `SLEEP_MARGIN_SECS` short of the deadline, followed by a spin on the clock.

use std::time::Duration;

use crate::consts::SLEEP_MARGIN_SECS;
use crate::platform::{FrameClock, InputLatch};
use crate::renderer::DrawTarget;
use crate::settings::Settings;
use crate::sim::WatchFace;

const FPS_WINDOW: usize = 60;

/// Rolling frame rate over the last 60 frame timestamps
#[derive(Debug, Clone)]
pub struct FrameStats {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    recorded: usize,
    fps: u32,
    last_report: Option<f64>,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            recorded: 0,
            fps: 0,
            last_report: None,
        }
    }
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp. Returns the current rate once per second.
    pub fn record(&mut self, time: f64) -> Option<u32> {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.recorded = (self.recorded + 1).min(FPS_WINDOW);

        // Oldest sample is the next slot once the ring is full
        let oldest = if self.recorded == FPS_WINDOW {
            self.frame_times[self.frame_index]
        } else {
            self.frame_times[0]
        };
        let elapsed = time - oldest;
        if self.recorded > 1 && elapsed > 0.0 {
            self.fps = ((self.recorded - 1) as f64 / elapsed).round() as u32;
        }

        match self.last_report {
            Some(last) if time - last < 1.0 => None,
            _ => {
                self.last_report = Some(time);
                Some(self.fps)
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Drives a `WatchFace` at a fixed target rate
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    frame_duration: Duration,
    run_seconds: Option<f64>,
    stats: FrameStats,
    frames: u64,
}

impl FrameScheduler {
    pub fn new(frame_duration: Duration) -> Self {
        Self {
            frame_duration,
            run_seconds: None,
            stats: FrameStats::new(),
            frames: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.frame_duration()).with_run_limit(settings.run_seconds)
    }

    /// Stop `run` after this many seconds of clock time
    pub fn with_run_limit(mut self, seconds: Option<f64>) -> Self {
        self.run_seconds = seconds;
        self
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Run one frame and pace it. Returns the number of primitives drawn.
    pub fn run_frame(
        &mut self,
        clock: &mut dyn FrameClock,
        face: &mut WatchFace,
        latch: &InputLatch,
        target: &mut dyn DrawTarget,
    ) -> usize {
        let frame_start = clock.now();
        let input = latch.snapshot();
        let drawn = face.tick(frame_start, &input, target);

        self.frames += 1;
        if let Some(fps) = self.stats.record(frame_start) {
            log::debug!("FPS: {} ({} primitives)", fps, drawn);
        }

        self.pace(clock, frame_start);
        drawn
    }

    /// Wait until `frame_duration` has passed since `frame_start`
    pub fn pace(&self, clock: &mut dyn FrameClock, frame_start: f64) {
        let deadline = frame_start + self.frame_duration.as_secs_f64();

        let sleep_for = deadline - clock.now() - SLEEP_MARGIN_SECS;
        if sleep_for > 0.0 {
            clock.sleep(Duration::from_secs_f64(sleep_for));
        }

        while clock.now() < deadline {
            std::hint::spin_loop();
        }
    }

    /// Loop until exit is requested or the run limit elapses. Returns frames run.
    pub fn run(
        &mut self,
        clock: &mut dyn FrameClock,
        face: &mut WatchFace,
        latch: &InputLatch,
        target: &mut dyn DrawTarget,
    ) -> u64 {
        let started = clock.now();
        let first_frame = self.frames;
        log::info!(
            "Frame loop started ({:.2} ms per frame)",
            self.frame_duration.as_secs_f64() * 1000.0
        );

        while !latch.exit_requested() {
            if let Some(limit) = self.run_seconds {
                if clock.now() - started >= limit {
                    log::info!("Run limit of {limit}s reached");
                    break;
                }
            }
            self.run_frame(clock, face, latch, target);
        }

        let ran = self.frames - first_frame;
        log::info!("Frame loop stopped after {} frames", ran);
        ran
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::platform::HeadlessLoader;
    use crate::renderer::DrawList;

    /// Clock that advances a fixed step per sample and jumps on sleep
    struct FakeClock {
        now: Cell<f64>,
        poll_step: f64,
        sleeps: Vec<Duration>,
    }

    impl FakeClock {
        fn new(poll_step: f64) -> Self {
            Self {
                now: Cell::new(0.0),
                poll_step,
                sleeps: Vec::new(),
            }
        }
    }

    impl FrameClock for FakeClock {
        fn now(&self) -> f64 {
            let t = self.now.get();
            self.now.set(t + self.poll_step);
            t
        }

        fn sleep(&mut self, duration: Duration) {
            self.sleeps.push(duration);
            self.now.set(self.now.get() + duration.as_secs_f64());
        }
    }

    fn face() -> WatchFace {
        let mut loader = HeadlessLoader::new(false);
        let mut face = WatchFace::new(&Settings::default(), 9);
        face.initialize(&mut loader, 800, 800, 0.0).unwrap();
        face
    }

    fn scheduler() -> FrameScheduler {
        FrameScheduler::from_settings(&Settings::default())
    }

    #[test]
    fn test_pace_sleeps_then_spins_to_deadline() {
        let sched = scheduler();
        let mut clock = FakeClock::new(1e-5);
        sched.pace(&mut clock, 0.0);

        let frame = 1.0 / 75.0;
        assert_eq!(clock.sleeps.len(), 1);
        let slept = clock.sleeps[0].as_secs_f64();
        assert!(slept < frame - SLEEP_MARGIN_SECS + 1e-9);
        assert!(slept > frame - SLEEP_MARGIN_SECS - 1e-4);

        let end = clock.now.get();
        assert!(end >= frame);
        assert!(end < frame + 1e-4);
    }

    #[test]
    fn test_pace_inside_margin_only_spins() {
        let sched = scheduler();
        let mut clock = FakeClock::new(1e-5);
        clock.now.set(1.0 / 75.0 - 0.0005);
        sched.pace(&mut clock, 0.0);
        assert!(clock.sleeps.is_empty());
        assert!(clock.now.get() >= 1.0 / 75.0);
    }

    #[test]
    fn test_overrun_frame_returns_immediately() {
        let sched = scheduler();
        let mut clock = FakeClock::new(1e-5);
        clock.now.set(0.05);
        sched.pace(&mut clock, 0.0);
        assert!(clock.sleeps.is_empty());
        assert!(clock.now.get() < 0.0501);
    }

    #[test]
    fn test_run_stops_at_limit() {
        let mut sched = scheduler().with_run_limit(Some(1.0));
        let mut clock = FakeClock::new(1e-5);
        let mut face = face();
        let latch = InputLatch::new();
        let mut list = DrawList::new();

        let frames = sched.run(&mut clock, &mut face, &latch, &mut list);
        assert!((74..=76).contains(&frames), "ran {frames} frames");
        assert_eq!(sched.stats().fps(), 75);
        assert!(!list.is_empty());
    }

    #[test]
    fn test_run_stops_on_exit_request() {
        let mut sched = scheduler();
        let mut clock = FakeClock::new(1e-5);
        let mut face = face();
        let latch = InputLatch::new();
        latch.request_exit();
        let mut list = DrawList::new();
        assert_eq!(sched.run(&mut clock, &mut face, &latch, &mut list), 0);
    }

    #[test]
    fn test_run_frame_consumes_tap() {
        let mut sched = scheduler();
        let mut clock = FakeClock::new(1e-5);
        let mut face = face();
        let latch = InputLatch::new();
        let mut list = DrawList::new();

        latch.set_pointer(790.0, 400.0);
        latch.tap_at(790.0, 400.0);
        sched.run_frame(&mut clock, &mut face, &latch, &mut list);
        sched.run_frame(&mut clock, &mut face, &latch, &mut list);
        assert_eq!(face.screen(), crate::sim::Screen::Heart);
        assert_eq!(sched.frames(), 2);
    }

    #[test]
    fn test_frame_stats() {
        let mut stats = FrameStats::new();
        assert_eq!(stats.record(0.0), Some(0));
        let mut reports = 0;
        for i in 1..=150 {
            if stats.record(i as f64 / 75.0).is_some() {
                reports += 1;
            }
        }
        assert_eq!(stats.fps(), 75);
        assert_eq!(reports, 2);
    }
}
