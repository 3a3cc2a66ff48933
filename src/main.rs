//! Pulse Face entry point
//!
//! Runs the face headless: settings from an optional JSON path, a headless asset
//! loader, and the system clock. Input arrives as lines on stdin:
//!
//! ```text
//! move X Y     pointer position in pixels
//! click        left press at the pointer
//! d down|up    hold or release exertion
//! quit         same as Escape
//! ```
//!
//! End of input also stops the loop.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use pulse_face::platform::{
    Action, FrameClock, HeadlessLoader, InputLatch, Key, MouseButton, SystemClock,
};
use pulse_face::renderer::{DrawList, InstanceBatch};
use pulse_face::scheduler::FrameScheduler;
use pulse_face::{Settings, WatchFace};

fn main() {
    env_logger::init();
    log::info!("Pulse Face (headless) starting...");

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = match Settings::load_or_default(path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let mut clock = SystemClock::new();
    let mut loader = HeadlessLoader::new(settings.verify_assets);
    let mut face = WatchFace::new(&settings, seed);
    if let Err(e) = face.initialize(
        &mut loader,
        settings.screen_width,
        settings.screen_height,
        clock.now(),
    ) {
        log::error!("Failed to initialize watch face: {}", e);
        std::process::exit(1);
    }

    let latch = Arc::new(InputLatch::new());
    spawn_stdin_reader(Arc::clone(&latch));

    let mut frame = DrawList::new();
    let mut scheduler = FrameScheduler::from_settings(&settings);
    scheduler.run(&mut clock, &mut face, &latch, &mut frame);

    if let Some(clear_color) = frame.clear_color {
        let batch = InstanceBatch::encode(clear_color, &frame.commands);
        log::debug!(
            "Last frame: {} instances in {} batches ({} bytes)",
            batch.instances.len(),
            batch.batches.len(),
            batch.instance_bytes().len()
        );
    }
    match serde_json::to_string(&frame) {
        Ok(json) => log::debug!("Last frame: {}", json),
        Err(e) => log::warn!("Could not serialize last frame: {}", e),
    }
    face.shutdown(&mut loader);
}

/// Feed stdin commands into the latch from a background thread
fn spawn_stdin_reader(latch: Arc<InputLatch>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        read_commands(&latch, stdin.lock());
    });
}

/// Apply every command line; once input is exhausted, request exit
fn read_commands(latch: &InputLatch, reader: impl BufRead) {
    for line in reader.lines() {
        let Ok(line) = line else { break };
        apply_command(latch, &line);
    }
    log::info!("Input closed");
    latch.request_exit();
}

fn apply_command(latch: &InputLatch, line: &str) {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["move", x, y] => match (x.parse::<f64>(), y.parse::<f64>()) {
            (Ok(x), Ok(y)) => latch.set_pointer(x, y),
            _ => log::warn!("Bad pointer position: {}", line),
        },
        ["click"] => latch.on_mouse_button(MouseButton::Left, Action::Press),
        ["d", "down"] => latch.on_key(Key::D, Action::Press),
        ["d", "up"] => latch.on_key(Key::D, Action::Release),
        ["quit"] | ["escape"] => latch.on_key(Key::Escape, Action::Press),
        [] => {}
        _ => log::warn!("Unknown command: {}", line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use std::io::Cursor;

    #[test]
    fn test_commands_drive_latch() {
        let latch = InputLatch::new();
        apply_command(&latch, "move 780 400");
        apply_command(&latch, "click");
        apply_command(&latch, "d down");

        let input = latch.snapshot();
        assert_eq!(input.pointer, DVec2::new(780.0, 400.0));
        assert_eq!(input.tap, Some(DVec2::new(780.0, 400.0)));
        assert!(input.exertion);

        apply_command(&latch, "d up");
        apply_command(&latch, "move nowhere");
        assert!(!latch.snapshot().exertion);
        assert!(!latch.exit_requested());
    }

    #[test]
    fn test_end_of_input_requests_exit() {
        let latch = InputLatch::new();
        read_commands(&latch, Cursor::new("move 10 20\nd down\n"));
        assert!(latch.exit_requested());
        assert!(latch.snapshot().exertion);

        let latch = InputLatch::new();
        read_commands(&latch, Cursor::new(""));
        assert!(latch.exit_requested());
    }
}
