//! Pong Master entry point
//!
//! Runs a headless, scripted session through the shell at a fixed 60 Hz:
//! opens the game from the home screen, plays with a sweeping pointer,
//! pauses once, and quits back home after the ball is lost. Pass a path to
//! write the last game frame as a PPM image.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use glam::Vec2;
use pong_master::platform::{InputEvent, Key};
use pong_master::renderer::Canvas;
use pong_master::shell::PONG_MASTER_APP;
use pong_master::sim::Scope;
use pong_master::{Settings, Shell};

const SETTINGS_PATH: &str = "settings.json";
const DISPLAY: Vec2 = Vec2::new(1280.0, 720.0);
const DT: f32 = 1.0 / 60.0;
/// Give up after two minutes of simulated play
const MAX_FRAMES: u32 = 60 * 120;
const PAUSE_AT: u32 = 300;
const RESUME_AT: u32 = 420;

fn main() {
    env_logger::init();
    log::info!("Pong Master (headless) starting...");

    let frame_path = std::env::args().nth(1);
    let settings = Settings::load(SETTINGS_PATH);
    let mut shell = Shell::new(settings, DISPLAY);

    shell.step(&[], DT);
    shell.switch_to(PONG_MASTER_APP);
    shell.step(&[InputEvent::KeyDown(Key::Start)], DT);

    let origin = shell.canvas_origin();
    let mut last_play_frame: Option<Canvas> = None;
    let mut frames = 0;

    while frames < MAX_FRAMES && shell.key_hints() != Scope::Menu.key_hints() {
        let t = frames as f32 * DT;
        let sweep = Vec2::new(150.0 + 140.0 * (t * 1.7).sin(), 560.0);
        let mut events = vec![InputEvent::PointerMove { pos: origin + sweep }];
        if frames == PAUSE_AT || frames == RESUME_AT {
            events.push(InputEvent::KeyDown(Key::Start));
        }

        shell.step(&events, DT);
        if shell.key_hints() == Scope::Play.key_hints() {
            last_play_frame = Some(shell.frame().clone());
        }
        frames += 1;
    }

    log::info!(
        "Session over after {} frames ({:.1}s)",
        frames,
        frames as f32 * DT
    );

    // Let the menu fade in, then leave for the home screen
    for _ in 0..60 {
        shell.step(&[], DT);
    }
    shell.step(&[InputEvent::KeyDown(Key::Cancel)], DT);
    shell.step(&[InputEvent::QuitRequest], DT);
    log::info!(
        "Back on {}, running: {}",
        shell.active_name(),
        shell.is_running()
    );

    if let (Some(path), Some(frame)) = (frame_path, last_play_frame) {
        match write_ppm(Path::new(&path), &frame) {
            Ok(()) => log::info!("Wrote last play frame to {}", path),
            Err(e) => log::error!("Failed to write {}: {}", path, e),
        }
    }
}

/// Binary PPM (P6), alpha dropped
fn write_ppm(path: &Path, canvas: &Canvas) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "P6\n{} {}\n255\n", canvas.width(), canvas.height())?;
    for pixel in canvas.pixels() {
        out.write_all(&[pixel.r, pixel.g, pixel.b])?;
    }
    out.flush()
}
