//! Pong Master - a phone-shell Pong minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, power-ups, palette, scopes)
//! - `renderer`: Software frame buffer and scene composition
//! - `platform`: Input events and requests back to the host shell
//! - `app`: The Pong Master app driving scopes, fades and persistence
//! - `shell`: App registry and active-app switching

pub mod app;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod shell;
pub mod sim;

pub use app::PongMaster;
pub use highscores::HighScoreStore;
pub use settings::Settings;
pub use shell::{App, Shell};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Virtual canvas the app renders into
    pub const CANVAS_WIDTH: u32 = 300;
    pub const CANVAS_HEIGHT: u32 = 600;

    /// Ball defaults (side of the bounding square is canvas height / 40)
    pub const BALL_SIZE: f32 = (CANVAS_HEIGHT / 40) as f32;
    pub const BALL_START_SPEED: f32 = 300.0;
    pub const BALL_START_HEADING: f32 = 3.0 * std::f32::consts::FRAC_PI_4; // 135°
    /// Power-ups can never slow the ball below this
    pub const BALL_MIN_SPEED: f32 = 200.0;
    /// Speed added every `SCORE_CADENCE` points
    pub const BALL_SPEED_STEP: f32 = 110.0;

    /// Trail history
    pub const TRAIL_LENGTH: usize = 8;
    pub const TRAIL_INTERVAL: f32 = 0.015;

    /// Near-center hits (|offset| below this) get a random spin
    pub const CENTER_HIT_THRESHOLD: f32 = 0.2;
    pub const JITTER_DEGREES: f32 = 10.0;
    /// Beta(a, a) shape for the jitter; a < 1 favours the extremes
    pub const JITTER_SHAPE: f32 = 0.3;

    /// Paddle
    pub const PADDLE_WIDTH: f32 = 75.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_BOTTOM_OFFSET: f32 = 50.0;

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 15.0;
    /// Expected spawns per second
    pub const POWER_UP_SPAWN_RATE: f32 = 0.08;
    pub const MAX_POWER_UPS: usize = 5;
    pub const POWER_UP_SIDE_INSET: i32 = 30;
    pub const POWER_UP_BOTTOM_INSET: i32 = 200;
    pub const SLOW_BALL_AMOUNT: f32 = 70.0;

    /// Scoring and palette cadence
    pub const SCORE_CADENCE: u32 = 5;
    pub const HUE_STEP: f64 = 0.23;
    pub const START_COLOR: (u8, u8, u8) = (237, 205, 32);
    pub const START_SHADE: f64 = 0.3;
    pub const CADENCE_SHADE: f64 = 0.2;

    /// Cross-fade
    pub const FADE_RATE: f32 = 400.0;
    pub const MENU_ALPHA: f32 = 255.0;
    pub const PAUSE_ALPHA: f32 = 150.0;

    /// Decorative menu balls
    pub const MENU_BALL_COUNT: u32 = 10;
    pub const MENU_BALL_SPEED_MIN: u32 = 250;
    pub const MENU_BALL_SPEED_MAX: u32 = 800;
    pub const MENU_HERO_SPEED: f32 = 550.0;
}

/// Canvas size as a vector
#[inline]
pub fn canvas_size() -> Vec2 {
    Vec2::new(consts::CANVAS_WIDTH as f32, consts::CANVAS_HEIGHT as f32)
}

/// Unit direction for a heading.
///
/// Headings are measured from the +y (downward) axis, so `x = sin`, `y = cos`.
#[inline]
pub fn heading_to_direction(heading: f32) -> Vec2 {
    Vec2::new(heading.sin(), heading.cos())
}

/// Velocity for a heading and scalar speed
#[inline]
pub fn heading_to_velocity(heading: f32, speed: f32) -> Vec2 {
    heading_to_direction(heading) * speed
}
