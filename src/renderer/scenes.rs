//! Scene composition: play frame, pause overlay, menu panel and backdrop
//!
//! Every function here is a pure function of its arguments; drawing the
//! same state twice yields identical pixels.

use glam::Vec2;

use super::canvas::Canvas;
use super::font::{draw_text, draw_text_centered, text_height, text_width};
use crate::consts::*;
use crate::sim::{Ball, Controls, MenuBalls, PowerUp, Rect, Rgb, Session};

/// Backdrop behind the decorative menu balls
pub const MENU_BACKDROP: Rgb = Rgb::new(0, 0, 98);
/// Title, labels and button outlines on the menu
pub const MENU_ACCENT: Rgb = Rgb::new(180, 195, 255);
const MENU_BUTTON_FILL: Rgb = Rgb::new(15, 15, 130);
const PAUSE_BUTTON_FILL: Rgb = Rgb::new(30, 30, 30);

const BUTTON_RADIUS: f32 = 20.0;
const BUTTON_OUTLINE: f32 = 7.0;
const PADDLE_RADIUS: f32 = 10.0;

const SCORE_SCALE: u32 = 9;
const RECORD_SCALE: u32 = 15;
const TITLE_SCALE: u32 = 3;
const PAUSED_SCALE: u32 = 5;
const BUTTON_SCALE: u32 = 3;
const LABEL_SCALE: u32 = 2;
const HIGH_SCORE_SCALE: u32 = 8;

/// Fading trail behind a ball, most recent stamp drawn first
pub fn draw_trail(canvas: &mut Canvas, ball: &Ball) {
    for stamp in ball.trail_stamps() {
        canvas.fill_circle(stamp.center, stamp.radius, ball.color, stamp.alpha);
    }
}

pub fn draw_ball(canvas: &mut Canvas, ball: &Ball) {
    canvas.fill_circle(ball.center().floor(), ball.radius(), ball.color, 255);
}

pub fn draw_paddle(canvas: &mut Canvas, paddle: &Rect) {
    canvas.fill_rounded_rect(paddle, PADDLE_RADIUS, Rgb::BLACK, 255);
}

pub fn draw_power_up(canvas: &mut Canvas, power_up: &PowerUp) {
    let radius = POWER_UP_SIZE / 2.0;
    canvas.fill_circle(power_up.rect.pos + Vec2::splat(radius), radius, Rgb::WHITE, 255);
}

/// Rounded button with a centred label
fn draw_button(canvas: &mut Canvas, rect: &Rect, label: &str, fill: Rgb, outline: Rgb) {
    canvas.fill_rounded_rect(rect, BUTTON_RADIUS, fill, 255);
    canvas.stroke_rounded_rect(rect, BUTTON_RADIUS, BUTTON_OUTLINE, outline);
    let top = rect.center().y.floor() - (text_height(BUTTON_SCALE) / 2) as f32;
    draw_text_centered(canvas, label, rect.center().x, top, BUTTON_SCALE, outline);
}

/// Compose one Play frame.
///
/// Background in the palette colour, score centred, then power-ups, trail,
/// ball and paddle on top.
pub fn draw_play(canvas: &mut Canvas, session: &Session, trails: bool) {
    canvas.fill(session.palette.base);

    let (scale, color) = if session.scoreboard.set_record {
        (RECORD_SCALE, session.palette.high_score)
    } else {
        (SCORE_SCALE, session.palette.score)
    };
    let text = session.score().to_string();
    let top = (canvas.size().y / 2.0).floor() - (text_height(scale) / 2) as f32;
    draw_text_centered(canvas, &text, canvas.size().x / 2.0, top, scale, color);

    for power_up in &session.power_ups {
        draw_power_up(canvas, power_up);
    }

    if trails {
        draw_trail(canvas, &session.ball);
    }
    draw_ball(canvas, &session.ball);
    draw_paddle(canvas, &session.paddle.rect);
}

/// Opaque pause panel; the app fades it in over the frozen play frame
pub fn render_pause_overlay(size: Vec2, controls: &Controls) -> Canvas {
    let mut overlay = Canvas::filled(size.x as u32, size.y as u32, Rgb::BLACK);
    draw_text_centered(&mut overlay, "PAUSED", size.x / 2.0, 100.0, PAUSED_SCALE, Rgb::WHITE);
    draw_button(
        &mut overlay,
        &controls.primary,
        "RESUME",
        PAUSE_BUTTON_FILL,
        Rgb::WHITE,
    );
    draw_button(
        &mut overlay,
        &controls.secondary,
        "MENU",
        PAUSE_BUTTON_FILL,
        Rgb::WHITE,
    );
    overlay
}

/// Static menu panel on a transparent canvas: title, high score and buttons
pub fn render_menu_panel(size: Vec2, controls: &Controls, high_score: u32) -> Canvas {
    let mut panel = Canvas::new(size.x as u32, size.y as u32);
    let center_x = size.x / 2.0;
    let mid_y = (size.y / 2.0).floor();

    draw_text_centered(
        &mut panel,
        "PONG MASTER",
        center_x,
        mid_y - 250.0,
        TITLE_SCALE,
        MENU_ACCENT,
    );

    // Label sits on the left edge of the value
    let value = high_score.to_string();
    let value_x = center_x.floor() - (text_width(&value, HIGH_SCORE_SCALE) / 2) as f32;
    draw_text(
        &mut panel,
        "HIGHSCORE:",
        Vec2::new(value_x, mid_y - 170.0),
        LABEL_SCALE,
        MENU_ACCENT,
    );
    draw_text(
        &mut panel,
        &value,
        Vec2::new(value_x, mid_y - 150.0),
        HIGH_SCORE_SCALE,
        MENU_ACCENT,
    );

    draw_button(
        &mut panel,
        &controls.primary,
        "PLAY",
        MENU_BUTTON_FILL,
        MENU_ACCENT,
    );
    draw_button(
        &mut panel,
        &controls.secondary,
        "QUIT",
        MENU_BUTTON_FILL,
        MENU_ACCENT,
    );
    panel
}

/// Menu scene: backdrop, bouncing balls, then the static panel
pub fn draw_menu_scene(target: &mut Canvas, balls: &MenuBalls, panel: &Canvas, trails: bool) {
    target.fill(MENU_BACKDROP);
    for ball in &balls.balls {
        if trails {
            draw_trail(target, ball);
        }
        draw_ball(target, ball);
    }
    target.blit(panel, 255);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Pixel;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn size() -> Vec2 {
        crate::canvas_size()
    }

    fn controls() -> Controls {
        Controls::for_canvas(size())
    }

    fn blank() -> Canvas {
        Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    #[test]
    fn test_menu_panel_is_pure() {
        let a = render_menu_panel(size(), &controls(), 42);
        let b = render_menu_panel(size(), &controls(), 42);
        assert_eq!(a, b);
        assert_ne!(a, render_menu_panel(size(), &controls(), 43));
    }

    #[test]
    fn test_menu_panel_is_transparent_outside_widgets() {
        let panel = render_menu_panel(size(), &controls(), 0);
        assert_eq!(panel.pixel(2, 2), Some(Pixel::TRANSPARENT));
        let play = controls().primary;
        let inside = panel.pixel(play.left() as i32 + 15, play.top() as i32 + 50);
        assert_eq!(inside, Some(Pixel::opaque(MENU_BUTTON_FILL)));
    }

    #[test]
    fn test_pause_overlay_is_opaque() {
        let overlay = render_pause_overlay(size(), &controls());
        assert!(overlay.pixels().iter().all(|p| p.a == 255));
    }

    #[test]
    fn test_play_frame_layers() {
        let mut session = Session::start(size(), 0);
        session.power_ups.push(PowerUp::slow_ball(Vec2::new(40.0, 40.0)));
        let mut canvas = blank();
        draw_play(&mut canvas, &session, true);

        assert_eq!(canvas.pixel(1, 1), Some(Pixel::opaque(session.palette.base)));
        let c = session.ball.center().floor();
        assert_eq!(canvas.pixel(c.x as i32, c.y as i32), Some(Pixel::opaque(Rgb::BLACK)));
        assert_eq!(canvas.pixel(47, 47), Some(Pixel::opaque(Rgb::WHITE)));
        let paddle = session.paddle.rect.center();
        assert_eq!(
            canvas.pixel(paddle.x as i32, paddle.y as i32),
            Some(Pixel::opaque(Rgb::BLACK))
        );
    }

    #[test]
    fn test_record_uses_high_score_colour() {
        let mut session = Session::start(size(), 0);
        session.scoreboard.register_hit();
        assert!(session.scoreboard.set_record);

        let mut canvas = blank();
        draw_play(&mut canvas, &session, false);
        let target = Pixel::opaque(session.palette.high_score);
        assert!(canvas.pixels().iter().any(|p| *p == target));
    }

    #[test]
    fn test_menu_scene_shows_panel_over_backdrop() {
        let mut rng = Pcg32::seed_from_u64(9);
        let balls = MenuBalls::new(size(), &mut rng);
        let panel = render_menu_panel(size(), &controls(), 7);
        let mut canvas = blank();
        draw_menu_scene(&mut canvas, &balls, &panel, true);
        assert!(canvas.pixels().iter().all(|p| p.a == 255));
        assert_eq!(canvas.pixel(1, 599), Some(Pixel::opaque(MENU_BACKDROP)));
    }
}
