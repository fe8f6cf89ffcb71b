//! Play session state and the per-tick Play update
//!
//! A session exists from `start` until death or an explicit return to the
//! menu. The update is pure simulation; drawing happens in `renderer`.

use glam::Vec2;
use rand::Rng;

use super::ball::{Ball, FloorRule};
use super::palette::Palette;
use super::power_up::{PowerUp, SpawnPolicy, resolve_power_ups};
use super::rect::Rect;
use super::score::{HitOutcome, Scoreboard};
use crate::consts::*;

/// The player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub rect: Rect,
}

impl Paddle {
    pub fn new(canvas: Vec2) -> Self {
        let w = canvas.x as i32;
        Self {
            rect: Rect::new(
                (w / 2 - w / 3) as f32,
                canvas.y - PADDLE_BOTTOM_OFFSET,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
        }
    }

    /// Center the paddle under the pointer, kept inside the canvas
    pub fn follow(&mut self, pointer_x: f32, canvas_width: f32) {
        let pointer_x = pointer_x.clamp(0.0, canvas_width - 1.0);
        self.rect.pos.x = pointer_x - (PADDLE_WIDTH / 2.0).floor();
        self.rect.clamp_x(canvas_width);
    }
}

/// What happened during one Play tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The ball left through the floor; nothing after the move was updated
    pub died: bool,
    pub hit: Option<HitOutcome>,
    pub spawned: bool,
    pub consumed: usize,
}

/// State of one play-through
#[derive(Debug, Clone)]
pub struct Session {
    pub ball: Ball,
    pub paddle: Paddle,
    pub palette: Palette,
    pub scoreboard: Scoreboard,
    pub power_ups: Vec<PowerUp>,
    spawn_policy: SpawnPolicy,
    /// Latched while the ball overlaps the paddle
    colliding: bool,
    canvas: Vec2,
}

impl Session {
    /// Fresh session; `high_score` is the persisted record
    pub fn start(canvas: Vec2, high_score: u32) -> Self {
        Self {
            ball: Ball::serve(canvas),
            paddle: Paddle::new(canvas),
            palette: Palette::start(),
            scoreboard: Scoreboard::new(high_score),
            power_ups: Vec::new(),
            spawn_policy: SpawnPolicy::for_canvas(canvas),
            colliding: false,
            canvas,
        }
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score
    }

    pub fn is_colliding(&self) -> bool {
        self.colliding
    }

    /// Advance the play simulation by `dt`.
    ///
    /// Order: paddle follows the pointer, ball moves, paddle contact is
    /// resolved (edge-triggered), power-ups spawn and fire, trail samples.
    pub fn tick_play(
        &mut self,
        dt: f32,
        pointer_x: f32,
        spawn_power_ups: bool,
        rng: &mut impl Rng,
    ) -> TickReport {
        let mut report = TickReport::default();

        self.paddle.follow(pointer_x, self.canvas.x);

        let events = self.ball.advance(dt, self.canvas, FloorRule::Exit);
        if events.floor_exit {
            report.died = true;
            return report;
        }

        report.hit = self.resolve_paddle_contact(rng);

        if spawn_power_ups {
            report.spawned = self
                .spawn_policy
                .maybe_spawn(dt, &mut self.power_ups, rng)
                .is_some();
        }
        report.consumed = resolve_power_ups(&mut self.power_ups, &mut self.ball);

        self.ball.record_trail_sample(dt);

        report
    }

    fn resolve_paddle_contact(&mut self, rng: &mut impl Rng) -> Option<HitOutcome> {
        if !self.ball.rect().intersects(&self.paddle.rect) {
            self.colliding = false;
            return None;
        }
        if self.colliding {
            return None;
        }
        self.colliding = true;

        self.ball.on_paddle_collide(&self.paddle.rect, rng);
        let hit = self.scoreboard.register_hit();

        if hit.cadence {
            self.palette.advance();
            self.ball.speed += BALL_SPEED_STEP;
            log::debug!(
                "Score {}: palette rotated, ball speed {}",
                self.scoreboard.score,
                self.ball.speed
            );
        }
        if hit.new_record {
            log::info!("New record set at score {}", self.scoreboard.score);
        }

        Some(hit)
    }
}
