//! Decorative balls bouncing behind the menu panel

use glam::Vec2;
use rand::Rng;

use super::ball::{Ball, FloorRule};
use super::palette::Rgb;
use crate::consts::*;

const ENSEMBLE_COLOR: Rgb = Rgb::new(6, 6, 116);
const HERO_COLOR: Rgb = Rgb::new(180, 195, 255);

/// Fixed ensemble: a fan of balls 36° apart plus one distinguished ball
#[derive(Debug, Clone)]
pub struct MenuBalls {
    pub balls: Vec<Ball>,
    canvas: Vec2,
}

impl MenuBalls {
    pub fn new(canvas: Vec2, rng: &mut impl Rng) -> Self {
        let step = 360 / MENU_BALL_COUNT as i32;
        let mut balls: Vec<Ball> = (0..MENU_BALL_COUNT as i32)
            .map(|i| {
                let degrees = i * step + rng.random_range(-10..=10);
                let speed = rng.random_range(MENU_BALL_SPEED_MIN..=MENU_BALL_SPEED_MAX);
                Ball::new(
                    canvas,
                    (degrees as f32).to_radians(),
                    speed as f32,
                    ENSEMBLE_COLOR,
                )
            })
            .collect();

        balls.push(Ball::new(
            canvas,
            BALL_START_HEADING,
            MENU_HERO_SPEED,
            HERO_COLOR,
        ));

        Self { balls, canvas }
    }

    /// Bounce every ball off all four edges and sample trails
    pub fn advance(&mut self, dt: f32) {
        for ball in &mut self.balls {
            ball.advance(dt, self.canvas, FloorRule::Reflect);
            ball.record_trail_sample(dt);
        }
    }
}
