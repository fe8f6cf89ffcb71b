//! Static pickups that fire a bound effect once on ball contact

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::rect::Rect;
use crate::consts::*;

/// An effect together with its bound arguments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PowerEffect {
    /// Reduce ball speed by `amount`, never below `BALL_MIN_SPEED`
    SlowBall { amount: f32 },
}

impl PowerEffect {
    pub fn apply(&self, ball: &mut Ball) {
        match *self {
            PowerEffect::SlowBall { amount } => {
                ball.speed = (ball.speed - amount).max(BALL_MIN_SPEED);
            }
        }
    }
}

/// A pickup entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub rect: Rect,
    /// `None` makes the pickup a harmless dud
    pub effect: Option<PowerEffect>,
}

impl PowerUp {
    pub fn new(pos: Vec2, effect: Option<PowerEffect>) -> Self {
        Self {
            rect: Rect::from_pos_size(pos, Vec2::splat(POWER_UP_SIZE)),
            effect,
        }
    }

    /// The pickup spawned during play
    pub fn slow_ball(pos: Vec2) -> Self {
        Self::new(
            pos,
            Some(PowerEffect::SlowBall {
                amount: SLOW_BALL_AMOUNT,
            }),
        )
    }

    /// Apply the effect if the ball overlaps; returns true when consumed
    pub fn check_and_apply(&self, ball: &mut Ball) -> bool {
        if !self.rect.intersects(&ball.rect()) {
            return false;
        }
        if let Some(effect) = &self.effect {
            effect.apply(ball);
        }
        true
    }
}

/// Frame-rate independent spawning of pickups into a safe area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPolicy {
    /// Expected spawns per second
    pub rate: f32,
    pub max_active: usize,
    /// Inclusive x range for the top-left corner
    pub x_range: (i32, i32),
    /// Inclusive y range for the top-left corner
    pub y_range: (i32, i32),
}

impl SpawnPolicy {
    /// Default policy for a canvas: 30px side/top inset, 200px above the bottom
    pub fn for_canvas(canvas: Vec2) -> Self {
        Self {
            rate: POWER_UP_SPAWN_RATE,
            max_active: MAX_POWER_UPS,
            x_range: (POWER_UP_SIDE_INSET, canvas.x as i32 - POWER_UP_SIDE_INSET),
            y_range: (POWER_UP_SIDE_INSET, canvas.y as i32 - POWER_UP_BOTTOM_INSET),
        }
    }

    /// Bernoulli draw with probability `rate * dt`; spawns at most one pickup
    pub fn maybe_spawn(
        &self,
        dt: f32,
        active: &mut Vec<PowerUp>,
        rng: &mut impl Rng,
    ) -> Option<Vec2> {
        let roll: f32 = rng.random();
        if roll >= self.rate * dt || active.len() >= self.max_active {
            return None;
        }

        let x = rng.random_range(self.x_range.0..=self.x_range.1);
        let y = rng.random_range(self.y_range.0..=self.y_range.1);
        let pos = Vec2::new(x as f32, y as f32);
        active.push(PowerUp::slow_ball(pos));
        log::debug!("Power-up spawned at ({}, {})", x, y);
        Some(pos)
    }
}

/// Fire and drop every pickup the ball overlaps; returns how many fired
pub fn resolve_power_ups(active: &mut Vec<PowerUp>, ball: &mut Ball) -> usize {
    let before = active.len();
    active.retain(|power_up| !power_up.check_and_apply(ball));
    let consumed = before - active.len();
    if consumed > 0 {
        log::debug!("{} power-up(s) consumed, ball speed now {}", consumed, ball.speed);
    }
    consumed
}
