//! The ball: straight-line motion, wall reflection, paddle response and trail

use std::collections::VecDeque;
use std::f32::consts::{FRAC_PI_4, PI};

use glam::Vec2;
use rand::Rng;
use rand_distr::{Beta, Distribution};
use serde::{Deserialize, Serialize};

use super::palette::Rgb;
use super::rect::Rect;
use crate::consts::*;
use crate::heading_to_velocity;

/// What happens when the ball crosses the bottom edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorRule {
    /// Clamp and bounce like the top edge (decorative balls)
    Reflect,
    /// Report the exit and leave the ball where it is (player missed)
    Exit,
}

/// Edges touched during one `advance` step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallEvents {
    pub side_wall: bool,
    pub top_wall: bool,
    pub floor_bounce: bool,
    pub floor_exit: bool,
}

/// One stamp of the fading trail, newest first
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailStamp {
    pub center: Vec2,
    pub alpha: u8,
    pub radius: f32,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left of the bounding square
    pub pos: Vec2,
    /// Radians from the +y axis; velocity is `speed * (sin, cos)`
    pub heading: f32,
    pub speed: f32,
    /// Side of the bounding square
    pub size: f32,
    pub color: Rgb,
    /// Past centers, oldest first
    #[serde(skip)]
    trail: VecDeque<Vec2>,
    #[serde(skip)]
    trail_clock: f32,
}

impl Ball {
    /// Ball at the canvas centre with the given heading, speed and colour
    pub fn new(canvas: Vec2, heading: f32, speed: f32, color: Rgb) -> Self {
        Self {
            pos: (canvas / 2.0).floor(),
            heading,
            speed,
            size: (canvas.y / 40.0).floor(),
            color,
            trail: VecDeque::with_capacity(TRAIL_LENGTH),
            trail_clock: 0.0,
        }
    }

    /// The ball a fresh play session starts with
    pub fn serve(canvas: Vec2) -> Self {
        Self::new(canvas, BALL_START_HEADING, BALL_START_SPEED, Rgb::BLACK)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(self.size))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Drawn radius (whole pixels)
    pub fn radius(&self) -> f32 {
        (self.size / 2.0).floor()
    }

    pub fn velocity(&self) -> Vec2 {
        heading_to_velocity(self.heading, self.speed)
    }

    /// Move by `speed * dir * dt` and resolve the canvas edges.
    ///
    /// Left/right crossings clamp and mirror the heading, the top clamps and
    /// reflects vertically. The bottom follows `floor`.
    pub fn advance(&mut self, dt: f32, bounds: Vec2, floor: FloorRule) -> BallEvents {
        self.pos += self.velocity() * dt;

        let mut events = BallEvents::default();

        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.heading = -self.heading;
            events.side_wall = true;
        } else if self.pos.x + self.size > bounds.x {
            self.pos.x = bounds.x - self.size;
            self.heading = -self.heading;
            events.side_wall = true;
        }

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.heading = PI - self.heading;
            events.top_wall = true;
        }

        if self.pos.y + self.size > bounds.y {
            match floor {
                FloorRule::Exit => events.floor_exit = true,
                FloorRule::Reflect => {
                    self.pos.y = bounds.y - self.size;
                    self.heading = PI - self.heading;
                    events.floor_bounce = true;
                }
            }
        }

        events
    }

    /// Steer off the paddle depending on where it was hit.
    ///
    /// Does not test for contact; callers must only invoke this on the first
    /// frame of an overlap.
    pub fn on_paddle_collide(&mut self, paddle: &Rect, rng: &mut impl Rng) {
        let hit_offset = 2.0 * (self.center().x - paddle.center().x) / paddle.width();
        let mut heading = PI - hit_offset * FRAC_PI_4;

        if hit_offset.abs() < CENTER_HIT_THRESHOLD {
            let spread = JITTER_DEGREES.to_radians();
            heading += biased_random(rng, -spread, spread);
        }

        self.heading = heading;
    }

    /// Accumulate `dt` and push a trail sample every `TRAIL_INTERVAL`
    pub fn record_trail_sample(&mut self, dt: f32) {
        self.trail_clock += dt;
        while self.trail_clock >= TRAIL_INTERVAL {
            if self.trail.len() == TRAIL_LENGTH {
                self.trail.pop_front();
            }
            self.trail.push_back(self.center());
            self.trail_clock -= TRAIL_INTERVAL;
        }
    }

    /// Trail samples, oldest first
    pub fn trail(&self) -> impl ExactSizeIterator<Item = &Vec2> {
        self.trail.iter()
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
        self.trail_clock = 0.0;
    }

    /// Stamps to draw for the trail, most recent first.
    ///
    /// Sample `i` of `n` fades with `t = (i + 1) / n`: alpha `255 * (1 - t)`
    /// and radius shrinking from the ball radius toward one pixel.
    pub fn trail_stamps(&self) -> Vec<TrailStamp> {
        let n = self.trail.len();
        let ball_radius = self.radius();

        self.trail
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &center)| {
                let t = (i + 1) as f32 / n as f32;
                TrailStamp {
                    center,
                    alpha: (255.0 * (1.0 - t)) as u8,
                    radius: (ball_radius * (1.0 - t) + t).floor(),
                }
            })
            .filter(|stamp| stamp.alpha > 0 && stamp.radius > 0.0)
            .collect()
    }
}

/// U-shaped random value in `[start, end]`, drawn from Beta(0.3, 0.3)
pub fn biased_random(rng: &mut impl Rng, start: f32, end: f32) -> f32 {
    let r = match Beta::new(JITTER_SHAPE, JITTER_SHAPE) {
        Ok(beta) => beta.sample(rng),
        Err(_) => 0.5,
    };
    start + (end - start) * r
}
