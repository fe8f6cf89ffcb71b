//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt` handed to each update
//! - Seeded RNG only, passed in explicitly
//! - No rendering dependencies; input arrives as plain event values

pub mod ball;
pub mod menu;
pub mod palette;
pub mod power_up;
pub mod rect;
pub mod scope;
pub mod score;
pub mod session;

pub use ball::{Ball, BallEvents, FloorRule, TrailStamp, biased_random};
pub use menu::MenuBalls;
pub use palette::{Palette, Rgb, advance_palette, lighten};
pub use power_up::{PowerEffect, PowerUp, SpawnPolicy, resolve_power_ups};
pub use rect::Rect;
pub use scope::{Controls, Effects, KeyHint, Persist, Scope, Transition, Trigger, transition};
pub use score::{HitOutcome, Scoreboard};
pub use session::{Paddle, Session, TickReport};
