//! The Pong Master app
//!
//! Owns the scope machine, the play session, the decorative menu and all
//! of the frame buffers the scopes composite from. Input is handled
//! synchronously in `events`; `run` advances and draws the active scope.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::highscores::HighScoreStore;
use crate::platform::{HostRequest, InputEvent, trigger_for};
use crate::renderer::Canvas;
use crate::renderer::scenes::{draw_menu_scene, draw_play, render_menu_panel, render_pause_overlay};
use crate::settings::Settings;
use crate::sim::{Controls, KeyHint, MenuBalls, Persist, Rgb, Scope, Session, Trigger, transition};

/// Eases overlay opacity toward a target at `FADE_RATE` per second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animator {
    alpha: f32,
    /// Jump straight to the target (reduced motion)
    instant: bool,
}

impl Animator {
    pub fn new(alpha: f32, instant: bool) -> Self {
        Self { alpha, instant }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Restart the fade from fully transparent
    pub fn reset(&mut self) {
        self.alpha = 0.0;
    }

    /// Step the fade and return the opacity to composite with
    pub fn animate(&mut self, dt: f32, target: f32) -> u8 {
        self.alpha = if self.instant {
            target
        } else {
            (self.alpha + FADE_RATE * dt).min(target)
        };
        self.alpha.clamp(0.0, 255.0) as u8
    }
}

/// The minigame app
pub struct PongMaster {
    settings: Settings,
    store: HighScoreStore,
    rng: Pcg32,
    canvas: Vec2,
    controls: Controls,

    scope: Scope,
    /// Record carried between sessions
    high_score: u32,
    session: Option<Session>,
    /// Latest pointer position in canvas space
    pointer: Vec2,

    /// Frame handed to the host
    screen: Canvas,
    /// Frame captured when leaving Play, faded over by overlays
    last_frame: Canvas,
    menu_panel: Canvas,
    menu_screen: Canvas,
    pause_overlay: Canvas,
    menu_balls: MenuBalls,
    animator: Animator,

    requests: Vec<HostRequest>,
}

impl PongMaster {
    pub fn new(settings: Settings) -> Self {
        let mut rng = match settings.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };

        let store = HighScoreStore::new(settings.high_score_path.clone());
        let high_score = store.load();

        let canvas = crate::canvas_size();
        let controls = Controls::for_canvas(canvas);
        let (w, h) = (CANVAS_WIDTH, CANVAS_HEIGHT);
        let screen = Canvas::filled(w, h, Rgb::BLACK);

        log::info!("Pong Master ready, high score {}", high_score);

        Self {
            menu_balls: MenuBalls::new(canvas, &mut rng),
            menu_panel: render_menu_panel(canvas, &controls, high_score),
            pause_overlay: render_pause_overlay(canvas, &controls),
            menu_screen: Canvas::new(w, h),
            last_frame: screen.clone(),
            screen,
            animator: Animator::new(MENU_ALPHA, settings.reduced_motion),
            settings,
            store,
            rng,
            canvas,
            controls,
            scope: Scope::Menu,
            high_score,
            session: None,
            pointer: canvas / 2.0,
            requests: vec![HostRequest::SetCursorVisible(true)],
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Best score known so far, including the running session
    pub fn high_score(&self) -> u32 {
        self.session
            .as_ref()
            .map_or(self.high_score, |s| s.scoreboard.high_score)
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn frame(&self) -> &Canvas {
        &self.screen
    }

    pub fn last_frame(&self) -> &Canvas {
        &self.last_frame
    }

    pub fn menu_panel(&self) -> &Canvas {
        &self.menu_panel
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn key_hints(&self) -> &'static [KeyHint] {
        self.scope.key_hints()
    }

    /// Requests for the host since the last drain
    pub fn drain_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Handle one input event
    pub fn events(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { pos } => {
                self.pointer = pos;
                return;
            }
            InputEvent::PointerDown { pos } => self.pointer = pos,
            _ => {}
        }

        if let Some(trigger) = trigger_for(self.scope, event, &self.controls) {
            self.fire(trigger);
        }
    }

    /// Run a trigger through the transition table and apply its effects.
    ///
    /// Returns false if the trigger is not legal in the current scope.
    pub fn fire(&mut self, trigger: Trigger) -> bool {
        let Some(t) = transition(self.scope, trigger) else {
            log::debug!("Ignoring {:?} in {:?}", trigger, self.scope);
            return false;
        };
        let effects = t.effects;

        if effects.capture_frame {
            self.last_frame = self.screen.clone();
        }
        if effects.reset_alpha {
            self.animator.reset();
        }
        if effects.start_session {
            self.session = Some(Session::start(self.canvas, self.high_score));
            log::info!("Session started, high score {}", self.high_score);
        }

        let mut set_record = false;
        if effects.end_session {
            if let Some(session) = self.session.take() {
                self.high_score = session.scoreboard.high_score;
                set_record = session.scoreboard.set_record;
                log::info!("Session ended with score {}", session.score());
            }
        }

        match effects.persist {
            Persist::Never => {}
            Persist::IfRecord if !set_record => {}
            Persist::IfRecord | Persist::Always => self.persist_high_score(),
        }

        if effects.rerender_menu {
            self.menu_panel = render_menu_panel(self.canvas, &self.controls, self.high_score);
        }
        if let Some(visible) = effects.cursor_visible {
            self.requests.push(HostRequest::SetCursorVisible(visible));
        }
        if let Some(app) = effects.switch_app {
            log::info!("Leaving Pong Master for {}", app);
            self.requests.push(HostRequest::SwitchApp(app.to_string()));
        }

        if t.from != t.to {
            log::info!("{:?} -> {:?} on {:?}", t.from, t.to, t.trigger);
        }
        self.scope = t.to;
        true
    }

    /// Best-effort write; failures are logged and play continues
    fn persist_high_score(&self) {
        if let Err(e) = self.store.save(self.high_score()) {
            log::warn!(
                "Failed to save high score to {}: {}",
                self.store.path().display(),
                e
            );
        }
    }

    /// Advance the active scope by `dt` and draw its frame
    pub fn run(&mut self, dt: f32) {
        match self.scope {
            Scope::Play => self.run_play(dt),
            Scope::Pause => self.run_pause(dt),
            Scope::Menu => self.run_menu(dt),
        }
    }

    fn run_play(&mut self, dt: f32) {
        let confined = self
            .pointer
            .clamp(Vec2::ZERO, self.canvas - Vec2::ONE);
        if confined != self.pointer {
            self.pointer = confined;
            self.requests.push(HostRequest::ConfinePointer(confined));
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };
        let report = session.tick_play(dt, self.pointer.x, self.settings.power_ups, &mut self.rng);
        if report.died {
            // The previous frame stays on screen as the fade backdrop
            self.fire(Trigger::Death);
            return;
        }

        draw_play(&mut self.screen, session, self.settings.trails);
    }

    fn run_pause(&mut self, dt: f32) {
        self.screen.fill(Rgb::BLACK);
        self.screen.blit(&self.last_frame, 255);
        let alpha = self.animator.animate(dt, PAUSE_ALPHA);
        self.screen.blit(&self.pause_overlay, alpha);
    }

    fn run_menu(&mut self, dt: f32) {
        self.menu_balls.advance(dt);
        draw_menu_scene(
            &mut self.menu_screen,
            &self.menu_balls,
            &self.menu_panel,
            self.settings.trails,
        );

        self.screen.fill(Rgb::BLACK);
        self.screen.blit(&self.last_frame, 255);
        let alpha = self.animator.animate(dt, MENU_ALPHA);
        self.screen.blit(&self.menu_screen, alpha);
    }
}
