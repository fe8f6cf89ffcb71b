//! Phone shell: app registry and active-app switching
//!
//! The shell owns exactly one active app. Switching constructs a fresh
//! instance from the registry, so no app state survives a round trip
//! through the home screen.

use glam::Vec2;

use crate::app::PongMaster;
use crate::consts::*;
use crate::platform::{HostRequest, InputEvent, canvas_to_display, display_to_canvas};
use crate::renderer::Canvas;
use crate::renderer::font::draw_text_centered;
use crate::settings::Settings;
use crate::sim::scope::HOME_APP;
use crate::sim::{KeyHint, Rect, Rgb};

/// Registry name of the minigame
pub const PONG_MASTER_APP: &str = "pong master";

/// Interface every app on the phone implements
pub trait App {
    /// Handle one input event in canvas-local coordinates
    fn handle_input(&mut self, event: &InputEvent);
    /// Advance by `dt` seconds and draw into the app's frame
    fn update_and_render(&mut self, dt: f32);
    fn frame(&self) -> &Canvas;
    /// Hint lines the shell shows beside the phone
    fn key_hints(&self) -> &'static [KeyHint];
    fn drain_requests(&mut self) -> Vec<HostRequest>;
}

/// What a constructor gets to build an app with
pub struct AppContext<'a> {
    pub settings: &'a Settings,
    /// Registered names in registration order
    pub app_names: &'a [String],
}

pub type AppConstructor = fn(&AppContext) -> Box<dyn App>;

impl App for PongMaster {
    fn handle_input(&mut self, event: &InputEvent) {
        self.events(event);
    }

    fn update_and_render(&mut self, dt: f32) {
        self.run(dt);
    }

    fn frame(&self) -> &Canvas {
        PongMaster::frame(self)
    }

    fn key_hints(&self) -> &'static [KeyHint] {
        PongMaster::key_hints(self)
    }

    fn drain_requests(&mut self) -> Vec<HostRequest> {
        PongMaster::drain_requests(self)
    }
}

fn pong_master(ctx: &AppContext) -> Box<dyn App> {
    Box::new(PongMaster::new(ctx.settings.clone()))
}

const HOME_HINTS: &[KeyHint] = &[KeyHint {
    text: "Click on any app icon to open it",
    key: "Click",
}];

const ICON_SIZE: f32 = 84.0;
const ICON_PITCH: Vec2 = Vec2::new(96.0, 116.0);
const ICON_MARGIN: f32 = 12.0;
const ICON_COLUMNS: usize = 3;
const ICON_FILL: Rgb = Rgb::new(200, 200, 200);

/// Home screen: a grid of tiles, one per registered app
pub struct Home {
    icons: Vec<(String, Rect)>,
    screen: Canvas,
    requests: Vec<HostRequest>,
}

impl Home {
    pub fn new(app_names: &[String]) -> Self {
        let icons = app_names
            .iter()
            .filter(|name| name.as_str() != HOME_APP)
            .enumerate()
            .map(|(i, name)| {
                let col = (i % ICON_COLUMNS) as f32;
                let row = (i / ICON_COLUMNS) as f32;
                let rect = Rect::new(
                    ICON_MARGIN + ICON_PITCH.x * col,
                    ICON_MARGIN + ICON_PITCH.y * row,
                    ICON_SIZE,
                    ICON_SIZE,
                );
                (name.clone(), rect)
            })
            .collect();

        Self {
            icons,
            screen: Canvas::filled(CANVAS_WIDTH, CANVAS_HEIGHT, Rgb::WHITE),
            requests: vec![HostRequest::SetCursorVisible(true)],
        }
    }

    pub fn icons(&self) -> &[(String, Rect)] {
        &self.icons
    }
}

impl App for Home {
    fn handle_input(&mut self, event: &InputEvent) {
        if let InputEvent::PointerDown { pos } = *event {
            if let Some((name, _)) = self.icons.iter().find(|(_, rect)| rect.contains_point(pos)) {
                self.requests.push(HostRequest::SwitchApp(name.clone()));
            }
        }
    }

    fn update_and_render(&mut self, _dt: f32) {
        self.screen.fill(Rgb::WHITE);
        for (name, rect) in &self.icons {
            self.screen.fill_rounded_rect(rect, 20.0, ICON_FILL, 255);
            draw_text_centered(
                &mut self.screen,
                name,
                rect.center().x,
                rect.bottom() + 4.0,
                1,
                Rgb::BLACK,
            );
        }
    }

    fn frame(&self) -> &Canvas {
        &self.screen
    }

    fn key_hints(&self) -> &'static [KeyHint] {
        HOME_HINTS
    }

    fn drain_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }
}

fn home(ctx: &AppContext) -> Box<dyn App> {
    Box::new(Home::new(ctx.app_names))
}

/// The phone: owns the active app and everything the host needs to know
pub struct Shell {
    settings: Settings,
    names: Vec<String>,
    constructors: Vec<AppConstructor>,
    active: Box<dyn App>,
    active_name: String,
    display: Vec2,
    /// Pointer in display coordinates
    pointer: Vec2,
    cursor_visible: bool,
    running: bool,
}

impl Shell {
    /// Shell with the home screen and Pong Master registered, showing home
    pub fn new(settings: Settings, display: Vec2) -> Self {
        let names = vec![HOME_APP.to_string(), PONG_MASTER_APP.to_string()];
        let constructors: Vec<AppConstructor> = vec![home, pong_master];
        let active = home(&AppContext {
            settings: &settings,
            app_names: &names,
        });

        log::info!("Shell started on {}", HOME_APP);

        Self {
            settings,
            names,
            constructors,
            active,
            active_name: HOME_APP.to_string(),
            display,
            pointer: display / 2.0,
            cursor_visible: true,
            running: true,
        }
    }

    /// Add or replace an app under `name`
    pub fn register(&mut self, name: &str, constructor: AppConstructor) {
        match self.names.iter().position(|n| n == name) {
            Some(i) => self.constructors[i] = constructor,
            None => {
                self.names.push(name.to_string());
                self.constructors.push(constructor);
            }
        }
    }

    pub fn app_names(&self) -> &[String] {
        &self.names
    }

    pub fn active_name(&self) -> &str {
        &self.active_name
    }

    pub fn frame(&self) -> &Canvas {
        self.active.frame()
    }

    pub fn key_hints(&self) -> &'static [KeyHint] {
        self.active.key_hints()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Top-left of the app canvas on the display
    pub fn canvas_origin(&self) -> Vec2 {
        canvas_to_display(Vec2::ZERO, self.display, self.frame().size())
    }

    /// Replace the active app with a fresh instance of `name`.
    ///
    /// Unknown names are logged and ignored.
    pub fn switch_to(&mut self, name: &str) -> bool {
        let Some(i) = self.names.iter().position(|n| n == name) else {
            log::warn!("No app registered as {:?}", name);
            return false;
        };

        let ctx = AppContext {
            settings: &self.settings,
            app_names: &self.names,
        };
        self.active = (self.constructors[i])(&ctx);
        self.active_name = name.to_string();
        log::info!("Switched to {}", name);
        true
    }

    /// Run one frame: dispatch raw display events, then update and draw
    pub fn step(&mut self, events: &[InputEvent], dt: f32) {
        for event in events {
            let event = self.to_canvas(*event);
            if event == InputEvent::QuitRequest {
                log::info!("Quit requested");
                self.running = false;
            }
            self.active.handle_input(&event);
            self.apply_requests();
        }

        self.active.update_and_render(dt);
        self.apply_requests();
    }

    fn to_canvas(&mut self, event: InputEvent) -> InputEvent {
        let canvas = self.frame().size();
        match event {
            InputEvent::PointerMove { pos } => {
                self.pointer = pos;
                InputEvent::PointerMove {
                    pos: display_to_canvas(pos, self.display, canvas),
                }
            }
            InputEvent::PointerDown { pos } => {
                self.pointer = pos;
                InputEvent::PointerDown {
                    pos: display_to_canvas(pos, self.display, canvas),
                }
            }
            other => other,
        }
    }

    fn apply_requests(&mut self) {
        for request in self.active.drain_requests() {
            match request {
                HostRequest::SetCursorVisible(visible) => self.cursor_visible = visible,
                HostRequest::ConfinePointer(local) => {
                    self.pointer = canvas_to_display(local, self.display, self.frame().size());
                }
                HostRequest::SwitchApp(name) => {
                    self.switch_to(&name);
                }
            }
        }
    }
}
