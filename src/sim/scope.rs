//! Scope state machine (Menu / Play / Pause)
//!
//! Every legal transition and its side effects are listed in one table,
//! `transition`. The app applies the returned `Effects`; input mapping in
//! `platform` only turns raw events into `Trigger`s.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Name the shell uses for its home screen
pub const HOME_APP: &str = "home";

/// Active screen of the minigame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Menu,
    Play,
    Pause,
}

/// Things that can move the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Play button or start key on the menu
    Start,
    /// Pause key during play
    Pause,
    /// Pause key or Resume button while paused
    Resume,
    /// Cancel key or Menu button while paused
    ToMenu,
    /// Ball left through the floor
    Death,
    /// Cancel key or Quit button on the menu
    Quit,
    /// Window close requested by the host
    QuitRequest,
}

/// When to write the high score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Persist {
    #[default]
    Never,
    /// Only if this session beat the stored record
    IfRecord,
    Always,
}

/// Side effects the app performs for a transition, in field order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Effects {
    /// Copy the current screen as the cross-fade backdrop
    pub capture_frame: bool,
    /// Restart the fade from transparent
    pub reset_alpha: bool,
    /// Build a fresh play session
    pub start_session: bool,
    /// Tear the session down, keeping its high score
    pub end_session: bool,
    pub persist: Persist,
    /// Redraw the static menu panel (high score may have changed)
    pub rerender_menu: bool,
    pub cursor_visible: Option<bool>,
    pub switch_app: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Scope,
    pub to: Scope,
    pub trigger: Trigger,
    pub effects: Effects,
}

/// Transition table; `None` means the trigger is ignored in that scope
pub fn transition(from: Scope, trigger: Trigger) -> Option<Transition> {
    let (to, effects) = match (from, trigger) {
        (Scope::Menu, Trigger::Start) => (
            Scope::Play,
            Effects {
                reset_alpha: true,
                start_session: true,
                cursor_visible: Some(false),
                ..Effects::default()
            },
        ),
        (Scope::Menu, Trigger::Quit) => (
            Scope::Menu,
            Effects {
                persist: Persist::Always,
                switch_app: Some(HOME_APP),
                ..Effects::default()
            },
        ),

        (Scope::Play, Trigger::Pause) => (
            Scope::Pause,
            Effects {
                capture_frame: true,
                reset_alpha: true,
                cursor_visible: Some(true),
                ..Effects::default()
            },
        ),
        (Scope::Play, Trigger::Death) => (
            Scope::Menu,
            Effects {
                capture_frame: true,
                reset_alpha: true,
                end_session: true,
                persist: Persist::IfRecord,
                rerender_menu: true,
                cursor_visible: Some(true),
                ..Effects::default()
            },
        ),

        (Scope::Pause, Trigger::Resume) => (
            Scope::Play,
            Effects {
                reset_alpha: true,
                cursor_visible: Some(false),
                ..Effects::default()
            },
        ),
        (Scope::Pause, Trigger::ToMenu) => (
            Scope::Menu,
            Effects {
                capture_frame: true,
                reset_alpha: true,
                end_session: true,
                persist: Persist::IfRecord,
                rerender_menu: true,
                cursor_visible: Some(true),
                ..Effects::default()
            },
        ),

        (Scope::Play | Scope::Pause, Trigger::QuitRequest) => (
            from,
            Effects {
                persist: Persist::Always,
                ..Effects::default()
            },
        ),

        _ => return None,
    };

    Some(Transition {
        from,
        to,
        trigger,
        effects,
    })
}

/// Clickable controls for a canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    /// Play on the menu, Resume when paused
    pub primary: Rect,
    /// Quit on the menu, Menu when paused
    pub secondary: Rect,
}

impl Controls {
    pub fn for_canvas(canvas: Vec2) -> Self {
        let x = (canvas.x / 2.0).floor() - 100.0;
        let base = canvas.y * 0.8;
        Self {
            primary: Rect::new(x, base - 50.0, 200.0, 100.0),
            secondary: Rect::new(x, base - 180.0, 200.0, 100.0),
        }
    }
}

impl Scope {
    /// Key hints the shell shows next to the phone
    pub fn key_hints(self) -> &'static [KeyHint] {
        match self {
            Scope::Menu => MENU_HINTS,
            Scope::Play => PLAY_HINTS,
            Scope::Pause => PAUSE_HINTS,
        }
    }
}

/// A hint line; `key` is the word highlighted inside `text`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub text: &'static str,
    pub key: &'static str,
}

const MENU_HINTS: &[KeyHint] = &[
    KeyHint {
        text: "press space to start",
        key: "space",
    },
    KeyHint {
        text: "press esc to quit",
        key: "esc",
    },
];

const PLAY_HINTS: &[KeyHint] = &[
    KeyHint {
        text: "move the mouse to control the paddle",
        key: "mouse",
    },
    KeyHint {
        text: "press space to pause",
        key: "space",
    },
];

const PAUSE_HINTS: &[KeyHint] = &[
    KeyHint {
        text: "press space to resume",
        key: "space",
    },
    KeyHint {
        text: "press esc to return to menu",
        key: "esc",
    },
];
