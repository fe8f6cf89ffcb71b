//! Platform abstraction layer
//!
//! Handles the boundary with the host shell:
//! - Input events, already in canvas-local coordinates
//! - Requests back to the host (cursor, pointer confinement, app switch)
//! - The display → canvas pointer transform the host applies
//! - Mapping events onto scope triggers

use glam::Vec2;

use crate::sim::{Controls, Scope, Trigger};

/// Logical keys the minigame reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Start / pause / resume (space)
    Start,
    /// Back out (escape)
    Cancel,
    Other,
}

/// One drained input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMove { pos: Vec2 },
    PointerDown { pos: Vec2 },
    KeyDown(Key),
    QuitRequest,
}

/// Something the app needs the host to do after this call
#[derive(Debug, Clone, PartialEq)]
pub enum HostRequest {
    SetCursorVisible(bool),
    /// Keep the hardware pointer at this canvas-local position
    ConfinePointer(Vec2),
    /// Replace the active app with the one registered under this name
    SwitchApp(String),
}

/// Convert a raw display pointer into canvas-local coordinates.
///
/// The canvas is drawn centered on the display, so
/// `local = raw - display_center + canvas_center` (integer halves).
pub fn display_to_canvas(raw: Vec2, display: Vec2, canvas: Vec2) -> Vec2 {
    raw - (display / 2.0).floor() + (canvas / 2.0).floor()
}

/// Inverse of `display_to_canvas`
pub fn canvas_to_display(local: Vec2, display: Vec2, canvas: Vec2) -> Vec2 {
    local + (display / 2.0).floor() - (canvas / 2.0).floor()
}

/// Map an input event to a trigger for `scope`
pub fn trigger_for(scope: Scope, event: &InputEvent, controls: &Controls) -> Option<Trigger> {
    match (scope, event) {
        (_, InputEvent::QuitRequest) => Some(Trigger::QuitRequest),

        (Scope::Menu, InputEvent::KeyDown(Key::Start)) => Some(Trigger::Start),
        (Scope::Menu, InputEvent::KeyDown(Key::Cancel)) => Some(Trigger::Quit),
        (Scope::Menu, InputEvent::PointerDown { pos }) => {
            if controls.primary.contains_point(*pos) {
                Some(Trigger::Start)
            } else if controls.secondary.contains_point(*pos) {
                Some(Trigger::Quit)
            } else {
                None
            }
        }

        (Scope::Play, InputEvent::KeyDown(Key::Start)) => Some(Trigger::Pause),

        (Scope::Pause, InputEvent::KeyDown(Key::Start)) => Some(Trigger::Resume),
        (Scope::Pause, InputEvent::KeyDown(Key::Cancel)) => Some(Trigger::ToMenu),
        (Scope::Pause, InputEvent::PointerDown { pos }) => {
            if controls.primary.contains_point(*pos) {
                Some(Trigger::Resume)
            } else if controls.secondary.contains_point(*pos) {
                Some(Trigger::ToMenu)
            } else {
                None
            }
        }

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_mapping() {
        let c = Controls::for_canvas(crate::canvas_size());
        let start = InputEvent::KeyDown(Key::Start);
        let cancel = InputEvent::KeyDown(Key::Cancel);
        assert_eq!(trigger_for(Scope::Menu, &start, &c), Some(Trigger::Start));
        assert_eq!(trigger_for(Scope::Play, &start, &c), Some(Trigger::Pause));
        assert_eq!(trigger_for(Scope::Pause, &start, &c), Some(Trigger::Resume));
        assert_eq!(trigger_for(Scope::Menu, &cancel, &c), Some(Trigger::Quit));
        assert_eq!(trigger_for(Scope::Pause, &cancel, &c), Some(Trigger::ToMenu));
        assert_eq!(trigger_for(Scope::Play, &cancel, &c), None);
        assert_eq!(
            trigger_for(Scope::Menu, &InputEvent::KeyDown(Key::Other), &c),
            None
        );

        let click = |pos: Vec2| InputEvent::PointerDown { pos };
        assert_eq!(
            trigger_for(Scope::Menu, &click(c.primary.center()), &c),
            Some(Trigger::Start)
        );
        assert_eq!(
            trigger_for(Scope::Pause, &click(c.secondary.center()), &c),
            Some(Trigger::ToMenu)
        );
        assert_eq!(trigger_for(Scope::Play, &click(c.primary.center()), &c), None);
        assert_eq!(trigger_for(Scope::Menu, &click(Vec2::new(5.0, 5.0)), &c), None);
    }

    #[test]
    fn test_quit_request_maps_in_every_scope() {
        let c = Controls::for_canvas(crate::canvas_size());
        for scope in [Scope::Menu, Scope::Play, Scope::Pause] {
            assert_eq!(
                trigger_for(scope, &InputEvent::QuitRequest, &c),
                Some(Trigger::QuitRequest)
            );
        }
    }

    #[test]
    fn test_display_center_maps_to_canvas_center() {
        let display = Vec2::new(1920.0, 1080.0);
        let canvas = Vec2::new(300.0, 600.0);
        let local = display_to_canvas(Vec2::new(960.0, 540.0), display, canvas);
        assert_eq!(local, Vec2::new(150.0, 300.0));
    }

    #[test]
    fn test_transform_round_trip() {
        let display = Vec2::new(1366.0, 768.0);
        let canvas = Vec2::new(300.0, 600.0);
        let raw = Vec2::new(700.0, 123.0);
        let back = canvas_to_display(display_to_canvas(raw, display, canvas), display, canvas);
        assert_eq!(back, raw);
    }
}
