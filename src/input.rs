//! Raw input mapping
//!
//! Device listeners live outside the engine; they pass key names and touch
//! positions here and forward the resulting actions to the session.

use crate::sim::Intent;

/// What a raw input asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Move(Intent),
    /// Begin the session (Enter on the title screen); handled by `Session::apply`
    Start,
}

/// Map a key name (DOM `KeyboardEvent.key` style) to an action.
/// Auto-repeat events and unknown keys map to nothing.
pub fn from_key(key: &str, repeat: bool) -> Option<InputAction> {
    if repeat {
        return None;
    }
    let action = match key {
        "ArrowUp" | "Up" | " " | "Spacebar" => InputAction::Move(Intent::Up),
        "ArrowLeft" | "Left" | "a" | "A" => InputAction::Move(Intent::Left),
        "ArrowRight" | "Right" | "d" | "D" => InputAction::Move(Intent::Right),
        "Enter" => InputAction::Start,
        _ => return None,
    };
    Some(action)
}

/// A touch released on the left half moves left, anywhere else moves right
pub fn from_touch(x: f32, viewport_width: f32) -> Intent {
    if x < viewport_width / 2.0 {
        Intent::Left
    } else {
        Intent::Right
    }
}
