//! Global game state definitions. Switching states only updates an enum value and triggers the
//! on-enter/on-exit schedules; no heap allocations occur when the state changes.

use bevy::prelude::*;

use crate::input::InputState;

/// High-level state machine for the game loop. Pause is tracked by `InputState`, not here, so the
/// only transition is the one-way `Loading` → `Playing` once every asset has decoded.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
}

/// Named system sets that order one frame tick. `app.rs` chains them in declaration order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Spawn,
    Collision,
    Movement,
    Bounds,
    Render,
}

/// Run condition for every world-mutating system: nothing moves, spawns or collides while paused
/// or after a quit has been requested this frame.
pub fn gameplay_running(input: Res<InputState>, exits: Res<Events<AppExit>>) -> bool {
    !input.paused && exits.is_empty()
}
