//! Keyboard handling. Key presses and releases from the current frame are folded into
//! `InputState`; the gameplay systems later in the frame only read it.

use bevy::input::keyboard::KeyCode;
use bevy::prelude::*;

use crate::audio::SoundEffect;
use crate::state::{GameSet, GameState};

pub struct KeyboardPlugin;

impl Plugin for KeyboardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>().add_systems(
            Update,
            (
                quit_while_loading.run_if(in_state(GameState::Loading)),
                read_keyboard
                    .in_set(GameSet::Input)
                    .run_if(in_state(GameState::Playing)),
            ),
        );
    }
}

/// Held directions plus the pause flag.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub paused: bool,
}

/// Side effect requested by a key press, carried out by the calling system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    None,
    Quit,
    Play(SoundEffect),
}

impl InputState {
    pub fn on_key_down(&mut self, key: KeyCode) -> KeyResponse {
        match key {
            KeyCode::Escape => KeyResponse::Quit,
            KeyCode::Space => {
                self.paused = !self.paused;
                KeyResponse::None
            }
            KeyCode::KeyW | KeyCode::ArrowUp => {
                self.up = true;
                KeyResponse::Play(SoundEffect::MoveUp)
            }
            KeyCode::KeyS | KeyCode::ArrowDown => {
                self.down = true;
                KeyResponse::Play(SoundEffect::MoveDown)
            }
            KeyCode::KeyA | KeyCode::ArrowLeft => {
                self.left = true;
                KeyResponse::None
            }
            KeyCode::KeyD | KeyCode::ArrowRight => {
                self.right = true;
                KeyResponse::None
            }
            _ => KeyResponse::None,
        }
    }

    pub fn on_key_up(&mut self, key: KeyCode) {
        match key {
            KeyCode::KeyW | KeyCode::ArrowUp => self.up = false,
            KeyCode::KeyS | KeyCode::ArrowDown => self.down = false,
            KeyCode::KeyA | KeyCode::ArrowLeft => self.left = false,
            KeyCode::KeyD | KeyCode::ArrowRight => self.right = false,
            _ => {}
        }
    }

    /// Unit direction the held keys ask for. Opposite keys cancel on their axis.
    pub fn direction(&self) -> Vec2 {
        Vec2::new(axis(self.right, self.left), axis(self.up, self.down))
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Presses are applied before releases, so a tap inside one frame leaves the flag cleared.
pub(crate) fn read_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<InputState>,
    mut sounds: EventWriter<SoundEffect>,
    mut exit: EventWriter<AppExit>,
) {
    for key in keyboard.get_just_pressed() {
        match input.on_key_down(*key) {
            KeyResponse::Quit => {
                info!("Escape pressed, closing the game.");
                exit.send(AppExit::Success);
            }
            KeyResponse::Play(effect) => {
                sounds.send(effect);
            }
            KeyResponse::None => {}
        }

        if *key == KeyCode::Space {
            info!(paused = input.paused, "Pause toggled.");
        }
    }

    for key in keyboard.get_just_released() {
        input.on_key_up(*key);
    }
}

/// Only ESC is honored before play starts.
fn quit_while_loading(keyboard: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        info!("Escape pressed while loading, closing the game.");
        exit.send(AppExit::Success);
    }
}
