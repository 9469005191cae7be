use bevy::prelude::*;

use crate::config::GameConfig;
use crate::entity::{Hitbox, Kind, Position};
use crate::input::InputState;
use crate::player::Player;
use crate::state::{gameplay_running, GameSet};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (steer_player, advance_positions)
                .chain()
                .in_set(GameSet::Movement)
                .distributive_run_if(gameplay_running),
        )
        .add_systems(
            Update,
            despawn_offscreen
                .in_set(GameSet::Bounds)
                .run_if(gameplay_running),
        );
    }
}

/// Displacement in pixels per second. Fixed at spawn for enemies and clouds; recomputed from the
/// held keys every frame for the player.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct Velocity(pub Vec2);

pub(crate) fn steer_player(
    input: Res<InputState>,
    config: Res<GameConfig>,
    mut query: Query<&mut Velocity, With<Player>>,
) {
    for mut velocity in &mut query {
        velocity.0 = input.direction() * config.player_speed;
    }
}

/// Integrates every sprite and truncates toward zero so sprites sit on whole pixels.
pub(crate) fn advance_positions(time: Res<Time>, mut query: Query<(&mut Position, &Velocity)>) {
    let dt = time.delta_seconds();

    for (mut position, velocity) in &mut query {
        position.0 = step(position.0, velocity.0, dt);
    }
}

pub fn step(position: Vec2, velocity: Vec2, dt: f32) -> Vec2 {
    (position + velocity * dt).trunc()
}

/// Removes every non-player sprite whose right edge has passed the left side of the screen.
pub(crate) fn despawn_offscreen(
    mut commands: Commands,
    query: Query<(Entity, &Kind, &Position, &Hitbox)>,
) {
    for (entity, kind, position, hitbox) in &query {
        if *kind == Kind::Player {
            continue;
        }

        if hitbox.rect(position.0).max.x < 0.0 {
            debug!(?kind, "Sprite left the screen.");
            commands.entity(entity).despawn();
        }
    }
}
