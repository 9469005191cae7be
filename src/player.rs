//! Player entity lifecycle. The jet is spawned once when gameplay starts and lives for the rest of
//! the run; a collision ends the process rather than despawning it.

use bevy::prelude::*;

use crate::assets::{GameAssets, SpriteSizes};
use crate::config::GameConfig;
use crate::entity::{DrawSequence, FlyingBundle, Hitbox, Kind, Position};
use crate::movement::despawn_offscreen;
use crate::state::{gameplay_running, GameSet, GameState};

/// Registers player spawning and the per-frame screen clamp.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), spawn_player)
            .add_systems(
                Update,
                clamp_player_to_screen
                    .in_set(GameSet::Bounds)
                    .after(despawn_offscreen)
                    .run_if(gameplay_running),
            );
    }
}

/// Marker component used by steering, clamping and collision queries to find the player.
#[derive(Component)]
pub struct Player;

pub(crate) fn spawn_player(
    mut commands: Commands,
    assets: Res<GameAssets>,
    sizes: Res<SpriteSizes>,
    config: Res<GameConfig>,
    mut sequence: ResMut<DrawSequence>,
) {
    let size = sizes.player;
    let screen = config.screen_size();
    // Left edge at `player_left`, vertically centred.
    let spawn = Vec2::new(config.player_left + size.x * 0.5, screen.y * 0.5);

    commands.spawn((
        Name::new("Player"),
        Player,
        FlyingBundle::new(
            Kind::Player,
            assets.player_image.clone(),
            spawn,
            Vec2::ZERO,
            size,
            sequence.next(),
        ),
    ));
}

pub(crate) fn clamp_player_to_screen(
    config: Res<GameConfig>,
    mut query: Query<(&mut Position, &Hitbox), With<Player>>,
) {
    let screen = config.screen_size();

    for (mut position, hitbox) in &mut query {
        position.0 = clamp_to_screen(position.0, hitbox.size, screen);
    }
}

/// Keeps a rectangle of `size` centred on `center` inside `[0, screen.x] x [0, screen.y]`. When
/// the sprite is larger than the screen its left and bottom edges win.
pub fn clamp_to_screen(center: Vec2, size: Vec2, screen: Vec2) -> Vec2 {
    let half = size * 0.5;
    center.min(screen - half).max(half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use crate::testing::{player_position, step_app, test_app, PLAYER_SIZE};

    #[test]
    fn clamp_leaves_inside_positions_alone() {
        let screen = Vec2::new(800.0, 600.0);
        let center = Vec2::new(400.0, 300.0);
        assert_eq!(clamp_to_screen(center, Vec2::splat(32.0), screen), center);
    }

    #[test]
    fn clamp_pulls_each_edge_back() {
        let screen = Vec2::new(800.0, 600.0);
        let size = Vec2::new(40.0, 20.0);
        assert_eq!(
            clamp_to_screen(Vec2::new(-50.0, -50.0), size, screen),
            Vec2::new(20.0, 10.0)
        );
        assert_eq!(
            clamp_to_screen(Vec2::new(900.0, 900.0), size, screen),
            Vec2::new(780.0, 590.0)
        );
    }

    #[test]
    fn oversized_sprite_sticks_to_bottom_left() {
        let screen = Vec2::new(100.0, 100.0);
        let clamped = clamp_to_screen(Vec2::new(50.0, 50.0), Vec2::splat(200.0), screen);
        assert_eq!(clamped, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn player_starts_at_left_edge_vertically_centred() {
        let mut app = test_app();
        let position = player_position(&mut app);
        assert_eq!(position, Vec2::new(10.0 + PLAYER_SIZE.x * 0.5, 300.0));
    }

    #[test]
    fn player_never_leaves_the_screen() {
        let mut app = test_app();
        let screen = Vec2::new(800.0, 600.0);
        let half = PLAYER_SIZE * 0.5;

        let holds = [
            (true, false, false, true),
            (false, true, true, false),
            (true, false, true, false),
            (false, true, false, true),
        ];
        for (up, down, left, right) in holds {
            {
                let mut input = app.world_mut().resource_mut::<InputState>();
                input.up = up;
                input.down = down;
                input.left = left;
                input.right = right;
            }
            for _ in 0..5 {
                step_app(&mut app, 1.0);
                let position = player_position(&mut app);
                assert!(position.x - half.x >= 0.0 && position.x + half.x <= screen.x);
                assert!(position.y - half.y >= 0.0 && position.y + half.y <= screen.y);
            }
        }
    }
}
