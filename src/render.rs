//! Bridges the screen-space model to Bevy's renderer. Gameplay works in window pixels with the
//! origin at the bottom-left; the 2D camera sits at the world origin, so every sprite is shifted by
//! half the screen. Depth follows spawn order so newer sprites draw over older ones.

use bevy::prelude::*;

use crate::config::GameConfig;
use crate::entity::{DrawOrder, Position};
use crate::state::GameSet;

pub struct ScreenSpacePlugin;

impl Plugin for ScreenSpacePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, sync_sprite_transforms.in_set(GameSet::Render));
    }
}

/// Depth gap between consecutive spawns. Stays well inside the camera's far plane for millions of
/// spawns, far more than can be alive at once.
const DEPTH_STEP: f32 = 1.0e-4;

fn setup_camera(mut commands: Commands) {
    commands.spawn((Name::new("MainCamera"), Camera2dBundle::default()));
}

pub fn screen_to_world(position: Vec2, order: DrawOrder, screen: Vec2) -> Vec3 {
    (position - screen * 0.5).extend(order.0 as f32 * DEPTH_STEP)
}

pub(crate) fn sync_sprite_transforms(
    config: Res<GameConfig>,
    mut query: Query<(&Position, &DrawOrder, &mut Transform)>,
) {
    let screen = config.screen_size();

    for (position, order, mut transform) in &mut query {
        transform.translation = screen_to_world(position.0, *order, screen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_centre_maps_to_world_origin() {
        let screen = Vec2::new(800.0, 600.0);
        let translation = screen_to_world(Vec2::new(400.0, 300.0), DrawOrder(0), screen);
        assert_eq!(translation, Vec3::ZERO);
    }

    #[test]
    fn bottom_left_maps_to_negative_quadrant() {
        let screen = Vec2::new(800.0, 600.0);
        let translation = screen_to_world(Vec2::ZERO, DrawOrder(0), screen);
        assert_eq!(translation.truncate(), Vec2::new(-400.0, -300.0));
    }

    #[test]
    fn later_spawns_draw_on_top() {
        let screen = Vec2::new(800.0, 600.0);
        let first = screen_to_world(Vec2::ZERO, DrawOrder(1), screen);
        let second = screen_to_world(Vec2::ZERO, DrawOrder(2), screen);
        assert!(second.z > first.z);
    }

    #[test]
    fn sync_moves_sprite_transforms() {
        let mut app = App::new();
        app.insert_resource(GameConfig::default())
            .add_systems(Update, sync_sprite_transforms);
        let entity = app
            .world_mut()
            .spawn((
                Position(Vec2::new(500.0, 100.0)),
                DrawOrder(3),
                Transform::default(),
            ))
            .id();

        app.update();

        let transform = app.world().get::<Transform>(entity).copied();
        assert_eq!(
            transform.map(|t| t.translation.truncate()),
            Some(Vec2::new(100.0, -200.0))
        );
    }
}
