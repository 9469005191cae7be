//! Headless app harness shared by the system tests. Builds the gameplay part of the frame without
//! windowing, rendering or audio output, and drives it with a hand-advanced clock.

use std::time::Duration;

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

use crate::assets::{GameAssets, SpriteSizes};
use crate::audio::SoundEffect;
use crate::collision::end_run_on_enemy_contact;
use crate::config::GameConfig;
use crate::entity::{DrawSequence, FlyingBundle, Kind, Position};
use crate::input::InputState;
use crate::movement::{advance_positions, despawn_offscreen, steer_player};
use crate::player::{clamp_player_to_screen, spawn_player, Player};
use crate::spawn::{spawn_flying_sprites, SpawnRng, SpawnScheduler};
use crate::state::{gameplay_running, GameSet};

pub const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 32.0);

/// App with the player spawned and the collision → movement → bounds steps registered. Spawning is
/// left out so tests control which sprites exist; see `with_spawning`.
pub fn test_app() -> App {
    let mut app = App::new();
    app.insert_resource(GameConfig::default())
        .init_resource::<Time>()
        .init_resource::<InputState>()
        .init_resource::<GameAssets>()
        .init_resource::<DrawSequence>()
        .insert_resource(SpriteSizes {
            player: PLAYER_SIZE,
            enemy: Vec2::new(40.0, 16.0),
            cloud: Vec2::new(60.0, 30.0),
        })
        .add_event::<SoundEffect>()
        .configure_sets(
            Update,
            (
                GameSet::Spawn,
                GameSet::Collision,
                GameSet::Movement,
                GameSet::Bounds,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                end_run_on_enemy_contact.in_set(GameSet::Collision),
                (steer_player, advance_positions)
                    .chain()
                    .in_set(GameSet::Movement),
                (despawn_offscreen, clamp_player_to_screen)
                    .chain()
                    .in_set(GameSet::Bounds),
            )
                .distributive_run_if(gameplay_running),
        );

    app.world_mut().run_system_once(spawn_player);
    app
}

/// Adds the spawn scheduler with the default cadence and a fixed seed.
pub fn with_spawning(mut app: App) -> App {
    app.insert_resource(SpawnScheduler::default())
        .insert_resource(SpawnRng::new(Some(1)))
        .add_systems(
            Update,
            spawn_flying_sprites
                .in_set(GameSet::Spawn)
                .run_if(gameplay_running),
        );
    app
}

/// Advances the clock by `seconds` and runs one frame.
pub fn step_app(app: &mut App, seconds: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(seconds));
    app.update();
}

pub fn spawn_flying(app: &mut App, kind: Kind, position: Vec2, velocity: Vec2, size: Vec2) -> Entity {
    let world = app.world_mut();
    let order = world.resource_mut::<DrawSequence>().next();
    world
        .spawn(FlyingBundle::new(
            kind,
            Handle::default(),
            position,
            velocity,
            size,
            order,
        ))
        .id()
}

pub fn count(app: &mut App, kind: Kind) -> usize {
    let world = app.world_mut();
    let mut query = world.query::<&Kind>();
    query.iter(world).filter(|k| **k == kind).count()
}

pub fn player_position(app: &mut App) -> Vec2 {
    let world = app.world_mut();
    let mut query = world.query_filtered::<&Position, With<Player>>();
    query.single(world).0
}

pub fn sent_sounds(app: &App) -> Vec<SoundEffect> {
    let events = app.world().resource::<Events<SoundEffect>>();
    events.get_reader().read(events).copied().collect()
}
