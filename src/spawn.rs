//! Periodic spawning of enemies and clouds.
//!
//! Two repeating timers run side by side. A repeating `Timer` carries its overshoot into the next
//! period, so the cadence does not drift with frame timing, and a long frame that spans several
//! periods spawns once per elapsed period. The timers only tick while gameplay is running, which
//! freezes the cadence during pause.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assets::{GameAssets, SpriteSizes};
use crate::config::{GameConfig, SpawnRule};
use crate::entity::{DrawSequence, FlyingBundle, Kind};
use crate::state::{gameplay_running, GameSet, GameState};

pub struct SpawnPlugin;

impl Plugin for SpawnPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnScheduler>()
            .add_systems(Startup, seed_spawn_rng)
            .add_systems(OnEnter(GameState::Playing), reset_spawn_timers)
            .add_systems(
                Update,
                spawn_flying_sprites
                    .in_set(GameSet::Spawn)
                    .run_if(gameplay_running),
            );
    }
}

#[derive(Resource, Debug)]
pub struct SpawnScheduler {
    enemy: Timer,
    cloud: Timer,
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        let config = GameConfig::default();
        Self::new(config.enemy.period, config.cloud.period)
    }
}

/// How many sprites of each kind are due this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpawnCounts {
    pub enemies: u32,
    pub clouds: u32,
}

impl SpawnScheduler {
    pub fn new(enemy_period: f32, cloud_period: f32) -> Self {
        Self {
            enemy: Timer::from_seconds(enemy_period, TimerMode::Repeating),
            cloud: Timer::from_seconds(cloud_period, TimerMode::Repeating),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.enemy.period, config.cloud.period)
    }

    pub fn on_tick(&mut self, delta: std::time::Duration) -> SpawnCounts {
        self.enemy.tick(delta);
        self.cloud.tick(delta);

        SpawnCounts {
            enemies: self.enemy.times_finished_this_tick(),
            clouds: self.cloud.times_finished_this_tick(),
        }
    }
}

#[derive(Resource, Deref, DerefMut)]
pub struct SpawnRng(pub StdRng);

impl SpawnRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

/// Initial centre and velocity for a new flying sprite of `size`.
///
/// The left edge lands in `[screen width, screen width + spawn_margin]` and the top edge in
/// `[edge_padding, screen height - edge_padding]`, both on whole pixels. Speed is a whole number of
/// pixels per second drawn from the rule's range, always heading left.
pub fn roll_spawn(
    rng: &mut impl Rng,
    config: &GameConfig,
    rule: &SpawnRule,
    size: Vec2,
) -> (Vec2, Vec2) {
    let screen = config.screen_size();
    let width = screen.x as i32;
    let height = screen.y as i32;

    let left = rng.gen_range(width..=width + config.spawn_margin) as f32;
    let top = rng.gen_range(config.edge_padding..=height - config.edge_padding) as f32;
    let speed = rng.gen_range(rule.speed_min..=rule.speed_max) as f32;

    let center = Vec2::new(left + size.x * 0.5, top - size.y * 0.5);
    (center, Vec2::new(-speed, 0.0))
}

fn seed_spawn_rng(mut commands: Commands, config: Res<GameConfig>) {
    commands.insert_resource(SpawnRng::new(config.seed));
}

fn reset_spawn_timers(mut commands: Commands, config: Res<GameConfig>) {
    commands.insert_resource(SpawnScheduler::from_config(&config));
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn spawn_flying_sprites(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    assets: Res<GameAssets>,
    sizes: Res<SpriteSizes>,
    mut scheduler: ResMut<SpawnScheduler>,
    mut rng: ResMut<SpawnRng>,
    mut sequence: ResMut<DrawSequence>,
) {
    let due = scheduler.on_tick(time.delta());

    let batches = [
        (Kind::Enemy, due.enemies, &config.enemy, sizes.enemy, &assets.enemy_image),
        (Kind::Cloud, due.clouds, &config.cloud, sizes.cloud, &assets.cloud_image),
    ];

    for (kind, count, rule, size, texture) in batches {
        for _ in 0..count {
            let (position, velocity) = roll_spawn(&mut rng.0, &config, rule, size);
            debug!(?kind, x = position.x, y = position.y, dx = velocity.x, "Spawned sprite.");

            commands.spawn((
                Name::new(match kind {
                    Kind::Enemy => "Enemy",
                    _ => "Cloud",
                }),
                FlyingBundle::new(
                    kind,
                    texture.clone(),
                    position,
                    velocity,
                    size,
                    sequence.next(),
                ),
            ));
        }
    }
}
