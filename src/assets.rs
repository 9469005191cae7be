//! Asset loading for the single setup phase. Every image and sound is queued when the app enters
//! `GameState::Loading`; the state only advances once all of them have decoded.
//!
//! Handles are reference-counted by Bevy's asset storage, so keeping them in `GameAssets` keeps the
//! decoded data alive for the whole run.

use bevy::asset::{LoadState, UntypedAssetId};
use bevy::prelude::*;

use crate::config::GameConfig;
use crate::state::GameState;

pub struct GameAssetsPlugin;

impl Plugin for GameAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameAssets>()
            .init_resource::<SpriteSizes>()
            .add_systems(OnEnter(GameState::Loading), load_assets)
            .add_systems(
                Update,
                monitor_asset_loading.run_if(in_state(GameState::Loading)),
            );
    }
}

#[derive(Resource, Default)]
pub struct GameAssets {
    pub player_image: Handle<Image>,
    pub enemy_image: Handle<Image>,
    pub cloud_image: Handle<Image>,
    pub background_music: Handle<AudioSource>,
    pub collision_sound: Handle<AudioSource>,
    pub move_up_sound: Handle<AudioSource>,
    pub move_down_sound: Handle<AudioSource>,
}

impl GameAssets {
    fn tracked(&self) -> [UntypedAssetId; 7] {
        [
            self.player_image.id().untyped(),
            self.enemy_image.id().untyped(),
            self.cloud_image.id().untyped(),
            self.background_music.id().untyped(),
            self.collision_sound.id().untyped(),
            self.move_up_sound.id().untyped(),
            self.move_down_sound.id().untyped(),
        ]
    }
}

/// On-screen sprite sizes, read from the decoded images and multiplied by the configured scaling.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SpriteSizes {
    pub player: Vec2,
    pub enemy: Vec2,
    pub cloud: Vec2,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            player: Vec2::splat(32.0),
            enemy: Vec2::splat(32.0),
            cloud: Vec2::splat(32.0),
        }
    }
}

/// Aggregate progress of a batch of asset loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadProgress {
    Pending,
    Ready,
    Failed,
}

impl LoadProgress {
    /// A single failure fails the batch even while other assets are still in flight.
    pub fn combine(statuses: impl IntoIterator<Item = LoadProgress>) -> LoadProgress {
        let mut progress = LoadProgress::Ready;
        for status in statuses {
            match status {
                LoadProgress::Failed => return LoadProgress::Failed,
                LoadProgress::Pending => progress = LoadProgress::Pending,
                LoadProgress::Ready => {}
            }
        }
        progress
    }

    fn of(state: Option<LoadState>) -> LoadProgress {
        match state {
            Some(LoadState::Loaded) => LoadProgress::Ready,
            Some(LoadState::Failed(_)) => LoadProgress::Failed,
            _ => LoadProgress::Pending,
        }
    }
}

fn load_assets(
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
    mut assets: ResMut<GameAssets>,
) {
    let paths = &config.assets;
    *assets = GameAssets {
        player_image: asset_server.load(paths.player_image.clone()),
        enemy_image: asset_server.load(paths.enemy_image.clone()),
        cloud_image: asset_server.load(paths.cloud_image.clone()),
        background_music: asset_server.load(paths.background_music.clone()),
        collision_sound: asset_server.load(paths.collision_sound.clone()),
        move_up_sound: asset_server.load(paths.move_up_sound.clone()),
        move_down_sound: asset_server.load(paths.move_down_sound.clone()),
    };

    info!("Queued sprite and sound assets.");
}

fn monitor_asset_loading(
    asset_server: Res<AssetServer>,
    assets: Res<GameAssets>,
    images: Res<Assets<Image>>,
    config: Res<GameConfig>,
    mut sizes: ResMut<SpriteSizes>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    let tracked = assets.tracked();
    let progress = LoadProgress::combine(
        tracked
            .iter()
            .map(|id| LoadProgress::of(asset_server.get_load_state(*id))),
    );

    match progress {
        LoadProgress::Pending => {}
        LoadProgress::Failed => {
            for id in tracked {
                if LoadProgress::of(asset_server.get_load_state(id)) == LoadProgress::Failed {
                    let path = asset_server
                        .get_path(id)
                        .map(|path| path.to_string())
                        .unwrap_or_else(|| "<unknown>".to_owned());
                    error!("Unable to load asset '{}'.", path);
                }
            }
            exit.send(AppExit::error());
        }
        LoadProgress::Ready => {
            let scaling = config.scaling;
            let (Some(player), Some(enemy), Some(cloud)) = (
                sprite_size(&images, &assets.player_image, scaling),
                sprite_size(&images, &assets.enemy_image, scaling),
                sprite_size(&images, &assets.cloud_image, scaling),
            ) else {
                error!("A sprite image finished loading but has no usable size.");
                exit.send(AppExit::error());
                return;
            };
            *sizes = SpriteSizes {
                player,
                enemy,
                cloud,
            };

            info!(
                "Assets ready: player {:?}, enemy {:?}, cloud {:?}.",
                sizes.player, sizes.enemy, sizes.cloud
            );
            next_state.set(GameState::Playing);
        }
    }
}

/// Scaled on-screen size of a decoded image. `None` when the image is gone from storage or has
/// an empty side, since either would give its sprites a hitbox nothing can touch.
fn sprite_size(images: &Assets<Image>, handle: &Handle<Image>, scaling: f32) -> Option<Vec2> {
    images
        .get(handle)
        .map(|image| image.size_f32() * scaling)
        .filter(|size| size.cmpgt(Vec2::ZERO).all())
}
