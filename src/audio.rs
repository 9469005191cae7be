//! Audio playback. Gameplay systems never touch audio sinks directly; they send a `SoundEffect`
//! event and `play_sound_effects` turns it into a one-shot audio entity that despawns itself once
//! the clip finishes.

use bevy::prelude::*;

use crate::assets::GameAssets;
use crate::state::{GameSet, GameState};

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SoundEffect>()
            .add_systems(OnEnter(GameState::Playing), start_background_music)
            .add_systems(Update, play_sound_effects.after(GameSet::Bounds));
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Collision,
    MoveUp,
    MoveDown,
}

fn start_background_music(mut commands: Commands, assets: Res<GameAssets>) {
    commands.spawn((
        Name::new("BackgroundMusic"),
        AudioBundle {
            source: assets.background_music.clone(),
            settings: PlaybackSettings::LOOP,
        },
    ));
}

fn play_sound_effects(
    mut commands: Commands,
    mut events: EventReader<SoundEffect>,
    assets: Res<GameAssets>,
) {
    for effect in events.read() {
        let source = match effect {
            SoundEffect::Collision => assets.collision_sound.clone(),
            SoundEffect::MoveUp => assets.move_up_sound.clone(),
            SoundEffect::MoveDown => assets.move_down_sound.clone(),
        };

        commands.spawn(AudioBundle {
            source,
            settings: PlaybackSettings::DESPAWN,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_event_spawns_one_despawning_player() {
        let mut app = App::new();
        app.init_resource::<GameAssets>()
            .add_event::<SoundEffect>()
            .add_systems(Update, play_sound_effects);

        app.world_mut().send_event(SoundEffect::Collision);
        app.world_mut().send_event(SoundEffect::MoveDown);
        app.update();

        let world = app.world_mut();
        let mut query = world.query::<&PlaybackSettings>();
        let settings: Vec<_> = query.iter(world).collect();
        assert_eq!(settings.len(), 2);
        assert!(settings
            .iter()
            .all(|s| matches!(s.mode, bevy::audio::PlaybackMode::Despawn)));
    }

    #[test]
    fn background_music_loops() {
        let mut app = App::new();
        app.init_resource::<GameAssets>()
            .add_systems(Update, start_background_music);
        app.update();

        let world = app.world_mut();
        let mut query = world.query::<(&Name, &PlaybackSettings)>();
        let tracks: Vec<_> = query
            .iter(world)
            .map(|(name, settings)| (name.as_str().to_owned(), settings.mode))
            .collect();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].0, "BackgroundMusic");
        assert!(matches!(tracks[0].1, bevy::audio::PlaybackMode::Loop));
    }
}
