//! High-level plugin composition.
//!
//! `SpaceShooterPlugin` owns the immutable `GameConfig`, registers every domain plugin and fixes
//! the order of one frame tick: input, spawning, collision, movement, bounds, then rendering.

use bevy::prelude::*;

use crate::assets::GameAssetsPlugin;
use crate::audio::GameAudioPlugin;
use crate::collision::CollisionPlugin;
use crate::config::GameConfig;
use crate::entity::DrawSequence;
use crate::input::KeyboardPlugin;
use crate::movement::MovementPlugin;
use crate::player::PlayerPlugin;
use crate::render::ScreenSpacePlugin;
use crate::spawn::SpawnPlugin;
use crate::state::{GameSet, GameState};

/// Bundles every gameplay plugin into a single unit that can be added to the Bevy `App`.
pub struct SpaceShooterPlugin {
    pub config: GameConfig,
}

impl Plugin for SpaceShooterPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .insert_resource(self.config.clone())
            .init_resource::<DrawSequence>()
            .add_plugins((
                GameAssetsPlugin,  // Image + sound loading and the Loading → Playing hand-off.
                KeyboardPlugin,    // Keyboard → InputState.
                SpawnPlugin,       // Enemy and cloud cadence.
                CollisionPlugin,   // Player vs. enemy overlap.
                MovementPlugin,    // Steering, integration, off-screen removal.
                PlayerPlugin,      // Player spawn + screen clamp.
                GameAudioPlugin,   // Music and one-shot effects.
                ScreenSpacePlugin, // Camera + screen → world transforms.
            ))
            // Gameplay sets only run once assets are in; pause and quit are checked per system so
            // that nothing after a collision runs in the frame that ends the game.
            .configure_sets(
                Update,
                (
                    GameSet::Input,
                    GameSet::Spawn,
                    GameSet::Collision,
                    GameSet::Movement,
                    GameSet::Bounds,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .configure_sets(Update, GameSet::Render.after(GameSet::Bounds));
    }
}
