use bevy::prelude::*;

use crate::audio::SoundEffect;
use crate::entity::{overlaps, Hitbox, Kind, Position};
use crate::player::Player;
use crate::state::{gameplay_running, GameSet};

pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            end_run_on_enemy_contact
                .in_set(GameSet::Collision)
                .run_if(gameplay_running),
        );
    }
}

/// Any overlap between the player and an enemy ends the run on the spot: the collision sound is
/// queued and the app is asked to exit. Clouds are scenery and never collide.
pub(crate) fn end_run_on_enemy_contact(
    player_query: Query<(&Position, &Hitbox), With<Player>>,
    sprites: Query<(&Kind, &Position, &Hitbox), Without<Player>>,
    mut sounds: EventWriter<SoundEffect>,
    mut exit: EventWriter<AppExit>,
) {
    let Ok((player_position, player_hitbox)) = player_query.get_single() else {
        return;
    };
    let player_rect = player_hitbox.rect(player_position.0);

    let hit = sprites
        .iter()
        .filter(|(kind, _, _)| **kind == Kind::Enemy)
        .any(|(_, position, hitbox)| overlaps(player_rect, hitbox.rect(position.0)));

    if hit {
        info!("Player hit an enemy, ending the run.");
        sounds.send(SoundEffect::Collision);
        exit.send(AppExit::Success);
    }
}
