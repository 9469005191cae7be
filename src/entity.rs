//! Shared entity data. Player, enemies and clouds are the same kind of ECS entity distinguished
//! only by their `Kind` tag, so movement and removal rules apply uniformly.
//!
//! "All sprites" is simply every entity carrying `Kind`; the enemy and cloud collections are the
//! subsets with the matching tag. Despawning an entity therefore removes it from every collection
//! at once.

use bevy::math::Rect;
use bevy::prelude::*;

use crate::movement::Velocity;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Player,
    Enemy,
    Cloud,
}

/// Sprite centre in screen pixels. The origin is the bottom-left corner of the window, y up.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct Position(pub Vec2);

/// On-screen size, fixed when the entity spawns.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub size: Vec2,
}

impl Hitbox {
    pub fn rect(&self, center: Vec2) -> Rect {
        Rect::from_center_size(center, self.size)
    }
}

/// Spawn sequence number. Later entities draw on top of earlier ones.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DrawOrder(pub u64);

/// Hands out `DrawOrder` values.
#[derive(Resource, Debug, Default)]
pub struct DrawSequence(u64);

impl DrawSequence {
    pub fn next(&mut self) -> DrawOrder {
        let order = DrawOrder(self.0);
        self.0 += 1;
        order
    }
}

/// Everything a moving sprite needs, minus its marker components.
#[derive(Bundle)]
pub struct FlyingBundle {
    pub kind: Kind,
    pub position: Position,
    pub velocity: Velocity,
    pub hitbox: Hitbox,
    pub order: DrawOrder,
    pub sprite: SpriteBundle,
}

impl FlyingBundle {
    pub fn new(
        kind: Kind,
        texture: Handle<Image>,
        position: Vec2,
        velocity: Vec2,
        size: Vec2,
        order: DrawOrder,
    ) -> Self {
        Self {
            kind,
            position: Position(position),
            velocity: Velocity(velocity),
            hitbox: Hitbox { size },
            order,
            sprite: SpriteBundle {
                texture,
                sprite: Sprite {
                    custom_size: Some(size),
                    ..default()
                },
                ..default()
            },
        }
    }
}

/// Strict axis-aligned overlap; rectangles that only share an edge do not collide.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && b.min.x < a.max.x && a.min.y < b.max.y && b.min.y < a.max.y
}
