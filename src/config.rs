//! Immutable game configuration. Constructed once before the app starts and inserted as a
//! resource by `SpaceShooterPlugin`; systems only ever read it.
//!
//! Every field has a default, so a RON file passed on the command line may override any subset.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    /// Multiplies both the window size and every sprite size.
    pub scaling: f32,
    /// Player displacement in pixels per second while a direction is held.
    pub player_speed: f32,
    /// Left edge of the player when the run starts.
    pub player_left: f32,
    pub enemy: SpawnRule,
    pub cloud: SpawnRule,
    /// Horizontal band right of the screen in which new sprites appear.
    pub spawn_margin: i32,
    /// Keeps the top edge of new sprites this far from the screen's top and bottom.
    pub edge_padding: i32,
    pub assets: AssetPaths,
    /// Fixed seed for the spawn RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Arcade Space Shooter".to_owned(),
            width: 800.0,
            height: 600.0,
            scaling: 1.0,
            player_speed: 250.0,
            player_left: 10.0,
            enemy: SpawnRule {
                period: 0.25,
                speed_min: 50,
                speed_max: 100,
            },
            cloud: SpawnRule {
                period: 1.0,
                speed_min: 20,
                speed_max: 100,
            },
            spawn_margin: 80,
            edge_padding: 10,
            assets: AssetPaths::default(),
            seed: None,
        }
    }
}

/// Cadence and leftward speed range for one kind of flying sprite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    pub period: f32,
    pub speed_min: i32,
    pub speed_max: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub player_image: String,
    pub enemy_image: String,
    pub cloud_image: String,
    pub background_music: String,
    pub collision_sound: String,
    pub move_up_sound: String,
    pub move_down_sound: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            player_image: "images/jet.png".to_owned(),
            enemy_image: "images/missile.png".to_owned(),
            cloud_image: "images/cloud.png".to_owned(),
            background_music: "sounds/Apoxode_-_Electric_1.wav".to_owned(),
            collision_sound: "sounds/Collision.wav".to_owned(),
            move_up_sound: "sounds/Rising_putter.wav".to_owned(),
            move_down_sound: "sounds/Falling_putter.wav".to_owned(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "unable to read config: {err}"),
            ConfigError::Parse(err) => write!(f, "malformed config: {err}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(err: ron::error::SpannedError) -> Self {
        ConfigError::Parse(err)
    }
}

/// Largest window side accepted, in pixels. Keeps every screen coordinate exact as both `f32` and
/// `i32`.
const MAX_SCREEN_EXTENT: f32 = 16_384.0;

fn positive_finite(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make the window unusable, overflow the spawn arithmetic or leave
    /// the spawn ranges empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_finite("width", self.width)?;
        positive_finite("height", self.height)?;
        positive_finite("scaling", self.scaling)?;
        positive_finite("player speed", self.player_speed)?;
        if !self.player_left.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "player left edge must be finite, got {}",
                self.player_left
            )));
        }

        let screen = self.screen_size();
        if screen.x > MAX_SCREEN_EXTENT || screen.y > MAX_SCREEN_EXTENT {
            return Err(ConfigError::Invalid(format!(
                "screen {}x{} exceeds {MAX_SCREEN_EXTENT}px",
                screen.x, screen.y
            )));
        }

        for (name, rule) in [("enemy", &self.enemy), ("cloud", &self.cloud)] {
            positive_finite(&format!("{name} period"), rule.period)?;
            if Duration::try_from_secs_f32(rule.period).is_err() {
                return Err(ConfigError::Invalid(format!(
                    "{name} period {} is too long",
                    rule.period
                )));
            }
            if rule.speed_min < 0 || rule.speed_min > rule.speed_max {
                return Err(ConfigError::Invalid(format!(
                    "{name} speed range {}..={} is empty or negative",
                    rule.speed_min, rule.speed_max
                )));
            }
        }

        if self.spawn_margin < 0 || (screen.x as i32).checked_add(self.spawn_margin).is_none() {
            return Err(ConfigError::Invalid(format!(
                "spawn margin {} is out of range for a {}px wide screen",
                self.spawn_margin, screen.x
            )));
        }
        let height = screen.y as i32;
        let band = self
            .edge_padding
            .checked_mul(2)
            .filter(|padding| self.edge_padding >= 0 && *padding <= height);
        if band.is_none() {
            return Err(ConfigError::Invalid(format!(
                "edge padding {} leaves no room on a {}px tall screen",
                self.edge_padding, screen.y
            )));
        }
        Ok(())
    }

    /// Playfield size in pixels; matches the window's logical resolution.
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * self.scaling
    }
}
