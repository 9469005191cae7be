//! Application entry point: reads the optional config file, configures the window and hands
//! control to Bevy's frame loop, which runs until ESC or a collision requests exit.
//!
//! Usage: `space_shooter [config.ron]`

mod app;
mod assets;
mod audio;
mod collision;
mod config;
mod entity;
mod input;
mod movement;
mod player;
mod render;
mod spawn;
mod state;

#[cfg(test)]
mod testing;

use app::SpaceShooterPlugin;
use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::window::{Window, WindowResolution};
use config::GameConfig;

/// Sky blue.
const BACKGROUND: Color = Color::srgb(0.529, 0.808, 0.922);

fn main() -> AppExit {
    let config = match std::env::args().nth(1) {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{path}: {err}");
                return AppExit::error();
            }
        },
        None => GameConfig::default(),
    };

    let screen = config.screen_size();
    let primary_window = Window {
        title: config.title.clone(),
        resolution: WindowResolution::new(screen.x, screen.y),
        resizable: false,
        ..default()
    };

    let default_plugins = DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(primary_window),
            ..default()
        })
        .set(AssetPlugin {
            file_path: "assets".to_owned(),
            ..default()
        });

    App::new()
        .insert_resource(ClearColor(BACKGROUND))
        .add_plugins(default_plugins)
        .add_plugins(SpaceShooterPlugin { config })
        .run()
}
