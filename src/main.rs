// Main
mod audio;
mod config;
mod content;
mod home;
mod level;
mod level_map;
mod listen_guide;
mod mascot;
mod matching;
mod prefs;
mod screens;
mod settings;
mod transition;
mod tutorial;
mod ui;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use audio::SoundPlugin;
use config::GameConfig;
use home::HomePlugin;
use level::LevelPlugin;
use level_map::LevelMapPlugin;
use listen_guide::ListenGuidePlugin;
use mascot::MascotPlugin;
use prefs::PrefsPlugin;
use screens::{Screens, SessionProgress};
use settings::SettingsPlugin;
use transition::TransitionPlugin;
use ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Tuki: aprende BriBri".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "wgpu=error,naga=warn,tuki=debug".into(),
                    ..default()
                }),
        )
        .insert_resource(GameConfig::from_env())
        .init_state::<Screens>()
        .init_resource::<SessionProgress>()
        .add_plugins((
            PrefsPlugin,
            UiPlugin,
            SoundPlugin,
            MascotPlugin,
            HomePlugin,
            SettingsPlugin,
            LevelMapPlugin,
            ListenGuidePlugin,
            LevelPlugin,
            TransitionPlugin,
        ))
        .run();
}
