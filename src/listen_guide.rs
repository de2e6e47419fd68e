// Listening guide: the house picture with a speaker over each object.

use bevy::prelude::*;

use crate::audio::play_clip;
use crate::content::GUIDE_BOXES;
use crate::screens::{LevelId, Screens};
use crate::ui::{BACKDROP, spawn_button};

pub struct ListenGuidePlugin;

impl Plugin for ListenGuidePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screens::ListenGuide), setup_listen_guide)
            .add_systems(
                Update,
                (speaker_presses, guide_navigation).run_if(in_state(Screens::ListenGuide)),
            );
    }
}

const PICTURE_PATH: &str = "images/guia1.jpeg";
const SPEAKER_PATH: &str = "images/audio.png";

#[derive(Component)]
struct Speaker(&'static str);

#[derive(Component)]
enum GuideNav {
    Back,
    Next,
}

fn setup_listen_guide(mut commands: Commands, asset_server: Res<AssetServer>) {
    let speaker = asset_server.load(SPEAKER_PATH);

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BACKDROP),
            DespawnOnExit(Screens::ListenGuide),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    ImageNode::new(asset_server.load(PICTURE_PATH)),
                    Node {
                        width: Val::Percent(80.0),
                        height: Val::Percent(90.0),
                        ..default()
                    },
                ))
                .with_children(|picture| {
                    for (left, top, clip) in GUIDE_BOXES {
                        picture.spawn((
                            Speaker(*clip),
                            Button,
                            ImageNode::new(speaker.clone()),
                            Node {
                                position_type: PositionType::Absolute,
                                left: Val::Percent(*left),
                                top: Val::Percent(*top),
                                width: Val::Percent(8.0),
                                height: Val::Percent(8.0),
                                border: UiRect::all(Val::Px(3.0)),
                                ..default()
                            },
                            BorderColor::all(Color::srgb(1.0, 0.0, 0.0)),
                            BackgroundColor(Color::srgba(1.0, 0.0, 0.0, 0.3)),
                        ));
                    }
                });

            parent
                .spawn(Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(16.0),
                    left: Val::Px(16.0),
                    ..default()
                })
                .with_children(|corner| {
                    spawn_button(corner, "Volver", 120.0, GuideNav::Back);
                });

            parent
                .spawn(Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(16.0),
                    right: Val::Px(16.0),
                    ..default()
                })
                .with_children(|corner| {
                    spawn_button(corner, "Siguiente", 160.0, GuideNav::Next);
                });
        });
}

fn speaker_presses(
    query: Query<(&Interaction, &Speaker), Changed<Interaction>>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
) {
    for (interaction, speaker) in &query {
        if *interaction == Interaction::Pressed {
            play_clip(&mut commands, &asset_server, speaker.0);
        }
    }
}

fn guide_navigation(
    query: Query<(&Interaction, &GuideNav), Changed<Interaction>>,
    mut next_state: ResMut<NextState<Screens>>,
) {
    for (interaction, nav) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match nav {
            GuideNav::Back => next_state.set(Screens::LevelMap),
            GuideNav::Next => next_state.set(Screens::Level(LevelId::One)),
        }
    }
}
