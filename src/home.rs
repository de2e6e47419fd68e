// Home screen

use bevy::prelude::*;

use crate::content::{CREDITS, CREDITS_TITLE, INSTRUCTIONS, INSTRUCTIONS_TITLE, MANUAL, MANUAL_TITLE};
use crate::mascot::{ActiveGuide, GuideHighlight};
use crate::screens::Screens;
use crate::tutorial::GuideTarget;
use crate::ui::{BACKDROP, INK, spawn_button, spawn_overlay};

pub struct HomePlugin;

impl Plugin for HomePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screens::Home), setup_home)
            .add_systems(Update, home_actions.run_if(in_state(Screens::Home)));
    }
}

const BACKGROUND_PATH: &str = "images/pantalla_principal.png";

#[derive(Component, Clone, Copy)]
enum HomeButton {
    Play,
    Settings,
    Manual,
    Instructions,
    Credits,
    #[cfg(not(target_arch = "wasm32"))]
    Exit,
}

impl HomeButton {
    fn guide_target(self) -> Option<GuideTarget> {
        match self {
            HomeButton::Play => Some(GuideTarget::PlayButton),
            HomeButton::Settings => Some(GuideTarget::SettingsButton),
            HomeButton::Manual | HomeButton::Instructions | HomeButton::Credits => {
                Some(GuideTarget::InfoButtons)
            }
            #[cfg(not(target_arch = "wasm32"))]
            HomeButton::Exit => None,
        }
    }
}

fn highlighted(button: HomeButton) -> impl Bundle {
    let target = button.guide_target().unwrap_or(GuideTarget::Resting);
    (
        button,
        GuideHighlight(target),
        Outline::new(Val::Px(4.0), Val::Px(2.0), Color::NONE),
    )
}

fn setup_home(mut commands: Commands, asset_server: Res<AssetServer>) {
    // Root container.
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(24.0)),
                ..default()
            },
            BackgroundColor(BACKDROP),
            DespawnOnExit(Screens::Home),
        ))
        .with_children(|parent| {
            // Background picture.
            parent.spawn((
                ImageNode::new(asset_server.load(BACKGROUND_PATH)),
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                ZIndex(-1),
            ));

            // Settings on the left, manual on the right.
            parent
                .spawn(Node {
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::SpaceBetween,
                    ..default()
                })
                .with_children(|row| {
                    spawn_button(row, "Tuki", 120.0, highlighted(HomeButton::Settings));
                    spawn_button(row, "Manual", 120.0, highlighted(HomeButton::Manual));
                });

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(24.0),
                    ..default()
                })
                .with_children(|column| {
                    column.spawn((
                        Text::new("La casa tradicional BriBri"),
                        TextFont {
                            font_size: 40.0,
                            ..default()
                        },
                        TextColor(INK),
                    ));
                    spawn_button(column, "Jugar", 240.0, highlighted(HomeButton::Play));
                });

            parent
                .spawn(Node {
                    column_gap: Val::Px(16.0),
                    ..default()
                })
                .with_children(|row| {
                    spawn_button(
                        row,
                        "Instrucciones",
                        200.0,
                        highlighted(HomeButton::Instructions),
                    );
                    spawn_button(row, "Créditos", 200.0, highlighted(HomeButton::Credits));

                    // Exit button (native only).
                    #[cfg(not(target_arch = "wasm32"))]
                    spawn_button(row, "Salir", 120.0, HomeButton::Exit);
                });
        });
}

fn home_actions(
    query: Query<(&Interaction, &HomeButton), Changed<Interaction>>,
    mut guide: Option<ResMut<ActiveGuide>>,
    mut next_state: ResMut<NextState<Screens>>,
    mut commands: Commands,
    #[cfg(not(target_arch = "wasm32"))] mut exit: MessageWriter<AppExit>,
) {
    for (interaction, button) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if let (Some(guide), Some(target)) = (guide.as_mut(), button.guide_target()) {
            guide.trigger(target);
        }
        match button {
            HomeButton::Play => {
                next_state.set(Screens::LevelMap);
            }
            HomeButton::Settings => {
                next_state.set(Screens::Settings);
            }
            HomeButton::Manual => {
                spawn_overlay(&mut commands, Screens::Home, MANUAL_TITLE, MANUAL);
            }
            HomeButton::Instructions => {
                spawn_overlay(&mut commands, Screens::Home, INSTRUCTIONS_TITLE, INSTRUCTIONS);
            }
            HomeButton::Credits => {
                spawn_overlay(&mut commands, Screens::Home, CREDITS_TITLE, CREDITS);
            }
            #[cfg(not(target_arch = "wasm32"))]
            HomeButton::Exit => {
                exit.write(AppExit::Success);
            }
        }
    }
}
