// Level selection hub.

use bevy::prelude::*;
use strum::IntoEnumIterator;

use crate::mascot::{ActiveGuide, GuideHighlight};
use crate::screens::{LevelId, Screens, SessionProgress};
use crate::tutorial::GuideTarget;
use crate::ui::{BACKDROP, INK, spawn_button};

pub struct LevelMapPlugin;

impl Plugin for LevelMapPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screens::LevelMap), setup_level_map)
            .add_systems(
                Update,
                level_map_actions.run_if(in_state(Screens::LevelMap)),
            );
    }
}

#[derive(Component, Clone, Copy)]
enum MapButton {
    Guide,
    Level(LevelId),
    Back,
}

impl MapButton {
    fn guide_target(self) -> GuideTarget {
        match self {
            MapButton::Guide | MapButton::Level(_) => GuideTarget::LevelButtons,
            MapButton::Back => GuideTarget::BackButton,
        }
    }

    fn destination(self) -> Screens {
        match self {
            MapButton::Guide => Screens::ListenGuide,
            MapButton::Level(level) => Screens::Level(level),
            MapButton::Back => Screens::Home,
        }
    }
}

fn marked(button: MapButton) -> impl Bundle {
    (
        button,
        GuideHighlight(button.guide_target()),
        Outline::new(Val::Px(4.0), Val::Px(2.0), Color::NONE),
    )
}

fn setup_level_map(mut commands: Commands, progress: Res<SessionProgress>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(24.0)),
                row_gap: Val::Px(20.0),
                ..default()
            },
            BackgroundColor(BACKDROP),
            DespawnOnExit(Screens::LevelMap),
        ))
        .with_children(|parent| {
            parent
                .spawn(Node {
                    width: Val::Percent(100.0),
                    ..default()
                })
                .with_children(|row| {
                    spawn_button(row, "Volver", 120.0, marked(MapButton::Back));
                });

            parent.spawn((
                Text::new("Escuchar"),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(INK),
            ));

            spawn_button(parent, "Guía: escuchar", 280.0, marked(MapButton::Guide));
            for level in LevelId::iter() {
                let label = if progress.completed.contains(&level) {
                    format!("{level} ✓")
                } else {
                    level.to_string()
                };
                spawn_button(parent, &label, 280.0, marked(MapButton::Level(level)));
            }
        });
}

fn level_map_actions(
    query: Query<(&Interaction, &MapButton), Changed<Interaction>>,
    mut guide: Option<ResMut<ActiveGuide>>,
    mut next_state: ResMut<NextState<Screens>>,
) {
    for (interaction, button) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if let Some(guide) = guide.as_mut() {
            guide.trigger(button.guide_target());
        }
        next_state.set(button.destination());
    }
}
