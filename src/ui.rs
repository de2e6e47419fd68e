// Shared button styling and text overlays used by every screen.

use bevy::prelude::*;
use bevy::ui::FocusPolicy;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(Update, (button_visuals, close_overlays));
    }
}

pub const NORMAL_BUTTON: Color = Color::srgb(0.33, 0.22, 0.12);
pub const HOVERED_BUTTON: Color = Color::srgb(0.43, 0.30, 0.16);
pub const PRESSED_BUTTON: Color = Color::srgb(0.53, 0.38, 0.20);
pub const BACKDROP: Color = Color::srgb(0.96, 0.93, 0.84);
pub const INK: Color = Color::srgb(0.2, 0.2, 0.2);

const RESTING_BORDER: Color = Color::srgba(1.0, 1.0, 1.0, 0.3);

/// Marker for buttons that use the shared hover/press colours.
#[derive(Component)]
pub struct StyledButton;

#[derive(Component)]
struct Overlay;

#[derive(Component)]
struct OverlayClose;

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub fn spawn_button(
    parent: &mut ChildSpawnerCommands,
    label: &str,
    width: f32,
    marker: impl Bundle,
) -> Entity {
    parent
        .spawn((
            marker,
            StyledButton,
            Button,
            Node {
                width: Val::Px(width),
                height: Val::Px(50.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderColor::all(RESTING_BORDER),
            BackgroundColor(NORMAL_BUTTON),
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        })
        .id()
}

fn button_visuals(
    mut query: Query<
        (&Interaction, &mut BackgroundColor, &mut BorderColor),
        (Changed<Interaction>, With<StyledButton>),
    >,
) {
    for (interaction, mut bg, mut border) in &mut query {
        match *interaction {
            Interaction::Pressed => {
                *bg = PRESSED_BUTTON.into();
                *border = BorderColor::all(Color::WHITE);
            }
            Interaction::Hovered => {
                *bg = HOVERED_BUTTON.into();
                *border = BorderColor::all(Color::WHITE);
            }
            Interaction::None => {
                *bg = NORMAL_BUTTON.into();
                *border = BorderColor::all(RESTING_BORDER);
            }
        }
    }
}

/// Full-screen text panel with a close button, removed when `screen` is left.
pub fn spawn_overlay<S: States>(commands: &mut Commands, screen: S, title: &str, lines: &[&str]) {
    commands
        .spawn((
            Overlay,
            DespawnOnExit(screen),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(12.0),
                padding: UiRect::horizontal(Val::Percent(10.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.9)),
            // Modal: presses must not reach the screen underneath.
            FocusPolicy::Block,
            GlobalZIndex(200),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            for line in lines {
                parent.spawn((
                    Text::new(*line),
                    TextFont {
                        font_size: 20.0,
                        ..default()
                    },
                    TextColor(Color::srgba(0.8, 0.8, 0.8, 1.0)),
                    TextLayout::new_with_justify(Justify::Center),
                ));
            }

            parent
                .spawn(Node {
                    margin: UiRect::top(Val::Px(24.0)),
                    ..default()
                })
                .with_children(|row| {
                    spawn_button(row, "Cerrar", 140.0, OverlayClose);
                });
        });
}

fn close_overlays(
    mut commands: Commands,
    overlays: Query<Entity, With<Overlay>>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<OverlayClose>)>,
) {
    for interaction in &buttons {
        if *interaction == Interaction::Pressed {
            for entity in &overlays {
                commands.entity(entity).despawn();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::Screens;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn overlay_blocks_presses_to_the_screen_below() {
        let mut world = World::new();
        world
            .run_system_once(|mut commands: Commands| {
                spawn_overlay(&mut commands, Screens::Home, "Créditos", &["Tuki"]);
            })
            .expect("overlay system runs");

        let mut overlays = world.query_filtered::<&FocusPolicy, With<Overlay>>();
        let policy = overlays.single(&world).expect("one overlay");
        assert_eq!(*policy, FocusPolicy::Block);

        // The close button stays reachable above the backdrop.
        let mut closers = world.query_filtered::<&Button, With<OverlayClose>>();
        assert_eq!(closers.iter(&world).count(), 1);
    }
}
