// Settings screen: lets the learner switch Tuki's help on or off.

use bevy::prelude::*;

use crate::prefs::{GUIDE_ENABLED_KEY, Preferences, load_guide_preference};
use crate::screens::Screens;
use crate::ui::{BACKDROP, INK, spawn_button};

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screens::Settings), setup_settings)
            .add_systems(OnExit(Screens::Settings), |mut commands: Commands| {
                commands.remove_resource::<GuideSwitch>();
            })
            .add_systems(
                Update,
                settings_actions.run_if(in_state(Screens::Settings)),
            );
    }
}

#[derive(Resource)]
struct GuideSwitch(bool);

#[derive(Component)]
enum SettingsButton {
    ToggleGuide,
    Back,
}

#[derive(Component)]
struct SwitchLabel;

fn switch_text(enabled: bool) -> &'static str {
    if enabled {
        "La ayuda de Tuki está activada"
    } else {
        "La ayuda de Tuki está desactivada"
    }
}

fn setup_settings(mut commands: Commands, prefs: Res<Preferences>) {
    let enabled = load_guide_preference(prefs.0.as_ref()).enabled;
    commands.insert_resource(GuideSwitch(enabled));

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(24.0),
                ..default()
            },
            BackgroundColor(BACKDROP),
            DespawnOnExit(Screens::Settings),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Configuración"),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(INK),
            ));
            parent.spawn((
                SwitchLabel,
                Text::new(switch_text(enabled)),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(INK),
            ));
            spawn_button(parent, "Cambiar", 200.0, SettingsButton::ToggleGuide);
            spawn_button(parent, "Volver", 200.0, SettingsButton::Back);
        });
}

fn settings_actions(
    query: Query<(&Interaction, &SettingsButton), Changed<Interaction>>,
    mut switch: ResMut<GuideSwitch>,
    prefs: Res<Preferences>,
    mut labels: Query<&mut Text, With<SwitchLabel>>,
    mut next_state: ResMut<NextState<Screens>>,
) {
    for (interaction, button) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            SettingsButton::ToggleGuide => {
                switch.0 = !switch.0;
                let value = if switch.0 { "true" } else { "false" };
                match prefs.0.set(GUIDE_ENABLED_KEY, value) {
                    Ok(()) => info!("Toucan guide enabled: {}", switch.0),
                    Err(err) => error!("Could not save guide preference: {err}"),
                }
                for mut text in &mut labels {
                    **text = switch_text(switch.0).to_string();
                }
            }
            SettingsButton::Back => {
                next_state.set(Screens::Home);
            }
        }
    }
}
