// Full-screen title cards that fade in and out when a level opens.

use bevy::prelude::*;
use strum::IntoEnumIterator;

use crate::screens::{LevelId, Screens};

pub struct TransitionPlugin;

impl Plugin for TransitionPlugin {
    fn build(&self, app: &mut App) {
        for level in LevelId::iter() {
            let title = level.level().title;
            app.add_systems(
                OnEnter(Screens::Level(level)),
                move |commands: Commands, roots: Query<Entity, With<CardRoot>>| {
                    spawn_card(commands, roots, title)
                },
            );
        }
        app.add_systems(Update, fade_card);
    }
}

const FADE_IN: f32 = 0.2;
const HOLD: f32 = 1.2;
const FADE_OUT: f32 = 0.6;
const TOTAL: f32 = FADE_IN + HOLD + FADE_OUT;

const CARD_BACKGROUND: Color = Color::srgb(0.2, 0.13, 0.07);

#[derive(Resource)]
struct CardTimer(f32);

#[derive(Component)]
struct CardRoot;

#[derive(Component)]
struct CardText;

fn spawn_card(mut commands: Commands, roots: Query<Entity, With<CardRoot>>, title: &str) {
    // A card still fading from the previous level is replaced.
    for entity in &roots {
        commands.entity(entity).despawn();
    }
    commands.insert_resource(CardTimer(0.0));

    commands
        .spawn((
            CardRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(CARD_BACKGROUND),
            GlobalZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                CardText,
                Text::new(title),
                TextFont {
                    font_size: 44.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.0)),
            ));
        });
}

/// Text and backdrop opacity `t` seconds after the card appeared.
fn card_alpha(t: f32) -> (f32, f32) {
    if t < FADE_IN {
        (t / FADE_IN, 1.0)
    } else if t < FADE_IN + HOLD {
        (1.0, 1.0)
    } else {
        let faded = 1.0 - ((t - FADE_IN - HOLD) / FADE_OUT).min(1.0);
        (faded, faded)
    }
}

fn fade_card(
    mut commands: Commands,
    time: Res<Time>,
    timer: Option<ResMut<CardTimer>>,
    roots: Query<Entity, With<CardRoot>>,
    mut texts: Query<&mut TextColor, With<CardText>>,
    mut backgrounds: Query<&mut BackgroundColor, With<CardRoot>>,
) {
    let Some(mut timer) = timer else {
        return;
    };

    timer.0 += time.delta_secs();
    if timer.0 >= TOTAL {
        for entity in &roots {
            commands.entity(entity).despawn();
        }
        commands.remove_resource::<CardTimer>();
        return;
    }

    let (text_alpha, bg_alpha) = card_alpha(timer.0);
    for mut color in &mut texts {
        color.0 = Color::WHITE.with_alpha(text_alpha);
    }
    for mut bg in &mut backgrounds {
        bg.0 = CARD_BACKGROUND.with_alpha(bg_alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_fades_in_over_opaque_backdrop() {
        assert_eq!(card_alpha(0.0), (0.0, 1.0));
        let (text, bg) = card_alpha(FADE_IN / 2.0);
        assert!((text - 0.5).abs() < 1e-5);
        assert_eq!(bg, 1.0);
    }

    #[test]
    fn holds_then_fades_out_together() {
        assert_eq!(card_alpha(FADE_IN + HOLD / 2.0), (1.0, 1.0));
        let (text, bg) = card_alpha(FADE_IN + HOLD + FADE_OUT / 2.0);
        assert!((text - 0.5).abs() < 1e-5);
        assert_eq!(text, bg);
        assert_eq!(card_alpha(TOTAL + 1.0), (0.0, 0.0));
    }
}
