// Tuki the toucan: renders the tutorial sequence of whichever screen is focused.
use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task, block_on, futures_lite::future};
use std::collections::HashMap;
use strum::IntoEnumIterator;

use crate::content::{HOME_GUIDE, LEVEL_MAP_GUIDE, LISTEN_LEVEL_GUIDE};
use crate::prefs::{GuidePreference, Preferences, load_guide_preference};
use crate::screens::{LevelId, Screens};
use crate::tutorial::{GuideTarget, GuideVariant, GuideVisuals, Reconcile, TutorialState};
use crate::ui::INK;

pub struct MascotPlugin;

impl Plugin for MascotPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GuideMemory>().add_systems(
            Update,
            (
                poll_preference
                    .run_if(resource_exists::<PendingPreference>)
                    .run_if(resource_exists::<ActiveGuide>),
                mascot_press,
                animate_mascot,
                pulse_highlights,
            )
                .chain(),
        );

        guide_screen(app, Screens::Home, HOME_GUIDE);
        guide_screen(app, Screens::LevelMap, LEVEL_MAP_GUIDE);
        for level in LevelId::iter() {
            guide_screen(app, Screens::Level(level), LISTEN_LEVEL_GUIDE);
        }
    }
}

const MASCOT_PATH: &str = "images/toucan_happy.png";
const MOVE_RATE: f32 = 3.0;
const HINT: &str = "Tócame para continuar";
const BUBBLE_BORDER: Color = Color::srgb(1.0, 0.84, 0.0);
const HINT_COLOR: Color = Color::srgb(0.53, 0.53, 0.53);

/// Guide of the focused screen.
#[derive(Resource)]
pub struct ActiveGuide {
    pub variant: GuideVariant,
    pub state: TutorialState,
    screen: Screens,
}

impl ActiveGuide {
    /// Forwards a press on `target` to the sequencer.
    pub fn trigger(&mut self, target: GuideTarget) -> bool {
        let advanced = self.state.trigger(&self.variant.script, target);
        if advanced {
            info!(
                "Tutorial on {:?} advanced to step {} by {target}",
                self.screen,
                self.state.step()
            );
        }
        advanced
    }
}

/// Steps kept for screens that survive losing focus.
#[derive(Resource, Default)]
struct GuideMemory(HashMap<Screens, TutorialState>);

#[derive(Resource)]
struct PendingPreference(Task<GuidePreference>);

/// Control that pulses while the guide points at `0`.
#[derive(Component)]
pub struct GuideHighlight(pub GuideTarget);

#[derive(Component)]
struct Mascot {
    visuals: GuideVisuals,
    position: Vec2,
    shown_step: Option<u8>,
}

#[derive(Component)]
struct MascotButton;

#[derive(Component)]
struct Bubble;

#[derive(Component)]
struct BubbleText;

#[derive(Component)]
struct BubbleHint;

fn guide_screen(app: &mut App, screen: Screens, variant: GuideVariant) {
    track_guide(app, screen, variant);
    app.add_systems(
        OnEnter(screen),
        move |mut commands: Commands, asset_server: Res<AssetServer>| {
            spawn_mascot(&mut commands, &asset_server, screen, variant.rest_anchor);
        },
    );
}

/// Owns the `ActiveGuide` of `screen` while it has focus.
fn track_guide(app: &mut App, screen: Screens, variant: GuideVariant) {
    app.add_systems(
        OnEnter(screen),
        move |mut commands: Commands, memory: Res<GuideMemory>, prefs: Res<Preferences>| {
            let state = if variant.retain_on_refocus {
                memory.0.get(&screen).copied().unwrap_or_default()
            } else {
                TutorialState::default()
            };
            commands.insert_resource(ActiveGuide {
                variant,
                state,
                screen,
            });

            // Rendering starts with the preference unknown; it is reconciled once read.
            let store = prefs.0.clone();
            let task = IoTaskPool::get().spawn(async move { load_guide_preference(store.as_ref()) });
            commands.insert_resource(PendingPreference(task));
        },
    )
    .add_systems(OnExit(screen), end_guide);
}

fn end_guide(
    mut commands: Commands,
    guide: Option<Res<ActiveGuide>>,
    mut memory: ResMut<GuideMemory>,
) {
    if let Some(guide) = guide {
        if guide.variant.retain_on_refocus {
            memory.0.insert(guide.screen, guide.state);
        }
    }
    commands.remove_resource::<ActiveGuide>();
    commands.remove_resource::<PendingPreference>();
}

fn spawn_mascot(
    commands: &mut Commands,
    asset_server: &AssetServer,
    screen: Screens,
    anchor: [f32; 2],
) {
    commands
        .spawn((
            Mascot {
                visuals: GuideVisuals::REST,
                position: Vec2::from_array(anchor),
                shown_step: None,
            },
            DespawnOnExit(screen),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(anchor[0]),
                top: Val::Percent(anchor[1]),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(8.0),
                ..default()
            },
            Visibility::Hidden,
            GlobalZIndex(150),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Bubble,
                    Node {
                        width: Val::Px(300.0),
                        min_height: Val::Px(60.0),
                        padding: UiRect::all(Val::Px(10.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(Color::NONE),
                    BorderColor::all(Color::NONE),
                ))
                .with_children(|bubble| {
                    bubble.spawn((
                        BubbleText,
                        Text::new(""),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::NONE),
                    ));
                    bubble.spawn((
                        BubbleHint,
                        Text::new(HINT),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(Color::NONE),
                        Visibility::Hidden,
                    ));
                });

            parent.spawn((
                MascotButton,
                Button,
                ImageNode::new(asset_server.load(MASCOT_PATH)),
                Node {
                    width: Val::Px(140.0),
                    height: Val::Px(140.0),
                    ..default()
                },
            ));
        });
}

fn poll_preference(
    mut commands: Commands,
    mut pending: ResMut<PendingPreference>,
    mut guide: ResMut<ActiveGuide>,
    mut mascots: Query<&mut Mascot>,
) {
    let Some(preference) = block_on(future::poll_once(&mut pending.0)) else {
        return;
    };
    commands.remove_resource::<PendingPreference>();

    let auto_start = !guide.variant.honours_completion || preference.first_time;
    let screen = guide.screen;
    match guide.state.observe_preference(preference.enabled, auto_start) {
        Reconcile::Started => info!("Starting tutorial on {screen:?}"),
        Reconcile::Stopped => {
            info!("Guide disabled, tutorial on {screen:?} reset");
            for mut mascot in &mut mascots {
                mascot.visuals.clear();
            }
        }
        Reconcile::Unchanged => debug!(
            "Guide preference on {screen:?}: enabled={}, step={}",
            preference.enabled,
            guide.state.step()
        ),
    }
}

fn mascot_press(
    query: Query<&Interaction, (Changed<Interaction>, With<MascotButton>)>,
    guide: Option<ResMut<ActiveGuide>>,
) {
    let Some(mut guide) = guide else {
        return;
    };
    if guide.state.enabled() != Some(true) {
        return;
    }
    for interaction in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let script = guide.variant.script;
        let step = guide.state.mascot_tap(&script);
        info!("Mascot tapped on {:?}, tutorial step {step}", guide.screen);
    }
}

fn animate_mascot(
    time: Res<Time>,
    guide: Option<Res<ActiveGuide>>,
    mut mascots: Query<(&mut Mascot, &mut Node, &mut UiTransform, &mut Visibility)>,
    mut bubbles: Query<(&mut BackgroundColor, &mut BorderColor), With<Bubble>>,
    mut texts: Query<(&mut Text, &mut TextColor), (With<BubbleText>, Without<BubbleHint>)>,
    mut hints: Query<
        (&mut Visibility, &mut TextColor),
        (With<BubbleHint>, Without<BubbleText>, Without<Mascot>),
    >,
) {
    let Some(guide) = guide else {
        return;
    };
    let script = guide.variant.script;
    let step = guide.state.step();
    let entry = script.entry(step);
    let visible = guide.state.enabled() == Some(true);
    let dt = time.delta_secs();

    for (mut mascot, mut node, mut transform, mut visibility) in &mut mascots {
        if mascot.shown_step != Some(step) {
            mascot.shown_step = Some(step);
            mascot.visuals.restart_step();
            for (mut text, _) in &mut texts {
                **text = script.message(step).to_string();
            }
            for (mut hint_visibility, _) in &mut hints {
                *hint_visibility = if step > 0 && step <= script.final_step() {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            }
        }

        mascot.visuals.tick(dt, visible, entry);

        let anchor = entry.map_or(guide.variant.rest_anchor, |entry| entry.anchor);
        let target = Vec2::from_array(anchor);
        mascot.position = mascot.position.lerp(target, (dt * MOVE_RATE).min(1.0));
        node.left = Val::Percent(mascot.position.x);
        node.top = Val::Percent(mascot.position.y);
        transform.scale = Vec2::splat(mascot.visuals.scale);

        *visibility = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };

        let alpha = mascot.visuals.bubble_opacity;
        for (mut bg, mut border) in &mut bubbles {
            bg.0 = Color::srgba(1.0, 1.0, 1.0, alpha);
            *border = BorderColor::all(BUBBLE_BORDER.with_alpha(alpha));
        }
        for (_, mut color) in &mut texts {
            color.0 = INK.with_alpha(alpha);
        }
        for (_, mut color) in &mut hints {
            color.0 = HINT_COLOR.with_alpha(alpha);
        }
    }
}

fn pulse_highlights(
    guide: Option<Res<ActiveGuide>>,
    mascots: Query<&Mascot>,
    mut controls: Query<(&GuideHighlight, &mut Outline)>,
) {
    let target = guide
        .as_ref()
        .and_then(|guide| guide.variant.script.entry(guide.state.step()))
        .map(|entry| entry.target);
    let strength = mascots
        .iter()
        .next()
        .map_or(0.0, |mascot| mascot.visuals.highlight);

    for (highlight, mut outline) in &mut controls {
        let alpha = if Some(highlight.0) == target {
            strength * 0.6
        } else {
            0.0
        };
        outline.color = Color::srgba(1.0, 1.0, 0.0, alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{GUIDE_ENABLED_KEY, MemoryStore, TUTORIAL_COMPLETED_KEY};
    use bevy::state::app::StatesPlugin;
    use std::sync::Arc;
    use std::time::Duration;

    fn guide_app(values: &[(&'static str, &'static str)]) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(Preferences(Arc::new(MemoryStore::with_values(
                values.iter().copied(),
            ))))
            .init_resource::<GuideMemory>()
            .init_state::<Screens>()
            .add_systems(
                Update,
                poll_preference
                    .run_if(resource_exists::<PendingPreference>)
                    .run_if(resource_exists::<ActiveGuide>),
            );
        track_guide(&mut app, Screens::Home, HOME_GUIDE);
        track_guide(&mut app, Screens::LevelMap, LEVEL_MAP_GUIDE);
        app
    }

    /// Runs frames until the focused screen has folded in its preference read.
    fn settle(app: &mut App) {
        app.update();
        for _ in 0..500 {
            if !app.world().contains_resource::<PendingPreference>() {
                return;
            }
            std::thread::sleep(Duration::from_millis(2));
            app.update();
        }
        panic!("preference read never completed");
    }

    fn go(app: &mut App, screen: Screens) {
        app.world_mut()
            .resource_mut::<NextState<Screens>>()
            .set(screen);
        settle(app);
    }

    fn state(app: &App) -> TutorialState {
        app.world().resource::<ActiveGuide>().state
    }

    fn tap(app: &mut App) {
        let mut guide = app.world_mut().resource_mut::<ActiveGuide>();
        let script = guide.variant.script;
        guide.state.mascot_tap(&script);
    }

    fn write(app: &App, key: &str, value: &str) {
        app.world()
            .resource::<Preferences>()
            .0
            .set(key, value)
            .expect("memory store accepts writes");
    }

    #[test]
    fn home_resumes_and_follows_the_setting_across_refocus() {
        let mut app = guide_app(&[]);
        let mascot = app
            .world_mut()
            .spawn(Mascot {
                visuals: GuideVisuals::REST,
                position: Vec2::ZERO,
                shown_step: None,
            })
            .id();

        settle(&mut app);
        assert_eq!(state(&app).step(), 1);
        tap(&mut app);
        assert_eq!(state(&app).step(), 2);

        go(&mut app, Screens::Settings);
        assert!(!app.world().contains_resource::<ActiveGuide>());
        go(&mut app, Screens::Home);
        assert_eq!(state(&app).step(), 2);

        // Switched off while away: the running tour is dropped on return.
        go(&mut app, Screens::Settings);
        write(&app, GUIDE_ENABLED_KEY, "false");
        app.world_mut()
            .get_mut::<Mascot>(mascot)
            .expect("mascot exists")
            .visuals
            .tick(1.0, true, None);
        go(&mut app, Screens::Home);
        assert_eq!(state(&app).step(), 0);
        assert_eq!(state(&app).enabled(), Some(false));
        let visuals = app
            .world()
            .get::<Mascot>(mascot)
            .expect("mascot exists")
            .visuals;
        assert_eq!(visuals, GuideVisuals::REST);

        // Switched back on: the tour starts again from the greeting.
        go(&mut app, Screens::Settings);
        write(&app, GUIDE_ENABLED_KEY, "true");
        go(&mut app, Screens::Home);
        assert_eq!(state(&app).step(), 1);
        assert_eq!(state(&app).enabled(), Some(true));
    }

    #[test]
    fn level_map_starts_fresh_on_every_visit() {
        let mut app = guide_app(&[]);
        settle(&mut app);

        go(&mut app, Screens::LevelMap);
        assert_eq!(state(&app).step(), 1);
        tap(&mut app);
        tap(&mut app);
        assert_eq!(state(&app).step(), 3);

        go(&mut app, Screens::Home);
        go(&mut app, Screens::LevelMap);
        assert_eq!(state(&app).step(), 1);
    }

    #[test]
    fn finished_tutorial_keeps_level_map_idle() {
        let mut app = guide_app(&[(TUTORIAL_COMPLETED_KEY, "true")]);
        settle(&mut app);
        // Home does not look at the completion flag.
        assert_eq!(state(&app).step(), 1);

        go(&mut app, Screens::LevelMap);
        assert_eq!(state(&app).step(), 0);
        assert_eq!(state(&app).enabled(), Some(true));

        // Still reachable by tapping the mascot.
        tap(&mut app);
        assert_eq!(state(&app).step(), 1);
    }

    #[test]
    fn disabled_guide_never_starts() {
        let mut app = guide_app(&[(GUIDE_ENABLED_KEY, "false")]);
        settle(&mut app);
        assert_eq!(state(&app).step(), 0);
        assert_eq!(state(&app).enabled(), Some(false));

        go(&mut app, Screens::LevelMap);
        assert_eq!(state(&app).step(), 0);
    }
}
