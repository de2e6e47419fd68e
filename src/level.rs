// Listening level: pick a zone on the picture, then the recording that names it.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use strum::IntoEnumIterator;

use crate::audio::play_clip;
use crate::config::GameConfig;
use crate::content::ListenLevel;
use crate::mascot::{ActiveGuide, GuideHighlight};
use crate::matching::{MatchBoard, Pulse, Selection};
use crate::screens::{LevelId, Screens, SessionProgress, in_any_level};
use crate::tutorial::GuideTarget;
use crate::ui::{BACKDROP, HOVERED_BUTTON, NORMAL_BUTTON, PRESSED_BUTTON, spawn_button};

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        for level in LevelId::iter() {
            app.add_systems(OnEnter(Screens::Level(level)), setup_level)
                .add_systems(OnExit(Screens::Level(level)), exit_level);
        }
        app.add_systems(
            Update,
            (zone_presses, item_presses, level_navigation, refresh_level)
                .chain()
                .run_if(in_any_level)
                .run_if(resource_exists::<ActiveLevel>),
        );
    }
}

const SPEAKER_PATH: &str = "images/audio.png";
const PULSE_PERIOD: f32 = 1.6;
const PULSE_GROWTH: f32 = 0.1;
const RESOLVED_ITEM: Color = Color::srgba(0.33, 0.22, 0.12, 0.5);

#[derive(Resource)]
struct ActiveLevel {
    level: &'static ListenLevel,
    board: MatchBoard,
}

#[derive(Component)]
struct ZoneButton {
    id: &'static str,
    color: Color,
}

#[derive(Component)]
struct ZoneIcon(&'static str);

#[derive(Component)]
struct ItemButton(&'static str);

#[derive(Component)]
enum LevelButton {
    Back,
    Next,
}

#[derive(Component)]
struct NextSlot;

fn setup_level(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    state: Res<State<Screens>>,
    config: Res<GameConfig>,
) {
    let Screens::Level(id) = *state.get() else {
        return;
    };
    let level = id.level();
    let screen = Screens::Level(id);
    info!("Entering {id} with {} zones", level.zones.len());

    commands.insert_resource(ActiveLevel {
        level,
        board: level.board(),
    });

    let mut items = level.items.to_vec();
    if config.shuffle_items {
        items.shuffle(&mut rand::rng());
    }
    let speaker: Handle<Image> = asset_server.load(SPEAKER_PATH);

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(16.0)),
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(BACKDROP),
            DespawnOnExit(screen),
        ))
        .with_children(|parent| {
            parent
                .spawn(Node {
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::SpaceBetween,
                    ..default()
                })
                .with_children(|row| {
                    spawn_button(row, "Volver", 120.0, LevelButton::Back);
                    row.spawn((NextSlot, Node::default(), Visibility::Hidden))
                        .with_children(|slot| {
                            spawn_button(slot, "Siguiente", 160.0, LevelButton::Next);
                        });
                });

            // Picture with the coloured zones laid over it.
            parent
                .spawn((
                    ImageNode::new(asset_server.load(level.background)),
                    Node {
                        width: Val::Percent(80.0),
                        flex_grow: 1.0,
                        ..default()
                    },
                ))
                .with_children(|picture| {
                    for layout in level.zones {
                        picture
                            .spawn((
                                ZoneButton {
                                    id: layout.zone.id,
                                    color: layout.color,
                                },
                                GuideHighlight(GuideTarget::Zones),
                                Outline::new(Val::Px(4.0), Val::Px(2.0), Color::NONE),
                                Button,
                                Node {
                                    position_type: PositionType::Absolute,
                                    left: Val::Percent(layout.left),
                                    top: Val::Percent(layout.top),
                                    width: Val::Percent(layout.width),
                                    height: Val::Percent(layout.height),
                                    border: UiRect::all(Val::Px(3.0)),
                                    justify_content: JustifyContent::Center,
                                    align_items: AlignItems::Center,
                                    ..default()
                                },
                                BorderColor::all(layout.color),
                                BackgroundColor(Color::NONE),
                                ZIndex(5),
                            ))
                            .with_children(|zone| {
                                zone.spawn((
                                    ZoneIcon(layout.zone.id),
                                    ImageNode::new(speaker.clone()),
                                    Node {
                                        width: Val::Percent(70.0),
                                        height: Val::Percent(70.0),
                                        ..default()
                                    },
                                    Visibility::Hidden,
                                ));
                            });
                    }
                });

            // Recordings, in presentation order.
            parent
                .spawn(Node {
                    flex_wrap: FlexWrap::Wrap,
                    justify_content: JustifyContent::Center,
                    column_gap: Val::Px(16.0),
                    row_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|row| {
                    for (index, item) in items.iter().enumerate() {
                        row.spawn((
                            ItemButton(item.key),
                            GuideHighlight(GuideTarget::AudioItems),
                            Outline::new(Val::Px(4.0), Val::Px(2.0), Color::NONE),
                            Button,
                            Node {
                                width: Val::Px(120.0),
                                height: Val::Px(50.0),
                                justify_content: JustifyContent::Center,
                                align_items: AlignItems::Center,
                                column_gap: Val::Px(6.0),
                                border: UiRect::all(Val::Px(2.0)),
                                ..default()
                            },
                            BorderColor::all(Color::BLACK),
                            BackgroundColor(NORMAL_BUTTON),
                        ))
                        .with_children(|button| {
                            button.spawn((
                                ImageNode::new(speaker.clone()),
                                Node {
                                    width: Val::Px(28.0),
                                    height: Val::Px(28.0),
                                    ..default()
                                },
                            ));
                            button.spawn((
                                Text::new((index + 1).to_string()),
                                TextFont {
                                    font_size: 20.0,
                                    ..default()
                                },
                                TextColor(Color::WHITE),
                            ));
                        });
                    }
                });
        });
}

fn exit_level(mut commands: Commands) {
    commands.remove_resource::<ActiveLevel>();
}

fn zone_presses(
    query: Query<(&Interaction, &ZoneButton), Changed<Interaction>>,
    mut active: ResMut<ActiveLevel>,
    mut guide: Option<ResMut<ActiveGuide>>,
    mut progress: ResMut<SessionProgress>,
) {
    for (interaction, zone) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let response = active.board.select_zone(zone.id);
        if response.selection == Selection::Ignored {
            continue;
        }
        if let Some(guide) = guide.as_mut() {
            guide.trigger(GuideTarget::Zones);
        }
        record_outcome(&active, response.selection, response.completed, &mut progress);
    }
}

fn item_presses(
    query: Query<(&Interaction, &ItemButton), Changed<Interaction>>,
    mut active: ResMut<ActiveLevel>,
    mut guide: Option<ResMut<ActiveGuide>>,
    mut progress: ResMut<SessionProgress>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
) {
    for (interaction, item) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let response = active.board.select_item(item.0);
        if response.selection == Selection::Ignored {
            continue;
        }
        if let Some(clip) = response.play {
            play_clip(&mut commands, &asset_server, clip);
        }
        if let Some(guide) = guide.as_mut() {
            guide.trigger(GuideTarget::AudioItems);
        }
        record_outcome(&active, response.selection, response.completed, &mut progress);
    }
}

fn record_outcome(
    active: &ActiveLevel,
    selection: Selection,
    completed: bool,
    progress: &mut SessionProgress,
) {
    if let Selection::Confirmed { zone } = selection {
        info!(
            "Matched {zone} ({}/{})",
            active.board.resolved_count(),
            active.board.zones().len()
        );
    }
    if completed {
        info!("{} complete", active.level.id);
        progress.completed.insert(active.level.id);
    }
}

fn level_navigation(
    query: Query<(&Interaction, &LevelButton), Changed<Interaction>>,
    active: Res<ActiveLevel>,
    mut next_state: ResMut<NextState<Screens>>,
) {
    for (interaction, button) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            LevelButton::Back => next_state.set(Screens::LevelMap),
            // The button is only visible once every zone is resolved.
            LevelButton::Next if active.board.can_continue() => {
                next_state.set(active.level.next);
            }
            LevelButton::Next => {}
        }
    }
}

fn refresh_level(
    time: Res<Time>,
    active: Res<ActiveLevel>,
    mut zones: Query<
        (&ZoneButton, &mut UiTransform, &mut BackgroundColor, &mut BorderColor),
        Without<ItemButton>,
    >,
    mut icons: Query<(&ZoneIcon, &mut Visibility), Without<NextSlot>>,
    mut items: Query<
        (&ItemButton, &Interaction, &mut BackgroundColor, &mut BorderColor),
        Without<ZoneButton>,
    >,
    mut next_slot: Query<&mut Visibility, (With<NextSlot>, Without<ZoneIcon>)>,
) {
    let board = &active.board;
    let wave = (time.elapsed_secs() * std::f32::consts::TAU / PULSE_PERIOD).sin() * 0.5 + 0.5;

    let selected_zone = board.selected_zone().map(|zone| zone.id);
    for (zone, mut transform, mut bg, mut border) in &mut zones {
        let scale = match board.pulse(zone.id) {
            Pulse::Pulsing => 1.0 + PULSE_GROWTH * wave,
            Pulse::Idle => 1.0,
        };
        transform.scale = Vec2::splat(scale);
        bg.0 = if board.is_zone_resolved(zone.id) {
            zone.color.with_alpha(0.3)
        } else {
            Color::NONE
        };
        *border = BorderColor::all(if selected_zone == Some(zone.id) {
            Color::WHITE
        } else {
            zone.color
        });
    }

    for (icon, mut visibility) in &mut icons {
        *visibility = if board.is_zone_resolved(icon.0) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    let selected = board.selected_item().map(|item| item.key);
    for (item, interaction, mut bg, mut border) in &mut items {
        let resolved = board.is_item_resolved(item.0);
        bg.0 = if resolved {
            RESOLVED_ITEM
        } else if selected == Some(item.0) {
            PRESSED_BUTTON
        } else if *interaction == Interaction::Hovered {
            HOVERED_BUTTON
        } else {
            NORMAL_BUTTON
        };
        *border = BorderColor::all(if selected == Some(item.0) {
            Color::WHITE
        } else {
            Color::BLACK
        });
    }

    if let Ok(mut visibility) = next_slot.single_mut() {
        *visibility = if board.can_continue() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
