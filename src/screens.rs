/// Screens and the progress shared between them.
use bevy::prelude::*;
use std::collections::HashSet;
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum Screens {
    #[default]
    Home,
    Settings,
    LevelMap,
    ListenGuide,
    Level(LevelId),
}

/// Listening levels shipped with the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display, EnumIter)]
pub enum LevelId {
    #[strum(to_string = "Nivel 1")]
    One,
    #[strum(to_string = "Nivel 3")]
    Three,
}

/// Levels finished during this session, shown as ticks on the level map.
#[derive(Resource, Default)]
pub struct SessionProgress {
    pub completed: HashSet<LevelId>,
}

/// Run condition for systems shared by every level screen.
pub fn in_any_level(state: Res<State<Screens>>) -> bool {
    matches!(state.get(), Screens::Level(_))
}
