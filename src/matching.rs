// Two-sided matching of zones against audio items for the listening levels.

/// A target position on the level picture waiting for its word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    pub id: &'static str,
    pub match_key: &'static str,
}

/// A selectable word, identified by its key, with the clip it plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub key: &'static str,
    pub audio: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pulse {
    #[default]
    Idle,
    Pulsing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Unknown or already resolved entity; nothing changed.
    Ignored,
    Changed,
    Confirmed { zone: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    pub selection: Selection,
    /// Clip to play as a side effect of the press.
    pub play: Option<&'static str>,
    /// True only on the press that resolved the last zone.
    pub completed: bool,
}

impl Response {
    const IGNORED: Self = Self {
        selection: Selection::Ignored,
        play: None,
        completed: false,
    };
}

/// Matching state for one level instance.
#[derive(Debug, Clone)]
pub struct MatchBoard {
    zones: Vec<Zone>,
    items: Vec<Item>,
    selected_zone: Option<usize>,
    selected_item: Option<usize>,
    resolved: Vec<bool>,
    pulses: Vec<Pulse>,
    complete: bool,
}

impl MatchBoard {
    pub fn new(zones: impl IntoIterator<Item = Zone>, items: impl IntoIterator<Item = Item>) -> Self {
        let zones: Vec<Zone> = zones.into_iter().collect();
        let items = items.into_iter().collect();
        Self {
            resolved: vec![false; zones.len()],
            pulses: vec![Pulse::Idle; zones.len()],
            complete: zones.is_empty(),
            zones,
            items,
            selected_zone: None,
            selected_item: None,
        }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn selected_zone(&self) -> Option<&Zone> {
        self.selected_zone.map(|index| &self.zones[index])
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected_item.map(|index| &self.items[index])
    }

    pub fn is_zone_resolved(&self, id: &str) -> bool {
        self.zone_index(id).is_some_and(|index| self.resolved[index])
    }

    /// An item is locked once a zone expecting its key has been resolved.
    pub fn is_item_resolved(&self, key: &str) -> bool {
        self.zones
            .iter()
            .zip(&self.resolved)
            .any(|(zone, resolved)| *resolved && zone.match_key == key)
    }

    pub fn pulse(&self, id: &str) -> Pulse {
        self.zone_index(id)
            .map_or(Pulse::Idle, |index| self.pulses[index])
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.iter().filter(|resolved| **resolved).count()
    }

    pub fn can_continue(&self) -> bool {
        self.complete
    }

    pub fn select_zone(&mut self, id: &str) -> Response {
        let Some(index) = self.zone_index(id) else {
            return Response::IGNORED;
        };
        if self.resolved[index] {
            return Response::IGNORED;
        }

        if self.selected_zone == Some(index) {
            self.selected_zone = None;
            self.pulses[index] = Pulse::Idle;
            return self.changed(None);
        }

        if let Some(previous) = self.selected_zone {
            self.pulses[previous] = Pulse::Idle;
        }
        self.selected_zone = Some(index);
        self.pulses[index] = Pulse::Pulsing;
        self.try_confirm(None)
    }

    pub fn select_item(&mut self, key: &str) -> Response {
        let Some(index) = self.items.iter().position(|item| item.key == key) else {
            return Response::IGNORED;
        };
        if self.is_item_resolved(key) {
            return Response::IGNORED;
        }

        let play = Some(self.items[index].audio);
        if self.selected_item == Some(index) {
            self.selected_item = None;
            return self.changed(play);
        }

        self.selected_item = Some(index);
        self.try_confirm(play)
    }

    fn zone_index(&self, id: &str) -> Option<usize> {
        self.zones.iter().position(|zone| zone.id == id)
    }

    fn changed(&self, play: Option<&'static str>) -> Response {
        Response {
            selection: Selection::Changed,
            play,
            completed: false,
        }
    }

    fn try_confirm(&mut self, play: Option<&'static str>) -> Response {
        let (Some(zone), Some(item)) = (self.selected_zone, self.selected_item) else {
            return self.changed(play);
        };
        if self.items[item].key != self.zones[zone].match_key {
            return self.changed(play);
        }

        self.resolved[zone] = true;
        self.pulses[zone] = Pulse::Idle;
        self.selected_zone = None;
        self.selected_item = None;

        let completed = !self.complete && self.resolved.iter().all(|resolved| *resolved);
        self.complete |= completed;

        Response {
            selection: Selection::Confirmed {
                zone: self.zones[zone].id,
            },
            play,
            completed,
        }
    }
}
