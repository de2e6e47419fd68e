// Tutorial sequencer for the toucan guide.
//
// Pure state: no Bevy types live here so the rules can be exercised without an app.
use strum::{Display, EnumIter};

/// Interaction points the guide can point at or rest on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum GuideTarget {
    Greeting,
    PlayButton,
    SettingsButton,
    InfoButtons,
    LevelButtons,
    BackButton,
    Zones,
    AudioItems,
    Resting,
}

impl GuideTarget {
    /// Whether the target is a control the learner can press (and that pulses).
    pub fn is_control(self) -> bool {
        !matches!(self, GuideTarget::Greeting | GuideTarget::Resting)
    }
}

/// One entry of a tutorial script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    pub step: u8,
    pub target: GuideTarget,
    pub message: &'static str,
    /// Where the mascot stands during this step, in percent of the screen.
    pub anchor: [f32; 2],
}

/// Ordered list of steps for one screen. Step numbers start at 1.
#[derive(Debug, Clone, Copy)]
pub struct TutorialScript(pub &'static [ScriptStep]);

impl TutorialScript {
    pub fn final_step(&self) -> u8 {
        self.0.iter().map(|entry| entry.step).max().unwrap_or(0)
    }

    pub fn entry(&self, step: u8) -> Option<&'static ScriptStep> {
        self.0.iter().find(|entry| entry.step == step)
    }

    /// Step at which pressing `target` moves the tour forward.
    pub fn designated_step(&self, target: GuideTarget) -> Option<u8> {
        if !target.is_control() {
            return None;
        }
        self.0
            .iter()
            .find(|entry| entry.target == target)
            .map(|entry| entry.step)
    }

    pub fn message(&self, step: u8) -> &'static str {
        self.entry(step).map_or("", |entry| entry.message)
    }
}

/// Per-screen configuration of the guide.
#[derive(Debug, Clone, Copy)]
pub struct GuideVariant {
    pub script: TutorialScript,
    /// Keep the step when the screen loses focus and re-check the preference on return.
    pub retain_on_refocus: bool,
    /// Skip the automatic start for learners who already finished the tutorial.
    pub honours_completion: bool,
    pub rest_anchor: [f32; 2],
}

/// What a preference observation did to the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    Started,
    Stopped,
    Unchanged,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TutorialState {
    step: u8,
    enabled: Option<bool>,
}

impl TutorialState {
    pub fn step(&self) -> u8 {
        self.step
    }

    /// `None` until the preference has been read at least once.
    pub fn enabled(&self) -> Option<bool> {
        self.enabled
    }

    /// Moves one step forward, wrapping to 0 past the final step.
    pub fn advance(&mut self, script: &TutorialScript) -> u8 {
        let next = self.step.saturating_add(1);
        self.step = if next > script.final_step() { 0 } else { next };
        self.step
    }

    /// Starts the tour. Only valid while inactive.
    pub fn start(&mut self) -> bool {
        if self.step != 0 {
            return false;
        }
        self.step = 1;
        true
    }

    pub fn reset(&mut self) {
        self.step = 0;
    }

    /// A press on `target`. Advances only when the tour is waiting on that target.
    pub fn trigger(&mut self, script: &TutorialScript, target: GuideTarget) -> bool {
        match script.designated_step(target) {
            Some(step) if step == self.step && self.step > 0 => {
                self.advance(script);
                true
            }
            _ => false,
        }
    }

    /// A press on the mascot always advances, healing an out-of-range step first.
    pub fn mascot_tap(&mut self, script: &TutorialScript) -> u8 {
        if self.step > script.final_step() {
            self.reset();
        }
        self.advance(script)
    }

    /// Folds a freshly read `enabled` preference into the state.
    ///
    /// The tour starts automatically only when it is idle, allowed, and this is either the
    /// first observation or the guide was just switched back on.
    pub fn observe_preference(&mut self, enabled: bool, auto_start_allowed: bool) -> Reconcile {
        let previous = self.enabled.replace(enabled);
        if enabled
            && auto_start_allowed
            && self.step == 0
            && matches!(previous, None | Some(false))
        {
            self.start();
            return Reconcile::Started;
        }
        if !enabled && self.step > 0 {
            self.reset();
            return Reconcile::Stopped;
        }
        Reconcile::Unchanged
    }

    #[cfg(test)]
    fn at_step(step: u8) -> Self {
        Self {
            step,
            enabled: Some(true),
        }
    }
}

const ENTER_SECS: f32 = 0.8;
const BUBBLE_DELAY: f32 = 0.8;
const BUBBLE_FADE: f32 = 0.5;
const PULSE_PERIOD: f32 = 1.6;
const PULSE_REPEATS: f32 = 3.0;
const PULSE_FLOOR: f32 = 0.2;

/// Transient animation values for the mascot, decoupled from any renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideVisuals {
    pub scale: f32,
    pub bubble_opacity: f32,
    pub highlight: f32,
    step_elapsed: f32,
}

impl GuideVisuals {
    pub const REST: Self = Self {
        scale: 0.0,
        bubble_opacity: 0.0,
        highlight: 0.0,
        step_elapsed: 0.0,
    };

    pub fn clear(&mut self) {
        *self = Self::REST;
    }

    /// Called whenever the step changes; keeps the mascot size.
    pub fn restart_step(&mut self) {
        self.bubble_opacity = 0.0;
        self.highlight = 0.0;
        self.step_elapsed = 0.0;
    }

    pub fn tick(&mut self, dt: f32, visible: bool, entry: Option<&ScriptStep>) {
        if !visible {
            self.clear();
            return;
        }
        self.scale = (self.scale + dt / ENTER_SECS).min(1.0);
        self.step_elapsed += dt;

        let Some(entry) = entry else {
            self.bubble_opacity = 0.0;
            self.highlight = 0.0;
            return;
        };

        self.bubble_opacity = ((self.step_elapsed - BUBBLE_DELAY) / BUBBLE_FADE).clamp(0.0, 1.0);

        self.highlight = if entry.target.is_control()
            && self.step_elapsed < PULSE_PERIOD * PULSE_REPEATS
        {
            // Triangle wave between the floor and full strength.
            let phase = (self.step_elapsed / PULSE_PERIOD).fract();
            let wave = 1.0 - (phase * 2.0 - 1.0).abs();
            PULSE_FLOOR + (1.0 - PULSE_FLOOR) * wave
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: TutorialScript = TutorialScript(&[
        ScriptStep {
            step: 1,
            target: GuideTarget::Greeting,
            message: "hello",
            anchor: [70.0, 15.0],
        },
        ScriptStep {
            step: 2,
            target: GuideTarget::PlayButton,
            message: "press play",
            anchor: [35.0, 30.0],
        },
        ScriptStep {
            step: 3,
            target: GuideTarget::InfoButtons,
            message: "read the info",
            anchor: [50.0, 70.0],
        },
        ScriptStep {
            step: 4,
            target: GuideTarget::Resting,
            message: "bye",
            anchor: [70.0, 15.0],
        },
    ]);

    #[test]
    fn advance_counts_up_then_wraps() {
        let mut state = TutorialState::default();
        for expected in 1..=4 {
            assert_eq!(state.advance(&SCRIPT), expected);
        }
        assert_eq!(state.advance(&SCRIPT), 0);
        assert_eq!(state.advance(&SCRIPT), 1);
    }

    #[test]
    fn start_only_from_idle() {
        let mut state = TutorialState::default();
        assert!(state.start());
        assert_eq!(state.step(), 1);

        state.advance(&SCRIPT);
        let before = state;
        assert!(!state.start());
        assert_eq!(state, before);
    }

    #[test]
    fn trigger_needs_matching_step() {
        let mut state = TutorialState::default();
        assert!(!state.trigger(&SCRIPT, GuideTarget::PlayButton));
        assert_eq!(state.step(), 0);

        state.start();
        assert!(!state.trigger(&SCRIPT, GuideTarget::PlayButton));
        assert_eq!(state.step(), 1);

        state.advance(&SCRIPT);
        assert!(!state.trigger(&SCRIPT, GuideTarget::InfoButtons));
        assert!(state.trigger(&SCRIPT, GuideTarget::PlayButton));
        assert_eq!(state.step(), 3);
        assert!(state.trigger(&SCRIPT, GuideTarget::InfoButtons));
        assert_eq!(state.step(), 4);
    }

    #[test]
    fn non_controls_never_trigger() {
        let mut state = TutorialState::at_step(1);
        assert!(!state.trigger(&SCRIPT, GuideTarget::Greeting));
        assert_eq!(SCRIPT.designated_step(GuideTarget::Resting), None);
        assert_eq!(SCRIPT.designated_step(GuideTarget::SettingsButton), None);
    }

    #[test]
    fn mascot_tap_heals_out_of_range_step() {
        let mut state = TutorialState::at_step(9);
        assert_eq!(state.mascot_tap(&SCRIPT), 1);

        let mut state = TutorialState::at_step(4);
        assert_eq!(state.mascot_tap(&SCRIPT), 0);

        let mut state = TutorialState::default();
        assert_eq!(state.mascot_tap(&SCRIPT), 1);
    }

    #[test]
    fn auto_start_fires_once_per_enablement() {
        let mut state = TutorialState::default();
        assert_eq!(state.enabled(), None);

        assert_eq!(state.observe_preference(true, true), Reconcile::Started);
        assert_eq!(state.step(), 1);

        // Focus checks re-run while the tour is on step 1.
        for _ in 0..3 {
            assert_eq!(state.observe_preference(true, true), Reconcile::Unchanged);
            assert_eq!(state.step(), 1);
        }
    }

    #[test]
    fn finished_tour_does_not_restart_on_refocus() {
        let mut state = TutorialState::default();
        state.observe_preference(true, true);
        while state.advance(&SCRIPT) != 0 {}
        assert_eq!(state.observe_preference(true, true), Reconcile::Unchanged);
        assert_eq!(state.step(), 0);
    }

    #[test]
    fn disabling_stops_and_reenabling_restarts() {
        let mut state = TutorialState::default();
        state.observe_preference(true, true);
        state.advance(&SCRIPT);

        assert_eq!(state.observe_preference(false, true), Reconcile::Stopped);
        assert_eq!(state.step(), 0);
        assert_eq!(state.enabled(), Some(false));

        assert_eq!(state.observe_preference(true, true), Reconcile::Started);
        assert_eq!(state.step(), 1);
    }

    #[test]
    fn disabled_at_idle_is_unchanged() {
        let mut state = TutorialState::default();
        assert_eq!(state.observe_preference(false, true), Reconcile::Unchanged);
        assert_eq!(state.step(), 0);
    }

    #[test]
    fn completion_flag_blocks_auto_start_only() {
        let mut state = TutorialState::default();
        assert_eq!(state.observe_preference(true, false), Reconcile::Unchanged);
        assert_eq!(state.step(), 0);
        assert_eq!(state.mascot_tap(&SCRIPT), 1);
    }

    #[test]
    fn visuals_clear_when_hidden() {
        let mut visuals = GuideVisuals::REST;
        let entry = SCRIPT.entry(2);
        for _ in 0..20 {
            visuals.tick(0.1, true, entry);
        }
        assert_eq!(visuals.scale, 1.0);
        assert_eq!(visuals.bubble_opacity, 1.0);
        assert!(visuals.highlight >= PULSE_FLOOR);

        visuals.tick(0.1, false, entry);
        assert_eq!(visuals, GuideVisuals::REST);
    }

    #[test]
    fn highlight_stops_after_repeats_and_on_rest() {
        let mut visuals = GuideVisuals::REST;
        let entry = SCRIPT.entry(2);
        for _ in 0..60 {
            visuals.tick(0.1, true, entry);
        }
        assert_eq!(visuals.highlight, 0.0);

        visuals.restart_step();
        visuals.tick(0.1, true, SCRIPT.entry(4));
        assert_eq!(visuals.highlight, 0.0);
        assert_eq!(visuals.scale, 1.0);
    }

    #[test]
    fn idle_step_shows_no_bubble() {
        let mut visuals = GuideVisuals::REST;
        for _ in 0..20 {
            visuals.tick(0.1, true, None);
        }
        assert_eq!(visuals.scale, 1.0);
        assert_eq!(visuals.bubble_opacity, 0.0);
        assert_eq!(visuals.highlight, 0.0);
    }
}
