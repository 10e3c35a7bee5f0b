//! Decides whether a layout region currently takes part in hit-testing.
//!
//! Button visibility is resolved by [`VISIBLE_BUTTON_RULES`], an ordered list
//! of named rules where the first match wins. The order matters: with the
//! controller hidden during a save/load dialog, for instance, the hidden rule
//! must still win.

use crate::layout::{InputRegion, RegionKind};
use crate::prefs::ControllerType;
use crate::values::{BTN_G, BTN_H, NUM_ACTION_BUTTONS};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

/// Snapshot of everything the eligibility rules look at, taken once per
/// motion event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppState {
    pub orientation: Orientation,
    pub fullscreen_portrait: bool,
    pub customizer_active: bool,
    pub tilt_enabled: bool,
    pub lightgun: bool,
    pub touch_mouse: bool,
    pub in_menu: bool,
    pub in_game: bool,
    pub in_save_load: bool,
    pub controller_type: ControllerType,
    /// Fixed visible-button preference, `None` for automatic.
    pub button_count_pref: Option<u8>,
    /// Button count reported by the emulator core.
    pub emulator_buttons: Option<u8>,
    pub always_show_gh: bool,
    pub external_controller: bool,
    pub hide_touch_on_external_controller: bool,
    pub showing_controller: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            orientation: Orientation::Landscape,
            fullscreen_portrait: false,
            customizer_active: false,
            tilt_enabled: false,
            lightgun: false,
            touch_mouse: false,
            in_menu: false,
            in_game: true,
            in_save_load: false,
            controller_type: ControllerType::DigitalDpad,
            button_count_pref: None,
            emulator_buttons: None,
            always_show_gh: false,
            external_controller: false,
            hide_touch_on_external_controller: true,
            showing_controller: true,
        }
    }
}

/// A named rule yielding the visible button count when it applies.
pub struct VisibleButtonRule {
    pub name: &'static str,
    pub apply: fn(&AppState) -> Option<u8>,
}

/// Visible button count rules, evaluated in order.
pub static VISIBLE_BUTTON_RULES: [VisibleButtonRule; 4] = [
    VisibleButtonRule {
        name: "hidden",
        apply: hidden_rule,
    },
    VisibleButtonRule {
        name: "save_load",
        apply: save_load_rule,
    },
    VisibleButtonRule {
        name: "in_game",
        apply: in_game_rule,
    },
    VisibleButtonRule {
        name: "fallback",
        apply: fallback_rule,
    },
];

fn hidden_rule(state: &AppState) -> Option<u8> {
    let hidden = !state.showing_controller
        || (state.external_controller && state.hide_touch_on_external_controller)
        || state.lightgun
        || state.touch_mouse;
    hidden.then_some(0)
}

fn save_load_rule(state: &AppState) -> Option<u8> {
    state.in_save_load.then_some(5)
}

fn in_game_rule(state: &AppState) -> Option<u8> {
    if !state.in_game {
        return None;
    }
    let n = state.button_count_pref.or(state.emulator_buttons).unwrap_or(2);
    Some(round_button_count(n))
}

fn fallback_rule(_state: &AppState) -> Option<u8> {
    Some(2)
}

/// Rounds a game's button count up to one of the 2/4/6 overlay layouts.
pub fn round_button_count(n: u8) -> u8 {
    match n {
        0..=2 => 2,
        3..=4 => 4,
        _ => 6,
    }
}

/// Number of action buttons currently shown, from the first matching rule.
pub fn visible_buttons(state: &AppState) -> u8 {
    VISIBLE_BUTTON_RULES
        .iter()
        .find_map(|rule| (rule.apply)(state))
        .unwrap_or(0)
}

/// Name of the rule that decides the visible button count.
pub fn deciding_rule(state: &AppState) -> Option<&'static str> {
    VISIBLE_BUTTON_RULES
        .iter()
        .find(|rule| (rule.apply)(state).is_some())
        .map(|rule| rule.name)
}

/// Every button is shown in windowed portrait and while customizing.
fn full_visibility(state: &AppState) -> bool {
    (state.orientation == Orientation::Portrait && !state.fullscreen_portrait)
        || state.customizer_active
}

pub fn is_eligible(region: &InputRegion, state: &AppState) -> bool {
    match region.kind {
        RegionKind::AnalogRect => state.controller_type != ControllerType::DigitalDpad,
        RegionKind::StickRect | RegionKind::StickImage => {
            state.controller_type == ControllerType::DigitalDpad && !state.tilt_enabled
        }
        RegionKind::ButtonRect | RegionKind::ButtonImage => is_button_eligible(region.value, state),
        RegionKind::MainRect | RegionKind::Switch => false,
    }
}

fn is_button_eligible(id: i32, state: &AppState) -> bool {
    if full_visibility(state) {
        return true;
    }

    // Start, coin, exit and option are never hidden by the button count.
    let Ok(index) = usize::try_from(id) else {
        return false;
    };
    if index >= NUM_ACTION_BUTTONS {
        return true;
    }

    let n = usize::from(visible_buttons(state));
    if n > 0 && state.always_show_gh && (id == BTN_G || id == BTN_H) {
        return true;
    }
    index < n
}
