use crate::eligibility::{AppState, is_eligible};
use crate::host::Host;
use crate::layout::{InputLayout, RegionKind};
use crate::values::{
    DOWN_VALUE, DigitalMask, LEFT_VALUE, NUM_BUTTONS, RIGHT_VALUE, UP_VALUE, button_bit,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StickState {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl StickState {
    /// Derives the drawn stick position from the direction bits. Diagonals
    /// are checked first, up before down and right before left.
    pub fn from_mask(mask: DigitalMask) -> Self {
        let up = mask & UP_VALUE != 0;
        let down = mask & DOWN_VALUE != 0;
        let left = mask & LEFT_VALUE != 0;
        let right = mask & RIGHT_VALUE != 0;

        if up && right {
            Self::UpRight
        } else if up && left {
            Self::UpLeft
        } else if down && right {
            Self::DownRight
        } else if down && left {
            Self::DownLeft
        } else if up {
            Self::Up
        } else if down {
            Self::Down
        } else if left {
            Self::Left
        } else if right {
            Self::Right
        } else {
            Self::None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonState {
    Pressed,
    #[default]
    Released,
}

/// What the feedback driver wants from the host for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FeedbackSettings {
    pub animated: bool,
    pub vibrate: bool,
}

/// Tracks drawn stick/button states and reacts to their transitions.
#[derive(Clone, Debug, Default)]
pub struct FeedbackDriver {
    stick: StickState,
    buttons: [ButtonState; NUM_BUTTONS],
}

impl FeedbackDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stick_state(&self) -> StickState {
        self.stick
    }

    pub fn button_state(&self, id: i32) -> ButtonState {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.buttons.get(i).copied())
            .unwrap_or_default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Recomputes states from `mask`, redraws changed image regions and
    /// fires one haptic pulse per changed stick or button. Returns the
    /// number of pulses fired.
    pub fn update(
        &mut self,
        mask: DigitalMask,
        layout: &InputLayout,
        state: &AppState,
        settings: FeedbackSettings,
        host: &mut dyn Host,
    ) -> usize {
        let old_stick = self.stick;
        let old_buttons = self.buttons;

        self.stick = StickState::from_mask(mask);
        for (id, slot) in self.buttons.iter_mut().enumerate() {
            *slot = if mask & button_bit(id as i32) != 0 {
                ButtonState::Pressed
            } else {
                ButtonState::Released
            };
        }

        let stick_changed = self.stick != old_stick;
        let changed_button = |id: i32| {
            usize::try_from(id)
                .ok()
                .filter(|&i| i < NUM_BUTTONS)
                .is_some_and(|i| self.buttons[i] != old_buttons[i])
        };

        let mut stick_pulsed = false;
        let mut button_pulsed = [false; NUM_BUTTONS];
        let mut pulses = 0;

        for region in layout.regions() {
            let changed = match region.kind {
                RegionKind::StickImage => stick_changed,
                RegionKind::ButtonImage => changed_button(region.value),
                _ => false,
            };
            if !changed || !is_eligible(region, state) {
                continue;
            }
            if settings.animated {
                host.invalidate(region.rect);
            }
            if !settings.vibrate {
                continue;
            }

            // One pulse per transition, even when several images show it.
            let already = match region.kind {
                RegionKind::StickImage => std::mem::replace(&mut stick_pulsed, true),
                _ => usize::try_from(region.value)
                    .ok()
                    .and_then(|i| button_pulsed.get_mut(i))
                    .is_none_or(|p| std::mem::replace(p, true)),
            };
            if !already {
                host.vibrate();
                pulses += 1;
            }
        }
        pulses
    }
}
