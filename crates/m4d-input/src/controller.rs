use crate::analog::AnalogStick;
use crate::coin::{CoinFlow, RewardedAds};
use crate::eligibility::{AppState, Orientation, is_eligible};
use crate::feedback::{FeedbackDriver, FeedbackSettings};
use crate::host::{Emulator, Host};
use crate::layout::{InputLayout, RegionKind};
use crate::pointer::{MotionEvent, Pointer, PointerTracker};
use crate::prefs::{ControllerType, Preferences};
use crate::values::{
    BTN_COIN, BTN_EXIT, BTN_OPTION, DigitalMask, Ways, button_value, stick_value,
};
use log::{debug, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    ShowingController,
    ShowingNone,
}

/// Collaborators reached while handling one motion event.
pub struct Services<'a> {
    pub emulator: &'a mut dyn Emulator,
    pub host: &'a mut dyn Host,
    pub ads: &'a mut dyn RewardedAds,
}

/// Turns motion events into the digital input mask for the emulator core.
///
/// One instance per attached input view; all methods are expected on the UI
/// thread.
pub struct TouchController {
    state: ControllerState,
    layout: InputLayout,
    prefs: Preferences,
    orientation: Orientation,
    view_size: Option<(i32, i32)>,
    customizer_active: bool,
    external_controller: bool,
    tracker: PointerTracker,
    analog: AnalogStick,
    feedback: FeedbackDriver,
    coin: CoinFlow,
}

fn initial_state(prefs: &Preferences, orientation: Orientation) -> ControllerState {
    let show = match orientation {
        Orientation::Portrait => prefs.portrait_touch_controller,
        Orientation::Landscape => prefs.landscape_touch_controller,
    };
    if show {
        ControllerState::ShowingController
    } else {
        ControllerState::ShowingNone
    }
}

impl TouchController {
    /// Attaches a controller for `orientation`, taking the initial state from
    /// that orientation's preference.
    pub fn new(layout: InputLayout, prefs: Preferences, orientation: Orientation) -> Self {
        let state = initial_state(&prefs, orientation);
        debug!("Touch controller attached in {orientation:?}: {state:?}");
        let mut controller = Self {
            state,
            layout,
            prefs,
            orientation,
            view_size: None,
            customizer_active: false,
            external_controller: false,
            tracker: PointerTracker::new(),
            analog: AnalogStick::new(),
            feedback: FeedbackDriver::new(),
            coin: CoinFlow::new(),
        };
        controller.refit();
        controller
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn layout(&self) -> &InputLayout {
        &self.layout
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn analog(&self) -> &AnalogStick {
        &self.analog
    }

    pub fn feedback(&self) -> &FeedbackDriver {
        &self.feedback
    }

    pub fn coin(&self) -> &CoinFlow {
        &self.coin
    }

    /// Ad callbacks from the host are routed here.
    pub fn coin_mut(&mut self) -> &mut CoinFlow {
        &mut self.coin
    }

    pub fn set_layout(&mut self, layout: InputLayout) {
        self.layout = layout;
        self.refit();
    }

    pub fn set_view_size(&mut self, width: i32, height: i32) {
        self.view_size = Some((width, height));
        self.refit();
    }

    pub fn set_prefs(&mut self, prefs: Preferences) {
        self.prefs = prefs;
        self.refit();
    }

    /// Switches orientation; the controller state is re-derived from the new
    /// orientation's preference.
    pub fn set_orientation(
        &mut self,
        orientation: Orientation,
        emulator: &mut dyn Emulator,
        mask: &mut DigitalMask,
    ) {
        self.orientation = orientation;
        let state = initial_state(&self.prefs, orientation);
        self.set_state(state, emulator, mask);
    }

    pub fn set_customizer_active(&mut self, active: bool) {
        self.customizer_active = active;
    }

    pub fn set_external_controller(&mut self, connected: bool) {
        self.external_controller = connected;
    }

    fn refit(&mut self) {
        let (width, height) = self.view_size.unwrap_or((0, 0));
        self.layout
            .fit_to(width, height, self.prefs.button_size, self.prefs.stick_size);
    }

    /// Toggles between showing the controller and showing nothing. Hiding
    /// releases every input the touch controller was holding.
    pub fn toggle(&mut self, emulator: &mut dyn Emulator, mask: &mut DigitalMask) {
        let next = match self.state {
            ControllerState::ShowingController => ControllerState::ShowingNone,
            ControllerState::ShowingNone => ControllerState::ShowingController,
        };
        self.set_state(next, emulator, mask);
    }

    pub fn set_state(
        &mut self,
        state: ControllerState,
        emulator: &mut dyn Emulator,
        mask: &mut DigitalMask,
    ) {
        if state == self.state {
            return;
        }
        debug!("Touch controller {:?} -> {state:?}", self.state);
        self.state = state;
        if state == ControllerState::ShowingNone {
            *mask &= !self.tracker.held_bits();
            self.tracker.reset();
            self.feedback.reset();
            self.analog.release(emulator);
            emulator.set_digital_data(0, *mask);
        }
    }

    pub fn app_state(&self, emulator: &dyn Emulator) -> AppState {
        AppState {
            orientation: self.orientation,
            fullscreen_portrait: self.prefs.fullscreen_portrait,
            customizer_active: self.customizer_active,
            tilt_enabled: self.prefs.tilt_sensor,
            lightgun: self.prefs.lightgun,
            touch_mouse: self.prefs.touch_mouse,
            in_menu: emulator.is_in_menu(),
            in_game: emulator.is_in_game(),
            in_save_load: emulator.is_in_save_load(),
            controller_type: self.prefs.controller_type,
            button_count_pref: self.prefs.num_buttons,
            emulator_buttons: emulator.num_buttons(),
            always_show_gh: self.prefs.always_show_gh,
            external_controller: self.external_controller,
            hide_touch_on_external_controller: self.prefs.hide_touch_on_external_controller,
            showing_controller: self.state == ControllerState::ShowingController,
        }
    }

    fn ways(&self, emulator: &dyn Emulator) -> Ways {
        self.prefs
            .stick_ways
            .fixed()
            .or_else(|| emulator.num_ways().map(Ways::from_count))
            .unwrap_or(Ways::Eight)
    }

    /// Processes one motion event, updating `mask` in place and publishing it
    /// to the emulator. Returns whether any region consumed the event.
    pub fn handle_touch_controller(
        &mut self,
        event: &MotionEvent,
        services: &mut Services<'_>,
        mask: &mut DigitalMask,
    ) -> bool {
        if self.state == ControllerState::ShowingNone {
            return false;
        }

        let state = self.app_state(&*services.emulator);
        let mut handled = false;

        if self.prefs.controller_type == ControllerType::AnalogStick {
            handled |= self.analog.handle(
                event,
                &self.layout,
                &state,
                self.prefs.analog_dead_zone,
                services.emulator,
            );
        } else if self.analog.owner().is_some() {
            // The controller type changed mid-drag.
            self.analog.release(services.emulator);
        }

        let ways = self.ways(&*services.emulator);
        let in_menu = state.in_menu;

        self.tracker.begin_frame();
        let active: Vec<Pointer> = self
            .tracker
            .active_pointers(event, self.analog.owner())
            .copied()
            .collect();

        for pointer in active {
            self.tracker.press(pointer.id);
            let initial_press = event.is_initial_press_for(pointer.id);
            let (x, y) = pointer.position();

            for region in self.layout.regions_at(x, y) {
                if !matches!(region.kind, RegionKind::ButtonRect | RegionKind::StickRect) {
                    continue;
                }
                if !is_eligible(region, &state) {
                    continue;
                }
                handled = true;

                if region.kind == RegionKind::StickRect {
                    self.tracker
                        .contribute(pointer.id, stick_value(region.value, ways, in_menu));
                    continue;
                }

                self.tracker
                    .contribute(pointer.id, button_value(region.value, self.prefs.b_plus_x));
                if initial_press {
                    fire_one_shot(region.value, &mut self.coin, services);
                }
            }

            self.tracker.apply(pointer.id, mask);
        }

        self.tracker.sweep(mask);

        let settings = FeedbackSettings {
            animated: self.prefs.animated_input,
            vibrate: self.prefs.vibrate,
        };
        self.feedback
            .update(*mask, &self.layout, &state, settings, services.host);

        services.emulator.set_digital_data(0, *mask);
        handled
    }
}

/// Side effects that run once when EXIT, OPTION or COIN is first pressed.
fn fire_one_shot(button: i32, coin: &mut CoinFlow, services: &mut Services<'_>) {
    match button {
        BTN_EXIT => {
            trace!("Exit pulse");
            services.emulator.set_exit_game(true);
            services.emulator.set_exit_game(false);
        }
        BTN_OPTION => {
            if services.emulator.is_in_options() {
                return;
            }
            trace!("Opening options dialog");
            services.emulator.set_in_options(true);
            services.host.show_options_dialog();
        }
        BTN_COIN => coin.request(services.ads),
        _ => {}
    }
}
