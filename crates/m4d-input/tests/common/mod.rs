#![allow(dead_code)]

use m4d_input::coin::RewardedAds;
use m4d_input::controller::Services;
use m4d_input::host::{Emulator, Host};
use m4d_input::layout::{InputLayout, Rect};
use m4d_input::pointer::{MotionAction, MotionEvent, Pointer};
use m4d_input::values::DigitalMask;

pub const LANDSCAPE_LAYOUT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../layouts/controller_landscape.txt"
));

pub const PORTRAIT_LAYOUT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../layouts/controller_portrait.txt"
));

// Points inside regions of the landscape layout (480x320 reference).
pub const AT_A: (f32, f32) = (440.0, 280.0);
pub const AT_B: (f32, f32) = (380.0, 280.0);
pub const AT_C: (f32, f32) = (440.0, 220.0);
pub const AT_UP_LEFT: (f32, f32) = (30.0, 190.0);
pub const AT_UP: (f32, f32) = (80.0, 190.0);
pub const AT_EXIT: (f32, f32) = (20.0, 15.0);
pub const AT_OPTION: (f32, f32) = (460.0, 15.0);
pub const AT_COIN: (f32, f32) = (270.0, 15.0);
pub const AT_NOTHING: (f32, f32) = (240.0, 150.0);

pub fn landscape() -> InputLayout {
    InputLayout::parse(LANDSCAPE_LAYOUT)
}

/// Emulator core double that records everything the input layer writes.
pub struct FakeEmulator {
    pub published: Vec<(usize, DigitalMask)>,
    pub analog: Vec<(f32, f32)>,
    pub exit_writes: Vec<bool>,
    pub in_menu: bool,
    pub in_game: bool,
    pub in_save_load: bool,
    pub in_options: bool,
    pub ways: Option<u8>,
    pub buttons: Option<u8>,
}

impl Default for FakeEmulator {
    fn default() -> Self {
        Self {
            published: Vec::new(),
            analog: Vec::new(),
            exit_writes: Vec::new(),
            in_menu: false,
            in_game: true,
            in_save_load: false,
            in_options: false,
            ways: None,
            buttons: None,
        }
    }
}

impl FakeEmulator {
    pub fn last_published(&self) -> Option<DigitalMask> {
        self.published.last().map(|&(_, mask)| mask)
    }
}

impl Emulator for FakeEmulator {
    fn set_digital_data(&mut self, slot: usize, mask: DigitalMask) {
        self.published.push((slot, mask));
    }

    fn set_analog_data(&mut self, _slot: usize, x: f32, y: f32) {
        self.analog.push((x, y));
    }

    fn set_exit_game(&mut self, value: bool) {
        self.exit_writes.push(value);
    }

    fn is_in_menu(&self) -> bool {
        self.in_menu
    }

    fn is_in_game(&self) -> bool {
        self.in_game
    }

    fn is_in_save_load(&self) -> bool {
        self.in_save_load
    }

    fn is_in_options(&self) -> bool {
        self.in_options
    }

    fn set_in_options(&mut self, value: bool) {
        self.in_options = value;
    }

    fn num_ways(&self) -> Option<u8> {
        self.ways
    }

    fn num_buttons(&self) -> Option<u8> {
        self.buttons
    }
}

#[derive(Default)]
pub struct RecordingHost {
    pub invalidated: Vec<Rect>,
    pub vibrations: usize,
    pub options_opened: usize,
    pub toasts: Vec<String>,
}

impl Host for RecordingHost {
    fn invalidate(&mut self, rect: Rect) {
        self.invalidated.push(rect);
    }

    fn vibrate(&mut self) {
        self.vibrations += 1;
    }

    fn show_options_dialog(&mut self) {
        self.options_opened += 1;
    }

    fn show_toast(&mut self, message: &str) {
        self.toasts.push(message.to_string());
    }
}

#[derive(Default)]
pub struct FakeAds {
    pub ready: bool,
    pub loads: usize,
    pub shows: usize,
}

impl RewardedAds for FakeAds {
    fn load(&mut self) {
        self.loads += 1;
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn show(&mut self) {
        self.shows += 1;
    }
}

/// Bundles the doubles so tests can hand out `Services` per event.
#[derive(Default)]
pub struct Rig {
    pub emulator: FakeEmulator,
    pub host: RecordingHost,
    pub ads: FakeAds,
}

impl Rig {
    pub fn services(&mut self) -> Services<'_> {
        Services {
            emulator: &mut self.emulator,
            host: &mut self.host,
            ads: &mut self.ads,
        }
    }
}

pub fn event(action: MotionAction, action_pointer: u32, points: &[(u32, (f32, f32))]) -> MotionEvent {
    MotionEvent::new(
        action,
        action_pointer,
        points
            .iter()
            .map(|&(id, (x, y))| Pointer::new(id, x, y))
            .collect(),
    )
}
