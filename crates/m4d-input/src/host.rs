use crate::layout::Rect;
use crate::values::DigitalMask;

/// The parts of the emulator core the input layer talks to.
pub trait Emulator {
    /// Publishes the digital input bitmask for controller `slot`.
    fn set_digital_data(&mut self, slot: usize, mask: DigitalMask);

    /// Publishes analog stick axes in [-1, 1] for controller `slot`.
    fn set_analog_data(&mut self, _slot: usize, _x: f32, _y: f32) {}

    fn set_exit_game(&mut self, value: bool);

    fn is_in_menu(&self) -> bool;
    fn is_in_game(&self) -> bool;
    fn is_in_save_load(&self) -> bool;

    fn is_in_options(&self) -> bool;
    fn set_in_options(&mut self, value: bool);

    /// Stick ways declared by the running game, if known.
    fn num_ways(&self) -> Option<u8>;

    /// Buttons used by the running game, if known.
    fn num_buttons(&self) -> Option<u8>;
}

/// UI-thread services of the Android host.
pub trait Host {
    /// Redraws the given region of the controller overlay.
    fn invalidate(&mut self, _rect: Rect) {}

    /// Fires one short haptic pulse.
    fn vibrate(&mut self) {}

    fn show_options_dialog(&mut self) {}

    /// Shows a non-blocking message to the user.
    fn show_toast(&mut self, _message: &str) {}
}

/// A host that ignores every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl Host for NullHost {}
