use crate::eligibility::{AppState, is_eligible};
use crate::host::Emulator;
use crate::layout::{InputLayout, Rect, RegionKind};
use crate::pointer::{MAX_POINTERS, MotionEvent, Pointer};
use log::trace;

/// Drag tracker for the analog stick region.
///
/// The first pointer pressed inside an eligible analog region owns the stick
/// until it lifts; the digital controller skips that pointer meanwhile.
#[derive(Clone, Debug, Default)]
pub struct AnalogStick {
    owner: Option<u32>,
    area: Rect,
    axes: (f32, f32),
}

impl AnalogStick {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer currently dragging the stick.
    pub fn owner(&self) -> Option<u32> {
        self.owner
    }

    /// Current axes in [-1, 1]; y grows downward.
    pub fn axes(&self) -> (f32, f32) {
        self.axes
    }

    pub fn release(&mut self, emulator: &mut dyn Emulator) {
        if self.owner.take().is_some() {
            self.axes = (0.0, 0.0);
            emulator.set_analog_data(0, 0.0, 0.0);
        }
    }

    /// Handles the event for the analog stick. Returns whether the stick
    /// consumed it.
    pub fn handle(
        &mut self,
        event: &MotionEvent,
        layout: &InputLayout,
        state: &AppState,
        dead_zone: f32,
        emulator: &mut dyn Emulator,
    ) -> bool {
        if let Some(id) = self.owner {
            let pointer = event.pointers.iter().find(|p| p.id == id);
            match pointer {
                Some(p) if !event.is_release_for(id) => {
                    self.track(p, dead_zone, emulator);
                }
                _ => {
                    trace!("Analog stick released by pointer {id}");
                    self.release(emulator);
                }
            }
            return true;
        }

        for pointer in &event.pointers {
            if pointer.id as usize >= MAX_POINTERS || !event.is_initial_press_for(pointer.id) {
                continue;
            }
            let (x, y) = pointer.position();
            let hit = layout.regions_at(x, y).find(|r| {
                r.kind == RegionKind::AnalogRect && is_eligible(r, state)
            });
            if let Some(region) = hit {
                trace!("Analog stick claimed by pointer {}", pointer.id);
                self.owner = Some(pointer.id);
                self.area = region.rect;
                self.track(pointer, dead_zone, emulator);
                return true;
            }
        }
        false
    }

    fn track(&mut self, pointer: &Pointer, dead_zone: f32, emulator: &mut dyn Emulator) {
        let (cx, cy) = self.area.center();
        let radius = (self.area.width().min(self.area.height()) as f32 / 2.0).max(1.0);
        let mut dx = (pointer.x - cx) / radius;
        let mut dy = (pointer.y - cy) / radius;

        let magnitude = (dx * dx + dy * dy).sqrt();
        if magnitude < dead_zone {
            dx = 0.0;
            dy = 0.0;
        } else if magnitude > 1.0 {
            dx /= magnitude;
            dy /= magnitude;
        }

        self.axes = (dx, dy);
        emulator.set_analog_data(0, dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::MotionAction;
    use crate::prefs::ControllerType;
    use crate::values::DigitalMask;

    #[derive(Default)]
    struct AnalogOnly {
        analog: Vec<(f32, f32)>,
    }

    impl Emulator for AnalogOnly {
        fn set_digital_data(&mut self, _slot: usize, _mask: DigitalMask) {}
        fn set_analog_data(&mut self, _slot: usize, x: f32, y: f32) {
            self.analog.push((x, y));
        }
        fn set_exit_game(&mut self, _value: bool) {}
        fn is_in_menu(&self) -> bool {
            false
        }
        fn is_in_game(&self) -> bool {
            true
        }
        fn is_in_save_load(&self) -> bool {
            false
        }
        fn is_in_options(&self) -> bool {
            false
        }
        fn set_in_options(&mut self, _value: bool) {}
        fn num_ways(&self) -> Option<u8> {
            None
        }
        fn num_buttons(&self) -> Option<u8> {
            None
        }
    }

    fn analog_state() -> AppState {
        AppState {
            controller_type: ControllerType::AnalogStick,
            ..AppState::default()
        }
    }

    fn event(action: MotionAction, x: f32, y: f32) -> MotionEvent {
        MotionEvent::new(action, 0, vec![Pointer::new(0, x, y)])
    }

    #[test]
    fn claims_drags_and_releases() {
        let layout = InputLayout::parse("7,0,0,0,100,100\n");
        let state = analog_state();
        let mut stick = AnalogStick::new();
        let mut emu = AnalogOnly::default();

        assert!(stick.handle(&event(MotionAction::Down, 75.0, 50.0), &layout, &state, 0.1, &mut emu));
        assert_eq!(stick.owner(), Some(0));
        assert_eq!(stick.axes(), (0.5, 0.0));

        // Dragging outside the region is still owned and clamped.
        assert!(stick.handle(&event(MotionAction::Move, 50.0, 250.0), &layout, &state, 0.1, &mut emu));
        assert_eq!(stick.axes(), (0.0, 1.0));

        assert!(stick.handle(&event(MotionAction::Up, 50.0, 250.0), &layout, &state, 0.1, &mut emu));
        assert_eq!(stick.owner(), None);
        assert_eq!(emu.analog.last(), Some(&(0.0, 0.0)));
    }

    #[test]
    fn dead_zone_zeroes_small_offsets() {
        let layout = InputLayout::parse("7,0,0,0,100,100\n");
        let state = analog_state();
        let mut stick = AnalogStick::new();
        let mut emu = AnalogOnly::default();

        stick.handle(&event(MotionAction::Down, 52.0, 51.0), &layout, &state, 0.1, &mut emu);
        assert_eq!(stick.axes(), (0.0, 0.0));
    }

    #[test]
    fn ignored_with_digital_controller() {
        let layout = InputLayout::parse("7,0,0,0,100,100\n");
        let mut stick = AnalogStick::new();
        let mut emu = AnalogOnly::default();

        let handled = stick.handle(
            &event(MotionAction::Down, 50.0, 50.0),
            &layout,
            &AppState::default(),
            0.1,
            &mut emu,
        );
        assert!(!handled);
        assert!(emu.analog.is_empty());
    }
}
