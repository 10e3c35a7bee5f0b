use crate::values::DigitalMask;

/// Number of simultaneous touch ids tracked.
pub const MAX_POINTERS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionAction {
    Down,
    Up,
    Move,
    Cancel,
    PointerDown,
    PointerUp,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }

    /// Pixel coordinates used for hit-testing.
    pub fn position(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

/// A platform multi-touch event: every active pointer plus the action and
/// the pointer that caused it.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionEvent {
    pub action: MotionAction,
    pub action_pointer: u32,
    pub pointers: Vec<Pointer>,
}

impl MotionEvent {
    pub fn new(action: MotionAction, action_pointer: u32, pointers: Vec<Pointer>) -> Self {
        Self {
            action,
            action_pointer,
            pointers,
        }
    }

    /// Whether pointer `id` is lifting in this event.
    pub fn is_release_for(&self, id: u32) -> bool {
        match self.action {
            MotionAction::Up | MotionAction::Cancel => true,
            MotionAction::PointerUp => id == self.action_pointer,
            _ => false,
        }
    }

    /// Whether pointer `id` is touching down in this event, as opposed to
    /// moving or being carried along by another pointer's action.
    pub fn is_initial_press_for(&self, id: u32) -> bool {
        match self.action {
            MotionAction::Down => true,
            MotionAction::PointerDown => id == self.action_pointer,
            _ => false,
        }
    }
}

/// Per-slot bookkeeping of which bits each touch id contributes.
#[derive(Clone, Debug)]
pub struct PointerTracker {
    touching: [bool; MAX_POINTERS],
    new: [DigitalMask; MAX_POINTERS],
    old: [DigitalMask; MAX_POINTERS],
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            touching: [false; MAX_POINTERS],
            new: [0; MAX_POINTERS],
            old: [0; MAX_POINTERS],
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Moves last frame's contributions into the `old` slots.
    pub fn begin_frame(&mut self) {
        self.old = self.new;
        self.touching = [false; MAX_POINTERS];
    }

    /// Pointers that may contribute this frame: tracked ids, not owned by
    /// the analog stick, and not lifting.
    pub fn active_pointers<'a>(
        &self,
        event: &'a MotionEvent,
        analog_owner: Option<u32>,
    ) -> impl Iterator<Item = &'a Pointer> {
        event.pointers.iter().filter(move |p| {
            slot(p.id).is_some() && analog_owner != Some(p.id) && !event.is_release_for(p.id)
        })
    }

    /// Marks `id` as touching with no contribution yet. Returns `false` for
    /// ids outside the tracked range.
    pub fn press(&mut self, id: u32) -> bool {
        let Some(i) = slot(id) else {
            return false;
        };
        self.touching[i] = true;
        self.new[i] = 0;
        true
    }

    pub fn contribute(&mut self, id: u32, bits: DigitalMask) {
        if let Some(i) = slot(id) {
            self.new[i] |= bits;
        }
    }

    /// Replaces this pointer's previous contribution in `mask` with its
    /// current one.
    pub fn apply(&self, id: u32, mask: &mut DigitalMask) {
        let Some(i) = slot(id) else {
            return;
        };
        if self.old[i] != self.new[i] {
            *mask &= !self.old[i];
        }
        *mask |= self.new[i];
    }

    pub fn is_touching(&self, id: u32) -> bool {
        slot(id).is_some_and(|i| self.touching[i])
    }

    pub fn contribution(&self, id: u32) -> DigitalMask {
        slot(id).map_or(0, |i| self.new[i])
    }

    pub fn previous_contribution(&self, id: u32) -> DigitalMask {
        slot(id).map_or(0, |i| self.old[i])
    }

    /// Union of every slot's current contribution.
    pub fn held_bits(&self) -> DigitalMask {
        self.new.iter().fold(0, |acc, bits| acc | bits)
    }

    /// Clears bits left behind by pointers that stopped touching.
    ///
    /// Bits are kept when another touching pointer contributes exactly the
    /// same value; some touch screens report a lifted finger under the id of
    /// a second one. Partial overlaps are not protected.
    pub fn sweep(&mut self, mask: &mut DigitalMask) {
        for i in 0..MAX_POINTERS {
            if self.touching[i] || self.old[i] == 0 {
                continue;
            }
            let held = self.old[i];
            let shared =
                (0..MAX_POINTERS).any(|j| j != i && self.touching[j] && self.new[j] == held);
            if !shared {
                *mask &= !held;
            }
            self.new[i] = 0;
            self.old[i] = 0;
        }
    }
}

fn slot(id: u32) -> Option<usize> {
    let i = usize::try_from(id).ok()?;
    (i < MAX_POINTERS).then_some(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::{A_VALUE, B_VALUE};

    fn frame(tracker: &mut PointerTracker, mask: &mut DigitalMask, held: &[(u32, DigitalMask)]) {
        tracker.begin_frame();
        for &(id, bits) in held {
            tracker.press(id);
            tracker.contribute(id, bits);
            tracker.apply(id, mask);
        }
        tracker.sweep(mask);
    }

    #[test]
    fn release_classification() {
        let ev = MotionEvent::new(MotionAction::PointerUp, 1, Vec::new());
        assert!(ev.is_release_for(1));
        assert!(!ev.is_release_for(0));
        let ev = MotionEvent::new(MotionAction::Cancel, 0, Vec::new());
        assert!(ev.is_release_for(3));
        let ev = MotionEvent::new(MotionAction::Move, 0, Vec::new());
        assert!(!ev.is_release_for(0));
        assert!(!ev.is_initial_press_for(0));
        let ev = MotionEvent::new(MotionAction::PointerDown, 2, Vec::new());
        assert!(ev.is_initial_press_for(2));
        assert!(!ev.is_initial_press_for(0));
    }

    #[test]
    fn out_of_range_ids_are_ignored() {
        let mut tracker = PointerTracker::new();
        assert!(!tracker.press(MAX_POINTERS as u32));
        tracker.contribute(99, A_VALUE);
        assert_eq!(tracker.contribution(99), 0);
        assert!(!tracker.is_touching(99));

        let ev = MotionEvent::new(
            MotionAction::Down,
            0,
            vec![Pointer::new(0, 1.0, 1.0), Pointer::new(25, 1.0, 1.0)],
        );
        let ids: Vec<u32> = tracker.active_pointers(&ev, None).map(|p| p.id).collect();
        assert_eq!(ids, vec![0]);
    }

    #[test]
    fn analog_owned_pointer_is_skipped() {
        let tracker = PointerTracker::new();
        let ev = MotionEvent::new(
            MotionAction::Move,
            0,
            vec![Pointer::new(0, 1.0, 1.0), Pointer::new(1, 1.0, 1.0)],
        );
        let ids: Vec<u32> = tracker.active_pointers(&ev, Some(0)).map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn lifted_pointer_bits_are_cleared() {
        let mut tracker = PointerTracker::new();
        let mut mask = 0;
        frame(&mut tracker, &mut mask, &[(0, A_VALUE), (1, B_VALUE)]);
        assert_eq!(mask, A_VALUE | B_VALUE);

        frame(&mut tracker, &mut mask, &[(1, B_VALUE)]);
        assert_eq!(mask, B_VALUE);
        assert_eq!(tracker.previous_contribution(0), 0);
    }

    #[test]
    fn identical_contribution_from_other_pointer_is_kept() {
        let mut tracker = PointerTracker::new();
        let mut mask = 0;
        frame(&mut tracker, &mut mask, &[(0, A_VALUE), (1, A_VALUE)]);
        frame(&mut tracker, &mut mask, &[(1, A_VALUE)]);
        assert_eq!(mask, A_VALUE);
    }

    #[test]
    fn sliding_to_another_region_replaces_contribution() {
        let mut tracker = PointerTracker::new();
        let mut mask = 0;
        frame(&mut tracker, &mut mask, &[(0, A_VALUE)]);
        frame(&mut tracker, &mut mask, &[(0, B_VALUE)]);
        assert_eq!(mask, B_VALUE);
        frame(&mut tracker, &mut mask, &[(0, 0)]);
        assert_eq!(mask, 0);
    }
}
