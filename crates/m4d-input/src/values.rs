/// Digital input bitmask consumed by the emulator core.
pub type DigitalMask = u32;

pub const UP_VALUE: DigitalMask = 0x1;
pub const LEFT_VALUE: DigitalMask = 0x4;
pub const DOWN_VALUE: DigitalMask = 0x10;
pub const RIGHT_VALUE: DigitalMask = 0x40;
pub const START_VALUE: DigitalMask = 1 << 8;
pub const COIN_VALUE: DigitalMask = 1 << 9;
pub const A_VALUE: DigitalMask = 1 << 10;
pub const B_VALUE: DigitalMask = 1 << 11;
pub const C_VALUE: DigitalMask = 1 << 12;
pub const D_VALUE: DigitalMask = 1 << 13;
pub const E_VALUE: DigitalMask = 1 << 14;
pub const F_VALUE: DigitalMask = 1 << 15;
pub const G_VALUE: DigitalMask = 1 << 16;
pub const H_VALUE: DigitalMask = 1 << 17;
pub const EXIT_VALUE: DigitalMask = 1 << 18;
pub const OPTION_VALUE: DigitalMask = 1 << 19;

pub const DIRECTION_MASK: DigitalMask = UP_VALUE | LEFT_VALUE | DOWN_VALUE | RIGHT_VALUE;

// Button ids as they appear in layout resources.
pub const BTN_A: i32 = 0;
pub const BTN_B: i32 = 1;
pub const BTN_C: i32 = 2;
pub const BTN_D: i32 = 3;
pub const BTN_E: i32 = 4;
pub const BTN_F: i32 = 5;
pub const BTN_G: i32 = 6;
pub const BTN_H: i32 = 7;
pub const BTN_EXIT: i32 = 8;
pub const BTN_OPTION: i32 = 9;
pub const BTN_COIN: i32 = 10;
pub const BTN_START: i32 = 11;

/// Number of distinct button ids.
pub const NUM_BUTTONS: usize = 12;

/// Number of action buttons (A through H).
pub const NUM_ACTION_BUTTONS: usize = 8;

// Stick ids follow the numeric keypad.
pub const STICK_UP_LEFT: i32 = 1;
pub const STICK_UP: i32 = 2;
pub const STICK_UP_RIGHT: i32 = 3;
pub const STICK_LEFT: i32 = 4;
pub const STICK_RIGHT: i32 = 6;
pub const STICK_DOWN_LEFT: i32 = 7;
pub const STICK_DOWN: i32 = 8;
pub const STICK_DOWN_RIGHT: i32 = 9;

const BUTTON_VALUES: [DigitalMask; NUM_BUTTONS] = [
    A_VALUE,
    B_VALUE,
    C_VALUE,
    D_VALUE,
    E_VALUE,
    F_VALUE,
    G_VALUE,
    H_VALUE,
    EXIT_VALUE,
    OPTION_VALUE,
    COIN_VALUE,
    START_VALUE,
];

/// Returns the bits emitted by the button with layout id `id`.
///
/// With the B-plus-X combo enabled the third button fires the first two
/// buttons together instead of its own bit. Unknown ids contribute nothing.
pub fn button_value(id: i32, b_plus_x: bool) -> DigitalMask {
    if b_plus_x && id == BTN_C {
        return A_VALUE | B_VALUE;
    }
    usize::try_from(id)
        .ok()
        .and_then(|i| BUTTON_VALUES.get(i).copied())
        .unwrap_or(0)
}

/// Returns the bit of a button id without any combo remapping.
pub fn button_bit(id: i32) -> DigitalMask {
    button_value(id, false)
}

/// Directional resolution of the virtual stick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ways {
    Two,
    Four,
    Eight,
}

impl Ways {
    /// Interprets a way count reported by the emulator core. Anything that
    /// isn't 2 or 4 is treated as a full 8-way stick.
    pub fn from_count(count: u8) -> Self {
        match count {
            2 => Ways::Two,
            4 => Ways::Four,
            _ => Ways::Eight,
        }
    }

    pub fn count(self) -> u8 {
        match self {
            Ways::Two => 2,
            Ways::Four => 4,
            Ways::Eight => 8,
        }
    }
}

/// Maps a stick region id to direction bits.
///
/// Menus always get the full 8-way table. During gameplay 2-way and 4-way
/// sticks collapse diagonals onto the horizontal cardinal.
pub fn stick_value(id: i32, ways: Ways, in_menu: bool) -> DigitalMask {
    match (ways, in_menu) {
        (Ways::Two, false) => match id {
            STICK_UP_LEFT | STICK_LEFT | STICK_DOWN_LEFT => LEFT_VALUE,
            STICK_UP_RIGHT | STICK_RIGHT | STICK_DOWN_RIGHT => RIGHT_VALUE,
            _ => 0,
        },
        (Ways::Four, false) => match id {
            STICK_UP_LEFT | STICK_LEFT | STICK_DOWN_LEFT => LEFT_VALUE,
            STICK_UP_RIGHT | STICK_RIGHT | STICK_DOWN_RIGHT => RIGHT_VALUE,
            STICK_UP => UP_VALUE,
            STICK_DOWN => DOWN_VALUE,
            _ => 0,
        },
        _ => match id {
            STICK_UP_LEFT => UP_VALUE | LEFT_VALUE,
            STICK_UP => UP_VALUE,
            STICK_UP_RIGHT => UP_VALUE | RIGHT_VALUE,
            STICK_LEFT => LEFT_VALUE,
            STICK_RIGHT => RIGHT_VALUE,
            STICK_DOWN_LEFT => DOWN_VALUE | LEFT_VALUE,
            STICK_DOWN => DOWN_VALUE,
            STICK_DOWN_RIGHT => DOWN_VALUE | RIGHT_VALUE,
            _ => 0,
        },
    }
}

const MASK_NAMES: [(DigitalMask, &str); 16] = [
    (UP_VALUE, "up"),
    (DOWN_VALUE, "down"),
    (LEFT_VALUE, "left"),
    (RIGHT_VALUE, "right"),
    (A_VALUE, "a"),
    (B_VALUE, "b"),
    (C_VALUE, "c"),
    (D_VALUE, "d"),
    (E_VALUE, "e"),
    (F_VALUE, "f"),
    (G_VALUE, "g"),
    (H_VALUE, "h"),
    (START_VALUE, "start"),
    (COIN_VALUE, "coin"),
    (EXIT_VALUE, "exit"),
    (OPTION_VALUE, "option"),
];

/// Lists the names of the bits set in `mask`, directions first.
pub fn mask_names(mask: DigitalMask) -> Vec<&'static str> {
    MASK_NAMES
        .iter()
        .filter(|(bit, _)| mask & bit != 0)
        .map(|(_, name)| *name)
        .collect()
}
