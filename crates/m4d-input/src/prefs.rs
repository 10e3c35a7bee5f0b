use crate::values::Ways;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("failed to write preferences: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ControllerType {
    #[default]
    DigitalDpad,
    AnalogStick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StickWays {
    /// Use whatever the running game declares.
    #[serde(rename = "auto")]
    #[default]
    Auto,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "8")]
    Eight,
}

impl StickWays {
    pub fn fixed(self) -> Option<Ways> {
        match self {
            Self::Auto => None,
            Self::Two => Some(Ways::Two),
            Self::Four => Some(Ways::Four),
            Self::Eight => Some(Ways::Eight),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub controller_type: ControllerType,
    /// 1 (smallest) to 5 (largest), 3 is the authored size.
    pub button_size: u8,
    pub stick_size: u8,
    pub stick_ways: StickWays,
    /// Fixed number of visible action buttons; `None` asks the game.
    pub num_buttons: Option<u8>,
    pub animated_input: bool,
    pub vibrate: bool,
    pub lightgun: bool,
    pub touch_mouse: bool,
    pub b_plus_x: bool,
    pub always_show_gh: bool,
    pub portrait_touch_controller: bool,
    pub landscape_touch_controller: bool,
    pub fullscreen_portrait: bool,
    pub hide_touch_on_external_controller: bool,
    pub tilt_sensor: bool,
    /// Fraction of the analog stick radius ignored around the center.
    pub analog_dead_zone: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            controller_type: ControllerType::default(),
            button_size: 3,
            stick_size: 3,
            stick_ways: StickWays::default(),
            num_buttons: None,
            animated_input: true,
            vibrate: false,
            lightgun: false,
            touch_mouse: false,
            b_plus_x: false,
            always_show_gh: false,
            portrait_touch_controller: true,
            landscape_touch_controller: true,
            fullscreen_portrait: false,
            hide_touch_on_external_controller: true,
            tilt_sensor: false,
            analog_dead_zone: 0.1,
        }
    }
}

pub fn default_prefs_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("mame4droid").join("input.toml");
        }
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("mame4droid").join("input.toml");
    }

    if let Some(home) = std::env::var_os("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join("mame4droid")
            .join("input.toml");
    }

    PathBuf::from("input.toml")
}

pub fn load_from_file(path: &Path) -> Preferences {
    let text = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => return Preferences::default(),
    };

    match toml::from_str::<Preferences>(&text) {
        Ok(prefs) => prefs,
        Err(e) => {
            warn!(
                "Failed to parse input preferences {}: {e}; using defaults",
                path.display()
            );
            Preferences::default()
        }
    }
}

pub fn save_to_file(path: &Path, prefs: &Preferences) -> Result<(), PrefsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let text = toml::to_string_pretty(prefs)?;
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let prefs: Preferences =
            toml::from_str("controller_type = \"analog-stick\"\nstick_ways = \"4\"\n")
                .expect("valid toml");
        assert_eq!(prefs.controller_type, ControllerType::AnalogStick);
        assert_eq!(prefs.stick_ways, StickWays::Four);
        assert_eq!(prefs.button_size, 3);
        assert!(prefs.animated_input);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("input.toml");
        let prefs = Preferences {
            num_buttons: Some(4),
            vibrate: true,
            stick_ways: StickWays::Two,
            ..Preferences::default()
        };
        save_to_file(&path, &prefs).expect("save");
        assert_eq!(load_from_file(&path), prefs);
    }

    #[test]
    fn unreadable_or_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.toml");
        assert_eq!(load_from_file(&missing), Preferences::default());

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "button_size = \"huge\"").expect("write");
        assert_eq!(load_from_file(&broken), Preferences::default());
    }
}
