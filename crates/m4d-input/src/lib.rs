//! Touch-to-input translation layer for the MAME4droid shell.
//!
//! This crate contains the platform-agnostic input logic (layout tables,
//! pointer tracking, visibility rules, feedback). The Android host drives it
//! through the [`host::Emulator`] and [`host::Host`] traits and feeds it
//! motion events via [`controller::TouchController`].

/// Analog stick drag tracking.
pub mod analog;

/// Logcat-backed `log` implementation for Android builds.
pub mod android_log;

/// COIN-button rewarded ad flow.
pub mod coin;

/// Touch controller orchestrator.
pub mod controller;

/// Rules deciding which layout regions currently react to touches.
pub mod eligibility;

/// Redraw and haptic feedback on stick/button transitions.
pub mod feedback;

/// Seams to the emulator core and the UI host.
pub mod host;

/// Declarative layout resources and region geometry.
pub mod layout;

/// Multi-touch pointer bookkeeping.
pub mod pointer;

/// User preferences read by the input layer.
pub mod prefs;

/// Digital input bit layout and semantic ids.
pub mod values;
