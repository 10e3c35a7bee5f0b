//! Rewarded ad flow started by the COIN button.
//!
//! The ad network completes asynchronously. The host forwards its callbacks
//! to [`CoinFlow::on_loaded`] and [`CoinFlow::on_show_event`] on the UI
//! thread; nothing here blocks input handling or touches the input mask.

use crate::host::Host;
use log::{debug, info, warn};

pub const TOAST_LOAD_FAILED: &str = "Could not load the ad. Please try again later.";
pub const TOAST_SHOW_FAILED: &str = "Could not show the ad. Please try again later.";
pub const TOAST_NOT_READY: &str = "The ad is not ready yet.";

/// Ad network operations. Results arrive later through [`CoinFlow`].
pub trait RewardedAds {
    fn load(&mut self);
    fn is_ready(&self) -> bool;
    fn show(&mut self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShowEvent {
    Shown,
    Closed,
    Failed(String),
    NotReady,
    UserEarnedReward { amount: u32, kind: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    Loading,
    Showing,
}

#[derive(Clone, Debug, Default)]
pub struct CoinFlow {
    state: FlowState,
    credits: u32,
}

impl CoinFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Rewards granted so far.
    pub fn credits(&self) -> u32 {
        self.credits
    }

    /// Starts loading an ad ahead of the first COIN press.
    pub fn preload(&mut self, ads: &mut dyn RewardedAds) {
        if self.state == FlowState::Idle && !ads.is_ready() {
            ads.load();
        }
    }

    /// Called on a COIN press. Shows a ready ad or loads one first; repeated
    /// presses while a request is in flight are ignored.
    pub fn request(&mut self, ads: &mut dyn RewardedAds) {
        match self.state {
            FlowState::Idle if ads.is_ready() => {
                self.state = FlowState::Showing;
                ads.show();
            }
            FlowState::Idle => {
                self.state = FlowState::Loading;
                ads.load();
            }
            FlowState::Loading | FlowState::Showing => {
                debug!("Coin ad request ignored while {:?}", self.state);
            }
        }
    }

    pub fn on_loaded(
        &mut self,
        outcome: LoadOutcome,
        ads: &mut dyn RewardedAds,
        host: &mut dyn Host,
    ) {
        if self.state != FlowState::Loading {
            // Preload completion; the ad stays cached in the network SDK.
            return;
        }
        match outcome {
            LoadOutcome::Ready => {
                self.state = FlowState::Showing;
                ads.show();
            }
            LoadOutcome::Failed(reason) => {
                warn!("Rewarded ad failed to load: {reason}");
                self.state = FlowState::Idle;
                host.show_toast(TOAST_LOAD_FAILED);
            }
        }
    }

    pub fn on_show_event(&mut self, event: ShowEvent, host: &mut dyn Host) {
        match event {
            ShowEvent::Shown => self.state = FlowState::Showing,
            ShowEvent::Closed => self.state = FlowState::Idle,
            ShowEvent::Failed(reason) => {
                warn!("Rewarded ad failed to show: {reason}");
                self.state = FlowState::Idle;
                host.show_toast(TOAST_SHOW_FAILED);
            }
            ShowEvent::NotReady => {
                self.state = FlowState::Idle;
                host.show_toast(TOAST_NOT_READY);
            }
            ShowEvent::UserEarnedReward { amount, kind } => {
                info!("User earned reward: {amount} {kind}");
                self.credits = self.credits.saturating_add(amount);
            }
        }
    }
}
