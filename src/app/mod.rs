//! Application module - StripeBarApp and the eframe glue.
//!
//! - `run` - eframe::App implementation (per-frame update, input, state save)

mod run;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::config;
use crate::core::animator::Animator;
use crate::widgets::bar::{BarConfig, StripedBar};

/// Persisted application settings
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub dark_mode: bool,
}

/// Main application state.
///
/// Progress is runtime-only; just window geometry and settings survive
/// between runs.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct StripeBarApp {
    pub settings: AppSettings,
    #[serde(skip)]
    pub animator: Animator,
    #[serde(skip)]
    pub bar: StripedBar,
    #[serde(skip)]
    pub path_config: config::PathConfig,
}

impl Default for StripeBarApp {
    fn default() -> Self {
        Self::with_config(BarConfig::default())
    }
}

impl StripeBarApp {
    /// Build the app around a bar configuration.
    pub fn with_config(config: BarConfig) -> Self {
        let animator = Animator::new(config.period, config.step);
        Self {
            settings: AppSettings::default(),
            animator,
            bar: StripedBar::new(config),
            path_config: config::PathConfig::default(),
        }
    }

    /// Apply CLI timing overrides on top of the compiled-in defaults.
    pub fn apply_cli(&mut self, args: &Args) {
        let mut config = self.bar.config().clone();
        if let Some(period) = args.period() {
            config.period = period;
        }
        if let Some(step) = args.step {
            config.step = step;
        }
        if *self.bar.config() != config {
            log::info!(
                "Timing overrides: period {:?}, step {}",
                config.period,
                config.step
            );
            self.animator = Animator::new(config.period, config.step);
            self.bar = StripedBar::new(config);
        }
    }
}
