//! STRIPEBAR - Animated striped progress bar library
//!
//! Re-exports all modules for use by the binary target.

// Core engine (progress state machine, tick source)
pub mod core;

// App modules
pub mod app;
pub mod cli;
pub mod config;
pub mod widgets;

// Re-export commonly used types from core
pub use core::animator::{Animator, Phase, Ticker};

// Re-export widget types
pub use widgets::bar::{BarConfig, StripedBar};
pub use widgets::stripes::{StripeOverlay, StripeSpec};
