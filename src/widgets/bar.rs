//! Striped progress bar widget - rounded track, eased fill, stripe overlay
//!
//! Geometry is a pure function of progress plus fixed configuration:
//! `inner_width` is the track width minus the inset on both sides, and
//! `fill_width = inner_width * progress`, clamped so the indicator never
//! escapes the track.

use std::time::Duration;

use eframe::egui;
use egui::{Color32, Rect, Sense, Vec2};

use crate::core::animator::{DEFAULT_PERIOD, DEFAULT_STEP};
use crate::widgets::stripes::{StripeOverlay, StripeSpec};

/// Fixed configuration of the bar. Defaults match the reference design:
/// 250x30 track, 2pt inset, 15/13 corner radii, black-on-translucent-white
/// with half-alpha black stripes.
#[derive(Debug, Clone, PartialEq)]
pub struct BarConfig {
    /// Outer track size
    pub track_size: Vec2,
    /// Gap between track edge and indicator, each side
    pub inset: f32,
    /// Track corner radius
    pub track_radius: f32,
    /// Indicator corner radius; slightly smaller so it nests inside the track
    pub fill_radius: f32,
    pub track_color: Color32,
    pub fill_color: Color32,
    pub stripe: StripeSpec,
    /// Tick period of the driving animator
    pub period: Duration,
    /// Progress increment per tick
    pub step: f64,
    /// Seconds of easing applied to each width change
    pub ease_time: f32,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            track_size: egui::vec2(250.0, 30.0),
            inset: 2.0,
            track_radius: 15.0,
            fill_radius: 13.0,
            track_color: Color32::BLACK,
            fill_color: Color32::from_white_alpha(204),
            stripe: StripeSpec::default(),
            period: DEFAULT_PERIOD,
            step: DEFAULT_STEP,
            ease_time: 0.02,
        }
    }
}

impl BarConfig {
    /// Width available to the indicator at 100%.
    pub fn inner_width(&self) -> f32 {
        (self.track_size.x - 2.0 * self.inset).max(0.0)
    }

    /// Indicator width for a progress fraction, clamped to the inner width.
    pub fn fill_width(&self, progress: f64) -> f32 {
        let w = (self.inner_width() as f64 * progress) as f32;
        w.clamp(0.0, self.inner_width())
    }
}

/// The widget: owns the stripe overlay and paints track, indicator and
/// pattern in one pass.
pub struct StripedBar {
    config: BarConfig,
    overlay: StripeOverlay,
}

impl Default for StripedBar {
    fn default() -> Self {
        Self::new(BarConfig::default())
    }
}

impl StripedBar {
    pub fn new(config: BarConfig) -> Self {
        let overlay = StripeOverlay::new(config.stripe);
        Self { config, overlay }
    }

    pub fn config(&self) -> &BarConfig {
        &self.config
    }

    /// Render at the given progress.
    ///
    /// Width changes are smoothed with a short easing so the discrete ticks
    /// read as continuous motion; the stripe fill is painted over the eased
    /// rect in the same pass, so pattern and indicator never diverge.
    pub fn render(&mut self, ui: &mut egui::Ui, progress: f64) {
        let (rect, _response) = ui.allocate_exact_size(self.config.track_size, Sense::hover());

        ui.painter()
            .rect_filled(rect, self.config.track_radius, self.config.track_color);

        let target = self.config.fill_width(progress);
        let width = ui.ctx().animate_value_with_time(
            ui.id().with("fill_width"),
            target,
            self.config.ease_time,
        );
        let width = width.clamp(0.0, self.config.inner_width());
        if width <= 0.0 {
            return;
        }

        let inner = rect.shrink(self.config.inset);
        let fill_rect = Rect::from_min_size(inner.min, egui::vec2(width, inner.height()));
        ui.painter()
            .rect_filled(fill_rect, self.config.fill_radius, self.config.fill_color);

        self.overlay.paint(ui, fill_rect, self.config.fill_radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_width_default() {
        let config = BarConfig::default();
        assert_eq!(config.inner_width(), 246.0);
    }

    #[test]
    fn test_fill_width_linear() {
        let config = BarConfig::default();
        assert_eq!(config.fill_width(0.0), 0.0);
        assert!((config.fill_width(0.5) - 123.0).abs() < 1e-4);
        assert_eq!(config.fill_width(1.0), 246.0);
    }

    #[test]
    fn test_fill_width_clamped() {
        let config = BarConfig::default();
        assert_eq!(config.fill_width(1.5), 246.0);
        assert_eq!(config.fill_width(-0.25), 0.0);
    }

    #[test]
    fn test_scenario_246_at_20_ticks() {
        // 20 ticks of 0.005 = progress 0.1 on the default 246 inner width
        let config = BarConfig::default();
        let progress = 20.0 * 0.005;
        assert!((config.fill_width(progress) - 24.6).abs() < 1e-4);
    }

    #[test]
    fn test_scenario_187_at_40_ticks() {
        // Narrow variant: 191-wide track leaves 187 for the indicator
        let config = BarConfig {
            track_size: egui::vec2(191.0, 30.0),
            ..BarConfig::default()
        };
        assert_eq!(config.inner_width(), 187.0);

        let progress = 40.0 * 0.005;
        assert!((config.fill_width(progress) - 37.4).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_track_has_no_inner_width() {
        let config = BarConfig {
            track_size: egui::vec2(3.0, 30.0),
            ..BarConfig::default()
        };
        assert_eq!(config.inner_width(), 0.0);
        assert_eq!(config.fill_width(1.0), 0.0);
    }
}
