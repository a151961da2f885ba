//! Main application loop - eframe::App implementation.
//!
//! Runs each frame:
//! - Poll the animator (due ticks from the wall clock)
//! - Render the bar and the label row
//! - Keyboard input
//! - Schedule the next repaint while the animation runs

use std::time::Instant;

use eframe::egui;
use log::{debug, trace};

use crate::app::StripeBarApp;

/// Gap between the bar and the label row
const LABEL_GAP: f32 = 30.0;

/// Fixed width of the label row ("Loading..." left, percent right)
const LABEL_STACK_WIDTH: f32 = 210.0;

const LABEL_HEIGHT: f32 = 28.0;
const LABEL_FONT_SIZE: f32 = 22.0;

impl eframe::App for StripeBarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme based on settings
        if self.settings.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // Advance the animation by however many ticks are due
        let now = Instant::now();
        let applied = self.animator.update(now);
        if applied > 0 {
            trace!(
                "{} tick(s) -> progress {:.3} ({})",
                applied,
                self.animator.progress(),
                self.animator.percent_text()
            );
        }

        let progress = self.animator.progress();
        let percent_text = self.animator.percent_text();
        let track_size = self.bar.config().track_size;

        egui::CentralPanel::default().show(ctx, |ui| {
            // Center the bar + labels block vertically
            let content_height = track_size.y + LABEL_GAP + LABEL_HEIGHT;
            let top_pad = ((ui.available_height() - content_height) * 0.5).max(0.0);
            ui.add_space(top_pad);

            ui.vertical_centered(|ui| {
                self.bar.render(ui, progress);

                ui.add_space(LABEL_GAP);

                ui.allocate_ui_with_layout(
                    egui::vec2(LABEL_STACK_WIDTH, LABEL_HEIGHT),
                    egui::Layout::left_to_right(egui::Align::Center),
                    |ui| {
                        ui.label(
                            egui::RichText::new("Loading...")
                                .size(LABEL_FONT_SIZE)
                                .strong(),
                        );
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.label(
                                    egui::RichText::new(percent_text.as_str())
                                        .size(LABEL_FONT_SIZE)
                                        .strong(),
                                );
                            },
                        );
                    },
                );
            });
        });

        self.handle_keyboard_input(ctx);

        // Keep repainting while running; once complete the last frame stays
        // put and the event loop goes idle
        if self.animator.is_running() {
            match self.animator.until_next_tick(now) {
                Some(wait) => ctx.request_repaint_after(wait),
                None => ctx.request_repaint(),
            }
        }
    }

    /// Save app state to persistent storage.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(json) = serde_json::to_string(self) {
            storage.set_string(eframe::APP_KEY, json);
            trace!("App state saved: dark_mode={}", self.settings.dark_mode);
        }
    }
}

impl StripeBarApp {
    /// Handle keyboard shortcuts (R: restart, D: dark mode).
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        // Don't process hotkeys when text input is active
        if ctx.wants_keyboard_input() {
            return;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::R)) {
            debug!("Restart requested");
            self.animator.restart(Instant::now());
            ctx.request_repaint();
        }

        if ctx.input(|i| i.key_pressed(egui::Key::D)) {
            self.settings.dark_mode = !self.settings.dark_mode;
            debug!("Dark mode: {}", self.settings.dark_mode);
            ctx.request_repaint();
        }
    }
}
