//! Navigation methods for `PortfolioApp`.
//!
//! Every state change funnels through `apply_intent`; keyboard shortcuts
//! and wheel gestures only produce intents.

use std::time::Duration;

use eframe::egui;

use orbit_portfolio::input::WheelEvent;
use orbit_portfolio::navigation::{NavIntent, Section, Transition};

use super::PortfolioApp;

impl PortfolioApp {
    /// Apply one intent to the navigator.
    pub fn apply_intent(&mut self, intent: NavIntent) {
        if let Transition::Changed { from, to } = self.navigator.apply(intent) {
            if from.view_mode() != to.view_mode() {
                log::debug!("view {:?} -> {:?}", from.view_mode(), to.view_mode());
            }
        }
    }

    /// Select a section if the current layout offers it.
    pub fn select(&mut self, section: Section) {
        if self.scene.config().sections.contains(&section) {
            self.apply_intent(NavIntent::Select(section));
        }
    }

    /// `Escape` goes back to the center, `1`..`4` pick the n-th section.
    pub fn handle_keys(&mut self, ctx: &egui::Context) {
        const DIGITS: [egui::Key; 4] = [
            egui::Key::Num1,
            egui::Key::Num2,
            egui::Key::Num3,
            egui::Key::Num4,
        ];

        if ctx.wants_keyboard_input() {
            return;
        }
        let (back, picked) = ctx.input(|i| {
            let back = i.key_pressed(egui::Key::Escape);
            let picked = DIGITS.iter().position(|k| i.key_pressed(*k));
            (back, picked)
        });

        if back {
            self.apply_intent(NavIntent::Back);
        }
        if let Some(idx) = picked {
            if let Some(section) = self.scene.config().sections.get(idx).copied() {
                self.select(section);
            }
        }
    }

    /// Feed this frame's wheel movement to the topmost mounted surface.
    pub fn route_wheel(&mut self, ctx: &egui::Context, elapsed: Duration) {
        // egui reports positive y when the content should move down, i.e.
        // the user scrolled up
        let raw = ctx.input(|i| i.raw_scroll_delta.y);
        if raw == 0.0 {
            return;
        }
        let Some(surface) = self.router.target() else {
            return;
        };

        let event = WheelEvent { delta_y: -raw };
        let intent = self.gestures.on_wheel(
            event,
            surface,
            self.navigator.state(),
            self.detail_offset,
            elapsed,
        );
        if let Some(intent) = intent {
            self.apply_intent(intent);
        }
    }
}
