//! Overlay rendering for `PortfolioApp`.
//!
//! Draws the header (name, tagline, social links, resume), the section
//! navigation buttons with "Back to Center", and the content panel shown
//! while a section is open in the 3D view.

use eframe::egui;

use orbit_portfolio::navigation::NavIntent;

use super::PortfolioApp;
use crate::ui;

/// Translucent card behind overlay text.
fn card() -> egui::Frame {
    egui::Frame::none()
        .fill(egui::Color32::from_rgba_unmultiplied(10, 12, 24, 190))
        .rounding(egui::Rounding::same(10.0))
        .inner_margin(egui::Margin::same(16.0))
}

impl PortfolioApp {
    /// Name, tagline and links in the top-left corner.
    pub fn draw_header(&mut self, ctx: &egui::Context) {
        egui::Area::new(egui::Id::new("header"))
            .anchor(egui::Align2::LEFT_TOP, [24.0, 20.0])
            .order(egui::Order::Middle)
            .show(ctx, |ui| {
                let profile = &self.content.profile;
                ui.label(
                    egui::RichText::new(&profile.name)
                        .size(30.0)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
                ui.label(egui::RichText::new(&profile.tagline).size(16.0).color(ui::MUTED));
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui::link_row(ui, &profile.links, 14.0);
                    if let Some(resume) = &profile.resume {
                        ui.add_space(8.0);
                        if ui
                            .button("\u{2B07} Resume")
                            .on_hover_text(resume.as_str())
                            .clicked()
                        {
                            match self.resume_url(resume) {
                                Some(url) => ctx.open_url(egui::OpenUrl::new_tab(url)),
                                None => log::warn!("resume not found: {}", resume),
                            }
                        }
                    }
                });
            });
    }

    /// `file://` URL of the resume document.
    fn resume_url(&self, rel: &str) -> Option<String> {
        let path = self.content.resolve(rel);
        let path = if path.is_absolute() {
            path
        } else {
            std::env::current_dir().ok()?.join(path)
        };
        if !path.exists() {
            return None;
        }
        url::Url::from_file_path(&path).ok().map(String::from)
    }

    /// Section buttons along the bottom edge.
    pub fn draw_nav(&mut self, ctx: &egui::Context) {
        let state = self.navigator.state();
        let mut intent = None;

        egui::Area::new(egui::Id::new("nav"))
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -24.0])
            .order(egui::Order::Middle)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 10.0;
                    for section in &self.scene.config().sections {
                        let selected = state.is_active(*section);
                        let text = egui::RichText::new(section.label()).size(16.0);
                        if ui
                            .add(egui::SelectableLabel::new(selected, text))
                            .on_hover_cursor(egui::CursorIcon::PointingHand)
                            .clicked()
                        {
                            intent = Some(NavIntent::Select(*section));
                        }
                    }
                    if state.active_section().is_some() {
                        ui.separator();
                        if ui
                            .button(egui::RichText::new("Back to Center").size(16.0))
                            .clicked()
                        {
                            intent = Some(NavIntent::Back);
                        }
                    }
                });
            });

        if let Some(intent) = intent {
            self.apply_intent(intent);
        }
    }

    /// Title and summary of the open section, with a hint about the detail
    /// page.
    pub fn draw_content_panel(&mut self, ctx: &egui::Context) {
        let Some(section) = self.navigator.state().active_section() else {
            return;
        };
        let Some(data) = self.content.section(section) else {
            return;
        };

        egui::Area::new(egui::Id::new("content"))
            .anchor(egui::Align2::LEFT_CENTER, [24.0, 0.0])
            .order(egui::Order::Middle)
            .show(ctx, |ui| {
                card().show(ui, |ui| {
                    ui.set_max_width(380.0);
                    ui.label(
                        egui::RichText::new(&data.title)
                            .size(26.0)
                            .strong()
                            .color(egui::Color32::WHITE),
                    );
                    ui.add_space(8.0);
                    ui::markup(ui, &data.summary, 15.0);
                    if !data.details.is_empty() {
                        ui.add_space(10.0);
                        ui.label(
                            egui::RichText::new("\u{2193} scroll for details")
                                .size(12.0)
                                .color(ui::MUTED),
                        );
                    }
                });
            });
    }
}
