//! Generic egui UI helper functions shared by the overlay and the detail
//! page.
//!
//! Stateless functions that turn parsed inline markup into egui widgets,
//! plus link helpers.

use eframe::egui;
use orbit_portfolio::content::{parse_inline, LinkSpec, Span};

pub const LINK_COLOR: egui::Color32 = egui::Color32::from_rgb(135, 206, 235);
pub const MUTED: egui::Color32 = egui::Color32::from_rgb(160, 165, 180);

// ─── Inline markup ────────────────────────────────────────────────────────────

/// Render an inline-markup fragment as wrapped rich text.
pub fn markup(ui: &mut egui::Ui, source: &str, size: f32) {
    spans(ui, &parse_inline(source), size);
}

/// Render parsed spans as wrapped rich text; links open in the browser.
pub fn spans(ui: &mut egui::Ui, spans: &[Span], size: f32) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in spans {
            match span {
                Span::Text(t) => {
                    ui.label(egui::RichText::new(t).size(size));
                }
                Span::Strong(t) => {
                    ui.label(egui::RichText::new(t).size(size).strong());
                }
                Span::Emphasis(t) => {
                    ui.label(egui::RichText::new(t).size(size).italics());
                }
                Span::Link { text, href } => {
                    link(ui, text, href, size);
                }
                Span::LineBreak => {
                    ui.end_row();
                }
            }
        }
    });
}

// ─── Links ────────────────────────────────────────────────────────────────────

/// A hyperlink in the overlay style. Returns true when clicked.
pub fn link(ui: &mut egui::Ui, text: &str, href: &str, size: f32) -> bool {
    let rt = egui::RichText::new(text)
        .size(size)
        .color(LINK_COLOR)
        .underline();
    let response = ui
        .add(egui::Label::new(rt).sense(egui::Sense::click()))
        .on_hover_cursor(egui::CursorIcon::PointingHand)
        .on_hover_text(href);
    let clicked = response.clicked();
    if clicked {
        ui.ctx().open_url(egui::OpenUrl::new_tab(href));
    }
    clicked
}

/// A row of links separated by dots.
pub fn link_row(ui: &mut egui::Ui, links: &[LinkSpec], size: f32) {
    ui.horizontal_wrapped(|ui| {
        for (i, l) in links.iter().enumerate() {
            if i > 0 {
                ui.label(egui::RichText::new("\u{00B7}").color(MUTED));
            }
            link(ui, &l.label, &l.href, size);
        }
    });
}

/// A small rounded tag, used for tech and skill lists.
pub fn chip(ui: &mut egui::Ui, text: &str) {
    egui::Frame::none()
        .fill(egui::Color32::from_rgba_unmultiplied(135, 206, 235, 28))
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::symmetric(8.0, 3.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).size(13.0));
        });
}
