//! Main viewport rendering for `PortfolioApp`: the 3D canvas and the 2D
//! detail page that replaces it.

use eframe::egui;

use orbit_portfolio::content::DetailBlock;
use orbit_portfolio::navigation::NavIntent;
use orbit_portfolio::render::paint;
use orbit_portfolio::scene::{pointer_ndc, FrameInput};

use super::PortfolioApp;
use crate::ui;

fn viewport(rect: egui::Rect) -> [f32; 4] {
    [rect.min.x, rect.min.y, rect.width(), rect.height()]
}

impl PortfolioApp {
    /// Run one scene update. Runs in both view modes so motion continues
    /// behind the detail page.
    pub fn advance_scene(&mut self, ctx: &egui::Context, dt: f32, elapsed: std::time::Duration) {
        let screen = viewport(ctx.screen_rect());
        let pointer = ctx
            .input(|i| i.pointer.hover_pos())
            .map(|p| pointer_ndc(screen, [p.x, p.y]));
        self.scene.update(&FrameInput {
            dt,
            elapsed: elapsed.as_secs_f32(),
            nav: self.navigator.state(),
            pointer_ndc: pointer,
        });
    }

    // ── 3D canvas ────────────────────────────────────────────────────────────

    /// Paint the scene and handle hover, click and drag on it.
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, interactive: bool) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        let nav = self.navigator.state();
        let frame = self.scene.project(viewport(rect), nav);

        if !interactive {
            paint::paint_scene(&painter, rect, &frame);
            return;
        }

        let hovered = response
            .hover_pos()
            .and_then(|p| frame.pick([p.x, p.y]));
        self.scene.set_hover(hovered);
        if hovered.is_some() && !response.dragged() {
            ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        if response.dragged() {
            let d = response.drag_delta();
            self.scene.drag(d.x, d.y);
        }

        if response.clicked() {
            if let Some(section) = hovered.and_then(|t| self.scene.section_for(t)) {
                self.apply_intent(NavIntent::Select(section));
            }
        }

        paint::paint_scene(&painter, rect, &frame);
    }

    // ── 2D detail page ───────────────────────────────────────────────────────

    /// Full-page detail view of the open section.
    pub fn draw_detail_page(&mut self, ui: &mut egui::Ui) {
        let Some(section) = self.navigator.state().active_section() else {
            return;
        };

        let bg = egui::Color32::from_rgb(12, 14, 26);
        ui.painter().rect_filled(ui.max_rect(), egui::Rounding::ZERO, bg);

        let mut area = egui::ScrollArea::vertical()
            .id_salt("detail_page")
            .auto_shrink([false, false]);
        if self.detail_reset {
            area = area.vertical_scroll_offset(0.0);
            self.detail_reset = false;
        }

        let content = &self.content;
        let textures = &self.textures;
        let output = area.show(ui, |ui| {
            let Some(data) = content.section(section) else {
                ui.colored_label(egui::Color32::RED, "No content for this section");
                return;
            };
            let width = ui.available_width().min(760.0);
            let margin = ((ui.available_width() - width) * 0.5).max(0.0);

            ui.horizontal(|ui| {
                ui.add_space(margin);
                ui.vertical(|ui| {
                    ui.set_max_width(width);
                    ui.add_space(120.0);
                    ui.label(
                        egui::RichText::new("\u{2191} scroll up at the top to return")
                            .size(12.0)
                            .color(ui::MUTED),
                    );
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new(&data.title)
                            .size(40.0)
                            .strong()
                            .color(egui::Color32::WHITE),
                    );
                    ui.add_space(12.0);
                    ui::markup(ui, &data.summary, 17.0);
                    ui.add_space(20.0);

                    for block in &data.details {
                        draw_block(ui, block, |rel| textures.get(&content.resolve(rel)));
                        ui.add_space(16.0);
                    }
                    ui.add_space(160.0);
                });
            });
        });

        self.detail_offset = output.state.offset.y;
    }
}

/// One detail block. `thumbnail` looks up a loaded texture by its
/// content-relative path.
fn draw_block<'a>(
    ui: &mut egui::Ui,
    block: &DetailBlock,
    thumbnail: impl Fn(&str) -> Option<&'a egui::TextureHandle>,
) {
    match block {
        DetailBlock::Paragraph { text } => {
            ui::markup(ui, text, 16.0);
        }
        DetailBlock::Project {
            title,
            description,
            tech,
            links,
            thumbnail: thumb,
        } => {
            egui::Frame::group(ui.style())
                .rounding(egui::Rounding::same(10.0))
                .inner_margin(egui::Margin::same(14.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    if let Some(tex) = thumb.as_deref().and_then(&thumbnail) {
                        let size = tex.size_vec2();
                        let max_w = ui.available_width();
                        let scale = (max_w / size.x).min(1.0);
                        ui.image((tex.id(), size * scale));
                        ui.add_space(8.0);
                    }
                    ui.label(egui::RichText::new(title).size(20.0).strong());
                    ui.add_space(4.0);
                    ui::markup(ui, description, 15.0);
                    if !tech.is_empty() {
                        ui.add_space(6.0);
                        ui.horizontal_wrapped(|ui| {
                            for t in tech {
                                ui::chip(ui, t);
                            }
                        });
                    }
                    if !links.is_empty() {
                        ui.add_space(6.0);
                        ui::link_row(ui, links, 14.0);
                    }
                });
        }
        DetailBlock::SkillCategory { name, skills } => {
            ui.label(egui::RichText::new(name).size(18.0).strong());
            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                for s in skills {
                    ui::chip(ui, s);
                }
            });
        }
        DetailBlock::Contact { email, links } => {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Email").size(16.0).color(ui::MUTED));
                ui::link(ui, email, &format!("mailto:{}", email), 16.0);
            });
            if !links.is_empty() {
                ui.add_space(4.0);
                ui::link_row(ui, links, 15.0);
            }
        }
    }
}
