//! egui Painter drawing of a projected scene frame and the loading screen.
//!
//! Layer order: stars, trails, satellites behind the core, core points,
//! satellites in front of the core, labels.

use egui::{Align2, Color32, FontId, Pos2, Rect, Rounding, Stroke, Vec2};

use crate::render::animator::LabelStyle;
use crate::scene::{FrameProjection, SatelliteView, TrailView};

/// Scene colors.
struct Palette {
    background: Color32,
    label: Color32,
    label_shadow: Color32,
    loading_bg: Color32,
    loading_text: Color32,
    loading_track: Color32,
    loading_bar: Color32,
}

impl Palette {
    fn night() -> Self {
        Self {
            background: Color32::from_rgb(5, 5, 12),
            label: Color32::WHITE,
            label_shadow: Color32::from_rgba_unmultiplied(0, 0, 0, 200),
            loading_bg: Color32::from_rgb(8, 8, 16),
            loading_text: Color32::from_rgb(220, 225, 235),
            loading_track: Color32::from_rgb(40, 44, 60),
            loading_bar: Color32::from_rgb(135, 206, 235),
        }
    }
}

/// Paint one frame into `rect`.
pub fn paint_scene(painter: &egui::Painter, rect: Rect, frame: &FrameProjection) {
    let palette = Palette::night();
    painter.rect_filled(rect, Rounding::ZERO, palette.background);

    for star in &frame.stars {
        let grey = (star.brightness * 255.0) as u8;
        painter.circle_filled(
            pos(star.pos),
            (star.size * 0.5).max(0.5),
            Color32::from_gray(grey),
        );
    }

    for trail in &frame.trails {
        draw_trail(painter, trail);
    }

    let (behind, in_front): (Vec<&SatelliteView>, Vec<&SatelliteView>) = frame
        .satellites
        .iter()
        .partition(|s| s.depth > frame.core_depth);

    for sat in &behind {
        draw_satellite(painter, sat);
    }

    let core_color = rgb(frame.core_color);
    let core_color = if frame.core_hovered {
        lerp_color(core_color, Color32::WHITE, 0.25)
    } else {
        core_color
    };
    let r = frame.core_point_size * 0.5;
    for p in &frame.core_points {
        painter.circle_filled(pos(*p), r, core_color);
    }

    for sat in &in_front {
        draw_satellite(painter, sat);
    }

    for sat in &frame.satellites {
        if let Some(label) = &sat.label {
            draw_label(
                painter,
                pos(label.pos),
                &label.text,
                label.style,
                label.scale,
                &palette,
            );
        }
    }
}

/// Loading overlay: percentage, progress bar, fading by `alpha`.
pub fn paint_loading(painter: &egui::Painter, rect: Rect, percent: u32, alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    let palette = Palette::night();
    let fade = |c: Color32| c.gamma_multiply(alpha.clamp(0.0, 1.0));

    painter.rect_filled(rect, Rounding::ZERO, fade(palette.loading_bg));

    let center = rect.center();
    painter.text(
        center - Vec2::new(0.0, 36.0),
        Align2::CENTER_CENTER,
        "Loading",
        FontId::proportional(22.0),
        fade(palette.loading_text),
    );

    let bar = progress_bar_rect(center, rect.width(), percent);
    painter.rect_filled(bar.track, Rounding::same(3.0), fade(palette.loading_track));
    painter.rect_filled(bar.fill, Rounding::same(3.0), fade(palette.loading_bar));

    painter.text(
        center + Vec2::new(0.0, 30.0),
        Align2::CENTER_CENTER,
        format!("{}%", percent),
        FontId::monospace(16.0),
        fade(palette.loading_text),
    );
}

struct ProgressBar {
    track: Rect,
    fill: Rect,
}

fn progress_bar_rect(center: Pos2, available_width: f32, percent: u32) -> ProgressBar {
    let width = (available_width * 0.4).clamp(120.0, 420.0);
    let track = Rect::from_center_size(center, Vec2::new(width, 6.0));
    let filled = width * percent.min(100) as f32 / 100.0;
    let fill = Rect::from_min_size(track.min, Vec2::new(filled, track.height()));
    ProgressBar { track, fill }
}

// ── Drawing functions ──

fn draw_trail(painter: &egui::Painter, trail: &TrailView) {
    let base = rgb(trail.color);
    for pair in trail.points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let width = (a.width + b.width) * 0.5;
        let alpha = (a.alpha + b.alpha) * 0.5;
        if width < 0.1 || alpha <= 0.0 {
            continue;
        }
        painter.line_segment(
            [pos(a.pos), pos(b.pos)],
            Stroke::new(width, base.gamma_multiply(alpha)),
        );
    }
}

fn draw_satellite(painter: &egui::Painter, sat: &SatelliteView) {
    let base = rgb(sat.color);
    let center = pos(sat.center);

    // Lit from the upper right; emissive while hovered.
    let body = if sat.hovered {
        base
    } else {
        lerp_color(Color32::BLACK, base, 0.55)
    };
    painter.circle_filled(center, sat.radius, body);

    let highlight_offset = Vec2::new(sat.radius * 0.3, -sat.radius * 0.3);
    painter.circle_filled(
        center + highlight_offset,
        sat.radius * 0.45,
        lerp_color(body, base, 0.7),
    );
    painter.circle_filled(
        center + highlight_offset * 1.4,
        sat.radius * 0.15,
        lerp_color(base, Color32::WHITE, 0.6),
    );

    if sat.hovered {
        painter.circle_stroke(
            center,
            sat.radius + 1.5,
            Stroke::new(1.5, lerp_color(base, Color32::WHITE, 0.4)),
        );
    }
}

fn draw_label(
    painter: &egui::Painter,
    anchor: Pos2,
    text: &str,
    style: LabelStyle,
    scale: f32,
    palette: &Palette,
) {
    let px = (style.font_size * scale).max(1.0);
    let galley = painter.layout_no_wrap(text.to_string(), FontId::proportional(px), palette.label);
    let size = galley.rect.size();
    let top_left = label_top_left(anchor, size, style.offset_percent);

    painter.galley(
        top_left + Vec2::new(0.0, 2.0),
        painter.layout_no_wrap(text.to_string(), FontId::proportional(px), palette.label_shadow),
        palette.label_shadow,
    );
    if style.bold {
        painter.galley(top_left + Vec2::new(0.6, 0.0), galley.clone(), palette.label);
    }
    painter.galley(top_left, galley, palette.label);
}

/// Label box placement: horizontally centered on the anchor, shifted
/// vertically by `offset_percent` of its own height.
fn label_top_left(anchor: Pos2, size: Vec2, offset_percent: f32) -> Pos2 {
    Pos2::new(
        anchor.x - size.x * 0.5,
        anchor.y + size.y * offset_percent / 100.0,
    )
}

fn pos(p: [f32; 2]) -> Pos2 {
    Pos2::new(p[0], p[1])
}

fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let m = |a: u8, b: u8| ((a as f32) * (1.0 - t) + (b as f32) * t) as u8;
    Color32::from_rgba_unmultiplied(m(a.r(), b.r()), m(a.g(), b.g()), m(a.b(), b.b()), m(a.a(), b.a()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_label_straddles_anchor() {
        let tl = label_top_left(Pos2::new(100.0, 100.0), Vec2::new(40.0, 20.0), -50.0);
        assert!((tl.x - 80.0).abs() < 1e-4);
        assert!((tl.y - 90.0).abs() < 1e-4);
    }

    #[test]
    fn lifted_label_moves_up_four_heights() {
        let tl = label_top_left(Pos2::new(0.0, 200.0), Vec2::new(10.0, 20.0), -400.0);
        assert!((tl.y - 120.0).abs() < 1e-4);
    }

    #[test]
    fn progress_fill_tracks_percent() {
        let bar = progress_bar_rect(Pos2::new(500.0, 400.0), 1000.0, 50);
        assert!((bar.track.width() - 400.0).abs() < 1e-3);
        assert!((bar.fill.width() - 200.0).abs() < 1e-3);
        assert_eq!(bar.fill.min, bar.track.min);

        let full = progress_bar_rect(Pos2::new(500.0, 400.0), 1000.0, 250);
        assert!((full.fill.width() - full.track.width()).abs() < 1e-3);
    }

    #[test]
    fn lerp_colors() {
        let a = Color32::from_rgb(0, 0, 0);
        let b = Color32::from_rgb(100, 200, 50);
        let mid = lerp_color(a, b, 0.5);
        assert_eq!(mid.r(), 50);
        assert_eq!(mid.g(), 100);
        assert_eq!(mid.b(), 25);
    }
}
