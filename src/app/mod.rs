//! `PortfolioApp`: the top-level egui application state.
//!
//! This module declares the `PortfolioApp` struct, its constructor and the
//! frame loop. The drawing and input methods are split across the sibling
//! sub-modules:
//!
//! - `navigation`: intents, keyboard shortcuts, wheel routing
//! - `overlay`:    header, navigation buttons, content panel
//! - `content`:    3D canvas and the 2D detail page

pub mod navigation;
pub mod overlay;
pub mod content;

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use eframe::egui;

use orbit_portfolio::assets::AssetLoader;
use orbit_portfolio::content::ContentPayload;
use orbit_portfolio::input::{ScrollGestures, SurfaceKind, WheelRouter, WheelSubscription};
use orbit_portfolio::loading::LoadingGate;
use orbit_portfolio::navigation::{Navigator, ViewMode};
use orbit_portfolio::render::paint;
use orbit_portfolio::scene::{PortfolioScene, SceneConfig};

// ─── Application state ───────────────────────────────────────────────────────

pub struct PortfolioApp {
    pub content: ContentPayload,
    pub scene: PortfolioScene,
    pub navigator: Navigator,
    pub gate: LoadingGate,
    pub assets: AssetLoader,
    pub textures: HashMap<PathBuf, egui::TextureHandle>,
    // Wheel input
    pub router: WheelRouter,
    pub gestures: ScrollGestures,
    pub canvas_listener: Option<WheelSubscription>,
    pub detail_listener: Option<WheelSubscription>,
    /// Detail page scroll offset as of the last frame (0 = top).
    pub detail_offset: f32,
    /// Scroll the detail page back to the top on its next frame.
    pub detail_reset: bool,
    pub app_start: Instant,
    pub last_frame_time: Instant,
}

impl PortfolioApp {
    pub fn new(content: ContentPayload, config: SceneConfig) -> Self {
        let mut assets = AssetLoader::new();
        for path in content.asset_paths() {
            assets.request(&path);
        }
        log::info!(
            "{} sections, {} assets pending",
            content.sections.len(),
            assets.pending_count()
        );

        Self {
            content,
            scene: PortfolioScene::new(config),
            navigator: Navigator::new(),
            gate: LoadingGate::default(),
            assets,
            textures: HashMap::new(),
            router: WheelRouter::new(),
            gestures: ScrollGestures::default(),
            canvas_listener: None,
            detail_listener: None,
            detail_offset: 0.0,
            detail_reset: false,
            app_start: Instant::now(),
            last_frame_time: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.app_start.elapsed()
    }

    /// Convert finished decodes into textures.
    fn upload_textures(&mut self, ctx: &egui::Context) {
        self.assets.poll();
        for path in self.assets.loaded_paths() {
            if self.textures.contains_key(&path) {
                continue;
            }
            if let Some(data) = self.assets.take(&path) {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [data.width as usize, data.height as usize],
                    &data.rgba,
                );
                let tex = ctx.load_texture(
                    format!("thumb_{}", path.display()),
                    image,
                    egui::TextureOptions::LINEAR,
                );
                self.textures.insert(path, tex);
            }
        }
    }

    /// Mount / unmount wheel listeners to match what is on screen.
    fn sync_listeners(&mut self) {
        if self.gate.is_revealed() && self.canvas_listener.is_none() {
            self.canvas_listener = Some(self.router.subscribe(SurfaceKind::Canvas));
        }
        let detail_mounted = self.navigator.state().view_mode() == ViewMode::TwoD;
        match (detail_mounted, self.detail_listener.is_some()) {
            (true, false) => {
                self.detail_listener = Some(self.router.subscribe(SurfaceKind::DetailPanel));
                self.detail_offset = 0.0;
                self.detail_reset = true;
            }
            (false, true) => self.detail_listener = None,
            _ => {}
        }
    }
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        let elapsed = self.elapsed();

        self.upload_textures(ctx);
        if self.gate.poll(elapsed, self.assets.is_settled()).is_some() {
            self.navigator.unlock();
        }

        self.handle_keys(ctx);
        self.route_wheel(ctx, elapsed);
        self.sync_listeners();
        self.advance_scene(ctx, dt, elapsed);

        let revealed = self.gate.is_revealed();
        let detail = self.navigator.state().view_mode() == ViewMode::TwoD;

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                if detail {
                    self.draw_detail_page(ui);
                } else {
                    self.draw_canvas(ui, ctx, revealed);
                }
            });

        if revealed {
            self.draw_header(ctx);
            self.draw_nav(ctx);
            if !detail {
                self.draw_content_panel(ctx);
            }
        }

        let alpha = self.gate.overlay_alpha(elapsed);
        if alpha > 0.0 {
            let painter = ctx.layer_painter(egui::LayerId::new(
                egui::Order::Foreground,
                egui::Id::new("loading"),
            ));
            paint::paint_loading(
                &painter,
                ctx.screen_rect(),
                self.gate.progress_percent(elapsed),
                alpha,
            );
        }

        ctx.request_repaint();
    }
}
