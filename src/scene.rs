//! The 3D portfolio scene: central point cloud, orbiting satellites,
//! starfield and camera rig, advanced once per frame from a `FrameInput`
//! and flattened into a `FrameProjection` for painting and picking.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::fast_math::{length3, Vec3};
use crate::navigation::{NavState, Section};
use crate::render::animator::{
    CoreAnimator, LabelStyle, LabelTuning, Satellite, SatelliteSpec, StarParallax,
};
use crate::render::camera::{pose_for, Camera, CameraPose, CameraRig};
use crate::render::geometry::{Star, StarShell, TorusKnot};
use crate::render::projection::{segment_hits_sphere, Projector};

/// Pointer radius (screen points) for hitting a core point.
const CORE_PICK_RADIUS: f32 = 6.0;
/// Trail ribbon width in world units at full strength.
const TRAIL_WORLD_WIDTH: f32 = 0.25;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Configuration
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Scene layout and behavior switches.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Sections offered by the navigation, in button order.
    pub sections: Vec<Section>,
    pub satellites: Vec<SatelliteSpec>,
    pub labels: LabelTuning,
    /// Section opened by clicking the central object.
    pub core_section: Section,
    pub core_color: [u8; 3],
    pub knot: TorusKnot,
    pub stars: StarShell,
    /// Star shell leans toward the pointer.
    pub star_parallax: bool,
    /// Samples kept per satellite trail; 0 disables trails.
    pub trail_length: usize,
    /// Hide labels while the core sits between camera and label.
    pub label_occlusion: bool,
    /// Radius of the sphere used for label occlusion.
    pub occluder_radius: f32,
    /// Drag-to-orbit while no section is active.
    pub free_orbit_at_center: bool,
    pub center_pose: CameraPose,
    pub initial_camera: Vec3,
}

impl Default for SceneConfig {
    /// Extended layout: About satellite, trails, occlusion, free orbit.
    fn default() -> Self {
        Self {
            sections: Section::ALL.to_vec(),
            satellites: vec![
                SatelliteSpec {
                    section: Section::About,
                    text: "About".into(),
                    color: [147, 112, 219],
                    home: [0.0, 3.0, 6.0],
                    orbit_radius: 7.0,
                    phase: FRAC_PI_2,
                    active_scale: 1.2,
                },
                SatelliteSpec {
                    section: Section::Projects,
                    text: "Projects".into(),
                    color: [255, 165, 0],
                    home: [8.0, -2.0, 0.0],
                    orbit_radius: 8.0,
                    phase: 0.0,
                    active_scale: 1.8,
                },
                SatelliteSpec {
                    section: Section::Skills,
                    text: "Skills".into(),
                    color: [30, 144, 255],
                    home: [-8.0, -2.0, 0.0],
                    orbit_radius: 8.0,
                    phase: PI,
                    active_scale: 1.8,
                },
            ],
            labels: LabelTuning::default(),
            core_section: Section::Contact,
            core_color: [135, 206, 235],
            knot: TorusKnot::default(),
            stars: StarShell::default(),
            star_parallax: true,
            trail_length: 24,
            label_occlusion: true,
            occluder_radius: 2.2,
            free_orbit_at_center: true,
            center_pose: CameraPose::new([0.0, 2.0, 25.0], [0.0; 3]),
            initial_camera: [0.0, 2.0, 25.0],
        }
    }
}

impl SceneConfig {
    /// Classic layout: two satellites on the equator, small labels that
    /// lift when active, camera always directed.
    pub fn classic() -> Self {
        let base = Self::default();
        Self {
            sections: vec![Section::Projects, Section::Skills, Section::Contact],
            satellites: vec![
                SatelliteSpec {
                    section: Section::Projects,
                    text: "Projects".into(),
                    color: [255, 165, 0],
                    home: [8.0, 0.0, 0.0],
                    orbit_radius: 8.0,
                    phase: 0.0,
                    active_scale: 1.8,
                },
                SatelliteSpec {
                    section: Section::Skills,
                    text: "Skills".into(),
                    color: [30, 144, 255],
                    home: [-8.0, 0.0, 0.0],
                    orbit_radius: 8.0,
                    phase: PI,
                    active_scale: 1.8,
                },
            ],
            labels: LabelTuning {
                inactive_size: 14.0,
                active_size: 32.0,
                smoothing: 0.1,
                inactive_offset: -50.0,
                active_offset: -400.0,
                bold_when_active: false,
                anchor_height: 0.0,
                distance_factor: 12.0,
            },
            star_parallax: false,
            trail_length: 0,
            label_occlusion: false,
            free_orbit_at_center: false,
            center_pose: CameraPose::new([0.0, 2.0, 18.0], [0.0; 3]),
            initial_camera: [0.0, 2.0, 18.0],
            ..base
        }
    }

    pub fn satellite_for(&self, section: Section) -> Option<&SatelliteSpec> {
        self.satellites.iter().find(|s| s.section == section)
    }
}

/// Named layouts selectable at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScenePreset {
    Classic,
    #[default]
    Extended,
}

impl ScenePreset {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" => Some(Self::Classic),
            "extended" => Some(Self::Extended),
            _ => None,
        }
    }

    pub fn config(self) -> SceneConfig {
        match self {
            Self::Classic => SceneConfig::classic(),
            Self::Extended => SceneConfig::default(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Frame data
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Everything one scene update reads.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Seconds since the scene was mounted.
    pub elapsed: f32,
    pub nav: NavState,
    /// Pointer in normalized device coordinates (x right, y up).
    pub pointer_ndc: Option<[f32; 2]>,
}

/// Pointer position in normalized device coordinates for `viewport`
/// (min_x, min_y, width, height).
pub fn pointer_ndc(viewport: [f32; 4], pos: [f32; 2]) -> [f32; 2] {
    let hw = (viewport[2] * 0.5).max(1.0);
    let hh = (viewport[3] * 0.5).max(1.0);
    [
        ((pos[0] - viewport[0] - hw) / hw).clamp(-1.0, 1.0),
        (-(pos[1] - viewport[1] - hh) / hh).clamp(-1.0, 1.0),
    ]
}

/// What the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    Core,
    Satellite(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarView {
    pub pos: [f32; 2],
    pub size: f32,
    pub brightness: f32,
}

#[derive(Debug, Clone)]
pub struct LabelView {
    pub pos: [f32; 2],
    pub text: String,
    pub style: LabelStyle,
    /// Screen scale applied to `style.font_size`.
    pub scale: f32,
}

#[derive(Debug, Clone)]
pub struct SatelliteView {
    pub index: usize,
    pub section: Section,
    pub center: [f32; 2],
    pub radius: f32,
    pub depth: f32,
    pub color: [u8; 3],
    pub hovered: bool,
    pub active: bool,
    /// `None` while occluded or behind the camera.
    pub label: Option<LabelView>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: [f32; 2],
    pub width: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone)]
pub struct TrailView {
    pub color: [u8; 3],
    pub points: Vec<TrailPoint>,
}

/// A painted frame, in screen points.
#[derive(Debug, Clone, Default)]
pub struct FrameProjection {
    pub stars: Vec<StarView>,
    pub core_points: Vec<[f32; 2]>,
    pub core_depths: Vec<f32>,
    pub core_point_size: f32,
    pub core_color: [u8; 3],
    pub core_hovered: bool,
    /// Distance from the camera to the core center.
    pub core_depth: f32,
    /// Sorted far to near.
    pub satellites: Vec<SatelliteView>,
    pub trails: Vec<TrailView>,
}

impl FrameProjection {
    /// Topmost object under `pointer`: satellites and core points compete on
    /// depth.
    pub fn pick(&self, pointer: [f32; 2]) -> Option<PickTarget> {
        let mut best: Option<(f32, PickTarget)> = None;
        let mut consider = |depth: f32, target: PickTarget| {
            if best.map_or(true, |(d, _)| depth < d) {
                best = Some((depth, target));
            }
        };

        for sat in &self.satellites {
            let dx = pointer[0] - sat.center[0];
            let dy = pointer[1] - sat.center[1];
            if dx * dx + dy * dy <= sat.radius * sat.radius {
                consider(sat.depth, PickTarget::Satellite(sat.index));
            }
        }

        let r2 = CORE_PICK_RADIUS * CORE_PICK_RADIUS;
        let nearest_core = self
            .core_points
            .iter()
            .zip(&self.core_depths)
            .filter(|(p, _)| {
                let dx = pointer[0] - p[0];
                let dy = pointer[1] - p[1];
                dx * dx + dy * dy <= r2
            })
            .map(|(_, d)| *d)
            .fold(None, |acc: Option<f32>, d| Some(acc.map_or(d, |a| a.min(d))));
        if let Some(depth) = nearest_core {
            consider(depth, PickTarget::Core);
        }

        best.map(|(_, t)| t)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Scene
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct PortfolioScene {
    config: SceneConfig,
    core: CoreAnimator,
    core_points: Vec<Vec3>,
    satellites: Vec<Satellite>,
    stars: Vec<Star>,
    parallax: StarParallax,
    rig: CameraRig,
}

impl PortfolioScene {
    pub fn new(config: SceneConfig) -> Self {
        let core_points = config.knot.points();
        let stars = config.stars.stars();
        let satellites = config
            .satellites
            .iter()
            .cloned()
            .map(|spec| Satellite::new(spec, &config.labels, config.trail_length))
            .collect();
        let rig = CameraRig::new(config.initial_camera);
        log::info!(
            "scene: {} core points, {} stars, {} satellites",
            core_points.len(),
            stars.len(),
            config.satellites.len()
        );
        Self {
            core: CoreAnimator::new(),
            core_points,
            satellites,
            stars,
            parallax: StarParallax::default(),
            rig,
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Orbits stop exactly while the active section owns a satellite.
    pub fn is_paused(&self, nav: NavState) -> bool {
        nav.active_section()
            .map_or(false, |s| self.config.satellite_for(s).is_some())
    }

    pub fn update(&mut self, input: &FrameInput) {
        let paused = self.is_paused(input.nav);
        let active = input.nav.active_section();

        self.rig
            .set_free_orbit(self.config.free_orbit_at_center && active.is_none());

        self.core.update(input.dt, paused);
        for sat in &mut self.satellites {
            let is_active = active == Some(sat.spec.section);
            sat.update(input.elapsed, paused, is_active, &self.config.labels);
        }
        if self.config.star_parallax {
            if let Some(p) = input.pointer_ndc {
                self.parallax.update(p);
            }
        }
        self.rig.update(pose_for(input.nav, self.config.center_pose));
    }

    /// Section selected by clicking `target`.
    pub fn section_for(&self, target: PickTarget) -> Option<Section> {
        match target {
            PickTarget::Core => Some(self.config.core_section),
            PickTarget::Satellite(i) => self.satellites.get(i).map(|s| s.spec.section),
        }
    }

    pub fn set_hover(&mut self, target: Option<PickTarget>) {
        self.core.hovered = target == Some(PickTarget::Core);
        for (i, sat) in self.satellites.iter_mut().enumerate() {
            sat.hovered = target == Some(PickTarget::Satellite(i));
        }
    }

    /// Free-orbit drag; ignored while the camera is directed.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.rig.drag(dx, dy);
    }

    pub fn camera(&self) -> &Camera {
        &self.rig.camera
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn core(&self) -> &CoreAnimator {
        &self.core
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    /// Project the current state into `viewport` (min_x, min_y, width,
    /// height).
    pub fn project(&self, viewport: [f32; 4], nav: NavState) -> FrameProjection {
        let projector = Projector::new(&self.rig.camera, viewport);
        let active = nav.active_section();

        let star_rotation = [self.parallax.rotation[0], self.parallax.rotation[1], 0.0];
        let stars = projector
            .project_all(&self.star_positions(), star_rotation)
            .into_iter()
            .map(|(i, p)| StarView {
                pos: p.pos,
                size: self.stars[i].size,
                brightness: self.stars[i].brightness,
            })
            .collect();

        let core = projector.project_all(&self.core_points, self.core.rotation);
        let (core_points, core_depths): (Vec<[f32; 2]>, Vec<f32>) =
            core.into_iter().map(|(_, p)| (p.pos, p.depth)).unzip();

        let eye = projector.eye();
        let mut satellites: Vec<SatelliteView> = self
            .satellites
            .iter()
            .enumerate()
            .filter_map(|(index, sat)| {
                let center = projector.project(sat.position)?;
                let is_active = active == Some(sat.spec.section);
                let anchor = sat.label_anchor(&self.config.labels);
                let occluded = self.config.label_occlusion
                    && segment_hits_sphere(eye, anchor, [0.0; 3], self.config.occluder_radius);
                let label = if occluded {
                    None
                } else {
                    projector.project(anchor).map(|p| LabelView {
                        pos: p.pos,
                        text: sat.spec.text.clone(),
                        style: sat.label_style(is_active, &self.config.labels),
                        scale: label_scale(&self.rig.camera, anchor, self.config.labels.distance_factor),
                    })
                };
                Some(SatelliteView {
                    index,
                    section: sat.spec.section,
                    center: center.pos,
                    radius: sat.radius() * projector.scale_at(center.depth),
                    depth: center.depth,
                    color: sat.spec.color,
                    hovered: sat.hovered,
                    active: is_active,
                    label,
                })
            })
            .collect();
        satellites.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        let trails = self
            .satellites
            .iter()
            .filter(|s| !s.trail().is_empty())
            .map(|sat| TrailView {
                color: sat.spec.color,
                points: sat
                    .trail()
                    .attenuated()
                    .filter_map(|(p, a)| {
                        projector.project(p).map(|proj| TrailPoint {
                            pos: proj.pos,
                            width: TRAIL_WORLD_WIDTH * a * projector.scale_at(proj.depth),
                            alpha: a,
                        })
                    })
                    .collect(),
            })
            .collect();

        FrameProjection {
            stars,
            core_points,
            core_depths,
            core_point_size: self.core.point_size,
            core_color: self.config.core_color,
            core_hovered: self.core.hovered,
            core_depth: length3(eye),
            satellites,
            trails,
        }
    }

    fn star_positions(&self) -> Vec<Vec3> {
        self.stars.iter().map(|s| s.position).collect()
    }
}

/// Screen scale of a world-anchored label: constant world size, shrinking
/// with distance.
fn label_scale(camera: &Camera, anchor: Vec3, distance_factor: f32) -> f32 {
    let dist = camera.distance_to(anchor).max(1e-3);
    distance_factor / (2.0 * (camera.fov_y * 0.5).tan() * dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::ViewMode;

    const VIEWPORT: [f32; 4] = [0.0, 0.0, 1280.0, 800.0];

    fn open(section: Section) -> NavState {
        NavState::Section {
            section,
            view: ViewMode::ThreeD,
        }
    }

    fn small_config(base: SceneConfig) -> SceneConfig {
        SceneConfig {
            knot: TorusKnot {
                tubular_segments: 32,
                radial_segments: 8,
                ..TorusKnot::default()
            },
            stars: StarShell {
                count: 64,
                ..StarShell::default()
            },
            ..base
        }
    }

    fn frame(nav: NavState, elapsed: f32) -> FrameInput {
        FrameInput {
            dt: 1.0 / 60.0,
            elapsed,
            nav,
            pointer_ndc: None,
        }
    }

    #[test]
    fn pause_follows_satellite_ownership() {
        let scene = PortfolioScene::new(small_config(SceneConfig::default()));
        assert!(!scene.is_paused(NavState::Center));
        assert!(scene.is_paused(open(Section::About)));
        assert!(scene.is_paused(open(Section::Projects)));
        assert!(!scene.is_paused(open(Section::Contact)));

        let classic = PortfolioScene::new(small_config(SceneConfig::classic()));
        assert!(!classic.is_paused(open(Section::About)));
        assert!(classic.is_paused(open(Section::Skills)));
    }

    #[test]
    fn selecting_a_satellite_parks_it_and_freezes_the_rest() {
        let mut scene = PortfolioScene::new(small_config(SceneConfig::default()));
        for k in 0..30 {
            scene.update(&frame(NavState::Center, k as f32 / 60.0));
        }
        let nav = open(Section::Projects);
        scene.update(&frame(nav, 0.5));
        let skills_before = scene.satellites()[2].position;
        for k in 0..400 {
            scene.update(&frame(nav, 0.5 + k as f32 / 60.0));
        }
        assert_eq!(scene.satellites()[2].position, skills_before);
        let projects = &scene.satellites()[1];
        for i in 0..3 {
            assert!((projects.position[i] - projects.spec.home[i]).abs() < 1e-3);
        }
        // only the selected body is scaled up
        assert!((projects.scale - 1.8).abs() < 1e-3);
        assert!((scene.satellites()[0].scale - 1.0).abs() < 1e-3);
    }

    #[test]
    fn contact_keeps_orbits_running() {
        let mut scene = PortfolioScene::new(small_config(SceneConfig::default()));
        let nav = open(Section::Contact);
        scene.update(&frame(nav, 1.0));
        let a = scene.satellites()[1].position;
        scene.update(&frame(nav, 2.0));
        assert_ne!(scene.satellites()[1].position, a);
    }

    #[test]
    fn free_orbit_only_at_center_in_extended_layout() {
        let mut scene = PortfolioScene::new(small_config(SceneConfig::default()));
        scene.update(&frame(NavState::Center, 0.0));
        assert!(scene.rig().is_free());
        scene.update(&frame(open(Section::Skills), 0.1));
        assert!(!scene.rig().is_free());

        let mut classic = PortfolioScene::new(small_config(SceneConfig::classic()));
        classic.update(&frame(NavState::Center, 0.0));
        assert!(!classic.rig().is_free());
    }

    #[test]
    fn camera_converges_to_section_pose() {
        let mut scene = PortfolioScene::new(small_config(SceneConfig::classic()));
        let nav = open(Section::Skills);
        for k in 0..2000 {
            scene.update(&frame(nav, k as f32 / 60.0));
        }
        let cam = scene.camera();
        assert!((cam.position[0] + 8.0).abs() < 1e-3);
        assert!((cam.position[1] - 1.0).abs() < 1e-3);
        assert!((cam.position[2] - 8.0).abs() < 1e-3);
        assert_eq!(cam.target, [-8.0, 0.0, 0.0]);
    }

    #[test]
    fn clicking_the_core_selects_contact() {
        let scene = PortfolioScene::new(small_config(SceneConfig::default()));
        assert_eq!(scene.section_for(PickTarget::Core), Some(Section::Contact));
        assert_eq!(scene.section_for(PickTarget::Satellite(0)), Some(Section::About));
        assert_eq!(scene.section_for(PickTarget::Satellite(9)), None);
    }

    #[test]
    fn picking_prefers_the_nearer_object() {
        let scene = PortfolioScene::new(small_config(SceneConfig::classic()));
        let frame = scene.project(VIEWPORT, NavState::Center);
        let sat = frame
            .satellites
            .iter()
            .find(|s| s.section == Section::Projects)
            .unwrap();
        assert_eq!(frame.pick(sat.center), Some(PickTarget::Satellite(sat.index)));
        assert_eq!(frame.pick([1.0, 1.0]), None);
    }

    #[test]
    fn core_points_are_pickable() {
        let scene = PortfolioScene::new(small_config(SceneConfig::classic()));
        let frame = scene.project(VIEWPORT, NavState::Center);
        let target = frame.core_points[0];
        assert_eq!(frame.pick(target), Some(PickTarget::Core));
    }

    #[test]
    fn hover_marks_one_object() {
        let mut scene = PortfolioScene::new(small_config(SceneConfig::default()));
        scene.set_hover(Some(PickTarget::Satellite(1)));
        assert!(scene.satellites()[1].hovered);
        assert!(!scene.satellites()[0].hovered);
        assert!(!scene.core().hovered);
        scene.set_hover(Some(PickTarget::Core));
        assert!(scene.core().hovered);
        assert!(!scene.satellites()[1].hovered);
    }

    #[test]
    fn label_hidden_behind_core() {
        let mut config = small_config(SceneConfig::default());
        config.satellites.truncate(1);
        config.satellites[0].home = [0.0, 0.0, 7.0];
        config.labels.anchor_height = 0.0;
        let mut scene = PortfolioScene::new(config);
        let at = |scene: &mut PortfolioScene, elapsed: f32| {
            scene.update(&FrameInput {
                dt: 0.0,
                elapsed,
                nav: NavState::Center,
                pointer_ndc: None,
            });
            scene.project(VIEWPORT, NavState::Center)
        };

        // phase π/2: starts on +z, between camera and core
        let front = at(&mut scene, 0.0);
        assert!(front.satellites[0].label.is_some());

        // half a turn later it sits on -z, behind the core
        let back = at(&mut scene, 2.0 * PI);
        assert!(back.satellites[0].label.is_none());
    }

    #[test]
    fn labels_sorted_and_scaled() {
        let scene = PortfolioScene::new(small_config(SceneConfig::classic()));
        let frame = scene.project(VIEWPORT, NavState::Center);
        assert_eq!(frame.satellites.len(), 2);
        assert!(frame.satellites[0].depth >= frame.satellites[1].depth);
        let label = frame.satellites[0].label.as_ref().unwrap();
        assert!(label.scale > 0.0);
        assert_eq!(label.style.font_size, 14.0);
    }

    #[test]
    fn preset_names() {
        assert_eq!(ScenePreset::from_name("Classic"), Some(ScenePreset::Classic));
        assert_eq!(ScenePreset::from_name(" extended "), Some(ScenePreset::Extended));
        assert_eq!(ScenePreset::from_name("retro"), None);
        assert_eq!(ScenePreset::default().config().satellites.len(), 3);
    }

    #[test]
    fn pointer_ndc_maps_corners() {
        assert_eq!(pointer_ndc(VIEWPORT, [640.0, 400.0]), [0.0, 0.0]);
        assert_eq!(pointer_ndc(VIEWPORT, [1280.0, 0.0]), [1.0, 1.0]);
        assert_eq!(pointer_ndc(VIEWPORT, [0.0, 800.0]), [-1.0, -1.0]);
    }

    #[test]
    fn parallax_follows_pointer_when_enabled() {
        let mut scene = PortfolioScene::new(small_config(SceneConfig::default()));
        let mut input = frame(NavState::Center, 0.0);
        input.pointer_ndc = Some([1.0, 0.0]);
        scene.update(&input);
        assert!(scene.parallax.rotation[1] > 0.0);

        let mut classic = PortfolioScene::new(small_config(SceneConfig::classic()));
        classic.update(&input);
        assert_eq!(classic.parallax.rotation, [0.0, 0.0]);
    }
}
