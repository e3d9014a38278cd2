//! Camera director.
//!
//! Two mutually exclusive modes:
//! - `Directed`: the camera glides toward the pose of the current
//!   navigation state and always looks at the pose's target.
//! - `FreeOrbit`: the user drags the camera around the origin; polar angle
//!   is clamped so the view never flips under or over the scene.
//!
//! The mode is a single enum field, so switching is one assignment and the
//! two can never drive the camera in the same frame.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

use crate::fast_math::{length3, smooth_toward3, sub3, Vec3};
use crate::navigation::{NavState, Section};

/// Smoothing factor for directed camera travel.
pub const CAMERA_SMOOTHING: f32 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }
}

/// Camera pose for a section.
pub fn section_pose(section: Section) -> CameraPose {
    match section {
        Section::About => CameraPose::new([0.0, 3.0, 12.0], [0.0, 3.0, 0.0]),
        Section::Projects => CameraPose::new([8.0, 1.0, 8.0], [8.0, 0.0, 0.0]),
        Section::Skills => CameraPose::new([-8.0, 1.0, 8.0], [-8.0, 0.0, 0.0]),
        Section::Contact => CameraPose::new([0.0, 0.0, 8.0], [0.0, 0.0, 0.0]),
    }
}

/// Pose for a navigation state; the 2D view keeps the section's pose.
pub fn pose_for(state: NavState, center: CameraPose) -> CameraPose {
    match state.active_section() {
        Some(section) => section_pose(section),
        None => center,
    }
}

// ─── Camera ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view, radians.
    pub fov_y: f32,
}

impl Camera {
    pub const DEFAULT_FOV_DEG: f32 = 45.0;

    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            target: [0.0; 3],
            fov_y: Self::DEFAULT_FOV_DEG.to_radians(),
        }
    }

    pub fn distance_to(&self, p: Vec3) -> f32 {
        length3(sub3(p, self.position))
    }
}

// ─── Free orbit ──────────────────────────────────────────────────────────────

/// Drag-to-rotate controls around the origin. No zoom, no pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    pub radius: f32,
    /// Angle from +y, radians.
    pub polar: f32,
    /// Angle around +y from +z, radians.
    pub azimuth: f32,
    /// Radians per dragged screen point.
    pub rotate_speed: f32,
}

impl OrbitControls {
    pub const MIN_POLAR: f32 = FRAC_PI_3;
    pub const MAX_POLAR: f32 = FRAC_PI_2;

    /// Controls that reproduce `position` (clamped into the polar range).
    pub fn from_position(position: Vec3) -> Self {
        let radius = length3(position).max(1e-3);
        let polar = (position[1] / radius).clamp(-1.0, 1.0).acos();
        let azimuth = position[0].atan2(position[2]);
        Self {
            radius,
            polar: polar.clamp(Self::MIN_POLAR, Self::MAX_POLAR),
            azimuth,
            rotate_speed: 0.005,
        }
    }

    /// Apply a pointer drag in screen points.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * self.rotate_speed;
        self.polar = (self.polar - dy * self.rotate_speed).clamp(Self::MIN_POLAR, Self::MAX_POLAR);
    }

    pub fn position(&self) -> Vec3 {
        let (sp, cp) = self.polar.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        [
            self.radius * sp * sa,
            self.radius * cp,
            self.radius * sp * ca,
        ]
    }
}

// ─── Rig ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    Directed,
    FreeOrbit(OrbitControls),
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    pub camera: Camera,
    mode: CameraMode,
}

impl CameraRig {
    pub fn new(initial_position: Vec3) -> Self {
        Self {
            camera: Camera::new(initial_position),
            mode: CameraMode::Directed,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn is_free(&self) -> bool {
        matches!(self.mode, CameraMode::FreeOrbit(_))
    }

    /// Switch between directed travel and free orbit. Entering free orbit
    /// starts from wherever the camera currently is.
    pub fn set_free_orbit(&mut self, enabled: bool) {
        match (enabled, self.mode) {
            (true, CameraMode::Directed) => {
                let controls = OrbitControls::from_position(self.camera.position);
                self.mode = CameraMode::FreeOrbit(controls);
                self.camera.target = [0.0; 3];
                log::debug!("camera: free orbit (r={:.2})", controls.radius);
            }
            (false, CameraMode::FreeOrbit(_)) => {
                self.mode = CameraMode::Directed;
                log::debug!("camera: directed");
            }
            _ => {}
        }
    }

    /// Forward a drag to the orbit controls. Ignored in directed mode.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        if let CameraMode::FreeOrbit(ref mut controls) = self.mode {
            controls.drag(dx, dy);
        }
    }

    /// Advance one frame toward `pose`. In free orbit the pose is ignored
    /// and the camera stays where the user put it.
    pub fn update(&mut self, pose: CameraPose) {
        match self.mode {
            CameraMode::Directed => {
                smooth_toward3(&mut self.camera.position, pose.position, CAMERA_SMOOTHING);
                self.camera.target = pose.target;
            }
            CameraMode::FreeOrbit(controls) => {
                self.camera.position = controls.position();
                self.camera.target = [0.0; 3];
            }
        }
    }
}
