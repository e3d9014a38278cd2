//! Per-frame animators for the scene objects.
//!
//! - `CoreAnimator`: the central point cloud spins on two axes and grows
//!   its points while hovered.
//! - `Satellite`: orbits the core, parks at its home position when its
//!   section is selected, freezes when another section pauses the scene.
//!   Also eases its own scale and label style and keeps a trail history.
//! - `StarParallax`: the background shell leans toward the pointer.
//!
//! Every animated number moves by exponential smoothing; nothing jumps.

use std::collections::VecDeque;

use crate::fast_math::{smooth_toward, smooth_toward3, Vec3};
use crate::navigation::Section;

/// Smoothing factor for object easing (position, scale, point size).
pub const OBJECT_SMOOTHING: f32 = 0.1;
/// Angular speed of the shared orbit, radians per second.
pub const ORBIT_SPEED: f32 = 0.5;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Core
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone)]
pub struct CoreAnimator {
    /// Euler rotation (x, y, z) in radians.
    pub rotation: Vec3,
    /// Displayed point size.
    pub point_size: f32,
    pub hovered: bool,
}

impl CoreAnimator {
    pub const RATE_X: f32 = 0.05;
    pub const RATE_Y: f32 = 0.1;
    pub const SIZE_IDLE: f32 = 1.5;
    pub const SIZE_HOVER: f32 = 1.8;

    pub fn new() -> Self {
        Self {
            rotation: [0.0; 3],
            point_size: Self::SIZE_IDLE,
            hovered: false,
        }
    }

    pub fn update(&mut self, dt: f32, paused: bool) {
        if !paused {
            self.rotation[1] += dt * Self::RATE_Y;
            self.rotation[0] += dt * Self::RATE_X;
        }
        let target = if self.hovered {
            Self::SIZE_HOVER
        } else {
            Self::SIZE_IDLE
        };
        smooth_toward(&mut self.point_size, target, OBJECT_SMOOTHING);
    }
}

impl Default for CoreAnimator {
    fn default() -> Self {
        Self::new()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Satellites
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Static description of one orbiting body.
#[derive(Debug, Clone)]
pub struct SatelliteSpec {
    pub section: Section,
    pub text: String,
    pub color: [u8; 3],
    /// Parking position; its `y` is also the orbit height.
    pub home: Vec3,
    pub orbit_radius: f32,
    pub phase: f32,
    /// Scale while selected.
    pub active_scale: f32,
}

/// Label easing targets.
#[derive(Debug, Clone)]
pub struct LabelTuning {
    pub inactive_size: f32,
    pub active_size: f32,
    pub smoothing: f32,
    /// Vertical offset in percent of the label height (-50 = centered).
    pub inactive_offset: f32,
    pub active_offset: f32,
    pub bold_when_active: bool,
    /// Label anchor height above the body center, in body-local units.
    pub anchor_height: f32,
    /// Screen-size scaling with distance; larger = bigger labels.
    pub distance_factor: f32,
}

impl Default for LabelTuning {
    fn default() -> Self {
        Self {
            inactive_size: 18.0,
            active_size: 48.0,
            smoothing: 0.18,
            inactive_offset: -50.0,
            active_offset: -50.0,
            bold_when_active: true,
            anchor_height: 1.1,
            distance_factor: 10.0,
        }
    }
}

/// Label presentation for one frame, derived from interpolated numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    pub font_size: f32,
    pub bold: bool,
    pub offset_percent: f32,
}

/// Recent positions of a body, oldest first.
#[derive(Debug, Clone)]
pub struct Trail {
    samples: VecDeque<Vec3>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, p: Vec3) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(p);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples with their attenuation (`t²`, newest = 1).
    pub fn attenuated(&self) -> impl Iterator<Item = (Vec3, f32)> + '_ {
        let n = self.samples.len();
        self.samples.iter().enumerate().map(move |(i, p)| {
            let t = if n > 1 {
                i as f32 / (n - 1) as f32
            } else {
                1.0
            };
            (*p, t * t)
        })
    }
}

#[derive(Debug, Clone)]
pub struct Satellite {
    pub spec: SatelliteSpec,
    pub position: Vec3,
    pub scale: f32,
    pub hovered: bool,
    label_size: f32,
    label_offset: f32,
    trail: Trail,
}

impl Satellite {
    pub const BODY_RADIUS: f32 = 0.8;

    pub fn new(spec: SatelliteSpec, labels: &LabelTuning, trail_len: usize) -> Self {
        Self {
            position: spec.home,
            spec,
            scale: 1.0,
            hovered: false,
            label_size: labels.inactive_size,
            label_offset: labels.inactive_offset,
            trail: Trail::new(trail_len),
        }
    }

    /// Position on the shared orbit at `elapsed` seconds.
    pub fn orbit_position(&self, elapsed: f32) -> Vec3 {
        let theta = elapsed * ORBIT_SPEED + self.spec.phase;
        let (s, c) = theta.sin_cos();
        [
            self.spec.orbit_radius * c,
            self.spec.home[1],
            self.spec.orbit_radius * s,
        ]
    }

    /// Advance one frame.
    ///
    /// - not paused: follow the orbit
    /// - paused and active: ease toward home
    /// - paused and inactive: hold the last position
    pub fn update(&mut self, elapsed: f32, paused: bool, active: bool, labels: &LabelTuning) {
        if !paused {
            self.position = self.orbit_position(elapsed);
        } else if active {
            smooth_toward3(&mut self.position, self.spec.home, OBJECT_SMOOTHING);
        }

        let target_scale = if active { self.spec.active_scale } else { 1.0 };
        smooth_toward(&mut self.scale, target_scale, OBJECT_SMOOTHING);

        let (size, offset) = if active {
            (labels.active_size, labels.active_offset)
        } else {
            (labels.inactive_size, labels.inactive_offset)
        };
        smooth_toward(&mut self.label_size, size, labels.smoothing);
        smooth_toward(&mut self.label_offset, offset, labels.smoothing);

        self.trail.push(self.position);
    }

    pub fn label_style(&self, active: bool, labels: &LabelTuning) -> LabelStyle {
        LabelStyle {
            font_size: self.label_size,
            bold: active && labels.bold_when_active,
            offset_percent: self.label_offset,
        }
    }

    /// World-space anchor of the label.
    pub fn label_anchor(&self, labels: &LabelTuning) -> Vec3 {
        [
            self.position[0],
            self.position[1] + labels.anchor_height * self.scale,
            self.position[2],
        ]
    }

    pub fn radius(&self) -> f32 {
        Self::BODY_RADIUS * self.scale
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Starfield parallax
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Default)]
pub struct StarParallax {
    /// Rotation (x, y) of the star shell.
    pub rotation: [f32; 2],
}

impl StarParallax {
    pub const SMOOTHING: f32 = 0.02;
    pub const STRENGTH: f32 = 0.1;

    /// `pointer` is the normalized pointer position, x right / y up in
    /// [-1, 1].
    pub fn update(&mut self, pointer: [f32; 2]) {
        smooth_toward(
            &mut self.rotation[0],
            pointer[1] * Self::STRENGTH,
            Self::SMOOTHING,
        );
        smooth_toward(
            &mut self.rotation[1],
            pointer[0] * Self::STRENGTH,
            Self::SMOOTHING,
        );
    }
}
