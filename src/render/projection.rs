//! Perspective projection from world space onto the egui canvas.

use rayon::prelude::*;

use crate::fast_math::{add3, cross3, dot3, normalize3, rotate_xyz, scale3, sub3, Vec3};
use crate::render::camera::Camera;

/// Near clipping distance.
pub const NEAR: f32 = 0.1;

/// A world point on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Screen position in points.
    pub pos: [f32; 2],
    /// Distance along the view direction.
    pub depth: f32,
}

/// Camera basis and viewport, fixed for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    eye: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    focal: f32,
    center: [f32; 2],
}

impl Projector {
    /// `viewport` is (min_x, min_y, width, height) in screen points.
    pub fn new(camera: &Camera, viewport: [f32; 4]) -> Self {
        let forward = normalize3(sub3(camera.target, camera.position));
        let mut right = normalize3(cross3(forward, [0.0, 1.0, 0.0]));
        if dot3(right, right) < 0.5 {
            // looking straight up or down
            right = [1.0, 0.0, 0.0];
        }
        let up = cross3(right, forward);
        let height = viewport[3].max(1.0);
        let focal = (height * 0.5) / (camera.fov_y * 0.5).tan();
        Self {
            eye: camera.position,
            forward,
            right,
            up,
            focal,
            center: [viewport[0] + viewport[2] * 0.5, viewport[1] + height * 0.5],
        }
    }

    pub fn project(&self, p: Vec3) -> Option<Projected> {
        let rel = sub3(p, self.eye);
        let depth = dot3(rel, self.forward);
        if depth < NEAR {
            return None;
        }
        let s = self.focal / depth;
        Some(Projected {
            pos: [
                self.center[0] + dot3(rel, self.right) * s,
                self.center[1] - dot3(rel, self.up) * s,
            ],
            depth,
        })
    }

    /// Screen points per world unit at `depth`.
    pub fn scale_at(&self, depth: f32) -> f32 {
        self.focal / depth.max(NEAR)
    }

    /// Project a rotated point cloud in parallel; points behind the camera
    /// are dropped, indices are kept for lookups.
    pub fn project_all(&self, points: &[Vec3], rotation: Vec3) -> Vec<(usize, Projected)> {
        points
            .par_iter()
            .enumerate()
            .filter_map(|(i, p)| self.project(rotate_xyz(*p, rotation)).map(|proj| (i, proj)))
            .collect()
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }
}

/// Whether the segment `a → b` passes through the sphere at `center`.
pub fn segment_hits_sphere(a: Vec3, b: Vec3, center: Vec3, radius: f32) -> bool {
    let ab = sub3(b, a);
    let len_sq = dot3(ab, ab);
    let t = if len_sq > 0.0 {
        (dot3(sub3(center, a), ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closest = add3(a, scale3(ab, t));
    let d = sub3(center, closest);
    dot3(d, d) < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new([0.0, 0.0, 10.0])
    }

    #[test]
    fn target_projects_to_center() {
        let proj = Projector::new(&camera(), [0.0, 0.0, 800.0, 600.0]);
        let p = proj.project([0.0, 0.0, 0.0]).unwrap();
        assert!((p.pos[0] - 400.0).abs() < 1e-3);
        assert!((p.pos[1] - 300.0).abs() < 1e-3);
        assert!((p.depth - 10.0).abs() < 1e-5);
    }

    #[test]
    fn axes_map_to_screen() {
        let proj = Projector::new(&camera(), [0.0, 0.0, 800.0, 600.0]);
        let right = proj.project([1.0, 0.0, 0.0]).unwrap();
        let up = proj.project([0.0, 1.0, 0.0]).unwrap();
        assert!(right.pos[0] > 400.0);
        assert!(up.pos[1] < 300.0);
    }

    #[test]
    fn points_behind_camera_are_culled() {
        let proj = Projector::new(&camera(), [0.0, 0.0, 800.0, 600.0]);
        assert!(proj.project([0.0, 0.0, 20.0]).is_none());
    }

    #[test]
    fn fov_edge_reaches_viewport_edge() {
        let cam = camera();
        let proj = Projector::new(&cam, [0.0, 0.0, 800.0, 600.0]);
        let half = (cam.fov_y * 0.5).tan() * 10.0;
        let top = proj.project([0.0, half, 0.0]).unwrap();
        assert!(top.pos[1].abs() < 1e-2);
    }

    #[test]
    fn parallel_projection_keeps_indices() {
        let proj = Projector::new(&camera(), [0.0, 0.0, 800.0, 600.0]);
        let pts = vec![[0.0, 0.0, 0.0], [0.0, 0.0, 50.0], [1.0, 0.0, 0.0]];
        let out = proj.project_all(&pts, [0.0; 3]);
        let idx: Vec<usize> = out.iter().map(|(i, _)| *i).collect();
        assert_eq!(idx, vec![0, 2]);
    }

    #[test]
    fn occlusion_segment_test() {
        let eye = [0.0, 0.0, 10.0];
        assert!(segment_hits_sphere(eye, [0.0, 0.0, -10.0], [0.0; 3], 2.0));
        assert!(!segment_hits_sphere(eye, [8.0, 0.0, 0.0], [0.0; 3], 2.0));
        // target in front of the sphere
        assert!(!segment_hits_sphere(eye, [0.0, 0.0, 5.0], [0.0; 3], 2.0));
    }
}
