//! Procedural point geometry: the torus-knot core and the background
//! starfield.

use std::f32::consts::TAU;

use crate::fast_math::{add3, cross3, normalize3, scale3, sub3, Vec3};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Torus knot
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Torus-knot tube parameters.
#[derive(Debug, Clone, Copy)]
pub struct TorusKnot {
    pub radius: f32,
    pub tube: f32,
    pub tubular_segments: u32,
    pub radial_segments: u32,
    pub p: u32,
    pub q: u32,
}

impl Default for TorusKnot {
    fn default() -> Self {
        Self {
            radius: 2.0,
            tube: 0.6,
            tubular_segments: 256,
            radial_segments: 32,
            p: 2,
            q: 3,
        }
    }
}

impl TorusKnot {
    /// Point on the knot's center curve at parameter `u`.
    fn curve(&self, u: f32) -> Vec3 {
        let (su, cu) = u.sin_cos();
        let qu_over_p = self.q as f32 / self.p as f32 * u;
        let cs = qu_over_p.cos();
        [
            self.radius * (2.0 + cs) * 0.5 * cu,
            self.radius * (2.0 + cs) * su * 0.5,
            self.radius * qu_over_p.sin() * 0.5,
        ]
    }

    /// Surface vertices of the tube, one ring of `radial_segments + 1`
    /// points per tubular step (seam vertices included).
    pub fn points(&self) -> Vec<Vec3> {
        let rings = self.tubular_segments + 1;
        let per_ring = self.radial_segments + 1;
        let mut out = Vec::with_capacity((rings * per_ring) as usize);

        for i in 0..rings {
            let u = i as f32 / self.tubular_segments as f32 * self.p as f32 * TAU;
            let p1 = self.curve(u);
            let p2 = self.curve(u + 0.01);

            // Frenet-like frame along the curve
            let t = sub3(p2, p1);
            let n = add3(p2, p1);
            let b = normalize3(cross3(t, n));
            let n = normalize3(cross3(b, t));

            for j in 0..per_ring {
                let v = j as f32 / self.radial_segments as f32 * TAU;
                let cx = -self.tube * v.cos();
                let cy = self.tube * v.sin();
                out.push(add3(p1, add3(scale3(n, cx), scale3(b, cy))));
            }
        }
        out
    }

    /// Radius of a sphere centered at the origin that bounds the knot.
    pub fn bounding_radius(&self) -> f32 {
        let xy = self.radius * 1.5;
        (xy * xy + (self.radius * 0.5) * (self.radius * 0.5)).sqrt() + self.tube
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Starfield
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Background star shell parameters.
#[derive(Debug, Clone, Copy)]
pub struct StarShell {
    pub radius: f32,
    pub depth: f32,
    pub count: u32,
    /// Size multiplier for the per-star point size.
    pub factor: f32,
    pub seed: u32,
}

impl Default for StarShell {
    fn default() -> Self {
        Self {
            radius: 200.0,
            depth: 50.0,
            count: 5000,
            factor: 6.0,
            seed: 0x5eed_0001,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec3,
    /// Point size in screen points.
    pub size: f32,
    /// Grey level 0..1.
    pub brightness: f32,
}

impl StarShell {
    /// Deterministic star positions spread over a spherical shell, nearer
    /// stars being brighter.
    pub fn stars(&self) -> Vec<Star> {
        let mut out = Vec::with_capacity(self.count as usize);
        for i in 0..self.count {
            let base = self.seed.wrapping_add(i.wrapping_mul(4));
            let r = self.radius + self.depth * unit(base);
            let cos_theta = 1.0 - 2.0 * unit(base + 1);
            let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
            let phi = TAU * unit(base + 2);
            let position = [
                r * sin_theta * phi.cos(),
                r * cos_theta,
                r * sin_theta * phi.sin(),
            ];
            let nearness = 1.0 - (r - self.radius) / self.depth.max(1e-3);
            let size = (0.5 + 0.5 * unit(base + 3)) * self.factor * 0.25;
            out.push(Star {
                position,
                size,
                brightness: 0.35 + 0.65 * nearness,
            });
        }
        out
    }
}

/// 32-bit integer mix (non-linear) to avoid visible correlation patterns.
fn hash_u32(x_in: u32) -> u32 {
    let mut x = x_in;
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

/// Hash to [0, 1).
fn unit(x: u32) -> f32 {
    (hash_u32(x) >> 8) as f32 / (1u32 << 24) as f32
}
