//! Fast Math: smoothing and small-vector helpers for the frame loop.
//!
//! Every animated number in the scene chases its target with one
//! exponential smoothing step per rendered frame:
//!
//!   value += (target - value) * factor
//!
//! Written as an FMA (`fma(factor, target - value, value)`) so a value that
//! already sits on its target stays bit-identical.
//!
//! 3-vectors are plain `[f32; 3]` arrays, the same representation the scene
//! primitives use.

pub type Vec3 = [f32; 3];

/// Fused Multiply-Add: a * b + c
#[inline(always)]
pub fn fma(a: f32, b: f32, c: f32) -> f32 {
    a.mul_add(b, c)
}

/// Linear interpolation using FMA for precision.
/// lerp(a, b, t) = a + t * (b - a) = fma(t, b-a, a)
#[inline(always)]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    fma(t, b - a, a)
}

/// One exponential smoothing step of `value` toward `target`.
#[inline(always)]
pub fn smooth_toward(value: &mut f32, target: f32, factor: f32) {
    *value = lerp(*value, target, factor);
}

/// Component-wise lerp of two 3-vectors.
#[inline]
pub fn lerp3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    [lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t)]
}

/// One exponential smoothing step of a 3-vector toward `target`.
#[inline]
pub fn smooth_toward3(value: &mut Vec3, target: Vec3, factor: f32) {
    *value = lerp3(*value, target, factor);
}

#[inline(always)]
pub fn add3(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline(always)]
pub fn sub3(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline(always)]
pub fn scale3(a: Vec3, s: f32) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

#[inline(always)]
pub fn dot3(a: Vec3, b: Vec3) -> f32 {
    fma(a[0], b[0], fma(a[1], b[1], a[2] * b[2]))
}

#[inline]
pub fn cross3(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Squared length (no sqrt needed for comparisons).
#[inline(always)]
pub fn length_squared3(a: Vec3) -> f32 {
    dot3(a, a)
}

#[inline]
pub fn length3(a: Vec3) -> f32 {
    length_squared3(a).sqrt()
}

/// Unit vector in the direction of `a`. Degenerate input returns `a` as-is.
#[inline]
pub fn normalize3(a: Vec3) -> Vec3 {
    let len = length3(a);
    if len > 1e-6 {
        scale3(a, 1.0 / len)
    } else {
        a
    }
}

/// Rotate `v` by Euler angles applied in X-then-Y-then-Z intrinsic order
/// (matrix `Rx · Ry · Rz`).
pub fn rotate_xyz(v: Vec3, angles: Vec3) -> Vec3 {
    let (sx, cx) = angles[0].sin_cos();
    let (sy, cy) = angles[1].sin_cos();
    let (sz, cz) = angles[2].sin_cos();

    // Rz
    let x = v[0] * cz - v[1] * sz;
    let y = v[0] * sz + v[1] * cz;
    let z = v[2];
    // Ry
    let (x, z) = (x * cy + z * sy, -x * sy + z * cy);
    // Rx
    let (y, z) = (y * cx - z * sx, y * sx + z * cx);
    [x, y, z]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
        assert!((lerp(2.0, 4.0, 0.0) - 2.0).abs() < 1e-6);
        assert!((lerp(2.0, 4.0, 1.0) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn smoothing_is_idempotent_at_target() {
        for &v in &[0.0f32, 1.5, -3.25, 48.0, 1e6] {
            let mut value = v;
            smooth_toward(&mut value, v, 0.1);
            assert_eq!(value, v);
            smooth_toward(&mut value, v, 0.18);
            assert_eq!(value, v);
        }
        let mut p = [8.0, -2.0, 0.0];
        smooth_toward3(&mut p, [8.0, -2.0, 0.0], 0.1);
        assert_eq!(p, [8.0, -2.0, 0.0]);
    }

    #[test]
    fn smoothing_converges_without_overshoot() {
        let mut value = 1.5f32;
        let mut prev_gap = (1.8f32 - value).abs();
        for _ in 0..200 {
            smooth_toward(&mut value, 1.8, 0.1);
            let gap = 1.8 - value;
            assert!(gap >= 0.0);
            assert!(gap <= prev_gap);
            prev_gap = gap;
        }
        assert!((value - 1.8).abs() < 1e-4);
    }

    #[test]
    fn first_step_moves_one_tenth() {
        let mut value = 14.0f32;
        smooth_toward(&mut value, 32.0, 0.1);
        assert!((value - 15.8).abs() < 1e-5);
    }

    #[test]
    fn test_vector_helpers() {
        assert_eq!(add3([1.0, 2.0, 3.0], [1.0, 1.0, 1.0]), [2.0, 3.0, 4.0]);
        assert_eq!(sub3([1.0, 2.0, 3.0], [1.0, 1.0, 1.0]), [0.0, 1.0, 2.0]);
        assert!((dot3([1.0, 0.0, 0.0], [0.0, 1.0, 0.0])).abs() < 1e-6);
        assert_eq!(cross3([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
        assert!((length3([3.0, 4.0, 0.0]) - 5.0).abs() < 1e-6);
        let n = normalize3([0.0, 0.0, 9.0]);
        assert!((n[2] - 1.0).abs() < 1e-6);
        assert_eq!(normalize3([0.0; 3]), [0.0; 3]);
    }

    #[test]
    fn rotate_about_y_quarter_turn() {
        let v = rotate_xyz([1.0, 0.0, 0.0], [0.0, std::f32::consts::FRAC_PI_2, 0.0]);
        assert!(v[0].abs() < 1e-6);
        assert!((v[2] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_rotation_is_identity() {
        let v = [0.3, -1.2, 2.5];
        let r = rotate_xyz(v, [0.0; 3]);
        for i in 0..3 {
            assert!((r[i] - v[i]).abs() < 1e-6);
        }
    }
}
