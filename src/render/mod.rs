pub mod geometry;
pub mod animator;
pub mod camera;
pub mod projection;
pub mod paint;
