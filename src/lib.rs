pub mod fast_math;
pub mod navigation;
pub mod loading;
pub mod input;
pub mod content;
pub mod assets;
pub mod render;
pub mod scene;
