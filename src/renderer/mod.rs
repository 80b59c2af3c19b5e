//! Rendering module
//!
//! The scene pass is platform independent: it describes a frame as filled
//! rectangles, lines and circle outlines in screen pixels through a
//! [`DrawSink`]. The WebGPU pipeline tessellates those into one triangle
//! batch per frame.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use pipeline::{RenderState, VertexBatch};
pub use scene::draw_world;
pub use vertex::Vertex;

/// Immediate-mode drawing target, screen pixels with y down
pub trait DrawSink {
    /// Axis-aligned filled rectangle with top-left corner `pos`
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: [f32; 4]);

    /// Straight stroke from `a` to `b`
    fn line(&mut self, a: Vec2, b: Vec2, width: f32, color: [f32; 4]);

    /// Circle outline
    fn circle(&mut self, center: Vec2, radius: f32, width: f32, color: [f32; 4]);
}
