//! Rendering sink consumed by the highlight draw pass
//!
//! The core never touches a graphics API: each frame it hands the host a
//! sequence of flat-colored vertex batches. Hosts bind their own shader and
//! submit the vertices however their pipeline wants them.

use egui::{Color32, Pos2};

/// How a vertex sequence should be rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Connected line through the vertices
    LineStrip,
    /// Width-expanded triangle strip
    TriangleStrip,
}

/// Receiver for highlight draw batches.
///
/// `begin_blend`/`end_blend` bracket one frame's batch of draws with alpha
/// blending enabled. Sinks that cannot rasterize wide line strips report
/// `supports_wide_lines() == false` and receive pre-expanded triangle strips
/// instead.
pub trait RenderSink {
    /// Enables alpha blending for the following draws
    fn begin_blend(&mut self);

    /// Restores the blend state
    fn end_blend(&mut self);

    /// Submits one flat-colored vertex sequence
    fn draw(&mut self, mode: DrawMode, verts: &[Pos2], color: Color32, line_width: f32);

    /// Whether the sink can rasterize line strips wider than one pixel
    fn supports_wide_lines(&self) -> bool {
        true
    }
}
