//! Viewport projection between tree space and screen space

use egui::{Pos2, Vec2};

/// Manages the tree-space to screen-space transform, including the host UI
/// scale factor applied to node layout coordinates.
#[derive(Debug, Clone)]
pub struct Viewport {
    pub pan_offset: Vec2,
    pub zoom: f32,
    /// Host interface scale factor (1.0 = 100%)
    pub ui_scale: f32,
}

impl Viewport {
    /// Creates a new viewport with default settings
    pub fn new() -> Self {
        Self {
            pan_offset: Vec2::ZERO,
            zoom: 1.0,
            ui_scale: 1.0,
        }
    }

    /// Zoom at a specific screen point
    pub fn zoom_at_point(&mut self, screen_point: Pos2, zoom_delta: f32) {
        let old_zoom = self.zoom;
        self.zoom = (self.zoom * zoom_delta).clamp(0.1, 5.0);

        // Adjust pan to keep the zoom point stationary
        let zoom_factor = self.zoom / old_zoom;
        let screen_point_vec = screen_point.to_vec2();
        self.pan_offset = screen_point_vec + (self.pan_offset - screen_point_vec) * zoom_factor;
    }

    /// Apply pan offset
    pub fn pan(&mut self, delta: Vec2) {
        self.pan_offset += delta;
    }

    /// Convert tree-space coordinates to screen pixels
    pub fn view_to_region(&self, view_pos: Pos2) -> Pos2 {
        Pos2::new(
            view_pos.x * self.zoom + self.pan_offset.x,
            view_pos.y * self.zoom + self.pan_offset.y,
        )
    }

    /// Convert screen pixels back to tree-space coordinates
    pub fn region_to_view(&self, screen_pos: Pos2) -> Pos2 {
        Pos2::new(
            (screen_pos.x - self.pan_offset.x) / self.zoom,
            (screen_pos.y - self.pan_offset.y) / self.zoom,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_projection() {
        let mut viewport = Viewport::new();
        viewport.zoom = 2.0;
        viewport.pan_offset = Vec2::new(10.0, -5.0);
        let p = Pos2::new(33.0, 47.0);
        let back = viewport.region_to_view(viewport.view_to_region(p));
        assert!((back.x - p.x).abs() < 1e-4 && (back.y - p.y).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_keeps_anchor_point_fixed() {
        let mut viewport = Viewport::new();
        let anchor = Pos2::new(100.0, 100.0);
        let before = viewport.region_to_view(anchor);
        viewport.zoom_at_point(anchor, 2.0);
        let after = viewport.region_to_view(anchor);
        assert!((before.x - after.x).abs() < 1e-3 && (before.y - after.y).abs() < 1e-3);
    }
}
