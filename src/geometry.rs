//! Screen-space geometry for highlight rendering
//!
//! Projects tree-space node bounds and socket anchors into screen pixels and
//! builds the vertex sequences (link curves, rounded outlines, triangle
//! strips) handed to the rendering sink.

use crate::constants::{curve, outline};
use crate::nodes::{Link, Node, NodeGraph};
use crate::position::SocketPositionProvider;
use crate::view::Viewport;
use egui::Pos2;
use std::f32::consts::{FRAC_PI_2, PI};

/// Screen-space bounding box with edges sorted ascending
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl ScreenRect {
    /// Checks whether a screen point lies inside the box
    pub fn contains(&self, pos: Pos2) -> bool {
        pos.x >= self.left && pos.x <= self.right && pos.y >= self.bottom && pos.y <= self.top
    }

    /// The box grown by a margin on every side
    pub fn expand(&self, margin: f32) -> ScreenRect {
        ScreenRect {
            left: self.left - margin,
            bottom: self.bottom - margin,
            right: self.right + margin,
            top: self.top + margin,
        }
    }
}

/// Screen-space bounds of a node.
///
/// Accumulates ancestor frame offsets, applies the ui scale to the tree
/// position, projects both corners and normalizes the edges ascending.
/// Collapsed nodes get the host's vertical header shift.
pub fn node_bounds_px(graph: &NodeGraph, node: &Node, viewport: &Viewport) -> ScreenRect {
    let mut ax = node.position.x;
    let mut ay = node.position.y;
    let mut parent = node.parent;
    while let Some(parent_id) = parent {
        match graph.node(parent_id) {
            Some(frame) => {
                ax += frame.position.x;
                ay += frame.position.y;
                parent = frame.parent;
            }
            None => break,
        }
    }

    let ui = viewport.ui_scale;
    let min_x = ax * ui;
    let max_x = min_x + node.dimensions.x;
    let max_y = ay * ui;
    let min_y = max_y - node.dimensions.y;

    let a = viewport.view_to_region(Pos2::new(min_x, min_y));
    let b = viewport.view_to_region(Pos2::new(max_x, max_y));
    let (left, right) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
    let (mut bottom, mut top) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };

    if node.collapsed {
        let offset = outline::HIDDEN_NODE_OFFSET * ui;
        top -= offset;
        bottom -= offset;
    }

    ScreenRect {
        left,
        bottom,
        right,
        top,
    }
}

/// Calculates a point on a cubic Bézier curve at parameter t (0.0 to 1.0)
pub fn cubic_bezier_point(t: f32, p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2) -> Pos2 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;

    Pos2::new(
        mt3 * p0.x + 3.0 * mt2 * t * p1.x + 3.0 * mt * t2 * p2.x + t3 * p3.x,
        mt3 * p0.y + 3.0 * mt2 * t * p1.y + 3.0 * mt * t2 * p2.y + t3 * p3.y,
    )
}

/// Screen-space polyline approximating a link's visual curve.
///
/// Returns `None` when either endpoint socket is disabled or its anchor is
/// unresolved; such links contribute nothing to the render pass. The handle
/// offset follows the horizontal span, falling back to the straight-line
/// distance when the target sits behind the source so the curve loops
/// outward instead of crossing back.
pub fn link_curve_verts(
    graph: &NodeGraph,
    provider: &dyn SocketPositionProvider,
    viewport: &Viewport,
    link: &Link,
    tension: f32,
) -> Option<Vec<Pos2>> {
    if !graph.socket(link.from)?.enabled || !graph.socket(link.to)?.enabled {
        return None;
    }
    let from = provider.socket_anchor(graph, link.from)?;
    let to = provider.socket_anchor(graph, link.to)?;

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let handle = if dx >= 0.0 {
        dx * tension
    } else {
        (dx * dx + dy * dy).sqrt() * tension
    };
    let p0 = from;
    let p1 = Pos2::new(from.x + handle, from.y);
    let p2 = Pos2::new(to.x - handle, to.y);
    let p3 = to;

    let approx_len = dx.abs() + dy.abs();
    let segments = ((approx_len / curve::PIXELS_PER_SEGMENT) as usize)
        .clamp(curve::MIN_SEGMENTS, curve::MAX_SEGMENTS);

    let verts = (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            viewport.view_to_region(cubic_bezier_point(t, p0, p1, p2, p3))
        })
        .collect();
    Some(verts)
}

/// Closed outline of a rounded rectangle.
///
/// Four quarter arcs (bottom-right, top-right, top-left, bottom-left), nine
/// vertices each, plus a closing vertex equal to the first: 37 points total
/// at the default corner segment count.
pub fn rounded_rect_outline(rect: ScreenRect, radius: f32) -> Vec<Pos2> {
    let segments = outline::CORNER_SEGMENTS;
    let corners = [
        (rect.right - radius, rect.bottom + radius, -FRAC_PI_2),
        (rect.right - radius, rect.top - radius, 0.0),
        (rect.left + radius, rect.top - radius, FRAC_PI_2),
        (rect.left + radius, rect.bottom + radius, PI),
    ];

    let mut verts = Vec::with_capacity(4 * (segments + 1) + 1);
    for (cx, cy, start) in corners {
        for i in 0..=segments {
            let angle = start + (i as f32 / segments as f32) * FRAC_PI_2;
            verts.push(Pos2::new(cx + angle.cos() * radius, cy + angle.sin() * radius));
        }
    }
    verts.push(verts[0]);
    verts
}

/// Expands a polyline into a triangle strip of the given width.
///
/// Fallback for sinks that cannot rasterize wide lines. Needs at least two
/// points.
pub fn tri_strip_from_polyline(pts: &[Pos2], width: f32) -> Option<Vec<Pos2>> {
    let n = pts.len();
    if n < 2 {
        return None;
    }
    let hw = width * 0.5;
    let mut out = Vec::with_capacity(n * 2);
    for i in 0..n {
        let (a, b) = if i == 0 {
            (pts[0], pts[1])
        } else if i == n - 1 {
            (pts[n - 2], pts[n - 1])
        } else {
            (pts[i - 1], pts[i + 1])
        };
        let tx = b.x - a.x;
        let ty = b.y - a.y;
        let len = (tx * tx + ty * ty).sqrt().max(f32::EPSILON);
        let nx = -ty / len * hw;
        let ny = tx / len * hw;
        let p = pts[i];
        out.push(Pos2::new(p.x - nx, p.y - ny));
        out.push(Pos2::new(p.x + nx, p.y + ny));
    }
    Some(out)
}

/// Expands a closed polygon outline into a triangle strip of the given
/// width. Needs at least three points.
pub fn tri_strip_from_polygon(pts: &[Pos2], width: f32) -> Option<Vec<Pos2>> {
    let n = pts.len();
    if n < 3 {
        return None;
    }
    let hw = width * 0.5;
    let mut out = Vec::with_capacity(n * 2);
    for i in 0..n {
        let a = pts[(i + n - 1) % n];
        let b = pts[(i + 1) % n];
        let tx = b.x - a.x;
        let ty = b.y - a.y;
        let len = (tx * tx + ty * ty).sqrt().max(f32::EPSILON);
        let nx = -ty / len * hw;
        let ny = tx / len * hw;
        let p = pts[i];
        out.push(Pos2::new(p.x - nx, p.y - ny));
        out.push(Pos2::new(p.x + nx, p.y + ny));
    }
    Some(out)
}
