//! Application-wide constants and default values
//!
//! Centralized location for all hard-coded values to improve maintainability

/// Interaction constants
pub mod interaction {
    /// Socket pick radius around the cursor, in pixels at ui scale 1
    pub const SOCKET_DETECT_RADIUS: f32 = 20.0;

    /// Margin added around node bounds for the coarse proximity cull
    pub const NODE_CULL_MARGIN: f32 = 30.0;

    /// Squared cursor travel below which a pointer move skips the redraw
    pub const MOVE_REDRAW_THRESHOLD_SQ: f32 = 4.0;
}

/// Link curve sampling constants
pub mod curve {
    /// Manhattan screen distance covered by one curve segment
    pub const PIXELS_PER_SEGMENT: f32 = 15.0;

    /// Minimum number of segments per curve
    pub const MIN_SEGMENTS: usize = 8;

    /// Maximum number of segments per curve
    pub const MAX_SEGMENTS: usize = 64;

    /// Line width for highlighted link curves
    pub const LINK_LINE_WIDTH: f32 = 2.0;

    /// Minimum strip width when links render as triangle strips
    pub const MIN_STRIP_WIDTH: f32 = 3.0;
}

/// Node outline constants
pub mod outline {
    /// Corner radius of the rounded outline drawn around highlighted nodes
    pub const CORNER_RADIUS: f32 = 10.0;

    /// Angular segments per outline corner arc
    pub const CORNER_SEGMENTS: usize = 8;

    /// Line width for node outlines
    pub const LINE_WIDTH: f32 = 2.0;

    /// Strip width when outlines render as triangle strips
    pub const STRIP_WIDTH: f32 = 5.0;

    /// Vertical shift applied to collapsed node bounds, matching the host's
    /// collapsed-node rendering
    pub const HIDDEN_NODE_OFFSET: f32 = -6.0;
}

/// Jump marker constants
pub mod marker {
    /// Padding around the target node covered by the temporary marker frame
    pub const PADDING: f32 = 40.0;

    /// Seconds before the host timer removes the marker frame
    pub const LIFETIME_SECS: f32 = 1.0;
}
