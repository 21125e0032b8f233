//! Node border color classification
//!
//! Resolves a highlight border color for a node from its type identifier,
//! through a layered lookup: exact-match table, then namespace prefix
//! heuristics, then (for the compositor namespace) an ordered list of
//! case-insensitive patterns, then the shader-like default. The resolved
//! theme color is run through a saturation/value boost so highlight borders
//! stand out against the node body.
//!
//! Classification stays data-driven (tables plus ordered patterns) so every
//! layer is testable on its own.

use crate::nodes::Node;
use crate::theme::NodeTheme;
use egui::ecolor::Hsva;
use egui::Color32;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

/// Fraction of remaining saturation headroom added by the boost
pub const SAT_BOOST: f32 = 0.6;
/// Fraction of remaining value headroom added by the boost
pub const VAL_BOOST: f32 = 0.85;
/// Saturation floor after boosting
pub const MIN_SAT: f32 = 0.65;
/// Value floor after boosting
pub const MIN_VAL: f32 = 0.25;

/// Base color used when the theme has no entry for a category
pub const FALLBACK_BASE: Color32 = Color32::from_rgb(204, 204, 204);

/// Semantic color category a node classifies into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCategory {
    Group,
    Frame,
    Layout,
    Input,
    Output,
    Shader,
    Geometry,
    Texture,
    Color,
    Vector,
    Converter,
    Filter,
}

/// Per-session memo of resolved colors, keyed by type identifier
pub type ColorCache = HashMap<String, Color32>;

static EXACT_CATEGORY: Lazy<HashMap<&'static str, ColorCategory>> = Lazy::new(|| {
    use ColorCategory::*;
    HashMap::from([
        ("ShaderNodeMapping", Vector),
        ("ShaderNodeTexCoord", Input),
        ("ShaderNodeTexImage", Texture),
        ("ShaderNodeBump", Vector),
        ("ShaderNodeNormalMap", Vector),
        ("ShaderNodeRGB", Color),
        ("ShaderNodeHueSaturation", Color),
        ("ShaderNodeMix", Color),
        ("ShaderNodeValToRGB", Color),
        ("ShaderNodeVectorMath", Vector),
        ("ShaderNodeMath", Converter),
        ("ShaderNodeClamp", Converter),
        ("ShaderNodeSeparateRGB", Converter),
        ("ShaderNodeCombineRGB", Converter),
        ("ShaderNodeSeparateXYZ", Vector),
        ("ShaderNodeCombineXYZ", Vector),
        ("ShaderNodeGroup", Group),
        ("NodeGroup", Group),
        ("NodeFrame", Frame),
        ("NodeReroute", Layout),
        ("GeometryNodeGroup", Group),
        ("CompositorNodeGroup", Group),
        ("CompositorNodeComposite", Output),
        ("CompositorNodeViewer", Output),
        ("CompositorNodeImage", Input),
    ])
});

/// Compositor patterns in priority order; first match wins.
static COMPOSITOR_PATTERNS: Lazy<Vec<(ColorCategory, Regex)>> = Lazy::new(|| {
    use ColorCategory::*;
    [
        (Output, r"(Composite|Viewer|Output)"),
        (Input, r"(Image|RLayers|Render|Mask|Movie|Input)"),
        (Filter, r"(Filter|Blur|Denoise|Glare|Defocus|Bilateral)"),
        (Color, r"(Color|Hue|Saturation|Gamma|Exposure|Levels|Balance|Curves|MixRGB)"),
        (Converter, r"(Math|Convert|AlphaOver|ZCombine|SetAlpha|RGBToBW|Premul)"),
        (Vector, r"(Vector|Translate|Rotate|Scale|Transform|Displace|Map)"),
        (Group, r"(Group)"),
        (Layout, r"(Reroute)"),
        (Frame, r"(Frame)"),
    ]
    .into_iter()
    .map(|(category, pattern)| {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .expect("compositor pattern is a valid regex");
        (category, regex)
    })
    .collect()
});

fn shader_category(type_id: &str) -> ColorCategory {
    use ColorCategory::*;
    if type_id.contains("Output") {
        Output
    } else if type_id.contains("Bsdf") || type_id.contains("BSDF")
        || type_id.contains("Emission") || type_id.contains("Principled")
    {
        Shader
    } else if type_id.starts_with("ShaderNodeTex") {
        Texture
    } else if type_id.contains("Vector") {
        Vector
    } else if type_id.contains("Hue") || type_id.contains("RGB") || type_id.contains("Color") {
        Color
    } else if type_id.contains("Group") {
        Group
    } else if type_id.contains("Reroute") {
        Layout
    } else if type_id.contains("Frame") {
        Frame
    } else {
        Shader
    }
}

fn geometry_category(type_id: &str) -> ColorCategory {
    use ColorCategory::*;
    if type_id.contains("Group") {
        Group
    } else if type_id.contains("Reroute") {
        Layout
    } else if type_id.contains("Frame") {
        Frame
    } else {
        Geometry
    }
}

fn compositor_category(type_id: &str, name: &str) -> ColorCategory {
    for (category, pattern) in COMPOSITOR_PATTERNS.iter() {
        if pattern.is_match(type_id) || pattern.is_match(name) {
            return *category;
        }
    }
    ColorCategory::Converter
}

/// Classifies a type identifier into its color category
pub fn classify(type_id: &str, name: &str) -> ColorCategory {
    if let Some(category) = EXACT_CATEGORY.get(type_id) {
        *category
    } else if type_id.starts_with("ShaderNode") {
        shader_category(type_id)
    } else if type_id.starts_with("GeometryNode") {
        geometry_category(type_id)
    } else if type_id.starts_with("CompositorNode") {
        compositor_category(type_id, name)
    } else {
        ColorCategory::Shader
    }
}

/// Saturation/value boost applied to base colors so borders read as
/// highlights. Alpha is preserved.
pub fn boost(color: Color32) -> Color32 {
    let mut hsva = Hsva::from(color);
    hsva.s = (hsva.s + SAT_BOOST * (1.0 - hsva.s)).max(MIN_SAT).min(1.0);
    hsva.v = (hsva.v + VAL_BOOST * (1.0 - hsva.v)).max(MIN_VAL).min(1.0);
    Color32::from(hsva)
}

/// Resolves the highlight border color for a node.
///
/// A user-assigned custom color is boosted directly and bypasses the cache;
/// otherwise the result is memoized by type identifier for the lifetime of
/// the session cache.
pub fn node_border_color(node: &Node, theme: &NodeTheme, cache: &mut ColorCache) -> Color32 {
    if let Some(custom) = node.custom_color {
        return boost(custom);
    }
    if let Some(cached) = cache.get(node.type_id.as_str()) {
        return *cached;
    }
    let category = classify(&node.type_id, &node.name);
    let base = theme.category_color(category).unwrap_or(FALLBACK_BASE);
    let color = boost(base);
    cache.insert(node.type_id.clone(), color);
    color
}
