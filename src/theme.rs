//! Theme color surface consumed by the highlight renderer
//!
//! Hosts hand the session a `NodeTheme` mirroring their editor theme. Lookups
//! return `Option` so a theme missing a category degrades to the classifier
//! fallback instead of erroring.

use crate::colors::ColorCategory;
use egui::Color32;
use std::collections::HashMap;

/// Default horizontal tension of link curves when the host theme has none
pub const DEFAULT_CURVE_TENSION: f32 = 0.5;

/// Editor theme colors for node categories, plus link-curve tension
#[derive(Debug, Clone)]
pub struct NodeTheme {
    categories: HashMap<ColorCategory, Color32>,
    /// Horizontal handle tension for link curves, 0.0 (straight) to 1.0
    pub curve_tension: f32,
}

impl NodeTheme {
    /// A theme with no category colors; every lookup falls back
    pub fn empty() -> Self {
        Self {
            categories: HashMap::new(),
            curve_tension: DEFAULT_CURVE_TENSION,
        }
    }

    /// Base color for a category, if the theme defines one
    pub fn category_color(&self, category: ColorCategory) -> Option<Color32> {
        self.categories.get(&category).copied()
    }

    /// Sets the base color for a category
    pub fn set_category_color(&mut self, category: ColorCategory, color: Color32) {
        self.categories.insert(category, color);
    }
}

impl Default for NodeTheme {
    fn default() -> Self {
        use ColorCategory::*;
        let categories = HashMap::from([
            (Group, Color32::from_rgb(38, 99, 56)),
            (Frame, Color32::from_rgb(76, 76, 76)),
            (Layout, Color32::from_rgb(108, 105, 111)),
            (Input, Color32::from_rgb(83, 49, 56)),
            (Output, Color32::from_rgb(99, 33, 33)),
            (Shader, Color32::from_rgb(40, 92, 66)),
            (Geometry, Color32::from_rgb(29, 114, 94)),
            (Texture, Color32::from_rgb(120, 75, 36)),
            (Color, Color32::from_rgb(108, 105, 51)),
            (Vector, Color32::from_rgb(61, 56, 118)),
            (Converter, Color32::from_rgb(36, 98, 131)),
            (Filter, Color32::from_rgb(99, 69, 109)),
        ]);
        Self {
            categories,
            curve_tension: DEFAULT_CURVE_TENSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_covers_every_category() {
        use ColorCategory::*;
        let theme = NodeTheme::default();
        for category in [
            Group, Frame, Layout, Input, Output, Shader, Geometry, Texture, Color, Vector,
            Converter, Filter,
        ] {
            assert!(theme.category_color(category).is_some(), "{category:?}");
        }
    }

    #[test]
    fn test_empty_theme_yields_no_colors() {
        let theme = NodeTheme::empty();
        assert_eq!(theme.category_color(ColorCategory::Shader), None);
        assert_eq!(theme.curve_tension, DEFAULT_CURVE_TENSION);
    }
}
