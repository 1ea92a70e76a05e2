//! Preferences structure consumed by the rendering engine

use serde::Serialize;
use std::collections::BTreeMap;

/// ISO 15924 code the engine uses for script-independent font settings
pub const COMMON_SCRIPT: &str = "Zyyy";

/// Font family per script code
pub type ScriptFontFamilyMap = BTreeMap<String, String>;

/// Render-engine preferences
///
/// [`WebPreferences::default`] holds the engine's own defaults; a
/// [`WebContentsPreferences`](crate::WebContentsPreferences) store overrides
/// the fields its bag configures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebPreferences {
    pub javascript_enabled: bool,
    pub images_enabled: bool,
    pub text_areas_are_resizable: bool,
    pub navigate_on_drag_drop: bool,
    pub webgl1_enabled: bool,
    pub webgl2_enabled: bool,
    pub web_security_enabled: bool,
    pub allow_running_insecure_content: bool,
    pub standard_font_family_map: ScriptFontFamilyMap,
    pub serif_font_family_map: ScriptFontFamilyMap,
    pub sans_serif_font_family_map: ScriptFontFamilyMap,
    pub fixed_font_family_map: ScriptFontFamilyMap,
    pub cursive_font_family_map: ScriptFontFamilyMap,
    pub fantasy_font_family_map: ScriptFontFamilyMap,
    pub default_font_size: i32,
    pub default_fixed_font_size: i32,
    pub minimum_font_size: i32,
    pub default_encoding: String,
    pub node_integration: bool,
}

impl Default for WebPreferences {
    fn default() -> Self {
        Self {
            javascript_enabled: true,
            images_enabled: true,
            text_areas_are_resizable: true,
            navigate_on_drag_drop: false,
            webgl1_enabled: true,
            webgl2_enabled: true,
            web_security_enabled: true,
            allow_running_insecure_content: false,
            standard_font_family_map: ScriptFontFamilyMap::new(),
            serif_font_family_map: ScriptFontFamilyMap::new(),
            sans_serif_font_family_map: ScriptFontFamilyMap::new(),
            fixed_font_family_map: ScriptFontFamilyMap::new(),
            cursive_font_family_map: ScriptFontFamilyMap::new(),
            fantasy_font_family_map: ScriptFontFamilyMap::new(),
            default_font_size: 16,
            default_fixed_font_size: 13,
            minimum_font_size: 0,
            default_encoding: "ISO-8859-1".to_string(),
            node_integration: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_defaults() {
        let prefs = WebPreferences::default();
        assert!(prefs.javascript_enabled);
        assert!(prefs.webgl1_enabled && prefs.webgl2_enabled);
        assert!(prefs.web_security_enabled);
        assert!(!prefs.allow_running_insecure_content);
        assert!(!prefs.node_integration);
        assert!(prefs.standard_font_family_map.is_empty());
        assert_eq!(prefs.default_font_size, 16);
        assert_eq!(prefs.default_fixed_font_size, 13);
    }
}
