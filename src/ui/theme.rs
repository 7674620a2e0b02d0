use eframe::egui::{self, epaint::Shadow, Color32, CornerRadius, Stroke, Visuals};
use serde::{Deserialize, Serialize};

/// Corner radius shared by buttons, inputs and menus
const WIDGET_RADIUS: u8 = 8;

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Sky,
    Dusk,
    Forest,
    Catppuccin,
}

impl ThemePreset {
    /// Get all available presets
    pub fn all() -> &'static [ThemePreset] {
        &[
            ThemePreset::Sky,
            ThemePreset::Dusk,
            ThemePreset::Forest,
            ThemePreset::Catppuccin,
        ]
    }

    /// Get display name for the preset
    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Sky => "Sky",
            ThemePreset::Dusk => "Dusk",
            ThemePreset::Forest => "Forest",
            ThemePreset::Catppuccin => "Catppuccin Mocha",
        }
    }

    /// Get the theme colors for this preset
    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Sky => Theme::sky(),
            ThemePreset::Dusk => Theme::dusk(),
            ThemePreset::Forest => Theme::forest(),
            ThemePreset::Catppuccin => Theme::catppuccin(),
        }
    }
}

/// Theme color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg_darkest: Color32,
    pub bg_dark: Color32,
    pub bg_medium: Color32,
    pub bg_light: Color32,

    // Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    // Accent colors
    pub accent: Color32,
    pub accent_hover: Color32,
    pub accent_muted: Color32,

    // Semantic colors
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,

    // Chat bubbles
    pub user_bubble: Color32,

    // UI element colors
    pub border: Color32,
    pub selection: Color32,
}

impl Theme {
    /// Sky theme - clear daytime blues
    pub fn sky() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(10, 18, 30),
            bg_dark: Color32::from_rgb(14, 25, 41),
            bg_medium: Color32::from_rgb(21, 36, 58),
            bg_light: Color32::from_rgb(33, 52, 80),

            text_primary: Color32::from_rgb(241, 248, 255),
            text_secondary: Color32::from_rgb(196, 214, 232),
            text_muted: Color32::from_rgb(128, 150, 172),

            accent: Color32::from_rgb(14, 165, 233),        // Sky-500
            accent_hover: Color32::from_rgb(56, 189, 248),  // Sky-400
            accent_muted: Color32::from_rgb(3, 105, 161),   // Sky-700

            success: Color32::from_rgb(52, 211, 153),
            warning: Color32::from_rgb(251, 191, 36),
            error: Color32::from_rgb(248, 113, 113),

            user_bubble: Color32::from_rgb(2, 132, 199),

            border: Color32::from_rgb(48, 68, 96),
            selection: Color32::from_rgb(14, 165, 233).gamma_multiply(0.3),
        }
    }

    /// Dusk theme - violet evening sky
    pub fn dusk() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(22, 18, 32),
            bg_dark: Color32::from_rgb(30, 26, 46),
            bg_medium: Color32::from_rgb(42, 36, 62),
            bg_light: Color32::from_rgb(58, 50, 82),

            text_primary: Color32::from_rgb(250, 250, 255),
            text_secondary: Color32::from_rgb(200, 195, 220),
            text_muted: Color32::from_rgb(140, 135, 160),

            accent: Color32::from_rgb(139, 92, 246),        // Violet-500
            accent_hover: Color32::from_rgb(167, 139, 250), // Violet-400
            accent_muted: Color32::from_rgb(109, 40, 217),  // Violet-700

            success: Color32::from_rgb(74, 222, 128),
            warning: Color32::from_rgb(250, 204, 21),
            error: Color32::from_rgb(244, 114, 182),

            user_bubble: Color32::from_rgb(124, 58, 237),

            border: Color32::from_rgb(75, 65, 100),
            selection: Color32::from_rgb(139, 92, 246).gamma_multiply(0.3),
        }
    }

    /// Forest theme - emerald trails
    pub fn forest() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(10, 18, 15),
            bg_dark: Color32::from_rgb(16, 28, 23),
            bg_medium: Color32::from_rgb(24, 40, 33),
            bg_light: Color32::from_rgb(38, 58, 48),

            text_primary: Color32::from_rgb(236, 253, 245),
            text_secondary: Color32::from_rgb(190, 222, 205),
            text_muted: Color32::from_rgb(120, 152, 135),

            accent: Color32::from_rgb(16, 185, 129),        // Emerald-500
            accent_hover: Color32::from_rgb(52, 211, 153),  // Emerald-400
            accent_muted: Color32::from_rgb(4, 120, 87),    // Emerald-700

            success: Color32::from_rgb(74, 222, 128),
            warning: Color32::from_rgb(253, 224, 71),
            error: Color32::from_rgb(252, 165, 165),

            user_bubble: Color32::from_rgb(5, 150, 105),

            border: Color32::from_rgb(50, 72, 60),
            selection: Color32::from_rgb(16, 185, 129).gamma_multiply(0.3),
        }
    }

    /// Catppuccin Mocha theme - popular community theme
    pub fn catppuccin() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(17, 17, 27),    // Crust
            bg_dark: Color32::from_rgb(24, 24, 37),       // Mantle
            bg_medium: Color32::from_rgb(30, 30, 46),     // Base
            bg_light: Color32::from_rgb(49, 50, 68),      // Surface0

            text_primary: Color32::from_rgb(205, 214, 244),   // Text
            text_secondary: Color32::from_rgb(186, 194, 222), // Subtext1
            text_muted: Color32::from_rgb(147, 153, 178),     // Overlay1

            accent: Color32::from_rgb(137, 180, 250),        // Blue
            accent_hover: Color32::from_rgb(180, 190, 254),  // Lavender
            accent_muted: Color32::from_rgb(116, 148, 204),

            success: Color32::from_rgb(166, 227, 161),  // Green
            warning: Color32::from_rgb(249, 226, 175),  // Yellow
            error: Color32::from_rgb(243, 139, 168),    // Red

            user_bubble: Color32::from_rgb(116, 148, 204),

            border: Color32::from_rgb(69, 71, 90),  // Surface1
            selection: Color32::from_rgb(137, 180, 250).gamma_multiply(0.3),
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_visuals(self.visuals());
    }

    /// Rounded, card-like visuals matching the chat bubbles and photo grid
    pub fn visuals(&self) -> Visuals {
        let mut visuals = Visuals::dark();

        visuals.window_fill = self.bg_dark;
        visuals.panel_fill = self.bg_dark;
        visuals.faint_bg_color = self.bg_medium;
        visuals.extreme_bg_color = self.bg_darkest;

        // Search and chat inputs sit sunk below the panels
        visuals.text_edit_bg_color = Some(self.bg_darkest);
        visuals.text_cursor.stroke = Stroke::new(2.0, self.accent);

        let widgets = &mut visuals.widgets;
        let states = [
            (&mut widgets.noninteractive, self.bg_medium, self.border, self.text_secondary),
            (&mut widgets.inactive, self.bg_light, self.border, self.text_primary),
            (&mut widgets.hovered, self.bg_light, self.accent_hover, self.text_primary),
            (&mut widgets.active, self.accent_muted, self.accent, self.text_primary),
            (&mut widgets.open, self.bg_medium, self.accent, self.text_primary),
        ];
        for (state, fill, stroke, text) in states {
            state.bg_fill = fill;
            state.weak_bg_fill = fill;
            state.bg_stroke = Stroke::new(1.0, stroke);
            state.fg_stroke = Stroke::new(1.0, text);
            state.corner_radius = CornerRadius::same(WIDGET_RADIUS);
        }
        // Tab buttons and thumbnails grow slightly under the pointer
        widgets.hovered.expansion = 1.0;

        visuals.selection.bg_fill = self.selection;
        visuals.selection.stroke = Stroke::new(1.0, self.accent);
        visuals.hyperlink_color = self.accent_hover;

        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_corner_radius = CornerRadius::same(12);
        visuals.menu_corner_radius = CornerRadius::same(WIDGET_RADIUS);
        visuals.window_shadow = Shadow {
            offset: [0, 6],
            blur: 16,
            spread: 0,
            color: Color32::from_black_alpha(90),
        };
        visuals.popup_shadow = Shadow::NONE;

        visuals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visuals_follow_palette() {
        for preset in ThemePreset::all() {
            let theme = preset.theme();
            let visuals = theme.visuals();

            assert_eq!(visuals.panel_fill, theme.bg_dark);
            assert_eq!(visuals.text_edit_bg_color, Some(theme.bg_darkest));
            assert_eq!(visuals.widgets.active.bg_fill, theme.accent_muted);
            assert_eq!(
                visuals.widgets.inactive.corner_radius,
                CornerRadius::same(WIDGET_RADIUS)
            );
        }
    }
}
