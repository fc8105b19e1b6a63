//! # GUI Theme
//!
//! Dark studio theme for egui: near-black panels with a violet accent for
//! selection and primary actions, and green/amber/red status colors.

use egui::{Color32, Context, Stroke, Visuals};
use egui::Theme as EguiTheme;

/// Raw color palette
#[derive(Debug, Clone)]
pub struct StudioColors {
    /// Window and panel background
    pub background: Color32,
    /// Card background
    pub surface: Color32,
    /// Primary text
    pub text: Color32,
    /// Accent for selection and primary buttons
    pub accent: Color32,
    /// Darker accent for pressed widgets
    pub accent_dark: Color32,
    pub border: Color32,
    pub green_success: Color32,
    pub red_error: Color32,
    pub amber_warning: Color32,
    pub blue_info: Color32,
    /// Secondary text
    pub gray_secondary: Color32,
    /// Gem counter
    pub gem: Color32,
}

impl Default for StudioColors {
    fn default() -> Self {
        StudioColors {
            background: Color32::from_rgb(12, 12, 16),       // #0C0C10
            surface: Color32::from_rgb(24, 24, 32),          // #181820
            text: Color32::from_rgb(236, 236, 244),          // #ECECF4
            accent: Color32::from_rgb(139, 92, 246),         // #8B5CF6
            accent_dark: Color32::from_rgb(91, 33, 182),     // #5B21B6
            border: Color32::from_rgb(48, 48, 60),           // #30303C
            green_success: Color32::from_rgb(52, 211, 153),  // #34D399
            red_error: Color32::from_rgb(248, 113, 113),     // #F87171
            amber_warning: Color32::from_rgb(251, 191, 36),  // #FBBF24
            blue_info: Color32::from_rgb(96, 165, 250),      // #60A5FA
            gray_secondary: Color32::from_rgb(148, 148, 164), // #9494A4
            gem: Color32::from_rgb(103, 232, 249),           // #67E8F9
        }
    }
}

/// Semantic colors used by screens and widgets
#[derive(Debug, Clone)]
pub struct Theme {
    pub colors: StudioColors,
    pub normal: Color32,
    /// Selected/highlighted items
    pub selected: Color32,
    pub dim: Color32,
    pub success: Color32,
    pub error: Color32,
    pub warning: Color32,
    pub info: Color32,
    pub gem: Color32,
    pub surface: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        let colors = StudioColors::default();
        Theme {
            normal: colors.text,
            selected: colors.accent,
            dim: colors.gray_secondary,
            success: colors.green_success,
            error: colors.red_error,
            warning: colors.amber_warning,
            info: colors.blue_info,
            gem: colors.gem,
            surface: colors.surface,
            colors,
        }
    }
}

impl Theme {
    pub fn studio_visuals(&self) -> Visuals {
        let c = &self.colors;
        let mut visuals = Visuals::dark();

        visuals.override_text_color = Some(c.text);
        visuals.panel_fill = c.background;
        visuals.window_fill = c.surface;
        visuals.window_stroke = Stroke::new(1.0, c.border);
        visuals.faint_bg_color = c.surface;
        visuals.extreme_bg_color = Color32::from_rgb(6, 6, 10);

        visuals.widgets.noninteractive.bg_fill = c.surface;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, c.border);
        visuals.widgets.inactive.bg_fill = c.surface;
        visuals.widgets.inactive.weak_bg_fill = Color32::from_rgb(32, 32, 42);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.5, c.accent);
        visuals.widgets.hovered.weak_bg_fill = Color32::from_rgb(44, 36, 70);
        visuals.widgets.active.bg_fill = c.accent_dark;
        visuals.widgets.active.bg_stroke = Stroke::new(1.5, c.accent);

        visuals.selection.bg_fill = Color32::from_rgba_unmultiplied(139, 92, 246, 96);
        visuals.selection.stroke = Stroke::new(1.5, c.accent);
        visuals.hyperlink_color = c.blue_info;

        visuals
    }

    /// Apply the studio visuals and spacing to both egui themes.
    pub fn apply(&self, ctx: &Context) {
        let visuals = self.studio_visuals();
        for theme in [EguiTheme::Dark, EguiTheme::Light] {
            ctx.style_mut_of(theme, |style| {
                style.visuals = visuals.clone();
                style.spacing.item_spacing = egui::Vec2::new(8.0, 6.0);
                style.spacing.button_padding = egui::Vec2::new(12.0, 6.0);
                style.spacing.window_margin = egui::Margin::same(10);
            });
        }
        tracing::debug!("Applied studio theme");
    }
}
