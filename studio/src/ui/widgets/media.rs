//! # Media Widgets
//!
//! Template cards, result previews and empty states. Remote images load
//! through the egui_extras HTTP loader installed at startup.

use egui::{Color32, RichText};
use shared::{MediaKind, Template};

use crate::ui::theme::Theme;

pub const CARD_WIDTH: f32 = 200.0;
const THUMB_HEIGHT: f32 = 150.0;

/// Badge text for a media kind.
pub fn kind_badge(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "IMAGE",
        MediaKind::Video => "VIDEO",
    }
}

/// Cost label, e.g. "1 gem" or "10 gems".
pub fn cost_label(cost: i64) -> String {
    if cost == 1 {
        "1 gem".to_string()
    } else {
        format!("{} gems", cost)
    }
}

/// Render a gallery card. Returns true when clicked.
pub fn render_template_card(ui: &mut egui::Ui, template: &Template, thumbnail_url: &str, theme: &Theme) -> bool {
    let frame = egui::Frame::group(ui.style())
        .fill(theme.surface)
        .inner_margin(egui::Margin::same(8));

    let inner = frame.show(ui, |ui| {
        ui.set_width(CARD_WIDTH);
        ui.vertical(|ui| {
            ui.add(
                egui::Image::from_uri(thumbnail_url.to_string())
                    .fit_to_exact_size(egui::vec2(CARD_WIDTH, THUMB_HEIGHT))
                    .corner_radius(4.0)
                    .show_loading_spinner(true),
            );
            ui.add_space(4.0);
            ui.label(RichText::new(&template.title).strong());
            ui.horizontal(|ui| {
                let badge_color = match template.kind {
                    MediaKind::Image => theme.info,
                    MediaKind::Video => theme.warning,
                };
                ui.colored_label(badge_color, kind_badge(template.kind));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.colored_label(theme.gem, cost_label(template.cost));
                });
            });
        });
    });

    inner
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
        .clicked()
}

/// Render a finished result. Returns true when the open button is clicked.
pub fn render_result(ui: &mut egui::Ui, kind: MediaKind, url: &str, theme: &Theme) -> bool {
    match kind {
        MediaKind::Image => {
            ui.add(
                egui::Image::from_uri(url.to_string())
                    .max_width(480.0)
                    .max_height(480.0)
                    .corner_radius(6.0)
                    .show_loading_spinner(true),
            );
            ui.add_space(6.0);
            ui.button("Download image").clicked()
        }
        MediaKind::Video => {
            let mut clicked = false;
            egui::Frame::group(ui.style())
                .fill(theme.surface)
                .inner_margin(egui::Margin::same(16))
                .show(ui, |ui| {
                    ui.set_width(360.0);
                    ui.label(RichText::new("▶ Video ready").size(18.0).color(theme.success));
                    ui.colored_label(theme.dim, url);
                    ui.add_space(6.0);
                    clicked = ui.button("Open video").clicked();
                });
            clicked
        }
    }
}

/// Render an empty state message
pub fn render_empty_state(ui: &mut egui::Ui, primary: &str, secondary: Option<&str>, theme: &Theme) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.colored_label(theme.dim, RichText::new(primary).size(16.0));
        if let Some(secondary) = secondary {
            ui.add_space(8.0);
            ui.colored_label(theme.dim, secondary);
        }
    });
}

/// Colored status text.
pub fn status_label(ui: &mut egui::Ui, text: impl Into<String>, color: Color32) {
    ui.label(RichText::new(text.into()).color(color).strong());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_label_pluralizes() {
        assert_eq!(cost_label(1), "1 gem");
        assert_eq!(cost_label(10), "10 gems");
    }

    #[test]
    fn test_kind_badge() {
        assert_eq!(kind_badge(MediaKind::Image), "IMAGE");
        assert_eq!(kind_badge(MediaKind::Video), "VIDEO");
    }
}
