//! # Gallery Screen
//!
//! Template catalog with an image/video filter. Clicking a card opens the
//! swap screen for that template.

use egui::RichText;
use shared::absolute_media_url;

use crate::app::{App, AppState, MediaFilter};
use crate::ui::theme::Theme;
use crate::ui::widgets::media;

pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    ui.horizontal(|ui| {
        ui.heading("Templates");
        ui.add_space(16.0);
        for filter in MediaFilter::all() {
            let selected = state.catalog.filter == filter;
            if ui.selectable_label(selected, filter.label()).clicked() && !selected {
                app.handle_filter_change(filter);
            }
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let refresh = ui.add_enabled(!state.catalog.loading, egui::Button::new("Refresh"));
            if refresh.clicked() {
                app.refresh_templates();
            }
        });
    });
    ui.separator();

    if state.catalog.loading && !state.catalog.loaded {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.spinner();
            ui.colored_label(theme.dim, "Loading templates...");
        });
        return;
    }

    let visible = state.catalog.visible();
    if visible.is_empty() {
        let hint = if state.catalog.templates.is_empty() {
            "No templates found. Is the backend running?"
        } else {
            "No templates match this filter."
        };
        media::render_empty_state(ui, hint, None, theme);
        return;
    }

    ui.label(RichText::new(format!("{} templates", visible.len())).color(theme.dim));
    ui.add_space(6.0);

    let origin = state.config.backend_origin();
    let mut clicked = None;
    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            for template in &visible {
                let thumbnail = absolute_media_url(&origin, &template.thumbnail);
                if media::render_template_card(ui, template, &thumbnail, theme) {
                    clicked = Some((*template).clone());
                }
            }
        });
    });

    if let Some(template) = clicked {
        app.handle_template_click(template);
    }
}
