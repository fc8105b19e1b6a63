//! # Swap Screen
//!
//! Template preview, source face picker, progress and the finished result.

use egui::RichText;
use shared::{absolute_media_url, MediaKind};

use crate::app::workflow::SwapPhase;
use crate::app::{App, AppState, Screen, SIGN_IN_TO_SWAP};
use crate::ui::theme::Theme;
use crate::ui::widgets::media;

/// Extensions accepted by the source face picker.
pub const SOURCE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    if ui.button("← Back to templates").clicked() {
        app.handle_screen_change(Screen::Gallery);
        return;
    }
    ui.add_space(6.0);

    let swap = &state.swap;
    let Some(template) = swap.template.as_ref() else {
        if swap.is_loading_template() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.spinner();
                ui.colored_label(theme.dim, "Loading template...");
            });
        } else {
            let message = swap.template_error.as_deref().unwrap_or("Template not found");
            media::render_empty_state(ui, message, Some("Pick a template from the gallery."), theme);
        }
        return;
    };

    let origin = state.config.backend_origin();

    ui.columns(2, |columns| {
        let left = &mut columns[0];
        left.heading(&template.title);
        left.horizontal(|ui| {
            ui.colored_label(theme.info, media::kind_badge(template.kind));
            ui.colored_label(theme.gem, format!("Costs {}", media::cost_label(template.cost)));
        });
        left.add_space(6.0);
        left.add(
            egui::Image::from_uri(absolute_media_url(&origin, &template.thumbnail))
                .max_width(420.0)
                .max_height(420.0)
                .corner_radius(6.0)
                .show_loading_spinner(true),
        );

        let right = &mut columns[1];
        render_controls(right, state, app, theme);
    });
}

fn render_controls(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    let swap = &state.swap;

    ui.heading("Your face");
    if !state.is_authenticated() {
        ui.colored_label(theme.warning, SIGN_IN_TO_SWAP);
        if ui.button("Sign in").clicked() {
            app.handle_sign_in_request(Screen::Swap);
        }
        return;
    }

    ui.horizontal(|ui| {
        let pick = ui.add_enabled(!swap.is_busy(), egui::Button::new("Choose photo..."));
        if pick.clicked() {
            let picked = rfd::FileDialog::new()
                .add_filter("Images", SOURCE_EXTENSIONS)
                .pick_file();
            if let Some(path) = picked {
                tracing::debug!(path = %path.display(), "Source face selected");
                app.handle_source_selected(path);
            }
        }
        match &swap.source {
            Some(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                ui.label(name);
            }
            None => {
                ui.colored_label(theme.dim, "No photo selected");
            }
        }
    });

    if let Some(path) = &swap.source {
        let uri = format!("file://{}", path.display());
        ui.add(
            egui::Image::from_uri(uri)
                .max_width(160.0)
                .max_height(160.0)
                .corner_radius(4.0),
        );
    }

    ui.add_space(10.0);
    let start = ui.add_enabled(
        swap.can_start(),
        egui::Button::new(RichText::new("Swap face").strong()).fill(theme.selected),
    );
    if start.clicked() {
        app.handle_swap_start();
    }

    ui.add_space(10.0);
    render_phase(ui, &swap.phase, app, theme);
}

fn render_phase(ui: &mut egui::Ui, phase: &SwapPhase, app: &mut App, theme: &Theme) {
    match phase {
        SwapPhase::Idle => {}
        SwapPhase::Uploading | SwapPhase::Queued { .. } | SwapPhase::Polling { .. } => {
            ui.horizontal(|ui| {
                ui.spinner();
                media::status_label(ui, phase.status_text(), theme.info);
            });
        }
        SwapPhase::Completed(result) => {
            media::status_label(ui, "Swap complete!", theme.success);
            ui.add_space(6.0);
            if media::render_result(ui, result.kind, &result.url, theme) {
                app.handle_open_result(&result.url);
            }
            if result.kind == MediaKind::Image {
                ui.colored_label(theme.dim, &result.url);
            }
            ui.add_space(6.0);
            if ui.button("Swap again").clicked() {
                app.handle_swap_reset();
            }
        }
        SwapPhase::Failed { message } => {
            media::status_label(ui, message.as_str(), theme.error);
            if ui.button("Try again").clicked() {
                app.handle_swap_reset();
            }
        }
    }
}
