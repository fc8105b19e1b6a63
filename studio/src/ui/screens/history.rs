//! # History Screen
//!
//! Past swap tasks for the signed-in user, newest first.

use shared::{absolute_media_url, SwapTask, TaskStatus};

use crate::app::{App, AppState};
use crate::ui::theme::Theme;
use crate::ui::widgets::media;

pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    ui.horizontal(|ui| {
        ui.heading("History");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.add_enabled(!state.history.loading, egui::Button::new("Refresh")).clicked() {
                app.refresh_history();
            }
            if state.history.loading {
                ui.spinner();
            }
        });
    });
    ui.separator();

    if let Some(error) = &state.history.error {
        ui.colored_label(theme.error, error);
        ui.add_space(6.0);
    }

    if state.history.items.is_empty() {
        if !state.history.loading {
            media::render_empty_state(ui, "No swaps yet", Some("Pick a template to make your first one."), theme);
        }
        return;
    }

    let origin = state.config.backend_origin();
    let mut open = None;

    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        egui::Grid::new("history_grid")
            .num_columns(6)
            .spacing([16.0, 8.0])
            .striped(true)
            .show(ui, |ui| {
                for header in ["Task", "Type", "Template", "Status", "Created", "Result"] {
                    ui.colored_label(theme.dim, header);
                }
                ui.end_row();

                for task in &state.history.items {
                    ui.label(format!("#{}", task.id));
                    ui.label(media::kind_badge(task.kind));
                    ui.label(template_name(task));
                    ui.colored_label(status_color(task.status, theme), task.status.label());
                    ui.label(created_label(task));
                    match &task.result_url {
                        Some(reference) if task.status == TaskStatus::Completed => {
                            let url = absolute_media_url(&origin, reference);
                            if ui.link("Open").on_hover_text(url.as_str()).clicked() {
                                open = Some(url);
                            }
                        }
                        _ => match &task.error_message {
                            Some(error) => {
                                ui.colored_label(theme.error, error);
                            }
                            None => {
                                ui.colored_label(theme.dim, "-");
                            }
                        },
                    }
                    ui.end_row();
                }
            });
    });

    if let Some(url) = open {
        app.handle_open_result(&url);
    }
}

fn status_color(status: TaskStatus, theme: &Theme) -> egui::Color32 {
    match status {
        TaskStatus::Completed => theme.success,
        TaskStatus::Failed => theme.error,
        TaskStatus::Pending | TaskStatus::Processing => theme.warning,
        TaskStatus::Unknown => theme.dim,
    }
}

/// Last path segment of the template reference.
pub fn template_name(task: &SwapTask) -> String {
    task.template_url
        .as_deref()
        .and_then(|url| url.trim_end_matches('/').rsplit('/').next())
        .filter(|name| !name.is_empty())
        .unwrap_or("-")
        .to_string()
}

pub fn created_label(task: &SwapTask) -> String {
    task.created_at
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::MediaKind;

    fn task(template_url: Option<&str>) -> SwapTask {
        SwapTask {
            id: 3,
            kind: MediaKind::Image,
            status: TaskStatus::Completed,
            source_url: None,
            template_url: template_url.map(str::to_string),
            result_url: Some("/static/results/3.png".to_string()),
            error_message: None,
            created_at: NaiveDate::from_ymd_opt(2024, 5, 1).and_then(|d| d.and_hms_opt(9, 30, 0)),
            cost: Some(1),
        }
    }

    #[test]
    fn test_template_name_uses_last_segment() {
        assert_eq!(template_name(&task(Some("/static/templates/beach.png"))), "beach.png");
        assert_eq!(template_name(&task(None)), "-");
    }

    #[test]
    fn test_created_label() {
        assert_eq!(created_label(&task(None)), "2024-05-01 09:30");
    }
}
