//! # GUI Rendering Framework
//!
//! [`StudioWindow`] is the eframe entry point. Each frame it applies pending
//! async results, shows queued notices as toasts and renders the current
//! screen from a snapshot of the state.

pub mod screens;
pub mod theme;
pub mod widgets;

use std::time::Duration;

use crate::app::{App, AppState, Screen};
use crate::config::StudioConfig;
use theme::Theme;
use widgets::notifications::NotificationManager;

/// Repaint cadence while idle, so async results show up without input.
const IDLE_REPAINT: Duration = Duration::from_millis(250);

/// eframe application wrapping the [`App`] orchestrator.
pub struct StudioWindow {
    app: App,
    notifications: NotificationManager,
    theme: Theme,
}

impl StudioWindow {
    /// Must be created inside a Tokio runtime context.
    pub fn new(cc: &eframe::CreationContext<'_>, config: StudioConfig) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        let theme = Theme::default();
        theme.apply(&cc.egui_ctx);

        let mut app = App::new(config);
        app.start();

        Self {
            app,
            notifications: NotificationManager::new(),
            theme,
        }
    }
}

impl eframe::App for StudioWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.app.on_tick();
        for notice in self.app.take_notifications() {
            self.notifications.push(notice);
        }

        render(ctx, &mut self.app, &self.theme);
        self.notifications.show(ctx);

        ctx.request_repaint_after(IDLE_REPAINT);
    }
}

impl Drop for StudioWindow {
    fn drop(&mut self) {
        self.app.shutdown();
    }
}

/// Main render function - called every frame by egui
pub fn render(ctx: &egui::Context, app: &mut App, theme: &Theme) {
    // Render from a snapshot so no lock is held while drawing.
    let state = match app.state.try_read() {
        Some(guard) => guard.clone(),
        None => return,
    };

    egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
        widgets::nav_bar::render_nav_bar(ui, &state, app, theme);
    });

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        render_status_bar(ui, &state, theme);
    });

    egui::CentralPanel::default().show(ctx, |ui| match state.current_screen {
        Screen::Gallery => screens::gallery::render(ui, &state, app, theme),
        Screen::Swap => screens::swap::render(ui, &state, app, theme),
        Screen::History => screens::history::render(ui, &state, app, theme),
        Screen::BuyGems => screens::buy_gems::render(ui, &state, app, theme),
        Screen::SignIn => screens::sign_in::render(ui, &state, app, theme),
    });
}

fn render_status_bar(ui: &mut egui::Ui, state: &AppState, theme: &Theme) {
    ui.horizontal(|ui| {
        if state.is_authenticated() {
            ui.colored_label(theme.success, "● Signed in");
        } else {
            ui.colored_label(theme.dim, "○ Signed out");
        }
        ui.separator();

        if state.swap.is_busy() {
            ui.colored_label(theme.info, state.swap.phase.status_text());
            ui.separator();
        }
        if state.checkout.phase.is_busy() {
            ui.colored_label(theme.info, "Purchase in progress");
            ui.separator();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.colored_label(theme.dim, &state.config.api_url);
        });
    });
}
