//! # Sign-In Screen
//!
//! Accepts the bearer token issued by the backend's login flow.

use egui::RichText;

use crate::app::{App, AppState, Screen};
use crate::ui::theme::Theme;

pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(RichText::new("Sign in").size(26.0).strong());
        ui.colored_label(theme.dim, "Paste your access token to continue.");
        ui.add_space(16.0);

        let mut token = state.sign_in.token_input.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut token)
                .password(true)
                .hint_text("Access token")
                .desired_width(360.0),
        );
        if response.changed() {
            app.state.write().sign_in.token_input = token.clone();
        }
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if let Some(error) = &state.sign_in.error {
            ui.add_space(6.0);
            ui.colored_label(theme.error, error);
        }

        ui.add_space(10.0);
        if ui.button(RichText::new("Sign in").strong()).clicked() || submitted {
            app.handle_sign_in(token);
        }
        if ui.button("Back to templates").clicked() {
            app.handle_screen_change(Screen::Gallery);
        }
    });
}
