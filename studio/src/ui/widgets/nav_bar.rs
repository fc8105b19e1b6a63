//! # Navigation Bar
//!
//! Top bar with the screen tabs, the gem balance indicator and the session
//! control.

use egui::RichText;

use crate::app::{App, AppState, Screen};
use crate::ui::theme::Theme;

pub fn render_nav_bar(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    ui.horizontal(|ui| {
        ui.set_height(36.0);
        ui.label(RichText::new("Face Swap Studio").strong().size(18.0).color(theme.selected));
        ui.add_space(16.0);

        for &screen in Screen::nav() {
            let selected = state.current_screen == screen;
            if ui.selectable_label(selected, screen.title()).clicked() && !selected {
                app.handle_screen_change(screen);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if state.is_authenticated() {
                if ui.button("Sign out").clicked() {
                    app.handle_sign_out();
                }
                render_gem_balance(ui, state, app, theme);
            } else if ui.button("Sign in").clicked() {
                app.handle_sign_in_request(state.current_screen);
            }
        });
    });
}

/// Gem counter. Clicking it opens the Buy Gems screen.
fn render_gem_balance(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    let text = RichText::new(format!("◆ {} gems", state.balance.display()))
        .color(theme.gem)
        .strong();
    let response = ui
        .add(egui::Button::new(text).frame(false))
        .on_hover_text("Buy more gems");
    if response.clicked() && state.current_screen != Screen::BuyGems {
        app.handle_screen_change(Screen::BuyGems);
    }
}
