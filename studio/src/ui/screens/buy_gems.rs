//! # Buy Gems Screen
//!
//! Package cards and the state of the purchase in progress. With the embedded
//! widget flow the provider's completion values are entered here once the
//! payment page reports them.

use egui::RichText;

use crate::app::checkout::{CheckoutFlow, CheckoutPhase, Package, PACKAGES};
use crate::app::{App, AppState};
use crate::ui::theme::Theme;

pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    ui.heading("Buy Gems");
    ui.colored_label(
        theme.dim,
        "Gems pay for swaps: images cost 1 gem and videos cost 10.",
    );
    ui.separator();

    let flow = state.config.checkout_flow;
    let busy = state.checkout.phase.is_busy();
    let mut bought = None;

    ui.horizontal_wrapped(|ui| {
        for package in PACKAGES.iter() {
            if render_package(ui, package, flow, busy, state.checkout.phase.package(), theme) {
                bought = Some(package);
            }
        }
    });

    if let Some(package) = bought {
        app.handle_buy_click(package);
    }

    ui.add_space(12.0);
    render_phase(ui, state, app, theme);
}

fn render_package(
    ui: &mut egui::Ui,
    package: &Package,
    flow: CheckoutFlow,
    busy: bool,
    active: Option<&str>,
    theme: &Theme,
) -> bool {
    let stroke = if package.popular {
        egui::Stroke::new(2.0, theme.selected)
    } else {
        egui::Stroke::new(1.0, theme.colors.border)
    };
    let mut clicked = false;

    egui::Frame::group(ui.style())
        .fill(theme.surface)
        .stroke(stroke)
        .inner_margin(egui::Margin::same(14))
        .show(ui, |ui| {
            ui.set_width(220.0);
            ui.vertical(|ui| {
                if package.popular {
                    ui.colored_label(theme.selected, "MOST POPULAR");
                }
                ui.label(RichText::new(package.name).size(20.0).strong());
                ui.colored_label(theme.dim, package.description);
                ui.add_space(6.0);
                ui.label(RichText::new(package.price_label(flow)).size(26.0).strong());
                ui.colored_label(theme.gem, format!("◆ {} gems", package.gems));
                ui.add_space(6.0);
                for feature in package.features {
                    ui.label(format!("✓ {}", feature));
                }
                ui.add_space(8.0);

                let label = if active == Some(package.name) && busy {
                    "Processing..."
                } else {
                    "Buy now"
                };
                let button = egui::Button::new(RichText::new(label).strong()).min_size(egui::vec2(190.0, 30.0));
                clicked = ui.add_enabled(!busy, button).clicked();
            });
        });

    clicked
}

fn render_phase(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    match &state.checkout.phase {
        CheckoutPhase::Idle => {}
        CheckoutPhase::Starting { package } => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.colored_label(theme.info, format!("Starting checkout for {}...", package));
            });
        }
        CheckoutPhase::Redirected { package, url } => {
            ui.colored_label(
                theme.info,
                format!("Complete the {} purchase in your browser.", package),
            );
            ui.horizontal(|ui| {
                ui.hyperlink_to("Open checkout page", url);
                if ui.button("Done").clicked() {
                    app.handle_checkout_dismiss();
                }
            });
            ui.colored_label(theme.dim, "Your balance updates once the payment is confirmed.");
        }
        CheckoutPhase::AwaitingCompletion { package, order } => {
            ui.colored_label(
                theme.info,
                format!("Payment page opened for {} (order {}).", package, order.id),
            );
            ui.colored_label(theme.dim, "Paste the payment id and signature shown after paying.");
            ui.add_space(4.0);

            let mut payment_id = state.checkout.payment_id_input.clone();
            let mut signature = state.checkout.signature_input.clone();
            egui::Grid::new("completion_form").num_columns(2).spacing([8.0, 6.0]).show(ui, |ui| {
                ui.label("Payment id");
                if ui.text_edit_singleline(&mut payment_id).changed() {
                    app.state.write().checkout.payment_id_input = payment_id;
                }
                ui.end_row();
                ui.label("Signature");
                if ui.text_edit_singleline(&mut signature).changed() {
                    app.state.write().checkout.signature_input = signature;
                }
                ui.end_row();
            });

            ui.horizontal(|ui| {
                if ui.button("Verify payment").clicked() {
                    app.handle_completion_submit();
                }
                if ui.button("Cancel").clicked() {
                    app.handle_checkout_dismiss();
                }
            });
        }
        CheckoutPhase::Verifying { package } => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.colored_label(theme.info, format!("Verifying {} payment...", package));
            });
        }
        CheckoutPhase::Verified { gems, new_balance } => {
            let message = match new_balance {
                Some(balance) => format!("{} gems added. New balance: {}", gems, balance),
                None => format!("{} gems added.", gems),
            };
            ui.colored_label(theme.success, message);
            if ui.button("OK").clicked() {
                app.handle_checkout_dismiss();
            }
        }
        CheckoutPhase::Failed { message } => {
            ui.colored_label(theme.error, message);
            if ui.button("Dismiss").clicked() {
                app.handle_checkout_dismiss();
            }
        }
    }
}
