use eframe::egui;

use crate::app::AppState;
use crate::config;
use crate::strategy::catalog::ALL_STRATEGIES;
use crate::strategy::Strategy;
use crate::ui::config_form;

/// Render the simulation request form. Returns true when the user
/// clicked Run Simulation (only possible while the form is submittable
/// and no request is in flight).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> bool {
    let mut submit_clicked = false;

    ui.group(|ui| {
        ui.heading("Run a simulation");
        ui.add_space(8.0);

        // Symbol selector
        ui.horizontal(|ui| {
            ui.label("Stock:");
            let selected_text = state
                .form
                .symbol
                .and_then(|sym| config::SYMBOL_OPTIONS.iter().find(|(s, _)| *s == sym))
                .map(|(sym, name)| format!("{name} ({sym})"))
                .unwrap_or_else(|| "Select a symbol".to_string());

            egui::ComboBox::from_id_salt("symbol_selector")
                .width(280.0)
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for (sym, name) in config::SYMBOL_OPTIONS {
                        ui.selectable_value(
                            &mut state.form.symbol,
                            Some(*sym),
                            format!("{name} ({sym})"),
                        );
                    }
                });
        });

        ui.add_space(4.0);

        // Strategy selector; selecting goes through select_strategy so
        // the config resets to the new strategy's defaults
        ui.horizontal(|ui| {
            ui.label("Trading strategy:");
            let mut selected = state.form.strategy;
            egui::ComboBox::from_id_salt("strategy_selector")
                .width(280.0)
                .selected_text(selected.label())
                .show_ui(ui, |ui| {
                    for strategy in ALL_STRATEGIES.iter().filter(|s| **s != Strategy::None) {
                        ui.selectable_value(&mut selected, *strategy, strategy.label())
                            .on_hover_text(strategy.description());
                    }
                });
            state.form.select_strategy(selected);

            if state.form.strategy != Strategy::None {
                ui.label("?").on_hover_text(state.form.strategy.description());
            }
        });

        ui.add_space(4.0);
        config_form::render(ui, state.form.strategy, &mut state.form.config);
        ui.add_space(4.0);

        // Date range; parsed at submit time, so only emptiness gates the button
        ui.horizontal(|ui| {
            ui.label("Start date:");
            ui.add(
                egui::TextEdit::singleline(&mut state.form.start_date)
                    .desired_width(170.0)
                    .hint_text("YYYY-MM-DDTHH:MM"),
            );
            ui.label("End date:");
            ui.add(
                egui::TextEdit::singleline(&mut state.form.end_date)
                    .desired_width(170.0)
                    .hint_text("YYYY-MM-DDTHH:MM"),
            );
        });

        ui.add_space(8.0);

        ui.horizontal(|ui| {
            let enabled = state.form.can_submit() && !state.is_loading;
            if ui
                .add_enabled(enabled, egui::Button::new("Run Simulation"))
                .clicked()
            {
                submit_clicked = true;
            }
            if state.is_loading {
                ui.spinner();
                ui.label("Running simulation...");
            }
            if let Some(ref error) = state.last_error {
                ui.colored_label(egui::Color32::from_rgb(220, 80, 60), error);
            }
        });
    });

    submit_clicked
}
