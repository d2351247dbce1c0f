use eframe::egui;

use crate::strategy::catalog::ML_FEATURES;
use crate::strategy::config::{config_label, config_schema, FieldKind};
use crate::strategy::{Strategy, StrategyConfig};

/// Render the config inputs for the selected strategy. Every widget
/// interaction mutates the config in place; the form is continuously
/// synced, there is no apply step. Renders nothing for `None`.
pub fn render(ui: &mut egui::Ui, strategy: Strategy, config: &mut StrategyConfig) {
    let schema = config_schema(strategy);
    if schema.is_empty() {
        return;
    }

    egui::Grid::new("strategy_config_grid")
        .num_columns(2)
        .spacing(egui::vec2(16.0, 6.0))
        .show(ui, |ui| {
            for field in schema {
                let Some(labels) = config_label(field.key) else {
                    continue;
                };
                ui.label(labels.label).on_hover_text(labels.description);

                match field.kind {
                    FieldKind::Numeric { min, max, step } => {
                        if let Some(value) = config.numeric_field_mut(field.key) {
                            let mut drag = egui::DragValue::new(value).speed(step);
                            if let (Some(min), Some(max)) = (min, max) {
                                drag = drag.range(min..=max);
                            }
                            if let Some(suffix) = labels.suffix {
                                drag = drag.suffix(format!(" {suffix}"));
                            }
                            ui.add(drag);
                        }
                    }
                    FieldKind::MultiSelect => {
                        if let Some(selected) = config.features_mut() {
                            ui.horizontal_wrapped(|ui| {
                                for feature in ML_FEATURES {
                                    let mut on = selected.contains(feature);
                                    if ui.checkbox(&mut on, feature.label()).changed() {
                                        if on {
                                            selected.push(*feature);
                                        } else {
                                            selected.retain(|f| f != feature);
                                        }
                                    }
                                }
                            });
                        }
                    }
                }
                ui.end_row();
            }
        });

    ui.add_space(4.0);
}
