use eframe::egui;
use serde_json::Value;

use crate::analysis::stats::PerformanceSummary;
use crate::app::AppState;
use crate::data::models::SimulationResult;
use crate::strategy::catalog::MlFeature;
use crate::strategy::config::config_label;
use crate::ui::{chart, chart_utils};

/// Render the result list, newest first. Each entry is independent:
/// header, config echo, performance stats, chart.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    if state.results.is_empty() {
        return;
    }

    ui.add_space(16.0);
    ui.separator();
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.heading("Results");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            chart_utils::height_control(ui, &mut state.chart_height);
        });
    });
    ui.add_space(8.0);

    for result in &state.results {
        render_result(ui, result, state.chart_height, state.dark_mode);
        ui.add_space(12.0);
    }
}

fn render_result(ui: &mut egui::Ui, result: &SimulationResult, chart_height: f32, dark_mode: bool) {
    ui.group(|ui| {
        ui.strong(format!(
            "{} - {}",
            result.request.strategy.label(),
            result.request.symbol
        ));

        for (label, value, suffix) in labeled_config_rows(&result.request.strategy_config) {
            match suffix {
                Some(suffix) => ui.small(format!("{label}: {value} {suffix}")),
                None => ui.small(format!("{label}: {value}")),
            };
        }
        ui.small(format!(
            "Start date: {}",
            result.request.start_date.format("%Y-%m-%d %H:%M")
        ));
        ui.small(format!(
            "End date: {}",
            result.request.end_date.format("%Y-%m-%d %H:%M")
        ));

        ui.add_space(6.0);
        render_stats(ui, result);
        ui.add_space(6.0);

        chart::render(ui, result.id(), &result.response, chart_height, dark_mode);
    });
}

fn render_stats(ui: &mut egui::Ui, result: &SimulationResult) {
    let values = &result.response.values;
    let summary = PerformanceSummary::compute(&values.portfolio_value, &values.stock);

    match summary.margin() {
        Some(margin) if summary.beat_market() => {
            ui.colored_label(
                egui::Color32::from_rgb(50, 180, 50),
                format!("You beat the market by {margin:.2}%"),
            );
        }
        Some(margin) => {
            ui.colored_label(
                egui::Color32::from_rgb(220, 80, 60),
                format!("The market beat you by {:.2}%", -margin),
            );
        }
        None => {
            ui.colored_label(
                egui::Color32::from_gray(150),
                "Performance undefined (zero starting value)",
            );
        }
    }
    ui.label(format!("Trading strategy: {}", format_pct(summary.strategy_pct)));
    ui.label(format!("Stock: {}", format_pct(summary.stock_pct)));
    ui.small(format!(
        "{} buys, {} sells over {} trading days",
        result.response.buys.dates.len(),
        result.response.sells.dates.len(),
        values.len()
    ));
}

fn format_pct(pct: Option<f64>) -> String {
    match pct {
        Some(pct) => format!("{pct:.2}%"),
        None => "n/a".to_string(),
    }
}

/// Rows to echo for a config: (label, rendered value, suffix) per
/// registered key, in the serialized key order. Keys with no entry in
/// the label table are omitted.
fn labeled_config_rows<T: serde::Serialize>(
    config: &T,
) -> Vec<(&'static str, String, Option<&'static str>)> {
    let Ok(Value::Object(map)) = serde_json::to_value(config) else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(key, value)| {
            let labels = config_label(key)?;
            Some((labels.label, display_config_value(value), labels.suffix))
        })
        .collect()
}

/// Arrays render as a comma-joined list of feature labels; numbers drop
/// a trailing ".0" so whole-day periods read as integers.
fn display_config_value(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => MlFeature::from_wire_name(s)
                    .map(|f| f.label().to_string())
                    .unwrap_or_else(|| s.clone()),
                other => display_config_value(other),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Strategy, StrategyConfig};
    use serde_json::json;

    #[test]
    fn feature_arrays_render_as_joined_labels() {
        let config =
            StrategyConfig::default_for(Strategy::LinearRegressionMachineLearning);
        let rows = labeled_config_rows(&config);

        let features = rows
            .iter()
            .find(|(label, _, _)| *label == "Features")
            .expect("features row present");
        assert_eq!(features.1, "Short term average, Long term average");

        let training = rows
            .iter()
            .find(|(label, _, _)| *label == "Training period")
            .expect("training period row present");
        assert_eq!(training.1, "60");
        assert_eq!(training.2, Some("days"));
    }

    #[test]
    fn unregistered_keys_are_omitted_without_error() {
        let raw = json!({
            "lookback_period": 14.0,
            "some_future_knob": 42,
        });
        let rows = labeled_config_rows(&raw);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "Lookback period");
    }

    #[test]
    fn numeric_display_trims_whole_floats_only() {
        assert_eq!(display_config_value(&json!(14.0)), "14");
        assert_eq!(display_config_value(&json!(0.01)), "0.01");
        assert_eq!(display_config_value(&json!(2.5)), "2.5");
    }
}
