use eframe::egui;
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points, Polygon};

use crate::analysis::signal::{signal_bands, SignalKind};
use crate::data::models::{SimulationResponse, ValueSeries};

/// Chart colors for the active theme
pub struct ChartPalette {
    pub stock: egui::Color32,
    pub portfolio: egui::Color32,
    pub buy: egui::Color32,
    pub sell: egui::Color32,
    pub bullish_band: egui::Color32,
    pub neutral_band: egui::Color32,
    pub bearish_band: egui::Color32,
}

impl ChartPalette {
    pub fn new(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                stock: egui::Color32::from_rgb(100, 150, 255),
                portfolio: egui::Color32::from_rgb(255, 180, 50),
                buy: egui::Color32::from_rgb(50, 200, 100),
                sell: egui::Color32::from_rgb(235, 80, 60),
                bullish_band: egui::Color32::from_rgba_unmultiplied(40, 180, 90, 36),
                neutral_band: egui::Color32::from_rgba_unmultiplied(220, 200, 60, 22),
                bearish_band: egui::Color32::from_rgba_unmultiplied(220, 60, 50, 36),
            }
        } else {
            Self {
                stock: egui::Color32::from_rgb(40, 90, 200),
                portfolio: egui::Color32::from_rgb(205, 125, 15),
                buy: egui::Color32::from_rgb(20, 140, 60),
                sell: egui::Color32::from_rgb(190, 40, 30),
                bullish_band: egui::Color32::from_rgba_unmultiplied(40, 160, 80, 44),
                neutral_band: egui::Color32::from_rgba_unmultiplied(205, 185, 60, 30),
                bearish_band: egui::Color32::from_rgba_unmultiplied(200, 50, 40, 44),
            }
        }
    }

    pub fn band_color(&self, kind: SignalKind) -> egui::Color32 {
        match kind {
            SignalKind::Bullish => self.bullish_band,
            SignalKind::Neutral => self.neutral_band,
            SignalKind::Bearish => self.bearish_band,
        }
    }
}

/// Vertical extent for the background bands: the combined stock and
/// portfolio range with a small margin, so bands always cover the lines
fn band_y_range(values: &ValueSeries) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.stock.iter().chain(&values.portfolio_value) {
        if v.is_finite() {
            min = min.min(*v);
            max = max.max(*v);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.05).max(1.0);
    (min - pad, max + pad)
}

/// Map trade executions onto the trading-day axis. Trades whose date is
/// not present in the Values series are skipped.
fn trade_marker_points(values: &ValueSeries, dates: &[String], prices: &[f64]) -> Vec<[f64; 2]> {
    dates
        .iter()
        .zip(prices)
        .filter_map(|(date, price)| {
            values
                .index_of_date(date)
                .map(|i| [i as f64, *price])
        })
        .collect()
}

/// Render one simulation chart: stock and portfolio lines, buy/sell
/// markers, and a background band per trading day colored by signal.
pub fn render(
    ui: &mut egui::Ui,
    plot_id: &str,
    response: &SimulationResponse,
    height: f32,
    dark_mode: bool,
) {
    let palette = ChartPalette::new(dark_mode);
    let values = &response.values;

    let xs: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    let bands = signal_bands(&xs, &values.signal);
    let (y_min, y_max) = band_y_range(values);

    let stock_points: PlotPoints = xs
        .iter()
        .zip(&values.stock)
        .map(|(x, y)| [*x, *y])
        .collect();
    let portfolio_points: PlotPoints = xs
        .iter()
        .zip(&values.portfolio_value)
        .map(|(x, y)| [*x, *y])
        .collect();

    let buy_points = trade_marker_points(values, &response.buys.dates, &response.buys.prices);
    let sell_points = trade_marker_points(values, &response.sells.dates, &response.sells.prices);

    Plot::new(plot_id.to_owned())
        .height(height)
        .allow_scroll(false)
        .x_axis_label("Trading Day")
        .y_axis_label("Value ($)")
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for band in &bands {
                // The final band is zero-width and has nothing to fill
                if band.end <= band.start {
                    continue;
                }
                let rect = vec![
                    [band.start, y_min],
                    [band.end, y_min],
                    [band.end, y_max],
                    [band.start, y_max],
                ];
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(rect))
                        .fill_color(palette.band_color(band.kind))
                        .stroke(egui::Stroke::NONE),
                );
            }

            plot_ui.line(
                Line::new(stock_points)
                    .name("Stock Value")
                    .color(palette.stock)
                    .width(1.8),
            );
            plot_ui.line(
                Line::new(portfolio_points)
                    .name("Portfolio Value")
                    .color(palette.portfolio)
                    .width(1.8),
            );

            if !buy_points.is_empty() {
                plot_ui.points(
                    Points::new(buy_points)
                        .name("Buy Points")
                        .shape(MarkerShape::Up)
                        .radius(5.0)
                        .filled(true)
                        .color(palette.buy),
                );
            }
            if !sell_points.is_empty() {
                plot_ui.points(
                    Points::new(sell_points)
                        .name("Sell Points")
                        .shape(MarkerShape::Down)
                        .radius(5.0)
                        .filled(true)
                        .color(palette.sell),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> ValueSeries {
        ValueSeries {
            dates: vec![
                "2024-01-02T00:00:00".to_string(),
                "2024-01-03T00:00:00".to_string(),
                "2024-01-04T00:00:00".to_string(),
            ],
            stock: vec![100.0, 102.0, 98.0],
            signal: vec![1.0, 0.0, -1.0],
            portfolio_value: vec![100.0, 101.0, 103.0],
        }
    }

    #[test]
    fn band_range_covers_both_series_with_margin() {
        let (min, max) = band_y_range(&series());
        assert!(min < 98.0);
        assert!(max > 103.0);
    }

    #[test]
    fn band_range_of_empty_series_is_unit() {
        let empty = ValueSeries {
            dates: vec![],
            stock: vec![],
            signal: vec![],
            portfolio_value: vec![],
        };
        assert_eq!(band_y_range(&empty), (0.0, 1.0));
    }

    #[test]
    fn trade_markers_land_on_their_trading_day() {
        let values = series();
        let points = trade_marker_points(
            &values,
            &["2024-01-03T00:00:00".to_string()],
            &[102.0],
        );
        assert_eq!(points, vec![[1.0, 102.0]]);
    }

    #[test]
    fn trades_on_unknown_dates_are_skipped() {
        let values = series();
        let points = trade_marker_points(
            &values,
            &["2023-12-29T00:00:00".to_string(), "2024-01-04T00:00:00".to_string()],
            &[97.0, 98.0],
        );
        assert_eq!(points, vec![[2.0, 98.0]]);
    }

    #[test]
    fn palettes_differ_between_themes() {
        let dark = ChartPalette::new(true);
        let light = ChartPalette::new(false);
        assert_ne!(dark.stock, light.stock);
        assert_ne!(
            dark.band_color(SignalKind::Bullish),
            light.band_color(SignalKind::Bullish)
        );
        assert_ne!(
            dark.band_color(SignalKind::Bullish),
            dark.band_color(SignalKind::Bearish)
        );
    }
}
