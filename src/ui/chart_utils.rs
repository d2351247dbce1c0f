/// Shared chart utilities for views that render plots.

use eframe::egui;

/// Inline height-adjustment control placed above the result charts.
pub fn height_control(ui: &mut egui::Ui, height: &mut f32) {
    ui.horizontal(|ui| {
        ui.colored_label(egui::Color32::from_gray(140), "Chart height:");
        ui.add(
            egui::DragValue::new(height)
                .speed(2.0)
                .range(200.0..=800.0)
                .suffix(" px"),
        );
    });
}
