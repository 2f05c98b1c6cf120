/// Shared chart chrome for the dashboard plot.

use eframe::egui;

/// Inline height-adjustment drag control placed immediately above a chart.
pub fn height_control(ui: &mut egui::Ui, height: &mut f32, label: &str) {
    egui::Frame::none()
        .fill(egui::Color32::from_rgba_unmultiplied(255, 165, 0, 14))
        .inner_margin(egui::Margin::symmetric(8.0, 3.0))
        .rounding(egui::Rounding::same(4.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(200, 120, 20), "⇕");
                ui.colored_label(egui::Color32::from_gray(110), label);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add(
                        egui::DragValue::new(height)
                            .speed(2.0)
                            .range(200.0..=1000.0)
                            .suffix(" px"),
                    );
                    ui.colored_label(egui::Color32::from_gray(140), "drag to resize ·");
                });
            });
        });
    ui.add_space(2.0);
}
