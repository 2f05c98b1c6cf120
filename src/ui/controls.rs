//! Sidebar controls: input file status/pickers, benchmark color, bank
//! multi-select.

use eframe::egui;

use crate::app::{AppState, TableSlot};
use crate::chart;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Controls");
    ui.add_space(8.0);

    render_file_section(ui, state);

    ui.separator();
    ui.add_space(4.0);

    ui.label("🎨 NIFTYBANK Line Color");
    ui.color_edit_button_srgba(&mut state.benchmark_color);

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(4.0);

    render_bank_selector(ui, state);
}

fn render_file_section(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label("📂 Input Files");
    ui.add_space(4.0);

    let banks_status = match &state.banks {
        TableSlot::Missing => "not loaded".to_string(),
        TableSlot::Ready(table) => {
            format!("{} rows, {} banks", table.rows.len(), table.banks().len())
        }
        TableSlot::Invalid(_) => "invalid".to_string(),
    };
    ui.horizontal(|ui| {
        ui.label(format!("Multi-Bank: {banks_status}"));
        if ui.button("Pick CSV…").clicked() {
            state.open_banks_picker();
        }
    });

    let bench_status = match &state.benchmark {
        TableSlot::Missing => "not loaded".to_string(),
        TableSlot::Ready(table) => format!("{} rows", table.rows.len()),
        TableSlot::Invalid(_) => "invalid".to_string(),
    };
    ui.horizontal(|ui| {
        ui.label(format!("NIFTYBANK: {bench_status}"));
        if ui.button("Pick CSV…").clicked() {
            state.open_benchmark_picker();
        }
    });

    ui.add_space(4.0);
}

fn render_bank_selector(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label("🏦 Select Banks");
    ui.add_space(4.0);

    let universe = match &state.banks {
        TableSlot::Ready(table) => table.banks(),
        _ => {
            ui.weak("Load the Multi-Bank file to choose banks.");
            return;
        }
    };

    ui.horizontal(|ui| {
        if ui.button("First 5").clicked() {
            state.selected_banks = chart::default_selection(&universe);
        }
        if ui.button("All").clicked() {
            state.selected_banks = universe.clone();
        }
        if ui.button("None").clicked() {
            state.selected_banks.clear();
        }
    });
    ui.add_space(4.0);

    egui::ScrollArea::vertical()
        .auto_shrink(false)
        .max_height(320.0)
        .show(ui, |ui| {
            for bank in &universe {
                let mut checked = state.selected_banks.iter().any(|b| b == bank);
                if ui.checkbox(&mut checked, bank).changed() {
                    if checked {
                        // selection order is plot order
                        state.selected_banks.push(bank.clone());
                    } else {
                        state.selected_banks.retain(|b| b != bank);
                    }
                }
            }
        });
}
