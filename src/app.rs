use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use eframe::egui;
use tracing::warn;

use crate::chart;
use crate::config;
use crate::data::loader;
use crate::data::models::{BankTable, BenchmarkTable};
use crate::error::DataError;
use crate::ui;
use crate::ui::chart_utils::height_control;

/// Lifecycle of one input table
#[derive(Debug)]
pub enum TableSlot<T> {
    Missing,
    Ready(T),
    Invalid(DataError),
}

/// Shared application state. The chart itself is never stored here; it is
/// rebuilt from (tables, selection, color) on every frame.
pub struct AppState {
    pub banks: TableSlot<BankTable>,
    pub benchmark: TableSlot<BenchmarkTable>,
    /// Chosen banks, in selection order (plot order)
    pub selected_banks: Vec<String>,
    pub benchmark_color: egui::Color32,
    pub chart_height: f32,
    pub status_message: String,
    /// Result slots for the async native file-picker dialogs
    pub banks_picker_result: Option<Arc<Mutex<Option<PathBuf>>>>,
    pub benchmark_picker_result: Option<Arc<Mutex<Option<PathBuf>>>>,
}

fn default_input_path(file_name: &str) -> Result<PathBuf, DataError> {
    let dir = std::env::current_dir().context("Cannot resolve working directory")?;
    Ok(dir.join(file_name))
}

fn load_banks_slot(path: &Path) -> TableSlot<BankTable> {
    if !path.exists() {
        return TableSlot::Missing;
    }
    match loader::load_banks_file(path) {
        Ok(table) => TableSlot::Ready(table),
        Err(e) => {
            warn!("Multi-Bank load failed: {}", e);
            TableSlot::Invalid(e)
        }
    }
}

fn load_benchmark_slot(path: &Path) -> TableSlot<BenchmarkTable> {
    if !path.exists() {
        return TableSlot::Missing;
    }
    match loader::load_benchmark_file(path) {
        Ok(table) => TableSlot::Ready(table),
        Err(e) => {
            warn!("NIFTYBANK load failed: {}", e);
            TableSlot::Invalid(e)
        }
    }
}

/// Launch a native CSV picker on a background thread; the chosen path is
/// drained from the slot on a later frame.
fn spawn_csv_picker(slot: Arc<Mutex<Option<PathBuf>>>) {
    std::thread::spawn(move || {
        let picked = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .pick_file();
        if let Ok(mut guard) = slot.lock() {
            *guard = picked;
        }
    });
}

impl Default for AppState {
    fn default() -> Self {
        let banks = match default_input_path(config::BANKS_FILE) {
            Ok(path) => load_banks_slot(&path),
            Err(e) => TableSlot::Invalid(e),
        };
        let benchmark = match default_input_path(config::BENCHMARK_FILE) {
            Ok(path) => load_benchmark_slot(&path),
            Err(e) => TableSlot::Invalid(e),
        };

        let selected_banks = match &banks {
            TableSlot::Ready(table) => chart::default_selection(&table.banks()),
            _ => Vec::new(),
        };

        let mut state = Self {
            banks,
            benchmark,
            selected_banks,
            benchmark_color: config::DEFAULT_BENCHMARK_COLOR,
            chart_height: config::DEFAULT_CHART_HEIGHT,
            status_message: String::new(),
            banks_picker_result: None,
            benchmark_picker_result: None,
        };
        state.refresh_status();
        state
    }
}

impl AppState {
    pub fn open_banks_picker(&mut self) {
        let slot: Arc<Mutex<Option<PathBuf>>> = Arc::new(Mutex::new(None));
        self.banks_picker_result = Some(slot.clone());
        spawn_csv_picker(slot);
    }

    pub fn open_benchmark_picker(&mut self) {
        let slot: Arc<Mutex<Option<PathBuf>>> = Arc::new(Mutex::new(None));
        self.benchmark_picker_result = Some(slot.clone());
        spawn_csv_picker(slot);
    }

    fn refresh_status(&mut self) {
        self.status_message = match (&self.banks, &self.benchmark) {
            (TableSlot::Ready(banks), TableSlot::Ready(bench)) => format!(
                "Loaded {} banks ({} rows) and {} ({} rows).",
                banks.banks().len(),
                banks.rows.len(),
                config::BENCHMARK_NAME,
                bench.rows.len()
            ),
            (TableSlot::Missing, _) | (_, TableSlot::Missing) => {
                "Waiting for both CSV files.".to_string()
            }
            _ => "One of the input files failed to load.".to_string(),
        };
    }

    /// Drain finished file-picker dialogs and load whatever was chosen
    fn poll_pickers(&mut self) {
        let picked_banks = self
            .banks_picker_result
            .as_ref()
            .and_then(|slot| slot.lock().ok()?.take());
        if let Some(path) = picked_banks {
            self.banks = load_banks_slot(&path);
            self.selected_banks = match &self.banks {
                TableSlot::Ready(table) => chart::default_selection(&table.banks()),
                _ => Vec::new(),
            };
            self.banks_picker_result = None;
            self.refresh_status();
        }

        let picked_benchmark = self
            .benchmark_picker_result
            .as_ref()
            .and_then(|slot| slot.lock().ok()?.take());
        if let Some(path) = picked_benchmark {
            self.benchmark = load_benchmark_slot(&path);
            self.benchmark_picker_result = None;
            self.refresh_status();
        }
    }
}

/// Main application struct for eframe
#[derive(Default)]
pub struct BankDashApp {
    pub state: AppState,
}

fn render_central(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("📈 Multi-Bank & NIFTYBANK Closing Price Dashboard");
    ui.add_space(8.0);

    // Split the state borrow: the slots are read while the chart chrome
    // mutates height/selection through the sidebar-owned fields.
    let AppState {
        banks,
        benchmark,
        selected_banks,
        benchmark_color,
        chart_height,
        ..
    } = state;

    let (banks, benchmark) = match (banks, benchmark) {
        (TableSlot::Missing, _) | (_, TableSlot::Missing) => {
            ui.label("👆 Provide both CSV files (sidebar pickers) to begin.");
            return;
        }
        (TableSlot::Invalid(e), _) | (_, TableSlot::Invalid(e)) => {
            ui.colored_label(egui::Color32::from_rgb(200, 40, 40), format!("⚠️ {e}"));
            return;
        }
        (TableSlot::Ready(banks), TableSlot::Ready(benchmark)) => (banks, benchmark),
    };

    match chart::build_chart(banks, benchmark, selected_banks, *benchmark_color) {
        Ok(spec) => {
            height_control(ui, chart_height, "Chart Height");
            ui::chart_view::render(ui, &spec, *chart_height);
        }
        Err(e) if e.is_warning() => {
            ui.colored_label(egui::Color32::from_rgb(190, 140, 0), format!("⚠ {e}"));
        }
        Err(e) => {
            ui.colored_label(egui::Color32::from_rgb(200, 40, 40), format!("⚠️ {e}"));
        }
    }
}

impl eframe::App for BankDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_pickers();
        if self.state.banks_picker_result.is_some() || self.state.benchmark_picker_result.is_some()
        {
            // keep polling while a dialog is open
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::SidePanel::left("controls_panel")
            .default_width(270.0)
            .show(ctx, |ui| {
                ui::controls::render(ui, &mut self.state);
            });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink(false)
                .show(ui, |ui| render_central(ui, &mut self.state));
        });
    }
}
