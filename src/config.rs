use eframe::egui::Color32;

/// Default input files, resolved against the working directory
pub const BANKS_FILE: &str = "All_Banks_Combined.csv";
pub const BENCHMARK_FILE: &str = "niftybank.csv";

/// Required columns per input table (extra columns are ignored)
pub const BANKS_REQUIRED_COLUMNS: &[&str] = &["Bank", "Date", "Close"];
pub const BENCHMARK_REQUIRED_COLUMNS: &[&str] = &["Date", "Close"];

/// Benchmark index series
pub const BENCHMARK_NAME: &str = "NIFTYBANK";
pub const DEFAULT_BENCHMARK_COLOR: Color32 = Color32::from_rgb(255, 165, 0); // #FFA500
pub const BENCHMARK_LINE_WIDTH: f32 = 3.0;

/// How many banks are pre-selected from the sorted universe
pub const DEFAULT_SELECTION: usize = 5;

/// Chart presentation
pub const CHART_TITLE: &str = "📊 Bank Stocks vs NIFTYBANK - Dual Axis View";
pub const PRIMARY_AXIS_TITLE: &str = "Bank Closing Price";
pub const SECONDARY_AXIS_TITLE: &str = "NIFTYBANK Closing Price";
pub const LEGEND_TITLE: &str = "Symbols";
pub const DEFAULT_CHART_HEIGHT: f32 = 650.0;
