mod app;
mod color;
mod data;
mod grid;
mod state;
mod ui;

use std::path::PathBuf;

use app::TsViewerApp;
use clap::Parser;
use data::loader::LoadOptions;
use eframe::egui;
use state::AppState;

/// Time surface visualizer.
#[derive(Parser)]
#[command(name = "tsview", version, about = "Time surface visualizer")]
struct Cli {
    /// Rows of plots
    #[arg(short = 'r', long, default_value_t = 2)]
    rows: usize,

    /// Columns of plots
    #[arg(short = 'c', long, default_value_t = 2)]
    cols: usize,

    /// Width of the time surfaces (needs --height too)
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the time surfaces (needs --width too)
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Expect a time column in the file
    #[arg(short = 't', long)]
    times: bool,

    /// String used to separate values
    #[arg(short = 'd', long)]
    delimiter: Option<String>,

    /// File to visualize
    filepath: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();

    let cli = Cli::parse();

    let mut state = AppState::default();
    state.rearrange(cli.rows.max(1), cli.cols.max(1));
    state.load_options = LoadOptions {
        // Shape only counts when both sides are given.
        shape: cli.width.zip(cli.height),
        has_times: cli.times,
        delimiter: cli.delimiter,
    };
    if let Some(path) = cli.filepath {
        state.open_path(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "tsview – Time Surface Visualizer",
        options,
        Box::new(|_cc| Ok(Box::new(TsViewerApp::new(state)))),
    )
}
