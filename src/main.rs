mod app;

use app::{ASPECT_RATIO, INITIAL_WIDTH, TranslatorApp};
use arabic_flashcards::window::ResizeGovernor;
use tracing_subscriber::EnvFilter;

/// Word list read by the quiz, relative to the working directory.
const LEDGER_PATH: &str = "resources/book1.csv";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let initial = ResizeGovernor::new(ASPECT_RATIO).geometry_for_width(INITIAL_WIDTH);
    tracing::info!("Opening {}x{} window on {}", initial.width, initial.height, LEDGER_PATH);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Translator")
            .with_inner_size([initial.width as f32, initial.height as f32]),
        ..Default::default()
    };
    eframe::run_native(
        "Translator",
        options,
        Box::new(|_cc| Ok(Box::new(TranslatorApp::new(LEDGER_PATH)))),
    )
}
