use cotejo::app::CotejoApp;
use cotejo::constant;
use std::path::PathBuf;

fn main() -> eframe::Result {
    tracing_subscriber::fmt::init();

    let initial_file = std::env::args().nth(1).map(PathBuf::from);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                constant::DEFAULT_WINDOW_WIDTH,
                constant::DEFAULT_WINDOW_HEIGHT,
            ])
            .with_title(constant::DEFAULT_WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        constant::DEFAULT_WINDOW_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(CotejoApp::new(cc, initial_file)))),
    )
}
