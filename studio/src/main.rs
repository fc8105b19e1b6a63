use studio::config::StudioConfig;
use studio::ui::StudioWindow;

const WINDOW_TITLE: &str = "Face Swap Studio";

fn main() -> eframe::Result<()> {
    studio::debug::init();

    let config = match StudioConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(api_url = %config.api_url, flow = %config.checkout_flow, "Starting {}", WINDOW_TITLE);

    // egui owns the main thread; async tasks run on this runtime.
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start the async runtime");
            std::process::exit(1);
        }
    };
    let _guard = runtime.enter();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(StudioWindow::new(cc, config)))),
    )
}
