use dll_updater::app::DllUpdaterApp;
use dll_updater::constant;
use dll_updater::ui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result {
    // Level is overridden by `RUST_LOG`
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dll_updater=info")),
        )
        .init();

    let options = ui::viewport::build_viewport();

    eframe::run_native(
        constant::DEFAULT_WINDOW_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(DllUpdaterApp::new(cc)))),
    )
}
