use clap::Parser;
use eframe::egui;
use inkfield::app::InkfieldApp;
use inkfield::cli::LaunchOptions;
use inkfield::{log_info, logger};

fn main() -> Result<(), eframe::Error> {
    let opts = LaunchOptions::parse();

    // Session log is truncated on every launch.
    logger::init();
    log_info!("inkfield {} starting", env!("CARGO_PKG_VERSION"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([opts.width, opts.height])
            .with_maximized(opts.maximized)
            .with_title("Inkfield"),
        ..Default::default()
    };

    eframe::run_native(
        "Inkfield",
        options,
        Box::new(move |cc| Box::new(InkfieldApp::new(cc, &opts))),
    )
}
