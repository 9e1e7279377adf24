//! Application entry point for the chaos-game carpet viewer.
//!
//! This binary sets up logging and eframe/egui and delegates the render
//! loop and drawing to [`Viewer`] from the `viewer` module.

mod viewer;

use anyhow::Result;
use carpet_core::config::Config;
use viewer::Viewer;

/// Opens a fixed-size window and runs the viewer until it is closed.
///
/// ### Returns
/// - `Ok(())` when the window is closed by the user.
/// - `Err` if the configuration is invalid or eframe fails to create the
///   native window or event loop.
fn main() -> Result<()> {
    env_logger::init();

    let cfg = Config::default();
    let viewer = Viewer::new(cfg)?;

    // Room for the top panel and status bar around the canvas.
    let side = cfg.win_size as f32;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Chaos Game Carpet")
            .with_inner_size([side, side + 64.0])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "Chaos Game Carpet",
        options,
        Box::new(move |_cc| Ok(Box::new(viewer))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {e}"))?;

    log::info!("window closed");
    Ok(())
}
