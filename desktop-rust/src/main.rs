mod app;
mod model;

use anyhow::{Context, Result};
use app::{OcrSheetApp, show_dialog};
use eframe::egui;
use ocr_sheet::{Config, Dialog};

fn load_config() -> Result<Config> {
    let config = Config::load().context("failed to load config")?;
    config
        .prepare_dirs()
        .context("failed to create archive folders")?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{:#}", err);
            show_dialog(&Dialog::error("Error", format!("{:#}", err)));
            return Err(err);
        }
    };
    log::info!(
        "Writing to {} [{}]",
        config.workbook_path.display(),
        config.sheet_name
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Text Extractor")
            .with_inner_size([300.0, 100.0])
            .with_resizable(false),
        ..Default::default()
    };
    eframe::run_native(
        "Text Extractor",
        options,
        Box::new(|_cc| Box::new(OcrSheetApp::new(config))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
