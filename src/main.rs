use clap::Parser;
use dialoguer::Confirm;
use ocr_sheet::capture::XcapCapturer;
use ocr_sheet::cli::{Cli, Commands, SheetTarget};
use ocr_sheet::error::{OcrSheetError, Result};
use ocr_sheet::{Config, Controller, Dialog, Pipeline, PipelineOutcome, PointPairSelector, TesseractExtractor};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("✖ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn apply_target(mut config: Config, target: SheetTarget) -> Result<Config> {
    if let Some(workbook) = target.workbook {
        config.workbook_path = workbook;
    }
    if let Some(sheet) = target.sheet {
        config.sheet_name = sheet;
    }
    config.validate()?;
    Ok(config)
}

fn pipeline(config: Config) -> Pipeline<XcapCapturer, TesseractExtractor> {
    let extractor = TesseractExtractor::new(config.ocr.clone());
    Pipeline::new(config, XcapCapturer::new(), extractor)
}

/// Prints the dialog the desktop popup would show; true on success
fn report_outcome(outcome: &PipelineOutcome, dialog: &Dialog, report: Option<&Path>) -> Result<bool> {
    if let Some(path) = report {
        std::fs::write(path, serde_json::to_string_pretty(outcome)?)?;
        println!("✔ Report saved: {}", path.display());
    }

    if dialog.is_error() {
        eprintln!("\n✖ {}: {}", dialog.title, dialog.message);
        Ok(false)
    } else {
        println!("\n✅ {}", dialog.message);
        Ok(true)
    }
}

fn run(cli: Cli) -> Result<bool> {
    let config = Config::load()?;

    match cli.command {
        Commands::Run { from, to, target, report } => {
            println!("📷 ocr-sheet - capture\n");
            let config = apply_target(config, target)?;
            config.prepare_dirs()?;

            let pipeline = pipeline(config);
            let mut selector = PointPairSelector::new(from, to);
            let mut controller = Controller::new();
            let (outcome, dialog) = controller.run(&pipeline, &mut selector)?;

            report_outcome(&outcome, &dialog, report.as_deref())
        }

        Commands::Image { path, target, report } => {
            println!("🖼  ocr-sheet - image\n");
            let config = apply_target(config, target)?;
            config.prepare_dirs()?;

            let pipeline = pipeline(config);
            let outcome = pipeline.run_from_image(&path);
            let dialog = Dialog::for_outcome(&outcome);

            report_outcome(&outcome, &dialog, report.as_deref())
        }

        Commands::Write { input, target } => {
            let config = apply_target(config, target)?;
            let text = std::fs::read_to_string(&input)?;

            let summary = pipeline(config.clone()).write_text(&text)?;
            println!(
                "✔ {} cell(s) in {} row(s) written to {} [{}]",
                summary.cells,
                summary.rows,
                config.workbook_path.display(),
                config.sheet_name
            );
            Ok(true)
        }

        Commands::Config { show, init } => {
            if init {
                let path = Config::config_path()?;
                let overwrite = !path.exists()
                    || Confirm::new()
                        .with_prompt(format!("{} exists. Overwrite?", path.display()))
                        .default(false)
                        .interact()
                        .map_err(|e| OcrSheetError::Config(e.to_string()))?;
                if overwrite {
                    Config::default().save_to(&path)?;
                    println!("✔ Config written: {}", path.display());
                }
            }

            if show || !init {
                let config = Config::load()?;
                println!("Config ({}):", Config::config_path()?.display());
                println!("  Workbook: {}", config.workbook_path.display());
                println!("  Sheet: {}", config.sheet_name);
                println!("  First cell: row {}, column {}", config.start_row, config.start_col);
                println!("  Text archive: {}", config.text_archive_dir.display());
                println!("  Screenshot archive: {}", config.screenshot_archive_dir.display());
                println!("  OCR language: {}", config.ocr.language);
            }
            Ok(true)
        }
    }
}
