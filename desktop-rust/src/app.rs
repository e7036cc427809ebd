use std::sync::Arc;
use std::sync::mpsc::{self, TryRecvError};

use eframe::egui::{self, Color32, RichText, Stroke};
use ocr_sheet::capture::XcapCapturer;
use ocr_sheet::{
    Config, Controller, Dialog, DialogLevel, Pipeline, PointPairSelector, TesseractExtractor,
};
use ocr_sheet_common::ScreenPoint;
use rfd::{MessageButtons, MessageDialog, MessageLevel};

use crate::model::{DragSelection, Phase, capture_scale, to_screen};

type DesktopPipeline = Pipeline<XcapCapturer, TesseractExtractor>;

const OVERLAY_ID: &str = "selection_overlay";

pub struct OcrSheetApp {
    pipeline: Arc<DesktopPipeline>,
    controller: Controller,
    phase: Phase,
    status: String,
}

impl OcrSheetApp {
    pub fn new(config: Config) -> Self {
        let extractor = TesseractExtractor::new(config.ocr.clone());
        Self {
            pipeline: Arc::new(Pipeline::new(config, XcapCapturer::new(), extractor)),
            controller: Controller::new(),
            phase: Phase::Idle,
            status: String::new(),
        }
    }

    fn start_process(&mut self) {
        if let Err(err) = self.controller.begin() {
            self.status = err.to_string();
            return;
        }
        log::info!("[UI] Selection started");
        self.status = "Drag over the text. Esc cancels.".to_string();
        self.phase = Phase::Selecting(DragSelection::default());
    }

    /// Hands the selected corners to a worker thread; `None` means cancelled
    fn dispatch(&mut self, corners: Option<(ScreenPoint, ScreenPoint)>) {
        let mut selector = match corners {
            Some((start, end)) => PointPairSelector::new(start, end),
            None => PointPairSelector::cancelled(),
        };
        let pipeline = Arc::clone(&self.pipeline);
        let (tx, rx) = mpsc::channel();
        self.phase = Phase::Working(rx);
        self.status = "Extracting text...".to_string();

        std::thread::spawn(move || {
            let outcome = pipeline.run(&mut selector);
            let _ = tx.send(outcome);
        });
    }

    fn show_overlay(&mut self, ctx: &egui::Context) {
        let Phase::Selecting(mut drag) = self.phase else {
            return;
        };
        let mut finished = None;

        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of(OVERLAY_ID),
            egui::ViewportBuilder::default()
                .with_title("Region Selection")
                .with_fullscreen(true)
                .with_decorations(false)
                .with_transparent(true)
                .with_always_on_top(),
            |ctx, _class| {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
                let (pressed, released, pos, cancel, origin, ppp) = ctx.input(|i| {
                    (
                        i.pointer.primary_pressed(),
                        i.pointer.primary_released(),
                        i.pointer.interact_pos(),
                        i.key_pressed(egui::Key::Escape) || i.viewport().close_requested(),
                        i.viewport().inner_rect.map(|r| r.min).unwrap_or(egui::Pos2::ZERO),
                        i.pixels_per_point(),
                    )
                });

                if cancel {
                    finished = Some(None);
                } else if let Some(pos) = pos {
                    if pressed {
                        drag.press(pos);
                    }
                    if released {
                        if let Some((a, b)) = drag.release(pos) {
                            let scale = capture_scale(ppp);
                            finished = Some(Some((
                                to_screen(a, origin, scale),
                                to_screen(b, origin, scale),
                            )));
                        }
                    } else {
                        drag.drag(pos);
                    }
                }

                egui::CentralPanel::default()
                    .frame(egui::Frame::none().fill(Color32::from_black_alpha(60)))
                    .show(ctx, |ui| {
                        ui.label(
                            RichText::new("Drag to select a region. Press Esc to cancel.")
                                .color(Color32::WHITE),
                        );
                        if let Some(rect) = drag.outline() {
                            ui.painter()
                                .rect_stroke(rect, 0.0, Stroke::new(2.0, Color32::GREEN));
                        }
                    });
            },
        );

        match finished {
            Some(corners) => {
                match &corners {
                    Some((start, end)) => log::info!("[UI] Selected {} → {}", start, end),
                    None => log::info!("[UI] Selection cancelled"),
                }
                self.dispatch(corners);
            }
            None => self.phase = Phase::Selecting(drag),
        }
    }

    fn poll_worker(&mut self) {
        let Phase::Working(rx) = &self.phase else {
            return;
        };
        let dialog = match rx.try_recv() {
            Ok(outcome) => self.controller.finish(&outcome),
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                log::error!("[UI] pipeline worker exited without a result");
                self.controller.abort("the capture worker stopped unexpectedly")
            }
        };

        self.phase = Phase::Idle;
        self.status = dialog.title.clone();
        show_dialog(&dialog);
    }
}

pub fn show_dialog(dialog: &Dialog) {
    let level = match dialog.level {
        DialogLevel::Info => MessageLevel::Info,
        DialogLevel::Error => MessageLevel::Error,
    };
    let _ = MessageDialog::new()
        .set_level(level)
        .set_title(dialog.title.as_str())
        .set_description(dialog.message.as_str())
        .set_buttons(MessageButtons::Ok)
        .show();
}

impl eframe::App for OcrSheetApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // lets the overlay viewport show through
        [0.0, 0.0, 0.0, 0.0]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !matches!(self.phase, Phase::Idle) {
            ctx.request_repaint();
        }
        self.poll_worker();
        self.show_overlay(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                let start = ui.add_enabled(
                    self.controller.is_idle(),
                    egui::Button::new(RichText::new("Start Process").size(16.0)),
                );
                if start.clicked() {
                    self.start_process();
                }
                if !self.status.is_empty() {
                    ui.label(RichText::new(&self.status).small().color(Color32::GRAY));
                }
            });
        });
    }
}
