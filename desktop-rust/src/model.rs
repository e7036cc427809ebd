use eframe::egui::{Pos2, Rect};
use ocr_sheet::PipelineOutcome;
use ocr_sheet_common::ScreenPoint;
use std::sync::mpsc::Receiver;

/// Press/drag/release state of the selection overlay, in viewport points
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragSelection {
    pub start: Option<Pos2>,
    pub current: Option<Pos2>,
}

impl DragSelection {
    pub fn press(&mut self, pos: Pos2) {
        self.start = Some(pos);
        self.current = Some(pos);
    }

    pub fn drag(&mut self, pos: Pos2) {
        if self.start.is_some() {
            self.current = Some(pos);
        }
    }

    /// Ends the drag; `None` if nothing was pressed first
    pub fn release(&mut self, pos: Pos2) -> Option<(Pos2, Pos2)> {
        let start = self.start.take()?;
        self.current = None;
        Some((start, pos))
    }

    /// Rectangle to outline while dragging
    pub fn outline(&self) -> Option<Rect> {
        match (self.start, self.current) {
            (Some(a), Some(b)) => Some(Rect::from_two_pos(a, b)),
            _ => None,
        }
    }
}

/// Converts a viewport-local position to screen coordinates.
///
/// `origin` is the viewport's top-left in screen points. `scale` is 1.0 on
/// macOS, where capture works in logical points, and pixels-per-point
/// elsewhere.
pub fn to_screen(pos: Pos2, origin: Pos2, scale: f32) -> ScreenPoint {
    let x = ((origin.x + pos.x) * scale).round() as i32;
    let y = ((origin.y + pos.y) * scale).round() as i32;
    ScreenPoint::new(x, y)
}

pub fn capture_scale(pixels_per_point: f32) -> f32 {
    if cfg!(target_os = "macos") { 1.0 } else { pixels_per_point }
}

pub enum Phase {
    Idle,
    Selecting(DragSelection),
    Working(Receiver<PipelineOutcome>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut drag = DragSelection::default();
        drag.drag(Pos2::new(5.0, 5.0));
        assert_eq!(drag.outline(), None);
        assert_eq!(drag.release(Pos2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_press_drag_release() {
        let mut drag = DragSelection::default();
        drag.press(Pos2::new(100.0, 80.0));
        drag.drag(Pos2::new(20.0, 30.0));

        let outline = drag.outline().unwrap();
        assert_eq!(outline.min, Pos2::new(20.0, 30.0));
        assert_eq!(outline.max, Pos2::new(100.0, 80.0));

        let pair = drag.release(Pos2::new(25.0, 35.0)).unwrap();
        assert_eq!(pair, (Pos2::new(100.0, 80.0), Pos2::new(25.0, 35.0)));
        assert_eq!(drag, DragSelection::default());
    }

    #[test]
    fn test_to_screen_applies_origin_and_scale() {
        let p = to_screen(Pos2::new(10.0, 20.5), Pos2::new(-1920.0, 0.0), 2.0);
        assert_eq!(p, ScreenPoint::new(-3820, 41));
    }
}
