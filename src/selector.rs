//! Region selection stage

use crate::error::{OcrSheetError, Result};
use ocr_sheet_common::{Region, ScreenPoint};

/// Produces the region a run should capture
pub trait RegionSelector {
    fn select_region(&mut self) -> Result<Region>;
}

/// Two corners picked by the user, or `None` when the selection was cancelled.
///
/// The desktop overlay fills this from a press/release drag; the CLI from
/// `--from` / `--to`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointPairSelector {
    corners: Option<(ScreenPoint, ScreenPoint)>,
}

impl PointPairSelector {
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self {
            corners: Some((start, end)),
        }
    }

    pub fn cancelled() -> Self {
        Self { corners: None }
    }
}

impl RegionSelector for PointPairSelector {
    fn select_region(&mut self) -> Result<Region> {
        let (start, end) = self
            .corners
            .ok_or_else(|| OcrSheetError::Selection("cancelled by user".into()))?;
        log::debug!("[SELECT] start ({}), end ({})", start, end);

        let region = Region::from_points(start, end)
            .map_err(|e| OcrSheetError::Selection(e.to_string()))?;
        log::info!("[SELECT] Selected region: {}", region);
        Ok(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_normalized() {
        let mut selector = PointPairSelector::new(ScreenPoint::new(300, 200), ScreenPoint::new(100, 250));
        let region = selector.select_region().unwrap();
        assert_eq!(region, Region { x: 100, y: 200, width: 200, height: 50 });
    }

    #[test]
    fn test_cancelled_is_selection_error() {
        let err = PointPairSelector::cancelled().select_region().unwrap_err();
        assert!(matches!(err, OcrSheetError::Selection(_)));
    }

    #[test]
    fn test_unobtainable_coordinates() {
        let mut selector = PointPairSelector::new(ScreenPoint::new(-1, -1), ScreenPoint::new(10, 10));
        let err = selector.select_region().unwrap_err();
        assert!(matches!(err, OcrSheetError::Selection(_)));
    }

    #[test]
    fn test_same_point_still_selects() {
        // a zero-area region is a capture problem, not a selection one
        let p = ScreenPoint::new(50, 60);
        let region = PointPairSelector::new(p, p).select_region().unwrap();
        assert!(region.is_degenerate());
    }
}
