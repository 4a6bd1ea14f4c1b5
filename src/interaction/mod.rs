use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// Default touch tolerance added to the point radius when hit-testing.
pub const DEFAULT_TOUCH_TOLERANCE_PX: f64 = 4.0;

/// The currently hit-tested (series, sample) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub series: usize,
    pub sample: usize,
}

impl Selection {
    #[must_use]
    pub const fn new(series: usize, sample: usize) -> Self {
        Self { series, sample }
    }
}

/// Per-instance pointer tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchConfig {
    pub tolerance_px: f64,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            tolerance_px: DEFAULT_TOUCH_TOLERANCE_PX,
        }
    }
}

impl TouchConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.tolerance_px.is_finite() || self.tolerance_px < 0.0 {
            return Err(ChartError::InvalidData(
                "touch tolerance must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Selection holder with explicit transitions.
///
/// Mutated only by hit-testing and by data rebinds; every `set_data` must go
/// through [`SelectionState::clear`] so stale indices never survive into the
/// next draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    selected: Option<Selection>,
}

impl SelectionState {
    #[must_use]
    pub fn selected(self) -> Option<Selection> {
        self.selected
    }

    #[must_use]
    pub fn is_selected(self, series: usize, sample: usize) -> bool {
        self.selected == Some(Selection::new(series, sample))
    }

    /// Returns `true` when the selection actually changed.
    pub fn select(&mut self, selection: Selection) -> bool {
        let changed = self.selected != Some(selection);
        self.selected = Some(selection);
        changed
    }

    /// Returns `true` when there was a selection to clear.
    pub fn clear(&mut self) -> bool {
        self.selected.take().is_some()
    }
}

/// One hit-test candidate: the squared screen distance to the pointer plus
/// the selection it would produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitCandidate {
    pub distance_sq: f64,
    pub selection: Selection,
}

/// Buffer sized for the common case of a handful of overlapping points.
pub type HitCandidates = SmallVec<[HitCandidate; 4]>;

/// Legacy touch-area rule: a pointer hits a point when its squared distance
/// is at most `2 * radius^2`.
#[must_use]
pub fn within_touch_area(dx: f64, dy: f64, radius: f64) -> bool {
    dx * dx + dy * dy <= 2.0 * radius * radius
}

/// Picks the winning candidate: nearest squared distance, ties broken by
/// scan order (first candidate pushed wins).
#[must_use]
pub fn resolve_nearest(candidates: &HitCandidates) -> Option<Selection> {
    candidates
        .iter()
        .min_by_key(|candidate| OrderedFloat(candidate.distance_sq))
        .map(|candidate| candidate.selection)
}
