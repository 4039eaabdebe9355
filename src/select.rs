//! Visibility selection: which markers a slider position reveals.
//!
//! [`select`] is pure. It reads the state and the index, keeps no memo
//! state, and returns a fresh [`SelectionResult`] every time, so identical
//! inputs always produce identical results.

use crate::index::MarkerIndex;
use crate::state::ControllerState;
use crate::surface::MarkerHandle;
use slidemap_types::{DisplayMode, SliderPosition, TimeValue};

/// The record whose time value labels a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampSource {
    pub index: usize,
    /// `None` when the record has no time value under the configured attribute
    pub value: Option<TimeValue>,
}

/// Outcome of one selection: visible marker indices in ascending order and
/// the timestamp source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionResult {
    pub visible: Vec<usize>,
    pub timestamp_source: Option<TimestampSource>,
}

impl SelectionResult {
    /// The "nothing to show" result.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.visible.binary_search(&index).is_ok()
    }
}

/// Compute the visible markers for `state`.
///
/// - **Cumulative**: `min..=position`
/// - **Range**: `low..=high`
/// - **Follow**: the last `window` indices ending at `position`, clipped at `min`
/// - **SameDate**: every record whose time value equals the one at `position`
///
/// A missing record at the anchor (the position, or the upper handle) and an
/// empty index (`min > max`) both yield an empty result. Positions outside
/// `min..=max` are treated the same way.
pub fn select<M: MarkerHandle>(state: &ControllerState, index: &MarkerIndex<M>) -> SelectionResult {
    if state.is_empty_range() {
        return SelectionResult::empty();
    }

    let anchor = state.anchor();
    if anchor < state.min_value || anchor > state.max_value {
        log::debug!(
            "Position {} outside slider bounds {}..={}",
            anchor,
            state.min_value,
            state.max_value
        );
        return SelectionResult::empty();
    }

    let Some(anchor_record) = index.get(anchor) else {
        return SelectionResult::empty();
    };

    let anchor_time = anchor_record.time_value(&state.time_attribute);
    if anchor_time.is_none() {
        log::warn!(
            "Time property {} not found for marker {} at index {}",
            state.time_attribute,
            anchor_record.payload.id(),
            anchor
        );
    }

    let visible = match state.mode {
        DisplayMode::Cumulative => collect_span(index, state.min_value, anchor),
        DisplayMode::Range => {
            let low = match state.position {
                SliderPosition::Range(low, high) => low.min(high),
                SliderPosition::Single(_) => state.min_value,
            };
            collect_span(index, low.max(state.min_value), anchor)
        }
        DisplayMode::Follow { window } => {
            let window = i64::try_from(window.max(1)).unwrap_or(i64::MAX);
            let low = anchor.saturating_sub(window - 1).max(state.min_value);
            collect_span(index, low, anchor)
        }
        DisplayMode::SameDate => match &anchor_time {
            Some(target) => index
                .range(state.min_value, state.max_value)
                .filter(|record| {
                    record.time_value(&state.time_attribute).as_ref() == Some(target)
                })
                .map(|record| record.index)
                .collect(),
            // Untimed anchors match nothing but themselves
            None => vec![anchor_record.index],
        },
    };

    SelectionResult {
        visible,
        timestamp_source: Some(TimestampSource {
            index: anchor_record.index,
            value: anchor_time,
        }),
    }
}

fn collect_span<M>(index: &MarkerIndex<M>, low: i64, high: i64) -> Vec<usize> {
    index.range(low, high).map(|record| record.index).collect()
}
