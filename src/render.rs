//! Render coordination: applying a selection to the map, popups and label.
//!
//! The coordinator diffs the previous and next selections by marker index,
//! so re-applying a selection that is already on screen issues no layer
//! calls. A failing collaborator call is logged and counted, and the rest of
//! the batch still runs.

use crate::config::SliderConfig;
use crate::events::{RangeChanged, RangeEvents};
use crate::index::MarkerIndex;
use crate::select::SelectionResult;
use crate::state::ControllerState;
use crate::surface::{
    FitBoundsOptions, Formatter, MapViewport, MarkerHandle, PopupHandle, TimestampLabel,
};
use rustc_hash::FxHashSet;
use slidemap_types::MarkerBounds;

/// Everything a render pass talks to.
pub struct Collaborators<'c, M, V, L> {
    pub map: &'c mut V,
    pub label: &'c mut L,
    pub formatter: &'c dyn Formatter,
    pub config: &'c SliderConfig,
    pub events: &'c mut RangeEvents<M>,
}

/// What one render pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub added: usize,
    pub removed: usize,
    pub popups_opened: usize,
    pub refitted: bool,
    /// Collaborator calls that failed and were skipped
    pub failures: usize,
    /// Indices on the map after the pass, ascending
    pub shown: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct RenderCoordinator {
    current_popup: Option<PopupHandle>,
}

impl RenderCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently opened popup.
    pub fn current_popup(&self) -> Option<&PopupHandle> {
        self.current_popup.as_ref()
    }

    /// Close the open popup and forget it.
    pub fn close_popup<M, V>(&mut self, map: &mut V)
    where
        M: MarkerHandle,
        V: MapViewport<M>,
    {
        map.close_popup();
        self.current_popup = None;
    }

    /// Bring the map from the layers in `shown` to `next`.
    ///
    /// `shown` holds the indices actually on the map, as returned in
    /// [`RenderReport::shown`] by the previous pass. Layers leave the map
    /// before new ones join, both in index order. A failed remove keeps its
    /// layer in the returned set and a failed add leaves it out, so the next
    /// pass retries either call. The label shows the formatted timestamp or is
    /// hidden when there is none. A `rangechanged` notification is emitted at
    /// the end of every pass, including empty ones.
    pub fn apply<M, V, L>(
        &mut self,
        shown: &[usize],
        next: &SelectionResult,
        index: &MarkerIndex<M>,
        state: &ControllerState,
        collab: &mut Collaborators<'_, M, V, L>,
    ) -> RenderReport
    where
        M: MarkerHandle,
        V: MapViewport<M>,
        L: TimestampLabel,
    {
        let mut report = RenderReport::default();

        let mut on_map: FxHashSet<usize> = shown.iter().copied().collect();
        let wanted: FxHashSet<usize> = next.visible.iter().copied().collect();

        let mut leaving: Vec<usize> = shown
            .iter()
            .copied()
            .filter(|i| !wanted.contains(i))
            .collect();
        leaving.sort_unstable();
        for record in index.resolve(&leaving) {
            match collab.map.remove_layer(&record.payload) {
                Ok(()) => {
                    on_map.remove(&record.index);
                    report.removed += 1;
                }
                Err(e) => {
                    log::warn!("Failed to remove marker {}: {}", record.payload.id(), e);
                    report.failures += 1;
                }
            }
        }

        let joining: Vec<usize> = next
            .visible
            .iter()
            .copied()
            .filter(|i| !on_map.contains(i))
            .collect();
        for record in index.resolve(&joining) {
            match collab.map.add_layer(&record.payload) {
                Ok(()) => {
                    on_map.insert(record.index);
                    report.added += 1;
                }
                Err(e) => {
                    log::warn!("Failed to add marker {}: {}", record.payload.id(), e);
                    report.failures += 1;
                }
            }
        }

        report.shown = on_map.into_iter().collect();
        report.shown.sort_unstable();

        match &next.timestamp_source {
            Some(source) => {
                let text = collab
                    .formatter
                    .format(source.value.as_ref(), collab.config);
                collab.label.show(&text);
            }
            None => collab.label.hide(),
        }

        if state.show_popups {
            self.open_popups(next, index, collab.map, &mut report);
        }

        if let Some(max_zoom) = state.rezoom_level.filter(|zoom| *zoom > 0)
            && !next.is_empty()
        {
            report.refitted = self.refit(next, index, collab.map, max_zoom, &mut report);
        }

        let visible: Vec<_> = index.resolve(&next.visible).collect();
        collab.events.emit(&RangeChanged { visible });

        log::debug!(
            "Render pass: {} visible, +{} -{}, {} popups, {} failures",
            next.len(),
            report.added,
            report.removed,
            report.popups_opened,
            report.failures
        );

        report
    }

    /// Close the open popup, then open the popup of every visible marker in
    /// index order. The last one opened becomes the current popup.
    fn open_popups<M, V>(
        &mut self,
        next: &SelectionResult,
        index: &MarkerIndex<M>,
        map: &mut V,
        report: &mut RenderReport,
    ) where
        M: MarkerHandle,
        V: MapViewport<M>,
    {
        self.close_popup::<M, V>(map);

        for record in index.resolve(&next.visible) {
            let Some(popup) = record.payload.popup() else {
                continue;
            };
            match record.payload.open_popup() {
                Ok(()) => {
                    report.popups_opened += 1;
                    self.current_popup = Some(popup);
                }
                Err(e) => {
                    log::warn!(
                        "Failed to open popup for marker {}: {}",
                        record.payload.id(),
                        e
                    );
                    report.failures += 1;
                }
            }
        }
    }

    /// Fit the viewport to the visible markers. A region without valid
    /// geometry skips the refit.
    fn refit<M, V>(
        &self,
        next: &SelectionResult,
        index: &MarkerIndex<M>,
        map: &mut V,
        max_zoom: u8,
        report: &mut RenderReport,
    ) -> bool
    where
        M: MarkerHandle,
        V: MapViewport<M>,
    {
        let mut bounds = MarkerBounds::new();
        for record in index.resolve(&next.visible) {
            if let Some(rect) = record.payload.bounds() {
                bounds.extend_rect(&rect);
            }
        }

        let Some(rect) = bounds.rect() else {
            log::warn!(
                "No valid geometry among {} visible markers, skipping refit",
                next.len()
            );
            return false;
        };

        match map.fit_bounds(rect, FitBoundsOptions { max_zoom }) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to fit viewport: {}", e);
                report.failures += 1;
                false
            }
        }
    }
}
