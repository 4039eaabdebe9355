//! In-memory collaborators.
//!
//! `MemoryViewport` and `MemoryLabel` keep the rendered state in memory and
//! back headless hosts. The viewport can also log the calls it receives,
//! which makes render passes observable in tests.

use crate::error::{Result, SlideError};
use crate::surface::{FitBoundsOptions, MapViewport, MarkerHandle, TimestampLabel};
use geo::Rect;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// A call received by a [`MemoryViewport`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportCall {
    Add(String),
    Remove(String),
    FitBounds(Rect, FitBoundsOptions),
    ClosePopup,
}

/// A map that keeps its active layer set in memory.
///
/// Calls are logged by default. Long-running hosts should turn the log off
/// with [`MemoryViewport::without_call_log`] or drain it with
/// [`MemoryViewport::take_calls`].
#[derive(Debug)]
pub struct MemoryViewport {
    active: BTreeSet<String>,
    calls: Vec<ViewportCall>,
    log_calls: bool,
    /// Remaining failures per marker id
    failing: FxHashMap<String, usize>,
    pointer_listener: bool,
}

impl Default for MemoryViewport {
    fn default() -> Self {
        Self {
            active: BTreeSet::new(),
            calls: Vec::new(),
            log_calls: true,
            failing: FxHashMap::default(),
            pointer_listener: false,
        }
    }
}

impl MemoryViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A viewport that tracks its layers without logging calls.
    pub fn without_call_log(mut self) -> Self {
        self.log_calls = false;
        self
    }

    /// Make every add/remove call for marker `id` fail.
    pub fn fail_on(&mut self, id: impl Into<String>) {
        self.failing.insert(id.into(), usize::MAX);
    }

    /// Make the next `times` add/remove calls for marker `id` fail.
    pub fn fail_times(&mut self, id: impl Into<String>, times: usize) {
        self.failing.insert(id.into(), times);
    }

    /// Ids of the layers currently on the map, sorted.
    pub fn active_layers(&self) -> Vec<&str> {
        self.active.iter().map(String::as_str).collect()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains(id)
    }

    pub fn calls(&self) -> &[ViewportCall] {
        &self.calls
    }

    /// Drain the call log.
    pub fn take_calls(&mut self) -> Vec<ViewportCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of add and remove calls received.
    pub fn layer_call_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, ViewportCall::Add(_) | ViewportCall::Remove(_)))
            .count()
    }

    pub fn popups_closed(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, ViewportCall::ClosePopup))
            .count()
    }

    /// Every refit requested so far.
    pub fn fits(&self) -> Vec<(Rect, FitBoundsOptions)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ViewportCall::FitBounds(rect, options) => Some((*rect, *options)),
                _ => None,
            })
            .collect()
    }

    pub fn pointer_listener_attached(&self) -> bool {
        self.pointer_listener
    }

    fn record(&mut self, call: ViewportCall) {
        if self.log_calls {
            self.calls.push(call);
        }
    }

    fn check(&mut self, id: &str) -> Result<()> {
        if let Some(remaining) = self.failing.get_mut(id)
            && *remaining > 0
        {
            if *remaining != usize::MAX {
                *remaining -= 1;
            }
            return Err(SlideError::Collaborator(format!(
                "layer {} rejected by map",
                id
            )));
        }
        Ok(())
    }
}

impl<M: MarkerHandle + ?Sized> MapViewport<M> for MemoryViewport {
    fn add_layer(&mut self, marker: &M) -> Result<()> {
        let id = marker.id().to_string();
        self.record(ViewportCall::Add(id.clone()));
        self.check(&id)?;
        self.active.insert(id);
        Ok(())
    }

    fn remove_layer(&mut self, marker: &M) -> Result<()> {
        let id = marker.id().to_string();
        self.record(ViewportCall::Remove(id.clone()));
        self.check(&id)?;
        self.active.remove(&id);
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: Rect, options: FitBoundsOptions) -> Result<()> {
        self.record(ViewportCall::FitBounds(bounds, options));
        Ok(())
    }

    fn close_popup(&mut self) {
        self.record(ViewportCall::ClosePopup);
    }

    fn attach_pointer_release(&mut self) -> bool {
        self.pointer_listener = true;
        true
    }

    fn detach_pointer_release(&mut self) {
        self.pointer_listener = false;
    }
}

/// A timestamp label that keeps its text in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryLabel {
    text: String,
    visible: bool,
    updates: usize,
}

impl MemoryLabel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Number of show/hide calls received.
    pub fn update_count(&self) -> usize {
        self.updates
    }
}

impl TimestampLabel for MemoryLabel {
    fn show(&mut self, text: &str) {
        self.text = text.to_string();
        self.visible = true;
        self.updates += 1;
    }

    fn hide(&mut self) {
        self.text.clear();
        self.visible = false;
        self.updates += 1;
    }
}
