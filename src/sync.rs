//! Thread-safe wrapper for hosts that deliver slide events from several threads.
//!
//! `SliderControl` assumes a single writer. `SyncSliderControl` wraps it in
//! `Arc<Mutex<_>>` so concurrent callers are serialized: every `on_slide`
//! runs to completion before the next one starts, in lock acquisition order.
//!
//! # Features
//!
//! Enable the `sync` feature to use this module:
//!
//! ```toml
//! [dependencies]
//! slidemap = { version = "0.1", features = ["sync"] }
//! ```

use crate::config::SliderConfig;
use crate::controller::SliderControl;
use crate::error::Result;
use crate::events::{RangeChanged, SubscriptionId};
use crate::index::MarkerSource;
use crate::render::RenderReport;
use crate::surface::{MapViewport, MarkerHandle, SliderWidget, TimestampLabel};
use parking_lot::Mutex;
use slidemap_types::SliderPosition;
use std::sync::Arc;

/// Cloneable, thread-safe handle to a [`SliderControl`].
pub struct SyncSliderControl<M, V, L> {
    inner: Arc<Mutex<SliderControl<M, V, L>>>,
}

impl<M, V, L> Clone for SyncSliderControl<M, V, L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M, V, L> SyncSliderControl<M, V, L>
where
    M: MarkerHandle,
    V: MapViewport<M>,
    L: TimestampLabel,
{
    pub fn new(config: SliderConfig) -> Self {
        Self::from_control(SliderControl::new(config))
    }

    pub fn from_control(control: SliderControl<M, V, L>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(control)),
        }
    }

    pub fn mount(&self, source: MarkerSource<M>, map: V, label: L) -> Result<()> {
        self.inner.lock().mount(source, map, label)
    }

    pub fn start(&self, slider: &mut impl SliderWidget) -> Result<()> {
        self.inner.lock().start(slider)
    }

    pub fn on_slide(&self, position: SliderPosition) -> Option<RenderReport> {
        self.inner.lock().on_slide(position)
    }

    pub fn pointer_released(&self) {
        self.inner.lock().pointer_released()
    }

    pub fn close_popup(&self) {
        self.inner.lock().close_popup()
    }

    pub fn subscribe(
        &self,
        listener: impl FnMut(&RangeChanged<'_, M>) + Send + 'static,
    ) -> SubscriptionId {
        self.inner.lock().subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.lock().unsubscribe(id)
    }

    pub fn unmount(&self) -> Option<(V, L)> {
        self.inner.lock().unmount()
    }

    /// Run `f` with exclusive access to the wrapped control.
    pub fn with_control<R>(&self, f: impl FnOnce(&mut SliderControl<M, V, L>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
