//! The slider control: lifecycle and the single slide entry point.
//!
//! A control is created unmounted from a [`SliderConfig`]. Mounting builds
//! the marker index and takes ownership of the map and label; `start`
//! configures the slider widget and renders the initial selection; every
//! widget movement then goes through [`SliderControl::on_slide`]. Unmounting
//! removes every rendered layer and hands the collaborators back.
//!
//! ```rust
//! use slidemap::prelude::*;
//! use slidemap::surface::SliderSpec;
//!
//! struct Widget;
//! impl SliderWidget for Widget {
//!     fn configure(&mut self, _spec: &SliderSpec) -> slidemap::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let markers = ["T0", "T1", "T2"].iter().enumerate().map(|(i, time)| {
//!     LayerMarker::new(format!("m{}", i), Point::new(i as f64, 0.0)).with_option("time", *time)
//! });
//!
//! let mut control = SliderControl::new(SliderConfig::default());
//! control.mount(
//!     MarkerSource::layer_group(markers),
//!     MemoryViewport::new(),
//!     MemoryLabel::new(),
//! )?;
//! control.start(&mut Widget)?;
//!
//! control.on_slide(SliderPosition::Single(1));
//! assert_eq!(control.label().unwrap().text(), "T1");
//! assert_eq!(control.map().unwrap().active_layers(), vec!["m0", "m1"]);
//!
//! let (map, _label) = control.unmount().unwrap();
//! assert!(map.active_layers().is_empty());
//! # Ok::<(), slidemap::SlideError>(())
//! ```

use crate::config::SliderConfig;
use crate::error::{Result, SlideError};
use crate::events::{RangeChanged, RangeEvents, SubscriptionId};
use crate::index::{MarkerIndex, MarkerSource};
use crate::render::{Collaborators, RenderCoordinator, RenderReport};
use crate::select::{SelectionResult, select};
use crate::state::ControllerState;
use crate::surface::{
    Formatter, MapViewport, MarkerHandle, PassthroughFormatter, PopupHandle, SliderSpec,
    SliderWidget, TimestampLabel,
};
use slidemap_types::SliderPosition;

/// Everything that exists only while the control is mounted.
struct Mounted<M, V, L> {
    index: MarkerIndex<M>,
    state: ControllerState,
    previous: Option<SelectionResult>,
    /// Indices actually on the map, which can lag `previous` after failures
    shown: Vec<usize>,
    coordinator: RenderCoordinator,
    map: V,
    label: L,
    pointer_listener: bool,
    started: bool,
}

/// Slider control over a time-ordered set of markers.
pub struct SliderControl<M, V, L> {
    config: SliderConfig,
    formatter: Box<dyn Formatter>,
    events: RangeEvents<M>,
    mounted: Option<Mounted<M, V, L>>,
}

impl<M, V, L> std::fmt::Debug for SliderControl<M, V, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliderControl")
            .field("config", &self.config)
            .field("events", &self.events)
            .field("mounted", &self.mounted.is_some())
            .finish()
    }
}

impl<M, V, L> SliderControl<M, V, L>
where
    M: MarkerHandle,
    V: MapViewport<M>,
    L: TimestampLabel,
{
    /// Create an unmounted control.
    pub fn new(config: SliderConfig) -> Self {
        Self {
            config,
            formatter: Box::new(PassthroughFormatter),
            events: RangeEvents::new(),
            mounted: None,
        }
    }

    /// Replace the timestamp formatter.
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn set_formatter(&mut self, formatter: impl Formatter + 'static) {
        self.formatter = Box::new(formatter);
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Listen for `rangechanged` notifications.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&RangeChanged<'_, M>) + Send + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Build the marker index and take ownership of the map and label.
    ///
    /// Slider bounds are derived from the index for layer groups. The
    /// initial position is the configured one, or the full extent when
    /// `showAllOnStart` is set. Nothing is rendered until [`Self::start`].
    pub fn mount(&mut self, source: MarkerSource<M>, mut map: V, label: L) -> Result<()> {
        if self.mounted.is_some() {
            return Err(SlideError::AlreadyMounted);
        }

        if let Err(e) = self.config.validate() {
            log::warn!("Slider configuration will be clamped at runtime: {}", e);
        }

        let from_collection = source.is_collection();
        let index = MarkerIndex::build(source);
        let state = ControllerState::from_config(&self.config, index.len(), from_collection);
        let pointer_listener = map.attach_pointer_release();

        log::debug!(
            "Mounted slider over {} markers, bounds {}..={}, mode {}",
            index.len(),
            state.min_value,
            state.max_value,
            state.mode.name()
        );

        self.mounted = Some(Mounted {
            index,
            state,
            previous: None,
            shown: Vec::new(),
            coordinator: RenderCoordinator::new(),
            map,
            label,
            pointer_listener,
            started: false,
        });
        Ok(())
    }

    /// Configure the slider widget and render the initial selection.
    ///
    /// When the widget refuses its configuration the render pass is
    /// aborted and `SliderUnavailable` is returned.
    pub fn start(&mut self, slider: &mut impl SliderWidget) -> Result<()> {
        let Some(mounted) = self.mounted.as_mut() else {
            return Err(SlideError::NotMounted);
        };

        let spec = SliderSpec {
            min: mounted.state.min_value,
            max: mounted.state.max_value,
            step: mounted.state.step,
            range: mounted.state.mode.is_range(),
            position: mounted.state.position,
        };
        if let Err(e) = slider.configure(&spec) {
            log::error!("Slider widget not available, skipping initial render: {}", e);
            return Err(SlideError::SliderUnavailable(e.to_string()));
        }

        mounted.started = true;
        let state = mounted.state.clone();
        self.render(state);
        Ok(())
    }

    /// Handle a slide event from the widget.
    ///
    /// The position is shaped for the active mode and snapped to the step,
    /// then selected and rendered. Before `mount` this does nothing.
    pub fn on_slide(&mut self, position: SliderPosition) -> Option<RenderReport> {
        let Some(mounted) = self.mounted.as_ref() else {
            log::debug!("Slide event ignored, control not mounted");
            return None;
        };
        let next_state = mounted.state.with_position(position);
        Some(self.render(next_state))
    }

    fn render(&mut self, next_state: ControllerState) -> RenderReport {
        let Some(mounted) = self.mounted.as_mut() else {
            return RenderReport::default();
        };

        let next = select(&next_state, &mounted.index);
        let mut collab = Collaborators {
            map: &mut mounted.map,
            label: &mut mounted.label,
            formatter: self.formatter.as_ref(),
            config: &self.config,
            events: &mut self.events,
        };
        let report = mounted.coordinator.apply(
            &mounted.shown,
            &next,
            &mounted.index,
            &next_state,
            &mut collab,
        );

        mounted.state = next_state;
        mounted.previous = Some(next);
        mounted.shown = report.shown.clone();
        report
    }

    /// Pointer released anywhere on the map: clear the timestamp label.
    pub fn pointer_released(&mut self) {
        if self
            .mounted
            .as_ref()
            .is_some_and(|mounted| mounted.pointer_listener)
        {
            self.clear_timestamp();
        }
    }

    /// Hide the timestamp label and clear its text.
    pub fn clear_timestamp(&mut self) {
        if let Some(mounted) = self.mounted.as_mut() {
            mounted.label.hide();
        }
    }

    /// Close the open popup and forget it.
    pub fn close_popup(&mut self) {
        if let Some(mounted) = self.mounted.as_mut() {
            mounted.coordinator.close_popup::<M, V>(&mut mounted.map);
        }
    }

    /// The most recently opened popup.
    pub fn current_popup(&self) -> Option<&PopupHandle> {
        self.mounted
            .as_ref()
            .and_then(|mounted| mounted.coordinator.current_popup())
    }

    /// Remove every rendered layer, detach the pointer listener and hand the
    /// map and label back. Returns `None` when the control was not mounted.
    pub fn unmount(&mut self) -> Option<(V, L)> {
        let mut mounted = self.mounted.take()?;

        if mounted.previous.take().is_some() || !mounted.shown.is_empty() {
            let mut collab = Collaborators {
                map: &mut mounted.map,
                label: &mut mounted.label,
                formatter: self.formatter.as_ref(),
                config: &self.config,
                events: &mut self.events,
            };
            let report = mounted.coordinator.apply(
                &mounted.shown,
                &SelectionResult::empty(),
                &mounted.index,
                &mounted.state,
                &mut collab,
            );
            if !report.shown.is_empty() {
                log::warn!(
                    "{} marker layers could not be removed on unmount",
                    report.shown.len()
                );
            }
        }

        if mounted.pointer_listener {
            mounted.map.detach_pointer_release();
        }

        log::debug!("Unmounted slider over {} markers", mounted.index.len());
        Some((mounted.map, mounted.label))
    }

    pub fn is_started(&self) -> bool {
        self.mounted.as_ref().is_some_and(|mounted| mounted.started)
    }

    pub fn state(&self) -> Option<&ControllerState> {
        self.mounted.as_ref().map(|mounted| &mounted.state)
    }

    /// The selection currently on screen.
    pub fn selection(&self) -> Option<&SelectionResult> {
        self.mounted
            .as_ref()
            .and_then(|mounted| mounted.previous.as_ref())
    }

    pub fn index(&self) -> Option<&MarkerIndex<M>> {
        self.mounted.as_ref().map(|mounted| &mounted.index)
    }

    pub fn map(&self) -> Option<&V> {
        self.mounted.as_ref().map(|mounted| &mounted.map)
    }

    /// Mutable access to the mounted map, for host-side changes between slides.
    pub fn map_mut(&mut self) -> Option<&mut V> {
        self.mounted.as_mut().map(|mounted| &mut mounted.map)
    }

    pub fn label(&self) -> Option<&L> {
        self.mounted.as_ref().map(|mounted| &mounted.label)
    }
}
