//! Collaborator abstraction for the map surface
//!
//! The controller never touches a concrete map, widget, or DOM. It drives
//! these capability traits instead, so hosts can plug in a browser map, a
//! native renderer, or the in-memory implementations in [`memory`].

use crate::config::SliderConfig;
use crate::error::Result;
use crate::lookup::TimeLookup;
use geo::{Point, Rect};
use serde_json::{Map, Value};
use slidemap_types::{SliderPosition, TimeValue};

pub mod memory;

pub use memory::{MemoryLabel, MemoryViewport, ViewportCall};

/// Opaque reference to a marker's popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupHandle {
    /// Id of the marker the popup is bound to
    pub marker_id: String,
    /// Popup content as supplied by the host
    pub content: String,
}

impl PopupHandle {
    pub fn new(marker_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            marker_id: marker_id.into(),
            content: content.into(),
        }
    }
}

/// A marker as seen by the controller.
///
/// Only [`MarkerHandle::id`] is required. Time values are read through the
/// two supported storage conventions (feature properties, then layer
/// options); implement the matching accessor for whichever one the marker
/// uses. Methods take `&self`: a handle refers to an object owned by the
/// host, which is responsible for any interior state.
pub trait MarkerHandle {
    /// Stable identity of the marker layer
    fn id(&self) -> &str;

    /// Properties of the feature backing this marker, if any
    fn feature_properties(&self) -> Option<&Map<String, Value>> {
        None
    }

    /// Options the layer was created with, if any
    fn layer_options(&self) -> Option<&Map<String, Value>> {
        None
    }

    /// Geographic position of the marker
    fn location(&self) -> Option<Point> {
        None
    }

    /// Region covered by the marker. Defaults to its location.
    fn bounds(&self) -> Option<Rect> {
        self.location().map(|point| Rect::new(point.0, point.0))
    }

    /// Popup bound to the marker, if any
    fn popup(&self) -> Option<PopupHandle> {
        None
    }

    /// Open the marker's popup on the map
    fn open_popup(&self) -> Result<()> {
        Ok(())
    }

    /// Read the time value stored under `attribute`.
    fn time_value(&self, attribute: &str) -> Option<TimeValue> {
        TimeLookup::read_first(self, attribute)
    }
}

/// Options for a viewport refit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitBoundsOptions {
    /// Zoom level the refit may not exceed
    pub max_zoom: u8,
}

/// The map the markers are rendered on.
pub trait MapViewport<M: MarkerHandle + ?Sized> {
    fn add_layer(&mut self, marker: &M) -> Result<()>;

    fn remove_layer(&mut self, marker: &M) -> Result<()>;

    /// Fit the view to `bounds`, zooming no further than `options.max_zoom`
    fn fit_bounds(&mut self, bounds: Rect, options: FitBoundsOptions) -> Result<()>;

    fn close_popup(&mut self);

    /// Start forwarding pointer-release events to the control.
    ///
    /// Returns `false` when the map has no such event.
    fn attach_pointer_release(&mut self) -> bool {
        false
    }

    fn detach_pointer_release(&mut self) {}
}

/// The text box showing the formatted timestamp.
pub trait TimestampLabel {
    /// Show the label with `text`
    fn show(&mut self, text: &str);

    /// Hide the label and clear its text
    fn hide(&mut self);
}

/// Settings handed to the slider widget when the control starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderSpec {
    pub min: i64,
    pub max: i64,
    pub step: i64,
    pub range: bool,
    pub position: SliderPosition,
}

/// The slider widget driving the control.
///
/// The widget owns drag handling and clamping. It reports new positions by
/// having the host call [`crate::SliderControl::on_slide`].
pub trait SliderWidget {
    /// Configure the widget. An error means the widget is unavailable.
    fn configure(&mut self, spec: &SliderSpec) -> Result<()>;
}

/// Turns a time value into label text.
///
/// Any `Fn(Option<&TimeValue>, &SliderConfig) -> String` closure is a formatter.
pub trait Formatter: Send + Sync {
    fn format(&self, value: Option<&TimeValue>, config: &SliderConfig) -> String;
}

impl<F> Formatter for F
where
    F: Fn(Option<&TimeValue>, &SliderConfig) -> String + Send + Sync,
{
    fn format(&self, value: Option<&TimeValue>, config: &SliderConfig) -> String {
        self(value, config)
    }
}

/// Default formatter: the raw value as text, or an empty string when absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughFormatter;

impl Formatter for PassthroughFormatter {
    fn format(&self, value: Option<&TimeValue>, _config: &SliderConfig) -> String {
        value.map(TimeValue::to_string).unwrap_or_default()
    }
}
