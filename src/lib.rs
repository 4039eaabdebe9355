//! Temporal index controller for time-ordered map markers.
//!
//! A slider (one handle or two) scrubs through markers ordered by time. For
//! every slider position the controller decides which markers are visible,
//! what the timestamp label reads, whether the viewport is refit, and which
//! popups open, then drives an abstract map to match.
//!
//! ## Display modes
//! - **Cumulative**: every marker up to the handle
//! - **Range**: every marker between two handles
//! - **Follow**: a trailing window of markers ending at the handle
//! - **SameDate**: every marker sharing the time value under the handle
//!
//! ```rust
//! use slidemap::{ControllerState, DisplayMode, LayerMarker, MarkerIndex, Point, SliderPosition, select};
//!
//! let index = MarkerIndex::from_layers((0..10).map(|i| {
//!     LayerMarker::new(format!("m{}", i), Point::new(0.0, 0.0)).with_option("time", i)
//! }));
//!
//! let state = ControllerState::new(DisplayMode::Follow { window: 3 }, 0, 9, SliderPosition::Single(5));
//! assert_eq!(select(&state, &index).visible, vec![3, 4, 5]);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod index;
pub mod lookup;
pub mod markers;
pub mod render;
pub mod select;
pub mod state;
pub mod surface;

#[cfg(feature = "sync")]
pub mod sync;

pub use config::SliderConfig;
pub use controller::SliderControl;
pub use error::{Result, SlideError};

#[cfg(feature = "sync")]
pub use sync::SyncSliderControl;

pub use geo::{Point, Rect};

pub use slidemap_types::{DisplayMode, MarkerBounds, SliderPosition, TimeValue};

pub use events::{RangeChanged, RangeEvents, SubscriptionId};
pub use index::{MarkerEntry, MarkerIndex, MarkerRecord, MarkerSource};
pub use lookup::TimeLookup;
pub use render::{Collaborators, RenderCoordinator, RenderReport};
pub use select::{SelectionResult, TimestampSource, select};
pub use state::ControllerState;

pub use surface::{
    FitBoundsOptions, Formatter, MapViewport, MarkerHandle, MemoryLabel, MemoryViewport,
    PassthroughFormatter, PopupHandle, SliderSpec, SliderWidget, TimestampLabel, ViewportCall,
};

pub use markers::LayerMarker;
#[cfg(feature = "geojson")]
pub use markers::FeatureMarker;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{Result, SlideError, SliderConfig, SliderControl};

    pub use geo::{Point, Rect};

    pub use crate::{DisplayMode, SliderPosition, TimeValue};

    pub use crate::{MarkerEntry, MarkerIndex, MarkerSource};

    pub use crate::{Formatter, MapViewport, MarkerHandle, SliderWidget, TimestampLabel};

    pub use crate::{LayerMarker, MemoryLabel, MemoryViewport};

    #[cfg(feature = "geojson")]
    pub use crate::FeatureMarker;

    #[cfg(feature = "sync")]
    pub use crate::SyncSliderControl;
}
