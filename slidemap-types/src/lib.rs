//! # slidemap-types
//!
//! Value types shared by the slidemap controller and its collaborators.
//!
//! - **Time values**: `TimeValue`, the opaque comparable read off a marker
//! - **Slider positions**: `SliderPosition`, one handle or a handle pair
//! - **Display modes**: `DisplayMode`, how a position maps to visible markers
//! - **Bounds**: `MarkerBounds`, an accumulating region used for viewport refits
//!
//! All types are serializable with Serde and bounds are built on the `geo`
//! crate's primitives.
//!
//! ## Examples
//!
//! ```rust
//! use slidemap_types::position::SliderPosition;
//! use slidemap_types::time::TimeValue;
//!
//! let position = SliderPosition::Range(5, 2).normalized();
//! assert_eq!(position, SliderPosition::Range(2, 5));
//! assert_eq!(position.anchor(), 5);
//!
//! let stamp = TimeValue::from("2020-01-01T10:00:00Z");
//! assert_eq!(stamp.to_string(), "2020-01-01T10:00:00Z");
//! ```

pub mod bounds;
pub mod mode;
pub mod position;
pub mod time;

pub use bounds::MarkerBounds;
pub use mode::DisplayMode;
pub use position::SliderPosition;
pub use time::TimeValue;
