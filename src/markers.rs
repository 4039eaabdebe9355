//! Ready-made marker handles for the two time storage conventions.
//!
//! - [`LayerMarker`]: time kept in the layer's creation options
//! - [`FeatureMarker`]: time kept in a GeoJSON feature's properties
//!   (requires the `geojson` feature)

use crate::error::Result;
use crate::surface::{MarkerHandle, PopupHandle};
use geo::Point;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A point marker whose attributes live in its layer options.
///
/// ```rust
/// use slidemap::{LayerMarker, MarkerHandle, Point, TimeValue};
///
/// let marker = LayerMarker::new("a", Point::new(-83.0458, 42.3314))
///     .with_option("time", "2020-01-01T10:00:00Z")
///     .with_popup("Event A");
///
/// assert_eq!(
///     marker.time_value("time"),
///     Some(TimeValue::from("2020-01-01T10:00:00Z"))
/// );
/// assert_eq!(marker.popup().unwrap().content, "Event A");
/// ```
#[derive(Debug)]
pub struct LayerMarker {
    id: String,
    location: Point,
    options: Map<String, Value>,
    popup: Option<String>,
    popup_opens: AtomicUsize,
}

impl LayerMarker {
    pub fn new(id: impl Into<String>, location: Point) -> Self {
        Self {
            id: id.into(),
            location,
            options: Map::new(),
            popup: None,
            popup_opens: AtomicUsize::new(0),
        }
    }

    /// Set a layer option, such as the time attribute.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Bind popup content to the marker.
    pub fn with_popup(mut self, content: impl Into<String>) -> Self {
        self.popup = Some(content.into());
        self
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    /// How many times the popup has been opened.
    pub fn popup_open_count(&self) -> usize {
        self.popup_opens.load(Ordering::Relaxed)
    }
}

impl Clone for LayerMarker {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            location: self.location,
            options: self.options.clone(),
            popup: self.popup.clone(),
            popup_opens: AtomicUsize::new(self.popup_open_count()),
        }
    }
}

impl MarkerHandle for LayerMarker {
    fn id(&self) -> &str {
        &self.id
    }

    fn layer_options(&self) -> Option<&Map<String, Value>> {
        Some(&self.options)
    }

    fn location(&self) -> Option<Point> {
        Some(self.location)
    }

    fn popup(&self) -> Option<PopupHandle> {
        self.popup
            .as_ref()
            .map(|content| PopupHandle::new(self.id.clone(), content.clone()))
    }

    fn open_popup(&self) -> Result<()> {
        self.popup_opens.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(feature = "geojson")]
pub use feature::FeatureMarker;

#[cfg(feature = "geojson")]
mod feature {
    use crate::error::{Result, SlideError};
    use crate::surface::{MarkerHandle, PopupHandle};
    use geo::{BoundingRect, Point, Rect};
    use geojson::Feature;
    use geojson::feature::Id;
    use serde_json::{Map, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A marker backed by a GeoJSON feature.
    ///
    /// The time value is read from `feature.properties`, geometry from the
    /// feature's geometry.
    ///
    /// ```rust
    /// use slidemap::{FeatureMarker, MarkerHandle, TimeValue};
    ///
    /// let feature: geojson::Feature = serde_json::from_str(r#"{
    ///     "type": "Feature",
    ///     "id": "quake-1",
    ///     "geometry": { "type": "Point", "coordinates": [142.4, 38.3] },
    ///     "properties": { "time": 1299822384120 }
    /// }"#).unwrap();
    ///
    /// let marker = FeatureMarker::from_feature(feature).unwrap();
    /// assert_eq!(marker.id(), "quake-1");
    /// assert_eq!(marker.time_value("time"), Some(TimeValue::from(1_299_822_384_120.0)));
    /// ```
    #[derive(Debug)]
    pub struct FeatureMarker {
        id: String,
        feature: Feature,
        bounds: Option<Rect>,
        popup: Option<String>,
        popup_opens: AtomicUsize,
    }

    impl FeatureMarker {
        /// Wrap `feature` under an explicit id.
        pub fn new(id: impl Into<String>, feature: Feature) -> Self {
            let bounds = feature_bounds(&feature);
            Self {
                id: id.into(),
                feature,
                bounds,
                popup: None,
                popup_opens: AtomicUsize::new(0),
            }
        }

        /// Wrap `feature`, taking the id from the feature itself.
        pub fn from_feature(feature: Feature) -> Result<Self> {
            let id = match &feature.id {
                Some(Id::String(id)) => id.clone(),
                Some(Id::Number(id)) => id.to_string(),
                None => {
                    return Err(SlideError::InvalidMarker(
                        "GeoJSON feature has no id".to_string(),
                    ));
                }
            };
            Ok(Self::new(id, feature))
        }

        /// Use the string property `key` as popup content.
        pub fn with_popup_property(mut self, key: &str) -> Self {
            self.popup = self
                .feature
                .property(key)
                .and_then(Value::as_str)
                .map(str::to_string);
            self
        }

        pub fn with_popup(mut self, content: impl Into<String>) -> Self {
            self.popup = Some(content.into());
            self
        }

        pub fn feature(&self) -> &Feature {
            &self.feature
        }

        pub fn popup_open_count(&self) -> usize {
            self.popup_opens.load(Ordering::Relaxed)
        }
    }

    fn feature_bounds(feature: &Feature) -> Option<Rect> {
        let geometry = feature.geometry.as_ref()?;
        let shape = geo::Geometry::<f64>::try_from(geometry.value.clone()).ok()?;
        shape.bounding_rect()
    }

    impl MarkerHandle for FeatureMarker {
        fn id(&self) -> &str {
            &self.id
        }

        fn feature_properties(&self) -> Option<&Map<String, Value>> {
            self.feature.properties.as_ref()
        }

        fn location(&self) -> Option<Point> {
            self.bounds.map(|rect| Point::from(rect.center()))
        }

        fn bounds(&self) -> Option<Rect> {
            self.bounds
        }

        fn popup(&self) -> Option<PopupHandle> {
            self.popup
                .as_ref()
                .map(|content| PopupHandle::new(self.id.clone(), content.clone()))
        }

        fn open_popup(&self) -> Result<()> {
            self.popup_opens.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

}
