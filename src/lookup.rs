//! Reading time values off markers.

use crate::surface::MarkerHandle;
use serde_json::{Map, Value};
use slidemap_types::TimeValue;

/// Where a marker keeps its time value.
///
/// Markers created from GeoJSON carry it in `feature.properties`, vector
/// layers carry it in their layer `options`. Both are checked, in
/// [`TimeLookup::ORDER`], and the first non-empty value wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLookup {
    FeatureProperties,
    LayerOptions,
}

impl TimeLookup {
    pub const ORDER: [TimeLookup; 2] = [TimeLookup::FeatureProperties, TimeLookup::LayerOptions];

    fn attributes<M: MarkerHandle + ?Sized>(self, marker: &M) -> Option<&Map<String, Value>> {
        match self {
            TimeLookup::FeatureProperties => marker.feature_properties(),
            TimeLookup::LayerOptions => marker.layer_options(),
        }
    }

    /// Read `attribute` through this convention only.
    pub fn read<M: MarkerHandle + ?Sized>(self, marker: &M, attribute: &str) -> Option<TimeValue> {
        self.attributes(marker)
            .and_then(|attributes| attributes.get(attribute))
            .and_then(TimeValue::from_json)
    }

    /// Read `attribute` through every convention, first non-empty value wins.
    pub fn read_first<M: MarkerHandle + ?Sized>(marker: &M, attribute: &str) -> Option<TimeValue> {
        Self::ORDER
            .iter()
            .find_map(|lookup| lookup.read(marker, attribute))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Dual {
        properties: Map<String, Value>,
        options: Map<String, Value>,
    }

    impl MarkerHandle for Dual {
        fn id(&self) -> &str {
            "dual"
        }

        fn feature_properties(&self) -> Option<&Map<String, Value>> {
            Some(&self.properties)
        }

        fn layer_options(&self) -> Option<&Map<String, Value>> {
            Some(&self.options)
        }
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_feature_properties_win() {
        let marker = Dual {
            properties: object(json!({ "time": "from-feature" })),
            options: object(json!({ "time": "from-options" })),
        };
        assert_eq!(
            TimeLookup::read_first(&marker, "time"),
            Some(TimeValue::from("from-feature"))
        );
    }

    #[test]
    fn test_empty_feature_value_falls_through() {
        let marker = Dual {
            properties: object(json!({ "time": "" })),
            options: object(json!({ "time": 1577872800 })),
        };
        assert_eq!(
            TimeLookup::read_first(&marker, "time"),
            Some(TimeValue::from(1_577_872_800.0))
        );
        assert_eq!(TimeLookup::FeatureProperties.read(&marker, "time"), None);
    }

    #[test]
    fn test_missing_attribute() {
        let marker = Dual {
            properties: object(json!({ "name": "A" })),
            options: Map::new(),
        };
        assert_eq!(TimeLookup::read_first(&marker, "time"), None);
    }
}
