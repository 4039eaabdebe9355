//! Marker index: the ordered table of markers the slider scrubs through.
//!
//! The index is built once when a control is mounted and is read-only
//! afterwards. Records are numbered densely from zero in insertion order.

use crate::surface::MarkerHandle;
use slidemap_types::TimeValue;

/// A marker together with its slider index.
#[derive(Debug, Clone)]
pub struct MarkerRecord<M> {
    pub index: usize,
    time_value: Option<TimeValue>,
    pub payload: M,
}

impl<M: MarkerHandle> MarkerRecord<M> {
    /// The record's time value.
    ///
    /// An explicit value supplied at build time takes priority; otherwise the
    /// value is read from the marker through `attribute`.
    pub fn time_value(&self, attribute: &str) -> Option<TimeValue> {
        self.time_value
            .clone()
            .or_else(|| self.payload.time_value(attribute))
    }
}

/// One element of an explicit marker list.
#[derive(Debug, Clone)]
pub struct MarkerEntry<M> {
    pub payload: M,
    pub time_value: Option<TimeValue>,
}

impl<M> MarkerEntry<M> {
    /// An entry whose time value is read from the marker.
    pub fn new(payload: M) -> Self {
        Self {
            payload,
            time_value: None,
        }
    }

    /// An entry with an explicit time value.
    pub fn with_time(payload: M, time_value: impl Into<TimeValue>) -> Self {
        Self {
            payload,
            time_value: Some(time_value.into()),
        }
    }
}

/// Where markers come from when a control is mounted.
#[derive(Debug, Clone)]
pub enum MarkerSource<M> {
    /// An explicit ordered list. Configured slider bounds are kept.
    Entries(Vec<MarkerEntry<M>>),
    /// The layers of a group, in iteration order. Slider bounds are
    /// always derived from the number of layers.
    LayerGroup(Vec<M>),
}

impl<M> MarkerSource<M> {
    /// Collect the layers of any iterable group.
    pub fn layer_group(group: impl IntoIterator<Item = M>) -> Self {
        MarkerSource::LayerGroup(group.into_iter().collect())
    }

    pub fn entries(entries: impl IntoIterator<Item = MarkerEntry<M>>) -> Self {
        MarkerSource::Entries(entries.into_iter().collect())
    }

    /// Whether slider bounds must be derived from the built index.
    pub fn is_collection(&self) -> bool {
        matches!(self, MarkerSource::LayerGroup(_))
    }
}

/// Immutable, densely numbered table of markers.
#[derive(Debug, Clone)]
pub struct MarkerIndex<M> {
    records: Vec<MarkerRecord<M>>,
}

impl<M> Default for MarkerIndex<M> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<M: MarkerHandle> MarkerIndex<M> {
    /// Build the index. Never fails: an empty source yields an empty index
    /// whose derived bounds are `0..=-1`.
    pub fn build(source: MarkerSource<M>) -> Self {
        let records = match source {
            MarkerSource::Entries(entries) => entries
                .into_iter()
                .enumerate()
                .map(|(index, entry)| MarkerRecord {
                    index,
                    time_value: entry.time_value,
                    payload: entry.payload,
                })
                .collect(),
            MarkerSource::LayerGroup(layers) => layers
                .into_iter()
                .enumerate()
                .map(|(index, payload)| MarkerRecord {
                    index,
                    time_value: None,
                    payload,
                })
                .collect(),
        };

        Self { records }
    }

    /// Convenience for building from a layer group directly.
    pub fn from_layers(layers: impl IntoIterator<Item = M>) -> Self {
        Self::build(MarkerSource::layer_group(layers))
    }
}

impl<M> MarkerIndex<M> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Highest index present, `-1` when empty.
    pub fn max_index(&self) -> i64 {
        self.records.len() as i64 - 1
    }

    /// Record at a slider index. Negative or past-the-end indices yield `None`.
    pub fn get(&self, index: i64) -> Option<&MarkerRecord<M>> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.records.get(index))
    }

    /// Records whose index falls in `low..=high`, in index order.
    pub fn range(&self, low: i64, high: i64) -> impl Iterator<Item = &MarkerRecord<M>> {
        let start = low.max(0);
        let end = high.min(self.max_index());
        let span = if start > end {
            0..0
        } else {
            start as usize..end as usize + 1
        };
        self.records[span].iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkerRecord<M>> {
        self.records.iter()
    }

    /// Resolve a list of indices to records, skipping indices that do not exist.
    pub fn resolve<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a MarkerRecord<M>> {
        indices.iter().filter_map(|&index| self.records.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};

    #[derive(Debug, Clone)]
    struct Stub {
        id: String,
        options: Map<String, Value>,
    }

    impl Stub {
        fn new(id: &str, time: Value) -> Self {
            let mut options = Map::new();
            options.insert("time".to_string(), time);
            Self {
                id: id.to_string(),
                options,
            }
        }
    }

    impl MarkerHandle for Stub {
        fn id(&self) -> &str {
            &self.id
        }

        fn layer_options(&self) -> Option<&Map<String, Value>> {
            Some(&self.options)
        }
    }

    #[test]
    fn test_indices_follow_insertion_order() {
        let index = MarkerIndex::from_layers(vec![
            Stub::new("a", json!("T0")),
            Stub::new("b", json!("T1")),
            Stub::new("c", json!("T2")),
        ]);

        assert_eq!(index.len(), 3);
        assert_eq!(index.max_index(), 2);
        let ids: Vec<_> = index.iter().map(|r| (r.index, r.payload.id.clone())).collect();
        assert_eq!(
            ids,
            vec![
                (0, "a".to_string()),
                (1, "b".to_string()),
                (2, "c".to_string())
            ]
        );
    }

    #[test]
    fn test_empty_source() {
        let index: MarkerIndex<Stub> = MarkerIndex::from_layers(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.max_index(), -1);
        assert!(index.get(0).is_none());
        assert_eq!(index.range(0, 10).count(), 0);
    }

    #[test]
    fn test_explicit_time_overrides_marker() {
        let index = MarkerIndex::build(MarkerSource::entries(vec![
            MarkerEntry::with_time(Stub::new("a", json!("marker")), "explicit"),
            MarkerEntry::new(Stub::new("b", json!("marker"))),
        ]));

        assert_eq!(
            index.get(0).unwrap().time_value("time"),
            Some(TimeValue::from("explicit"))
        );
        assert_eq!(
            index.get(1).unwrap().time_value("time"),
            Some(TimeValue::from("marker"))
        );
    }

    #[test]
    fn test_missing_time_is_not_a_build_error() {
        let index = MarkerIndex::from_layers(vec![Stub::new("a", Value::Null)]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(0).unwrap().time_value("time"), None);
        assert_eq!(index.get(0).unwrap().time_value("other"), None);
    }

    #[test]
    fn test_out_of_range_lookups() {
        let index = MarkerIndex::from_layers(vec![Stub::new("a", json!("T0"))]);
        assert!(index.get(-1).is_none());
        assert!(index.get(1).is_none());

        let clipped: Vec<_> = index.range(-5, 5).map(|r| r.index).collect();
        assert_eq!(clipped, vec![0]);
        assert_eq!(index.range(3, 1).count(), 0);
    }

    #[test]
    fn test_resolve_skips_missing() {
        let index = MarkerIndex::from_layers(vec![
            Stub::new("a", json!("T0")),
            Stub::new("b", json!("T1")),
        ]);
        let ids: Vec<_> = index.resolve(&[1, 7, 0]).map(|r| r.payload.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
