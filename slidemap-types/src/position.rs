use serde::{Deserialize, Serialize};

/// Position of a slider: one handle, or a `[low, high]` handle pair.
///
/// Serializes as a bare integer or a two-element array, matching the
/// `value` / `values` options of a slider widget.
///
/// # Examples
///
/// ```
/// use slidemap_types::position::SliderPosition;
///
/// let single: SliderPosition = serde_json::from_str("4").unwrap();
/// assert_eq!(single, SliderPosition::Single(4));
///
/// let pair: SliderPosition = serde_json::from_str("[2, 5]").unwrap();
/// assert_eq!(pair.bounds(), (2, 5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SliderPosition {
    /// A single handle
    Single(i64),
    /// Two handles, low then high
    Range(i64, i64),
}

impl SliderPosition {
    /// The handle that selects the timestamp: the value itself, or the upper
    /// handle of a pair.
    pub fn anchor(&self) -> i64 {
        match *self {
            SliderPosition::Single(value) => value,
            SliderPosition::Range(_, high) => high,
        }
    }

    /// The `(low, high)` pair. A single handle yields `(value, value)`.
    pub fn bounds(&self) -> (i64, i64) {
        match *self {
            SliderPosition::Single(value) => (value, value),
            SliderPosition::Range(low, high) => (low, high),
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, SliderPosition::Range(..))
    }

    /// Swap the handles of a pair whose low handle is above its high handle.
    pub fn normalized(self) -> Self {
        match self {
            SliderPosition::Range(low, high) if low > high => SliderPosition::Range(high, low),
            other => other,
        }
    }

    /// Apply `f` to every handle.
    pub fn map(self, mut f: impl FnMut(i64) -> i64) -> Self {
        match self {
            SliderPosition::Single(value) => SliderPosition::Single(f(value)),
            SliderPosition::Range(low, high) => SliderPosition::Range(f(low), f(high)),
        }
    }
}

impl From<i64> for SliderPosition {
    fn from(value: i64) -> Self {
        SliderPosition::Single(value)
    }
}

impl From<[i64; 2]> for SliderPosition {
    fn from(values: [i64; 2]) -> Self {
        SliderPosition::Range(values[0], values[1])
    }
}

impl From<(i64, i64)> for SliderPosition {
    fn from((low, high): (i64, i64)) -> Self {
        SliderPosition::Range(low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_is_upper_handle() {
        assert_eq!(SliderPosition::Single(3).anchor(), 3);
        assert_eq!(SliderPosition::Range(1, 7).anchor(), 7);
    }

    #[test]
    fn test_normalized_swaps_inverted_pair() {
        assert_eq!(
            SliderPosition::Range(9, 4).normalized(),
            SliderPosition::Range(4, 9)
        );
        assert_eq!(
            SliderPosition::Range(4, 4).normalized(),
            SliderPosition::Range(4, 4)
        );
        assert_eq!(
            SliderPosition::Single(-1).normalized(),
            SliderPosition::Single(-1)
        );
    }

    #[test]
    fn test_map_touches_every_handle() {
        let doubled = SliderPosition::Range(1, 2).map(|v| v * 2);
        assert_eq!(doubled, SliderPosition::Range(2, 4));
    }
}
