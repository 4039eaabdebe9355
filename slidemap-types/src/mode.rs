use serde::{Deserialize, Serialize};

/// How a slider position maps to the set of visible markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DisplayMode {
    /// Everything from the first index up to the handle
    #[default]
    Cumulative,
    /// Everything between the two handles, inclusive
    Range,
    /// A trailing window of `window` indices ending at the handle
    Follow { window: usize },
    /// Every marker whose time value equals the one under the handle
    SameDate,
}

impl DisplayMode {
    /// Whether this mode is driven by a two-handle slider.
    pub fn is_range(&self) -> bool {
        matches!(self, DisplayMode::Range)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DisplayMode::Cumulative => "cumulative",
            DisplayMode::Range => "range",
            DisplayMode::Follow { .. } => "follow",
            DisplayMode::SameDate => "same_date",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_tagged() {
        let json = serde_json::to_string(&DisplayMode::Follow { window: 3 }).unwrap();
        assert_eq!(json, r#"{"kind":"follow","window":3}"#);

        let mode: DisplayMode = serde_json::from_str(r#"{"kind":"same_date"}"#).unwrap();
        assert_eq!(mode, DisplayMode::SameDate);
    }

    #[test]
    fn test_default_is_cumulative() {
        assert_eq!(DisplayMode::default(), DisplayMode::Cumulative);
        assert!(!DisplayMode::default().is_range());
        assert!(DisplayMode::Range.is_range());
    }
}
