//! Slider configuration
//!
//! `SliderConfig` carries the options a host passes when creating a control.
//! It is serializable and can be loaded from JSON (or TOML with the `toml`
//! feature) using the same option names a browser slider control accepts.
use crate::error::{Result, SlideError};
use serde::{Deserialize, Serialize};
use slidemap_types::{DisplayMode, SliderPosition};

/// Options recognized by the slider control.
///
/// The display mode is derived from the `range`, `follow` and `sameDate`
/// flags. When more than one is set the precedence is
/// Range > Follow > SameDate > Cumulative.
///
/// # Example
///
/// ```rust
/// use slidemap::{DisplayMode, SliderConfig};
///
/// let json = r#"{
///     "follow": true,
///     "followWindowSize": 3,
///     "timeAttribute": "when",
///     "rezoomLevel": 12
/// }"#;
/// let config = SliderConfig::from_json_str(json).unwrap();
///
/// assert_eq!(config.display_mode(), DisplayMode::Follow { window: 3 });
/// assert_eq!(config.time_attribute, "when");
/// assert!(config.show_popups);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SliderConfig {
    /// Two-handle slider showing everything between the handles
    pub range: bool,

    /// Show a trailing window of `follow_window_size` markers
    pub follow: bool,

    /// Width of the follow window, must be greater than zero
    pub follow_window_size: Option<usize>,

    /// Show every marker sharing the time value under the handle
    pub same_date: bool,

    /// Lowest slider index (derived from the markers when unset)
    pub min_value: Option<i64>,

    /// Highest slider index (derived from the markers when unset)
    pub max_value: Option<i64>,

    /// Initial handle for a single-handle slider
    pub value: Option<i64>,

    /// Initial handles for a range slider
    pub values: Option<[i64; 2]>,

    /// Slider granularity. Zero behaves as one.
    pub step: i64,

    /// Key used to read a time value off a marker
    pub time_attribute: String,

    /// Start with every marker visible
    pub show_all_on_start: bool,

    /// Maximum zoom used when refitting the viewport. `None` (or 0) disables refits.
    pub rezoom_level: Option<u8>,

    /// Open the popups of visible markers after each slide
    pub show_popups: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            range: false,
            follow: false,
            follow_window_size: None,
            same_date: false,
            min_value: None,
            max_value: None,
            value: None,
            values: None,
            step: Self::DEFAULT_STEP,
            time_attribute: Self::DEFAULT_TIME_ATTRIBUTE.to_string(),
            show_all_on_start: false,
            rezoom_level: None,
            show_popups: true,
        }
    }
}

impl SliderConfig {
    pub const DEFAULT_STEP: i64 = 1;
    pub const DEFAULT_TIME_ATTRIBUTE: &'static str = "time";

    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SlideError::InvalidConfig(format!("Failed to parse JSON config: {}", e)))
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source)
            .map_err(|e| SlideError::InvalidConfig(format!("Failed to parse TOML config: {}", e)))
    }

    pub fn with_range(mut self, range: bool) -> Self {
        self.range = range;
        self
    }

    /// Enable follow mode with the given trailing window.
    pub fn with_follow(mut self, window: usize) -> Self {
        self.follow = true;
        self.follow_window_size = Some(window);
        self
    }

    pub fn with_same_date(mut self, same_date: bool) -> Self {
        self.same_date = same_date;
        self
    }

    /// Fix the slider bounds instead of deriving them from the markers.
    pub fn with_bounds(mut self, min_value: i64, max_value: i64) -> Self {
        self.min_value = Some(min_value);
        self.max_value = Some(max_value);
        self
    }

    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_values(mut self, low: i64, high: i64) -> Self {
        self.values = Some([low, high]);
        self
    }

    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }

    pub fn with_time_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.time_attribute = attribute.into();
        self
    }

    pub fn with_show_all_on_start(mut self, show_all: bool) -> Self {
        self.show_all_on_start = show_all;
        self
    }

    pub fn with_rezoom(mut self, max_zoom: u8) -> Self {
        self.rezoom_level = Some(max_zoom);
        self
    }

    pub fn with_show_popups(mut self, show_popups: bool) -> Self {
        self.show_popups = show_popups;
        self
    }

    /// Derive the display mode from the flags.
    ///
    /// A follow window of zero (or a missing one) is clamped to one.
    pub fn display_mode(&self) -> DisplayMode {
        if self.range {
            DisplayMode::Range
        } else if self.follow {
            let window = self.follow_window_size.unwrap_or(0);
            if window == 0 {
                log::warn!("Follow mode configured without a positive window size, using 1");
            }
            DisplayMode::Follow {
                window: window.max(1),
            }
        } else if self.same_date {
            DisplayMode::SameDate
        } else {
            DisplayMode::Cumulative
        }
    }

    /// Effective slider step. A step below one behaves as one.
    pub fn effective_step(&self) -> i64 {
        self.step.max(1)
    }

    /// The configured initial position, before bounds are known.
    pub fn configured_position(&self) -> Option<SliderPosition> {
        if self.range {
            self.values
                .map(SliderPosition::from)
                .or_else(|| self.value.map(SliderPosition::Single))
        } else {
            self.value
                .map(SliderPosition::Single)
                .or_else(|| self.values.map(|[_, high]| SliderPosition::Single(high)))
        }
    }

    /// Report precondition problems.
    ///
    /// The controller clamps or swaps these at runtime, so validation is
    /// advisory: hosts that want strict configs can reject them up front.
    pub fn validate(&self) -> Result<()> {
        if self.follow && self.follow_window_size.unwrap_or(0) == 0 {
            return Err(SlideError::PreconditionViolation(
                "Follow window size must be greater than zero".to_string(),
            ));
        }

        if let Some([low, high]) = self.values
            && low > high
        {
            return Err(SlideError::PreconditionViolation(format!(
                "Range values out of order: [{}, {}]",
                low, high
            )));
        }

        if let (Some(min), Some(max)) = (self.min_value, self.max_value)
            && min > max.saturating_add(1)
        {
            return Err(SlideError::PreconditionViolation(format!(
                "minValue {} is above maxValue {}",
                min, max
            )));
        }

        if self.step < 1 {
            return Err(SlideError::PreconditionViolation(format!(
                "Step must be at least 1, got: {}",
                self.step
            )));
        }

        if self.time_attribute.is_empty() {
            return Err(SlideError::InvalidConfig(
                "Time attribute must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
