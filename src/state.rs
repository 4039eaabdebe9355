//! Controller state: the immutable snapshot a selection is computed from.
//!
//! A state is created when a control is mounted and replaced, never mutated,
//! on every slide.

use crate::config::SliderConfig;
use slidemap_types::{DisplayMode, SliderPosition};

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    pub mode: DisplayMode,
    pub min_value: i64,
    pub max_value: i64,
    pub step: i64,
    pub position: SliderPosition,
    pub time_attribute: String,
    pub rezoom_level: Option<u8>,
    pub show_popups: bool,
}

impl ControllerState {
    /// A state over `min_value..=max_value` with default settings.
    pub fn new(
        mode: DisplayMode,
        min_value: i64,
        max_value: i64,
        position: SliderPosition,
    ) -> Self {
        let state = Self {
            mode,
            min_value,
            max_value,
            step: SliderConfig::DEFAULT_STEP,
            position: SliderPosition::Single(min_value),
            time_attribute: SliderConfig::DEFAULT_TIME_ATTRIBUTE.to_string(),
            rezoom_level: None,
            show_popups: true,
        };
        let position = state.normalize(position);
        Self { position, ..state }
    }

    /// Derive the initial state for a mounted control.
    ///
    /// `index_len` is the number of markers in the built index. When
    /// `from_collection` is set the bounds always come from the index;
    /// otherwise configured bounds are kept and only missing ones derived.
    pub fn from_config(config: &SliderConfig, index_len: usize, from_collection: bool) -> Self {
        let derived_max = index_len as i64 - 1;
        let (min_value, max_value) = if from_collection {
            (0, derived_max)
        } else {
            (
                config.min_value.unwrap_or(0),
                config.max_value.unwrap_or(derived_max),
            )
        };
        let mode = config.display_mode();

        let position = if config.show_all_on_start {
            if mode.is_range() {
                SliderPosition::Range(min_value, max_value)
            } else {
                SliderPosition::Single(max_value)
            }
        } else {
            config
                .configured_position()
                .unwrap_or(if mode.is_range() {
                    SliderPosition::Range(min_value, max_value)
                } else {
                    SliderPosition::Single(min_value)
                })
        };

        let state = Self {
            mode,
            min_value,
            max_value,
            step: config.effective_step(),
            position,
            time_attribute: config.time_attribute.clone(),
            rezoom_level: config.rezoom_level,
            show_popups: config.show_popups,
        };
        let position = state.normalize(state.position);
        Self { position, ..state }
    }

    /// A new state at `position`, normalized for this state's mode and step.
    pub fn with_position(&self, position: SliderPosition) -> Self {
        Self {
            position: self.normalize(position),
            ..self.clone()
        }
    }

    /// Shape a raw widget position for the active mode and snap it to the step.
    ///
    /// Range controls take a pair (a lone handle becomes `[min, handle]`),
    /// other controls take the upper handle of a pair. Inverted pairs are
    /// swapped. Bounds are left to the widget and not re-clamped here.
    pub fn normalize(&self, position: SliderPosition) -> SliderPosition {
        let shaped = match (self.mode.is_range(), position) {
            (true, SliderPosition::Single(high)) => SliderPosition::Range(self.min_value, high),
            (false, SliderPosition::Range(_, high)) => SliderPosition::Single(high),
            (_, position) => position,
        };

        let snapped = shaped.map(|value| self.snap(value));
        if let SliderPosition::Range(low, high) = snapped
            && low > high
        {
            log::warn!("Range handles out of order ({}, {}), swapping", low, high);
        }
        snapped.normalized()
    }

    /// Snap `value` to the nearest multiple of the step counted from `min_value`.
    fn snap(&self, value: i64) -> i64 {
        let step = self.step.max(1);
        if step == 1 {
            return value;
        }

        let offset = value.saturating_sub(self.min_value);
        let mut steps = offset.div_euclid(step);
        if offset.rem_euclid(step) * 2 >= step {
            steps += 1;
        }
        self.min_value.saturating_add(steps.saturating_mul(step))
    }

    /// The handle whose record provides the timestamp.
    pub fn anchor(&self) -> i64 {
        self.position.anchor()
    }

    /// `min_value > max_value`: the index holds no markers.
    pub fn is_empty_range(&self) -> bool {
        self.min_value > self.max_value
    }
}
