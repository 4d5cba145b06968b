use serde::{Deserialize, Serialize};
use usage_core::ResetDay;

pub const DEFAULT_OPACITY: f32 = 0.85;
pub const DEFAULT_WIDTH: u32 = 230;
pub const DEFAULT_HEIGHT: u32 = 52;

/// User preferences parsed from `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Weekday on which usage goes back to 0.
    pub reset_day: ResetDay,
    /// Window opacity while the pointer is elsewhere (0.0 – 1.0].
    pub opacity: f32,
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels (without menu or prompt).
    pub height: u32,
    /// Last top-left corner; `None` = place near the top-right of the screen.
    pub position_x: Option<i32>,
    pub position_y: Option<i32>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            reset_day:  ResetDay::Monday,
            opacity:    DEFAULT_OPACITY,
            width:      DEFAULT_WIDTH,
            height:     DEFAULT_HEIGHT,
            position_x: None,
            position_y: None,
        }
    }
}

impl WidgetConfig {
    /// Replace out-of-range values with their defaults.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !(self.opacity.is_finite() && self.opacity > 0.0 && self.opacity <= 1.0) {
            tracing::warn!("opacity {} out of range; using {DEFAULT_OPACITY}", self.opacity);
            self.opacity = DEFAULT_OPACITY;
        }
        if self.width == 0 {
            self.width = DEFAULT_WIDTH;
        }
        if self.height == 0 {
            self.height = DEFAULT_HEIGHT;
        }
        self
    }

    /// Saved window position, if both coordinates are known.
    pub fn position(&self) -> Option<(i32, i32)> {
        self.position_x.zip(self.position_y)
    }

    /// `true` when anything other than the window position differs.
    pub fn differs_ignoring_position(&self, other: &Self) -> bool {
        self.reset_day != other.reset_day
            || self.opacity != other.opacity
            || self.width != other.width
            || self.height != other.height
    }
}
