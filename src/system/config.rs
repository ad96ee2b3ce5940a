//! Face configuration

use serde::{Deserialize, Serialize};

/// Switches fixed for the lifetime of a face
///
/// Every field has a default, so a partial document deserialises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceConfig {
    /// Hide the colon for the last 600ms of every second
    pub blinking_colon: bool,
    pub show_day_of_week: bool,
    pub show_day_of_month: bool,
    pub show_battery_level: bool,
    pub show_seconds: bool,
    /// Show a full battery as "100" instead of "100%"
    pub hundred_sans_percent: bool,
    /// Horizontal padding on each side of the time, in dp
    pub edge_padding_dp: u32,
    /// Interactive redraw period
    pub interactive_update_ms: u64,
    /// Ambient refresh period
    pub ambient_refresh_secs: u64,
    /// Quiet window that closes a multi-tap gesture
    pub multi_tap_threshold_ms: u64,
    /// Allow the four-tap demo toggle
    pub demo_allowed: bool,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            blinking_colon: true,
            show_day_of_week: true,
            show_day_of_month: true,
            show_battery_level: true,
            show_seconds: true,
            hundred_sans_percent: false,
            edge_padding_dp: 4,
            interactive_update_ms: 500,
            ambient_refresh_secs: 10,
            multi_tap_threshold_ms: 500,
            demo_allowed: false,
        }
    }
}

impl FaceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ambient_refresh_ms(&self) -> u64 {
        self.ambient_refresh_secs.saturating_mul(1000)
    }
}
