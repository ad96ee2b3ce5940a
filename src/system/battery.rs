//! Battery status
//!
//! The host reports a raw level and the scale it is measured against; the
//! percentage is derived here so a bad reading can never divide by zero.

/// Raw battery reading as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryStatus {
    /// Charge level in units of `scale`
    level: i32,
    /// Full-charge level
    scale: i32,
}

impl Default for BatteryStatus {
    fn default() -> Self {
        Self::unavailable()
    }
}

impl BatteryStatus {
    pub fn new(level: i32, scale: i32) -> Self {
        Self { level, scale }
    }

    /// Reading used when the host could not query the battery.
    pub fn unavailable() -> Self {
        Self { level: -1, scale: -1 }
    }

    /// Shorthand for a reading already in percent.
    pub fn from_percent(percent: i32) -> Self {
        Self::new(percent, 100)
    }

    /// `round(level * 100 / scale)`, or `None` without a usable reading.
    ///
    /// The result is not clamped; values above 100 indicate a bad sensor
    /// read and are rendered as an error.
    pub fn percent(&self) -> Option<i32> {
        if self.scale <= 0 || self.level < 0 {
            return None;
        }
        let level = i64::from(self.level) * 100;
        let scale = i64::from(self.scale);
        i32::try_from((2 * level + scale) / (2 * scale)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest() {
        assert_eq!(BatteryStatus::new(89, 100).percent(), Some(89));
        assert_eq!(BatteryStatus::new(1, 3).percent(), Some(33));
        assert_eq!(BatteryStatus::new(2, 3).percent(), Some(67));
        assert_eq!(BatteryStatus::new(255, 255).percent(), Some(100));
    }

    #[test]
    fn missing_scale_is_unavailable() {
        assert_eq!(BatteryStatus::new(50, 0).percent(), None);
        assert_eq!(BatteryStatus::new(-1, 100).percent(), None);
        assert_eq!(BatteryStatus::unavailable().percent(), None);
        assert_eq!(BatteryStatus::default().percent(), None);
    }

    #[test]
    fn overfull_reading_is_not_clamped() {
        assert_eq!(BatteryStatus::new(120, 100).percent(), Some(120));
    }
}
