//! Time keeping
//!
//! [`TimeManager`] turns a reference wall-clock time plus elapsed uptime into
//! local time for hosts without a calendar clock. [`ClockSample`] is the set
//! of calendar fields one frame is rendered from.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};

/// Wall-clock time paired with the uptime it was observed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeReference {
    /// Clock time (UTC)
    time: NaiveDateTime,
    /// Uptime in milliseconds when `time` was observed
    uptime_ms: u64,
}

impl TimeReference {
    pub fn new(time: NaiveDateTime, uptime_ms: u64) -> Self {
        Self { time, uptime_ms }
    }

    /// Create a reference from milliseconds since the Unix epoch.
    pub fn from_unix_millis(epoch_ms: i64, uptime_ms: u64) -> Option<Self> {
        let time = DateTime::from_timestamp_millis(epoch_ms)?.naive_utc();
        Some(Self { time, uptime_ms })
    }
}

pub struct TimeManager {
    reference: TimeReference,
    /// Local offset from UTC in seconds
    utc_offset_secs: i32,
}

impl TimeManager {
    /// Start at the epoch until a reference arrives.
    pub fn init() -> Self {
        Self {
            reference: TimeReference::default(),
            utc_offset_secs: 0,
        }
    }

    /// Update time reference
    pub fn set_time(&mut self, reference: TimeReference) {
        self.reference = reference;
    }

    pub fn set_utc_offset(&mut self, secs: i32) {
        self.utc_offset_secs = secs;
    }

    /// Local time at `uptime_ms`.
    pub fn get_time(&self, uptime_ms: u64) -> NaiveDateTime {
        let elapsed = uptime_ms.saturating_sub(self.reference.uptime_ms);
        let delta = i64::try_from(elapsed)
            .ok()
            .and_then(Duration::try_milliseconds)
            .and_then(|elapsed| {
                Duration::try_seconds(i64::from(self.utc_offset_secs)).map(|offset| elapsed + offset)
            });
        delta
            .and_then(|delta| self.reference.time.checked_add_signed(delta))
            .unwrap_or(self.reference.time)
    }

    /// Local wall-clock milliseconds at `uptime_ms`, counted from the epoch.
    pub fn local_millis(&self, uptime_ms: u64) -> u64 {
        let millis = self.get_time(uptime_ms).and_utc().timestamp_millis();
        u64::try_from(millis).unwrap_or(0)
    }

    /// Calendar fields at `uptime_ms`.
    pub fn sample(&self, uptime_ms: u64) -> ClockSample {
        ClockSample::from_datetime(&self.get_time(uptime_ms))
    }
}

/// User's 12/24-hour preference, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HourSetting {
    H12,
    H24,
    /// Not set; the locale decides
    #[default]
    Unset,
}

impl HourSetting {
    /// Whether to show 24-hour time, falling back to the locale default.
    pub fn is_24_hour(self, locale_default: bool) -> bool {
        match self {
            HourSetting::H12 => false,
            HourSetting::H24 => true,
            HourSetting::Unset => locale_default,
        }
    }
}

/// Calendar fields of one rendered instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSample {
    /// 0..=23
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// Millisecond within the second, drives the colon blink
    pub millisecond: u32,
    pub weekday: Weekday,
    pub day_of_month: u32,
}

impl ClockSample {
    pub fn from_datetime(time: &NaiveDateTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            // Leap seconds report nanos past one second
            millisecond: (time.nanosecond() / 1_000_000).min(999),
            weekday: time.weekday(),
            day_of_month: time.day(),
        }
    }

    /// Frozen instant shown in demo mode: Sunday 2013-06-30 10:58:50.
    pub fn demo() -> Self {
        let time = NaiveDate::from_ymd_opt(2013, 6, 30)
            .and_then(|date| date.and_hms_opt(10, 58, 50))
            .unwrap_or_default();
        Self::from_datetime(&time)
    }

    /// 1..=12
    pub fn hour12(&self) -> u32 {
        match self.hour % 12 {
            0 => 12,
            hour => hour,
        }
    }

    pub fn is_pm(&self) -> bool {
        self.hour >= 12
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 3)
            .unwrap()
            .and_hms_milli_opt(h, m, s, ms)
            .unwrap()
    }

    #[test]
    fn demo_sample() {
        let demo = ClockSample::demo();
        assert_eq!((demo.hour, demo.minute, demo.second), (10, 58, 50));
        assert_eq!(demo.millisecond, 0);
        assert_eq!(demo.weekday, Weekday::Sun);
        assert_eq!(demo.day_of_month, 30);
        assert!(!demo.is_pm());
    }

    #[test]
    fn twelve_hour_clock() {
        let midnight = ClockSample::from_datetime(&at(0, 5, 0, 0));
        assert_eq!(midnight.hour12(), 12);
        assert!(!midnight.is_pm());

        let noon = ClockSample::from_datetime(&at(12, 0, 0, 0));
        assert_eq!(noon.hour12(), 12);
        assert!(noon.is_pm());

        let evening = ClockSample::from_datetime(&at(21, 30, 0, 0));
        assert_eq!(evening.hour12(), 9);
    }

    #[test]
    fn manager_advances_with_uptime() {
        let mut manager = TimeManager::init();
        manager.set_time(TimeReference::new(at(10, 0, 0, 0), 5_000));
        assert_eq!(manager.get_time(5_000), at(10, 0, 0, 0));
        assert_eq!(manager.get_time(6_250), at(10, 0, 1, 250));

        manager.set_utc_offset(3_600);
        let sample = manager.sample(6_250);
        assert_eq!((sample.hour, sample.second, sample.millisecond), (11, 1, 250));
    }

    #[test]
    fn uptime_before_reference_is_clamped() {
        let mut manager = TimeManager::init();
        manager.set_time(TimeReference::new(at(10, 0, 0, 0), 5_000));
        assert_eq!(manager.get_time(0), at(10, 0, 0, 0));
    }

    #[test]
    fn unix_millis_reference() {
        let reference = TimeReference::from_unix_millis(1_372_589_930_000, 0).unwrap();
        let mut manager = TimeManager::init();
        manager.set_time(reference);
        let sample = manager.sample(0);
        assert_eq!((sample.hour, sample.minute, sample.second), (10, 58, 50));
        assert_eq!(sample.day_of_month, 30);
        assert_eq!(manager.local_millis(1_500), 1_372_589_931_500);
    }

    #[test]
    fn hour_setting_falls_back_to_locale() {
        assert!(HourSetting::H24.is_24_hour(false));
        assert!(!HourSetting::H12.is_24_hour(true));
        assert!(HourSetting::Unset.is_24_hour(true));
        assert!(!HourSetting::Unset.is_24_hour(false));
    }
}
