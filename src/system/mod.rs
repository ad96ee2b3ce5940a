pub mod battery;
pub mod config;
pub mod scheduler;
pub mod time;

pub use battery::BatteryStatus;
pub use config::FaceConfig;
pub use scheduler::{TickMode, TickScheduler};
pub use time::{ClockSample, HourSetting, TimeManager, TimeReference};
