//! Async driver
//!
//! Runs a [`LedWatchFace`] on an embassy executor. Host callbacks arrive as
//! [`HostEvent`]s on a channel; the face's own wake-ups become
//! `embassy-time` timers raced against the channel.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::{Duration, Instant, Timer};

use crate::system::{BatteryStatus, HourSetting, TimeManager, TimeReference};
use crate::theme::{FontAssets, PreferenceStore};
use crate::ui::{Frame, TextMeasure};
use crate::LedWatchFace;

/// Callback delivered by the host platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    SurfaceChanged {
        width: f32,
        height: f32,
        density: f32,
        round: bool,
    },
    PropertiesChanged {
        low_bit_ambient: bool,
        burn_in_protection: bool,
    },
    VisibilityChanged(bool),
    AmbientModeChanged(bool),
    Tap {
        x: f32,
        y: f32,
    },
    /// Wall-clock reference, e.g. from a phone sync
    TimeSet(TimeReference),
    UtcOffset(i32),
    HourSetting(HourSetting),
    Battery(BatteryStatus),
    Destroy,
}

/// Drive `face` until a [`HostEvent::Destroy`] arrives, handing every frame
/// to `paint`.
pub async fn run<P, M, R, F, const N: usize>(
    face: &mut LedWatchFace<P, M>,
    events: Receiver<'_, R, HostEvent, N>,
    time: &mut TimeManager,
    mut paint: F,
) where
    P: PreferenceStore,
    M: TextMeasure + FontAssets,
    R: RawMutex,
    F: FnMut(&Frame),
{
    let mut battery = BatteryStatus::unavailable();
    face.on_create();

    loop {
        let uptime = Instant::now().as_millis();
        let now = time.local_millis(uptime);

        let event = match face.next_wake() {
            Some(at) => {
                let wait = Duration::from_millis(at.saturating_sub(now));
                match select(events.receive(), Timer::after(wait)).await {
                    Either::First(event) => Some(event),
                    Either::Second(()) => None,
                }
            }
            None => Some(events.receive().await),
        };

        let uptime = Instant::now().as_millis();
        let now = time.local_millis(uptime);
        match event {
            Some(HostEvent::SurfaceChanged {
                width,
                height,
                density,
                round,
            }) => {
                // Already logged; keep the previous surface
                face.on_surface_changed(width, height, density, round).ok();
            }
            Some(HostEvent::PropertiesChanged {
                low_bit_ambient,
                burn_in_protection,
            }) => face.on_properties_changed(low_bit_ambient, burn_in_protection),
            Some(HostEvent::VisibilityChanged(visible)) => face.on_visibility_changed(visible, now),
            Some(HostEvent::AmbientModeChanged(ambient)) => {
                face.on_ambient_mode_changed(ambient, now)
            }
            Some(HostEvent::Tap { x, y }) => face.on_tap(x, y, now),
            Some(HostEvent::TimeSet(reference)) => {
                time.set_time(reference);
                face.on_time_changed(time.local_millis(uptime));
            }
            Some(HostEvent::UtcOffset(secs)) => {
                time.set_utc_offset(secs);
                face.on_time_changed(time.local_millis(uptime));
            }
            Some(HostEvent::HourSetting(setting)) => face.set_hour_setting(setting),
            Some(HostEvent::Battery(status)) => battery = status,
            Some(HostEvent::Destroy) => {
                face.on_destroy();
                return;
            }
            None => {}
        }
        // The channel wins ties with the timer, so due wake-ups run here
        face.on_timer(time.local_millis(uptime));

        if face.take_redraw() {
            if let Some(frame) = face.draw(time.sample(uptime), battery) {
                paint(&frame);
            }
        }
    }
}
