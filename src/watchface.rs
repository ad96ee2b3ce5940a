//! The watch face engine
//!
//! [`LedWatchFace`] owns every piece of mutable state: theme, tap handler,
//! tick scheduler, cached layout and ghost layer. A host adapter forwards
//! lifecycle callbacks, taps and timer wake-ups and paints the returned
//! frames. All time arguments are wall-clock epoch milliseconds.

use alloc::vec::Vec;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use crate::error::Result;
use crate::input::{MultiTap, MultiTapHandler};
use crate::system::{BatteryStatus, ClockSample, FaceConfig, HourSetting, TickScheduler};
use crate::theme::{FontAssets, PreferenceStore, ThemeState};
use crate::ui::format::DayNames;
use crate::ui::{
    compute_layout, DisplayGeometry, FontSet, Frame, FrameFields, FrameRenderer, LayoutInput,
    RenderState, TextMeasure, WatchFace, WatchFaceState,
};

/// Battery level shown in demo mode
const DEMO_BATTERY_PERCENT: i32 = 89;

/// Horizontal band of the face a tap lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    Top,
    Middle,
    Bottom,
}

/// Watch face engine driven by host callbacks
pub struct LedWatchFace<P, M> {
    config: FaceConfig,
    theme: ThemeState,
    store: P,
    measure: M,
    taps: MultiTapHandler<Region>,
    scheduler: TickScheduler,
    renderer: FrameRenderer,
    geometry: Option<DisplayGeometry>,
    layout: Option<RenderState>,
    ambient: bool,
    low_bit_ambient: bool,
    burn_in_protection: bool,
    visible: bool,
    demo: bool,
    hour_setting: HourSetting,
    locale_24_hour: bool,
    day_names: DayNames,
}

impl<P, M> LedWatchFace<P, M>
where
    P: PreferenceStore,
    M: TextMeasure + FontAssets,
{
    pub fn new(config: FaceConfig, store: P, measure: M) -> Self {
        let taps = MultiTapHandler::new(config.multi_tap_threshold_ms);
        let scheduler =
            TickScheduler::new(config.interactive_update_ms, config.ambient_refresh_ms());
        Self {
            config,
            theme: ThemeState::default(),
            store,
            measure,
            taps,
            scheduler,
            renderer: FrameRenderer::new(),
            geometry: None,
            layout: None,
            ambient: false,
            low_bit_ambient: false,
            burn_in_protection: false,
            visible: false,
            demo: false,
            hour_setting: HourSetting::Unset,
            locale_24_hour: false,
            day_names: DayNames::default(),
        }
    }

    /// Restore the persisted theme.
    pub fn on_create(&mut self) {
        self.theme = ThemeState::load(&self.store);
        self.taps.reopen();
        crate::info!("face created in {} mode", self.theme.mode());
        self.invalidate();
    }

    /// Cancel every pending callback. The face draws nothing afterwards
    /// until it is created again.
    pub fn on_destroy(&mut self) {
        self.taps.close();
        self.scheduler.stop();
        self.renderer.invalidate();
        self.layout = None;
        self.visible = false;
        crate::info!("face destroyed");
    }

    /// New surface size. Pending taps are dropped since their regions moved.
    pub fn on_surface_changed(
        &mut self,
        width: f32,
        height: f32,
        density: f32,
        round: bool,
    ) -> Result<()> {
        self.taps.cancel();
        let geometry = DisplayGeometry::new(width, height, density, round).inspect_err(|_| {
            crate::warn!("ignoring unusable surface {}x{}", width, height);
        })?;
        self.geometry = Some(geometry);
        self.invalidate();
        Ok(())
    }

    /// Device display capabilities.
    pub fn on_properties_changed(&mut self, low_bit_ambient: bool, burn_in_protection: bool) {
        self.low_bit_ambient = low_bit_ambient;
        self.burn_in_protection = burn_in_protection;
        self.invalidate();
    }

    pub fn on_visibility_changed(&mut self, visible: bool, now_ms: u64) {
        self.visible = visible;
        if !visible {
            self.taps.cancel();
        }
        self.scheduler.set_visible(visible, now_ms);
    }

    pub fn on_ambient_mode_changed(&mut self, ambient: bool, now_ms: u64) {
        if self.ambient != ambient {
            self.ambient = ambient;
            self.taps.cancel();
            self.invalidate();
        }
        self.scheduler.set_ambient(ambient, now_ms);
    }

    /// The wall clock jumped; wake-ups are rescheduled from `now_ms`.
    pub fn on_time_changed(&mut self, now_ms: u64) {
        self.taps.cancel();
        self.scheduler.resync(now_ms);
    }

    /// Host 12/24-hour setting.
    pub fn set_hour_setting(&mut self, setting: HourSetting) {
        if self.hour_setting != setting {
            self.hour_setting = setting;
            self.invalidate();
        }
    }

    /// Locale defaults: hour format when the setting is unset, and day names.
    pub fn set_locale(&mut self, is_24_hour: bool, day_names: DayNames) {
        self.locale_24_hour = is_24_hour;
        self.day_names = day_names;
        self.invalidate();
    }

    /// Region a tap at height `y` falls in.
    pub fn region_at(&self, y: f32) -> Region {
        if let Some(state) = &self.layout {
            return if y < state.top_middle_y {
                Region::Top
            } else if y > state.middle_bottom_y {
                Region::Bottom
            } else {
                Region::Middle
            };
        }
        match self.geometry {
            Some(geometry) if y < geometry.height / 3.0 => Region::Top,
            Some(geometry) if y > geometry.height * 2.0 / 3.0 => Region::Bottom,
            _ => Region::Middle,
        }
    }

    /// Record a tap. The gesture is resolved by [`Self::on_timer`] once the
    /// tap handler's deadline passes, or here if that deadline already went
    /// by without a timer call.
    pub fn on_tap(&mut self, _x: f32, y: f32, now_ms: u64) {
        let region = self.region_at(y);
        if let Some(tap) = self.taps.register_tap(region, now_ms) {
            self.on_multi_tap(tap);
        }
    }

    /// Handle every wake-up due at `now_ms`. Returns whether a redraw is
    /// pending.
    pub fn on_timer(&mut self, now_ms: u64) -> bool {
        if let Some(tap) = self.taps.poll(now_ms) {
            self.on_multi_tap(tap);
        }
        self.scheduler.on_timer(now_ms)
    }

    /// Earliest time [`Self::on_timer`] wants to be called.
    pub fn next_wake(&self) -> Option<u64> {
        match (self.scheduler.next_wake(), self.taps.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Consume the pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        self.scheduler.take_redraw()
    }

    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn is_demo(&self) -> bool {
        self.demo
    }

    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Burn-in protection as last reported by the host. The face draws the
    /// same either way; the flag is kept for hosts that shift or dim the
    /// output themselves.
    pub fn burn_in_protection(&self) -> bool {
        self.burn_in_protection
    }

    /// Hour format in effect; demo mode always shows 12 hours.
    pub fn is_24_hour(&self) -> bool {
        !self.demo && self.hour_setting.is_24_hour(self.locale_24_hour)
    }

    /// Current layout, computing it first if needed. `None` until a usable
    /// surface has been reported.
    pub fn layout(&mut self) -> Option<&RenderState> {
        self.ensure_layout();
        self.layout.as_ref()
    }

    /// Compose the frame for `sample`. Demo mode substitutes its frozen
    /// sample and battery level.
    pub fn draw(&mut self, sample: ClockSample, battery: BatteryStatus) -> Option<Frame> {
        self.ensure_layout();
        let (sample, battery_percent) = if self.demo {
            (ClockSample::demo(), Some(DEMO_BATTERY_PERCENT))
        } else {
            (sample, battery.percent())
        };
        let fields = FrameFields {
            sample,
            battery_percent,
            day_name: self.day_names.short_name(sample.weekday),
            is_24_hour: self.is_24_hour(),
        };
        let state = self.layout.as_ref()?;
        Some(self.renderer.render_frame(&fields, state, &self.config))
    }

    fn ensure_layout(&mut self) {
        if self.layout.is_some() {
            return;
        }
        let Some(geometry) = self.geometry else {
            return;
        };
        let mode = self.theme.mode();
        let fonts = FontSet::for_mode(mode).resolve(&mut self.measure);
        let input = LayoutInput {
            mode,
            accent: self.theme.accent(),
            geometry,
            ambient: self.ambient,
            low_bit_ambient: self.low_bit_ambient,
            demo: self.demo,
            edge_padding_dp: self.config.edge_padding_dp,
            fonts,
        };
        self.layout = Some(compute_layout(&input, &self.measure));
    }

    fn on_multi_tap(&mut self, tap: MultiTap<Region>) {
        crate::debug!("multi-tap {:?} x{}", tap.region, tap.count);
        match (tap.region, tap.count) {
            (Region::Middle, 2) => {
                self.theme.advance_accent_color();
            }
            (Region::Middle, 3) => {
                self.theme.advance_theme_mode();
            }
            (Region::Middle, 4) if self.config.demo_allowed => {
                self.demo = !self.demo;
                crate::info!("demo mode {}", if self.demo { "on" } else { "off" });
            }
            _ => return,
        }
        if let Err(err) = self.theme.save(&mut self.store) {
            crate::warn!("could not save theme: {}", err);
        }
        self.invalidate();
    }

    /// Drop the cached layout and ghost layer and ask for a redraw.
    fn invalidate(&mut self) {
        self.layout = None;
        self.renderer.invalidate();
        self.scheduler.invalidate();
    }
}

impl<P, M> WatchFace for LedWatchFace<P, M>
where
    P: PreferenceStore,
    M: TextMeasure + FontAssets,
{
    fn update(&mut self, state: WatchFaceState) -> Frame {
        let sample = ClockSample::from_datetime(&state.time);
        self.draw(sample, state.battery).unwrap_or_else(|| Frame {
            background: Rgb888::BLACK,
            ghost: None,
            text: Vec::new(),
        })
    }
}
