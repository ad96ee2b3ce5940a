//! Redraw scheduling
//!
//! Two independent wake-ups: a phase-aligned interactive tick while the face
//! is visible and not ambient, and a coarse ambient refresh while ambient.
//! Redraw requests are tracked separately from both, so a theme or geometry
//! change gets one immediate frame whatever the schedule.

/// Scheduler state derived from visibility and ambient mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickMode {
    Stopped,
    Interactive,
    Ambient,
}

impl TickMode {
    pub fn name(self) -> &'static str {
        match self {
            TickMode::Stopped => "stopped",
            TickMode::Interactive => "interactive",
            TickMode::Ambient => "ambient",
        }
    }
}

/// Delay until the next multiple of `period_ms` strictly after `now_ms`.
pub fn aligned_delay(now_ms: u64, period_ms: u64) -> u64 {
    let period = period_ms.max(1);
    period - now_ms % period
}

pub struct TickScheduler {
    interactive_period_ms: u64,
    ambient_period_ms: u64,
    visible: bool,
    ambient: bool,
    next_tick: Option<u64>,
    next_ambient_refresh: Option<u64>,
    redraw: bool,
}

impl TickScheduler {
    pub fn new(interactive_period_ms: u64, ambient_period_ms: u64) -> Self {
        Self {
            interactive_period_ms,
            ambient_period_ms,
            visible: false,
            ambient: false,
            next_tick: None,
            next_ambient_refresh: None,
            redraw: false,
        }
    }

    pub fn mode(&self) -> TickMode {
        if self.ambient {
            TickMode::Ambient
        } else if self.visible {
            TickMode::Interactive
        } else {
            TickMode::Stopped
        }
    }

    /// Interactive ticks run only while visible and not ambient.
    pub fn should_run(&self) -> bool {
        self.visible && !self.ambient
    }

    pub fn set_visible(&mut self, visible: bool, now_ms: u64) {
        if visible {
            self.redraw = true;
        }
        self.visible = visible;
        self.reschedule(now_ms);
    }

    pub fn set_ambient(&mut self, ambient: bool, now_ms: u64) {
        if ambient != self.ambient {
            self.redraw = true;
        }
        self.ambient = ambient;
        self.reschedule(now_ms);
    }

    /// Cancel every pending wake-up and return to idle. Repeated calls are
    /// no-ops.
    pub fn stop(&mut self) {
        self.visible = false;
        self.ambient = false;
        self.next_tick = None;
        self.next_ambient_refresh = None;
    }

    /// Recompute every wake-up from `now_ms`, e.g. after the wall clock
    /// jumped.
    pub fn resync(&mut self, now_ms: u64) {
        self.next_ambient_refresh = None;
        self.redraw = true;
        self.reschedule(now_ms);
    }

    /// Ask for one redraw as soon as possible.
    pub fn invalidate(&mut self) {
        self.redraw = true;
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw
    }

    /// Consume the pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.redraw)
    }

    pub fn next_tick(&self) -> Option<u64> {
        self.next_tick
    }

    pub fn next_ambient_refresh(&self) -> Option<u64> {
        self.next_ambient_refresh
    }

    /// Earliest pending wake-up.
    pub fn next_wake(&self) -> Option<u64> {
        match (self.next_tick, self.next_ambient_refresh) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire whichever wake-ups are due at `now_ms` and schedule their
    /// successors. Returns whether a redraw is now pending.
    pub fn on_timer(&mut self, now_ms: u64) -> bool {
        if self.next_tick.is_some_and(|at| at <= now_ms) {
            self.redraw = true;
            self.next_tick = self
                .should_run()
                .then(|| now_ms + aligned_delay(now_ms, self.interactive_period_ms));
        }
        if self.next_ambient_refresh.is_some_and(|at| at <= now_ms) {
            self.redraw = true;
            self.next_ambient_refresh = self
                .ambient
                .then(|| now_ms + aligned_delay(now_ms, self.ambient_period_ms));
        }
        self.redraw
    }

    fn reschedule(&mut self, now_ms: u64) {
        // Interactive: tick now, then align
        self.next_tick = if self.should_run() {
            self.redraw = true;
            Some(now_ms + aligned_delay(now_ms, self.interactive_period_ms))
        } else {
            None
        };
        self.next_ambient_refresh = match (self.ambient, self.next_ambient_refresh) {
            (true, Some(at)) => Some(at),
            (true, None) => Some(now_ms + aligned_delay(now_ms, self.ambient_period_ms)),
            (false, _) => None,
        };
        crate::debug!("tick scheduler {}", self.mode().name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> TickScheduler {
        TickScheduler::new(500, 10_000)
    }

    #[test]
    fn aligned_delays() {
        assert_eq!(aligned_delay(1_000, 500), 500);
        assert_eq!(aligned_delay(1_120, 500), 380);
        assert_eq!(aligned_delay(1_499, 500), 1);
        assert_eq!(aligned_delay(12_345, 10_000), 7_655);
    }

    #[test]
    fn visible_interactive_ticks_on_half_seconds() {
        let mut s = scheduler();
        assert_eq!(s.mode(), TickMode::Stopped);
        s.set_visible(true, 1_120);
        assert_eq!(s.mode(), TickMode::Interactive);
        assert!(s.take_redraw());
        assert_eq!(s.next_wake(), Some(1_500));

        assert!(!s.on_timer(1_499));
        assert!(s.on_timer(1_500));
        assert!(s.take_redraw());
        assert_eq!(s.next_tick(), Some(2_000));

        // Late delivery realigns instead of drifting
        s.on_timer(2_130);
        assert_eq!(s.next_tick(), Some(2_500));
    }

    #[test]
    fn hidden_face_does_not_tick() {
        let mut s = scheduler();
        s.set_visible(true, 0);
        s.set_visible(false, 10);
        assert_eq!(s.next_wake(), None);
        assert_eq!(s.mode(), TickMode::Stopped);
    }

    #[test]
    fn ambient_swaps_tick_for_refresh() {
        let mut s = scheduler();
        s.set_visible(true, 3_000);
        s.take_redraw();
        s.set_ambient(true, 12_345);
        assert_eq!(s.mode(), TickMode::Ambient);
        assert!(s.take_redraw());
        assert_eq!(s.next_tick(), None);
        assert_eq!(s.next_ambient_refresh(), Some(20_000));

        assert!(s.on_timer(20_000));
        assert_eq!(s.next_ambient_refresh(), Some(30_000));

        s.set_ambient(false, 21_000);
        assert_eq!(s.next_ambient_refresh(), None);
        assert_eq!(s.next_tick(), Some(21_500));
    }

    #[test]
    fn invalidate_is_independent_of_schedule() {
        let mut s = scheduler();
        assert!(!s.redraw_pending());
        s.invalidate();
        assert!(s.redraw_pending());
        assert_eq!(s.next_wake(), None);
        assert!(s.take_redraw());
        assert!(!s.take_redraw());
    }

    #[test]
    fn resync_follows_clock_jump() {
        let mut s = scheduler();
        s.set_ambient(true, 5_000_000);
        assert_eq!(s.next_ambient_refresh(), Some(5_010_000));
        s.take_redraw();
        s.resync(12_345);
        assert_eq!(s.next_ambient_refresh(), Some(20_000));
        assert!(s.take_redraw());
    }

    #[test]
    fn stop_cancels_everything() {
        let mut s = scheduler();
        s.set_visible(true, 0);
        s.set_ambient(true, 0);
        s.stop();
        s.stop();
        assert_eq!(s.next_wake(), None);
        s.take_redraw();
        assert!(!s.on_timer(100_000));
    }
}
