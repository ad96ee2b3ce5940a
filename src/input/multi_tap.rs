//! Multi-tap disambiguation
//!
//! Rapid taps in one screen region collapse into a single `(region, count)`
//! event once no further tap arrives within the threshold. The handler owns
//! a single deadline instead of a timer; the caller asks for it with
//! [`MultiTapHandler::deadline`] and calls [`MultiTapHandler::poll`] when it
//! passes.

/// Default quiet window, matching the usual desktop double-click threshold
pub const MULTI_TAP_THRESHOLD_MS: u64 = 500;

/// Taps accumulated so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapState<R> {
    pub region: R,
    pub count: u32,
    /// Monotonic millisecond at which the count is emitted
    pub deadline: u64,
}

/// Completed multi-tap gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiTap<R> {
    pub region: R,
    pub count: u32,
}

pub struct MultiTapHandler<R> {
    threshold_ms: u64,
    pending: Option<TapState<R>>,
    closed: bool,
}

impl<R> Default for MultiTapHandler<R> {
    fn default() -> Self {
        Self::new(MULTI_TAP_THRESHOLD_MS)
    }
}

impl<R> MultiTapHandler<R> {
    pub fn new(threshold_ms: u64) -> Self {
        Self {
            threshold_ms,
            pending: None,
            closed: false,
        }
    }

    pub fn threshold_ms(&self) -> u64 {
        self.threshold_ms
    }

    pub fn pending(&self) -> Option<&TapState<R>> {
        self.pending.as_ref()
    }

    /// When the pending count becomes due, if anything is pending.
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|state| state.deadline)
    }

    /// Drop any pending count without emitting it. Repeated calls are no-ops.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Cancel and stop accepting taps.
    pub fn close(&mut self) {
        self.cancel();
        self.closed = true;
    }

    /// Accept taps again after [`MultiTapHandler::close`].
    pub fn reopen(&mut self) {
        self.closed = false;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<R: Copy + PartialEq> MultiTapHandler<R> {
    /// Record a tap in `region` at `now_ms`.
    ///
    /// A tap in a different region replaces the pending count, which is lost.
    /// Either way the deadline moves to `now_ms + threshold`. If the pending
    /// count was already due, it is returned and the tap starts a new gesture.
    pub fn register_tap(&mut self, region: R, now_ms: u64) -> Option<MultiTap<R>> {
        if self.closed {
            return None;
        }
        let due = self.poll(now_ms);
        let deadline = now_ms.saturating_add(self.threshold_ms);
        self.pending = Some(match self.pending {
            Some(state) if state.region == region => TapState {
                region,
                count: state.count + 1,
                deadline,
            },
            _ => TapState {
                region,
                count: 1,
                deadline,
            },
        });
        due
    }

    /// Emit the pending count if its deadline has passed.
    ///
    /// Each gesture is returned exactly once; the handler is idle afterwards.
    pub fn poll(&mut self, now_ms: u64) -> Option<MultiTap<R>> {
        match self.pending {
            Some(state) if now_ms >= state.deadline => {
                self.pending = None;
                Some(MultiTap {
                    region: state.region,
                    count: state.count,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Spot {
        A,
        B,
    }

    /// Poll every millisecond up to `until`, collecting emissions.
    fn run(handler: &mut MultiTapHandler<Spot>, from: u64, until: u64) -> Vec<(u64, MultiTap<Spot>)> {
        (from..=until)
            .filter_map(|t| handler.poll(t).map(|tap| (t, tap)))
            .collect()
    }

    #[test]
    fn three_quick_taps_emit_once() {
        let mut handler = MultiTapHandler::default();
        handler.register_tap(Spot::A, 0);
        assert!(run(&mut handler, 0, 99).is_empty());
        handler.register_tap(Spot::A, 100);
        assert!(run(&mut handler, 100, 199).is_empty());
        handler.register_tap(Spot::A, 200);
        assert_eq!(handler.deadline(), Some(700));

        let emitted = run(&mut handler, 200, 5_000);
        assert_eq!(emitted, vec![(700, MultiTap { region: Spot::A, count: 3 })]);
        assert!(handler.pending().is_none());
    }

    #[test]
    fn switching_region_discards_pending_count() {
        let mut handler = MultiTapHandler::default();
        handler.register_tap(Spot::A, 0);
        assert!(run(&mut handler, 0, 99).is_empty());
        handler.register_tap(Spot::B, 100);

        let emitted = run(&mut handler, 100, 5_000);
        assert_eq!(emitted, vec![(600, MultiTap { region: Spot::B, count: 1 })]);
    }

    #[test]
    fn late_tap_starts_a_new_gesture() {
        let mut handler = MultiTapHandler::default();
        handler.register_tap(Spot::A, 0);
        assert_eq!(handler.poll(500), Some(MultiTap { region: Spot::A, count: 1 }));
        handler.register_tap(Spot::A, 501);
        assert_eq!(handler.pending().map(|s| s.count), Some(1));
    }

    #[test]
    fn unpolled_late_tap_flushes_expired_count() {
        let mut handler = MultiTapHandler::default();
        assert_eq!(handler.register_tap(Spot::A, 0), None);
        assert_eq!(
            handler.register_tap(Spot::A, 600),
            Some(MultiTap { region: Spot::A, count: 1 })
        );
        assert_eq!(handler.pending().map(|s| s.count), Some(1));
        assert_eq!(handler.poll(1_100), Some(MultiTap { region: Spot::A, count: 1 }));
        assert_eq!(handler.poll(5_000), None);
    }

    #[test]
    fn tap_on_the_deadline_is_late() {
        let mut handler = MultiTapHandler::default();
        handler.register_tap(Spot::A, 0);
        assert_eq!(handler.register_tap(Spot::A, 499), None);
        assert_eq!(
            handler.register_tap(Spot::A, 999),
            Some(MultiTap { region: Spot::A, count: 2 })
        );
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut handler = MultiTapHandler::default();
        handler.register_tap(Spot::A, 0);
        handler.cancel();
        handler.cancel();
        assert_eq!(handler.deadline(), None);
        assert!(run(&mut handler, 0, 2_000).is_empty());
    }

    #[test]
    fn closed_handler_ignores_taps() {
        let mut handler = MultiTapHandler::new(250);
        handler.register_tap(Spot::A, 0);
        handler.close();
        handler.register_tap(Spot::A, 10);
        assert!(handler.pending().is_none());

        handler.reopen();
        handler.register_tap(Spot::B, 20);
        assert_eq!(handler.deadline(), Some(270));
    }
}
