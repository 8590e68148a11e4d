use crate::foundation::core::Millis;

bitflags::bitflags! {
    /// Conditions currently holding autoplay stopped. Autoplay resumes only once all clear.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PauseReasons: u8 {
        /// A drag session is open.
        const DRAG = 1 << 0;
        /// The mouse is over the root.
        const HOVER = 1 << 1;
        /// Focus is inside the root.
        const FOCUS = 1 << 2;
        /// The page is hidden.
        const HIDDEN = 1 << 3;
    }
}

/// Whether the autoplay timer is scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum AutoplayState {
    /// No tick is scheduled.
    Stopped,
    /// A tick is scheduled.
    Running,
}

/// Handle of one scheduled recurring tick. A new id is minted on every start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct TimerId(pub u64);

#[derive(Clone, Copy, Debug)]
struct TimerSlot {
    id: TimerId,
    due: Millis,
}

/// Autoplay lifecycle for one carousel. Holds at most one live timer.
#[derive(Clone, Debug)]
pub struct Autoplay {
    allowed: bool,
    interval_ms: u64,
    paused: PauseReasons,
    timer: Option<TimerSlot>,
    minted: u64,
}

impl Autoplay {
    /// Create a stopped autoplay. `allowed` is false when configuration or reduced motion
    /// rules it out.
    pub fn new(allowed: bool, interval_ms: u64) -> Self {
        Self {
            allowed,
            interval_ms: interval_ms.max(1),
            paused: PauseReasons::empty(),
            timer: None,
            minted: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AutoplayState {
        if self.timer.is_some() {
            AutoplayState::Running
        } else {
            AutoplayState::Stopped
        }
    }

    /// Whether a tick is scheduled.
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Active pause reasons.
    pub fn paused(&self) -> PauseReasons {
        self.paused
    }

    /// Handle of the live timer, if any.
    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer.map(|t| t.id)
    }

    /// When the next tick is due.
    pub fn deadline(&self) -> Option<Millis> {
        self.timer.map(|t| t.due)
    }

    /// Number of live timers; never more than one.
    pub fn live_timers(&self) -> usize {
        usize::from(self.timer.is_some())
    }

    /// Schedule the recurring tick. Returns `false` when already running, disallowed by
    /// configuration or held by a pause reason.
    pub fn start(&mut self, now: Millis) -> bool {
        if !self.allowed || self.timer.is_some() || !self.paused.is_empty() {
            return false;
        }
        self.minted += 1;
        let id = TimerId(self.minted);
        self.timer = Some(TimerSlot {
            id,
            due: now.after(self.interval_ms),
        });
        tracing::debug!(timer = id.0, "autoplay started");
        true
    }

    /// Cancel the scheduled tick. Idempotent.
    pub fn stop(&mut self) -> bool {
        match self.timer.take() {
            Some(slot) => {
                tracing::debug!(timer = slot.id.0, "autoplay stopped");
                true
            }
            None => false,
        }
    }

    /// Restart the countdown after explicit user navigation. A stopped timer starts again
    /// unless a pause reason holds it.
    pub fn restart(&mut self, now: Millis) {
        self.stop();
        self.start(now);
    }

    /// Add a pause reason and cancel the scheduled tick.
    pub fn pause(&mut self, reason: PauseReasons) {
        self.paused |= reason;
        self.stop();
    }

    /// Clear a pause reason; the countdown starts over once none remain.
    pub fn resume(&mut self, reason: PauseReasons, now: Millis) {
        self.paused.remove(reason);
        self.start(now);
    }

    /// Consume the due tick at `now`. Ticks missed since then are dropped and the next one
    /// stays on the original interval grid, strictly after `now`.
    pub fn poll(&mut self, now: Millis) -> bool {
        let Some(slot) = self.timer.as_mut() else {
            return false;
        };
        if slot.due > now {
            return false;
        }
        let missed = now
            .since(slot.due)
            .checked_div(self.interval_ms)
            .unwrap_or(0);
        slot.due = slot
            .due
            .after(self.interval_ms.saturating_mul(missed.saturating_add(1)));
        true
    }

    /// Stop and never start again.
    pub fn disable(&mut self) {
        self.stop();
        self.allowed = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/autoplay.rs"]
mod tests;
