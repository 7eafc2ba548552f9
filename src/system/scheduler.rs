//! Redraw scheduling
//!
//! While the face is visible and interactive, a tick fires once per update
//! interval, aligned to the wall-clock interval boundary so the seconds digit
//! flips as close to the real rollover as possible. Each tick requests a
//! redraw and arms the next one; when the power state no longer allows
//! periodic redraws the chain simply stops.
//!
//! At most one tick is ever outstanding: every scheduling request cancels the
//! previous tick before posting a new one.

use embassy_time::Duration;

use super::{
    power::PowerState,
    time::{Clock, TimeSource},
};
use crate::{
    error::{FaceError, Result},
    fmt::{trace, warn},
};

/// Opaque handle of a tick posted to a [`TimerHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickHandle(u32);

impl TickHandle {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(&self) -> u32 {
        self.0
    }
}

/// Host facility that delivers a tick back to the face service after a delay.
///
/// Ticks are delivered on the same context that drives the lifecycle
/// callbacks, in deadline order.
pub trait TimerHost {
    /// Post a tick that fires after `delay`.
    fn post_delayed(&mut self, delay: Duration) -> Result<TickHandle>;

    /// Cancel a posted tick. A cancelled tick must never be delivered.
    fn cancel(&mut self, handle: TickHandle);
}

/// Host facility that repaints the face at the next opportunity.
pub trait RedrawHost {
    /// Request a call to the face's `draw` at the next paint opportunity.
    fn invalidate(&mut self) -> Result<()>;
}

/// The outstanding tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduledTick {
    pub handle: TickHandle,
    /// Delay the tick was posted with.
    pub delay: Duration,
    /// Wall-clock time the tick is due, in epoch milliseconds.
    pub due_millis: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerState {
    /// No tick outstanding.
    Idle,
    /// Exactly one tick outstanding.
    Armed(ScheduledTick),
}

/// What a delivered tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// The tick was the outstanding one: a redraw was requested and the
    /// scheduler re-evaluated (possibly re-arming).
    Redrawn(SchedulerState),
    /// The tick was not the outstanding one and was ignored.
    Stale,
}

/// Delay from `now_millis` to the next multiple of `interval`.
///
/// Exactly on a boundary this is a full interval, never zero, so a tick that
/// fires precisely on time does not fire again immediately.
pub fn phase_aligned_delay(now_millis: i64, interval: Duration) -> Duration {
    let interval_ms = interval.as_millis().max(1) as i64;
    let delay = interval_ms - now_millis.rem_euclid(interval_ms);
    Duration::from_millis(delay as u64)
}

/// Single-slot redraw timer.
///
/// Holds nothing besides the pending tick; power state and clock are read
/// fresh on every call.
#[derive(Debug, Clone)]
pub struct RenderScheduler {
    interval: Duration,
    pending: Option<ScheduledTick>,
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self {
            interval: super::config::INTERACTIVE_UPDATE_RATE,
            pending: None,
        }
    }
}

impl RenderScheduler {
    /// Create an idle scheduler ticking every `interval`.
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.as_millis() == 0 {
            return Err(FaceError::InvalidUpdateRate);
        }
        Ok(Self {
            interval,
            pending: None,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> SchedulerState {
        match self.pending {
            Some(tick) => SchedulerState::Armed(tick),
            None => SchedulerState::Idle,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<ScheduledTick> {
        self.pending
    }

    /// Cancel the outstanding tick and, if periodic redraw should run, arm a
    /// new one aligned to the next interval boundary.
    ///
    /// If posting fails the scheduler stays idle and the error is returned.
    pub fn reschedule<S, T>(
        &mut self,
        power: &PowerState,
        clock: &Clock<S>,
        timer: &mut T,
    ) -> Result<SchedulerState>
    where
        S: TimeSource,
        T: TimerHost,
    {
        self.cancel(timer);

        if !power.should_run_timer() {
            trace!("scheduler idle");
            return Ok(SchedulerState::Idle);
        }

        let now = clock.now().epoch_millis;
        let delay = phase_aligned_delay(now, self.interval);
        let handle = timer.post_delayed(delay).inspect_err(|_| {
            warn!("failed to post redraw tick");
        })?;
        let tick = ScheduledTick {
            handle,
            delay,
            due_millis: now.saturating_add(delay.as_millis() as i64),
        };
        trace!("tick {} armed in {} ms", handle.id(), delay.as_millis());
        self.pending = Some(tick);
        Ok(SchedulerState::Armed(tick))
    }

    /// Handle a tick delivered by the timer host.
    ///
    /// Requests a redraw, then re-evaluates against the current power state.
    /// Ticks other than the outstanding one are ignored.
    pub fn on_tick<S, T, R>(
        &mut self,
        handle: TickHandle,
        power: &PowerState,
        clock: &Clock<S>,
        timer: &mut T,
        redraw: &mut R,
    ) -> Result<TickOutcome>
    where
        S: TimeSource,
        T: TimerHost,
        R: RedrawHost,
    {
        match self.pending {
            Some(tick) if tick.handle == handle => {}
            _ => {
                trace!("ignoring stale tick {}", handle.id());
                return Ok(TickOutcome::Stale);
            }
        }
        // Delivered, nothing left to cancel.
        self.pending = None;

        redraw.invalidate()?;
        let state = self.reschedule(power, clock, timer)?;
        Ok(TickOutcome::Redrawn(state))
    }

    /// Cancel the outstanding tick, if any.
    pub fn cancel<T: TimerHost>(&mut self, timer: &mut T) {
        if let Some(tick) = self.pending.take() {
            trace!("tick {} cancelled", tick.handle.id());
            timer.cancel(tick.handle);
        }
    }
}
