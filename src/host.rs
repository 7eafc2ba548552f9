//! Embassy-backed timer and redraw hosts for the face service

use core::future;

use embassy_time::{Duration, Instant, Timer};
use pinetime_watchface::{FaceError, RedrawHost, TickHandle, TimerHost};

/// Single-slot delayed tick on the embassy timer queue.
#[derive(Default)]
pub struct EmbassyTimerHost {
    next_id: u32,
    pending: Option<(TickHandle, Instant)>,
}

impl EmbassyTimerHost {
    /// Resolve once the pending tick is due. Never resolves while idle.
    pub async fn fired(&self) -> TickHandle {
        match self.pending {
            Some((handle, deadline)) => {
                Timer::at(deadline).await;
                handle
            }
            None => future::pending().await,
        }
    }

    /// Drop a tick that is about to be delivered.
    pub fn take(&mut self, handle: TickHandle) {
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            self.pending = None;
        }
    }
}

impl TimerHost for EmbassyTimerHost {
    fn post_delayed(&mut self, delay: Duration) -> Result<TickHandle, FaceError> {
        if self.pending.is_some() {
            return Err(FaceError::TimerUnavailable);
        }
        self.next_id = self.next_id.wrapping_add(1);
        let handle = TickHandle::new(self.next_id);
        self.pending = Some((handle, Instant::now() + delay));
        Ok(handle)
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.take(handle);
    }
}

/// Dirty flag consumed by the render loop.
#[derive(Default)]
pub struct FrameRedraw {
    dirty: bool,
}

impl FrameRedraw {
    /// Clear the flag, returning whether a frame was requested.
    pub fn take(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }
}

impl RedrawHost for FrameRedraw {
    fn invalidate(&mut self) -> Result<(), FaceError> {
        self.dirty = true;
        Ok(())
    }
}
