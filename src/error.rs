//! Error type shared by the face core

/// Errors surfaced by the scheduler, the lifecycle adapter and the renderer.
///
/// None of these are retried internally; they propagate to whoever
/// delivered the lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceError {
    /// The timer host could not post a delayed tick.
    #[error("timer host unavailable")]
    TimerUnavailable,
    /// The redraw host rejected an invalidation request.
    #[error("redraw request failed")]
    Redraw,
    /// The draw target reported an error while the face was painted.
    #[error("drawing to the display failed")]
    Draw,
    /// A label did not fit its text buffer.
    #[error("text does not fit its buffer")]
    Format,
    /// Epoch milliseconds outside the representable calendar range.
    #[error("timestamp {0} ms is out of range")]
    InvalidTimestamp(i64),
    /// Update rate must be at least one millisecond.
    #[error("update rate must be non-zero")]
    InvalidUpdateRate,
    /// UTC offset in seconds outside of +/- 24h.
    #[error("utc offset {0} s is out of range")]
    InvalidUtcOffset(i32),
}

impl From<core::fmt::Error> for FaceError {
    fn from(_: core::fmt::Error) -> Self {
        Self::Format
    }
}

pub type Result<T> = core::result::Result<T, FaceError>;
