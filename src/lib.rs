//! Watch face core for the PineTime
//!
//! Decides when the face is redrawn, at which granularity, and how
//! visibility and ambient-mode changes arm or cancel the pending redraw.
//! Drawing itself goes through [`ui::WatchFace`] on top of
//! `embedded-graphics`.

#![cfg_attr(not(test), no_std)]

pub(crate) mod fmt;

pub mod error;
pub mod lifecycle;
pub mod system;
pub mod ui;

pub use error::{FaceError, Result};
pub use lifecycle::{LifecycleAdapter, TapCommand, TapType};
pub use system::{
    battery::BatteryInfo,
    config::FaceConfig,
    power::PowerState,
    scheduler::{
        RedrawHost, RenderScheduler, ScheduledTick, SchedulerState, TickHandle, TickOutcome,
        TimerHost,
    },
    time::{Clock, ClockReading, TimeReference, TimeSource},
};
pub use ui::{
    default_watchface::DefaultWatchface,
    weather::{WeatherCondition, WeatherSummary},
    Palette, RenderMode, WatchFace, WatchFaceState,
};
