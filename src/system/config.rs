//! Watch face configuration

use chrono::{FixedOffset, Offset, Utc};
use embassy_time::Duration;

use crate::{
    error::{FaceError, Result},
    ui::Palette,
};

/// Redraw interval while interactive. Seconds are displayed, so once a second.
pub const INTERACTIVE_UPDATE_RATE: Duration = Duration::from_millis(1000);

/// Default offset from UTC in seconds (CET).
pub const DEFAULT_UTC_OFFSET: i32 = 3_600;

/// Largest accepted offset from UTC in seconds (exclusive).
const MAX_UTC_OFFSET: i32 = 86_400;

/// Settings for the face service.
#[derive(Debug, Clone, Copy)]
pub struct FaceConfig {
    /// Interactive redraw interval; ticks are aligned to multiples of it.
    pub update_rate: Duration,
    /// Offset of the initial time zone.
    pub utc_offset: FixedOffset,
    /// Display supports fewer bits per colour in ambient mode.
    pub low_bit_ambient: bool,
    /// Interactive colours
    pub palette: Palette,
    /// Draw the orbiting seconds dot in interactive mode.
    pub seconds_indicator: bool,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            update_rate: INTERACTIVE_UPDATE_RATE,
            utc_offset: utc_offset(DEFAULT_UTC_OFFSET),
            low_bit_ambient: false,
            palette: Palette::default(),
            seconds_indicator: true,
        }
    }
}

impl FaceConfig {
    pub fn with_update_rate(mut self, update_rate: Duration) -> Result<Self> {
        if update_rate.as_millis() == 0 {
            return Err(FaceError::InvalidUpdateRate);
        }
        self.update_rate = update_rate;
        Ok(self)
    }

    /// Set the initial zone from an offset in seconds east of UTC.
    pub fn with_utc_offset(mut self, seconds: i32) -> Result<Self> {
        if seconds.abs() >= MAX_UTC_OFFSET {
            return Err(FaceError::InvalidUtcOffset(seconds));
        }
        self.utc_offset = utc_offset(seconds);
        Ok(self)
    }

    pub fn with_low_bit_ambient(mut self, low_bit_ambient: bool) -> Self {
        self.low_bit_ambient = low_bit_ambient;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_seconds_indicator(mut self, enabled: bool) -> Self {
        self.seconds_indicator = enabled;
        self
    }
}

/// Offset in seconds east of UTC, falling back to UTC when out of range.
pub fn utc_offset(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
}
