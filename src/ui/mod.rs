//! UI definitions module

use embedded_graphics::{
    pixelcolor::{Rgb565, RgbColor},
    prelude::DrawTarget,
    primitives::Rectangle,
};

use crate::{
    error::Result,
    lifecycle::TapCommand,
    system::{battery::BatteryInfo, power::PowerState, time::ClockReading},
};

pub mod default_watchface;
pub mod format;
pub mod weather;

use weather::WeatherSummary;

pub trait WatchFace {
    /// Recompute positions for new surface bounds.
    fn layout(&mut self, bounds: Rectangle);

    /// Draw the face for `state`.
    ///
    /// Runs synchronously on the face service context and must not touch
    /// scheduling.
    fn draw<D>(&mut self, target: &mut D, state: &WatchFaceState) -> Result<()>
    where
        D: DrawTarget<Color = Rgb565>;

    /// Tap command passed through from the host.
    fn on_tap(&mut self, _tap: TapCommand) {}
}

/// State for the watch face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchFaceState {
    /// Surface area to draw into
    pub bounds: Rectangle,
    /// Time snapshot taken for this frame
    pub reading: ClockReading,
    pub power: PowerState,
    pub mode: RenderMode,
    pub battery: Option<BatteryInfo>,
    pub weather: Option<WeatherSummary>,
}

/// How the face is drawn, derived from the power state and display properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderMode {
    /// Full colour with seconds.
    Interactive,
    /// Dark, minute resolution.
    Ambient,
    /// Ambient on a display with fewer bits per colour: black and white only.
    AmbientLowBit,
}

impl RenderMode {
    pub fn new(power: &PowerState, low_bit_ambient: bool) -> Self {
        match (power.is_ambient(), low_bit_ambient) {
            (false, _) => Self::Interactive,
            (true, false) => Self::Ambient,
            (true, true) => Self::AmbientLowBit,
        }
    }

    pub fn is_ambient(&self) -> bool {
        !matches!(self, Self::Interactive)
    }

    /// Seconds are only shown while interactive.
    pub fn shows_seconds(&self) -> bool {
        matches!(self, Self::Interactive)
    }
}

/// Interactive colours of the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb565,
    pub foreground: Rgb565,
    pub accent: Rgb565,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb565::new(3, 24, 22),
            foreground: Rgb565::WHITE,
            accent: Rgb565::new(31, 52, 4),
        }
    }
}

/// Colours actually used for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FaceColors {
    pub background: Rgb565,
    pub primary: Rgb565,
    pub secondary: Rgb565,
    pub accent: Rgb565,
}

impl FaceColors {
    pub fn new(mode: RenderMode, palette: &Palette) -> Self {
        const GRAY: Rgb565 = Rgb565::new(16, 32, 16);
        match mode {
            RenderMode::Interactive => Self {
                background: palette.background,
                primary: palette.foreground,
                secondary: palette.foreground,
                accent: palette.accent,
            },
            RenderMode::Ambient => Self {
                background: Rgb565::BLACK,
                primary: Rgb565::WHITE,
                secondary: GRAY,
                accent: GRAY,
            },
            RenderMode::AmbientLowBit => Self {
                background: Rgb565::BLACK,
                primary: Rgb565::WHITE,
                secondary: Rgb565::WHITE,
                accent: Rgb565::WHITE,
            },
        }
    }
}
