//! Default watchface

use chrono::Timelike;
use embedded_graphics::{
    mono_font::{
        iso_8859_1::{FONT_10X20, FONT_6X10},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_24_POINT;

use super::{format, weather, FaceColors, Palette, WatchFace, WatchFaceState};
use crate::{
    error::{FaceError, Result},
    lifecycle::{TapCommand, TapType},
    system::config::FaceConfig,
};

/// Native PineTime panel size
const DEFAULT_SIZE: Size = Size::new(240, 240);
const MARGIN: i32 = 20;
const ICON_SIZE: u32 = 20;

/// Text anchored at a point, in a fixed font.
struct Label {
    position: Point,
    font: &'static MonoFont<'static>,
    text_style: TextStyle,
}

impl Label {
    /// Create new label
    fn new(font: &'static MonoFont<'static>, text_style: TextStyle) -> Self {
        Self {
            position: Point::zero(),
            font,
            text_style,
        }
    }

    fn draw<D>(&self, target: &mut D, text: &str, color: Rgb565) -> Result<()>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        Text::with_text_style(
            text,
            self.position,
            MonoTextStyle::new(self.font, color),
            self.text_style,
        )
        .draw(target)
        .map_err(|_| FaceError::Draw)?;
        Ok(())
    }
}

fn centered() -> TextStyle {
    TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build()
}

/// Basic default watchface: time, date, weather or battery line, seconds dot.
pub struct DefaultWatchface {
    /// Time label
    time_label: Label,
    /// Date label
    date_label: Label,
    /// Weather temperatures
    auxiliary_label: Label,
    /// Power indicator label
    battery_label: Label,
    icon_center: Point,
    dot_diameter: u32,
    bounds: Rectangle,
    palette: Palette,
    seconds_indicator: bool,
    show_auxiliary: bool,
}

impl Default for DefaultWatchface {
    fn default() -> Self {
        Self::new(Palette::default(), true)
    }
}

impl DefaultWatchface {
    /// Create a face laid out for the native panel.
    pub fn new(palette: Palette, seconds_indicator: bool) -> Self {
        let mut face = Self {
            time_label: Label::new(&PROFONT_24_POINT, centered()),
            date_label: Label::new(&FONT_10X20, centered()),
            auxiliary_label: Label::new(&FONT_10X20, centered()),
            battery_label: Label::new(
                &FONT_6X10,
                TextStyleBuilder::new()
                    .alignment(Alignment::Left)
                    .baseline(Baseline::Bottom)
                    .build(),
            ),
            icon_center: Point::zero(),
            dot_diameter: 0,
            bounds: Rectangle::zero(),
            palette,
            seconds_indicator,
            show_auxiliary: true,
        };
        face.layout(Rectangle::new(Point::zero(), DEFAULT_SIZE));
        face
    }

    pub fn from_config(config: &FaceConfig) -> Self {
        Self::new(config.palette, config.seconds_indicator)
    }

    /// Whether the weather and battery line is currently shown.
    pub fn shows_auxiliary(&self) -> bool {
        self.show_auxiliary
    }
}

impl WatchFace for DefaultWatchface {
    fn layout(&mut self, bounds: Rectangle) {
        let center = bounds.center();
        let width = bounds.size.width as i32;
        let height = bounds.size.height as i32;

        self.time_label.position = center - Point::new(0, height / 8);
        self.date_label.position = center + Point::new(0, height / 12);
        self.auxiliary_label.position = center + Point::new(width / 16, height / 4);
        self.icon_center = center + Point::new(-width / 4, height / 4);
        self.battery_label.position =
            bounds.top_left + Point::new(MARGIN, height - MARGIN);
        self.dot_diameter = (width.min(height) / 17).max(2) as u32;
        self.bounds = bounds;
    }

    fn draw<D>(&mut self, target: &mut D, state: &WatchFaceState) -> Result<()>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if state.bounds.is_zero_sized() {
            return Ok(());
        }
        if state.bounds != self.bounds {
            self.layout(state.bounds);
        }

        let colors = FaceColors::new(state.mode, &self.palette);
        let local = state.reading.local()?;

        target
            .fill_solid(&state.bounds, colors.background)
            .map_err(|_| FaceError::Draw)?;

        let mut buf = [0u8; format::TIME_LEN];
        let time = format::time(&mut buf, &local, state.mode.shows_seconds())?;
        self.time_label.draw(target, time, colors.primary)?;

        let mut buf = [0u8; format::DATE_LEN];
        let date = format::date(&mut buf, &local)?;
        self.date_label.draw(target, date, colors.secondary)?;

        if self.show_auxiliary {
            if let Some(forecast) = state.weather {
                let mut buf = [0u8; format::TEMPERATURE_LEN];
                let text = format::temperature_range(&mut buf, forecast.high, forecast.low)?;
                self.auxiliary_label.draw(target, text, colors.secondary)?;
                weather::draw_icon(
                    target,
                    forecast.condition,
                    self.icon_center,
                    ICON_SIZE,
                    colors.accent,
                    !state.mode.is_ambient(),
                )
                .map_err(|_| FaceError::Draw)?;
            }
            if let Some(battery) = state.battery {
                let mut buf = [0u8; format::BATTERY_LEN];
                let text = format::battery(&mut buf, &battery)?;
                self.battery_label.draw(target, text, colors.secondary)?;
            }
        }

        if self.seconds_indicator && state.mode.shows_seconds() {
            let position = seconds_dot_position(&state.bounds, self.dot_diameter, local.second());
            Circle::new(position, self.dot_diameter)
                .into_styled(PrimitiveStyle::with_fill(colors.accent))
                .draw(target)
                .map_err(|_| FaceError::Draw)?;
        }

        Ok(())
    }

    fn on_tap(&mut self, tap: TapCommand) {
        if tap.kind == TapType::Tap {
            self.show_auxiliary = !self.show_auxiliary;
        }
    }
}

/// Top-left corner of the seconds dot, walking clockwise around the bezel
/// from 12 o'clock.
pub fn seconds_dot_position(bounds: &Rectangle, diameter: u32, second: u32) -> Point {
    let width = bounds.size.width as i32;
    let height = bounds.size.height as i32;
    let diameter = diameter as i32;
    let sec_w = width / 17;
    let sec_h = height / 17;
    let seconds = (second % 60) as i32;

    let offset = match seconds {
        0..=7 => Point::new((8 + seconds) * sec_w, 0),
        8..=22 => Point::new(width - diameter, (seconds - 7) * sec_h),
        23..=37 => Point::new(width - (seconds - 21) * sec_w, height - diameter),
        38..=52 => Point::new(0, height - (seconds - 36) * sec_h),
        _ => Point::new((seconds - 52) * sec_w, 0),
    };
    bounds.top_left + offset
}
