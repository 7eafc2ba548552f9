//! Weather summary shown in the auxiliary line

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Rain,
    Snow,
}

/// Today's forecast, temperatures in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherSummary {
    pub high: i16,
    pub low: i16,
    pub condition: WeatherCondition,
}

/// Draw a small icon for `condition` centred on `center`.
///
/// Outlined instead of filled when `filled` is false (ambient).
pub fn draw_icon<D>(
    target: &mut D,
    condition: WeatherCondition,
    center: Point,
    size: u32,
    color: Rgb565,
    filled: bool,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = if filled {
        PrimitiveStyle::with_fill(color)
    } else {
        PrimitiveStyle::with_stroke(color, 1)
    };
    let r = size as i32 / 2;

    if condition == WeatherCondition::Clear {
        return Circle::with_center(center, size)
            .into_styled(style)
            .draw(target);
    }

    // Cloud: two overlapping puffs above the centre line
    let cloud = center - Point::new(0, r / 3);
    Circle::with_center(cloud - Point::new(r / 3, 0), size * 2 / 3)
        .into_styled(style)
        .draw(target)?;
    Circle::with_center(cloud + Point::new(r / 3, r / 6), size / 2)
        .into_styled(style)
        .draw(target)?;

    let below = center + Point::new(0, r / 2);
    match condition {
        WeatherCondition::Rain => {
            for dx in [-r / 2, 0, r / 2] {
                let start = below + Point::new(dx, 0);
                Line::new(start, start + Point::new(-2, r / 2))
                    .into_styled(PrimitiveStyle::with_stroke(color, 1))
                    .draw(target)?;
            }
        }
        WeatherCondition::Snow => {
            for dx in [-r / 2, 0, r / 2] {
                Circle::with_center(below + Point::new(dx, r / 4), 3)
                    .into_styled(PrimitiveStyle::with_fill(color))
                    .draw(target)?;
            }
        }
        WeatherCondition::Clear | WeatherCondition::Cloudy => {}
    }
    Ok(())
}
