//! Text formats of the face labels
//!
//! Everything is written into caller-provided stack buffers.

use chrono::{Datelike, Timelike};

use crate::{error::Result, system::battery::BatteryInfo};

/// `HH:MM:SS`
pub const TIME_LEN: usize = 8;
/// `Sun 03 Mar 2024`, with room for longer years.
pub const DATE_LEN: usize = 24;
/// `-40°/-45°`
pub const TEMPERATURE_LEN: usize = 16;
/// `100%+`
pub const BATTERY_LEN: usize = 8;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// `HH:MM:SS`, or `HH:MM` without seconds.
pub fn time<'a, T: Timelike>(buf: &'a mut [u8], time: &T, seconds: bool) -> Result<&'a str> {
    let text = if seconds {
        format_no_std::show(
            buf,
            format_args!("{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second()),
        )?
    } else {
        format_no_std::show(buf, format_args!("{:02}:{:02}", time.hour(), time.minute()))?
    };
    Ok(text)
}

/// `EEE dd MMM yyyy`, e.g. `Sun 03 Mar 2024`.
pub fn date<'a, D: Datelike>(buf: &'a mut [u8], date: &D) -> Result<&'a str> {
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS[date.month0() as usize];
    Ok(format_no_std::show(
        buf,
        format_args!("{} {:02} {} {:04}", weekday, date.day(), month, date.year()),
    )?)
}

/// High and low temperature, e.g. `21°/12°`.
pub fn temperature_range(buf: &mut [u8], high: i16, low: i16) -> Result<&str> {
    Ok(format_no_std::show(buf, format_args!("{}°/{}°", high, low))?)
}

/// Charge in percent, `+` while charging.
pub fn battery<'a>(buf: &'a mut [u8], info: &BatteryInfo) -> Result<&'a str> {
    Ok(format_no_std::show(
        buf,
        format_args!("{}%{}", info.percent, if info.charging { "+" } else { "" }),
    )?)
}
