mod support;

use chrono::{FixedOffset, Timelike};
use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::{Point, RgbColor, Size},
};
use pinetime_watchface::{
    BatteryInfo, Palette, RenderMode, SchedulerState, TapCommand, TapType, WeatherCondition,
    WeatherSummary,
};
use support::{face_at, run_until, Canvas};

// 2024-03-03 10:20:30 UTC
const MORNING: i64 = 1_709_461_230_000;

#[test]
fn new_service_is_hidden_and_idle() {
    let (face, _time) = face_at(MORNING);
    assert!(!face.power().is_visible());
    assert!(!face.power().is_ambient());
    assert_eq!(face.scheduler().state(), SchedulerState::Idle);
    assert_eq!(face.timer().posted.len(), 0);
}

#[test]
fn becoming_visible_repaints_immediately() {
    let (mut face, _time) = face_at(MORNING);
    let before = face.redraw().count;
    face.visibility_changed(true).unwrap();
    assert_eq!(face.redraw().count, before + 1);

    // Hiding does not repaint.
    face.visibility_changed(false).unwrap();
    assert_eq!(face.redraw().count, before + 1);
}

#[test]
fn repeated_ambient_report_does_not_repaint() {
    let (mut face, _time) = face_at(MORNING);
    face.visibility_changed(true).unwrap();
    let before = face.redraw().count;

    face.ambient_mode_changed(false).unwrap();
    assert_eq!(face.redraw().count, before);
    assert!(face.scheduler().is_armed());
}

#[test]
fn timezone_change_keeps_the_schedule() {
    let (mut face, _time) = face_at(MORNING);
    face.visibility_changed(true).unwrap();
    let pending = face.scheduler().pending().unwrap();
    let before = face.redraw().count;

    let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
    face.timezone_changed(tokyo).unwrap();

    assert_eq!(face.redraw().count, before + 1);
    assert_eq!(face.scheduler().pending(), Some(pending));
    let local = face.face_state().reading.local().unwrap();
    assert_eq!(local.hour(), 19);
    assert_eq!(local.minute(), 20);
}

#[test]
fn timezone_change_while_hidden_waits_for_visibility() {
    let (mut face, _time) = face_at(MORNING);
    let before = face.redraw().count;

    face.timezone_changed(FixedOffset::west_opt(5 * 3600).unwrap())
        .unwrap();

    assert_eq!(face.redraw().count, before);
    assert_eq!(face.clock().timezone().local_minus_utc(), -5 * 3600);
}

#[test]
fn minute_tick_repaints_ambient_face_without_arming() {
    let (mut face, time) = face_at(MORNING);
    face.visibility_changed(true).unwrap();
    face.ambient_mode_changed(true).unwrap();
    let before = face.redraw().count;

    time.advance(60_000);
    face.time_tick().unwrap();

    assert_eq!(face.redraw().count, before + 1);
    assert!(!face.scheduler().is_armed());
    assert_eq!(face.timer().outstanding(), 0);
}

#[test]
fn tap_goes_to_the_face_and_leaves_scheduling_alone() {
    let (mut face, _time) = face_at(MORNING);
    face.visibility_changed(true).unwrap();
    let pending = face.scheduler().pending();
    let before = face.redraw().count;
    assert!(face.face().shows_auxiliary());

    face.tap(TapCommand::new(TapType::Touch, 120, 120)).unwrap();
    assert!(face.face().shows_auxiliary());

    face.tap(TapCommand::new(TapType::Tap, 120, 120)).unwrap();
    assert!(!face.face().shows_auxiliary());
    assert_eq!(face.redraw().count, before + 2);
    assert_eq!(face.scheduler().pending(), pending);
}

#[test]
fn battery_and_weather_repaint_only_on_change() {
    let (mut face, _time) = face_at(MORNING);
    face.visibility_changed(true).unwrap();
    let before = face.redraw().count;

    let battery = Some(BatteryInfo::from_millivolts(3900, false));
    face.battery_changed(battery).unwrap();
    face.battery_changed(battery).unwrap();
    assert_eq!(face.redraw().count, before + 1);

    let weather = Some(WeatherSummary {
        high: 21,
        low: 12,
        condition: WeatherCondition::Rain,
    });
    face.weather_changed(weather).unwrap();
    face.weather_changed(weather).unwrap();
    assert_eq!(face.redraw().count, before + 2);

    let state = face.face_state();
    assert_eq!(state.battery, battery);
    assert_eq!(state.weather, weather);
}

#[test]
fn surface_change_relayouts_and_repaints() {
    let (mut face, _time) = face_at(MORNING);
    face.visibility_changed(true).unwrap();
    let before = face.redraw().count;

    let size = Size::new(120, 120);
    face.surface_changed(size).unwrap();
    assert_eq!(face.redraw().count, before + 1);
    assert_eq!(face.bounds().size, size);
    assert!(face.scheduler().is_armed());

    let mut canvas = Canvas::new(size);
    face.draw(&mut canvas).unwrap();
    assert_eq!(canvas.pixel(Point::new(2, 2)), Palette::default().background);
    assert!(canvas.pixels.iter().all(|&p| p != Rgb565::RED));
}

#[test]
fn low_bit_ambient_draws_black_and_white_only() {
    let (mut face, _time) = face_at(MORNING);
    face.properties_changed(true);
    face.visibility_changed(true).unwrap();
    face.ambient_mode_changed(true).unwrap();
    face.weather_changed(Some(WeatherSummary {
        high: 3,
        low: -4,
        condition: WeatherCondition::Snow,
    }))
    .unwrap();
    assert_eq!(face.face_state().mode, RenderMode::AmbientLowBit);

    let mut canvas = Canvas::new(Size::new(240, 240));
    face.draw(&mut canvas).unwrap();
    assert!(canvas
        .pixels
        .iter()
        .all(|&p| p == Rgb565::BLACK || p == Rgb565::WHITE));
    assert!(canvas.pixels.iter().any(|&p| p == Rgb565::WHITE));
}

#[test]
fn drawn_time_follows_the_clock() {
    let (mut face, time) = face_at(MORNING);
    face.visibility_changed(true).unwrap();
    run_until(&mut face, &time, MORNING + 2_500, 0);

    let reading = face.face_state().reading;
    assert_eq!(reading.epoch_millis, MORNING + 2_500);
    assert_eq!(reading.local().unwrap().second(), 32);
}
