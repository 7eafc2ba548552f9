//! Host lifecycle adapter
//!
//! Every host callback follows the same order: mutate the power state,
//! request a one-off repaint if the transition itself needs one, then let
//! the scheduler re-evaluate.

use chrono::FixedOffset;
use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::{DrawTarget, Point, Size},
    primitives::Rectangle,
};

use crate::{
    error::Result,
    fmt::{debug, warn},
    system::{
        battery::BatteryInfo,
        config::FaceConfig,
        power::PowerState,
        scheduler::{RedrawHost, RenderScheduler, SchedulerState, TickHandle, TickOutcome, TimerHost},
        time::{Clock, TimeSource},
    },
    ui::{weather::WeatherSummary, RenderMode, WatchFace, WatchFaceState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapType {
    /// The user has started touching the screen.
    Touch,
    /// The user has started a different gesture or otherwise cancelled the tap.
    TouchCancel,
    /// The user has completed the tap gesture.
    Tap,
}

/// Touch input forwarded to the face untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapCommand {
    pub kind: TapType,
    pub x: i32,
    pub y: i32,
}

impl TapCommand {
    pub const fn new(kind: TapType, x: i32, y: i32) -> Self {
        Self { kind, x, y }
    }
}

/// Face service: owns the power state, clock, scheduler, face and the two
/// host facilities, and translates host callbacks into calls on them.
pub struct LifecycleAdapter<S, T, R, W> {
    clock: Clock<S>,
    power: PowerState,
    scheduler: RenderScheduler,
    timer: T,
    redraw: R,
    face: W,
    bounds: Rectangle,
    low_bit_ambient: bool,
    battery: Option<BatteryInfo>,
    weather: Option<WeatherSummary>,
}

impl<S, T, R, W> LifecycleAdapter<S, T, R, W>
where
    S: TimeSource,
    T: TimerHost,
    R: RedrawHost,
    W: WatchFace,
{
    /// Create the service. Starts hidden, interactive and idle.
    pub fn new(source: S, config: &FaceConfig, face: W, timer: T, redraw: R) -> Result<Self> {
        Ok(Self {
            clock: Clock::new(source, config.utc_offset),
            power: PowerState::default(),
            scheduler: RenderScheduler::new(config.update_rate)?,
            timer,
            redraw,
            face,
            bounds: Rectangle::zero(),
            low_bit_ambient: config.low_bit_ambient,
            battery: None,
            weather: None,
        })
    }

    pub fn visibility_changed(&mut self, visible: bool) -> Result<SchedulerState> {
        debug!("visibility changed: {}", visible);
        self.power.set_visible(visible);
        if visible {
            self.redraw.invalidate()?;
        }
        self.reschedule()
    }

    pub fn ambient_mode_changed(&mut self, ambient: bool) -> Result<SchedulerState> {
        debug!("ambient mode changed: {}", ambient);
        if self.power.set_ambient(ambient) {
            self.redraw.invalidate()?;
        }
        self.reschedule()
    }

    /// New zone for subsequent readings. Scheduling works on epoch time and
    /// is not affected.
    pub fn timezone_changed(&mut self, timezone: FixedOffset) -> Result<()> {
        debug!("timezone changed: {}", timezone.local_minus_utc());
        self.clock.on_timezone_changed(timezone);
        if self.power.is_visible() {
            self.redraw.invalidate()?;
        }
        Ok(())
    }

    pub fn surface_changed(&mut self, size: Size) -> Result<SchedulerState> {
        debug!("surface changed: {}x{}", size.width, size.height);
        self.bounds = Rectangle::new(Point::zero(), size);
        self.face.layout(self.bounds);
        self.redraw.invalidate()?;
        self.reschedule()
    }

    /// Display properties reported by the host.
    pub fn properties_changed(&mut self, low_bit_ambient: bool) {
        self.low_bit_ambient = low_bit_ambient;
    }

    /// Once-a-minute tick from the host, delivered while ambient.
    pub fn time_tick(&mut self) -> Result<()> {
        self.redraw.invalidate()
    }

    pub fn tap(&mut self, tap: TapCommand) -> Result<()> {
        debug!("tap at {},{}", tap.x, tap.y);
        self.face.on_tap(tap);
        self.redraw.invalidate()
    }

    pub fn battery_changed(&mut self, battery: Option<BatteryInfo>) -> Result<()> {
        if self.battery != battery {
            self.battery = battery;
            self.redraw.invalidate()?;
        }
        Ok(())
    }

    pub fn weather_changed(&mut self, weather: Option<WeatherSummary>) -> Result<()> {
        if self.weather != weather {
            self.weather = weather;
            self.redraw.invalidate()?;
        }
        Ok(())
    }

    /// Tick delivered by the timer host.
    pub fn on_tick(&mut self, handle: TickHandle) -> Result<TickOutcome> {
        self.scheduler.on_tick(
            handle,
            &self.power,
            &self.clock,
            &mut self.timer,
            &mut self.redraw,
        )
    }

    /// Re-evaluate the scheduler against the current power state.
    pub fn reschedule(&mut self) -> Result<SchedulerState> {
        self.scheduler
            .reschedule(&self.power, &self.clock, &mut self.timer)
    }

    /// Paint the face with a fresh clock reading.
    pub fn draw<D>(&mut self, target: &mut D) -> Result<()>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let state = self.face_state();
        self.face.draw(target, &state).inspect_err(|_| {
            warn!("failed to draw face");
        })
    }

    /// Snapshot handed to the face for one frame.
    pub fn face_state(&self) -> WatchFaceState {
        WatchFaceState {
            bounds: self.bounds,
            reading: self.clock.now(),
            power: self.power,
            mode: RenderMode::new(&self.power, self.low_bit_ambient),
            battery: self.battery,
            weather: self.weather,
        }
    }

    /// Stop redrawing for good; call before dropping the service.
    pub fn shutdown(&mut self) {
        debug!("face service shutting down");
        self.scheduler.cancel(&mut self.timer);
    }

    pub fn power(&self) -> &PowerState {
        &self.power
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    pub fn clock(&self) -> &Clock<S> {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock<S> {
        &mut self.clock
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn redraw(&self) -> &R {
        &self.redraw
    }

    pub fn redraw_mut(&mut self) -> &mut R {
        &mut self.redraw
    }

    pub fn face(&self) -> &W {
        &self.face
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }
}
