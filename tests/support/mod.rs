#![allow(dead_code)]

use std::{cell::Cell, rc::Rc};

use embassy_time::Duration;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use pinetime_watchface::{
    DefaultWatchface, FaceConfig, FaceError, LifecycleAdapter, RedrawHost, TickHandle, TimeSource,
    TimerHost,
};

pub type Face = LifecycleAdapter<SimTime, VirtualTimer, CountingRedraw, DefaultWatchface>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Shared virtual wall clock in epoch milliseconds.
#[derive(Clone, Default)]
pub struct SimTime(Rc<Cell<i64>>);

impl SimTime {
    pub fn new(now: i64) -> Self {
        Self(Rc::new(Cell::new(now)))
    }

    pub fn set(&self, now: i64) {
        self.0.set(now);
    }

    pub fn get(&self) -> i64 {
        self.0.get()
    }

    pub fn advance(&self, millis: i64) {
        self.0.set(self.0.get() + millis);
    }
}

impl TimeSource for SimTime {
    fn now_millis(&self) -> i64 {
        self.0.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posted {
    pub handle: TickHandle,
    pub delay: u64,
    pub due: i64,
}

/// Timer host on virtual time that records every post and cancel.
pub struct VirtualTimer {
    time: SimTime,
    next_id: u32,
    pending: Vec<Posted>,
    pub posted: Vec<Posted>,
    pub cancelled: Vec<TickHandle>,
    pub max_outstanding: usize,
    pub fail: bool,
}

impl VirtualTimer {
    pub fn new(time: SimTime) -> Self {
        Self {
            time,
            next_id: 0,
            pending: Vec::new(),
            posted: Vec::new(),
            cancelled: Vec::new(),
            max_outstanding: 0,
            fail: false,
        }
    }

    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }

    /// Earliest pending tick.
    pub fn next_due(&self) -> Option<Posted> {
        self.pending.iter().min_by_key(|p| p.due).copied()
    }

    /// Remove a tick from the queue as the host does right before delivery.
    pub fn take(&mut self, handle: TickHandle) {
        self.pending.retain(|p| p.handle != handle);
    }
}

impl TimerHost for VirtualTimer {
    fn post_delayed(&mut self, delay: Duration) -> Result<TickHandle, FaceError> {
        if self.fail {
            return Err(FaceError::TimerUnavailable);
        }
        self.next_id += 1;
        let posted = Posted {
            handle: TickHandle::new(self.next_id),
            delay: delay.as_millis(),
            due: self.time.get() + delay.as_millis() as i64,
        };
        self.pending.push(posted);
        self.posted.push(posted);
        self.max_outstanding = self.max_outstanding.max(self.pending.len());
        Ok(posted.handle)
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.cancelled.push(handle);
        self.pending.retain(|p| p.handle != handle);
    }
}

#[derive(Default)]
pub struct CountingRedraw {
    pub count: u32,
    pub fail: bool,
}

impl RedrawHost for CountingRedraw {
    fn invalidate(&mut self) -> Result<(), FaceError> {
        if self.fail {
            return Err(FaceError::Redraw);
        }
        self.count += 1;
        Ok(())
    }
}

/// Face service on virtual time, UTC, 240x240 surface, not yet visible.
pub fn face_at(now: i64) -> (Face, SimTime) {
    init_logging();
    let time = SimTime::new(now);
    let config = FaceConfig::default().with_utc_offset(0).unwrap();
    let mut face = LifecycleAdapter::new(
        time.clone(),
        &config,
        DefaultWatchface::from_config(&config),
        VirtualTimer::new(time.clone()),
        CountingRedraw::default(),
    )
    .unwrap();
    face.surface_changed(Size::new(240, 240)).unwrap();
    (face, time)
}

/// Advance virtual time to `until`, delivering due ticks in deadline order,
/// each `latency` ms after its deadline. Returns the number of ticks delivered.
pub fn run_until(face: &mut Face, time: &SimTime, until: i64, latency: i64) -> usize {
    let mut delivered = 0;
    while let Some(next) = face.timer().next_due() {
        if next.due + latency > until {
            break;
        }
        time.set(next.due + latency);
        face.timer_mut().take(next.handle);
        face.on_tick(next.handle).unwrap();
        delivered += 1;
    }
    time.set(until);
    delivered
}

/// In-memory RGB565 frame buffer.
pub struct Canvas {
    pub size: Size,
    pub pixels: Vec<Rgb565>,
}

impl Canvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![Rgb565::RED; (size.width * size.height) as usize],
        }
    }

    pub fn pixel(&self, p: Point) -> Rgb565 {
        self.pixels[(p.y as u32 * self.size.width + p.x as u32) as usize]
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < self.size.width && (p.y as u32) < self.size.height
            {
                self.pixels[(p.y as u32 * self.size.width + p.x as u32) as usize] = color;
            }
        }
        Ok(())
    }
}
