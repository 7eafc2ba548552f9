#![no_std]
#![no_main]

mod host;
mod peripherals;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel};
use embassy_time::{Duration, Ticker, Timer};
use embedded_graphics::prelude::OriginDimensions;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use host::{EmbassyTimerHost, FrameRedraw};
use peripherals::{
    backlight::Backlight, battery::Battery, button::Button, display::Display, SystemConfig,
};
use pinetime_watchface::{
    system::scheduler::phase_aligned_delay, BatteryInfo, DefaultWatchface, FaceConfig,
    LifecycleAdapter, Result, TimeReference, TimeSource,
};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

type Face = LifecycleAdapter<TimeReference, EmbassyTimerHost, FrameRedraw, DefaultWatchface>;

/// Events from the board towards the face service.
enum HostEvent {
    Button,
    Battery(BatteryInfo),
    MinuteTick,
}

static EVENTS: Channel<ThreadModeRawMutex, HostEvent, 4> = Channel::new();

/// What the button cycles through.
#[derive(Clone, Copy, PartialEq, Eq, defmt::Format)]
enum Screen {
    Interactive,
    Ambient,
    Off,
}

impl Screen {
    fn next(self) -> Self {
        match self {
            Screen::Interactive => Screen::Ambient,
            Screen::Ambient => Screen::Off,
            Screen::Off => Screen::Interactive,
        }
    }
}

fn report<T>(result: Result<T>) {
    if let Err(e) = result {
        defmt::warn!("face service error: {}", e);
    }
}

/// Push a screen mode into the face service and the backlight.
fn apply_screen(face: &mut Face, backlight: &mut Backlight, screen: Screen) {
    defmt::info!("Screen mode: {}", screen);
    match screen {
        Screen::Interactive => {
            report(face.ambient_mode_changed(false));
            report(face.visibility_changed(true));
        }
        Screen::Ambient => report(face.ambient_mode_changed(true)),
        Screen::Off => report(face.visibility_changed(false)),
    }
    if face.power().is_visible() {
        backlight.set_for_mode(face.face_state().mode);
    } else {
        backlight.off();
    }
}

/// Runs the face service: delivers ticks, host events, and repaints.
#[embassy_executor::task]
async fn run_face(mut display: Display<SPI2>, mut backlight: Backlight, reference: TimeReference) {
    let config = FaceConfig::default();
    let mut face = unwrap!(LifecycleAdapter::new(
        reference,
        &config,
        DefaultWatchface::from_config(&config),
        EmbassyTimerHost::default(),
        FrameRedraw::default(),
    ));
    report(face.surface_changed(display.size()));

    let mut screen = Screen::Interactive;
    apply_screen(&mut face, &mut backlight, screen);

    loop {
        if face.redraw_mut().take() && face.power().is_visible() {
            report(face.draw(&mut display));
        }

        let event = select(face.timer().fired(), EVENTS.receive()).await;
        match event {
            Either::First(handle) => {
                face.timer_mut().take(handle);
                report(face.on_tick(handle));
            }
            Either::Second(HostEvent::Button) => {
                screen = screen.next();
                apply_screen(&mut face, &mut backlight, screen);
            }
            Either::Second(HostEvent::Battery(info)) => {
                report(face.battery_changed(Some(info)));
            }
            Either::Second(HostEvent::MinuteTick) => {
                if screen == Screen::Ambient {
                    report(face.time_tick());
                }
            }
        }
    }
}

/// Polls the button state every 10ms
#[embassy_executor::task]
async fn poll_button(mut button: Button) {
    loop {
        if button.pressed().await {
            EVENTS.send(HostEvent::Button).await;
        }
        Timer::after(Duration::from_millis(10)).await;
    }
}

/// Sample the battery every 10s.
#[embassy_executor::task]
async fn sample_battery(mut battery: Battery) {
    let mut tick = Ticker::every(Duration::from_secs(10));
    loop {
        let info = battery.read().await;
        defmt::debug!("Battery: {}% (charging: {})", info.percent, info.charging);
        EVENTS.send(HostEvent::Battery(info)).await;
        tick.next().await;
    }
}

/// Minute ticks on the wall-clock minute boundary.
#[embassy_executor::task]
async fn minute_ticks(reference: TimeReference) {
    let minute = Duration::from_secs(60);
    loop {
        Timer::after(phase_aligned_delay(reference.now_millis(), minute)).await;
        EVENTS.send(HostEvent::MinuteTick).await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(&mut p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    let battery = Battery::init(saadc, Input::new(p.P0_12, Pull::None));

    // Backlight stays off until the first frame is configured
    let backlight = Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
        0,
    );

    let button = Button::init(
        Input::new(p.P0_13, Pull::None),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
    );

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
    ));

    let reference = TimeReference::from_epoch_millis(UTC_EPOCH_MILLIS);

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(run_face(display, backlight, reference)));
    unwrap!(spawner.spawn(poll_button(button)));
    unwrap!(spawner.spawn(sample_battery(battery)));
    unwrap!(spawner.spawn(minute_ticks(reference)));
}
