//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Input, peripherals::P0_12, saadc::Saadc};
use pinetime_watchface::BatteryInfo;

/// Battery API
pub struct Battery {
    /// ADC instance for battery voltage measurement
    adc: Saadc<'static, 1>,
    /// Charge indication pin:
    /// high = battery, low = charging
    pin_charge_indication: Input<'static, P0_12>,
}

impl Battery {
    /// Configure battery settings on boot
    pub fn init(adc: Saadc<'static, 1>, charge_pin: Input<'static, P0_12>) -> Self {
        Self {
            adc,
            pin_charge_indication: charge_pin,
        }
    }

    /// Charging state of the battery
    pub fn is_charging(&self) -> bool {
        self.pin_charge_indication.is_low()
    }

    /// Sample the battery.
    pub async fn read(&mut self) -> BatteryInfo {
        let voltage = self.voltage().await;
        BatteryInfo::from_millivolts(voltage, self.is_charging())
    }

    /// Battery voltage in millivolts
    async fn voltage(&mut self) -> u16 {
        let mut buf = [0; 1];
        self.adc.sample(&mut buf).await;
        // 12 bit sample against a 3.3 V reference, behind a 1:2 divider.
        // Negative readings are noise around 0 V.
        (buf[0].max(0) as u32 * 2000 / 1241) as u16
    }
}
