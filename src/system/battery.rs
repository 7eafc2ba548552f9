//! Battery level shown on the face

/// Charge level and charging state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryInfo {
    /// Charge in percent (0–100).
    pub percent: u8,
    /// Charging state
    pub charging: bool,
}

impl BatteryInfo {
    /// Estimate the charge from the battery voltage in millivolts.
    pub fn from_millivolts(voltage: u16, charging: bool) -> Self {
        // Use fixed data points and linear interpolation in between
        // to estimate battery capacity.
        let percent = match voltage {
            0..=3449 => 0,
            3450..=3699 => (voltage - 3450) / 5,
            3700..=4199 => 50 + (voltage - 3700) / 10,
            _ => 100,
        };
        Self {
            percent: percent as u8,
            charging,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voltage_curve() {
        assert_eq!(BatteryInfo::from_millivolts(3300, false).percent, 0);
        assert_eq!(BatteryInfo::from_millivolts(3450, false).percent, 0);
        assert_eq!(BatteryInfo::from_millivolts(3600, false).percent, 30);
        assert_eq!(BatteryInfo::from_millivolts(3700, false).percent, 50);
        assert_eq!(BatteryInfo::from_millivolts(4000, false).percent, 80);
        assert_eq!(BatteryInfo::from_millivolts(4200, true).percent, 100);
        assert!(BatteryInfo::from_millivolts(4200, true).charging);
    }
}
