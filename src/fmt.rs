//! Logging backend selection
//!
//! `defmt` on the device, the `log` facade on the host, nothing otherwise.
#![allow(unused_imports, unused_macros)]

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        pub(crate) use defmt::{debug, error, info, trace, warn};
    } else if #[cfg(feature = "log")] {
        pub(crate) use log::{debug, error, info, trace, warn};
    } else {
        macro_rules! trace {
            ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }};
        }
        macro_rules! debug {
            ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }};
        }
        macro_rules! info {
            ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }};
        }
        macro_rules! warn {
            ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }};
        }
        macro_rules! error {
            ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }};
        }
        pub(crate) use {debug, error, info, trace, warn};
    }
}
