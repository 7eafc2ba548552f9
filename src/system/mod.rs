//! System state: wall clock, power state, battery and redraw scheduling

pub mod battery;
pub mod config;
pub mod power;
pub mod scheduler;
pub mod time;
