//! GPIO initialisation, pin wrappers, and the status LED.

pub mod gpio;
pub mod hw_init;
pub mod led_patterns;
pub mod status_led;
