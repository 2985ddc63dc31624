//! GPIO pin assignments for the doorsense board (ESP32-C3 SuperMini).
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Status LED
// ---------------------------------------------------------------------------

/// On-board blue LED. Digital output, HIGH = on.
pub const LED_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// HC-SR04 ultrasonic rangefinder
// ---------------------------------------------------------------------------

/// Digital output: a HIGH pulse starts a measurement.
pub const TRIG_GPIO: i32 = 2;
/// Digital input: HIGH for the round-trip time of the ping.
/// The sensor runs at 5 V, so the echo line goes through a divider.
pub const ECHO_GPIO: i32 = 3;
