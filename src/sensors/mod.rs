//! Sensor drivers.
//!
//! The door monitor has exactly one sensor: an HC-SR04 rangefinder aimed
//! at the door leaf. See [`ultrasonic`].

pub mod ultrasonic;
