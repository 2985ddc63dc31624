//! Application core: pure domain logic, zero I/O.
//!
//! The boot sequence and the monitoring loop live in [`service`]. All
//! interaction with hardware and the network happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod report;
pub mod service;
