//! Integration test driver for the `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises the monitor against mock
//! adapters. All tests run on the host (x86_64) with no real hardware.

#![cfg(not(target_os = "espidf"))]

mod boot_tests;
mod monitor_tests;
