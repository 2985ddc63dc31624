//! Application service: the hexagonal core.
//!
//! [`DoorMonitor`] owns the configuration and the door evaluator (baseline
//! and last reported state). All I/O flows through port traits passed in
//! at each call, so the whole boot sequence and loop run against mocks.
//!
//! ```text
//!  RangefinderPort ──▶ ┌──────────────────────┐ ──▶ ReportPort
//!    IndicatorPort ◀── │     DoorMonitor      │ ──▶ EventSink
//!          DelayNs ◀── │ calibration · door   │ ◀── ConnectivityPort
//!                      └──────────────────────┘
//! ```
//!
//! Phases: `Startup → Calibrating → Monitoring(closed) ⇄ Monitoring(open)`.
//! There is no terminal phase; the loop runs until reset.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::calibration::{self, Calibration};
use crate::config::SystemConfig;
use crate::door::{DoorEvaluator, DoorEvent};
use crate::drivers::led_patterns::PatternId;
use crate::error::SensorError;

use super::events::AppEvent;
use super::ports::{ConnectivityPort, EventSink, IndicatorPort, RangefinderPort, ReportPort};
use super::report::ReportOutcome;

/// Where the monitor is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Startup,
    Calibrating,
    Monitoring { door_open: bool },
}

/// What [`DoorMonitor::tick`] did in one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cycle {
    /// No echo; nothing evaluated.
    Skipped,
    /// Reading evaluated, no state change.
    Steady { distance_cm: f32 },
    /// State changed and a report was attempted.
    Transition {
        event: DoorEvent,
        distance_cm: f32,
        outcome: ReportOutcome,
    },
}

pub struct DoorMonitor {
    config: SystemConfig,
    door: DoorEvaluator,
    phase: Phase,
    calibration: Option<Calibration>,
}

impl DoorMonitor {
    pub fn new(config: SystemConfig) -> Self {
        let door = DoorEvaluator::new(config.open_threshold_cm);
        Self {
            config,
            door,
            phase: Phase::Startup,
            calibration: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Boot sequence: LED self test, WiFi association, calibration.
    ///
    /// Calibration only runs when the network came up; otherwise the
    /// baseline stays at 0.
    pub fn start<H, N>(&mut self, hw: &mut H, net: &mut N, sink: &mut impl EventSink)
    where
        H: RangefinderPort + IndicatorPort + DelayNs,
        N: ConnectivityPort,
    {
        self.phase = Phase::Startup;
        sink.emit(&AppEvent::Started);
        Self::indicate(hw, PatternId::SelfTest);

        if self.associate(hw, net, sink) {
            Self::indicate(hw, PatternId::Associated);
            self.phase = Phase::Calibrating;
            self.run_calibration(hw, sink);
        } else {
            if self.config.signal_association_failure {
                Self::indicate(hw, PatternId::AssociationFailed);
            }
            sink.emit(&AppEvent::CalibrationSkipped);
        }

        self.phase = Phase::Monitoring { door_open: self.door.is_open() };
        sink.emit(&AppEvent::Monitoring {
            baseline_cm: self.door.baseline_cm(),
            threshold_cm: self.door.threshold_cm(),
        });
        info!(
            "DoorMonitor monitoring (baseline={:.1} cm, threshold={:.1} cm)",
            self.door.baseline_cm(),
            self.door.threshold_cm()
        );
    }

    /// Poll the station until it is up or the attempt limit runs out.
    fn associate<H, N>(&mut self, hw: &mut H, net: &mut N, sink: &mut impl EventSink) -> bool
    where
        H: DelayNs,
        N: ConnectivityPort,
    {
        if let Err(e) = net.begin() {
            warn!("WiFi: cannot start association: {}", e);
            sink.emit(&AppEvent::NetworkUnavailable { attempts: 0 });
            return false;
        }

        let mut attempts: u8 = 0;
        while !net.is_connected() && attempts < self.config.wifi_connect_attempts {
            hw.delay_ms(self.config.wifi_retry_interval_ms);
            attempts += 1;
        }

        if net.is_connected() {
            sink.emit(&AppEvent::NetworkAssociated { attempts });
            true
        } else {
            sink.emit(&AppEvent::NetworkUnavailable { attempts });
            false
        }
    }

    fn run_calibration<H>(&mut self, hw: &mut H, sink: &mut impl EventSink)
    where
        H: RangefinderPort + IndicatorPort + DelayNs,
    {
        let cal = calibration::calibrate(
            hw,
            self.config.calibration_samples,
            self.config.calibration_interval_ms,
        );
        if let Some(baseline) = cal.baseline_cm {
            self.door.set_baseline(baseline);
        }
        if self.config.signal_calibration_outcome {
            let pattern = if cal.succeeded() {
                PatternId::CalibrationDone
            } else {
                PatternId::CalibrationFailed
            };
            Self::indicate(hw, pattern);
        }
        self.calibration = Some(cal);
        sink.emit(&AppEvent::Calibrated(cal));
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// One monitoring cycle: ping → evaluate → report on change → wait.
    pub fn tick<H, N, R>(
        &mut self,
        hw: &mut H,
        net: &N,
        reporter: &mut R,
        sink: &mut impl EventSink,
    ) -> Cycle
    where
        H: RangefinderPort + IndicatorPort + DelayNs,
        N: ConnectivityPort,
        R: ReportPort,
    {
        // Negative (the flat no-echo sentinel) and NaN readings never reach
        // the evaluator.
        let reading = hw
            .measure_cm()
            .and_then(|cm| if cm >= 0.0 { Ok(cm) } else { Err(SensorError::NoEcho) });
        let distance_cm = match reading {
            Ok(cm) => cm,
            Err(e) => {
                sink.emit(&AppEvent::BadReading(e));
                hw.delay_ms(self.config.bad_reading_retry_ms);
                return Cycle::Skipped;
            }
        };

        let cycle = match self.door.update(distance_cm) {
            Some(event) => {
                self.phase = Phase::Monitoring { door_open: self.door.is_open() };
                sink.emit(&AppEvent::DoorChanged { event, distance_cm });
                let outcome = self.report(event, hw, net, reporter);
                sink.emit(&AppEvent::Reported { event, outcome });
                Cycle::Transition {
                    event,
                    distance_cm,
                    outcome,
                }
            }
            None => Cycle::Steady { distance_cm },
        };

        hw.delay_ms(self.config.poll_interval_ms);
        cycle
    }

    /// Run the monitoring loop forever.
    pub fn run<H, N, R>(
        &mut self,
        hw: &mut H,
        net: &N,
        reporter: &mut R,
        sink: &mut impl EventSink,
    ) -> !
    where
        H: RangefinderPort + IndicatorPort + DelayNs,
        N: ConnectivityPort,
        R: ReportPort,
    {
        loop {
            self.tick(hw, net, reporter, sink);
        }
    }

    /// At-most-once delivery. The door state has already been updated and
    /// is not rolled back on failure.
    fn report<H, N, R>(&self, event: DoorEvent, hw: &mut H, net: &N, reporter: &mut R) -> ReportOutcome
    where
        H: IndicatorPort,
        N: ConnectivityPort,
        R: ReportPort,
    {
        if !net.is_connected() {
            Self::indicate(hw, PatternId::NetworkDown);
            return ReportOutcome::NetworkDown;
        }

        let outcome = ReportOutcome::from_status(reporter.post(event));
        if self.config.signal_report_outcome {
            let pattern = if outcome.delivered() {
                PatternId::ReportDelivered
            } else {
                PatternId::ReportFailed
            };
            Self::indicate(hw, pattern);
        }
        outcome
    }

    fn indicate(hw: &mut impl IndicatorPort, pattern: PatternId) {
        if let Err(e) = hw.show(pattern) {
            warn!("LED pattern {:?} failed: {}", pattern, e);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn baseline_cm(&self) -> f32 {
        self.door.baseline_cm()
    }

    pub fn door_open(&self) -> bool {
        self.door.is_open()
    }

    /// Result of the boot calibration, if it ran.
    pub fn calibration(&self) -> Option<Calibration> {
        self.calibration
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }
}
