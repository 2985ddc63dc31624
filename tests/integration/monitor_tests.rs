//! Monitoring loop: edge-triggered events, reporting, failure handling.

use doorsense::app::events::AppEvent;
use doorsense::app::report::ReportOutcome;
use doorsense::app::service::{Cycle, DoorMonitor, Phase};
use doorsense::config::SystemConfig;
use doorsense::door::DoorEvent;
use doorsense::drivers::led_patterns::PatternId;
use doorsense::error::{CommsError, SensorError};
use doorsense::sensors::ultrasonic::{NO_ECHO_CM, distance_or_sentinel};

use crate::mock_hw::{MockHardware, MockNetwork, MockReporter, RecordingSink};

struct Rig {
    monitor: DoorMonitor,
    hw: MockHardware,
    net: MockNetwork,
    reporter: MockReporter,
    sink: RecordingSink,
}

impl Rig {
    /// Booted with a 20 cm baseline, threshold 10 cm; boot history cleared.
    fn calibrated(config: SystemConfig) -> Self {
        let mut hw = MockHardware::with_readings(&[20.0; 5]);
        let mut net = MockNetwork::online();
        let mut sink = RecordingSink::new();
        let mut monitor = DoorMonitor::new(config);
        monitor.start(&mut hw, &mut net, &mut sink);

        hw.patterns.clear();
        hw.reset_clock();
        sink.events.clear();
        Self {
            monitor,
            hw,
            net,
            reporter: MockReporter::new(),
            sink,
        }
    }

    fn feed(&mut self, cm: f32) -> Cycle {
        self.hw.push_readings(&[cm]);
        self.monitor
            .tick(&mut self.hw, &self.net, &mut self.reporter, &mut self.sink)
    }
}

// ── Edge-triggered detection ──────────────────────────────────

#[test]
fn far_reading_opens_and_reports() {
    let mut rig = Rig::calibrated(SystemConfig::default());

    let cycle = rig.feed(35.0);

    assert_eq!(
        cycle,
        Cycle::Transition {
            event: DoorEvent::Opened,
            distance_cm: 35.0,
            outcome: ReportOutcome::Delivered(201),
        }
    );
    assert!(rig.monitor.door_open());
    assert_eq!(rig.monitor.phase(), Phase::Monitoring { door_open: true });
    assert_eq!(rig.reporter.posted, vec![DoorEvent::Opened]);
}

#[test]
fn near_reading_after_open_closes() {
    let mut rig = Rig::calibrated(SystemConfig::default());
    rig.feed(35.0);

    let cycle = rig.feed(22.0);

    assert!(matches!(
        cycle,
        Cycle::Transition {
            event: DoorEvent::Closed,
            ..
        }
    ));
    assert!(!rig.monitor.door_open());
    assert_eq!(rig.reporter.posted, vec![DoorEvent::Opened, DoorEvent::Closed]);
}

#[test]
fn staying_open_reports_once() {
    let mut rig = Rig::calibrated(SystemConfig::default());
    rig.feed(35.0);

    assert_eq!(rig.feed(36.0), Cycle::Steady { distance_cm: 36.0 });
    assert_eq!(rig.feed(34.0), Cycle::Steady { distance_cm: 34.0 });
    assert_eq!(rig.reporter.posted, vec![DoorEvent::Opened]);
}

#[test]
fn threshold_itself_is_not_open() {
    let mut rig = Rig::calibrated(SystemConfig::default());

    assert_eq!(rig.feed(30.0), Cycle::Steady { distance_cm: 30.0 });
    assert!(!rig.monitor.door_open());
    assert!(matches!(rig.feed(30.5), Cycle::Transition { .. }));
}

#[test]
fn closed_door_stays_quiet() {
    let mut rig = Rig::calibrated(SystemConfig::default());
    for cm in [20.0, 21.0, 19.5, 25.0] {
        assert!(matches!(rig.feed(cm), Cycle::Steady { .. }));
    }
    assert!(rig.reporter.posted.is_empty());
    assert!(rig.hw.patterns.is_empty());
}

#[test]
fn transition_emits_change_then_report() {
    let mut rig = Rig::calibrated(SystemConfig::default());
    rig.feed(35.0);

    assert_eq!(
        rig.sink.events,
        vec![
            AppEvent::DoorChanged {
                event: DoorEvent::Opened,
                distance_cm: 35.0
            },
            AppEvent::Reported {
                event: DoorEvent::Opened,
                outcome: ReportOutcome::Delivered(201)
            },
        ]
    );
}

// ── Timing ────────────────────────────────────────────────────

#[test]
fn every_evaluated_cycle_waits_poll_interval() {
    let mut rig = Rig::calibrated(SystemConfig::default());
    rig.feed(20.0);
    assert_eq!(rig.hw.elapsed_ms(), 250);
    rig.feed(35.0);
    assert_eq!(rig.hw.elapsed_ms(), 500);
}

#[test]
fn missing_echo_skips_cycle_with_short_retry() {
    let mut rig = Rig::calibrated(SystemConfig::default());
    rig.hw.push_no_echo();

    let cycle = rig
        .monitor
        .tick(&mut rig.hw, &rig.net, &mut rig.reporter, &mut rig.sink);

    assert_eq!(cycle, Cycle::Skipped);
    assert_eq!(rig.hw.elapsed_ms(), 80);
    assert_eq!(rig.sink.events, vec![AppEvent::BadReading(SensorError::NoEcho)]);
    assert!(!rig.monitor.door_open());
}

#[test]
fn missing_echo_never_closes_an_open_door() {
    let mut rig = Rig::calibrated(SystemConfig::default());
    rig.feed(35.0);
    rig.hw.push_no_echo();
    rig.monitor
        .tick(&mut rig.hw, &rig.net, &mut rig.reporter, &mut rig.sink);
    assert!(rig.monitor.door_open());
    assert_eq!(rig.reporter.posted.len(), 1);
}

#[test]
fn sentinel_and_nan_readings_never_flip_state() {
    let mut rig = Rig::calibrated(SystemConfig::default());
    rig.feed(35.0);
    rig.hw.reset_clock();
    rig.sink.events.clear();

    assert_eq!(rig.feed(NO_ECHO_CM), Cycle::Skipped);
    assert_eq!(rig.feed(distance_or_sentinel(0)), Cycle::Skipped);
    assert_eq!(rig.feed(f32::NAN), Cycle::Skipped);

    assert!(rig.monitor.door_open());
    assert_eq!(rig.reporter.posted, vec![DoorEvent::Opened]);
    assert_eq!(rig.hw.elapsed_ms(), 3 * 80);
    assert_eq!(
        rig.sink.events,
        vec![AppEvent::BadReading(SensorError::NoEcho); 3]
    );
    assert_eq!(rig.feed(35.0), Cycle::Steady { distance_cm: 35.0 });
}

// ── Delivery failures ─────────────────────────────────────────

#[test]
fn network_down_drops_event_and_blinks() {
    let mut rig = Rig::calibrated(SystemConfig::default());
    rig.net.set_link(false);

    let cycle = rig.feed(35.0);

    assert!(matches!(
        cycle,
        Cycle::Transition {
            outcome: ReportOutcome::NetworkDown,
            ..
        }
    ));
    assert!(rig.reporter.posted.is_empty(), "no request without a link");
    assert_eq!(rig.hw.patterns, vec![PatternId::NetworkDown]);
    // State is not rolled back and the event is not retried.
    assert!(rig.monitor.door_open());
    rig.net.set_link(true);
    assert_eq!(rig.feed(36.0), Cycle::Steady { distance_cm: 36.0 });
    assert!(rig.reporter.posted.is_empty());
}

#[test]
fn rejected_status_is_not_retried() {
    let mut rig = Rig::calibrated(SystemConfig::default());
    rig.reporter = MockReporter::new().respond_with(Ok(500));

    let cycle = rig.feed(35.0);

    assert!(matches!(
        cycle,
        Cycle::Transition {
            outcome: ReportOutcome::Rejected(500),
            ..
        }
    ));
    rig.feed(35.0);
    assert_eq!(rig.reporter.posted, vec![DoorEvent::Opened]);
    assert!(rig.hw.patterns.is_empty(), "report outcome is silent by default");
}

#[test]
fn transport_failure_is_reported_as_such() {
    let mut rig = Rig::calibrated(SystemConfig::default());
    rig.reporter = MockReporter::new().respond_with(Err(CommsError::HttpRequestFailed));

    let cycle = rig.feed(35.0);
    assert!(matches!(
        cycle,
        Cycle::Transition {
            outcome: ReportOutcome::TransportFailed(CommsError::HttpRequestFailed),
            ..
        }
    ));
}

#[test]
fn report_outcome_lights_led_when_enabled() {
    let config = SystemConfig {
        signal_report_outcome: true,
        ..SystemConfig::default()
    };
    let mut rig = Rig::calibrated(config);
    rig.reporter = MockReporter::new().respond_with(Ok(200)).respond_with(Ok(404));

    rig.feed(35.0);
    rig.feed(20.0);

    assert_eq!(
        rig.hw.patterns,
        vec![PatternId::ReportDelivered, PatternId::ReportFailed]
    );
}
