//! Boot sequence: self test, association window, calibration.

use doorsense::app::events::AppEvent;
use doorsense::app::ports::ConnectivityError;
use doorsense::app::service::{Cycle, DoorMonitor, Phase};
use doorsense::calibration::Calibration;
use doorsense::config::SystemConfig;
use doorsense::door::DoorEvent;
use doorsense::drivers::led_patterns::PatternId;

use crate::mock_hw::{MockHardware, MockNetwork, MockReporter, RecordingSink};

fn boot(
    config: SystemConfig,
    hw: &mut MockHardware,
    net: &mut MockNetwork,
) -> (DoorMonitor, RecordingSink) {
    let mut monitor = DoorMonitor::new(config);
    let mut sink = RecordingSink::new();
    monitor.start(hw, net, &mut sink);
    (monitor, sink)
}

#[test]
fn online_boot_calibrates_baseline() {
    let mut hw = MockHardware::with_readings(&[19.0, 20.0, 21.0, 20.0, 20.0]);
    let mut net = MockNetwork::online();
    let (monitor, sink) = boot(SystemConfig::default(), &mut hw, &mut net);

    assert!((monitor.baseline_cm() - 20.0).abs() < 1e-4);
    assert_eq!(monitor.phase(), Phase::Monitoring { door_open: false });
    assert_eq!(hw.patterns, vec![PatternId::SelfTest, PatternId::Associated]);
    assert_eq!(hw.pings, 5);
    // 5 samples × 200 ms, no association wait.
    assert_eq!(hw.elapsed_ms(), 1000);

    assert_eq!(sink.events[0], AppEvent::Started);
    assert_eq!(sink.events[1], AppEvent::NetworkAssociated { attempts: 0 });
    assert!(matches!(sink.events[2], AppEvent::Calibrated(_)));
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::Monitoring { threshold_cm, .. }) if (*threshold_cm - 10.0).abs() < f32::EPSILON
    ));
}

#[test]
fn slow_association_waits_between_polls() {
    let mut hw = MockHardware::with_readings(&[20.0; 5]);
    let mut net = MockNetwork::up_after(3);
    let (_monitor, sink) = boot(SystemConfig::default(), &mut hw, &mut net);

    assert!(sink.contains(&AppEvent::NetworkAssociated { attempts: 3 }));
    // 3 × 500 ms association + 5 × 200 ms calibration.
    assert_eq!(hw.elapsed_ms(), 2500);
}

#[test]
fn offline_boot_gives_up_after_attempt_limit() {
    let mut hw = MockHardware::with_readings(&[20.0; 5]);
    let mut net = MockNetwork::offline();
    let (monitor, sink) = boot(SystemConfig::default(), &mut hw, &mut net);

    // 20 × 500 ms and not a millisecond more.
    assert_eq!(hw.elapsed_ms(), 10_000);
    assert_eq!(hw.pings, 0, "calibration must not run without the network");
    assert!(sink.contains(&AppEvent::NetworkUnavailable { attempts: 20 }));
    assert!(sink.contains(&AppEvent::CalibrationSkipped));
    assert!(monitor.calibration().is_none());
    assert!(monitor.baseline_cm().abs() < f32::EPSILON);
    assert_eq!(monitor.phase(), Phase::Monitoring { door_open: false });
}

#[test]
fn association_failure_is_silent_by_default() {
    let mut hw = MockHardware::new();
    let mut net = MockNetwork::offline();
    boot(SystemConfig::default(), &mut hw, &mut net);
    assert_eq!(hw.patterns, vec![PatternId::SelfTest]);
}

#[test]
fn association_failure_blinks_when_enabled() {
    let config = SystemConfig {
        signal_association_failure: true,
        ..SystemConfig::default()
    };
    let mut hw = MockHardware::new();
    let mut net = MockNetwork::offline();
    boot(config, &mut hw, &mut net);
    assert_eq!(hw.patterns, vec![PatternId::SelfTest, PatternId::AssociationFailed]);
}

#[test]
fn refused_association_does_not_wait() {
    let mut hw = MockHardware::new();
    let mut net = MockNetwork::refusing(ConnectivityError::NoCredentials);
    let (_monitor, sink) = boot(SystemConfig::default(), &mut hw, &mut net);

    assert!(net.begun);
    assert_eq!(hw.elapsed_ms(), 0);
    assert!(sink.contains(&AppEvent::NetworkUnavailable { attempts: 0 }));
    assert!(sink.contains(&AppEvent::CalibrationSkipped));
}

#[test]
fn calibration_averages_only_echoing_samples() {
    let mut hw = MockHardware::new();
    hw.push_readings(&[20.0]);
    hw.push_no_echo();
    hw.push_readings(&[22.0]);
    hw.push_no_echo();
    hw.push_readings(&[24.0]);
    let mut net = MockNetwork::online();
    let (monitor, _sink) = boot(SystemConfig::default(), &mut hw, &mut net);

    let cal = monitor.calibration().expect("calibration ran");
    assert_eq!(cal.samples, 5);
    assert_eq!(cal.valid, 3);
    assert!((monitor.baseline_cm() - 22.0).abs() < 1e-4);
    // Failed samples still cost their interval.
    assert_eq!(hw.elapsed_ms(), 1000);
}

#[test]
fn calibration_outcome_blinks_when_enabled() {
    let config = SystemConfig {
        signal_calibration_outcome: true,
        ..SystemConfig::default()
    };
    let mut hw = MockHardware::with_readings(&[20.0; 5]);
    let mut net = MockNetwork::online();
    boot(config, &mut hw, &mut net);
    assert_eq!(
        hw.patterns,
        vec![PatternId::SelfTest, PatternId::Associated, PatternId::CalibrationDone]
    );
}

#[test]
fn zero_valid_samples_leave_baseline_at_zero() {
    let config = SystemConfig {
        signal_calibration_outcome: true,
        ..SystemConfig::default()
    };
    let mut hw = MockHardware::new();
    let mut net = MockNetwork::online();
    let (mut monitor, mut sink) = boot(config, &mut hw, &mut net);

    assert_eq!(
        monitor.calibration(),
        Some(Calibration {
            samples: 5,
            valid: 0,
            baseline_cm: None
        })
    );
    assert!(hw.showed(PatternId::CalibrationFailed));
    assert!(monitor.baseline_cm().abs() < f32::EPSILON);

    // Anything past the bare threshold reads as open on the first cycle.
    hw.push_readings(&[11.0]);
    let mut reporter = MockReporter::new();
    let cycle = monitor.tick(&mut hw, &net, &mut reporter, &mut sink);
    assert!(matches!(
        cycle,
        Cycle::Transition {
            event: DoorEvent::Opened,
            ..
        }
    ));
    assert_eq!(reporter.posted, vec![DoorEvent::Opened]);
}
