//! Status LED patterns.
//!
//! The board has one plain LED, so every signal is a timed on/off sequence.
//! A pattern expands into [`Step`]s that the
//! [`StatusLed`](super::status_led::StatusLed) plays back with blocking
//! delays.
//!
//! | Pattern            | Shape                  | Default |
//! |--------------------|------------------------|---------|
//! | SelfTest           | 10 × 250 ms            | on      |
//! | Associated         | 3 × 300 ms             | on      |
//! | NetworkDown        | 10 × 50 ms             | on      |
//! | CalibrationDone    | 2 × 200 ms             | gated   |
//! | CalibrationFailed  | 10 × 100 ms            | gated   |
//! | AssociationFailed  | 10 × 100 ms            | gated   |
//! | ReportDelivered    | solid 800 ms           | gated   |
//! | ReportFailed       | 5 × 100 ms             | gated   |
//!
//! Every blink sequence ends with a [`SETTLE_MS`] pause so consecutive
//! patterns stay distinguishable. "Gated" patterns only play when the
//! matching `signal_*` flag in [`SystemConfig`](crate::config::SystemConfig)
//! is set.

/// Dark pause after every blink sequence.
pub const SETTLE_MS: u32 = 500;

/// Pattern identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternId {
    SelfTest,
    Associated,
    NetworkDown,
    CalibrationDone,
    CalibrationFailed,
    AssociationFailed,
    ReportDelivered,
    ReportFailed,
}

/// Shape of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// `times` × (on `delay_ms`, off `delay_ms`), then [`SETTLE_MS`] dark.
    Blink { times: u8, delay_ms: u32 },
    /// On for `on_ms`, then off. No settle pause.
    Hold { on_ms: u32 },
}

/// One LED level held for a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub on: bool,
    pub ms: u32,
}

impl PatternId {
    pub fn pattern(self) -> Pattern {
        match self {
            Self::SelfTest => Pattern::Blink { times: 10, delay_ms: 250 },
            Self::Associated => Pattern::Blink { times: 3, delay_ms: 300 },
            Self::NetworkDown => Pattern::Blink { times: 10, delay_ms: 50 },
            Self::CalibrationDone => Pattern::Blink { times: 2, delay_ms: 200 },
            Self::CalibrationFailed | Self::AssociationFailed => {
                Pattern::Blink { times: 10, delay_ms: 100 }
            }
            Self::ReportDelivered => Pattern::Hold { on_ms: 800 },
            Self::ReportFailed => Pattern::Blink { times: 5, delay_ms: 100 },
        }
    }
}

impl Pattern {
    /// Expand into the LED levels to play, in order.
    pub fn steps(self) -> impl Iterator<Item = Step> {
        let (blinks, hold, settle) = match self {
            Self::Blink { times, delay_ms } => (Some((times, delay_ms)), None, Some(SETTLE_MS)),
            Self::Hold { on_ms } => (None, Some(on_ms), None),
        };

        let blink_steps = blinks.into_iter().flat_map(|(times, ms)| {
            (0..times).flat_map(move |_| [Step { on: true, ms }, Step { on: false, ms }])
        });
        let hold_steps = hold
            .into_iter()
            .flat_map(|ms| [Step { on: true, ms }, Step { on: false, ms: 0 }]);
        let settle_step = settle.map(|ms| Step { on: false, ms });

        blink_steps.chain(hold_steps).chain(settle_step)
    }

    /// Wall time the pattern blocks for.
    pub fn duration_ms(self) -> u32 {
        self.steps().map(|s| s.ms).sum()
    }
}
