use serde::{Deserialize, Serialize};

use crate::foundation::core::Fps;
use crate::foundation::error::{FractalError, FractalResult};

/// One host animation callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationTick {
    /// Monotonic tick counter supplied by the host.
    pub seq: u64,
    /// Seconds since the animation clock started.
    pub elapsed_secs: f64,
}

/// Which animation ticks the capture loop turns into frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapturePolicy {
    /// Capture on every tick.
    EveryTick,
    /// Capture on every `n`-th tick after activation (the `n`-th, `2n`-th, ...).
    EveryNthTick(u32),
    /// Capture whenever a frame interval of the given rate has elapsed.
    TargetFps(Fps),
}

impl Default for CapturePolicy {
    /// Skip alternating ticks: roughly half the display refresh rate.
    fn default() -> Self {
        Self::EveryNthTick(2)
    }
}

impl CapturePolicy {
    /// Reject `EveryNthTick(0)`.
    pub fn validate(&self) -> FractalResult<()> {
        match self {
            Self::EveryNthTick(0) => Err(FractalError::validation(
                "capture policy every_nth_tick must be >= 1",
            )),
            Self::TargetFps(fps) => Fps::new(fps.num, fps.den).map(|_| ()),
            _ => Ok(()),
        }
    }
}

/// Per-session admission state for a [`CapturePolicy`].
#[derive(Clone, Debug)]
pub(crate) struct TickGate {
    policy: CapturePolicy,
    ticks_seen: u64,
    origin_secs: Option<f64>,
    next_slot: u64,
}

impl TickGate {
    pub(crate) fn new(policy: CapturePolicy) -> Self {
        Self {
            policy,
            ticks_seen: 0,
            origin_secs: None,
            next_slot: 0,
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.policy);
    }

    /// Decide whether `tick` is captured. Each call consumes the tick.
    pub(crate) fn admit(&mut self, tick: &AnimationTick) -> bool {
        self.ticks_seen += 1;
        match self.policy {
            CapturePolicy::EveryTick => true,
            CapturePolicy::EveryNthTick(n) => self.ticks_seen.is_multiple_of(u64::from(n.max(1))),
            CapturePolicy::TargetFps(fps) => {
                let origin = *self.origin_secs.get_or_insert(tick.elapsed_secs);
                let interval = fps.frame_duration_secs();
                let since = (tick.elapsed_secs - origin).max(0.0);
                // Small epsilon so ticks landing exactly on a slot boundary are not lost to
                // rounding.
                let slot = ((since + 1e-9) / interval).floor() as u64;
                if slot < self.next_slot {
                    return false;
                }
                self.next_slot = slot + 1;
                true
            }
        }
    }
}
