//! Time-gated difficulty ramp
//!
//! Spawn intervals shrink at fixed elapsed-minute checkpoints. Each step is
//! one-shot: it fires when the minute threshold is reached and the monotonic
//! counter equals the step's index, so no step can fire twice or out of
//! order no matter how many frames observe the condition.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current inter-arrival spawn intervals (ms), shrunk by the ramp
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnIntervals {
    pub car_ms: u64,
    pub bike_ms: u64,
    pub pedestrian_ms: u64,
    pub canister_ms: u64,
}

impl Default for SpawnIntervals {
    fn default() -> Self {
        Self {
            car_ms: CAR_SPAWN_MS,
            bike_ms: BIKE_SPAWN_MS,
            pedestrian_ms: PEDESTRIAN_SPAWN_MS,
            canister_ms: CANISTER_SPAWN_MS,
        }
    }
}

/// One ramp step: minute threshold and interval decrements (ms)
struct Step {
    minute: u64,
    car: u64,
    bike: u64,
    pedestrian: u64,
}

/// Every minute for the first ten minutes, then at 15 and 20
const STEPS: [Step; 12] = [
    Step { minute: 1, car: 500, bike: 1_000, pedestrian: 1_000 },
    Step { minute: 2, car: 500, bike: 1_000, pedestrian: 1_000 },
    Step { minute: 3, car: 0, bike: 1_000, pedestrian: 1_000 },
    Step { minute: 4, car: 500, bike: 1_000, pedestrian: 1_000 },
    Step { minute: 5, car: 500, bike: 1_000, pedestrian: 1_000 },
    Step { minute: 6, car: 200, bike: 500, pedestrian: 0 },
    Step { minute: 7, car: 100, bike: 500, pedestrian: 200 },
    Step { minute: 8, car: 100, bike: 500, pedestrian: 0 },
    Step { minute: 9, car: 100, bike: 500, pedestrian: 0 },
    Step { minute: 10, car: 100, bike: 500, pedestrian: 500 },
    Step { minute: 15, car: 0, bike: 500, pedestrian: 200 },
    Step { minute: 20, car: 0, bike: 500, pedestrian: 200 },
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DifficultyRamp {
    /// Index of the next step to fire; only ever increases
    pub counter: u32,
}

impl DifficultyRamp {
    pub fn new() -> Self {
        Self { counter: 0 }
    }

    /// Apply every step whose minute threshold has been reached, in order.
    /// Intervals saturate at zero (a zero interval spawns every frame).
    pub fn update(&mut self, elapsed_ms: u64, intervals: &mut SpawnIntervals) {
        let minutes = elapsed_ms / 60_000;
        while (self.counter as usize) < STEPS.len() {
            let step = &STEPS[self.counter as usize];
            if minutes < step.minute {
                break;
            }
            intervals.car_ms = intervals.car_ms.saturating_sub(step.car);
            intervals.bike_ms = intervals.bike_ms.saturating_sub(step.bike);
            intervals.pedestrian_ms = intervals.pedestrian_ms.saturating_sub(step.pedestrian);
            self.counter += 1;
            log::info!(
                "difficulty step {} at {} min: car {}ms bike {}ms pedestrian {}ms",
                self.counter,
                minutes,
                intervals.car_ms,
                intervals.bike_ms,
                intervals.pedestrian_ms,
            );
        }
    }
}

impl Default for DifficultyRamp {
    fn default() -> Self {
        Self::new()
    }
}
