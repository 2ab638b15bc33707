//! Simulation time and the fixed-step accumulator.
//!
//! [`WorldTime`] tracks the scaled frame delta. [`FixedStep`] turns variable
//! frame deltas into a whole number of fixed steps per frame; the remainder
//! carries over to the next frame.

#[derive(Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
        }
    }
}

impl WorldTime {
    /// Apply `time_scale` to the unscaled frame delta and accumulate it.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let scaled_dt = dt * self.time_scale;
        self.elapsed += scaled_dt;
        self.delta = scaled_dt;
        scaled_dt
    }
}

/// Upper bound on catch-up steps after a long frame.
pub const MAX_STEPS_PER_FRAME: u32 = 8;

#[derive(Clone, Copy, Debug)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(step: f32) -> Self {
        Self {
            step: step.max(f32::EPSILON),
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Number of fixed steps to run for a frame of `dt` seconds. Time beyond
    /// [`MAX_STEPS_PER_FRAME`] steps is dropped.
    pub fn steps(&mut self, dt: f32) -> u32 {
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }
        let mut steps = 0;
        while self.accumulator >= self.step {
            if steps == MAX_STEPS_PER_FRAME {
                self.accumulator = 0.0;
                break;
            }
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }
}
