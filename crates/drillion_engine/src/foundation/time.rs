//! Time management utilities

use std::time::{Duration, Instant};

/// Fixed-timestep accumulator driving the simulation.
///
/// Real elapsed time is accumulated and drained in whole `world_dt` steps.
/// The leftover fraction is exposed as [`alpha`](Self::alpha) so rendering can
/// interpolate between the previous and current simulation state.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    world_dt: f32,
    max_steps: u32,
    time: f64,
    world_time: f64,
    step_count: u64,
}

impl FixedTimestep {
    /// Create an accumulator that steps the world every `world_dt` seconds,
    /// running at most `max_steps` steps per [`advance`](Self::advance).
    pub fn new(world_dt: f32, max_steps: u32) -> Self {
        Self {
            world_dt,
            max_steps: max_steps.max(1),
            time: 0.0,
            world_time: 0.0,
            step_count: 0,
        }
    }

    /// Add real elapsed time and return how many world steps are due.
    ///
    /// When more than `max_steps` steps are due the backlog is dropped so a
    /// long stall does not cause a spiral of catch-up frames.
    pub fn advance(&mut self, real_dt: f32) -> u32 {
        self.time += f64::from(real_dt.max(0.0));
        let world_dt = f64::from(self.world_dt);

        let mut steps = 0;
        while self.time > self.world_time + world_dt {
            if steps == self.max_steps {
                log::warn!(
                    "Dropping {:.3}s of simulation backlog",
                    self.time - self.world_time
                );
                self.world_time = self.time - world_dt;
                break;
            }
            self.world_time += world_dt;
            steps += 1;
        }
        self.step_count += u64::from(steps);
        steps
    }

    /// Fixed simulation step in seconds
    pub fn world_dt(&self) -> f32 {
        self.world_dt
    }

    /// Simulation time consumed so far
    pub fn world_time(&self) -> f64 {
        self.world_time
    }

    /// Total number of world steps produced
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Interpolation factor in `[0, 1]` between the last two world steps
    pub fn alpha(&self) -> f32 {
        let alpha = (self.time - self.world_time) / f64::from(self.world_dt);
        alpha.clamp(0.0, 1.0) as f32
    }
}

/// Simple stopwatch for measuring elapsed time
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed += start.elapsed();
            self.start_time = None;
        }
    }

    /// Run `f` while the stopwatch is running
    pub fn measure<R>(&mut self, f: impl FnOnce() -> R) -> R {
        self.start();
        let result = f();
        self.stop();
        result
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let current_elapsed = self.start_time.map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + current_elapsed
    }

    /// Get the elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }

    /// Check if the stopwatch is currently running
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_timestep_drains_whole_steps() {
        let mut clock = FixedTimestep::new(0.1, 10);

        assert_eq!(clock.advance(0.05), 0);
        assert_eq!(clock.advance(0.1), 1);
        assert_eq!(clock.advance(0.2), 2);
        assert_eq!(clock.step_count(), 3);
        assert_relative_eq!(clock.world_time(), 0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_fixed_timestep_caps_backlog() {
        let mut clock = FixedTimestep::new(0.1, 3);

        assert_eq!(clock.advance(5.0), 3);
        // Backlog dropped: next small advance does not produce a burst
        assert!(clock.advance(0.01) <= 1);
    }

    #[test]
    fn test_alpha_in_unit_range() {
        let mut clock = FixedTimestep::new(0.1, 10);
        clock.advance(0.15);
        let alpha = clock.alpha();
        assert!((0.0..=1.0).contains(&alpha));
        assert_relative_eq!(alpha, 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_stopwatch_measure() {
        let mut stopwatch = Stopwatch::new();
        let value = stopwatch.measure(|| 42);
        assert_eq!(value, 42);
        assert!(!stopwatch.is_running());
    }
}
