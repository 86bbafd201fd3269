//! Time-based interpolation for in-flight turns.
//!
//! A [`Tween`] is advanced by the caller once per tick with the elapsed wall
//! clock time. It reports eased progress while running and signals
//! completion exactly once.

use std::time::Duration;

/// Result of advancing a tween by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Still running; carries the eased progress in `0.0..1.0`.
    Running(f32),
    /// Progress reached 1 on this tick. Returned exactly once.
    Completed,
    /// Completion was already reported on an earlier tick.
    Spent,
}

/// Quadratic ease-in/ease-out over `0..=1`.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[derive(Clone, Debug)]
pub struct Tween {
    duration: Duration,
    elapsed: Duration,
    completed: bool,
}

impl Tween {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            completed: false,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress in `0.0..=1.0`. A zero-length tween is always complete.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Eased progress in `0.0..=1.0`.
    pub fn eased(&self) -> f32 {
        ease_in_out(self.progress())
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Advances the tween by `delta` and reports where it stands.
    pub fn advance(&mut self, delta: Duration) -> Step {
        if self.completed {
            return Step::Spent;
        }
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed >= self.duration {
            self.completed = true;
            Step::Completed
        } else {
            Step::Running(self.eased())
        }
    }
}
