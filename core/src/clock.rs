//! Simulation clock: owns the tick counter, speed control, and pause.

use crate::types::{RunId, Tick};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TickClock {
    pub run_id:       RunId,
    pub current_tick: Tick,
    pub speed:        TickSpeed,
    pub paused:       bool,
}

impl TickClock {
    pub fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            current_tick: 0,
            speed: TickSpeed::Normal,
            paused: true,
        }
    }

    /// Advance one tick. Returns the new tick number.
    /// Panics if called while paused; callers must check.
    pub fn advance(&mut self) -> Tick {
        assert!(!self.paused, "advance() called on paused clock");
        self.current_tick += 1;
        self.current_tick
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }

    pub fn set_speed(&mut self, speed: TickSpeed) {
        self.speed = speed;
    }

    /// How many ticks one driver step runs at the current speed.
    pub fn ticks_per_step(&self) -> u64 {
        match self.speed {
            TickSpeed::Normal      => 1,
            TickSpeed::Accelerated => 5,
            TickSpeed::FastForward => 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TickSpeed {
    Normal,
    Accelerated,
    FastForward,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_paused_at_tick_zero() {
        let clock = TickClock::new("run".into());
        assert!(clock.paused);
        assert_eq!(clock.current_tick, 0);
        assert_eq!(clock.ticks_per_step(), 1);
    }

    #[test]
    #[should_panic(expected = "paused clock")]
    fn advancing_a_paused_clock_panics() {
        TickClock::new("run".into()).advance();
    }
}
