use no_std_compat::cmp::max;

use crate::config::{CounterPolicy, SimConfig, LOWPASS_THRESHOLD};
use crate::ring::Ring;

/// Control logic that keeps the sensor temperature inside the configured
/// band by stepping the output level down (overheat) or up (underheat).
///
/// The decision input is not the raw reading but a linear projection of the
/// short-term trend: `projected = sensor + trend * 16`. Reacting to the rate
/// of change compensates for the lag between emitter and sensor; without it
/// every correction lands after the temperature has already run past the
/// band. Two counters lowpass the decision so single noisy readings do not
/// move the level: stepping down triggers after [LOWPASS_THRESHOLD]
/// consecutive hot ticks, stepping up waits two ticks longer.
pub struct Regulator {
    max_temp: f64,
    min_temp: f64,
    lowest_stepdown: usize,
    max_level: usize,
    actual_level: usize,
    history: Ring,
    overheat_count: u32,
    underheat_count: u32,
    counter_policy: CounterPolicy,
}

impl Regulator {
    pub fn new(config: &SimConfig) -> Regulator {
        return Regulator {
            max_temp: config.max_temp,
            min_temp: config.min_temp,
            lowest_stepdown: config.lowest_stepdown,
            max_level: config.start_level,
            actual_level: config.start_level,
            history: Ring::new(config.history_buffer_length, config.room_temp),
            overheat_count: 0,
            underheat_count: 0,
            counter_policy: config.counter_policy,
        };
    }

    pub fn actual_level(&self) -> usize {
        self.actual_level
    }

    /// Feeds this tick's sensor reading and returns the (possibly adjusted)
    /// output level. At most one branch fires per tick.
    pub fn step(&mut self, sensor_temp: f64) -> usize {
        self.history.push(sensor_temp);
        // trend over the history window, truncated toward zero
        let diff = (sensor_temp - self.history.oldest()) as i32;
        let projected = sensor_temp + ((diff << 4) as f64);

        if projected > self.max_temp && self.actual_level > self.lowest_stepdown {
            if self.overheat_count > LOWPASS_THRESHOLD {
                // one level per 32 degrees of projected excess, at least one
                let exceed = ((projected - self.max_temp) as i32) >> 5;
                let step = max(1, exceed) as usize;
                self.actual_level = max(
                    self.lowest_stepdown,
                    self.actual_level.saturating_sub(step),
                );
                self.overheat_count = 0;
            } else {
                self.overheat_count += 1;
            }
        } else if projected < self.min_temp && self.actual_level < self.max_level {
            if self.underheat_count > LOWPASS_THRESHOLD + 2 {
                self.actual_level += 1;
                self.underheat_count = 0;
            } else {
                self.underheat_count += 1;
            }
        } else if self.counter_policy == CounterPolicy::ResetOnHold {
            self.overheat_count = 0;
            self.underheat_count = 0;
        }

        return self.actual_level;
    }
}
