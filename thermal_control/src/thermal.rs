use no_std_compat::prelude::v1::*;

use crate::config::SimConfig;
use crate::ring::Ring;

/// How strongly the sensor couples to the emitter side. The sensor sits
/// further from the heat source, so it reads 0.8 of the way from ambient to
/// the oldest lag sample.
pub const SENSOR_COUPLING: f64 = 0.8;

/// ## Heat model of an LED + driver + heat sink
///
/// Each commanded level has a steady-state temperature it would settle at if
/// held forever. Every tick the emitter relaxes toward that target at a rate
/// set by the thermal mass, and the new sample enters a lag line that delays
/// what the sensor eventually sees.
///
/// ### Assumptions
/// Heat spreads as a first-order process, no radiative term
/// Steady-state temperature scales linearly with PWM duty
pub struct ThermalModel {
    room_temp: f64,
    thermal_mass: f64,
    target_temps: Vec<f64>,
    lag: Ring,
}

impl ThermalModel {
    pub fn new(config: &SimConfig) -> ThermalModel {
        let room_temp = config.room_temp;
        let fraction = config.total_power_fraction;
        let target_temps = config
            .power_levels
            .iter()
            .map(|level| (*level as f64 * fraction).max(room_temp))
            .collect();
        return ThermalModel {
            room_temp,
            thermal_mass: config.thermal_mass,
            target_temps,
            lag: Ring::new(config.lag_buffer_length, room_temp),
        };
    }

    /// Steady-state temperature of a level held forever. Levels are indexed
    /// from 1, matching the level the firmware displays.
    pub fn target_temp(&self, level: usize) -> f64 {
        self.target_temps[level - 1]
    }

    /// Applies one tick of heating at `commanded_level` and returns the new
    /// emitter temperature.
    pub fn step(&mut self, commanded_level: usize) -> f64 {
        let target = self.target_temp(commanded_level);
        let mut current = self.lag.newest();
        current += (target - current) / self.thermal_mass;
        self.lag.push(current);
        return current;
    }

    /// Temperature at the sensor: the lag line's oldest sample, weighted
    /// toward ambient by [SENSOR_COUPLING].
    pub fn sensor_temp(&self) -> f64 {
        self.room_temp + (self.lag.oldest() - self.room_temp) * SENSOR_COUPLING
    }
}
