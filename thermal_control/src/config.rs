use no_std_compat::prelude::v1::*;

use no_std_compat::fmt;

/// 64-step power ramp, PWM duty with max=255. Generated with
/// [crate::ramp_math::visually_linear_levels] and hand-tweaked at the low end
/// so moon mode stays visible.
pub const POWER_RAMP: &'static [u8] = &[
    1, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 4, 5, 5, 6, 7, 8, 9, 10, 11, 13, 14, 16, 18, 20, 22, 24, 26,
    29, 32, 34, 38, 41, 44, 48, 51, 55, 60, 64, 68, 73, 78, 84, 89, 95, 101, 107, 113, 120, 127,
    134, 142, 150, 158, 166, 175, 184, 193, 202, 212, 222, 233, 244, 255,
];

/// Consecutive ticks a projection must stay out of band before the regulator
/// acts on it. Stepping back up waits two ticks longer than stepping down.
pub const LOWPASS_THRESHOLD: u32 = 5;

/// What happens to the hysteresis counters on a tick where neither the
/// overheat nor the underheat branch fires.
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum CounterPolicy {
    /// Counters keep their value across hold ticks. Separate out-of-band
    /// episodes pool their ticks, so a later episode can trigger early.
    Accumulate,
    /// Both counters clear on every hold tick; each out-of-band episode has
    /// to outlast the lowpass window on its own.
    ResetOnHold,
}

/// Constants for one simulation run. All values are fixed at construction,
/// checked by [SimConfig::validate].
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub room_temp: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    /// Bigger heat sink = higher value = slower temperature response.
    pub thermal_mass: f64,
    /// Samples between the emitter and the sensor, models propagation delay.
    pub lag_buffer_length: usize,
    /// Sensor readings kept for the short-term trend.
    pub history_buffer_length: usize,
    /// Fraction of the PWM duty that ends up as heat, max 1.0.
    pub total_power_fraction: f64,
    /// Selectable output levels, non-decreasing, indexed 1..=len.
    pub power_levels: Vec<u8>,
    /// Regulation never steps below this level index.
    pub lowest_stepdown: usize,
    /// Level the run starts at; also the ceiling regulation may return to.
    pub start_level: usize,
    pub max_ticks: u32,
    pub counter_policy: CounterPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        return SimConfig {
            room_temp: 70.0,
            max_temp: 100.0,
            min_temp: 90.0,
            thermal_mass: 32.0,
            lag_buffer_length: 16,
            history_buffer_length: 8,
            total_power_fraction: 0.75,
            power_levels: POWER_RAMP.to_vec(),
            lowest_stepdown: POWER_RAMP.len() / 4,
            start_level: POWER_RAMP.len(),
            max_ticks: 600,
            counter_policy: CounterPolicy::Accumulate,
        };
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum ConfigError {
    EmptyLevelTable,
    DecreasingLevelTable { index: usize },
    NonPositiveThermalMass,
    PowerFractionOutOfRange,
    InvertedTemperatureBand,
    LagBufferTooShort,
    HistoryBufferTooShort,
    StepdownFloorOutOfRange,
    StartLevelOutOfRange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::EmptyLevelTable => write!(f, "power level table is empty"),
            ConfigError::DecreasingLevelTable { index } => {
                write!(f, "power level table decreases at index {}", index)
            }
            ConfigError::NonPositiveThermalMass => write!(f, "thermal mass must be positive"),
            ConfigError::PowerFractionOutOfRange => {
                write!(f, "total power fraction must be within (0, 1]")
            }
            ConfigError::InvertedTemperatureBand => {
                write!(f, "min_temp must be below max_temp")
            }
            ConfigError::LagBufferTooShort => write!(f, "lag buffer needs at least 1 sample"),
            ConfigError::HistoryBufferTooShort => {
                write!(f, "history buffer needs at least 2 samples")
            }
            ConfigError::StepdownFloorOutOfRange => {
                write!(f, "lowest stepdown level is outside the level table")
            }
            ConfigError::StartLevelOutOfRange => {
                write!(f, "start level is outside [lowest_stepdown, table length]")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.power_levels.is_empty() {
            return Err(ConfigError::EmptyLevelTable);
        }
        for (index, pair) in self.power_levels.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(ConfigError::DecreasingLevelTable { index: index + 1 });
            }
        }
        if !(self.thermal_mass > 0.0) {
            return Err(ConfigError::NonPositiveThermalMass);
        }
        if !(self.total_power_fraction > 0.0 && self.total_power_fraction <= 1.0) {
            return Err(ConfigError::PowerFractionOutOfRange);
        }
        if self.min_temp >= self.max_temp {
            return Err(ConfigError::InvertedTemperatureBand);
        }
        if self.lag_buffer_length < 1 {
            return Err(ConfigError::LagBufferTooShort);
        }
        if self.history_buffer_length < 2 {
            return Err(ConfigError::HistoryBufferTooShort);
        }
        if self.lowest_stepdown < 1 || self.lowest_stepdown > self.power_levels.len() {
            return Err(ConfigError::StepdownFloorOutOfRange);
        }
        if self.start_level < self.lowest_stepdown || self.start_level > self.power_levels.len() {
            return Err(ConfigError::StartLevelOutOfRange);
        }
        Ok(())
    }
}
