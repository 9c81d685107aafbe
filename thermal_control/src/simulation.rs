use no_std_compat::prelude::v1::*;

use crate::config::{ConfigError, SimConfig};
use crate::regulation::Regulator;
use crate::thermal::ThermalModel;

/// One tick of the simulation, everything a chart needs.
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct TraceRow {
    pub tick: u32,
    pub actual_level: usize,
    pub target_level: usize,
    pub emitter_temp: f64,
    pub sensor_temp: f64,
}

/// Drives the heat model and the regulator tick by tick for a fixed horizon.
/// Implemented as an iterator so consumers pull rows as they please; [run]
/// collects the whole trace at once.
///
/// [run]: Simulation::run
pub struct Simulation {
    physics: ThermalModel,
    regulator: Regulator,
    target_level: usize,
    tick: u32,
    max_ticks: u32,
}

impl Simulation {
    pub fn new(config: &SimConfig) -> Result<Simulation, ConfigError> {
        config.validate()?;
        return Ok(Simulation {
            physics: ThermalModel::new(config),
            regulator: Regulator::new(config),
            target_level: config.start_level,
            tick: 0,
            max_ticks: config.max_ticks,
        });
    }

    pub fn run(self) -> Vec<TraceRow> {
        self.collect()
    }
}

impl Iterator for Simulation {
    type Item = TraceRow;

    fn next(&mut self) -> Option<TraceRow> {
        if self.tick >= self.max_ticks {
            return None;
        }
        let emitter_temp = self.physics.step(self.regulator.actual_level());
        let sensor_temp = self.physics.sensor_temp();
        let actual_level = self.regulator.step(sensor_temp);

        let row = TraceRow {
            tick: self.tick,
            actual_level,
            target_level: self.target_level,
            emitter_temp,
            sensor_temp,
        };
        self.tick += 1;
        Some(row)
    }
}
