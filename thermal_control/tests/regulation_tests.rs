#[cfg(test)]
mod tests {
    use thermal_control::config::{CounterPolicy, SimConfig};
    use thermal_control::regulation::Regulator;

    /// A reading hot enough that the projection is out of band on every tick.
    const HOT: f64 = 120.0;
    /// Room temperature; projects below the band once the trend is flat.
    const COLD: f64 = 70.0;

    #[test]
    fn first_stepdown_lands_on_the_seventh_hot_tick() {
        let config = SimConfig::default();
        let mut regulator = Regulator::new(&config);

        for _ in 0..6 {
            assert_eq!(regulator.step(HOT), 64);
        }
        // counter has outlasted the lowpass window, the trend is steep, so
        // the drop is proportional to the projected excess
        assert_eq!(regulator.step(HOT), 39);
    }

    #[test]
    fn stepdown_repeats_every_seven_ticks_once_the_trend_flattens() {
        let config = SimConfig::default();
        let mut regulator = Regulator::new(&config);

        let mut levels = vec![];
        for _ in 0..21 {
            levels.push(regulator.step(HOT));
        }
        // a flat-at-120 history projects only 20 over the band, which is
        // less than one 32-degree step, so later drops are single levels
        assert_eq!(levels[6], 39);
        assert_eq!(levels[13], 38);
        assert_eq!(levels[20], 37);
    }

    #[test]
    fn sustained_overheat_never_goes_below_the_stepdown_floor() {
        let config = SimConfig::default();
        let mut regulator = Regulator::new(&config);

        for _ in 0..300 {
            let level = regulator.step(HOT);
            assert!(level >= config.lowest_stepdown);
        }
        assert_eq!(regulator.actual_level(), config.lowest_stepdown);
    }

    #[test]
    fn first_stepup_lands_on_the_ninth_cold_tick() {
        let mut config = SimConfig::default();
        config.start_level = 20;
        let mut regulator = Regulator::new(&config);
        // recover headroom up to the configured ceiling
        regulator_headroom_test(&mut regulator, 20);
    }

    fn regulator_headroom_test(regulator: &mut Regulator, start: usize) {
        for _ in 0..8 {
            assert_eq!(regulator.step(COLD), start);
        }
        assert_eq!(regulator.step(COLD), start + 1);
        // and again 9 ticks later
        for _ in 0..8 {
            assert_eq!(regulator.step(COLD), start + 1);
        }
        assert_eq!(regulator.step(COLD), start + 2);
    }

    #[test]
    fn sustained_underheat_never_goes_above_the_start_level() {
        let mut config = SimConfig::default();
        config.start_level = 20;
        let mut regulator = Regulator::new(&config);

        for _ in 0..300 {
            let level = regulator.step(COLD);
            assert!(level <= 20);
        }
        assert_eq!(regulator.actual_level(), 20);
    }

    #[test]
    fn at_the_start_level_a_cold_reading_holds() {
        let config = SimConfig::default();
        let mut regulator = Regulator::new(&config);

        // already at the ceiling, nothing to recover
        for _ in 0..50 {
            assert_eq!(regulator.step(COLD), 64);
        }
    }

    #[test]
    fn an_in_band_flat_reading_holds() {
        let mut config = SimConfig::default();
        config.room_temp = 95.0;
        let mut regulator = Regulator::new(&config);

        // history is flat at 95, so the projection equals the reading and
        // sits inside [90, 100]
        for _ in 0..50 {
            assert_eq!(regulator.step(95.0), 64);
        }
    }

    #[test]
    fn accumulated_counters_survive_a_hold_and_trigger_early() {
        let mut config = SimConfig::default();
        config.room_temp = 95.0;
        config.counter_policy = CounterPolicy::Accumulate;
        let mut regulator = Regulator::new(&config);

        for _ in 0..5 {
            assert_eq!(regulator.step(HOT), 64);
        }
        // back in band: these ticks hold, the overheat count stays at 5
        for _ in 0..8 {
            assert_eq!(regulator.step(95.0), 64);
        }
        // a fresh hot episode needs only two ticks to trigger
        assert_eq!(regulator.step(HOT), 64);
        assert_eq!(regulator.step(HOT), 51);
    }

    #[test]
    fn reset_on_hold_makes_every_episode_start_over() {
        let mut config = SimConfig::default();
        config.room_temp = 95.0;
        config.counter_policy = CounterPolicy::ResetOnHold;
        let mut regulator = Regulator::new(&config);

        for _ in 0..5 {
            assert_eq!(regulator.step(HOT), 64);
        }
        for _ in 0..8 {
            assert_eq!(regulator.step(95.0), 64);
        }
        // the hold cleared the count, so five more hot ticks change nothing
        for _ in 0..5 {
            assert_eq!(regulator.step(HOT), 64);
        }
    }
}
