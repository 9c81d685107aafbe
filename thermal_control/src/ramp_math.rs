use no_std_compat::prelude::v1::*;

/// Eyes perceive lightness changes in a non-linear way, roughly as the cube
/// root of luminance. This fills a table of `num_levels` PWM duty values
/// whose perceived brightness climbs in even steps: walk from
/// `cbrt(lumens_min)` to `cbrt(lumens_max)` in equal increments and map each
/// point back to the duty that produces it.
pub fn visually_linear_levels(
    pwm_min: u8,
    pwm_max: u8,
    lumens_min: f64,
    lumens_max: f64,
    num_levels: usize,
) -> Vec<u8> {
    let visual_min = libm::cbrt(lumens_min);
    let visual_max = libm::cbrt(lumens_max);
    let step = (visual_max - visual_min) / (num_levels as f64 - 1.0);

    let mut levels = Vec::with_capacity(num_levels);
    let mut goal = visual_min;
    for _ in 0..num_levels {
        let lumens = goal * goal * goal;
        let duty = lumens / lumens_max * (256.0 - pwm_min as f64) + pwm_min as f64 - 1.0;
        let duty = libm::round(duty).max(pwm_min as f64).min(pwm_max as f64);
        levels.push(duty as u8);
        goal += step;
    }
    return levels;
}

/// Ramp for PWM-frequency-modulated dimming, where brightness below one full
/// duty step comes from shortening the PWM period instead. Each entry is an
/// `(on_time, ceiling)` pair: the on-time is the integer part of a
/// geometrically growing brightness goal, and the fractional part lowers the
/// period ceiling from 255. A `(0, 255)` entry leads the table and a
/// `(255, 255)` entry closes it.
///
/// `growth` picks the step count: 1.094 gives 64 steps, 1.16 gives 40,
/// 1.21 gives 32.
pub fn ontime_ceiling_ramp(growth: f64, lowest: u8) -> Vec<(u8, u8)> {
    let lowest = lowest as f64;
    let mut ramp = Vec::new();
    ramp.push((0, 255));

    let mut goal = lowest;
    while goal <= 255.0 {
        let on_time = libm::floor(goal);
        let fract = goal - on_time;
        let mut ceiling = 255u8;
        if fract > 0.01 {
            let full_steps = on_time + 1.0 - lowest;
            let ratio = 1.0 - full_steps / (full_steps + 1.5);
            let subtract = 255.0 * ratio * libm::sqrt(fract);
            ceiling = (255.0 - subtract) as u8;
        }
        ramp.push((on_time as u8, ceiling));
        goal *= growth;
    }

    ramp.push((255, 255));
    return ramp;
}
