use num::complex::Complex32;
use std::f32::consts::PI;

/// Four-quadrant phase of a complex sample.
/// The zero sample maps to a zero phase, which keeps a DC-free cell silent.
pub fn sample_phase(sample: Complex32) -> f32 {
    sample.im.atan2(sample.re)
}

/// Incremental phase unwrapper.
///
/// Fed one wrapped phase per frame, it accumulates a correction that undoes
/// the 2-pi jumps of the atan2 output so that consecutive unwrapped phases
/// can be differenced into a displacement series. Steps larger than pi are
/// folded back; a step that lands exactly on the negative boundary while
/// moving forward is mapped onto +pi.
pub struct PhaseUnwrapper {
    previous_wrapped: f32,
    correction: f32,
}

impl PhaseUnwrapper {
    pub fn new(first_phase: f32) -> Self {
        Self {
            previous_wrapped: first_phase,
            correction: 0.0,
        }
    }

    /// Consumes the next wrapped phase and returns its unwrapped value.
    pub fn advance(&mut self, phase: f32) -> f32 {
        let delta = phase - self.previous_wrapped;
        let wraps = if delta > PI {
            1.0
        } else if delta < -PI {
            -1.0
        } else {
            0.0
        };
        let mut folded = delta - 2.0 * PI * wraps;
        if folded == -PI && delta > 0.0 {
            folded = PI;
        }
        let mut correction = folded - delta;
        if correction.abs() < PI && correction != 0.0 {
            correction = 0.0;
        }
        self.correction += correction;
        self.previous_wrapped = phase;
        phase + self.correction
    }
}

const FIXED_PHASE_SCALE: f32 = 32768.0 / PI;

/// Quantises a phase in [-pi, pi] to the 16-bit fixed-point wire format.
pub fn radians_to_fixed_phase(phase: f32) -> i16 {
    let scaled = (phase * FIXED_PHASE_SCALE).round();
    scaled.clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

/// Expands a 16-bit fixed-point phase back to radians.
pub fn fixed_phase_to_radians(fixed: i16) -> f32 {
    fixed as f32 / FIXED_PHASE_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(phase: f32) -> f32 {
        // Maps an arbitrary phase into (-pi, pi] the way atan2 would report it.
        let wrapped = phase.rem_euclid(2.0 * PI);
        if wrapped > PI { wrapped - 2.0 * PI } else { wrapped }
    }

    #[test]
    fn unwraps_a_forward_ramp() {
        let step = 0.9f32;
        let mut unwrapper = PhaseUnwrapper::new(0.0);
        for index in 1..64 {
            let expected = step * index as f32;
            let unwrapped = unwrapper.advance(wrap(expected));
            assert!((unwrapped - expected).abs() < 1e-3, "step {}: {} != {}", index, unwrapped, expected);
        }
    }

    #[test]
    fn unwraps_a_backward_ramp() {
        let step = -1.1f32;
        let mut unwrapper = PhaseUnwrapper::new(0.0);
        for index in 1..64 {
            let expected = step * index as f32;
            let unwrapped = unwrapper.advance(wrap(expected));
            assert!((unwrapped - expected).abs() < 1e-3, "step {}: {} != {}", index, unwrapped, expected);
        }
    }

    #[test]
    fn small_steps_pass_through_untouched() {
        let mut unwrapper = PhaseUnwrapper::new(0.25);
        assert_eq!(unwrapper.advance(0.5), 0.5);
        assert_eq!(unwrapper.advance(-0.5), -0.5);
    }

    #[test]
    fn fixed_phase_round_trips_over_the_full_domain() {
        for fixed in i16::MIN..=i16::MAX {
            let round_tripped = radians_to_fixed_phase(fixed_phase_to_radians(fixed));
            assert_eq!(round_tripped, fixed, "fixed phase {} did not survive the round trip", fixed);
        }
    }
}
