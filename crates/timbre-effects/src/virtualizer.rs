//! Headset virtualization effect.
//!
//! Approximates loudspeaker listening on headphones by bleeding a
//! low-passed copy of each channel into the other, the way a listener's
//! head shadows high frequencies crossing between ears. Strength scales the
//! crossfeed amount; the sum is renormalized to keep the level steady.
//!
//! # Parameters
//!
//! | Id | Name | Access | Range |
//! |----|------|--------|-------|
//! | 0 | Strength supported | read-only | always 1 |
//! | 1 | Strength | read/write | 0..=1000 |

use timbre_core::{Biquad, Effect, EffectError, lowpass_coefficients};

use crate::control::{self, ControlState, Controllable};

/// Whether strength control is supported (read-only, always 1).
pub const PARAM_STRENGTH_SUPPORTED: u32 = 0;
/// Virtualization strength, 0..=1000.
pub const PARAM_STRENGTH: u32 = 1;

/// Crossfeed low-pass cutoff, approximating head shadowing.
const CROSSFEED_CUTOFF_HZ: f32 = 700.0;
/// Crossfeed amount at full strength.
const MAX_CROSSFEED: f32 = 0.5;

/// Crossfeed headset virtualizer.
#[derive(Debug, Clone)]
pub struct Virtualizer {
    control: ControlState,
    strength: u16,
    /// Low-pass state for the left-into-right and right-into-left paths.
    crossfeed: [Biquad; 2],
}

impl Virtualizer {
    /// Create a virtualizer at zero strength.
    pub fn new() -> Self {
        let mut virtualizer = Self {
            control: ControlState::new(),
            strength: 0,
            crossfeed: [Biquad::new(), Biquad::new()],
        };
        virtualizer.update_coefficients();
        virtualizer
    }

    /// Set the virtualization strength (clamped to 0..=1000).
    pub fn set_strength(&mut self, strength: u16) {
        self.strength = strength.min(1000);
    }

    /// Current virtualization strength.
    pub fn strength(&self) -> u16 {
        self.strength
    }

    fn update_coefficients(&mut self) {
        let (b0, b1, b2, a0, a1, a2) = lowpass_coefficients(
            CROSSFEED_CUTOFF_HZ,
            0.707,
            self.control.sample_rate(),
        );
        for filter in &mut self.crossfeed {
            filter.set_coefficients(b0, b1, b2, a0, a1, a2);
        }
    }
}

impl Default for Virtualizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Controllable for Virtualizer {
    fn control(&mut self) -> &mut ControlState {
        &mut self.control
    }

    fn on_configure(&mut self) {
        self.update_coefficients();
        for filter in &mut self.crossfeed {
            filter.clear();
        }
    }

    fn reset_state(&mut self) {
        for filter in &mut self.crossfeed {
            filter.clear();
        }
    }

    fn write_param(&mut self, param: u32, value: i32) -> Result<(), EffectError> {
        match param {
            PARAM_STRENGTH_SUPPORTED => Err(EffectError::ReadOnlyParam(param)),
            PARAM_STRENGTH => {
                self.strength = control::strength_from_value(param, value)?;
                Ok(())
            }
            _ => Err(EffectError::UnknownParam(param)),
        }
    }

    fn read_param(&self, param: u32) -> Result<i32, EffectError> {
        match param {
            PARAM_STRENGTH_SUPPORTED => Ok(1),
            PARAM_STRENGTH => Ok(i32::from(self.strength)),
            _ => Err(EffectError::UnknownParam(param)),
        }
    }
}

impl Effect for Virtualizer {
    fn process(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), EffectError> {
        control::check_layout(input, output)?;
        if !self.control.enabled {
            output.copy_from_slice(input);
            return Ok(());
        }

        let amount = MAX_CROSSFEED * f32::from(self.strength) / 1000.0;
        let norm = 1.0 / (1.0 + amount);
        for (frame_in, frame_out) in input.chunks_exact(2).zip(output.chunks_exact_mut(2)) {
            let left = frame_in[0];
            let right = frame_in[1];
            let bleed_into_left = self.crossfeed[0].process(right) * amount;
            let bleed_into_right = self.crossfeed[1].process(left) * amount;
            frame_out[0] = (left + bleed_into_left) * norm;
            frame_out[1] = (right + bleed_into_right) * norm;
        }
        Ok(())
    }

    fn command(&mut self, opcode: u32, input: &[u8], reply: &mut [u8])
    -> Result<usize, EffectError> {
        control::run_command(self, opcode, input, reply)
    }
}
