//! Bass boost effect.
//!
//! A low-shelf filter below 100 Hz, one biquad per channel. Strength maps
//! linearly onto shelf gain: 0 leaves the signal untouched, 1000 boosts the
//! shelf by 12 dB.
//!
//! # Parameters
//!
//! | Id | Name | Access | Range |
//! |----|------|--------|-------|
//! | 0 | Strength supported | read-only | always 1 |
//! | 1 | Strength | read/write | 0..=1000 |

use timbre_core::{Biquad, Effect, EffectError, low_shelf_coefficients};

use crate::control::{self, ControlState, Controllable};

/// Whether strength control is supported (read-only, always 1).
pub const PARAM_STRENGTH_SUPPORTED: u32 = 0;
/// Boost strength, 0..=1000.
pub const PARAM_STRENGTH: u32 = 1;

/// Shelf corner frequency.
const CORNER_HZ: f32 = 100.0;
/// Shelf gain at full strength.
const MAX_BOOST_DB: f32 = 12.0;

/// Low-shelf bass boost.
#[derive(Debug, Clone)]
pub struct BassBoost {
    control: ControlState,
    strength: u16,
    shelves: [Biquad; 2],
}

impl BassBoost {
    /// Create a bass boost at zero strength.
    pub fn new() -> Self {
        let mut boost = Self {
            control: ControlState::new(),
            strength: 0,
            shelves: [Biquad::new(), Biquad::new()],
        };
        boost.update_coefficients();
        boost
    }

    /// Set the boost strength (clamped to 0..=1000).
    pub fn set_strength(&mut self, strength: u16) {
        self.strength = strength.min(1000);
        self.update_coefficients();
    }

    /// Current boost strength.
    pub fn strength(&self) -> u16 {
        self.strength
    }

    fn update_coefficients(&mut self) {
        let gain_db = MAX_BOOST_DB * f32::from(self.strength) / 1000.0;
        let (b0, b1, b2, a0, a1, a2) =
            low_shelf_coefficients(CORNER_HZ, gain_db, self.control.sample_rate());
        for shelf in &mut self.shelves {
            shelf.set_coefficients(b0, b1, b2, a0, a1, a2);
        }
    }
}

impl Default for BassBoost {
    fn default() -> Self {
        Self::new()
    }
}

impl Controllable for BassBoost {
    fn control(&mut self) -> &mut ControlState {
        &mut self.control
    }

    fn on_configure(&mut self) {
        self.update_coefficients();
        for shelf in &mut self.shelves {
            shelf.clear();
        }
    }

    fn reset_state(&mut self) {
        for shelf in &mut self.shelves {
            shelf.clear();
        }
    }

    fn write_param(&mut self, param: u32, value: i32) -> Result<(), EffectError> {
        match param {
            PARAM_STRENGTH_SUPPORTED => Err(EffectError::ReadOnlyParam(param)),
            PARAM_STRENGTH => {
                self.strength = control::strength_from_value(param, value)?;
                self.update_coefficients();
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

impl Effect for BassBoost {
    fn process(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), EffectError> {
        control::check_layout(input, output)?;
        if !self.control.enabled {
            output.copy_from_slice(input);
            return Ok(());
        }
        for (frame_in, frame_out) in input.chunks_exact(2).zip(output.chunks_exact_mut(2)) {
            frame_out[0] = self.shelves[0].process(frame_in[0]);
            frame_out[1] = self.shelves[1].process(frame_in[1]);
        }
        Ok(())
    }

    fn command(&mut self, opcode: u32, input: &[u8], reply: &mut [u8])
    -> Result<usize, EffectError> {
        control::run_command(self, opcode, input, reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timbre_core::CommandCode;

    fn sine(freq_hz: f32, sample_rate: f32, frames: usize) -> Vec<f32> {
        let mut buffer = Vec::with_capacity(frames * 2);
        for n in 0..frames {
            let s = libm::sinf(core::f32::consts::TAU * freq_hz * n as f32 / sample_rate) * 0.25;
            buffer.push(s);
            buffer.push(s);
        }
        buffer
    }

    fn rms(interleaved: &[f32]) -> f32 {
        let sum_sq: f32 = interleaved.iter().map(|&s| s * s).sum();
        libm::sqrtf(sum_sq / interleaved.len() as f32)
    }

    #[test]
    fn disabled_passes_through_bit_exactly() {
        let mut boost = BassBoost::new();
        boost.set_strength(1000);
        let input = sine(50.0, 48000.0, 256);
        let mut output = vec![0.0; input.len()];
        boost.process(&input, &mut output).unwrap();
        assert_eq!(input, output);
    }

    #[test]
    fn full_strength_lifts_low_frequencies() {
        let mut boost = BassBoost::new();
        boost.set_strength(1000);
        boost
            .command(CommandCode::Enable.raw(), &[], &mut [])
            .unwrap();

        let input = sine(30.0, 48000.0, 4800);
        let mut output = vec![0.0; input.len()];
        boost.process(&input, &mut output).unwrap();

        // Skip the first half to let the filter settle.
        let gain = rms(&output[4800..]) / rms(&input[4800..]);
        assert!(gain > 2.0, "30 Hz should gain ~4x at full strength, got {gain}");
    }

    #[test]
    fn zero_strength_is_transparent_at_high_frequencies() {
        let mut boost = BassBoost::new();
        boost
            .command(CommandCode::Enable.raw(), &[], &mut [])
            .unwrap();

        let input = sine(8000.0, 48000.0, 4800);
        let mut output = vec![0.0; input.len()];
        boost.process(&input, &mut output).unwrap();

        let gain = rms(&output[4800..]) / rms(&input[4800..]);
        assert!((gain - 1.0).abs() < 0.1, "high band should be untouched, got {gain}");
    }

    #[test]
    fn strength_round_trips_through_the_control_channel() {
        let mut boost = BassBoost::new();
        let mut payload = [0u8; 8];
        payload[0..4].copy_from_slice(&PARAM_STRENGTH.to_le_bytes());
        payload[4..8].copy_from_slice(&600i32.to_le_bytes());
        boost
            .command(CommandCode::SetParam.raw(), &payload, &mut [])
            .unwrap();
        assert_eq!(boost.strength(), 600);

        let mut reply = [0u8; 4];
        boost
            .command(
                CommandCode::GetParam.raw(),
                &PARAM_STRENGTH.to_le_bytes(),
                &mut reply,
            )
            .unwrap();
        assert_eq!(i32::from_le_bytes(reply), 600);
    }

    #[test]
    fn strength_supported_is_read_only() {
        let mut boost = BassBoost::new();
        let err = boost.write_param(PARAM_STRENGTH_SUPPORTED, 0);
        assert_eq!(err, Err(EffectError::ReadOnlyParam(PARAM_STRENGTH_SUPPORTED)));
        assert_eq!(boost.read_param(PARAM_STRENGTH_SUPPORTED), Ok(1));
    }
}
