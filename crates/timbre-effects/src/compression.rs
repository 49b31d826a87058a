//! Dynamic range compression effect.
//!
//! A feed-forward compressor with stereo-linked detection: the envelope is
//! taken from the mid signal `(L + R) / 2` so both channels receive the same
//! gain and the stereo image does not shift. Strength maps onto the
//! compression curve; auto-makeup recovers roughly half the static gain
//! reduction.
//!
//! # Signal Flow
//!
//! ```text
//! Mid → Envelope Follower → Gain Computer → Gain → Both Channels
//! ```
//!
//! # Parameters
//!
//! | Id | Name | Access | Range |
//! |----|------|--------|-------|
//! | 0 | Strength supported | read-only | always 1 |
//! | 1 | Strength | read/write | 0..=1000 |

use timbre_core::{Effect, EffectError, EnvelopeFollower, db_to_linear, linear_to_db};

use crate::control::{self, ControlState, Controllable};

/// Whether strength control is supported (read-only, always 1).
pub const PARAM_STRENGTH_SUPPORTED: u32 = 0;
/// Compression strength, 0..=1000.
pub const PARAM_STRENGTH: u32 = 1;

/// Stereo-linked dynamic range compressor.
#[derive(Debug, Clone)]
pub struct Compression {
    control: ControlState,
    strength: u16,
    envelope: EnvelopeFollower,
    threshold_db: f32,
    ratio: f32,
    makeup: f32,
}

impl Compression {
    /// Create a compressor at zero strength (transparent).
    pub fn new() -> Self {
        let control = ControlState::new();
        let mut envelope = EnvelopeFollower::new(control.sample_rate());
        envelope.set_attack_ms(5.0);
        envelope.set_release_ms(120.0);

        let mut compression = Self {
            control,
            strength: 0,
            envelope,
            threshold_db: 0.0,
            ratio: 1.0,
            makeup: 1.0,
        };
        compression.update_curve();
        compression
    }

    /// Set the compression strength (clamped to 0..=1000).
    pub fn set_strength(&mut self, strength: u16) {
        self.strength = strength.min(1000);
        self.update_curve();
    }

    /// Current compression strength.
    pub fn strength(&self) -> u16 {
        self.strength
    }

    /// Derive threshold, ratio, and makeup gain from strength.
    ///
    /// Full strength reaches a -30 dB threshold at 10:1.
    fn update_curve(&mut self) {
        let s = f32::from(self.strength) / 1000.0;
        self.threshold_db = -3.0 - 27.0 * s;
        self.ratio = 1.0 + 9.0 * s;
        let static_reduction = -self.threshold_db * (1.0 - 1.0 / self.ratio);
        self.makeup = db_to_linear(static_reduction * 0.5);
    }
}

impl Default for Compression {
    fn default() -> Self {
        Self::new()
    }
}

impl Controllable for Compression {
    fn control(&mut self) -> &mut ControlState {
        &mut self.control
    }

    fn on_configure(&mut self) {
        self.envelope.set_sample_rate(self.control.sample_rate());
        self.envelope.reset();
    }

    fn reset_state(&mut self) {
        self.envelope.reset();
    }

    fn write_param(&mut self, param: u32, value: i32) -> Result<(), EffectError> {
        match param {
            PARAM_STRENGTH_SUPPORTED => Err(EffectError::ReadOnlyParam(param)),
            PARAM_STRENGTH => {
                self.strength = control::strength_from_value(param, value)?;
                self.update_curve();
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

impl Effect for Compression {
    fn process(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), EffectError> {
        control::check_layout(input, output)?;
        if !self.control.enabled {
            output.copy_from_slice(input);
            return Ok(());
        }

        let inv_ratio_complement = 1.0 - 1.0 / self.ratio;
        for (frame_in, frame_out) in input.chunks_exact(2).zip(output.chunks_exact_mut(2)) {
            let left = frame_in[0];
            let right = frame_in[1];

            let mid = (left + right) * 0.5;
            let envelope_db = linear_to_db(self.envelope.process(mid));
            let overshoot = envelope_db - self.threshold_db;
            let gain_reduction_db = if overshoot > 0.0 {
                -overshoot * inv_ratio_complement
            } else {
                0.0
            };

            let gain = db_to_linear(gain_reduction_db) * self.makeup;
            frame_out[0] = left * gain;
            frame_out[1] = right * gain;
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

    fn enabled(strength: u16) -> Compression {
        let mut compression = Compression::new();
        compression.set_strength(strength);
        compression
            .command(CommandCode::Enable.raw(), &[], &mut [])
            .unwrap();
        compression
    }

    fn rms(interleaved: &[f32]) -> f32 {
        let sum_sq: f32 = interleaved.iter().map(|&s| s * s).sum();
        libm::sqrtf(sum_sq / interleaved.len() as f32)
    }

    #[test]
    fn output_stays_finite() {
        let mut compression = enabled(1000);
        let input = vec![0.9_f32; 2048];
        let mut output = vec![0.0; 2048];
        compression.process(&input, &mut output).unwrap();
        assert!(output.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn loud_signal_is_reduced() {
        let mut compression = enabled(1000);

        // A loud square-ish signal well above the -30 dB threshold.
        let input: Vec<f32> = (0..9600)
            .map(|n| if (n / 2) % 48 < 24 { 0.8 } else { -0.8 })
            .collect();
        let mut output = vec![0.0; input.len()];
        compression.process(&input, &mut output).unwrap();

        // After the envelope settles, the compressed signal must sit below
        // the input even with makeup applied.
        let settled = input.len() / 2;
        assert!(
            rms(&output[settled..]) < rms(&input[settled..]),
            "full-strength compression should reduce a loud signal"
        );
    }

    #[test]
    fn zero_strength_is_transparent() {
        let mut compression = enabled(0);
        let input: Vec<f32> = (0..2048)
            .map(|n| libm::sinf(n as f32 * 0.01) * 0.5)
            .collect();
        let mut output = vec![0.0; input.len()];
        compression.process(&input, &mut output).unwrap();

        for (inp, out) in input.iter().zip(&output) {
            assert!(
                (inp - out).abs() < 0.01,
                "ratio 1:1 should be transparent: {inp} vs {out}"
            );
        }
    }

    #[test]
    fn both_channels_receive_the_same_gain() {
        let mut compression = enabled(800);
        let mut input = Vec::with_capacity(4096);
        for n in 0..2048 {
            input.push(libm::sinf(n as f32 * 0.02) * 0.9);
            input.push(libm::sinf(n as f32 * 0.02) * 0.45);
        }
        let mut output = vec![0.0; input.len()];
        compression.process(&input, &mut output).unwrap();

        // Linked detection: per-frame L/R ratio must match the input's.
        for frame in output.chunks_exact(2).skip(512) {
            if frame[1].abs() > 1e-4 {
                let ratio = frame[0] / frame[1];
                assert!((ratio - 2.0).abs() < 0.01, "image shifted: ratio {ratio}");
            }
        }
    }

    #[test]
    fn reset_clears_the_envelope() {
        let mut compression = enabled(1000);
        let input = vec![0.9_f32; 2048];
        let mut output = vec![0.0; 2048];
        compression.process(&input, &mut output).unwrap();

        compression
            .command(CommandCode::Reset.raw(), &[], &mut [])
            .unwrap();
        assert_eq!(compression.envelope.level(), 0.0);
    }
}
