//! Stereo widener effect.
//!
//! Mid/side width expansion: the side signal is scaled up while the mid
//! signal passes unchanged, pushing content toward the edges of the image.
//! Strength 0 is the identity; strength 1000 doubles the side level.
//!
//! # Parameters
//!
//! | Id | Name | Access | Range |
//! |----|------|--------|-------|
//! | 0 | Strength supported | read-only | always 1 |
//! | 1 | Strength | read/write | 0..=1000 |

use timbre_core::{Effect, EffectError};

use crate::control::{self, ControlState, Controllable};

/// Whether strength control is supported (read-only, always 1).
pub const PARAM_STRENGTH_SUPPORTED: u32 = 0;
/// Widening strength, 0..=1000.
pub const PARAM_STRENGTH: u32 = 1;

/// Mid/side stereo widener.
#[derive(Debug, Clone)]
pub struct StereoWide {
    control: ControlState,
    strength: u16,
}

impl StereoWide {
    /// Create a widener at zero strength (identity).
    pub fn new() -> Self {
        Self {
            control: ControlState::new(),
            strength: 0,
        }
    }

    /// Set the widening strength (clamped to 0..=1000).
    pub fn set_strength(&mut self, strength: u16) {
        self.strength = strength.min(1000);
    }

    /// Current widening strength.
    pub fn strength(&self) -> u16 {
        self.strength
    }
}

impl Default for StereoWide {
    fn default() -> Self {
        Self::new()
    }
}

impl Controllable for StereoWide {
    fn control(&mut self) -> &mut ControlState {
        &mut self.control
    }

    fn on_configure(&mut self) {
        // Stateless matrix; nothing depends on the sample rate.
    }

    fn reset_state(&mut self) {}

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

impl Effect for StereoWide {
    fn process(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), EffectError> {
        control::check_layout(input, output)?;
        if !self.control.enabled {
            output.copy_from_slice(input);
            return Ok(());
        }

        let width = 1.0 + f32::from(self.strength) / 1000.0;
        for (frame_in, frame_out) in input.chunks_exact(2).zip(output.chunks_exact_mut(2)) {
            let mid = (frame_in[0] + frame_in[1]) * 0.5;
            let side = (frame_in[0] - frame_in[1]) * 0.5 * width;
            frame_out[0] = mid + side;
            frame_out[1] = mid - side;
        }
        Ok(())
    }

    fn command(&mut self, opcode: u32, input: &[u8], reply: &mut [u8])
    -> Result<usize, EffectError> {
        control::run_command(self, opcode, input, reply)
    }
}
