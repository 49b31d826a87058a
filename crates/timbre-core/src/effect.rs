//! The effect capability contract.
//!
//! Every concrete effect - and anything else a handle can drive - satisfies
//! [`Effect`]. The trait is object-safe so the factory can hand out
//! `Box<dyn Effect + Send>` without knowing the variant, and the dispatch
//! layer forwards to it without inspecting anything.

use crate::error::EffectError;

/// One audio signal-processing algorithm instance.
///
/// Both operations are driven by the host through a handle: an
/// audio-processing thread calls [`process`](Effect::process) in fixed-size
/// buffer increments on a deadline, while a possibly distinct control thread
/// calls [`command`](Effect::command). The dispatch layer forwards both
/// verbatim; any status an implementation returns reaches the host
/// unmodified.
///
/// Implementations must keep both paths real-time safe: bounded latency, no
/// locking, no allocation, no I/O.
///
/// # Example
///
/// ```rust
/// use timbre_core::{Effect, EffectError};
///
/// /// Copies input to output unchanged.
/// struct Passthrough;
///
/// impl Effect for Passthrough {
///     fn process(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), EffectError> {
///         output.copy_from_slice(input);
///         Ok(())
///     }
///
///     fn command(
///         &mut self,
///         opcode: u32,
///         _input: &[u8],
///         _reply: &mut [u8],
///     ) -> Result<usize, EffectError> {
///         Err(EffectError::UnknownCommand(opcode))
///     }
/// }
/// ```
pub trait Effect {
    /// Process one block of interleaved stereo samples.
    ///
    /// `input` and `output` hold the same number of samples, two per frame.
    /// A disabled effect copies input through unchanged.
    fn process(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), EffectError>;

    /// Handle one control command.
    ///
    /// `opcode` selects the operation (see [`CommandCode`](crate::CommandCode)
    /// for the codes the built-in effects interpret - the dispatch layer
    /// attaches no meaning to any value). `input` carries the command
    /// payload; `reply` is caller-supplied storage whose length is the reply
    /// capacity. Returns the number of reply bytes written.
    fn command(&mut self, opcode: u32, input: &[u8], reply: &mut [u8])
    -> Result<usize, EffectError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gain(f32);

    impl Effect for Gain {
        fn process(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), EffectError> {
            for (inp, out) in input.iter().zip(output.iter_mut()) {
                *out = inp * self.0;
            }
            Ok(())
        }

        fn command(
            &mut self,
            opcode: u32,
            _input: &[u8],
            _reply: &mut [u8],
        ) -> Result<usize, EffectError> {
            Err(EffectError::UnknownCommand(opcode))
        }
    }

    #[test]
    fn trait_is_object_safe() {
        let mut effect: Box<dyn Effect + Send> = Box::new(Gain(2.0));
        let input = [0.5, -0.5, 1.0, -1.0];
        let mut output = [0.0; 4];
        effect.process(&input, &mut output).unwrap();
        assert_eq!(output, [1.0, -1.0, 2.0, -2.0]);
    }

    #[test]
    fn command_errors_pass_to_caller() {
        let mut effect = Gain(1.0);
        let err = effect.command(99, &[], &mut []).unwrap_err();
        assert_eq!(err, EffectError::UnknownCommand(99));
    }
}
