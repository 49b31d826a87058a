//! Shared control-channel plumbing for the built-in effects.
//!
//! All five variants speak the same command set; only their parameter
//! spaces differ. Each effect embeds a [`ControlState`], implements
//! [`Controllable`] for its parameter and lifecycle hooks, and forwards
//! its `Effect::command` to [`run_command`].

use timbre_core::{
    CommandCode, EffectError, StreamConfig, decode_get_param, decode_set_param,
    encode_param_value,
};

/// Per-instance control state common to every built-in effect.
#[derive(Debug, Clone)]
pub(crate) struct ControlState {
    /// Active stream format; default until the host sends set-config.
    pub config: StreamConfig,
    /// Effects come up disabled and pass audio through until enabled.
    pub enabled: bool,
}

impl ControlState {
    pub fn new() -> Self {
        Self {
            config: StreamConfig::default(),
            enabled: false,
        }
    }

    /// Sample rate of the active stream format, as f32 for DSP math.
    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate as f32
    }
}

/// Parameter access and lifecycle hooks implemented by each built-in effect.
pub(crate) trait Controllable {
    fn control(&mut self) -> &mut ControlState;

    /// Called after a new stream configuration has been stored; the effect
    /// recalculates sample-rate-dependent coefficients here.
    fn on_configure(&mut self);

    /// Clear internal DSP state without touching parameters.
    fn reset_state(&mut self);

    fn write_param(&mut self, param: u32, value: i32) -> Result<(), EffectError>;

    fn read_param(&self, param: u32) -> Result<i32, EffectError>;
}

/// Interpret one command against an effect.
///
/// Returns the number of reply bytes written. Commands without reply data
/// write nothing and return zero; success and failure travel through the
/// `Result` alone.
pub(crate) fn run_command<E: Controllable>(
    effect: &mut E,
    opcode: u32,
    input: &[u8],
    reply: &mut [u8],
) -> Result<usize, EffectError> {
    let code = CommandCode::from_raw(opcode).ok_or(EffectError::UnknownCommand(opcode))?;
    match code {
        CommandCode::Init => Ok(0),
        CommandCode::SetConfig => {
            let config = StreamConfig::decode(input)?;
            if config.channels != 2 || config.sample_rate == 0 {
                return Err(EffectError::UnsupportedConfig);
            }
            effect.control().config = config;
            effect.on_configure();
            Ok(0)
        }
        CommandCode::GetConfig => {
            let config = effect.control().config;
            config.encode(reply)
        }
        CommandCode::Reset => {
            effect.reset_state();
            Ok(0)
        }
        CommandCode::Enable => {
            effect.control().enabled = true;
            Ok(0)
        }
        CommandCode::Disable => {
            effect.control().enabled = false;
            Ok(0)
        }
        CommandCode::SetParam => {
            let (param, value) = decode_set_param(input)?;
            effect.write_param(param, value)?;
            Ok(0)
        }
        CommandCode::GetParam => {
            let param = decode_get_param(input)?;
            let value = effect.read_param(param)?;
            encode_param_value(reply, value)
        }
        // Session notifications the built-in effects have no use for;
        // accepted without inspecting the payload.
        CommandCode::SetDevice | CommandCode::SetVolume | CommandCode::SetAudioMode => Ok(0),
    }
}

/// Validate the interleaved stereo frame layout of a process call.
pub(crate) fn check_layout(input: &[f32], output: &[f32]) -> Result<(), EffectError> {
    if input.len() != output.len() || input.len() % 2 != 0 {
        return Err(EffectError::BufferMismatch {
            input: input.len(),
            output: output.len(),
        });
    }
    Ok(())
}

/// Validate a strength-parameter write (0..=1000).
pub(crate) fn strength_from_value(param: u32, value: i32) -> Result<u16, EffectError> {
    if (0..=1000).contains(&value) {
        Ok(value as u16)
    } else {
        Err(EffectError::ValueOutOfRange { param, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal effect exercising only the shared plumbing.
    struct Probe {
        control: ControlState,
        strength: u16,
        configures: usize,
        resets: usize,
    }

    impl Probe {
        fn new() -> Self {
            Self {
                control: ControlState::new(),
                strength: 0,
                configures: 0,
                resets: 0,
            }
        }
    }

    impl Controllable for Probe {
        fn control(&mut self) -> &mut ControlState {
            &mut self.control
        }

        fn on_configure(&mut self) {
            self.configures += 1;
        }

        fn reset_state(&mut self) {
            self.resets += 1;
        }

        fn write_param(&mut self, param: u32, value: i32) -> Result<(), EffectError> {
            match param {
                1 => {
                    self.strength = strength_from_value(param, value)?;
                    Ok(())
                }
                _ => Err(EffectError::UnknownParam(param)),
            }
        }

        fn read_param(&self, param: u32) -> Result<i32, EffectError> {
            match param {
                1 => Ok(i32::from(self.strength)),
                _ => Err(EffectError::UnknownParam(param)),
            }
        }
    }

    fn set_param_payload(param: u32, value: i32) -> [u8; 8] {
        let mut payload = [0u8; 8];
        payload[0..4].copy_from_slice(&param.to_le_bytes());
        payload[4..8].copy_from_slice(&value.to_le_bytes());
        payload
    }

    #[test]
    fn enable_disable_flips_control_state() {
        let mut probe = Probe::new();
        run_command(&mut probe, CommandCode::Enable.raw(), &[], &mut []).unwrap();
        assert!(probe.control.enabled);
        run_command(&mut probe, CommandCode::Disable.raw(), &[], &mut []).unwrap();
        assert!(!probe.control.enabled);
    }

    #[test]
    fn set_config_stores_and_notifies() {
        let mut probe = Probe::new();
        let config = StreamConfig {
            sample_rate: 44_100,
            channels: 2,
        };
        let mut payload = [0u8; StreamConfig::ENCODED_LEN];
        config.encode(&mut payload).unwrap();

        run_command(&mut probe, CommandCode::SetConfig.raw(), &payload, &mut []).unwrap();
        assert_eq!(probe.control.config, config);
        assert_eq!(probe.configures, 1);
    }

    #[test]
    fn mono_config_is_rejected() {
        let mut probe = Probe::new();
        let config = StreamConfig {
            sample_rate: 48_000,
            channels: 1,
        };
        let mut payload = [0u8; StreamConfig::ENCODED_LEN];
        config.encode(&mut payload).unwrap();

        let err = run_command(&mut probe, CommandCode::SetConfig.raw(), &payload, &mut []);
        assert_eq!(err, Err(EffectError::UnsupportedConfig));
        assert_eq!(probe.configures, 0);
    }

    #[test]
    fn get_config_round_trips() {
        let mut probe = Probe::new();
        let mut reply = [0u8; StreamConfig::ENCODED_LEN];
        let written =
            run_command(&mut probe, CommandCode::GetConfig.raw(), &[], &mut reply).unwrap();
        assert_eq!(written, StreamConfig::ENCODED_LEN);
        assert_eq!(StreamConfig::decode(&reply).unwrap(), StreamConfig::default());
    }

    #[test]
    fn set_and_get_param_through_the_channel() {
        let mut probe = Probe::new();
        run_command(
            &mut probe,
            CommandCode::SetParam.raw(),
            &set_param_payload(1, 750),
            &mut [],
        )
        .unwrap();

        let mut reply = [0u8; 4];
        let written = run_command(
            &mut probe,
            CommandCode::GetParam.raw(),
            &1u32.to_le_bytes(),
            &mut reply,
        )
        .unwrap();
        assert_eq!(written, 4);
        assert_eq!(i32::from_le_bytes(reply), 750);
    }

    #[test]
    fn out_of_range_strength_is_rejected() {
        let mut probe = Probe::new();
        let err = run_command(
            &mut probe,
            CommandCode::SetParam.raw(),
            &set_param_payload(1, 1001),
            &mut [],
        );
        assert_eq!(
            err,
            Err(EffectError::ValueOutOfRange {
                param: 1,
                value: 1001
            })
        );
    }

    #[test]
    fn unknown_opcode_is_rejected() {
        let mut probe = Probe::new();
        let err = run_command(&mut probe, 0x10000, &[], &mut []);
        assert_eq!(err, Err(EffectError::UnknownCommand(0x10000)));
    }

    #[test]
    fn session_notifications_are_accepted() {
        let mut probe = Probe::new();
        for code in [
            CommandCode::SetDevice,
            CommandCode::SetVolume,
            CommandCode::SetAudioMode,
        ] {
            assert_eq!(run_command(&mut probe, code.raw(), &[1, 2, 3], &mut []), Ok(0));
        }
    }

    #[test]
    fn reset_reaches_the_effect() {
        let mut probe = Probe::new();
        run_command(&mut probe, CommandCode::Reset.raw(), &[], &mut []).unwrap();
        assert_eq!(probe.resets, 1);
    }

    #[test]
    fn layout_check_rejects_mismatch_and_odd_counts() {
        assert!(check_layout(&[0.0; 4], &[0.0; 4]).is_ok());
        assert!(check_layout(&[0.0; 4], &[0.0; 2]).is_err());
        assert!(check_layout(&[0.0; 3], &[0.0; 3]).is_err());
        assert!(check_layout(&[], &[]).is_ok());
    }
}
