//! Control-channel opcodes and payload codecs.
//!
//! The host drives every live effect through a generic command channel:
//! an opcode, an input payload, and caller-supplied reply storage. The
//! dispatch layer forwards all of it verbatim; only the effect interprets
//! the opcode. This module defines the opcode values of the host contract
//! and the little-endian payload encodings the built-in effects speak.

use crate::error::EffectError;

/// Control command opcodes.
///
/// The numeric values are part of the host contract and must not be
/// renumbered. Opcodes absent from this set are rejected by the built-in
/// effects with [`EffectError::UnknownCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum CommandCode {
    /// Initialize the effect after creation.
    Init = 0,
    /// Apply a stream configuration (see [`StreamConfig`]).
    SetConfig = 1,
    /// Clear internal DSP state without touching parameters.
    Reset = 2,
    /// Start processing; a disabled effect passes audio through.
    Enable = 3,
    /// Stop processing and revert to passthrough.
    Disable = 4,
    /// Write one parameter value.
    SetParam = 5,
    /// Read one parameter value.
    GetParam = 8,
    /// Notify the output device. Accepted and ignored by built-in effects.
    SetDevice = 9,
    /// Notify the stream volume. Accepted and ignored by built-in effects.
    SetVolume = 10,
    /// Notify the audio mode. Accepted and ignored by built-in effects.
    SetAudioMode = 11,
    /// Read back the active stream configuration.
    GetConfig = 14,
}

impl CommandCode {
    /// Decode a raw opcode, if it is part of the command set.
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(CommandCode::Init),
            1 => Some(CommandCode::SetConfig),
            2 => Some(CommandCode::Reset),
            3 => Some(CommandCode::Enable),
            4 => Some(CommandCode::Disable),
            5 => Some(CommandCode::SetParam),
            8 => Some(CommandCode::GetParam),
            9 => Some(CommandCode::SetDevice),
            10 => Some(CommandCode::SetVolume),
            11 => Some(CommandCode::SetAudioMode),
            14 => Some(CommandCode::GetConfig),
            _ => None,
        }
    }

    /// The raw opcode value.
    pub const fn raw(self) -> u32 {
        self as u32
    }
}

/// Stream format conveyed by [`CommandCode::SetConfig`].
///
/// Wire image: `sample_rate` then `channels`, both `u32` little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Interleaved channel count. The built-in effects are stereo-only.
    pub channels: u32,
}

impl StreamConfig {
    /// Length of the encoded image in bytes.
    pub const ENCODED_LEN: usize = 8;

    /// Decode a set-config payload.
    pub fn decode(payload: &[u8]) -> Result<Self, EffectError> {
        if payload.len() < Self::ENCODED_LEN {
            return Err(EffectError::BadPayload);
        }
        Ok(Self {
            sample_rate: u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]),
            channels: u32::from_le_bytes([payload[4], payload[5], payload[6], payload[7]]),
        })
    }

    /// Encode into caller-supplied reply storage, returning the bytes written.
    pub fn encode(&self, reply: &mut [u8]) -> Result<usize, EffectError> {
        if reply.len() < Self::ENCODED_LEN {
            return Err(EffectError::ReplyTooSmall {
                needed: Self::ENCODED_LEN,
                capacity: reply.len(),
            });
        }
        reply[0..4].copy_from_slice(&self.sample_rate.to_le_bytes());
        reply[4..8].copy_from_slice(&self.channels.to_le_bytes());
        Ok(Self::ENCODED_LEN)
    }
}

impl Default for StreamConfig {
    /// 48 kHz stereo, the format effects assume until configured.
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            channels: 2,
        }
    }
}

/// Decode a set-param payload: `param: u32` then `value: i32`, little-endian.
pub fn decode_set_param(payload: &[u8]) -> Result<(u32, i32), EffectError> {
    if payload.len() < 8 {
        return Err(EffectError::BadPayload);
    }
    let param = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
    let value = i32::from_le_bytes([payload[4], payload[5], payload[6], payload[7]]);
    Ok((param, value))
}

/// Decode a get-param payload: `param: u32`, little-endian.
pub fn decode_get_param(payload: &[u8]) -> Result<u32, EffectError> {
    if payload.len() < 4 {
        return Err(EffectError::BadPayload);
    }
    Ok(u32::from_le_bytes([
        payload[0], payload[1], payload[2], payload[3],
    ]))
}

/// Encode a parameter value into reply storage, returning the bytes written.
pub fn encode_param_value(reply: &mut [u8], value: i32) -> Result<usize, EffectError> {
    if reply.len() < 4 {
        return Err(EffectError::ReplyTooSmall {
            needed: 4,
            capacity: reply.len(),
        });
    }
    reply[0..4].copy_from_slice(&value.to_le_bytes());
    Ok(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_values_match_the_host_contract() {
        assert_eq!(CommandCode::Init.raw(), 0);
        assert_eq!(CommandCode::SetConfig.raw(), 1);
        assert_eq!(CommandCode::GetParam.raw(), 8);
        assert_eq!(CommandCode::GetConfig.raw(), 14);
    }

    #[test]
    fn from_raw_rejects_gaps_and_unknowns() {
        // 6 and 7 are reserved in the host numbering but not part of this set.
        assert_eq!(CommandCode::from_raw(6), None);
        assert_eq!(CommandCode::from_raw(7), None);
        assert_eq!(CommandCode::from_raw(0x10000), None);
        assert_eq!(CommandCode::from_raw(5), Some(CommandCode::SetParam));
    }

    #[test]
    fn stream_config_round_trips_through_reply_storage() {
        let config = StreamConfig {
            sample_rate: 44_100,
            channels: 2,
        };
        let mut reply = [0u8; StreamConfig::ENCODED_LEN];
        assert_eq!(config.encode(&mut reply), Ok(StreamConfig::ENCODED_LEN));
        assert_eq!(StreamConfig::decode(&reply), Ok(config));
    }

    #[test]
    fn truncated_payloads_are_rejected() {
        assert_eq!(StreamConfig::decode(&[0; 7]), Err(EffectError::BadPayload));
        assert_eq!(decode_set_param(&[0; 5]), Err(EffectError::BadPayload));
        assert_eq!(decode_get_param(&[0; 3]), Err(EffectError::BadPayload));
    }

    #[test]
    fn undersized_reply_reports_needed_capacity() {
        let mut reply = [0u8; 2];
        assert_eq!(
            encode_param_value(&mut reply, -600),
            Err(EffectError::ReplyTooSmall {
                needed: 4,
                capacity: 2
            })
        );
    }

    #[test]
    fn set_param_payload_decodes_id_and_value() {
        let mut payload = [0u8; 8];
        payload[0..4].copy_from_slice(&1u32.to_le_bytes());
        payload[4..8].copy_from_slice(&(-250i32).to_le_bytes());
        assert_eq!(decode_set_param(&payload), Ok((1, -250)));
    }
}
