//! Status channel for effect operations.
//!
//! Effect-level failures travel through the dispatch layer uninterpreted;
//! the dispatch layer never translates or recovers them. For hosts that
//! speak the integer form of the contract, [`EffectError::status`] maps each
//! error to its negative status code.

use thiserror::Error;

/// Integer status codes used at the host boundary.
///
/// Success is zero; every failure is negative, matching the errno-style
/// convention of the host contract.
pub mod status {
    /// Operation completed.
    pub const OK: i32 = 0;
    /// Invalid argument, identity, opcode, or parameter (-EINVAL).
    pub const INVALID: i32 = -22;
    /// Caller-supplied reply storage is too small (-ENOMEM).
    pub const NO_MEMORY: i32 = -12;
}

/// Errors surfaced by an effect's process and command operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EffectError {
    /// The opcode is not part of the effect's command set.
    #[error("unknown command opcode {0:#x}")]
    UnknownCommand(u32),

    /// The parameter identifier is not defined by this effect.
    #[error("unknown parameter {0:#x}")]
    UnknownParam(u32),

    /// A parameter write targeted a read-only parameter.
    #[error("parameter {0:#x} is read-only")]
    ReadOnlyParam(u32),

    /// A parameter write carried a value outside the parameter's range.
    #[error("value {value} out of range for parameter {param:#x}")]
    ValueOutOfRange {
        /// Parameter identifier the write targeted.
        param: u32,
        /// Rejected value.
        value: i32,
    },

    /// A command payload is truncated or malformed.
    #[error("command payload is malformed or truncated")]
    BadPayload,

    /// The stream format is not supported by this effect.
    #[error("unsupported stream configuration")]
    UnsupportedConfig,

    /// The caller-supplied reply buffer cannot hold the reply.
    #[error("reply buffer too small: need {needed} bytes, capacity {capacity}")]
    ReplyTooSmall {
        /// Bytes the reply requires.
        needed: usize,
        /// Bytes the caller supplied.
        capacity: usize,
    },

    /// Input and output buffers disagree on frame layout.
    #[error("buffer layout mismatch: {input} input samples, {output} output samples")]
    BufferMismatch {
        /// Input length in samples.
        input: usize,
        /// Output length in samples.
        output: usize,
    },
}

impl EffectError {
    /// The negative status code for the host binary contract.
    pub const fn status(&self) -> i32 {
        match self {
            EffectError::ReplyTooSmall { .. } => status::NO_MEMORY,
            _ => status::INVALID,
        }
    }
}
