//! Timbre Core - effect capability contract and DSP primitives
//!
//! This crate defines the contract every timbre effect satisfies, plus the
//! small set of DSP building blocks the built-in effects share. It is the
//! leaf of the workspace: no dependency on the concrete effects or on the
//! dispatch layer.
//!
//! # Core Abstractions
//!
//! ## Capability Contract
//!
//! - [`Effect`] - Object-safe trait: block processing plus a generic
//!   control-command channel
//! - [`EffectError`] - Status channel for both operations, with an integer
//!   mapping ([`EffectError::status`]) for the host binary contract
//!
//! ## Identity
//!
//! - [`EffectUuid`] - 16-byte effect identity with a fixed byte image that
//!   previously published hosts match against
//!
//! ## Control Channel
//!
//! - [`CommandCode`] - Host-defined control opcodes
//! - [`StreamConfig`] - Stream format conveyed by the set-config command
//! - Payload codecs for the parameter get/set commands
//!
//! ## DSP Primitives
//!
//! - [`Biquad`] - Second-order IIR filter with RBJ cookbook coefficients
//! - [`EnvelopeFollower`] - Amplitude envelope detection for dynamics
//! - Level conversions: [`db_to_linear`], [`linear_to_db`]
//!
//! # Real-Time Discipline
//!
//! Everything here is designed for invocation under an audio-pipeline
//! deadline: no allocation, no locking, no I/O, no logging in any processing
//! or command path.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! timbre-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod command;
pub mod effect;
pub mod envelope;
pub mod error;
pub mod math;
pub mod uuid;

// Re-export main types at crate root
pub use biquad::{
    Biquad, low_shelf_coefficients, lowpass_coefficients, peaking_eq_coefficients,
};
pub use command::{
    CommandCode, StreamConfig, decode_get_param, decode_set_param, encode_param_value,
};
pub use effect::Effect;
pub use envelope::EnvelopeFollower;
pub use error::{EffectError, status};
pub use math::{db_to_linear, linear_to_db};
pub use uuid::EffectUuid;
