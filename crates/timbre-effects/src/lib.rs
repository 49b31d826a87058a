//! Timbre Effects - the built-in audio effect variants
//!
//! This crate provides the closed set of effects the dispatch layer can
//! instantiate:
//!
//! - [`BassBoost`] - Low-shelf boost below 100 Hz
//! - [`Compression`] - Stereo-linked dynamic range compression
//! - [`Equalizer`] - Six-band peaking equalizer
//! - [`Virtualizer`] - Headset virtualization via low-passed crossfeed
//! - [`StereoWide`] - Mid/side stereo width expansion
//!
//! Every variant satisfies the [`timbre_core::Effect`] capability contract:
//! block processing over interleaved stereo plus the generic control
//! channel. All five share one control-channel implementation (stream
//! configuration, enable/disable, reset, parameter access) and differ only
//! in their DSP and parameter spaces.
//!
//! Effects come up disabled with default parameters; the host configures
//! the stream format and enables them through commands. A disabled effect
//! passes audio through bit-exactly.
//!
//! ## Example
//!
//! ```rust
//! use timbre_core::{CommandCode, Effect};
//! use timbre_effects::BassBoost;
//!
//! let mut boost = BassBoost::new();
//! boost.set_strength(800);
//! boost.command(CommandCode::Enable.raw(), &[], &mut []).unwrap();
//!
//! let input = [0.1_f32; 128];
//! let mut output = [0.0_f32; 128];
//! boost.process(&input, &mut output).unwrap();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod bass_boost;
pub mod compression;
mod control;
pub mod equalizer;
pub mod stereo_wide;
pub mod virtualizer;

// Re-export main types at crate root
pub use bass_boost::BassBoost;
pub use compression::Compression;
pub use equalizer::Equalizer;
pub use stereo_wide::StereoWide;
pub use virtualizer::Virtualizer;
