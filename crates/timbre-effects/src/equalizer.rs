//! Six-band graphic equalizer.
//!
//! Peaking-EQ biquads at fixed quarter-decade-spaced centers, cascaded per
//! channel. Band levels are set in millibels (hundredths of a dB), the
//! integer convention of the host control channel.
//!
//! # Parameters
//!
//! Band parameters pack the band index into the high 16 bits of the
//! parameter id (see [`band_param`]); the low 16 bits select the kind.
//!
//! | Kind | Name | Access | Range |
//! |------|------|--------|-------|
//! | 0 | Number of bands | read-only | always 6 |
//! | 1 | Band level | read/write | -1200..=1200 millibels |
//! | 2 | Band center frequency | read-only | Hz |

use timbre_core::{Biquad, Effect, EffectError, peaking_eq_coefficients};

use crate::control::{self, ControlState, Controllable};

/// Number of bands (read-only parameter kind).
pub const PARAM_NUM_BANDS: u32 = 0;
/// Band level in millibels (read/write parameter kind).
pub const PARAM_BAND_LEVEL: u32 = 1;
/// Band center frequency in Hz (read-only parameter kind).
pub const PARAM_CENTER_FREQ: u32 = 2;

/// Number of equalizer bands.
pub const NUM_BANDS: usize = 6;

/// Band center frequencies in Hz.
pub const BAND_CENTERS_HZ: [f32; NUM_BANDS] = [15.625, 62.5, 250.0, 1000.0, 4000.0, 16000.0];

/// Lowest accepted band level in millibels.
pub const MIN_BAND_LEVEL_MB: i32 = -1200;
/// Highest accepted band level in millibels.
pub const MAX_BAND_LEVEL_MB: i32 = 1200;

const BAND_Q: f32 = 0.7;

/// Compose a band parameter id from kind and band index.
pub const fn band_param(kind: u32, band: u32) -> u32 {
    kind | band << 16
}

/// Six-band peaking equalizer.
#[derive(Debug, Clone)]
pub struct Equalizer {
    control: ControlState,
    band_levels_mb: [i16; NUM_BANDS],
    filters: [[Biquad; NUM_BANDS]; 2],
}

impl Equalizer {
    /// Create an equalizer with all bands flat.
    pub fn new() -> Self {
        let mut equalizer = Self {
            control: ControlState::new(),
            band_levels_mb: [0; NUM_BANDS],
            filters: [
                core::array::from_fn(|_| Biquad::new()),
                core::array::from_fn(|_| Biquad::new()),
            ],
        };
        equalizer.update_all_bands();
        equalizer
    }

    /// Set one band's level in millibels (clamped to the accepted range).
    pub fn set_band_level_mb(&mut self, band: usize, level_mb: i32) {
        if band >= NUM_BANDS {
            return;
        }
        self.band_levels_mb[band] =
            level_mb.clamp(MIN_BAND_LEVEL_MB, MAX_BAND_LEVEL_MB) as i16;
        self.update_band(band);
    }

    /// One band's level in millibels.
    pub fn band_level_mb(&self, band: usize) -> i32 {
        i32::from(self.band_levels_mb[band])
    }

    fn update_band(&mut self, band: usize) {
        let sample_rate = self.control.sample_rate();
        // Keep the top band below Nyquist at low sample rates.
        let center = BAND_CENTERS_HZ[band].min(sample_rate * 0.45);
        let gain_db = f32::from(self.band_levels_mb[band]) / 100.0;
        let (b0, b1, b2, a0, a1, a2) =
            peaking_eq_coefficients(center, BAND_Q, gain_db, sample_rate);
        for channel in &mut self.filters {
            channel[band].set_coefficients(b0, b1, b2, a0, a1, a2);
        }
    }

    fn update_all_bands(&mut self) {
        for band in 0..NUM_BANDS {
            self.update_band(band);
        }
    }

    fn clear_filters(&mut self) {
        for channel in &mut self.filters {
            for filter in channel {
                filter.clear();
            }
        }
    }
}

impl Default for Equalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Controllable for Equalizer {
    fn control(&mut self) -> &mut ControlState {
        &mut self.control
    }

    fn on_configure(&mut self) {
        self.update_all_bands();
        self.clear_filters();
    }

    fn reset_state(&mut self) {
        self.clear_filters();
    }

    fn write_param(&mut self, param: u32, value: i32) -> Result<(), EffectError> {
        let kind = param & 0xffff;
        let band = (param >> 16) as usize;
        match kind {
            PARAM_NUM_BANDS | PARAM_CENTER_FREQ => Err(EffectError::ReadOnlyParam(param)),
            PARAM_BAND_LEVEL => {
                if band >= NUM_BANDS {
                    return Err(EffectError::UnknownParam(param));
                }
                if !(MIN_BAND_LEVEL_MB..=MAX_BAND_LEVEL_MB).contains(&value) {
                    return Err(EffectError::ValueOutOfRange { param, value });
                }
                self.band_levels_mb[band] = value as i16;
                self.update_band(band);
                Ok(())
            }
            _ => Err(EffectError::UnknownParam(param)),
        }
    }

    fn read_param(&self, param: u32) -> Result<i32, EffectError> {
        let kind = param & 0xffff;
        let band = (param >> 16) as usize;
        match kind {
            PARAM_NUM_BANDS => Ok(NUM_BANDS as i32),
            PARAM_BAND_LEVEL => {
                if band >= NUM_BANDS {
                    return Err(EffectError::UnknownParam(param));
                }
                Ok(i32::from(self.band_levels_mb[band]))
            }
            PARAM_CENTER_FREQ => {
                if band >= NUM_BANDS {
                    return Err(EffectError::UnknownParam(param));
                }
                Ok(BAND_CENTERS_HZ[band] as i32)
            }
            _ => Err(EffectError::UnknownParam(param)),
        }
    }
}

impl Effect for Equalizer {
    fn process(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), EffectError> {
        control::check_layout(input, output)?;
        if !self.control.enabled {
            output.copy_from_slice(input);
            return Ok(());
        }
        for (frame_in, frame_out) in input.chunks_exact(2).zip(output.chunks_exact_mut(2)) {
            let mut left = frame_in[0];
            let mut right = frame_in[1];
            for band in 0..NUM_BANDS {
                left = self.filters[0][band].process(left);
                right = self.filters[1][band].process(right);
            }
            frame_out[0] = left;
            frame_out[1] = right;
        }
        Ok(())
    }

    fn command(&mut self, opcode: u32, input: &[u8], reply: &mut [u8])
    -> Result<usize, EffectError> {
        control::run_command(self, opcode, input, reply)
    }
}
