//! Biquad (bi-quadratic) filter structure.
//!
//! A generic second-order IIR filter plus the coefficient recipes the
//! built-in effects need: low-pass (virtualizer crossfeed), low shelf
//! (bass boost), and peaking EQ (equalizer bands). Coefficient calculation
//! uses the RBJ Audio EQ Cookbook formulas.

use core::f32::consts::PI;
use libm::{cosf, powf, sinf, sqrtf};

/// Generic biquad filter coefficients and state.
///
/// Implements the Direct Form I structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,

    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients.
    pub fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Sets the coefficients, normalizing by `a0` internally.
    pub fn set_coefficients(&mut self, b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) {
        let a0_inv = 1.0 / a0;
        self.b0 = b0 * a0_inv;
        self.b1 = b1 * a0_inv;
        self.b2 = b2 * a0_inv;
        self.a1 = a1 * a0_inv;
        self.a2 = a2 * a0_inv;
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clears the delay lines without touching coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// Low-pass coefficients (RBJ cookbook).
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (0.707 for Butterworth response)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients
pub fn lowpass_coefficients(
    frequency: f32,
    q: f32,
    sample_rate: f32,
) -> (f32, f32, f32, f32, f32, f32) {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = (1.0 - cos_omega) / 2.0;
    let b1 = 1.0 - cos_omega;
    let b2 = (1.0 - cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// Low-shelf coefficients (RBJ cookbook, shelf slope 1).
///
/// Boosts or cuts everything below the corner frequency.
///
/// # Arguments
///
/// * `frequency` - Corner frequency in Hz
/// * `gain_db` - Shelf gain in decibels (positive = boost, negative = cut)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients
pub fn low_shelf_coefficients(
    frequency: f32,
    gain_db: f32,
    sample_rate: f32,
) -> (f32, f32, f32, f32, f32, f32) {
    let a = powf(10.0, gain_db / 40.0); // sqrt(10^(dB/20))
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    // Shelf slope S = 1: alpha = sin/2 * sqrt((A + 1/A)(1/S - 1) + 2)
    let alpha = sin_omega / 2.0 * sqrtf(2.0);
    let two_sqrt_a_alpha = 2.0 * sqrtf(a) * alpha;

    let b0 = a * ((a + 1.0) - (a - 1.0) * cos_omega + two_sqrt_a_alpha);
    let b1 = 2.0 * a * ((a - 1.0) - (a + 1.0) * cos_omega);
    let b2 = a * ((a + 1.0) - (a - 1.0) * cos_omega - two_sqrt_a_alpha);
    let a0 = (a + 1.0) + (a - 1.0) * cos_omega + two_sqrt_a_alpha;
    let a1 = -2.0 * ((a - 1.0) + (a + 1.0) * cos_omega);
    let a2 = (a + 1.0) + (a - 1.0) * cos_omega - two_sqrt_a_alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// Peaking EQ coefficients (RBJ cookbook).
///
/// Boosts or cuts around a center frequency with a specified bandwidth.
///
/// # Arguments
///
/// * `frequency` - Center frequency in Hz
/// * `q` - Q factor (bandwidth = frequency / Q)
/// * `gain_db` - Gain in decibels (positive = boost, negative = cut)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients
pub fn peaking_eq_coefficients(
    frequency: f32,
    q: f32,
    gain_db: f32,
    sample_rate: f32,
) -> (f32, f32, f32, f32, f32, f32) {
    let a = powf(10.0, gain_db / 40.0);
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = 1.0 + alpha * a;
    let b1 = -2.0 * cos_omega;
    let b2 = 1.0 - alpha * a;
    let a0 = 1.0 + alpha / a;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha / a;

    (b0, b1, b2, a0, a1, a2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn biquad_passthrough_by_default() {
        let mut biquad = Biquad::new();
        for i in 0..10 {
            let input = i as f32 * 0.1;
            let output = biquad.process(input);
            assert!((output - input).abs() < 0.0001);
        }
    }

    #[test]
    fn biquad_clear_zeroes_state() {
        let mut biquad = Biquad::new();
        for _ in 0..10 {
            biquad.process(1.0);
        }
        biquad.clear();
        assert_eq!(biquad.x1, 0.0);
        assert_eq!(biquad.x2, 0.0);
        assert_eq!(biquad.y1, 0.0);
        assert_eq!(biquad.y2, 0.0);
    }

    #[test]
    fn lowpass_passes_dc() {
        let mut biquad = Biquad::new();
        let (b0, b1, b2, a0, a1, a2) = lowpass_coefficients(700.0, 0.707, 48000.0);
        biquad.set_coefficients(b0, b1, b2, a0, a1, a2);

        let mut output = 0.0;
        for _ in 0..1000 {
            output = biquad.process(1.0);
        }
        assert!((output - 1.0).abs() < 0.05);
    }

    #[test]
    fn low_shelf_boosts_dc_by_shelf_gain() {
        let mut biquad = Biquad::new();
        let gain_db = 12.0;
        let (b0, b1, b2, a0, a1, a2) = low_shelf_coefficients(100.0, gain_db, 48000.0);
        biquad.set_coefficients(b0, b1, b2, a0, a1, a2);

        // DC sits fully on the shelf: expect 10^(12/20) ~= 3.98x
        let mut output = 0.0;
        for _ in 0..4000 {
            output = biquad.process(1.0);
        }
        let expected = libm::powf(10.0, gain_db / 20.0);
        assert!(
            (output - expected).abs() < 0.1,
            "DC gain {output} should approach {expected}"
        );
    }

    #[test]
    fn low_shelf_unity_at_zero_gain() {
        let mut biquad = Biquad::new();
        let (b0, b1, b2, a0, a1, a2) = low_shelf_coefficients(100.0, 0.0, 48000.0);
        biquad.set_coefficients(b0, b1, b2, a0, a1, a2);

        let mut output = 0.0;
        for _ in 0..1000 {
            output = biquad.process(1.0);
        }
        assert!((output - 1.0).abs() < 0.05);
    }

    #[test]
    fn peaking_eq_unity_at_zero_gain() {
        let mut biquad = Biquad::new();
        let (b0, b1, b2, a0, a1, a2) = peaking_eq_coefficients(1000.0, 1.0, 0.0, 48000.0);
        biquad.set_coefficients(b0, b1, b2, a0, a1, a2);

        let mut output = 0.0;
        for _ in 0..1000 {
            output = biquad.process(1.0);
        }
        assert!((output - 1.0).abs() < 0.05, "DC should pass at 0 dB gain, got {output}");
    }

    #[test]
    fn peaking_eq_coefficients_are_finite_for_extremes() {
        for &gain in &[-12.0, 12.0] {
            let (b0, b1, b2, a0, a1, a2) = peaking_eq_coefficients(16000.0, 0.7, gain, 44100.0);
            for c in [b0, b1, b2, a0, a1, a2] {
                assert!(c.is_finite());
            }
        }
    }
}
