//! Wavelength sampling for spectral ray generation.
//!
//! Sensors only delegate here; they never interpret wavelengths themselves.

pub const LAMBDA_MIN: f32 = 360.0;
pub const LAMBDA_MAX: f32 = 830.0;

pub const N_WAVELENGTHS: usize = 4;

pub type Wavelengths = [f32; N_WAVELENGTHS];

/// Turns a 1D sample in [0, 1) into a set of hero wavelengths plus the
/// reciprocal density of the draw.
///
/// The hero wavelength is placed uniformly in the visible range and the
/// remaining ones are stratified rotations of it, so a single sample covers
/// the spectrum evenly. With a uniform density the weight is simply the
/// width of the sampled range.
pub fn sample_wavelengths(sample: f32) -> (Wavelengths, f32) {
    let range = LAMBDA_MAX - LAMBDA_MIN;
    let mut wavelengths = Wavelengths::default();
    for (i, lambda) in wavelengths.iter_mut().enumerate() {
        let u = (sample + i as f32 / N_WAVELENGTHS as f32).fract();
        *lambda = LAMBDA_MIN + u * range;
    }
    (wavelengths, range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wavelengths_in_visible_range() {
        for sample in [0.0, 0.25, 0.5, 0.999] {
            let (wavelengths, weight) = sample_wavelengths(sample);
            for lambda in wavelengths {
                assert!((LAMBDA_MIN..LAMBDA_MAX).contains(&lambda));
            }
            assert_eq!(weight, LAMBDA_MAX - LAMBDA_MIN);
        }
    }

    #[test]
    fn test_hero_wavelength_rotation_is_stratified() {
        let (wavelengths, _) = sample_wavelengths(0.1);
        let stratum = (LAMBDA_MAX - LAMBDA_MIN) / N_WAVELENGTHS as f32;
        let mut sorted = wavelengths;
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for (i, lambda) in sorted.iter().enumerate() {
            let lo = LAMBDA_MIN + i as f32 * stratum;
            assert!(*lambda >= lo && *lambda < lo + stratum);
        }
    }
}
