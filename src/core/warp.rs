/// Maps a [0, 1)^2 sample to the unit disk with the concentric mapping.
///
/// Concentric squares of the input map to concentric circles, which keeps
/// stratification intact much better than the naive polar mapping.
pub fn square_to_uniform_disk_concentric(sample: (f32, f32)) -> (f32, f32) {
    let r1 = 2.0 * sample.0 - 1.0;
    let r2 = 2.0 * sample.1 - 1.0;

    let (r, phi) = if r1 == 0.0 && r2 == 0.0 {
        (0.0, 0.0)
    } else if r1 * r1 > r2 * r2 {
        (r1, std::f32::consts::FRAC_PI_4 * (r2 / r1))
    } else {
        (
            r2,
            std::f32::consts::FRAC_PI_2 - std::f32::consts::FRAC_PI_4 * (r1 / r2),
        )
    };

    let (sin_phi, cos_phi) = phi.sin_cos();
    (r * cos_phi, r * sin_phi)
}
