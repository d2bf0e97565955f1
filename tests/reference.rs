use noise_bench::{
    NoiseParams,
    check::{CORRECTNESS_THRESHOLD, Verdict, compare},
    noise::{noise, noise_pixel, noise_serial, reference},
};

fn assert_close(got: f32, expected: f32) {
    assert!(
        (got - expected).abs() < 1e-6,
        "got {got}, expected {expected}"
    );
}

#[test]
fn test_reference_pixels_of_default_image() {
    let params = NoiseParams::default();

    assert_close(noise_pixel(&params, 0, 0), 0.161_424_31);
    assert_close(noise_pixel(&params, 384, 384), 0.432_923_9);
    assert_close(noise_pixel(&params, 767, 767), 0.333_422_87);
    assert_close(noise_pixel(&params, 100, 200), 0.295_326_26);
    assert_close(noise_pixel(&params, 500, 17), 0.428_882_87);
}

#[test]
fn test_noise_values() {
    assert_close(noise(0.5, 0.25, 0.75), -0.375_078_68);
    assert_close(noise(3.7, -1.2, 0.6), -0.361_557_72);
}

#[test]
fn test_serial_image_is_row_major() -> noise_bench::Result<()> {
    let params = NoiseParams::default();
    let gold = reference(&params)?;

    assert_eq!(gold.len(), 768 * 768);
    assert_eq!(gold[200 * 768 + 100], noise_pixel(&params, 100, 200));
    assert_eq!(gold[17 * 768 + 500], noise_pixel(&params, 500, 17));
    assert!(gold.iter().all(|v| (0. ..1.5).contains(v)));
    Ok(())
}

#[test]
fn test_reference_passes_its_own_check() -> noise_bench::Result<()> {
    let params = NoiseParams::with_size(96, 64);
    let mut out = vec![-1.; params.len()];
    noise_serial(&params, &mut out)?;

    let verdict = compare(&out, &reference(&params)?, CORRECTNESS_THRESHOLD)?;
    assert_eq!(verdict, Verdict::Passed { max_err: 0. });
    Ok(())
}

#[test]
fn test_off_by_one_row_fails_the_check() -> noise_bench::Result<()> {
    let params = NoiseParams::with_size(64, 64);
    let gold = reference(&params)?;

    let mut shifted = gold.clone();
    shifted.rotate_left(64);

    let verdict = compare(&shifted, &gold, CORRECTNESS_THRESHOLD)?;
    assert!(!verdict.passed());
    Ok(())
}
