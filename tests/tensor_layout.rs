use fpmatch::tensor::{CHANNEL_MEAN, CHANNEL_STD, TARGET_HEIGHT, TARGET_WIDTH};
use fpmatch::{normalize, to_channel_major, to_pixel_major, FpMatchError, NormalizedTensor, RasterImage};
use rand::Rng;

fn make_image(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 3]) -> RasterImage {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&pixel(x, y));
        }
    }
    RasterImage::from_vec(pixels, width, height, width * 3).unwrap()
}

#[test]
fn normalize_maps_extremes_to_known_values() {
    let img = make_image(2, 1, |x, _| if x == 0 { [0, 0, 0] } else { [255, 255, 255] });
    let values = normalize(&img).unwrap();
    assert_eq!(values.len(), 6);

    for c in 0..3 {
        let lo = (0.0 - CHANNEL_MEAN[c]) / CHANNEL_STD[c];
        let hi = (1.0 - CHANNEL_MEAN[c]) / CHANNEL_STD[c];
        assert!((values[c] - lo).abs() < 1e-6);
        assert!((values[3 + c] - hi).abs() < 1e-6);
        // Standardized output is unclamped.
        assert!(values[c] < 0.0);
        assert!(values[3 + c] > 1.0);
    }
}

#[test]
fn normalize_is_pixel_major_channel_interleaved() {
    let img = make_image(2, 2, |x, y| [(x * 100) as u8, (y * 100) as u8, 50]);
    let values = normalize(&img).unwrap();

    // Pixel (1, 0) sits at flat index 1; its red channel is at offset 1*3.
    let expected_r = (100.0 / 255.0 - CHANNEL_MEAN[0]) / CHANNEL_STD[0];
    assert!((values[3] - expected_r).abs() < 1e-6);
    let expected_g = (0.0 - CHANNEL_MEAN[1]) / CHANNEL_STD[1];
    assert!((values[4] - expected_g).abs() < 1e-6);
}

#[test]
fn layout_round_trip_is_exact_for_all_shapes() {
    let mut rng = rand::rng();
    for &(width, height, channels) in &[(1, 1, 1), (3, 2, 3), (4, 4, 2), (5, 2, 4), (7, 3, 1)] {
        let hwc: Vec<f32> = (0..width * height * channels)
            .map(|_| rng.random::<f32>())
            .collect();
        let chw = to_channel_major(&hwc, width, height, channels).unwrap();
        let back = to_pixel_major(&chw, width, height, channels).unwrap();
        assert_eq!(back, hwc, "round trip for {width}x{height}x{channels}");
    }
}

#[test]
fn layout_transform_is_a_permutation() {
    // Distinct inputs must land at distinct positions with nothing dropped.
    let width = 4;
    let height = 3;
    let channels = 3;
    let hwc: Vec<f32> = (0..width * height * channels).map(|i| i as f32).collect();
    let chw = to_channel_major(&hwc, width, height, channels).unwrap();

    let mut seen = chw.clone();
    seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(seen, hwc);
}

#[test]
fn layout_transform_rejects_wrong_length() {
    let data = vec![0.0f32; 11];
    assert_eq!(
        to_channel_major(&data, 2, 2, 3).err().unwrap(),
        FpMatchError::BufferTooSmall { needed: 12, got: 11 },
    );
    assert_eq!(
        to_pixel_major(&data, 2, 2, 3).err().unwrap(),
        FpMatchError::BufferTooSmall { needed: 12, got: 11 },
    );
}

#[test]
fn tensor_requires_target_dimensions() {
    let img = make_image(16, 16, |_, _| [0, 0, 0]);
    assert_eq!(
        NormalizedTensor::from_image(&img).err().unwrap(),
        FpMatchError::InvalidDimensions {
            width: 16,
            height: 16,
        },
    );
}

#[test]
fn tensor_is_channel_major_at_target_shape() {
    let img = make_image(TARGET_WIDTH, TARGET_HEIGHT, |x, y| {
        [(x & 0xFF) as u8, (y & 0xFF) as u8, 128]
    });
    let tensor = NormalizedTensor::from_image(&img).unwrap();
    assert_eq!(tensor.data().len(), 3 * 224 * 224);

    let expected_r = (200.0 / 255.0 - CHANNEL_MEAN[0]) / CHANNEL_STD[0];
    assert!((tensor.get(0, 5, 200).unwrap() - expected_r).abs() < 1e-6);
    let expected_g = (5.0 / 255.0 - CHANNEL_MEAN[1]) / CHANNEL_STD[1];
    assert!((tensor.get(1, 5, 200).unwrap() - expected_g).abs() < 1e-6);
    let expected_b = (128.0 / 255.0 - CHANNEL_MEAN[2]) / CHANNEL_STD[2];
    assert!((tensor.get(2, 5, 200).unwrap() - expected_b).abs() < 1e-6);
    assert!(tensor.get(3, 0, 0).is_none());
}
