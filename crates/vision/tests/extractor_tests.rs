use {
    base::Vec2,
    image::Image,
    vision::{ExtractError, Extractor, GradientEnergy, IntensityStats, LawsTexture},
};

fn flat(size: usize, value: u8) -> Image {
    Image::from_fn(Vec2::new(size, size), 1, |_, _, _| value).unwrap()
}

// vertical stripes two pixels wide
fn stripes(size: usize) -> Image {
    Image::from_fn(Vec2::new(size, size), 1, |x, _, _| if (x / 2) % 2 == 0 { 0 } else { 255 }).unwrap()
}

#[test]
fn test_intensity_stats() {
    let stats = IntensityStats::default();
    assert_eq!(stats.dims(), 2);
    assert_eq!(stats.extract(&flat(8, 100)).unwrap(), vec![100.0, 0.0]);

    let checker = Image::from_fn(Vec2::new(8, 8), 1, |x, y, _| if (x + y) % 2 == 0 { 0 } else { 200 })
        .unwrap();
    let features = stats.extract(&checker).unwrap();
    assert_eq!(features[0], 100.0);
    assert!((features[1] - 100.0).abs() < 1e-3);
}

#[test]
fn test_intensity_uses_luma_of_rgb() {
    let stats = IntensityStats::default();
    let red = Image::from_fn(Vec2::new(8, 8), 3, |_, _, c| if c == 0 { 255 } else { 0 }).unwrap();
    let features = stats.extract(&red).unwrap();
    assert_eq!(features[0], 76.0);
}

#[test]
fn test_wrong_input_size_rejected() {
    let stats = IntensityStats::default();
    match stats.extract(&flat(9, 0)) {
        Err(ExtractError::InputSize { expected, got, .. }) => {
            assert_eq!(expected, Vec2::new(8, 8));
            assert_eq!(got, Vec2::new(9, 9));
        }
        other => panic!("expected InputSize, got {:?}", other),
    }
}

#[test]
fn test_laws_flat_window_has_no_texture() {
    let laws = LawsTexture::default();
    assert_eq!(laws.dims(), 4);
    let features = laws.extract(&flat(16, 77)).unwrap();
    assert!(features.iter().all(|&v| v.abs() < 1e-3));
}

#[test]
fn test_laws_responds_to_vertical_edges() {
    let laws = LawsTexture::default();
    let features = laws.extract(&stripes(16)).unwrap();
    // L5E5 is a horizontal edge detector along x, E5L5 along y
    assert!(features[0] > 1.0);
    assert!(features[1] < 1e-3);
}

#[test]
fn test_laws_rejects_tiny_input() {
    let laws = LawsTexture::new(Vec2::new(4, 4));
    assert!(matches!(laws.extract(&flat(4, 0)), Err(ExtractError::Rejected(_))));
}

#[test]
fn test_gradient_energy() {
    let gradient = GradientEnergy::default();
    assert_eq!(gradient.dims(), 3);

    let still = gradient.extract(&flat(16, 30)).unwrap();
    assert_eq!(still, vec![0.0, 0.0, 0.0]);

    let edges = gradient.extract(&stripes(16)).unwrap();
    assert!(edges[0] > 0.0);
    assert_eq!(edges[1], 0.0);
    assert!(edges[2] > 0.0 && edges[2] <= 1.0);
}

#[test]
fn test_gradient_rejects_tiny_input() {
    let gradient = GradientEnergy::new(Vec2::new(2, 2));
    assert!(matches!(gradient.extract(&flat(2, 0)), Err(ExtractError::Rejected(_))));
}
