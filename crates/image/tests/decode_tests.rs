use crates_image::ImageEncoder;
use image::{ImageError, decode_image};

#[test]
fn test_decode_jpeg_rgb() {
    let mut buffer = Vec::new();
    let img = crates_image::RgbImage::from_fn(4, 2, |x, y| {
        let val = (x + y) as u8 * 32;
        crates_image::Rgb([val, val + 16, val + 32])
    });
    crates_image::codecs::jpeg::JpegEncoder::new(&mut buffer)
        .encode_image(&img)
        .unwrap();

    let decoded = decode_image(&buffer).unwrap();
    assert_eq!(decoded.width(), 4);
    assert_eq!(decoded.height(), 2);
    assert_eq!(decoded.channels(), 3);
}

#[test]
fn test_decode_png_gray_stays_single_channel() {
    let mut buffer = Vec::new();
    let img = crates_image::GrayImage::from_fn(3, 3, |x, y| crates_image::Luma([(x * y) as u8]));
    crates_image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(img.as_raw(), 3, 3, crates_image::ExtendedColorType::L8)
        .unwrap();

    let decoded = decode_image(&buffer).unwrap();
    assert_eq!(decoded.channels(), 1);
    assert_eq!(decoded.data(), img.as_raw().as_slice());
}

#[test]
fn test_decode_png_rgba_drops_alpha() {
    let mut buffer = Vec::new();
    let img = crates_image::RgbaImage::from_fn(2, 2, |_, _| crates_image::Rgba([10, 20, 30, 128]));
    crates_image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(img.as_raw(), 2, 2, crates_image::ExtendedColorType::Rgba8)
        .unwrap();

    let decoded = decode_image(&buffer).unwrap();
    assert_eq!(decoded.channels(), 3);
    assert_eq!(&decoded.data()[..3], &[10, 20, 30]);
}

#[test]
fn test_decode_garbage_fails() {
    let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
    assert!(matches!(result, Err(ImageError::Decode(_))));
}
