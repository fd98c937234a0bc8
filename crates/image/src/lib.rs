//! Frame type and the image operations the vision pipeline depends on.
//!
//! Pixel work that has a well-tested implementation in the `image` crate
//! (decoding, resampling) is delegated to it; everything here stays in the
//! HWC `Tensor<u8>` layout from `base`.

pub mod error;
pub mod image;

pub use error::ImageError;
pub use image::Image;

use {
    base::Vec2,
    crates_image::{DynamicImage, GrayImage, RgbImage, imageops},
};

// resampling filter; fixed so resizing is deterministic
const RESIZE_FILTER: imageops::FilterType = imageops::FilterType::Triangle;

/// Decode an encoded frame (JPEG, PNG) into an `Image`.
///
/// Grayscale sources stay single channel, everything else is converted to RGB.
pub fn decode_image(data: &[u8]) -> Result<Image, ImageError> {
    let decoded = crates_image::load_from_memory(data)?;
    match decoded {
        DynamicImage::ImageLuma8(buf) => {
            let (w, h) = buf.dimensions();
            Image::new(Vec2::new(w as usize, h as usize), 1, buf.into_raw())
        }
        DynamicImage::ImageRgb8(buf) => {
            let (w, h) = buf.dimensions();
            Image::new(Vec2::new(w as usize, h as usize), 3, buf.into_raw())
        }
        other => {
            let rgb = other.to_rgb8();
            let (w, h) = rgb.dimensions();
            Image::new(Vec2::new(w as usize, h as usize), 3, rgb.into_raw())
        }
    }
}

/// Resample `image` to exactly `size` pixels.
///
/// Returns a clone when the image already has the requested size.
pub fn resize(image: &Image, size: Vec2<usize>) -> Result<Image, ImageError> {
    if size.x == 0 || size.y == 0 {
        return Err(ImageError::Empty);
    }
    if image.size() == size {
        return Ok(image.clone());
    }
    let (w, h) = (image.width() as u32, image.height() as u32);
    let data = image.data().to_vec();
    let resized = match image.channels() {
        1 => {
            let buf = GrayImage::from_raw(w, h, data)
                .ok_or_else(|| ImageError::Decode("grayscale buffer too small".to_string()))?;
            imageops::resize(&buf, size.x as u32, size.y as u32, RESIZE_FILTER).into_raw()
        }
        3 => {
            let buf = RgbImage::from_raw(w, h, data)
                .ok_or_else(|| ImageError::Decode("rgb buffer too small".to_string()))?;
            imageops::resize(&buf, size.x as u32, size.y as u32, RESIZE_FILTER).into_raw()
        }
        channels => return Err(ImageError::UnsupportedChannels(channels)),
    };
    Image::new(size, image.channels(), resized)
}
