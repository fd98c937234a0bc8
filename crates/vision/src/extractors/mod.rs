//! Reference extractors. Each works on the luma of its window.

mod gradient;
mod intensity;
mod laws;

pub use {gradient::GradientEnergy, intensity::IntensityStats, laws::LawsTexture};

use {
    crate::{ExtractError, Extractor},
    base::Vec2,
    image::Image,
};

/// The standard extractor set, in feature order: texture, gradient, intensity.
pub fn default_extractors() -> Vec<Box<dyn Extractor>> {
    vec![
        Box::new(LawsTexture::default()),
        Box::new(GradientEnergy::default()),
        Box::new(IntensityStats::default()),
    ]
}

// window luma as a row-major f32 plane, after checking the window size
fn checked_luma(
    extractor: &dyn Extractor,
    window: &Image,
) -> Result<Vec<f32>, ExtractError> {
    let expected = extractor.input_size();
    if window.size() != expected {
        return Err(ExtractError::InputSize {
            extractor: extractor.name().to_string(),
            expected,
            got: window.size(),
        });
    }
    Ok(window.luma_plane())
}

// smallest input an extractor with a `kernel`-wide support accepts
fn require_at_least(name: &str, size: Vec2<usize>, kernel: usize) -> Result<(), ExtractError> {
    if size.x < kernel || size.y < kernel {
        return Err(ExtractError::Rejected(format!(
            "{name} needs at least {kernel}x{kernel} pixels, got {}x{}",
            size.x, size.y
        )));
    }
    Ok(())
}
