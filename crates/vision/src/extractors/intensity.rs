use {
    super::checked_luma,
    crate::{ExtractError, Extractor},
    base::Vec2,
    image::Image,
};

/// Mean and standard deviation of window luma.
#[derive(Debug, Clone)]
pub struct IntensityStats {
    input_size: Vec2<usize>,
}

impl Default for IntensityStats {
    fn default() -> Self {
        Self::new(Vec2::new(8, 8))
    }
}

impl IntensityStats {
    pub fn new(input_size: Vec2<usize>) -> Self {
        Self { input_size }
    }
}

impl Extractor for IntensityStats {
    fn name(&self) -> &str {
        "intensity"
    }

    fn dims(&self) -> usize {
        2
    }

    fn input_size(&self) -> Vec2<usize> {
        self.input_size
    }

    fn extract(&self, window: &Image) -> Result<Vec<f32>, ExtractError> {
        let luma = checked_luma(self, window)?;
        let n = luma.len() as f32;
        let mean = luma.iter().sum::<f32>() / n;
        let variance = luma.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / n;
        Ok(vec![mean, variance.sqrt()])
    }
}
