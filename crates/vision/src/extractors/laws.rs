use {
    super::{checked_luma, require_at_least},
    crate::{ExtractError, Extractor},
    base::Vec2,
    image::Image,
};

// 1D Laws vectors: level, edge, spot
const L5: [f32; 5] = [1.0, 4.0, 6.0, 4.0, 1.0];
const E5: [f32; 5] = [-1.0, -2.0, 0.0, 2.0, 1.0];
const S5: [f32; 5] = [-1.0, 0.0, 2.0, 0.0, -1.0];

// (vertical, horizontal) pairs, in output order
const MASKS: [([f32; 5], [f32; 5]); 4] = [(L5, E5), (E5, L5), (E5, S5), (L5, S5)];

/// Laws' texture energy for the L5E5, E5L5, E5S5 and L5S5 masks.
///
/// The window mean is removed first so the energies do not depend on
/// brightness. Each energy is the mean absolute mask response over the
/// valid region.
#[derive(Debug, Clone)]
pub struct LawsTexture {
    input_size: Vec2<usize>,
}

impl Default for LawsTexture {
    fn default() -> Self {
        Self::new(Vec2::new(16, 16))
    }
}

impl LawsTexture {
    pub fn new(input_size: Vec2<usize>) -> Self {
        Self { input_size }
    }
}

fn energy(plane: &[f32], size: Vec2<usize>, vertical: &[f32; 5], horizontal: &[f32; 5]) -> f32 {
    let mut total = 0.0;
    for y in 0..=size.y - 5 {
        for x in 0..=size.x - 5 {
            let mut response = 0.0;
            for (j, v) in vertical.iter().enumerate() {
                let row = &plane[(y + j) * size.x + x..];
                for (i, h) in horizontal.iter().enumerate() {
                    response += v * h * row[i];
                }
            }
            total += response.abs();
        }
    }
    total / ((size.x - 4) * (size.y - 4)) as f32
}

impl Extractor for LawsTexture {
    fn name(&self) -> &str {
        "laws"
    }

    fn dims(&self) -> usize {
        MASKS.len()
    }

    fn input_size(&self) -> Vec2<usize> {
        self.input_size
    }

    fn extract(&self, window: &Image) -> Result<Vec<f32>, ExtractError> {
        require_at_least(self.name(), self.input_size, 5)?;
        let mut plane = checked_luma(self, window)?;
        let mean = plane.iter().sum::<f32>() / plane.len() as f32;
        plane.iter_mut().for_each(|v| *v -= mean);

        Ok(MASKS
            .iter()
            .map(|(vertical, horizontal)| energy(&plane, self.input_size, vertical, horizontal))
            .collect())
    }
}
