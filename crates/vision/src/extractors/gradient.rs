use {
    super::{checked_luma, require_at_least},
    crate::{ExtractError, Extractor},
    base::Vec2,
    image::Image,
};

/// Mean absolute Sobel response in x and y, plus the fraction of edge pixels.
#[derive(Debug, Clone)]
pub struct GradientEnergy {
    input_size: Vec2<usize>,
    edge_threshold: f32,
}

impl Default for GradientEnergy {
    fn default() -> Self {
        Self::new(Vec2::new(16, 16))
    }
}

impl GradientEnergy {
    pub fn new(input_size: Vec2<usize>) -> Self {
        Self {
            input_size,
            edge_threshold: 128.0,
        }
    }

    /// Gradient magnitude above which a pixel counts as an edge.
    pub fn with_edge_threshold(mut self, edge_threshold: f32) -> Self {
        self.edge_threshold = edge_threshold;
        self
    }
}

impl Extractor for GradientEnergy {
    fn name(&self) -> &str {
        "gradient"
    }

    fn dims(&self) -> usize {
        3
    }

    fn input_size(&self) -> Vec2<usize> {
        self.input_size
    }

    fn extract(&self, window: &Image) -> Result<Vec<f32>, ExtractError> {
        require_at_least(self.name(), self.input_size, 3)?;
        let luma = checked_luma(self, window)?;
        let (w, h) = (self.input_size.x, self.input_size.y);
        let at = |x: usize, y: usize| luma[y * w + x];

        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut edges = 0usize;
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let gx = (at(x + 1, y - 1) + 2.0 * at(x + 1, y) + at(x + 1, y + 1))
                    - (at(x - 1, y - 1) + 2.0 * at(x - 1, y) + at(x - 1, y + 1));
                let gy = (at(x - 1, y + 1) + 2.0 * at(x, y + 1) + at(x + 1, y + 1))
                    - (at(x - 1, y - 1) + 2.0 * at(x, y - 1) + at(x + 1, y - 1));
                sum_x += gx.abs();
                sum_y += gy.abs();
                if (gx * gx + gy * gy).sqrt() > self.edge_threshold {
                    edges += 1;
                }
            }
        }

        let n = ((w - 2) * (h - 2)) as f32;
        Ok(vec![sum_x / n, sum_y / n, edges as f32 / n])
    }
}
