use {
    crate::{ExtractError, GridError, WindowGrid},
    base::{Tensor, Vec2},
    image::Image,
};

/// A per-window feature extractor.
///
/// The pipeline resamples each window to `input_size()` before calling
/// `extract`, which must return exactly `dims()` values.
pub trait Extractor: Send {
    fn name(&self) -> &str;
    fn dims(&self) -> usize;
    fn input_size(&self) -> Vec2<usize>;
    fn extract(&self, window: &Image) -> Result<Vec<f32>, ExtractError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    grid: Vec2<usize>,
    overlap: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            grid: Vec2::new(15, 7),
            overlap: 0.5,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of window columns and rows.
    pub fn with_grid(mut self, cols: usize, rows: usize) -> Self {
        self.grid = Vec2::new(cols, rows);
        self
    }

    pub fn with_overlap(mut self, overlap: f32) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn grid(&self) -> Vec2<usize> {
        self.grid
    }

    pub fn overlap(&self) -> f32 {
        self.overlap
    }
}

/// Runs every registered extractor over every window of a frame.
pub struct FeaturePipeline {
    extractors: Vec<Box<dyn Extractor>>,
    config: PipelineConfig,
    total_dims: usize,
    grid: Option<WindowGrid>,
}

impl FeaturePipeline {
    pub fn new(
        extractors: Vec<Box<dyn Extractor>>,
        config: PipelineConfig,
    ) -> Result<Self, ExtractError> {
        if extractors.is_empty() {
            return Err(ExtractError::NoExtractors);
        }
        let grid = config.grid();
        if grid.x == 0 || grid.y == 0 {
            return Err(GridError::ZeroCount {
                cols: grid.x,
                rows: grid.y,
            }
            .into());
        }
        if !(0.0..1.0).contains(&config.overlap()) {
            return Err(GridError::InvalidOverlap(config.overlap()).into());
        }
        let total_dims = extractors.iter().map(|extractor| extractor.dims()).sum();
        log::debug!(
            "feature pipeline: {} extractors, {} features per window",
            extractors.len(),
            total_dims
        );
        Ok(Self {
            extractors,
            config,
            total_dims,
            grid: None,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Length of one window's feature row.
    pub fn total_dims(&self) -> usize {
        self.total_dims
    }

    /// The grid for `frame`, rebuilt only when the frame geometry changes.
    pub fn grid_for(&mut self, frame: Vec2<usize>) -> Result<&WindowGrid, ExtractError> {
        let grid = match self.grid.take() {
            Some(grid) if grid.fits(frame) => grid,
            _ => {
                let grid = WindowGrid::new(frame, self.config.grid(), self.config.overlap())?;
                log::debug!(
                    "window grid for {}x{}: {} windows of {}x{}",
                    frame.x,
                    frame.y,
                    grid.len(),
                    grid.nominal_size().x,
                    grid.nominal_size().y
                );
                grid
            }
        };
        Ok(self.grid.insert(grid))
    }

    /// Feature matrix of shape `[cols * rows, total_dims]`, one row per window
    /// in row-major grid order. Any failing window fails the whole frame.
    pub fn extract(&mut self, frame: &Image) -> Result<Tensor<f32>, ExtractError> {
        let total_dims = self.total_dims;
        let rects = self.grid_for(frame.size())?.rects().to_vec();

        let mut data = Vec::with_capacity(rects.len() * total_dims);
        for rect in &rects {
            let window = frame.crop(rect.rect())?;
            for extractor in &self.extractors {
                let input = image::resize(&window, extractor.input_size())?;
                let features = extractor.extract(&input)?;
                if features.len() != extractor.dims() {
                    return Err(ExtractError::DimensionMismatch {
                        extractor: extractor.name().to_string(),
                        expected: extractor.dims(),
                        got: features.len(),
                    });
                }
                data.extend_from_slice(&features);
            }
        }

        Tensor::new(vec![rects.len(), total_dims], data)
            .map_err(|err| ExtractError::Rejected(err.to_string()))
    }
}
