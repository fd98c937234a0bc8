//! Windowed feature extraction and target tracking over `image::Image` frames.

pub mod error;
pub mod extractors;
pub mod grid;
pub mod pipeline;
pub mod tracker;

pub use error::{ExtractError, GridError, TrackError};
pub use extractors::{GradientEnergy, IntensityStats, LawsTexture, default_extractors};
pub use grid::{WindowGrid, WindowRect};
pub use pipeline::{Extractor, FeaturePipeline, PipelineConfig};
pub use tracker::{BoundingBox, TemplateTracker, Tracker, TrackingState};
