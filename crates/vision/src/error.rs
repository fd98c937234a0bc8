use {base::Vec2, image::ImageError, std::fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    ZeroCount { cols: usize, rows: usize },
    InvalidOverlap(f32),
    EmptyFrame { width: usize, height: usize },
    TooFine { axis: &'static str, length: usize, count: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::ZeroCount { cols, rows } => {
                write!(f, "grid needs at least one window per axis, got {cols}x{rows}")
            }
            GridError::InvalidOverlap(overlap) => {
                write!(f, "overlap must be in [0, 1), got {overlap}")
            }
            GridError::EmptyFrame { width, height } => {
                write!(f, "frame has a zero axis: {width}x{height}")
            }
            GridError::TooFine {
                axis,
                length,
                count,
            } => write!(f, "{count} windows do not fit along {axis} axis of length {length}"),
        }
    }
}

impl std::error::Error for GridError {}

#[derive(Debug, PartialEq)]
pub enum ExtractError {
    NoExtractors,
    Grid(GridError),
    Image(ImageError),
    InputSize {
        extractor: String,
        expected: Vec2<usize>,
        got: Vec2<usize>,
    },
    DimensionMismatch {
        extractor: String,
        expected: usize,
        got: usize,
    },
    Rejected(String),
}

impl ExtractError {
    /// True for errors caused by how the pipeline was set up rather than by a frame.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ExtractError::NoExtractors | ExtractError::Grid(_))
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::NoExtractors => write!(f, "no feature extractors registered"),
            ExtractError::Grid(err) => write!(f, "window grid: {err}"),
            ExtractError::Image(err) => write!(f, "window image: {err}"),
            ExtractError::InputSize {
                extractor,
                expected,
                got,
            } => write!(
                f,
                "{extractor}: expected {}x{} input, got {}x{}",
                expected.x, expected.y, got.x, got.y
            ),
            ExtractError::DimensionMismatch {
                extractor,
                expected,
                got,
            } => write!(f, "{extractor}: declared {expected} features, produced {got}"),
            ExtractError::Rejected(msg) => write!(f, "extractor rejected input: {msg}"),
        }
    }
}

impl std::error::Error for ExtractError {}

impl From<GridError> for ExtractError {
    fn from(err: GridError) -> Self {
        ExtractError::Grid(err)
    }
}

impl From<ImageError> for ExtractError {
    fn from(err: ImageError) -> Self {
        ExtractError::Image(err)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackError {
    InvalidBox(String),
    Rejected(String),
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::InvalidBox(msg) => write!(f, "invalid bounding box: {msg}"),
            TrackError::Rejected(msg) => write!(f, "tracking failed: {msg}"),
        }
    }
}

impl std::error::Error for TrackError {}
