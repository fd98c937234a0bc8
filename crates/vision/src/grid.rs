use {
    crate::GridError,
    base::{Rect, Vec2},
};

// slack for float rounding when taking the ceiling of exact ratios like 160 / 8
const EPSILON: f64 = 1e-9;

/// Half-open window `[x0, x1) × [y0, y1)` in frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRect {
    pub x0: usize,
    pub x1: usize,
    pub y0: usize,
    pub y1: usize,
}

impl WindowRect {
    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }

    pub fn rect(&self) -> Rect<usize> {
        Rect::from_min_max(Vec2::new(self.x0, self.y0), Vec2::new(self.x1, self.y1))
    }
}

// (start, end) spans along one axis
fn axis_spans(
    axis: &'static str,
    length: usize,
    count: usize,
    overlap: f64,
) -> Result<(usize, Vec<(usize, usize)>), GridError> {
    let too_fine = GridError::TooFine {
        axis,
        length,
        count,
    };
    let reach = 1.0 + (count - 1) as f64 * (1.0 - overlap);
    let size = (length as f64 / reach - EPSILON).ceil() as usize;
    if size == 0 {
        return Err(too_fine);
    }

    // stride keeps neighbours overlapping by `overlap` of the nominal size;
    // round up instead when rounding to nearest would leave the edge uncovered
    let exact_step = size as f64 * (1.0 - overlap);
    let mut step = exact_step.round() as usize;
    if step == 0 || (count - 1) * step + size < length {
        step = exact_step.ceil() as usize;
    }
    if (count - 1) * step >= length {
        return Err(too_fine);
    }

    let spans = (0..count)
        .map(|i| {
            let start = i * step;
            (start, (start + size).min(length))
        })
        .collect();
    Ok((size, spans))
}

/// Partition of a frame into `cols × rows` overlapping windows.
///
/// Windows have a nominal size chosen so that `n` windows overlapping by a
/// fraction `f` cover the axis. Windows that run past the frame edge are
/// clipped, so trailing windows may be smaller than the nominal size. The
/// windows always cover the whole frame and never leave it.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowGrid {
    frame: Vec2<usize>,
    grid: Vec2<usize>,
    overlap: f32,
    window: Vec2<usize>,
    rects: Vec<WindowRect>,
}

impl WindowGrid {
    pub fn new(
        frame: Vec2<usize>,
        grid: Vec2<usize>,
        overlap: f32,
    ) -> Result<Self, GridError> {
        if grid.x == 0 || grid.y == 0 {
            return Err(GridError::ZeroCount {
                cols: grid.x,
                rows: grid.y,
            });
        }
        if !(0.0..1.0).contains(&overlap) {
            return Err(GridError::InvalidOverlap(overlap));
        }
        if frame.x == 0 || frame.y == 0 {
            return Err(GridError::EmptyFrame {
                width: frame.x,
                height: frame.y,
            });
        }

        let (width, xs) = axis_spans("x", frame.x, grid.x, overlap as f64)?;
        let (height, ys) = axis_spans("y", frame.y, grid.y, overlap as f64)?;

        let mut rects = Vec::with_capacity(grid.x * grid.y);
        for &(y0, y1) in &ys {
            for &(x0, x1) in &xs {
                rects.push(WindowRect { x0, x1, y0, y1 });
            }
        }

        Ok(Self {
            frame,
            grid,
            overlap,
            window: Vec2::new(width, height),
            rects,
        })
    }

    /// Windows in row-major order: all columns of row 0, then row 1, ...
    pub fn rects(&self) -> &[WindowRect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Window size before clipping to the frame.
    pub fn nominal_size(&self) -> Vec2<usize> {
        self.window
    }

    pub fn frame_size(&self) -> Vec2<usize> {
        self.frame
    }

    pub fn grid_size(&self) -> Vec2<usize> {
        self.grid
    }

    pub fn overlap(&self) -> f32 {
        self.overlap
    }

    /// True if this grid was built for the given frame geometry.
    pub fn fits(&self, frame: Vec2<usize>) -> bool {
        self.frame == frame
    }
}
