use {
    crate::TrackError,
    base::{Rect, Vec2},
    image::Image,
};

/// Axis-aligned target box in frame pixels, `min` inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min: Vec2<i64>,
    pub max: Vec2<i64>,
}

impl BoundingBox {
    /// Box spanned by two opposite corners, in any order.
    pub fn from_corners(a: Vec2<i64>, b: Vec2<i64>) -> Result<Self, TrackError> {
        if a.x == b.x || a.y == b.y {
            return Err(TrackError::InvalidBox(format!(
                "corners ({}, {}) and ({}, {}) do not span an area",
                a.x, a.y, b.x, b.y
            )));
        }
        Ok(Self {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        })
    }

    /// Parse loosely shaped input: exactly two points of exactly two coordinates.
    pub fn from_points(points: Option<&[Vec<i64>]>) -> Result<Self, TrackError> {
        let points = points.ok_or_else(|| TrackError::InvalidBox("no corners given".to_string()))?;
        if points.len() != 2 {
            return Err(TrackError::InvalidBox(format!(
                "expected 2 corners, got {}",
                points.len()
            )));
        }
        let mut corners = [Vec2::zero(); 2];
        for (corner, point) in corners.iter_mut().zip(points) {
            match point.as_slice() {
                &[x, y] => *corner = Vec2::new(x, y),
                other => {
                    return Err(TrackError::InvalidBox(format!(
                        "corner has {} coordinates, expected 2",
                        other.len()
                    )));
                }
            }
        }
        Self::from_corners(corners[0], corners[1])
    }

    pub fn width(&self) -> i64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2<i64> {
        Vec2::new((self.min.x + self.max.x) / 2, (self.min.y + self.max.y) / 2)
    }

    /// Same box moved by `offset`.
    pub fn translate(&self, offset: Vec2<i64>) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// The box as a frame rectangle, if it lies entirely inside `frame`.
    pub fn to_rect(&self, frame: Vec2<usize>) -> Option<Rect<usize>> {
        let inside = self.min.x >= 0
            && self.min.y >= 0
            && self.max.x <= frame.x as i64
            && self.max.y <= frame.y as i64;
        if !inside {
            return None;
        }
        Some(Rect::from_min_max(
            Vec2::new(self.min.x as usize, self.min.y as usize),
            Vec2::new(self.max.x as usize, self.max.y as usize),
        ))
    }
}

/// What a tracker carries from one frame to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingState {
    bbox: BoundingBox,
    template: Image,
    score: f32,
}

impl TrackingState {
    pub fn new(bbox: BoundingBox, template: Image) -> Self {
        Self {
            bbox,
            template,
            score: 0.0,
        }
    }

    /// Current target box.
    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Appearance of the target when tracking started.
    pub fn template(&self) -> &Image {
        &self.template
    }

    /// Mean absolute luma difference of the last match; 0 is a perfect match.
    pub fn score(&self) -> f32 {
        self.score
    }
}

pub trait Tracker: Send {
    fn init(&self, frame: &Image, bbox: &BoundingBox) -> Result<TrackingState, TrackError>;
    fn update(&self, frame: &Image, state: TrackingState) -> Result<TrackingState, TrackError>;
}

/// Exhaustive template match in a square neighbourhood of the previous box.
///
/// The template is the luma of the initial box and is never updated, so the
/// tracker does not drift but also does not follow appearance changes.
#[derive(Debug, Clone)]
pub struct TemplateTracker {
    search_radius: i64,
    max_mean_error: f32,
}

impl Default for TemplateTracker {
    fn default() -> Self {
        Self {
            search_radius: 8,
            max_mean_error: 48.0,
        }
    }
}

impl TemplateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest per-frame displacement searched, in pixels.
    pub fn with_search_radius(mut self, search_radius: usize) -> Self {
        self.search_radius = search_radius as i64;
        self
    }

    /// Match quality beyond which the target counts as lost.
    pub fn with_max_mean_error(mut self, max_mean_error: f32) -> Self {
        self.max_mean_error = max_mean_error;
        self
    }

    pub fn search_radius(&self) -> usize {
        self.search_radius as usize
    }

    pub fn max_mean_error(&self) -> f32 {
        self.max_mean_error
    }
}

// mean absolute difference between the template and the frame at `origin`
fn mean_error(frame: &Image, template: &Image, origin: Vec2<usize>) -> f32 {
    let mut total = 0u64;
    for y in 0..template.height() {
        for x in 0..template.width() {
            let a = frame.get(origin.x + x, origin.y + y, 0) as i32;
            let b = template.get(x, y, 0) as i32;
            total += (a - b).unsigned_abs() as u64;
        }
    }
    total as f32 / (template.width() * template.height()) as f32
}

impl Tracker for TemplateTracker {
    fn init(&self, frame: &Image, bbox: &BoundingBox) -> Result<TrackingState, TrackError> {
        let rect = bbox.to_rect(frame.size()).ok_or_else(|| {
            TrackError::InvalidBox(format!(
                "box {:?}..{:?} outside {}x{} frame",
                bbox.min,
                bbox.max,
                frame.width(),
                frame.height()
            ))
        })?;
        let template = frame
            .crop(rect)
            .map_err(|err| TrackError::InvalidBox(err.to_string()))?
            .to_luma();
        log::debug!("tracker: template {}x{}", template.width(), template.height());
        Ok(TrackingState::new(*bbox, template))
    }

    fn update(&self, frame: &Image, state: TrackingState) -> Result<TrackingState, TrackError> {
        let luma = frame.to_luma();
        let mut best: Option<(f32, BoundingBox)> = None;
        for dy in -self.search_radius..=self.search_radius {
            for dx in -self.search_radius..=self.search_radius {
                let candidate = state.bbox.translate(Vec2::new(dx, dy));
                let Some(rect) = candidate.to_rect(luma.size()) else {
                    continue;
                };
                let error = mean_error(&luma, &state.template, rect.origin);
                if best.is_none_or(|(best_error, _)| error < best_error) {
                    best = Some((error, candidate));
                }
            }
        }

        let (error, bbox) =
            best.ok_or_else(|| TrackError::Rejected("target left the frame".to_string()))?;
        if error > self.max_mean_error {
            return Err(TrackError::Rejected(format!(
                "lost target (mean error {error:.1})"
            )));
        }
        Ok(TrackingState {
            bbox,
            template: state.template,
            score: error,
        })
    }
}
