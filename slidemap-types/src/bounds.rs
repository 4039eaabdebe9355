use geo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// An accumulating axis-aligned region covering a set of markers.
///
/// Starts empty and grows as points or rectangles are added. Non-finite
/// coordinates are ignored, so a region built only from invalid geometry
/// stays empty and [`MarkerBounds::is_valid`] reports `false`.
///
/// # Examples
///
/// ```
/// use slidemap_types::bounds::MarkerBounds;
/// use geo::Point;
///
/// let mut bounds = MarkerBounds::new();
/// assert!(!bounds.is_valid());
///
/// bounds.extend_point(&Point::new(-83.0458, 42.3314));
/// bounds.extend_point(&Point::new(-83.0470, 42.3340));
/// assert!(bounds.is_valid());
///
/// let rect = bounds.rect().unwrap();
/// assert_eq!(rect.min().x, -83.0470);
/// assert_eq!(rect.max().y, 42.3340);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerBounds {
    rect: Option<Rect>,
}

impl MarkerBounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a region from any number of points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut bounds = Self::new();
        for point in points {
            bounds.extend_point(point);
        }
        bounds
    }

    /// Grow the region to include `point`.
    pub fn extend_point(&mut self, point: &Point) {
        self.extend_rect(&Rect::new(point.0, point.0));
    }

    /// Grow the region to include `rect`.
    pub fn extend_rect(&mut self, rect: &Rect) {
        let (min, max) = (rect.min(), rect.max());
        if !(min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite()) {
            return;
        }

        self.rect = Some(match self.rect {
            None => *rect,
            Some(current) => Rect::new(
                geo::coord! {
                    x: current.min().x.min(min.x),
                    y: current.min().y.min(min.y),
                },
                geo::coord! {
                    x: current.max().x.max(max.x),
                    y: current.max().y.max(max.y),
                },
            ),
        });
    }

    /// A region is valid once it covers at least one finite coordinate.
    pub fn is_valid(&self) -> bool {
        self.rect.is_some()
    }

    /// The covered rectangle, if any.
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    /// Center of the covered rectangle.
    pub fn center(&self) -> Option<Point> {
        self.rect.map(|rect| Point::from(rect.center()))
    }
}
