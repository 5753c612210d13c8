//! Polygon paths in device units.
//!
//! Paths are built incrementally from move, line and close operations and are
//! replayed onto a [`Device`](super::Device) with
//! [`Device::append_path`](super::Device::append_path).

use std::fmt;

/// A path element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    /// Move to a new point (starts a new subpath)
    MoveTo(f64, f64),
    /// Line to a point
    LineTo(f64, f64),
    /// Close the current subpath
    ClosePath,
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::MoveTo(x, y) => write!(f, "M {} {}", x, y),
            PathElement::LineTo(x, y) => write!(f, "L {} {}", x, y),
            PathElement::ClosePath => write!(f, "Z"),
        }
    }
}

/// A polygon path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    /// The path elements
    elements: Vec<PathElement>,

    /// Current point (if any)
    current_point: Option<(f64, f64)>,

    /// Start of the current subpath (for close operations)
    subpath_start: Option<(f64, f64)>,

    /// Whether we have an open subpath
    has_open_subpath: bool,
}

impl Path {
    /// Create a new empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to a new point, starting a new subpath.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.elements.push(PathElement::MoveTo(x, y));
        self.current_point = Some((x, y));
        self.subpath_start = Some((x, y));
        self.has_open_subpath = false;
    }

    /// Add a line segment from the current point to (x, y).
    pub fn line_to(&mut self, x: f64, y: f64) {
        // If we don't have a current point, implicit move
        if self.current_point.is_none() {
            self.move_to(x, y);
            return;
        }

        self.elements.push(PathElement::LineTo(x, y));
        self.current_point = Some((x, y));
        self.has_open_subpath = true;
    }

    /// Add a rectangle as a closed subpath.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.move_to(x, y);
        self.line_to(x + width, y);
        self.line_to(x + width, y + height);
        self.line_to(x, y + height);
        self.close_path();
    }

    /// Close the current subpath.
    ///
    /// This adds a line from the current point back to the start of the subpath.
    pub fn close_path(&mut self) {
        if self.has_open_subpath {
            self.elements.push(PathElement::ClosePath);
            if let Some(start) = self.subpath_start {
                self.current_point = Some(start);
            }
            self.has_open_subpath = false;
        }
    }

    /// Get the current point.
    pub fn current_point(&self) -> Option<(f64, f64)> {
        self.current_point
    }

    /// Get the path elements.
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// The points of every move and line element, in order.
    pub fn vertices(&self) -> Vec<(f64, f64)> {
        self.elements
            .iter()
            .filter_map(|el| match *el {
                PathElement::MoveTo(x, y) | PathElement::LineTo(x, y) => Some((x, y)),
                PathElement::ClosePath => None,
            })
            .collect()
    }

    /// Whether the last subpath ends with a close element.
    pub fn is_closed(&self) -> bool {
        matches!(self.elements.last(), Some(PathElement::ClosePath))
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of elements in the path.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Get the bounding box of the path as `(min_x, min_y, max_x, max_y)`.
    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self.vertices().into_iter();
        let (x0, y0) = points.next()?;
        Some(points.fold((x0, y0, x0, y0), |(min_x, min_y, max_x, max_y), (x, y)| {
            (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
        }))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for el in &self.elements {
            write!(f, "{} ", el)?;
        }
        Ok(())
    }
}

/// Builder for constructing paths.
#[derive(Debug, Default)]
pub struct PathBuilder {
    path: Path,
}

impl PathBuilder {
    /// Create a new path builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to a point.
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.path.move_to(x, y);
        self
    }

    /// Add a line segment.
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.path.line_to(x, y);
        self
    }

    /// Close the current subpath.
    pub fn close(&mut self) -> &mut Self {
        self.path.close_path();
        self
    }

    /// Finish and return the path.
    pub fn finish(self) -> Path {
        self.path
    }
}
