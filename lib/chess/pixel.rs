use derive_more::Constructor;

/// A point in continuous screen coordinates, with `y` growing downwards.
#[derive(Debug, Default, Copy, Clone, PartialEq, Constructor)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// An axis-aligned rectangle in continuous screen coordinates.
#[derive(Debug, Default, Copy, Clone, PartialEq, Constructor)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Whether this rectangle has no area.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0. && self.height > 0.)
    }

    /// Whether the point lies within this rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom edges are exclusive.
    pub fn contains(&self, p: Point) -> bool {
        (self.x..self.x + self.width).contains(&p.x) && (self.y..self.y + self.height).contains(&p.y)
    }
}
