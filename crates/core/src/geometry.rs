//! Axis-aligned rectangles in pixel space.

/// Rectangle given by its edges, `y` growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Square of side `size` with its top-left corner at `(x, y)`.
    pub fn square(x: f32, y: f32, size: f32) -> Self {
        Self::new(x, y, x + size, y + size)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    ///
    /// ```
    /// use ninja_thief_core::geometry::Rect;
    ///
    /// let a = Rect::square(0.0, 0.0, 8.0);
    /// assert!(a.overlaps(&Rect::square(7.5, 7.5, 8.0)));
    /// assert!(!a.overlaps(&Rect::square(8.0, 0.0, 8.0)));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let dx = (self.center_x() - other.center_x()).abs();
        let dy = (self.center_y() - other.center_y()).abs();
        dx < (self.width() + other.width()) / 2.0 && dy < (self.height() + other.height()) / 2.0
    }

    /// Strict horizontal overlap only.
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.left < right && left < self.right
    }

    /// Same rectangle grown downwards by `amount` pixels.
    pub fn extend_down(&self, amount: f32) -> Self {
        Self::new(self.left, self.top, self.right, self.bottom + amount)
    }
}
