use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
/// Rectangle dimensions
pub struct Rect {
    /// Left point of the rectangle
    pub left: i32,
    /// Top point of the rectangle
    pub top: i32,
    /// Width of the rectangle (from the left point)
    pub right: i32,
    /// Height of the rectangle (from the top point)
    pub bottom: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            right: width,
            bottom: height,
        }
    }

    /// x coordinate of the right edge
    #[must_use]
    pub const fn right_edge(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// y coordinate of the bottom edge
    #[must_use]
    pub const fn bottom_edge(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }

    pub fn is_same_size_as(&self, rhs: &Self) -> bool {
        self.right == rhs.right && self.bottom == rhs.bottom
    }

    pub fn has_same_position_as(&self, rhs: &Self) -> bool {
        self.left == rhs.left && self.top == rhs.top
    }

    /// Same rectangle moved so that its top-left corner sits at `(left, top)`
    #[must_use]
    pub const fn moved_to(&self, left: i32, top: i32) -> Self {
        Self {
            left,
            top,
            right: self.right,
            bottom: self.bottom,
        }
    }

    /// Whether the interiors of the two rectangles intersect with a positive area.
    ///
    /// Rectangles that only share an edge or a corner do not overlap.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.left < other.right_edge()
            && other.left < self.right_edge()
            && self.top < other.bottom_edge()
            && other.top < self.bottom_edge()
    }

    #[must_use]
    pub const fn contains_point(&self, point: (i32, i32)) -> bool {
        point.0 >= self.left
            && point.0 <= self.right_edge()
            && point.1 >= self.top
            && point.1 <= self.bottom_edge()
    }
}

/// Free function form of [`Rect::overlaps`]
#[must_use]
pub const fn rectangles_overlap(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rectangles() {
        let a = Rect::new(0, 0, 200, 100);
        let b = Rect::new(50, 0, 200, 100);
        assert!(rectangles_overlap(&a, &b));
        assert!(rectangles_overlap(&b, &a));
    }

    #[test]
    fn test_contained_rectangle_overlaps() {
        let outer = Rect::new(0, 0, 500, 500);
        let inner = Rect::new(100, 100, 10, 10);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_edge_adjacent_rectangles_do_not_overlap() {
        let a = Rect::new(0, 0, 200, 100);
        let right = Rect::new(200, 0, 200, 100);
        let below = Rect::new(0, 100, 200, 100);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_corner_touching_rectangles_do_not_overlap() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(100, 100, 100, 100);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_disjoint_rectangles() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(400, 300, 100, 100);
        assert!(!rectangles_overlap(&a, &b));
    }

    #[test]
    fn test_edges() {
        let rect = Rect::new(32, 64, 200, 100);
        assert_eq!(rect.right_edge(), 232);
        assert_eq!(rect.bottom_edge(), 164);
        assert!(rect.contains_point((232, 164)));
        assert!(!rect.contains_point((233, 164)));
    }

    #[test]
    fn test_edges_saturate_at_the_extremes() {
        let far = Rect::new(i32::MAX - 10, i32::MAX - 10, 300, 100);
        assert_eq!(far.right_edge(), i32::MAX);
        assert_eq!(far.bottom_edge(), i32::MAX);
        assert!(far.overlaps(&far.moved_to(i32::MAX - 20, i32::MAX - 20)));
        assert!(!far.overlaps(&Rect::new(0, 0, 300, 100)));
    }

    #[test]
    fn test_moved_to_keeps_size() {
        let rect = Rect::new(10, 10, 200, 100);
        let moved = rect.moved_to(64, 96);
        assert!(moved.is_same_size_as(&rect));
        assert!(!moved.has_same_position_as(&rect));
        assert_eq!(moved, Rect::new(64, 96, 200, 100));
    }
}
