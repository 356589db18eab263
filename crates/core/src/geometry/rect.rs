//! Axis-aligned integer rectangles with the overlap queries room separation relies on.

use serde::{Deserialize, Serialize};

use super::point::Pos;

/// Rectangle anchored at its top-left corner, with `right() == x + width` and
/// `bottom() == y + height`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Pos,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { pos: Pos { x, y }, width, height }
    }

    pub fn is_null(self) -> bool {
        self.width <= 0 && self.height <= 0
    }

    pub fn half_width(self) -> i32 {
        self.width / 2
    }

    pub fn half_height(self) -> i32 {
        self.height / 2
    }

    pub fn center_x(self) -> i32 {
        self.pos.x + self.half_width()
    }

    pub fn center_y(self) -> i32 {
        self.pos.y + self.half_height()
    }

    pub fn center(self) -> Pos {
        Pos { x: self.center_x(), y: self.center_y() }
    }

    pub fn left(self) -> i32 {
        self.pos.x
    }

    pub fn right(self) -> i32 {
        self.pos.x + self.width
    }

    pub fn top(self) -> i32 {
        self.pos.y
    }

    pub fn bottom(self) -> i32 {
        self.pos.y + self.height
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= self.left() && pos.x <= self.right() && pos.y >= self.top() && pos.y <= self.bottom()
    }

    pub fn contains_rect(self, other: &Self) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Shared edges do not count: the overlap must have positive area.
    pub fn intersects(self, other: &Self) -> bool {
        self.overlap(other).is_some()
    }

    pub fn intersect(self, other: &Self) -> Option<Self> {
        self.overlap(other).map(|(x1, y1, x2, y2)| Self::new(x1, y1, x2 - x1, y2 - y1))
    }

    /// Shrinks `self` to the overlap with `other`. Without an overlap the extents go
    /// non-positive, leaving a degenerate rectangle.
    pub fn intersect_with(&mut self, other: &Self) {
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        self.pos.x = self.left().max(other.left());
        self.pos.y = self.top().max(other.top());
        self.width = right - self.pos.x;
        self.height = bottom - self.pos.y;
    }

    /// Bounding rectangle of both. A degenerate side is ignored; two degenerate sides
    /// have no union.
    pub fn united(self, other: &Self) -> Option<Self> {
        match (self.is_null(), other.is_null()) {
            (true, true) => None,
            (false, true) => Some(self),
            (true, false) => Some(*other),
            (false, false) => {
                let x = self.left().min(other.left());
                let y = self.top().min(other.top());
                let right = self.right().max(other.right());
                let bottom = self.bottom().max(other.bottom());
                Some(Self::new(x, y, right - x, bottom - y))
            }
        }
    }

    /// Signed overlap depth per axis. An axis is negated when `self` starts before
    /// `other` on it, so adding the result to `self.pos` pushes `self` out along that
    /// axis. Zero when the rectangles do not intersect.
    pub fn penetration(self, other: &Self) -> Pos {
        let Some((x1, y1, x2, y2)) = self.overlap(other) else {
            return Pos::default();
        };
        let mut depth = Pos { x: x2 - x1, y: y2 - y1 };
        if self.left() < other.left() {
            depth.x = -depth.x;
        }
        if self.top() < other.top() {
            depth.y = -depth.y;
        }
        depth
    }

    fn overlap(self, other: &Self) -> Option<(i32, i32, i32, i32)> {
        let x1 = self.left().max(other.left());
        let y1 = self.top().max(other.top());
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        (x1 < x2 && y1 < y2).then_some((x1, y1, x2, y2))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn fixture() -> (Rect, Rect, Rect) {
        (Rect::new(10, 20, 40, 40), Rect::new(30, 40, 40, 60), Rect::new(20, 65, 20, 20))
    }

    #[test]
    fn default_rect_is_null() {
        assert!(Rect::default().is_null());
        assert!(!Rect::new(0, 0, 1, 0).is_null());
    }

    #[test]
    fn derived_accessors_follow_position_and_extents() {
        let (_, second, third) = fixture();
        assert_eq!(second.half_width(), 20);
        assert_eq!(second.half_height(), 30);
        assert_eq!(second.center(), Pos::new(50, 70));
        assert_eq!(third.left(), 20);
        assert_eq!(third.right(), 40);
        assert_eq!(third.top(), 65);
        assert_eq!(third.bottom(), 85);
    }

    #[test]
    fn point_containment_is_inclusive_of_edges() {
        let (first, _, _) = fixture();
        assert!(first.contains(Pos::new(20, 30)));
        assert!(first.contains(Pos::new(50, 60)));
        assert!(!first.contains(Pos::new(51, 30)));
    }

    #[test]
    fn intersection_queries_match_known_overlaps() {
        let (first, second, third) = fixture();
        assert!(first.intersects(&second) && second.intersects(&first));
        assert!(!first.intersects(&third) && !third.intersects(&first));
        assert_eq!(second.intersect(&first), Some(Rect::new(30, 40, 20, 20)));
        assert_eq!(first.intersect(&third), None);
    }

    #[test]
    fn touching_rectangles_do_not_intersect() {
        let left = Rect::new(0, 0, 10, 10);
        let right = Rect::new(10, 0, 10, 10);
        assert!(!left.intersects(&right));
        assert_eq!(left.penetration(&right), Pos::default());
    }

    #[test]
    fn intersect_with_shrinks_in_place() {
        let (_, second, mut third) = fixture();
        third.intersect_with(&second);
        assert_eq!(third, Rect::new(30, 65, 10, 20));
    }

    #[test]
    fn union_covers_both_and_skips_degenerate_sides() {
        let (first, second, _) = fixture();
        assert_eq!(first.united(&second), Some(Rect::new(10, 20, 60, 80)));
        assert_eq!(first.united(&Rect::default()), Some(first));
        assert_eq!(Rect::default().united(&second), Some(second));
        assert_eq!(Rect::default().united(&Rect::default()), None);
    }

    #[test]
    fn penetration_points_away_from_the_other_rectangle() {
        let (first, second, _) = fixture();
        assert_eq!(first.penetration(&second), Pos::new(-20, -20));
        assert_eq!(second.penetration(&first), Pos::new(20, 20));
    }

    fn any_rect() -> impl Strategy<Value = Rect> {
        (-50_i32..50, -50_i32..50, 0_i32..40, 0_i32..40)
            .prop_map(|(x, y, width, height)| Rect::new(x, y, width, height))
    }

    proptest! {
        #[test]
        fn intersection_test_is_symmetric(a in any_rect(), b in any_rect()) {
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn containment_of_a_non_degenerate_rect_implies_intersection(
            a in any_rect(),
            b in any_rect()
        ) {
            if b.width > 0 && b.height > 0 && a.contains_rect(&b) {
                prop_assert!(a.intersects(&b));
            }
        }

        #[test]
        fn intersection_lies_inside_both_inputs(a in any_rect(), b in any_rect()) {
            match a.intersect(&b) {
                Some(overlap) => {
                    prop_assert!(a.contains_rect(&overlap));
                    prop_assert!(b.contains_rect(&overlap));
                }
                None => prop_assert!(!a.intersects(&b)),
            }
        }

        #[test]
        fn penetration_is_antisymmetric_for_distinct_origins(a in any_rect(), b in any_rect()) {
            if a.left() != b.left() && a.top() != b.top() {
                prop_assert_eq!(a.penetration(&b), Pos::default() - b.penetration(&a));
            }
        }
    }
}
