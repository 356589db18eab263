//! Point types: `Pos` for grid-space room geometry, `Point` for triangulation vertices.

use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Float components closer to zero than this count as zero in [`Point::is_null`].
pub const POINT_EPSILON: f64 = 2e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn zero(&mut self) -> &mut Self {
        self.x = 0;
        self.y = 0;
        self
    }

    pub fn is_null(self) -> bool {
        self.x == 0 && self.y == 0
    }

    pub fn distance_sq(self, other: Self) -> i64 {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.distance_sq(other) as f64).sqrt()
    }

    pub fn to_point(self) -> Point {
        Point { x: f64::from(self.x), y: f64::from(self.y) }
    }
}

impl Add for Pos {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl AddAssign for Pos {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Pos {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl SubAssign for Pos {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<i32> for Pos {
    type Output = Self;

    fn mul(self, factor: i32) -> Self {
        Self { x: self.x * factor, y: self.y * factor }
    }
}

/// Truncating integer division on both components.
impl Div<i32> for Pos {
    type Output = Self;

    fn div(self, divisor: i32) -> Self {
        Self { x: self.x / divisor, y: self.y / divisor }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero(&mut self) -> &mut Self {
        self.x = 0.0;
        self.y = 0.0;
        self
    }

    pub fn is_null(self) -> bool {
        self.x.abs() < POINT_EPSILON && self.y.abs() < POINT_EPSILON
    }

    pub fn distance_sq(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Self) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Z component of `(b - self) × (c - self)`; positive when `c` lies left of `self → b`.
    pub fn cross(self, b: Self, c: Self) -> f64 {
        let (u1, v1) = (b.x - self.x, b.y - self.y);
        let (u2, v2) = (c.x - self.x, c.y - self.y);
        u1 * v2 - v1 * u2
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self { x: self.x * factor, y: self.y * factor }
    }
}

impl Div<f64> for Point {
    type Output = Self;

    fn div(self, divisor: f64) -> Self {
        Self { x: self.x / divisor, y: self.y / divisor }
    }
}

impl From<Pos> for Point {
    fn from(pos: Pos) -> Self {
        pos.to_point()
    }
}
