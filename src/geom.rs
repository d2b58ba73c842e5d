use serde::{Deserialize, Serialize};

/// A grid cell address as `(row, col)`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    pub const fn new(row: i32, col: i32) -> Self {
        Point { row, col }
    }

    pub fn add(&self, other: &Point) -> Point {
        self.offset(other.row, other.col)
    }

    pub fn offset(&self, dv: i32, dh: i32) -> Point {
        Point::new(self.row + dv, self.col + dh)
    }

    /// Only meaningful for comparing distances against each other.
    pub fn dist_sq(&self, other: &Point) -> i32 {
        let dy = self.row - other.row;
        let dx = self.col - other.col;

        dy * dy + dx * dx
    }
}

/// Axis-aligned rectangle. `right` and `bottom` are exclusive.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub struct Rect {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Rect {
    /// Zero-area rectangle used to report that no room could be placed.
    pub const INVALID: Rect = Rect {
        left: 0,
        right: 0,
        top: 0,
        bottom: 0,
    };

    pub const fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Rect {
            left,
            right,
            top,
            bottom,
        }
    }

    /// A rectangle spanning `height + 1` rows and `width + 1` columns around `center`. Even sizes
    /// keep the center cell exactly in the middle.
    pub fn from_center(center: &Point, height: i32, width: i32) -> Self {
        Rect::new(
            center.col - width / 2,
            center.col + width / 2 + 1,
            center.row - height / 2,
            center.row + height / 2 + 1,
        )
    }

    pub fn is_valid(&self) -> bool {
        self.left < self.right && self.top < self.bottom
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// `[left, right, top, bottom]`
    pub fn bounds(&self) -> [i32; 4] {
        [self.left, self.right, self.top, self.bottom]
    }

    pub fn grow(&self, amount: i32) -> Rect {
        Rect::new(
            self.left - amount,
            self.right + amount,
            self.top - amount,
            self.bottom + amount,
        )
    }

    pub fn shrink(&self, amount: i32) -> Rect {
        self.grow(-amount)
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.row >= self.top && p.row < self.bottom && p.col >= self.left && p.col < self.right
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Every cell of the rectangle in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let Rect {
            left,
            right,
            top,
            bottom,
        } = *self;

        (top..bottom).flat_map(move |row| (left..right).map(move |col| Point::new(row, col)))
    }
}
