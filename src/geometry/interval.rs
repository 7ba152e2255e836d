use std::ops::{Add, Sub};

use crate::geometry::position::{Position, Size};

/// A one-dimensional range. Callers may hand in `(stop, start)`; every
/// operation here normalizes before comparing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span<T = f64> {
    pub start: T,
    pub stop: T,
}

impl<T: PartialOrd + Copy> Span<T> {
    pub const fn new(start: T, stop: T) -> Self {
        Span { start, stop }
    }

    /// Returns the span with `start <= stop`.
    pub fn normalized(self) -> Self {
        if self.start > self.stop {
            Span {
                start: self.stop,
                stop: self.start,
            }
        } else {
            self
        }
    }
}

impl<T: Sub<Output = T> + Copy> Span<T> {
    pub fn length(&self) -> T {
        self.stop - self.start
    }
}

impl<T> From<(T, T)> for Span<T> {
    fn from((start, stop): (T, T)) -> Self {
        Span { start, stop }
    }
}

/// A rectangle expressed as independent x and y intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionRanges<T = f64> {
    pub x: Span<T>,
    pub y: Span<T>,
}

impl<T> DimensionRanges<T> {
    pub const fn new(x: Span<T>, y: Span<T>) -> Self {
        DimensionRanges { x, y }
    }
}

impl DimensionRanges<f64> {
    /// Ranges covered by an entity whose top-left corner is `position`.
    pub fn from_position_and_size(position: Position, size: Size) -> Self {
        let bottom_right = position.extended_by(size);
        DimensionRanges {
            x: Span::new(position.x, bottom_right.x),
            y: Span::new(position.y, bottom_right.y),
        }
    }
}

/// Origin and extent of the region shared by two rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapArea<T = f64> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T: Add<Output = T> + Copy> OverlapArea<T> {
    pub fn origin(&self) -> (T, T) {
        (self.x, self.y)
    }

    pub fn dimensions(&self) -> (T, T) {
        (self.width, self.height)
    }

    /// Top-left and bottom-right corners.
    pub fn corners(&self) -> ((T, T), (T, T)) {
        (
            (self.x, self.y),
            (self.x + self.width, self.y + self.height),
        )
    }
}

pub struct IntervalMath;

impl IntervalMath {
    /// Intersection of two ranges, or `None` when they neither touch nor cross.
    ///
    /// Boundaries are inclusive: `(0, 5)` and `(5, 10)` overlap in the
    /// zero-length range `(5, 5)`.
    pub fn overlap<T: PartialOrd + Copy>(range_a: Span<T>, range_b: Span<T>) -> Option<Span<T>> {
        let a = range_a.normalized();
        let b = range_b.normalized();

        if a.start > b.stop || b.start > a.stop {
            return None;
        }

        let start = if a.start > b.start { a.start } else { b.start };
        let stop = if a.stop < b.stop { a.stop } else { b.stop };
        Some(Span { start, stop })
    }

    /// Overlap of two rectangles, computed per axis. Width or height may be zero
    /// when the rectangles only share an edge.
    pub fn rectangle_overlap<T>(
        rect_a: &DimensionRanges<T>,
        rect_b: &DimensionRanges<T>,
    ) -> Option<OverlapArea<T>>
    where
        T: PartialOrd + Copy + Sub<Output = T>,
    {
        let x_overlap = Self::overlap(rect_a.x, rect_b.x)?;
        let y_overlap = Self::overlap(rect_a.y, rect_b.y)?;

        Some(OverlapArea {
            x: x_overlap.start,
            y: y_overlap.start,
            width: x_overlap.length(),
            height: y_overlap.length(),
        })
    }
}
