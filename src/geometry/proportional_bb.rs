use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::constants::{DEFAULT_ACTIVE_END, DEFAULT_ACTIVE_START};
use crate::error::{CollisionError, Result};
use crate::geometry::interval::{DimensionRanges, Span};

/// A sub-rectangle defined as fractions of some owner's bounds.
///
/// Invariants, upheld by every constructor:
/// - all four bounds are finite and within `0.0..=1.0`;
/// - `x_start < x_end` and `y_start < y_end`.
///
/// The box is immutable. The `with_*` methods validate and return a new box,
/// so a half-updated or inverted box is never observable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProportionalBoundingBox {
    x_start: f64,
    x_end: f64,
    y_start: f64,
    y_end: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

impl ProportionalBoundingBox {
    /// Validates and builds a box. A reversed pair is swapped with a warning;
    /// an equal pair is rejected as degenerate.
    pub fn new(
        x_start: impl Into<f64>,
        x_end: impl Into<f64>,
        y_start: impl Into<f64>,
        y_end: impl Into<f64>,
    ) -> Result<Self> {
        let x_start = Self::check_bound("x_start", x_start.into())?;
        let x_end = Self::check_bound("x_end", x_end.into())?;
        let y_start = Self::check_bound("y_start", y_start.into())?;
        let y_end = Self::check_bound("y_end", y_end.into())?;

        let (x_start, x_end) = Self::order_pair(Axis::X, x_start, x_end)?;
        let (y_start, y_end) = Self::order_pair(Axis::Y, y_start, y_end)?;

        Ok(ProportionalBoundingBox {
            x_start,
            x_end,
            y_start,
            y_end,
        })
    }

    /// The box covering the owner's whole area.
    pub const fn full() -> Self {
        ProportionalBoundingBox {
            x_start: DEFAULT_ACTIVE_START,
            x_end: DEFAULT_ACTIVE_END,
            y_start: DEFAULT_ACTIVE_START,
            y_end: DEFAULT_ACTIVE_END,
        }
    }

    pub fn x_start(&self) -> f64 {
        self.x_start
    }

    pub fn x_end(&self) -> f64 {
        self.x_end
    }

    pub fn y_start(&self) -> f64 {
        self.y_start
    }

    pub fn y_end(&self) -> f64 {
        self.y_end
    }

    pub fn is_full(&self) -> bool {
        *self == Self::full()
    }

    /// Replaces both x bounds; same rules as the constructor.
    pub fn with_x_bounds(&self, start: impl Into<f64>, end: impl Into<f64>) -> Result<Self> {
        let start = Self::check_bound("x_start", start.into())?;
        let end = Self::check_bound("x_end", end.into())?;
        let (x_start, x_end) = Self::order_pair(Axis::X, start, end)?;
        Ok(ProportionalBoundingBox {
            x_start,
            x_end,
            ..*self
        })
    }

    /// Replaces both y bounds; same rules as the constructor.
    pub fn with_y_bounds(&self, start: impl Into<f64>, end: impl Into<f64>) -> Result<Self> {
        let start = Self::check_bound("y_start", start.into())?;
        let end = Self::check_bound("y_end", end.into())?;
        let (y_start, y_end) = Self::order_pair(Axis::Y, start, end)?;
        Ok(ProportionalBoundingBox {
            y_start,
            y_end,
            ..*self
        })
    }

    // Single-bound updates are checked against the current paired bound and
    // rejected, never swapped.

    pub fn with_x_start(&self, value: impl Into<f64>) -> Result<Self> {
        let x_start = Self::check_bound("x_start", value.into())?;
        Self::check_strict_order(Axis::X, x_start, self.x_end)?;
        Ok(ProportionalBoundingBox { x_start, ..*self })
    }

    pub fn with_x_end(&self, value: impl Into<f64>) -> Result<Self> {
        let x_end = Self::check_bound("x_end", value.into())?;
        Self::check_strict_order(Axis::X, self.x_start, x_end)?;
        Ok(ProportionalBoundingBox { x_end, ..*self })
    }

    pub fn with_y_start(&self, value: impl Into<f64>) -> Result<Self> {
        let y_start = Self::check_bound("y_start", value.into())?;
        Self::check_strict_order(Axis::Y, y_start, self.y_end)?;
        Ok(ProportionalBoundingBox { y_start, ..*self })
    }

    pub fn with_y_end(&self, value: impl Into<f64>) -> Result<Self> {
        let y_end = Self::check_bound("y_end", value.into())?;
        Self::check_strict_order(Axis::Y, self.y_start, y_end)?;
        Ok(ProportionalBoundingBox { y_end, ..*self })
    }

    /// Maps concrete ranges onto the sub-rectangle this box describes,
    /// interpolating linearly from each range's start toward its stop.
    pub fn to_concrete_ranges(&self, ranges: &DimensionRanges) -> DimensionRanges {
        let (x0, x1) = (ranges.x.start, ranges.x.stop);
        let (y0, y1) = (ranges.y.start, ranges.y.stop);
        let width = x1 - x0;
        let height = y1 - y0;

        DimensionRanges::new(
            Span::new(x0 + self.x_start * width, x0 + self.x_end * width),
            Span::new(y0 + self.y_start * height, y0 + self.y_end * height),
        )
    }

    fn check_bound(name: &str, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(CollisionError::type_error(format!(
                "ProportionalBoundingBox: {name} ({value}) is not a real number"
            )));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(CollisionError::range(format!(
                "ProportionalBoundingBox: {name} ({value}) is outside 0.0..=1.0"
            )));
        }
        Ok(value)
    }

    fn order_pair(axis: Axis, start: f64, end: f64) -> Result<(f64, f64)> {
        if start == end {
            return Err(Self::zero_size(axis, start));
        }
        if start > end {
            warn!(axis = axis.name(), start, end, "swapping reversed proportional bounds");
            return Ok((end, start));
        }
        Ok((start, end))
    }

    fn check_strict_order(axis: Axis, start: f64, end: f64) -> Result<()> {
        if start == end {
            return Err(Self::zero_size(axis, start));
        }
        if start > end {
            return Err(CollisionError::range(format!(
                "ProportionalBoundingBox: {0}_start ({start}) must be less than {0}_end ({end})",
                axis.name()
            )));
        }
        Ok(())
    }

    fn zero_size(axis: Axis, at: f64) -> CollisionError {
        CollisionError::degenerate(format!(
            "ProportionalBoundingBox: {} dimension has zero size (both bounds are {at})",
            axis.name()
        ))
    }
}

impl Default for ProportionalBoundingBox {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for ProportionalBoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x_start, self.x_end, self.y_start, self.y_end)
    }
}

/// Parses `"x_start,x_end,y_start,y_end"`.
impl FromStr for ProportionalBoundingBox {
    type Err = CollisionError;

    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(CollisionError::type_error(format!(
                "ProportionalBoundingBox: expected 4 comma-separated bounds, found {} in {s:?}",
                fields.len()
            )));
        }

        let mut bounds = [0.0; 4];
        for (bound, field) in bounds.iter_mut().zip(&fields) {
            *bound = field.parse::<f64>().map_err(|_| {
                CollisionError::type_error(format!(
                    "ProportionalBoundingBox: failed to read {field:?} as a number"
                ))
            })?;
        }

        Self::new(bounds[0], bounds[1], bounds[2], bounds[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(x0: f64, x1: f64, y0: f64, y1: f64) -> DimensionRanges {
        DimensionRanges::new(Span::new(x0, x1), Span::new(y0, y1))
    }

    #[test]
    fn valid_bounds_are_kept() {
        let pbb = ProportionalBoundingBox::new(0.25, 0.75, 0.0, 0.5).unwrap();
        assert_eq!(pbb.x_start(), 0.25);
        assert_eq!(pbb.x_end(), 0.75);
        assert_eq!(pbb.y_start(), 0.0);
        assert_eq!(pbb.y_end(), 0.5);
    }

    #[test]
    fn integer_bounds_are_converted() {
        let pbb = ProportionalBoundingBox::new(0, 1, 0, 1).unwrap();
        assert!(pbb.is_full());
    }

    #[test]
    fn reversed_x_bounds_are_swapped() {
        let pbb = ProportionalBoundingBox::new(1.0, 0.0, 0.0, 1.0).unwrap();
        assert_eq!((pbb.x_start(), pbb.x_end()), (0.0, 1.0));
    }

    #[test]
    fn reversed_bounds_on_both_axes_are_swapped() {
        let pbb = ProportionalBoundingBox::new(0.9, 0.1, 0.8, 0.2).unwrap();
        assert_eq!((pbb.x_start(), pbb.x_end()), (0.1, 0.9));
        assert_eq!((pbb.y_start(), pbb.y_end()), (0.2, 0.8));
    }

    #[test]
    fn equal_bounds_are_degenerate() {
        assert!(matches!(
            ProportionalBoundingBox::new(0.5, 0.5, 0.0, 1.0),
            Err(CollisionError::Degenerate(_))
        ));
        assert!(matches!(
            ProportionalBoundingBox::new(0.0, 1.0, 0.3, 0.3),
            Err(CollisionError::Degenerate(_))
        ));
    }

    #[test]
    fn out_of_range_bounds_are_rejected() {
        for bad in [
            ProportionalBoundingBox::new(-0.1, 1.0, 0.0, 1.0),
            ProportionalBoundingBox::new(0.0, 1.1, 0.0, 1.0),
            ProportionalBoundingBox::new(0.0, 1.0, 2.0, 1.0),
            ProportionalBoundingBox::new(0.0, 1.0, 0.0, 1.5),
        ] {
            assert!(matches!(bad, Err(CollisionError::Range(_))), "{bad:?}");
        }
    }

    #[test]
    fn non_real_bounds_are_type_errors() {
        assert!(matches!(
            ProportionalBoundingBox::new(f64::NAN, 1.0, 0.0, 1.0),
            Err(CollisionError::Type(_))
        ));
        assert!(matches!(
            ProportionalBoundingBox::new(0.0, 1.0, 0.0, f64::INFINITY),
            Err(CollisionError::Type(_))
        ));
    }

    #[test]
    fn single_bound_update_is_checked_against_its_pair() {
        let pbb = ProportionalBoundingBox::new(0.2, 0.6, 0.0, 1.0).unwrap();

        let moved = pbb.with_x_start(0.4).unwrap();
        assert_eq!((moved.x_start(), moved.x_end()), (0.4, 0.6));

        assert!(matches!(pbb.with_x_start(0.6), Err(CollisionError::Degenerate(_))));
        assert!(matches!(pbb.with_x_start(0.8), Err(CollisionError::Range(_))));
        assert!(matches!(pbb.with_x_end(0.1), Err(CollisionError::Range(_))));
        assert!(matches!(pbb.with_y_end(0.0), Err(CollisionError::Degenerate(_))));
        assert!(matches!(pbb.with_y_start(1.2), Err(CollisionError::Range(_))));

        // a rejected update leaves the box as it was
        assert_eq!(pbb, ProportionalBoundingBox::new(0.2, 0.6, 0.0, 1.0).unwrap());
    }

    #[test]
    fn pair_update_swaps_like_the_constructor() {
        let pbb = ProportionalBoundingBox::full().with_y_bounds(1.0, 0.5).unwrap();
        assert_eq!((pbb.y_start(), pbb.y_end()), (0.5, 1.0));
        assert_eq!((pbb.x_start(), pbb.x_end()), (0.0, 1.0));
        assert!(pbb.with_x_bounds(0.3, 0.3).is_err());
    }

    #[test]
    fn concrete_ranges_interpolate_within_owner() {
        let quarter = ProportionalBoundingBox::new(0.5, 1.0, 0.5, 1.0).unwrap();
        assert_eq!(
            quarter.to_concrete_ranges(&ranges(10.0, 20.0, 100.0, 140.0)),
            ranges(15.0, 20.0, 120.0, 140.0)
        );

        let full = ProportionalBoundingBox::full();
        let owner = ranges(-3.0, 7.0, 2.0, 4.0);
        assert_eq!(full.to_concrete_ranges(&owner), owner);
    }

    #[test]
    fn parses_and_displays_comma_form() {
        let pbb: ProportionalBoundingBox = "0.5, 1, 0.5, 1".parse().unwrap();
        assert_eq!(pbb, ProportionalBoundingBox::new(0.5, 1.0, 0.5, 1.0).unwrap());
        assert_eq!(pbb.to_string(), "0.5,1,0.5,1");

        assert!(matches!("a,1,0,1".parse::<ProportionalBoundingBox>(), Err(CollisionError::Type(_))));
        assert!(matches!("0,1,0".parse::<ProportionalBoundingBox>(), Err(CollisionError::Type(_))));
        assert!(matches!("0,1,0,0".parse::<ProportionalBoundingBox>(), Err(CollisionError::Degenerate(_))));
    }
}
