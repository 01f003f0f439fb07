//! Geometry primitives shared by layout and rendering.
//!
//! Units are `f64`. The reference renderer maps one unit to one terminal
//! cell, but nothing in layout depends on that.

use std::ops::{Add, Neg, Sub};

// =============================================================================
// Axis
// =============================================================================

/// Layout axis. A horizontal stack distributes along `Horizontal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The other axis.
    #[inline]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

// =============================================================================
// Point
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a point from main/cross offsets along `axis`.
    #[inline]
    pub fn along(axis: Axis, main: f64, cross: f64) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main, cross),
            Axis::Vertical => Self::new(cross, main),
        }
    }

    #[inline]
    pub fn get(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

// =============================================================================
// Size
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Build a size from main/cross extents along `axis`.
    #[inline]
    pub fn along(axis: Axis, main: f64, cross: f64) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main, cross),
            Axis::Vertical => Self::new(cross, main),
        }
    }

    /// Extent along `axis`.
    #[inline]
    pub fn get(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }

    /// Offset that centers `inner` inside `self`.
    #[inline]
    pub fn center_offset(self, inner: Size) -> Point {
        Point::new(
            (self.width - inner.width) / 2.0,
            (self.height - inner.height) / 2.0,
        )
    }
}

// =============================================================================
// Rect
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Rect at the origin covering `size`.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            size,
        }
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    #[inline]
    pub fn translate(self, offset: Point) -> Self {
        Self {
            origin: self.origin + offset,
            size: self.size,
        }
    }

    /// Rect shrunk by `amount` on every edge. Never goes negative.
    pub fn inset(self, amount: f64) -> Self {
        let width = (self.size.width - 2.0 * amount).max(0.0);
        let height = (self.size.height - 2.0 * amount).max(0.0);
        Self::new(self.origin.x + amount, self.origin.y + amount, width, height)
    }

    /// Smallest rect containing both.
    pub fn union(self, other: Rect) -> Self {
        let x0 = self.min_x().min(other.min_x());
        let y0 = self.min_y().min(other.min_y());
        let x1 = self.max_x().max(other.max_x());
        let y1 = self.max_y().max(other.max_y());
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x() && point.x < self.max_x() && point.y >= self.min_y() && point.y < self.max_y()
    }
}

// =============================================================================
// ProposedSize
// =============================================================================

/// Fallback extent for views with no natural size (shapes).
pub const DEFAULT_EXTENT: f64 = 10.0;

/// A size proposed top-down during measurement.
///
/// `None` means unconstrained along that dimension.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProposedSize {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl ProposedSize {
    /// Both dimensions unconstrained.
    pub const UNSPECIFIED: Self = Self {
        width: None,
        height: None,
    };

    pub const fn new(width: Option<f64>, height: Option<f64>) -> Self {
        Self { width, height }
    }

    /// A proposal of exactly `size`.
    pub const fn fixed(size: Size) -> Self {
        Self {
            width: Some(size.width),
            height: Some(size.height),
        }
    }

    /// Build a proposal from main/cross dimensions along `axis`.
    #[inline]
    pub fn along(axis: Axis, main: Option<f64>, cross: Option<f64>) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main, cross),
            Axis::Vertical => Self::new(cross, main),
        }
    }

    #[inline]
    pub fn get(self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Concrete size, substituting [`DEFAULT_EXTENT`] for absent dimensions.
    pub fn or_default(self) -> Size {
        Size::new(
            self.width.unwrap_or(DEFAULT_EXTENT),
            self.height.unwrap_or(DEFAULT_EXTENT),
        )
    }

    /// Concrete size, substituting the greatest finite value for absent dimensions.
    pub fn or_max(self) -> Size {
        Size::new(self.width.unwrap_or(f64::MAX), self.height.unwrap_or(f64::MAX))
    }
}

impl From<Size> for ProposedSize {
    fn from(size: Size) -> Self {
        Self::fixed(size)
    }
}

// =============================================================================
// Tests
// =============================================================================
