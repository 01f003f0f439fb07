//! Alignment guides.
//!
//! A guide is a named function from a size to an offset along one axis.
//! Guides compare by identity: each guide is backed by one `'static`
//! [`AlignmentId`], and two guides are equal only if they point at the same
//! one. Two ids with the same default function are still different guides.
//!
//! Built-in guides (leading/center/trailing, top/center/bottom) are purely
//! positional. Custom guides additionally pick up overrides from the views
//! they are applied to, which stacks average across their children.
//!
//! ```
//! use spark_views::layout::{AlignmentId, Axis, Guide, Size};
//!
//! fn quarter(size: Size) -> f64 {
//!     size.width / 4.0
//! }
//!
//! static QUARTER: AlignmentId = AlignmentId::custom("quarter", Axis::Horizontal, quarter);
//!
//! let guide = Guide::custom(&QUARTER);
//! assert_eq!(guide.default_value(Size::new(100.0, 10.0)), 25.0);
//! assert!(!guide.is_builtin());
//! assert_ne!(guide, Guide::leading());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use super::types::{Axis, Size};

/// Identity and default value of an alignment guide.
///
/// Declare custom ids as `static` items so every call site shares the same
/// address.
pub struct AlignmentId {
    name: &'static str,
    axis: Axis,
    default: fn(Size) -> f64,
    builtin: bool,
}

impl AlignmentId {
    /// A custom guide along `axis` with the given default value.
    pub const fn custom(name: &'static str, axis: Axis, default: fn(Size) -> f64) -> Self {
        Self {
            name,
            axis,
            default,
            builtin: false,
        }
    }

    const fn builtin(name: &'static str, axis: Axis, default: fn(Size) -> f64) -> Self {
        Self {
            name,
            axis,
            default,
            builtin: true,
        }
    }
}

// =============================================================================
// Built-in guides
// =============================================================================

static LEADING: AlignmentId = AlignmentId::builtin("leading", Axis::Horizontal, |_| 0.0);
static H_CENTER: AlignmentId =
    AlignmentId::builtin("center", Axis::Horizontal, |s| s.width / 2.0);
static TRAILING: AlignmentId = AlignmentId::builtin("trailing", Axis::Horizontal, |s| s.width);

static TOP: AlignmentId = AlignmentId::builtin("top", Axis::Vertical, |_| 0.0);
static V_CENTER: AlignmentId = AlignmentId::builtin("center", Axis::Vertical, |s| s.height / 2.0);
static BOTTOM: AlignmentId = AlignmentId::builtin("bottom", Axis::Vertical, |s| s.height);

// =============================================================================
// Guide
// =============================================================================

/// Handle to an alignment guide, compared by identity.
#[derive(Clone, Copy)]
pub struct Guide(&'static AlignmentId);

impl Guide {
    /// Guide backed by a user-declared id.
    pub const fn custom(id: &'static AlignmentId) -> Self {
        Self(id)
    }

    pub fn leading() -> Self {
        Self(&LEADING)
    }

    /// Horizontal center.
    pub fn center_x() -> Self {
        Self(&H_CENTER)
    }

    pub fn trailing() -> Self {
        Self(&TRAILING)
    }

    pub fn top() -> Self {
        Self(&TOP)
    }

    /// Vertical center.
    pub fn center_y() -> Self {
        Self(&V_CENTER)
    }

    pub fn bottom() -> Self {
        Self(&BOTTOM)
    }

    /// Center guide for `axis`.
    pub fn center(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::center_x(),
            Axis::Vertical => Self::center_y(),
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.0.name
    }

    /// Axis the guide's offset is measured along.
    #[inline]
    pub fn axis(self) -> Axis {
        self.0.axis
    }

    #[inline]
    pub fn is_builtin(self) -> bool {
        self.0.builtin
    }

    /// The guide's value for a view of `size` with no override.
    #[inline]
    pub fn default_value(self, size: Size) -> f64 {
        (self.0.default)(size)
    }

    fn addr(self) -> usize {
        self.0 as *const AlignmentId as usize
    }
}

impl PartialEq for Guide {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for Guide {}

impl Hash for Guide {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for Guide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guide({} {})", self.0.axis, self.0.name)
    }
}

// =============================================================================
// Alignment
// =============================================================================

/// A pair of guides, one per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alignment {
    pub horizontal: Guide,
    pub vertical: Guide,
}

impl Alignment {
    pub fn new(horizontal: Guide, vertical: Guide) -> Self {
        debug_assert_eq!(horizontal.axis(), Axis::Horizontal, "horizontal guide on the wrong axis");
        debug_assert_eq!(vertical.axis(), Axis::Vertical, "vertical guide on the wrong axis");
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn center() -> Self {
        Self::new(Guide::center_x(), Guide::center_y())
    }

    pub fn top_leading() -> Self {
        Self::new(Guide::leading(), Guide::top())
    }

    pub fn bottom_trailing() -> Self {
        Self::new(Guide::trailing(), Guide::bottom())
    }

    /// Guide used along `axis`.
    #[inline]
    pub fn guide(&self, axis: Axis) -> Guide {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::center()
    }
}

/// Mean of `values`, or `None` when empty.
pub(crate) fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero(_: Size) -> f64 {
        0.0
    }

    static FIRST: AlignmentId = AlignmentId::custom("first", Axis::Horizontal, zero);
    static SECOND: AlignmentId = AlignmentId::custom("second", Axis::Horizontal, zero);

    #[test]
    fn test_builtin_defaults() {
        let size = Size::new(80.0, 20.0);
        assert_eq!(Guide::leading().default_value(size), 0.0);
        assert_eq!(Guide::center_x().default_value(size), 40.0);
        assert_eq!(Guide::trailing().default_value(size), 80.0);
        assert_eq!(Guide::top().default_value(size), 0.0);
        assert_eq!(Guide::center_y().default_value(size), 10.0);
        assert_eq!(Guide::bottom().default_value(size), 20.0);
        assert!(Guide::center_y().is_builtin());
    }

    #[test]
    fn test_identity_not_value() {
        let a = Guide::custom(&FIRST);
        let b = Guide::custom(&SECOND);
        assert_eq!(a.default_value(Size::ZERO), b.default_value(Size::ZERO));
        assert_ne!(a, b);
        assert_eq!(a, Guide::custom(&FIRST));
        assert_ne!(Guide::leading(), a);
    }

    #[test]
    fn test_centers_are_distinct_per_axis() {
        assert_ne!(Guide::center_x(), Guide::center_y());
        assert_eq!(Guide::center(Axis::Vertical), Guide::center_y());
        assert_eq!(Alignment::default(), Alignment::center());
    }

    #[test]
    fn test_hash_follows_identity() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Guide::custom(&FIRST));
        set.insert(Guide::custom(&FIRST));
        set.insert(Guide::custom(&SECOND));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(&[]), None);
        assert_eq!(average(&[10.0, 20.0]), Some(15.0));
    }
}
