//! Stack distribution - splits a main-axis extent among children.
//!
//! The algorithm, for a stack proposed `main` along its axis:
//!
//! 1. Probe every child at `0` (its minimum) and at the greatest finite
//!    extent (its maximum). Flexibility is `max - min`.
//! 2. Sort by priority descending, then flexibility ascending. The sort is
//!    stable, so ties keep their declaration order.
//! 3. Withhold every child's minimum: `remaining = main - spacing - sum(min)`.
//! 4. For each priority group, give the group's minimums back, then resolve
//!    children one at a time: offer `remaining / unresolved`, measure, and
//!    charge the child's actual extent. A child that takes less than offered
//!    leaves the rest to its successors. `remaining` never goes below zero.
//!
//! The stack's size is the sum of the children's main extents (plus
//! spacing) by the largest cross extent.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::LayoutError;

use super::types::{Axis, ProposedSize, Size};

/// Per-child probe results for one distribution pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInfo {
    /// Position of the child in declaration order.
    pub index: usize,
    pub min: f64,
    pub max: f64,
    pub priority: f64,
}

impl LayoutInfo {
    #[inline]
    pub fn flexibility(&self) -> f64 {
        self.max - self.min
    }
}

/// Resolved child sizes (declaration order) and the stack's own size.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackLayout {
    pub sizes: Vec<Size>,
    pub size: Size,
}

/// Distribute `proposed` along `axis` among `children`.
///
/// Fails with [`LayoutError::UnconstrainedProposal`] when the proposal has
/// no main-axis extent.
pub fn distribute<C>(
    axis: Axis,
    spacing: f64,
    proposed: ProposedSize,
    children: &[C],
    mut measure: impl FnMut(&C, ProposedSize) -> Result<Size, LayoutError>,
    priority: impl Fn(&C) -> f64,
) -> Result<StackLayout, LayoutError> {
    let Some(main) = proposed.get(axis) else {
        return Err(LayoutError::UnconstrainedProposal { axis });
    };
    if children.is_empty() {
        return Ok(StackLayout::default());
    }

    let cross = proposed.get(axis.cross());
    let gaps = spacing * (children.len() - 1) as f64;

    let mut infos = Vec::with_capacity(children.len());
    for (index, child) in children.iter().enumerate() {
        let min = measure(child, ProposedSize::along(axis, Some(0.0), cross))?.get(axis);
        let max = measure(child, ProposedSize::along(axis, Some(f64::MAX), cross))?.get(axis);
        infos.push(LayoutInfo {
            index,
            min,
            // Non-monotonic children are treated as inflexible.
            max: max.max(min),
            priority: priority(child),
        });
    }
    infos.sort_by(|a, b| {
        b.priority
            .total_cmp(&a.priority)
            .then(a.flexibility().total_cmp(&b.flexibility()))
    });

    let mut remaining = main - gaps - infos.iter().map(|i| i.min).sum::<f64>();
    let mut sizes = vec![Size::ZERO; children.len()];

    for group in infos.chunk_by(|a, b| a.priority == b.priority) {
        remaining += group.iter().map(|i| i.min).sum::<f64>();

        for (resolved, info) in group.iter().enumerate() {
            let unresolved = (group.len() - resolved) as f64;
            let offer = (remaining / unresolved).max(0.0);
            let size = measure(&children[info.index], ProposedSize::along(axis, Some(offer), cross))?;
            remaining = (remaining - size.get(axis)).max(0.0);

            tracing::trace!(
                %axis,
                child = info.index,
                priority = info.priority,
                offer,
                taken = size.get(axis),
                remaining,
                "resolved stack child"
            );
            sizes[info.index] = size;
        }
    }

    let main_total = sizes.iter().map(|s| s.get(axis)).sum::<f64>() + gaps;
    let cross_total = sizes.iter().map(|s| s.get(axis.cross())).fold(0.0, f64::max);

    Ok(StackLayout {
        sizes,
        size: Size::along(axis, main_total, cross_total),
    })
}

// =============================================================================
// Cache
// =============================================================================

const CACHE_CAPACITY: usize = 8;

/// Recent distributions, keyed by proposal. Oldest entries are evicted first.
#[derive(Debug, Clone, Default)]
pub struct LayoutCache {
    entries: RefCell<VecDeque<(ProposedSize, StackLayout)>>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout computed for exactly `proposed`.
    pub fn for_proposal(&self, proposed: ProposedSize) -> Option<StackLayout> {
        self.entries
            .borrow()
            .iter()
            .find(|(p, _)| *p == proposed)
            .map(|(_, layout)| layout.clone())
    }

    /// Layout whose resulting size is `size`; used when rendering at a size
    /// that a measurement already produced.
    pub fn for_size(&self, size: Size) -> Option<StackLayout> {
        self.entries
            .borrow()
            .iter()
            .rev()
            .find(|(_, layout)| layout.size == size)
            .map(|(_, layout)| layout.clone())
    }

    pub fn insert(&self, proposed: ProposedSize, layout: StackLayout) {
        let mut entries = self.entries.borrow_mut();
        if entries.len() == CACHE_CAPACITY {
            entries.pop_front();
        }
        entries.push_back((proposed, layout));
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
