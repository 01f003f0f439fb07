//! Stack primitive - children laid out in a row or column.
//!
//! Space along the main axis is distributed by [`distribute`]; along the
//! cross axis each child is placed so its alignment point lines up with
//! the stack's.

use crate::layout::{Axis, Guide, LayoutCache, Point, ProposedSize, Size, StackLayout, average, distribute};
use crate::renderer::{DrawingContext, scoped};

use super::types::{Element, LayoutResult, alignment_point};
use super::view::View;

#[derive(Debug, Clone)]
pub struct Stack {
    axis: Axis,
    alignment: Guide,
    spacing: f64,
    children: Vec<View>,
    cache: LayoutCache,
}

impl Stack {
    pub fn new(axis: Axis, children: impl IntoIterator<Item = View>) -> Self {
        Self {
            axis,
            alignment: Guide::center(axis.cross()),
            spacing: 0.0,
            children: children.into_iter().collect(),
            cache: LayoutCache::new(),
        }
    }

    /// Children side by side, left to right.
    pub fn horizontal(children: impl IntoIterator<Item = View>) -> Self {
        Self::new(Axis::Horizontal, children)
    }

    /// Children top to bottom.
    pub fn vertical(children: impl IntoIterator<Item = View>) -> Self {
        Self::new(Axis::Vertical, children)
    }

    /// Cross-axis guide children are aligned on.
    pub fn alignment(mut self, guide: Guide) -> Self {
        debug_assert_eq!(guide.axis(), self.axis.cross(), "stack alignment must be on the cross axis");
        self.alignment = guide;
        self
    }

    /// Gap between adjacent children.
    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self.cache = LayoutCache::new();
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn children(&self) -> &[View] {
        &self.children
    }

    fn layout(&self, proposed: ProposedSize) -> LayoutResult<StackLayout> {
        if let Some(layout) = self.cache.for_proposal(proposed) {
            return Ok(layout);
        }
        let layout = distribute(
            self.axis,
            self.spacing,
            proposed,
            &self.children,
            |child, proposal| child.measure(proposal),
            |child| child.layout_priority(),
        )?;
        self.cache.insert(proposed, layout.clone());
        Ok(layout)
    }

    /// Layout for rendering at `size`: a measurement that produced `size`,
    /// else one proposed `size`, else a fresh pass.
    fn layout_at(&self, size: Size) -> LayoutResult<StackLayout> {
        match self.cache.for_size(size) {
            Some(layout) => Ok(layout),
            None => self.layout(ProposedSize::fixed(size)),
        }
    }

    /// Each child with its size and origin when the stack is `size`.
    ///
    /// Along the cross axis the child's alignment point is put on the
    /// stack's, which is always the guide's default.
    fn placements(&self, size: Size) -> LayoutResult<Vec<(&View, Size, Point)>> {
        let layout = self.layout_at(size)?;
        let stack_anchor = self.alignment.default_value(size);

        let mut placed = Vec::with_capacity(self.children.len());
        let mut main = 0.0;
        for (child, &child_size) in self.children.iter().zip(&layout.sizes) {
            let child_anchor = alignment_point(child, self.alignment, child_size)?;
            placed.push((child, child_size, Point::along(self.axis, main, stack_anchor - child_anchor)));
            main += child_size.get(self.axis) + self.spacing;
        }
        Ok(placed)
    }
}

impl Element for Stack {
    fn measure(&self, proposed: ProposedSize) -> LayoutResult<Size> {
        Ok(self.layout(proposed)?.size)
    }

    fn render(&self, cx: &mut dyn DrawingContext, size: Size) -> LayoutResult<()> {
        for (child, child_size, origin) in self.placements(size)? {
            scoped(cx, |cx| {
                cx.translate(origin.x, origin.y);
                child.render(cx, child_size)
            })?;
        }
        Ok(())
    }

    /// Built-in guides are positional and answered by the caller. Custom
    /// guides average the positions of every child that overrides them,
    /// on either axis.
    fn custom_alignment(&self, guide: Guide, size: Size) -> LayoutResult<Option<f64>> {
        if guide.is_builtin() {
            return Ok(None);
        }

        let mut positions = Vec::new();
        for (child, child_size, origin) in self.placements(size)? {
            if let Some(value) = child.custom_alignment(guide, child_size)? {
                positions.push(origin.get(guide.axis()) + value);
            }
        }
        Ok(average(&positions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use crate::layout::{AlignmentId, Rect};
    use crate::primitives::{FrameBounds, hstack, rectangle, text, vstack};
    use crate::renderer::Recorder;
    use crate::types::Rgba;

    fn quarter(size: Size) -> f64 {
        size.width / 4.0
    }

    static QUARTER: AlignmentId = AlignmentId::custom("quarter", Axis::Horizontal, quarter);
    static OTHER: AlignmentId = AlignmentId::custom("other", Axis::Horizontal, quarter);

    fn flexible(min: f64, max: f64) -> View {
        rectangle().flexible_frame(FrameBounds::width(min, max))
    }

    #[test]
    fn test_min_max_distribution() {
        let stack = Stack::horizontal([flexible(50.0, 50.0), flexible(50.0, 150.0)]);
        let size = stack.measure(ProposedSize::new(Some(150.0), Some(10.0))).unwrap();
        assert_eq!(size, Size::new(150.0, 10.0));

        let mut rec = Recorder::new();
        stack.render(&mut rec, size).unwrap();
        let rects: Vec<Rect> = rec.fills().into_iter().map(|(r, _)| r).collect();
        assert_eq!(
            rects,
            vec![Rect::new(0.0, 0.0, 50.0, 10.0), Rect::new(50.0, 0.0, 100.0, 10.0)]
        );
    }

    #[test]
    fn test_custom_guide_averages_overrides() {
        let stack = hstack([
            rectangle().frame(100.0, 10.0),
            rectangle()
                .frame(50.0, 10.0)
                .alignment_guide(Guide::custom(&QUARTER), |_| 25.0),
        ]);
        let size = stack.measure(ProposedSize::new(Some(150.0), Some(10.0))).unwrap();
        assert_eq!(size.width, 150.0);
        assert_eq!(stack.custom_alignment(Guide::custom(&QUARTER), size).unwrap(), Some(125.0));

        // A different guide with the same default is not the same guide.
        assert_eq!(stack.custom_alignment(Guide::custom(&OTHER), size).unwrap(), None);
    }

    #[test]
    fn test_custom_guide_average_of_two() {
        let stack = hstack([
            rectangle().frame(10.0, 1.0).alignment_guide(Guide::custom(&QUARTER), |_| 0.0),
            rectangle().frame(10.0, 1.0).alignment_guide(Guide::custom(&QUARTER), |_| 10.0),
        ]);
        let size = stack.measure(ProposedSize::new(Some(20.0), Some(1.0))).unwrap();
        // positions 0 and 20
        assert_eq!(stack.custom_alignment(Guide::custom(&QUARTER), size).unwrap(), Some(10.0));
    }

    #[test]
    fn test_builtin_guides_are_not_answered() {
        let stack = hstack([rectangle().alignment_guide(Guide::leading(), |_| 3.0)]);
        let size = Size::new(10.0, 10.0);
        assert_eq!(stack.custom_alignment(Guide::leading(), size).unwrap(), None);
    }

    #[test]
    fn test_cross_axis_alignment() {
        let stack = Stack::horizontal([rectangle().frame(2.0, 4.0), rectangle().frame(2.0, 2.0)])
            .alignment(Guide::bottom());
        let size = stack.measure(ProposedSize::new(Some(4.0), Some(4.0))).unwrap();
        assert_eq!(size, Size::new(4.0, 4.0));

        let mut rec = Recorder::new();
        stack.render(&mut rec, size).unwrap();
        assert_eq!(rec.fills()[1].0, Rect::new(2.0, 2.0, 2.0, 2.0));
    }

    #[test]
    fn test_builtin_override_does_not_move_child() {
        let stack = hstack([
            rectangle().frame(2.0, 2.0).alignment_guide(Guide::center_y(), |_| 0.0),
            rectangle().frame(2.0, 4.0),
        ]);
        let mut rec = Recorder::new();
        stack.render(&mut rec, Size::new(4.0, 4.0)).unwrap();
        assert_eq!(rec.fills()[0].0, Rect::new(0.0, 1.0, 2.0, 2.0));
    }

    #[test]
    fn test_custom_guide_through_cross_axis_stack() {
        let column = vstack([
            rectangle().frame(8.0, 1.0),
            rectangle().frame(4.0, 1.0).alignment_guide(Guide::custom(&QUARTER), |_| 1.0),
        ]);
        // Centered in the column: 2 + 1
        let size = column.measure(ProposedSize::new(Some(8.0), Some(2.0))).unwrap();
        assert_eq!(column.custom_alignment(Guide::custom(&QUARTER), size).unwrap(), Some(3.0));

        let row = hstack([
            rectangle().frame(10.0, 1.0),
            vstack([rectangle().frame(4.0, 1.0).alignment_guide(Guide::custom(&QUARTER), |_| 1.0)]),
        ]);
        let size = row.measure(ProposedSize::new(Some(14.0), Some(1.0))).unwrap();
        assert_eq!(size, Size::new(14.0, 1.0));
        assert_eq!(row.custom_alignment(Guide::custom(&QUARTER), size).unwrap(), Some(11.0));
    }

    #[test]
    fn test_center_alignment_is_default() {
        let stack = hstack([rectangle().frame(2.0, 4.0), rectangle().frame(2.0, 2.0)]);
        let mut rec = Recorder::new();
        stack.render(&mut rec, Size::new(4.0, 4.0)).unwrap();
        assert_eq!(rec.fills()[1].0, Rect::new(2.0, 1.0, 2.0, 2.0));
        assert_eq!(rec.save_depth(), 0);
    }

    #[test]
    fn test_vertical_stack_with_spacing() {
        let stack: View = Stack::vertical([text("ab"), text("cd")]).spacing(1.0).into();
        let size = stack.measure(ProposedSize::new(Some(10.0), Some(10.0))).unwrap();
        assert_eq!(size, Size::new(2.0, 3.0));

        let mut rec = Recorder::new();
        stack.render(&mut rec, size).unwrap();
        assert_eq!(
            rec.texts(),
            vec![(Point::new(0.0, 0.0), "ab"), (Point::new(0.0, 2.0), "cd")]
        );
    }

    #[test]
    fn test_nested_stacks() {
        let view = vstack([
            hstack([rectangle().fill(Rgba::RED), rectangle().fill(Rgba::BLUE)]),
            rectangle().frame(4.0, 1.0),
        ]);
        let size = view.measure(ProposedSize::new(Some(8.0), Some(5.0))).unwrap();
        assert_eq!(size, Size::new(8.0, 5.0));
    }

    #[test]
    fn test_unconstrained_main_axis_fails() {
        let err = hstack([rectangle()]).measure(ProposedSize::UNSPECIFIED).unwrap_err();
        assert_eq!(err, LayoutError::UnconstrainedProposal { axis: Axis::Horizontal });
    }

    #[test]
    fn test_empty_stack() {
        let size = hstack([]).measure(ProposedSize::new(Some(50.0), None)).unwrap();
        assert_eq!(size, Size::ZERO);
    }

    #[test]
    fn test_measure_is_idempotent() {
        let stack = hstack([text("hello world"), flexible(3.0, 30.0), rectangle()]);
        let proposal = ProposedSize::new(Some(25.0), Some(4.0));
        let first = stack.measure(proposal).unwrap();
        for _ in 0..20 {
            assert_eq!(stack.measure(proposal).unwrap(), first);
        }
    }
}
