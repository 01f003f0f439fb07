//! Property tests over randomly built view trees.

use proptest::prelude::*;

use spark_views::layout::{ProposedSize, Size};
use spark_views::primitives::{Element, FrameBounds, Stack, View, ellipse, rectangle, text};
use spark_views::renderer::{GraphicsState, Recorder};
use spark_views::Rgba;

fn leaf() -> impl Strategy<Value = View> {
    prop_oneof![
        Just(rectangle()),
        Just(ellipse()),
        "[a-z ]{0,12}".prop_map(text),
        (1.0..20.0f64, 1.0..5.0f64).prop_map(|(w, h)| rectangle().frame(w, h)),
    ]
}

fn view() -> impl Strategy<Value = View> {
    leaf().prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            (inner.clone(), 0.0..30.0f64, 0.0..8.0f64).prop_map(|(v, w, h)| v.frame(w, h)),
            (inner.clone(), 0.0..10.0f64, 10.0..40.0f64)
                .prop_map(|(v, min, max)| v.flexible_frame(FrameBounds::width(min, max))),
            inner.clone().prop_map(|v| v.fill(Rgba::RED)),
            (inner.clone(), -2.0..2.0f64).prop_map(|(v, p)| v.priority(p)),
            inner.clone().prop_map(View::erased),
            (inner.clone(), inner.clone()).prop_map(|(base, top)| base.overlay(top)),
            (prop::collection::vec(inner.clone(), 0..4), 0.0..3.0f64)
                .prop_map(|(children, spacing)| Stack::horizontal(children).spacing(spacing).into()),
            (prop::collection::vec(inner, 0..4), 0.0..3.0f64)
                .prop_map(|(children, spacing)| Stack::vertical(children).spacing(spacing).into()),
        ]
    })
}

fn extent() -> impl Strategy<Value = Option<f64>> {
    prop::option::weighted(0.8, 0.0..200.0f64)
}

fn proposal() -> impl Strategy<Value = ProposedSize> {
    (extent(), extent()).prop_map(|(w, h)| ProposedSize::new(w, h))
}

proptest! {
    #[test]
    fn measure_is_deterministic(view in view(), proposed in proposal()) {
        let first = view.measure(proposed);
        let second = view.measure(proposed);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn fixed_frame_ignores_child_and_proposal(
        view in view(),
        proposed in proposal(),
        w in 0.0..100.0f64,
        h in 0.0..100.0f64,
    ) {
        prop_assert_eq!(view.frame(w, h).measure(proposed), Ok(Size::new(w, h)));
    }

    #[test]
    fn render_leaves_context_balanced(view in view(), w in 0.0..80.0f64, h in 0.0..24.0f64) {
        let proposed = ProposedSize::fixed(Size::new(w, h));
        let Ok(size) = view.measure(proposed) else {
            return Ok(());
        };

        let mut rec = Recorder::new();
        view.render(&mut rec, size).unwrap();
        prop_assert_eq!(rec.save_depth(), 0);
        prop_assert_eq!(rec.state(), GraphicsState::default());
    }
}
