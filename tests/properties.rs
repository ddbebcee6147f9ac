//! Property-based invariant tests for the layout engine.
//!
//! 1. Auto-arrange is idempotent once every frame is taller than the row
//!    tolerance.
//! 2. A snap never moves the frame by the tolerance or more.
//! 3. Far from every target, a snap is the identity.
//! 4. Canvas rescaling preserves physical geometry.
//! 5. A plain click selects exactly the clicked frame's group.

use proptest::prelude::*;
use zenwall::{
    ArrangeTuning, CanvasSize, Frame, FrameId, FrameSize, GroupId, Point, Rect, Selection,
    SnapEngine, SnapKind, Size, pack,
};

const SCREEN: Size = Size::new(1000.0, 1000.0);
/// 12 px of 1000.
const TOLERANCE: f64 = 1.2;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Frames as (x, y, w, h) in centimeters on a 300×200 cm wall.
fn cm_frames(min_height: f64) -> impl Strategy<Value = Vec<(f64, f64, f64, f64)>> {
    proptest::collection::vec(
        (0.0..250.0f64, 0.0..150.0f64, 10.0..40.0f64, min_height..40.0f64),
        1..=8,
    )
}

fn build(canvas: &CanvasSize, specs: &[(f64, f64, f64, f64)]) -> Vec<Frame> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(x, y, w, h))| {
            Frame::custom(
                FrameId::new(format!("f{i}")),
                FrameSize::S20x20,
                canvas.to_percent(Rect::new(x, y, w, h)),
            )
        })
        .collect()
}

fn neighbors() -> impl Strategy<Value = Vec<Rect>> {
    proptest::collection::vec(
        (0.0..90.0f64, 0.0..90.0f64, 1.0..30.0f64, 1.0..30.0f64)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h)),
        0..6,
    )
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Arrange idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arrange_is_idempotent(specs in cm_frames(15.0)) {
        let canvas = CanvasSize::new(300.0, 200.0).unwrap();
        let tuning = ArrangeTuning::default();
        let once = pack(&build(&canvas, &specs), &canvas, &tuning);
        let twice = pack(&once, &canvas, &tuning);
        for (a, b) in once.iter().zip(&twice) {
            prop_assert!((a.rect.x - b.rect.x).abs() < 1e-6, "{:?} vs {:?}", a.rect, b.rect);
            prop_assert!((a.rect.y - b.rect.y).abs() < 1e-6, "{:?} vs {:?}", a.rect, b.rect);
        }
    }

    #[test]
    fn arrange_keeps_sizes_and_order(specs in cm_frames(5.0)) {
        let canvas = CanvasSize::new(300.0, 200.0).unwrap();
        let frames = build(&canvas, &specs);
        let out = pack(&frames, &canvas, &ArrangeTuning::default());
        prop_assert_eq!(out.len(), frames.len());
        for (a, b) in frames.iter().zip(&out) {
            prop_assert_eq!(&a.id, &b.id);
            prop_assert!((a.rect.width - b.rect.width).abs() < 1e-9);
            prop_assert!((a.rect.height - b.rect.height).abs() < 1e-9);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-3. Snap bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn snap_moves_less_than_tolerance(
        x in 0.0..90.0f64,
        y in 0.0..90.0f64,
        w in 1.0..30.0f64,
        h in 1.0..30.0f64,
        others in neighbors(),
    ) {
        let out = SnapEngine::default().snap(Size::new(w, h), Point::new(x, y), &others, SCREEN);
        prop_assert!((out.position.x - x).abs() < TOLERANCE);
        prop_assert!((out.position.y - y).abs() < TOLERANCE);
        if out.kind_x == SnapKind::Free {
            prop_assert_eq!(out.position.x, x);
        }
    }

    #[test]
    fn snap_far_from_targets_is_identity(
        x in 2.0..20.0f64,
        y in 2.0..20.0f64,
        w in 5.0..20.0f64,
        h in 5.0..20.0f64,
    ) {
        // Edges stay in 2..40: clear of the 0 and 50 canvas targets.
        let out = SnapEngine::default().snap(Size::new(w, h), Point::new(x, y), &[], SCREEN);
        prop_assert_eq!(out.position, Point::new(x, y));
        prop_assert_eq!(out.kind_x, SnapKind::Free);
        prop_assert_eq!(out.kind_y, SnapKind::Free);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Rescaling
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rescale_preserves_centimeters(
        (x, y, w, h) in (0.0..100.0f64, 0.0..100.0f64, 1.0..50.0f64, 1.0..50.0f64),
        (w0, h0) in (50.0..500.0f64, 50.0..500.0f64),
        (w1, h1) in (50.0..500.0f64, 50.0..500.0f64),
    ) {
        let old = CanvasSize::new(w0, h0).unwrap();
        let new = CanvasSize::new(w1, h1).unwrap();
        let rect = Rect::new(x, y, w, h);
        let before = old.to_cm(rect);
        let after = new.to_cm(old.rescale_to(&new, rect));
        prop_assert!((before.x - after.x).abs() < 1e-6);
        prop_assert!((before.y - after.y).abs() < 1e-6);
        prop_assert!((before.width - after.width).abs() < 1e-6);
        prop_assert!((before.height - after.height).abs() < 1e-6);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Group selection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn plain_click_selects_exactly_the_group(
        groups in proptest::collection::vec(proptest::option::of(0u8..3), 1..10),
        pick in any::<proptest::sample::Index>(),
    ) {
        let frames: Vec<Frame> = groups
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let mut f = Frame::custom(
                    FrameId::new(format!("f{i}")),
                    FrameSize::S20x20,
                    Rect::default(),
                );
                f.group = g.map(|g| GroupId::new(format!("group-{g}")));
                f
            })
            .collect();
        let clicked = &frames[pick.index(frames.len())];

        let mut selection: Selection = frames.iter().take(2).map(|f| f.id.clone()).collect();
        selection.toggle(&frames, &clicked.id, false);

        let expected: Vec<&FrameId> = match &clicked.group {
            Some(g) => frames
                .iter()
                .filter(|f| f.group.as_ref() == Some(g))
                .map(|f| &f.id)
                .collect(),
            None => vec![&clicked.id],
        };
        prop_assert_eq!(selection.len(), expected.len());
        for id in expected {
            prop_assert!(selection.contains(id));
        }
    }
}

// ── Configuration ───────────────────────────────────────────────────────

#[cfg(feature = "serde")]
mod config_json {
    use zenwall::{CanvasSize, EditorConfig, FrameSize, LayoutPreset};

    #[test]
    fn partial_override_keeps_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"snap": {"gap_px": 20.0}}"#).unwrap();
        assert_eq!(config.snap.gap_px, 20.0);
        assert_eq!(config.snap.threshold_px, 12.0);
        assert_eq!(config.arrange, EditorConfig::default().arrange);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_values_fail_validation() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"view": {"min_zoom": 3.0, "max_zoom": 2.0}}"#).unwrap();
        assert!(config.validate().is_err());
        assert!(zenwall::Editor::new(config).is_err());
    }

    #[test]
    fn canvas_rejects_non_positive() {
        let ok: CanvasSize =
            serde_json::from_str(r#"{"width_cm": 120.0, "height_cm": 90.0}"#).unwrap();
        assert_eq!(ok.width_cm(), 120.0);
        let zero = serde_json::from_str::<CanvasSize>(r#"{"width_cm": 0.0, "height_cm": 90.0}"#);
        assert!(zero.is_err());
    }

    #[test]
    fn preset_from_json() {
        let json = r#"{
            "id": "lira",
            "name": "Lira",
            "total_width_cm": 65.0,
            "total_height_cm": 55.0,
            "frames": [
                {"id": "lira-1", "size": "20x20cm", "x": 0.0, "y": 0.0, "width": 30.7, "height": 36.3},
                {"id": "lira-2", "size": "20x30cm", "x": 34.6, "y": 0.0, "width": 30.7, "height": 54.5}
            ]
        }"#;
        let preset: LayoutPreset = serde_json::from_str(json).unwrap();
        assert!(preset.description.is_empty());
        assert_eq!(preset.frames[1].size, FrameSize::S20x30);
        assert_eq!(preset.frames[1].rect.x, 34.6);
        assert!(preset.validate().is_ok());
    }
}

// ── Logging ─────────────────────────────────────────────────────────────

#[cfg(feature = "tracing")]
mod logging {
    use tracing_subscriber::EnvFilter;
    use zenwall::{Action, Editor, FrameId, Point, Size};

    #[test]
    fn editor_logs_under_subscriber() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("zenwall=trace"))
            .with_test_writer()
            .try_init();

        let mut e = Editor::default();
        e.dispatch(Action::SetLocked(false));
        e.dispatch(Action::BeginDrag {
            id: FrameId::from("missing"),
            pointer: Point::new(0.0, 0.0),
        });
        e.dispatch(Action::MoveDrag {
            pointer: Point::new(10.0, 10.0),
            container: Size::new(100.0, 100.0),
        });
        assert!(e.state().drag().is_none());
    }
}
