#![cfg(not(target_arch = "wasm32"))]

mod common;

use common::{ManualClock, RecordingView, Write};
use motion_wasm::cursor::{CursorOverlay, CursorPhase};
use motion_wasm::magnetic::MagneticController;
use motion_wasm::scene::CursorLayers;
use motion_wasm::tilt::{self, TiltController};
use motion_wasm::{ElementId, FrameDriven, Rect, Transform, ViewFlag};
use proptest::prelude::*;

const BUTTON: ElementId = ElementId(0);
const RING: ElementId = ElementId(10);
const DOT: ElementId = ElementId(11);

fn button_view() -> RecordingView {
    RecordingView::new(1280.0, 720.0).with_rect(BUTTON, Rect::new(100.0, 100.0, 160.0, 48.0))
}

fn magnetic(reduced_motion: bool, view: &mut RecordingView) -> MagneticController {
    let mut m = MagneticController::new([BUTTON], 18.0, reduced_motion);
    m.activate(view);
    view.writes.clear();
    m
}

fn cursor(view: &mut RecordingView) -> CursorOverlay {
    let mut c = CursorOverlay::new(CursorLayers { ring: RING, dot: DOT });
    c.activate(view);
    c
}

fn magnitude(t: Transform) -> f64 {
    match t {
        Transform::Translate { x, y } => (x * x + y * y).sqrt(),
        other => panic!("unexpected transform {other:?}"),
    }
}

#[test]
fn magnetic_moves_toward_pointer() {
    let mut view = button_view();
    let mut clock = ManualClock::default();
    let mut m = magnetic(false, &mut view);

    // right edge of the button, vertically centred
    m.on_pointer_move(0, 260.0, 124.0, &view, &mut clock);
    assert!(view.writes.is_empty(), "writes wait for the frame");
    clock.fire(16.0, &mut m, &mut view);

    match view.last_transform(BUTTON) {
        Some(Transform::Translate { x, y }) => {
            // dx = 80, strength 0.8, 80 / 160 * 18 * 0.8
            assert!((x - 7.2).abs() < 1e-9);
            assert_eq!(y, 0.0);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn magnetic_glides_back_through_a_frame() {
    let mut view = button_view();
    let mut clock = ManualClock::default();
    let mut m = magnetic(false, &mut view);
    m.on_pointer_move(0, 250.0, 140.0, &view, &mut clock);
    clock.fire(16.0, &mut m, &mut view);
    view.writes.clear();

    m.on_pointer_leave(0, &mut clock);
    assert!(view.writes.is_empty());
    assert_eq!(clock.pending(), 1);
    clock.fire(32.0, &mut m, &mut view);
    assert_eq!(view.transforms(BUTTON), vec![Transform::REST]);
    assert_eq!(m.targets()[0].offset, (0.0, 0.0));
}

#[test]
fn magnetic_burst_is_one_write() {
    let mut view = button_view();
    let mut clock = ManualClock::default();
    let mut m = magnetic(false, &mut view);
    for i in 0..300 {
        m.on_pointer_move(0, 100.0 + (i % 160) as f64, 110.0, &view, &mut clock);
    }
    assert_eq!(clock.requested, 1);
    clock.fire(16.0, &mut m, &mut view);
    assert_eq!(view.transforms(BUTTON).len(), 1);
}

#[test]
fn magnetic_teardown_resets_element() {
    let mut view = button_view();
    let mut clock = ManualClock::default();
    let mut m = magnetic(false, &mut view);
    m.on_pointer_move(0, 110.0, 110.0, &view, &mut clock);

    m.deactivate(&mut clock, &mut view);
    assert_eq!(clock.cancelled, 1);
    assert!(view.writes.contains(&Write::WillChange(BUTTON, false)));
    assert_eq!(view.last_transform(BUTTON), Some(Transform::REST));

    view.writes.clear();
    m.on_pointer_move(0, 200.0, 120.0, &view, &mut clock);
    m.on_pointer_leave(0, &mut clock);
    m.on_frame(48.0, &mut clock, &mut view);
    assert!(view.writes.is_empty());
    assert_eq!(clock.pending(), 0);
}

#[test]
fn cursor_coalesces_pointer_storm() {
    let mut view = RecordingView::new(1280.0, 720.0);
    let mut clock = ManualClock::default();
    let mut c = cursor(&mut view);

    for i in 0..500 {
        c.on_pointer_move(i as f64, (i * 2) as f64, &mut clock);
    }
    assert_eq!(clock.requested, 1);
    clock.fire(16.0, &mut c, &mut view);

    let last = Transform::Anchored { x: 499.0, y: 998.0 };
    assert_eq!(view.transforms(RING), vec![last]);
    assert_eq!(view.transforms(DOT), vec![last]);
}

#[test]
fn cursor_hidden_until_first_move() {
    let mut view = RecordingView::new(1280.0, 720.0);
    let mut clock = ManualClock::default();
    let mut c = cursor(&mut view);
    assert_eq!(view.writes, vec![Write::NativeCursor(true)]);
    view.writes.clear();

    c.on_hover_change(true, true, &mut clock);
    clock.fire(16.0, &mut c, &mut view);
    assert_eq!(c.phase(), CursorPhase::Hidden);
    assert!(view.writes.is_empty());

    c.on_pointer_move(40.0, 50.0, &mut clock);
    clock.fire(32.0, &mut c, &mut view);
    assert_eq!(c.phase(), CursorPhase::Hovering);
    assert!(view.has_flag(RING, ViewFlag::CursorVisible));
    assert!(view.has_flag(DOT, ViewFlag::Hovering));

    // visibility is written once
    c.on_pointer_move(41.0, 50.0, &mut clock);
    clock.fire(48.0, &mut c, &mut view);
    assert_eq!(view.flag_writes(RING, ViewFlag::CursorVisible), vec![true]);
    assert!(c.state().visible);
}

#[test]
fn cursor_ignores_unmatched_targets() {
    let mut view = RecordingView::new(1280.0, 720.0);
    let mut clock = ManualClock::default();
    let mut c = cursor(&mut view);
    c.on_pointer_move(1.0, 1.0, &mut clock);
    clock.fire(16.0, &mut c, &mut view);

    c.on_hover_change(false, true, &mut clock);
    assert_eq!(clock.pending(), 0);
    assert_eq!(c.phase(), CursorPhase::Idle);

    c.on_hover_change(true, true, &mut clock);
    clock.fire(32.0, &mut c, &mut view);
    c.on_hover_change(true, false, &mut clock);
    clock.fire(48.0, &mut c, &mut view);
    assert_eq!(view.flag_writes(RING, ViewFlag::Hovering), vec![true, false]);
    assert_eq!(c.phase(), CursorPhase::Idle);
}

#[test]
fn cursor_teardown_restores_native_cursor() {
    let mut view = RecordingView::new(1280.0, 720.0);
    let mut clock = ManualClock::default();
    let mut c = cursor(&mut view);
    c.on_pointer_move(5.0, 5.0, &mut clock);

    c.deactivate(&mut clock, &mut view);
    assert_eq!(clock.cancelled, 1);
    assert_eq!(view.writes.last(), Some(&Write::NativeCursor(false)));

    view.writes.clear();
    for i in 0..20 {
        c.on_pointer_move(i as f64, 0.0, &mut clock);
        c.on_hover_change(true, i % 2 == 0, &mut clock);
    }
    c.on_frame(64.0, &mut clock, &mut view);
    assert!(view.writes.is_empty());
    assert_eq!(clock.pending(), 0);
}

#[test]
fn tilt_follows_pointer_and_rests_on_leave() {
    let mut view = button_view();
    let mut clock = ManualClock::default();
    let mut t = TiltController::new([BUTTON], false);
    t.activate();

    t.on_pointer_move(0, 180.0, 148.0, &view, &mut clock);
    clock.fire(16.0, &mut t, &mut view);
    assert_eq!(view.last_transform(BUTTON), t.pose(0));
    assert_eq!(
        view.last_transform(BUTTON),
        Some(Transform::Tilt {
            rotate_x: 7.5,
            rotate_y: 0.0,
            scale: tilt::HOVER_SCALE
        })
    );

    t.on_pointer_leave(0, &mut clock);
    clock.fire(32.0, &mut t, &mut view);
    assert_eq!(view.last_transform(BUTTON), Some(tilt::REST));
}

#[test]
fn tilt_off_under_reduced_motion() {
    let mut view = button_view();
    let mut clock = ManualClock::default();
    let mut t = TiltController::new([BUTTON], true);
    t.activate();
    t.on_pointer_move(0, 180.0, 148.0, &view, &mut clock);
    assert!(!clock.fire(16.0, &mut t, &mut view));
    assert!(view.writes.is_empty());
    assert_eq!(t.pose(0), Some(tilt::REST));
    assert_eq!(t.pose(1), None);
}

proptest! {
    #[test]
    fn magnetic_never_exceeds_cap(
        px in -500.0f64..1500.0,
        py in -500.0f64..1500.0,
        w in 1.0f64..400.0,
        h in 1.0f64..400.0,
        max in 18.0f64..=20.0,
    ) {
        let mut view = RecordingView::new(1280.0, 720.0).with_rect(BUTTON, Rect::new(200.0, 200.0, w, h));
        let mut clock = ManualClock::default();
        let mut m = MagneticController::new([BUTTON], max, false);
        m.activate(&mut view);
        m.on_pointer_move(0, px, py, &view, &mut clock);
        clock.fire(16.0, &mut m, &mut view);
        let t = view.last_transform(BUTTON).unwrap();
        prop_assert!(magnitude(t) <= max + 1e-9);
    }

    #[test]
    fn magnetic_inert_under_reduced_motion(
        moves in prop::collection::vec((0.0f64..1280.0, 0.0f64..720.0, any::<bool>()), 1..50),
    ) {
        let mut view = button_view();
        let mut clock = ManualClock::default();
        let mut m = magnetic(true, &mut view);
        for (i, (x, y, leave)) in moves.into_iter().enumerate() {
            if leave {
                m.on_pointer_leave(0, &mut clock);
            } else {
                m.on_pointer_move(0, x, y, &view, &mut clock);
            }
            clock.fire(i as f64 * 16.0, &mut m, &mut view);
        }
        m.deactivate(&mut clock, &mut view);
        prop_assert!(view.transforms(BUTTON).iter().all(|t| magnitude(*t) == 0.0));
    }
}
