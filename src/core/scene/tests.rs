use super::*;
use crate::core::viewport::{ModifierKey, Viewport};
use crate::render::Rgba;
use approx::assert_relative_eq;
use glam::Vec2;

/// Zeichenfläche, die alle Primitiv-Aufrufe in Reihenfolge aufzeichnet.
struct RecordingSurface {
    size: Vec2,
    calls: Vec<DrawCall>,
}

#[derive(Debug, Clone, PartialEq)]
enum DrawCall {
    Clear(Rgba),
    Line { a: Vec2, b: Vec2 },
    Ellipse { center: Vec2, filled: bool },
    CubicBezier { c1: Vec2, c2: Vec2 },
}

impl RecordingSurface {
    fn new() -> Self {
        Self {
            size: Vec2::new(1000.0, 800.0),
            calls: Vec::new(),
        }
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, color: Rgba) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn line(&mut self, a: Vec2, b: Vec2, _paint: &Paint) {
        self.calls.push(DrawCall::Line { a, b });
    }

    fn ellipse(&mut self, center: Vec2, _radius: Vec2, paint: &Paint) {
        self.calls.push(DrawCall::Ellipse {
            center,
            filled: paint.fill.is_some(),
        });
    }

    fn cubic_bezier(&mut self, _p0: Vec2, c1: Vec2, c2: Vec2, _p3: Vec2, _paint: &Paint) {
        self.calls.push(DrawCall::CubicBezier { c1, c2 });
    }
}

/// Identitäts-Viewport: Kurvenraum == Pixelraum.
fn identity_view() -> ViewContext {
    ViewContext {
        viewport: Viewport::new(Vec2::ZERO, 1.0),
        modifiers: ModifierSet::default(),
    }
}

fn spec(left: (f32, f32), anchor: (f32, f32), right: (f32, f32)) -> KeyframeSpec {
    KeyframeSpec::new(
        Vec2::new(left.0, left.1),
        Vec2::new(anchor.0, anchor.1),
        Vec2::new(right.0, right.1),
    )
}

fn three_keyframes() -> Vec<KeyframeSpec> {
    vec![
        spec((-3.3, -2.0), (1.0, 0.0), (5.3, 0.0)),
        spec((7.7, 2.0), (12.0, 0.0), (16.7, 0.0)),
        spec((19.3, -2.0), (24.0, 0.0), (28.7, 0.0)),
    ]
}

fn keyframe_parts(scene: &Scene, kf: NodeId) -> (Vec2, KeyframeRole, NodeId, NodeId) {
    let NodeKind::Keyframe {
        pos,
        role,
        left,
        right,
    } = scene.node(kf).kind
    else {
        panic!("Keyframe erwartet");
    };
    (pos, role, left, right)
}

// ── Traversierung und Z-Ordnung ─────────────────────────────────

#[test]
fn test_flat_order_is_bfs_within_equal_z() {
    let mut scene = Scene::new();
    let curve = scene
        .add_curve(&[spec((-1.0, 0.0), (0.0, 0.0), (1.0, 0.0)), spec((9.0, 0.0), (10.0, 0.0), (11.0, 0.0))])
        .expect("Kurve erwartet");

    let kfs = scene.node(curve).children.clone();
    let (_, _, _, r1) = keyframe_parts(&scene, kfs[0]);
    let (_, _, l2, _) = keyframe_parts(&scene, kfs[1]);

    // BFS: Keyframes vor ihren Handles, Kurve (z=3) ganz hinten
    assert_eq!(scene.order(), &[kfs[0], kfs[1], r1, l2, curve]);
}

#[test]
fn test_roots_keep_insertion_order_within_equal_z() {
    let mut scene = Scene::new();
    let grid = scene.add_grid();
    let p1 = scene.add_point(Vec2::new(0.0, 0.0));
    let p2 = scene.add_point(Vec2::new(50.0, 0.0));

    // Punkte (z=4) vor dem Grid (z=1), untereinander in Einfüge-Reihenfolge
    assert_eq!(scene.order(), &[p1, p2, grid]);
}

#[test]
fn test_relayout_is_idempotent() {
    let mut scene = Scene::new();
    scene.add_grid();
    scene.add_cursor();
    scene.add_curve(&three_keyframes()).expect("Kurve erwartet");

    scene.relayout();
    let first = scene.order().to_vec();
    scene.relayout();
    assert_eq!(scene.order(), &first[..]);
}

// ── Hit-Dispatch ────────────────────────────────────────────────

#[test]
fn test_press_prefers_higher_z_over_grid() {
    let mut scene = Scene::new();
    let grid = scene.add_grid();
    let point = scene.add_point(Vec2::new(100.0, 100.0));

    let view = identity_view();
    let options = EditorOptions::default();
    assert!(scene.handle_press(&view, &options, Vec2::new(102.0, 101.0)));

    assert!(scene.node(point).selected);
    assert!(!scene.node(grid).selected);
}

#[test]
fn test_press_has_exactly_one_winner() {
    let mut scene = Scene::new();
    let p1 = scene.add_point(Vec2::new(10.0, 10.0));
    let p2 = scene.add_point(Vec2::new(12.0, 10.0));

    let view = identity_view();
    let options = EditorOptions::default();
    // Beide Hit-Regionen überlappen; der erste der flachen Liste gewinnt
    assert!(scene.handle_press(&view, &options, Vec2::new(11.0, 10.0)));

    assert!(scene.node(p1).selected);
    assert!(!scene.node(p2).selected);
}

#[test]
fn test_press_without_hit_reports_none() {
    let mut scene = Scene::new();
    scene.add_point(Vec2::new(0.0, 0.0));

    let view = identity_view();
    let options = EditorOptions::default();
    assert!(!scene.handle_press(&view, &options, Vec2::new(500.0, 500.0)));
    assert!(scene.order().iter().all(|&id| !scene.node(id).selected));
}

#[test]
fn test_grid_is_catch_all_without_hand_cursor() {
    let mut scene = Scene::new();
    let grid = scene.add_grid();

    let view = identity_view();
    let options = EditorOptions::default();
    assert!(scene.handle_press(&view, &options, Vec2::new(777.0, 13.0)));
    assert!(scene.node(grid).selected);
    assert!(!scene.handle_move(&view, &options, Vec2::new(777.0, 13.0)));
}

#[test]
fn test_move_reports_hand_cursor_over_point() {
    let mut scene = Scene::new();
    scene.add_point(Vec2::new(40.0, 40.0));

    let view = identity_view();
    let options = EditorOptions::default();
    assert!(scene.handle_move(&view, &options, Vec2::new(45.0, 40.0)));
    assert!(!scene.handle_move(&view, &options, Vec2::new(90.0, 40.0)));
}

#[test]
fn test_hidden_handle_is_not_hittable() {
    let mut scene = Scene::new();
    let curve = scene
        .add_curve(&[
            spec((-40.0, -20.0), (0.0, 0.0), (4.0, 0.0)),
            spec((6.0, 0.0), (10.0, 0.0), (14.0, 0.0)),
        ])
        .expect("Kurve erwartet");

    let kfs = scene.node(curve).children.clone();
    let (_, role, l1, _) = keyframe_parts(&scene, kfs[0]);
    assert_eq!(role, KeyframeRole::First);

    // Der linke Handle des First-Keyframes ist ausgeblendet:
    // nicht in der flachen Liste, nicht anklickbar
    assert!(!scene.order().contains(&l1));
    let view = identity_view();
    let options = EditorOptions::default();
    assert!(!scene.handle_press(&view, &options, Vec2::new(-40.0, -20.0)));
}

// ── Drag-Verhalten ──────────────────────────────────────────────

#[test]
fn test_grid_drag_pans_origin_by_pixel_delta_over_scale() {
    let mut scene = Scene::new();
    scene.add_grid();

    let mut view = identity_view();
    view.viewport.scale = 20.0;
    let options = EditorOptions::default();

    assert!(scene.handle_press(&view, &options, Vec2::new(300.0, 300.0)));
    scene.handle_drag(&mut view, Vec2::new(340.0, 320.0), Vec2::new(300.0, 300.0));

    assert_relative_eq!(view.viewport.origin.x, 2.0);
    assert_relative_eq!(view.viewport.origin.y, 1.0);
}

#[test]
fn test_cursor_drag_snaps_to_integer_frame() {
    let mut scene = Scene::new();
    let cursor = scene.add_cursor();

    let mut view = identity_view();
    let options = EditorOptions::default();
    assert!(scene.handle_press(&view, &options, Vec2::new(1.0, 400.0)));

    scene.handle_drag(&mut view, Vec2::new(3.6, 250.0), Vec2::new(1.0, 400.0));
    assert_eq!(scene.node(cursor).kind, NodeKind::Cursor { frame: 4 });
}

#[test]
fn test_cursor_hit_ignores_vertical_position() {
    let mut scene = Scene::new();
    scene.add_cursor();

    let view = identity_view();
    let options = EditorOptions::default();
    assert!(scene.handle_move(&view, &options, Vec2::new(20.0, 9999.0)));
    assert!(!scene.handle_move(&view, &options, Vec2::new(80.0, 0.0)));
}

#[test]
fn test_point_drag_snaps_x_only_with_shift() {
    let mut scene = Scene::new();
    let point = scene.add_point(Vec2::new(0.0, 0.0));
    scene.node_mut(point).selected = true;

    let mut view = identity_view();
    scene.handle_drag(&mut view, Vec2::new(3.6, 1.2), Vec2::ZERO);
    let pos = scene.node(point).pos().unwrap();
    assert_relative_eq!(pos.x, 3.6);
    assert_relative_eq!(pos.y, 1.2);

    view.modifiers.press(ModifierKey::Shift);
    scene.handle_drag(&mut view, Vec2::new(5.4, 2.0), Vec2::new(3.6, 1.2));
    let pos = scene.node(point).pos().unwrap();
    assert_relative_eq!(pos.x, 5.0);
    assert_relative_eq!(pos.y, 2.0);
}

#[test]
fn test_keyframe_drag_translates_handles_rigidly() {
    let mut scene = Scene::new();
    let curve = scene.add_curve(&three_keyframes()).expect("Kurve erwartet");
    let kf = scene.node(curve).children[1];
    let (_, _, left, right) = keyframe_parts(&scene, kf);
    let left_before = scene.node(left).pos().unwrap();
    let right_before = scene.node(right).pos().unwrap();

    scene.node_mut(kf).selected = true;
    let mut view = identity_view();
    // Ziel (14.4, 3.0): x rastet auf 14, y bleibt kontinuierlich
    scene.handle_drag(&mut view, Vec2::new(14.4, 3.0), Vec2::new(12.0, 0.0));

    let pos = scene.node(kf).pos().unwrap();
    assert_relative_eq!(pos.x, 14.0);
    assert_relative_eq!(pos.y, 3.0);

    let delta = Vec2::new(2.0, 3.0);
    let left_after = scene.node(left).pos().unwrap();
    let right_after = scene.node(right).pos().unwrap();
    assert_relative_eq!(left_after.x, left_before.x + delta.x, epsilon = 1e-5);
    assert_relative_eq!(left_after.y, left_before.y + delta.y, epsilon = 1e-5);
    assert_relative_eq!(right_after.x, right_before.x + delta.x, epsilon = 1e-5);
    assert_relative_eq!(right_after.y, right_before.y + delta.y, epsilon = 1e-5);
}

#[test]
fn test_handle_clamp_invariant_under_drag_sequences() {
    let mut scene = Scene::new();
    let curve = scene.add_curve(&three_keyframes()).expect("Kurve erwartet");
    let kf = scene.node(curve).children[1];
    let (anchor, _, _, right) = keyframe_parts(&scene, kf);

    scene.node_mut(right).selected = true;
    let mut view = identity_view();
    // Versuch, den rechten Handle links am Anker vorbeizuziehen
    for target in [
        Vec2::new(20.0, 1.0),
        Vec2::new(5.0, -2.0),
        Vec2::new(anchor.x - 10.0, 0.5),
    ] {
        scene.handle_drag(&mut view, target, Vec2::ZERO);

        let kfs = scene.node(curve).children.clone();
        for kf in kfs {
            let (anchor, _, left, right) = keyframe_parts(&scene, kf);
            assert!(scene.node(left).pos().unwrap().x <= anchor.x);
            assert!(scene.node(right).pos().unwrap().x >= anchor.x);
        }
    }

    // Geklemmt heißt: exakt auf dem Anker, y folgt weiter der Maus
    let pos = scene.node(right).pos().unwrap();
    assert_relative_eq!(pos.x, anchor.x);
    assert_relative_eq!(pos.y, 0.5);
}

#[test]
fn test_ctrl_mirrors_opposite_handle_through_anchor() {
    let mut scene = Scene::new();
    let curve = scene.add_curve(&three_keyframes()).expect("Kurve erwartet");
    let kf = scene.node(curve).children[1];
    let (anchor, role, left, right) = keyframe_parts(&scene, kf);
    assert_eq!(role, KeyframeRole::Center);

    scene.node_mut(right).selected = true;
    let mut view = identity_view();
    view.modifiers.press(ModifierKey::Ctrl);

    let target = Vec2::new(17.0, 4.0);
    scene.handle_drag(&mut view, target, Vec2::ZERO);

    let right_pos = scene.node(right).pos().unwrap();
    let left_pos = scene.node(left).pos().unwrap();
    assert_relative_eq!(right_pos.x, target.x);
    assert_relative_eq!(right_pos.y, target.y);
    assert_relative_eq!(left_pos.x, 2.0 * anchor.x - target.x, epsilon = 1e-5);
    assert_relative_eq!(left_pos.y, 2.0 * anchor.y - target.y, epsilon = 1e-5);
}

#[test]
fn test_drag_applies_to_every_selected_element() {
    let mut scene = Scene::new();
    let p1 = scene.add_point(Vec2::new(0.0, 0.0));
    let p2 = scene.add_point(Vec2::new(100.0, 100.0));
    // Der Press-Pfad selektiert nur eines; die Multi-Drag-Fähigkeit
    // über das Flag bleibt trotzdem erhalten
    scene.node_mut(p1).selected = true;
    scene.node_mut(p2).selected = true;

    let mut view = identity_view();
    scene.handle_drag(&mut view, Vec2::new(7.0, 9.0), Vec2::ZERO);

    assert_eq!(scene.node(p1).pos().unwrap(), Vec2::new(7.0, 9.0));
    assert_eq!(scene.node(p2).pos().unwrap(), Vec2::new(7.0, 9.0));
}

#[test]
fn test_release_clears_every_selection_flag() {
    let mut scene = Scene::new();
    let grid = scene.add_grid();
    let point = scene.add_point(Vec2::new(5.0, 5.0));
    scene.node_mut(grid).selected = true;
    scene.node_mut(point).selected = true;

    scene.handle_release();
    assert!(!scene.node(grid).selected);
    assert!(!scene.node(point).selected);
}

// ── Rollen und Sortierung ───────────────────────────────────────

#[test]
fn test_roles_follow_x_order() {
    let mut scene = Scene::new();
    let curve = scene.add_curve(&three_keyframes()).expect("Kurve erwartet");

    let kfs = scene.node(curve).children.clone();
    let roles: Vec<KeyframeRole> = kfs
        .iter()
        .map(|&kf| keyframe_parts(&scene, kf).1)
        .collect();
    assert_eq!(
        roles,
        vec![KeyframeRole::First, KeyframeRole::Center, KeyframeRole::Last]
    );
}

#[test]
fn test_roles_reassigned_when_keyframe_overtakes() {
    let mut scene = Scene::new();
    let curve = scene.add_curve(&three_keyframes()).expect("Kurve erwartet");
    let middle = scene.node(curve).children[1];

    // Mittleres Keyframe hinter das letzte ziehen (x=12 → x=30)
    scene.node_mut(middle).selected = true;
    let mut view = identity_view();
    scene.handle_drag(&mut view, Vec2::new(30.0, 0.0), Vec2::new(12.0, 0.0));

    let kfs = scene.node(curve).children.clone();
    let mut xs: Vec<f32> = Vec::new();
    let mut first_count = 0;
    let mut last_count = 0;
    for &kf in &kfs {
        let (pos, role, _, _) = keyframe_parts(&scene, kf);
        xs.push(pos.x);
        match role {
            KeyframeRole::First => first_count += 1,
            KeyframeRole::Last => last_count += 1,
            KeyframeRole::Center => {}
        }
    }

    assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(first_count, 1);
    assert_eq!(last_count, 1);
    assert_eq!(kfs.last(), Some(&middle));
}

#[test]
fn test_single_keyframe_curve_is_degenerate() {
    let mut scene = Scene::new();
    let curve = scene
        .add_curve(&[spec((-2.0, 0.0), (0.0, 0.0), (2.0, 0.0))])
        .expect("Kurve erwartet");

    let kf = scene.node(curve).children[0];
    let (_, _, left, _) = keyframe_parts(&scene, kf);
    // First wird von Last überschrieben; sichtbar bleibt nur der linke Handle
    assert_eq!(keyframe_parts(&scene, kf).1, KeyframeRole::Last);
    assert_eq!(scene.node(kf).children, vec![left]);

    let mut surface = RecordingSurface::new();
    scene.draw(&identity_view(), &EditorOptions::default(), &mut surface);
    assert!(!surface
        .calls
        .iter()
        .any(|c| matches!(c, DrawCall::CubicBezier { .. })));
}

#[test]
fn test_curve_without_keyframes_is_rejected() {
    let mut scene = Scene::new();
    assert!(scene.add_curve(&[]).is_err());
}

// ── Zeichnen ────────────────────────────────────────────────────

#[test]
fn test_draw_clears_first_and_layers_by_ascending_z() {
    let mut scene = Scene::new();
    scene.add_grid();
    scene.add_curve(&three_keyframes()).expect("Kurve erwartet");

    let mut surface = RecordingSurface::new();
    scene.draw(&identity_view(), &EditorOptions::default(), &mut surface);

    assert!(matches!(surface.calls.first(), Some(DrawCall::Clear(_))));

    let first_bezier = surface
        .calls
        .iter()
        .position(|c| matches!(c, DrawCall::CubicBezier { .. }))
        .expect("Kurvensegmente erwartet");
    let first_marker = surface
        .calls
        .iter()
        .position(|c| matches!(c, DrawCall::Ellipse { .. }))
        .expect("Punkt-Marker erwartet");
    // Kurve (z=3) vor den Punkten (z=4)
    assert!(first_bezier < first_marker);
}

#[test]
fn test_draw_scales_oversized_tangent() {
    let mut scene = Scene::new();
    scene
        .add_curve(&[
            spec((-1.0, 0.0), (0.0, 0.0), (15.0, 0.0)),
            spec((9.0, 0.0), (10.0, 0.0), (11.0, 0.0)),
        ])
        .expect("Kurve erwartet");

    let mut surface = RecordingSurface::new();
    scene.draw(&identity_view(), &EditorOptions::default(), &mut surface);

    let bezier = surface
        .calls
        .iter()
        .find_map(|c| match c {
            DrawCall::CubicBezier { c1, c2 } => Some((*c1, *c2)),
            _ => None,
        })
        .expect("Segment erwartet");

    let norm = (226.01f32 / 100.01).sqrt();
    assert_relative_eq!(bezier.0.x, 15.0 / norm, epsilon = 1e-3);
    assert_relative_eq!(bezier.1.x, 10.0 - 1.0 / norm, epsilon = 1e-3);
}

#[test]
fn test_selected_marker_is_filled() {
    let mut scene = Scene::new();
    let point = scene.add_point(Vec2::new(3.0, 4.0));
    scene.node_mut(point).selected = true;

    let mut surface = RecordingSurface::new();
    scene.draw(&identity_view(), &EditorOptions::default(), &mut surface);

    assert!(surface
        .calls
        .iter()
        .any(|c| matches!(c, DrawCall::Ellipse { filled: true, .. })));
}

#[test]
fn test_handle_draws_tangent_line_to_anchor() {
    let mut scene = Scene::new();
    scene
        .add_curve(&[
            spec((-4.0, -2.0), (0.0, 0.0), (4.0, 2.0)),
            spec((6.0, 1.0), (10.0, 0.0), (14.0, 0.0)),
        ])
        .expect("Kurve erwartet");

    let mut surface = RecordingSurface::new();
    scene.draw(&identity_view(), &EditorOptions::default(), &mut surface);

    // Verbindungslinie vom rechten Handle (4,2) zum Anker (0,0)
    assert!(surface.calls.iter().any(|c| matches!(
        c,
        DrawCall::Line { a, b } if *a == Vec2::new(4.0, 2.0) && *b == Vec2::ZERO
    )));
}
