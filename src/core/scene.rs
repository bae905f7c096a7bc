//! Szenen-Graph: Arena, Relayout (Sortierung, Rollen, flache
//! Z-Reihenfolge) und der Event-Dispatch für Press/Move/Drag/Release.
//!
//! Strikt synchron: jede Mutation inklusive Relayout ist abgeschlossen,
//! bevor das nächste Event angenommen wird.

use std::collections::VecDeque;

use anyhow::bail;
use glam::Vec2;

use super::node::{HandleSide, KeyframeRole, Node, NodeId, NodeKind};
use super::node::{Z_CURSOR, Z_CURVE, Z_GRID, Z_POINT};
use super::viewport::{ModifierSet, ViewContext};
use crate::render::{Paint, Surface};
use crate::shared::curve_geometry::segment_control_points;
use crate::shared::EditorOptions;

/// Literale Anfangskonfiguration eines Keyframes:
/// linker Handle, Anker und rechter Handle in Kurveneinheiten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeSpec {
    pub left: Vec2,
    pub anchor: Vec2,
    pub right: Vec2,
}

impl KeyframeSpec {
    pub fn new(left: Vec2, anchor: Vec2, right: Vec2) -> Self {
        Self {
            left,
            anchor,
            right,
        }
    }
}

/// Wurzel-Container des Szenenbaums.
///
/// Besitzt alle Knoten in einer Arena, hält die Wurzeln (`roots`) und
/// die daraus abgeleitete flache Traversierungs-Reihenfolge (`order`):
/// Breitensuche über den lebenden Baum, stabil absteigend nach Z-Index
/// sortiert. `order` wird von jedem Relayout neu berechnet und ist
/// innerhalb eines Event-Zyklus niemals veraltet.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    order: Vec<NodeId>,
}

impl Scene {
    /// Erstellt eine leere Szene.
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Liest einen Knoten.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Mutiert einen Knoten direkt (Tests und Host-Setup).
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Flache Reihenfolge in absteigendem Z-Index (Hit-Test-Reihenfolge).
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Anzahl der Knoten in der Arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True wenn die Szene keine Knoten enthält.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Aufbau ──────────────────────────────────────────────────

    /// Fügt die Hintergrund-/Pan-Fläche hinzu.
    pub fn add_grid(&mut self) -> NodeId {
        let id = self.alloc(Node::new(NodeKind::Grid, Z_GRID, None));
        self.roots.push(id);
        self.relayout();
        id
    }

    /// Fügt den Frame-Cursor hinzu (Startframe 1).
    pub fn add_cursor(&mut self) -> NodeId {
        let id = self.alloc(Node::new(NodeKind::Cursor { frame: 1 }, Z_CURSOR, None));
        self.roots.push(id);
        self.relayout();
        id
    }

    /// Fügt einen freien Punkt hinzu.
    pub fn add_point(&mut self, pos: Vec2) -> NodeId {
        let id = self.alloc(Node::new(NodeKind::Point { pos }, Z_POINT, None));
        self.roots.push(id);
        self.relayout();
        id
    }

    /// Fügt eine Kurve aus Keyframe-Tripeln hinzu.
    ///
    /// Jedes Keyframe erzeugt seine beiden Handles mit; Rollen und
    /// sichtbare Handles werden vom anschließenden Relayout abgeleitet.
    /// Eine Kurve ohne Keyframes ist ungültig.
    pub fn add_curve(&mut self, keyframes: &[KeyframeSpec]) -> anyhow::Result<NodeId> {
        if keyframes.is_empty() {
            bail!("Kurve ohne Keyframes ist ungültig");
        }

        let curve = self.alloc(Node::new(NodeKind::Curve, Z_CURVE, None));
        for spec in keyframes {
            let left = self.alloc(Node::new(
                NodeKind::Handle {
                    pos: spec.left,
                    side: HandleSide::Left,
                },
                Z_POINT,
                None,
            ));
            let right = self.alloc(Node::new(
                NodeKind::Handle {
                    pos: spec.right,
                    side: HandleSide::Right,
                },
                Z_POINT,
                None,
            ));
            let kf = self.alloc(Node::new(
                NodeKind::Keyframe {
                    pos: spec.anchor,
                    role: KeyframeRole::Center,
                    left,
                    right,
                },
                Z_POINT,
                Some(curve),
            ));
            self.nodes[left.0].parent = Some(kf);
            self.nodes[right.0].parent = Some(kf);
            self.nodes[kf.0].children = vec![left, right];
            self.nodes[curve.0].children.push(kf);
        }

        self.roots.push(curve);
        self.relayout();
        Ok(curve)
    }

    // ── Relayout ────────────────────────────────────────────────

    /// Stellt alle strukturellen Invarianten wieder her und berechnet
    /// die flache Reihenfolge neu.
    ///
    /// Idempotent: ohne zwischenzeitliche Mutation liefert ein zweiter
    /// Aufruf exakt dieselbe Reihenfolge. Läuft einmal pro
    /// Mutations-/Draw-Zyklus statt einmal pro Element.
    pub fn relayout(&mut self) {
        let curves: Vec<NodeId> = (0..self.nodes.len())
            .map(NodeId)
            .filter(|id| matches!(self.nodes[id.0].kind, NodeKind::Curve))
            .collect();
        for curve in curves {
            self.relayout_curve(curve);
        }
        self.order = self.flat_order();
    }

    /// Sortiert die Keyframes einer Kurve aufsteigend nach Anker-x und
    /// leitet die Rollen neu ab: alle Center, dann Minimum → First und
    /// Maximum → Last. Bei nur einem Keyframe gewinnt Last (degeneriert,
    /// zeichnet ohnehin kein Segment).
    fn relayout_curve(&mut self, curve: NodeId) {
        let mut kfs = self.nodes[curve.0].children.clone();
        kfs.sort_by(|a, b| {
            let ax = self.nodes[a.0].pos().map_or(0.0, |p| p.x);
            let bx = self.nodes[b.0].pos().map_or(0.0, |p| p.x);
            ax.total_cmp(&bx)
        });

        for &kf in &kfs {
            self.set_role(kf, KeyframeRole::Center);
        }
        if let Some(&first) = kfs.first() {
            self.set_role(first, KeyframeRole::First);
        }
        if let Some(&last) = kfs.last() {
            self.set_role(last, KeyframeRole::Last);
        }

        for &kf in &kfs {
            self.refresh_keyframe_children(kf);
        }
        self.nodes[curve.0].children = kfs;
    }

    fn set_role(&mut self, id: NodeId, new_role: KeyframeRole) {
        if let NodeKind::Keyframe { role, .. } = &mut self.nodes[id.0].kind {
            *role = new_role;
        }
    }

    /// Berechnet die rollenabhängig sichtbaren Handle-Kinder eines
    /// Keyframes: First blendet links aus, Last blendet rechts aus.
    fn refresh_keyframe_children(&mut self, id: NodeId) {
        let NodeKind::Keyframe {
            role, left, right, ..
        } = self.nodes[id.0].kind
        else {
            return;
        };
        self.nodes[id.0].children = match role {
            KeyframeRole::First => vec![right],
            KeyframeRole::Last => vec![left],
            KeyframeRole::Center => vec![left, right],
        };
    }

    /// Breitensuche über den lebenden Baum, anschließend stabil nach
    /// absteigendem Z-Index sortiert: gleiche Z-Indizes behalten ihre
    /// BFS-Reihenfolge.
    fn flat_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue: VecDeque<NodeId> = self.roots.iter().copied().collect();
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(self.nodes[id.0].children.iter().copied());
        }
        order.sort_by_key(|id| std::cmp::Reverse(self.nodes[id.0].z_index));
        order
    }

    // ── Event-Dispatch ──────────────────────────────────────────

    /// Dispatcht einen Pointer-Druck: Scan absteigend nach Z, der erste
    /// Treffer wird selektiert (höchstens ein Gewinner, der oberste).
    /// Liefert false wenn kein Element getroffen wurde.
    pub fn handle_press(
        &mut self,
        view: &ViewContext,
        options: &EditorOptions,
        pixel: Vec2,
    ) -> bool {
        for i in 0..self.order.len() {
            let id = self.order[i];
            let (hit, _) = self.hit_test(id, view, options, pixel);
            if hit {
                self.nodes[id.0].selected = true;
                return true;
            }
        }
        false
    }

    /// Liefert den Hand-Cursor-Hinweis des obersten Treffers,
    /// unabhängig vom Selektionszustand.
    pub fn handle_move(&self, view: &ViewContext, options: &EditorOptions, pixel: Vec2) -> bool {
        for &id in &self.order {
            let (hit, hand_cursor) = self.hit_test(id, view, options, pixel);
            if hit {
                return hand_cursor;
            }
        }
        false
    }

    /// Wendet das Drag auf *alle* selektierten Elemente der flachen
    /// Liste an. Der Press-Pfad selektiert zwar nur eines, die latente
    /// Multi-Drag-Fähigkeit bleibt aber absichtlich erhalten.
    pub fn handle_drag(&mut self, view: &mut ViewContext, pixel: Vec2, prev_pixel: Vec2) {
        let selected: Vec<NodeId> = self
            .order
            .iter()
            .copied()
            .filter(|id| self.nodes[id.0].selected)
            .collect();
        for id in selected {
            self.drag_node(id, view, pixel, prev_pixel);
        }
        self.relayout();
    }

    /// Löscht die Selektions-Flags aller Knoten.
    pub fn handle_release(&mut self) {
        for node in &mut self.nodes {
            node.selected = false;
        }
    }

    /// Hit-Test eines Knotens: `(getroffen, Hand-Cursor gewünscht)`.
    fn hit_test(
        &self,
        id: NodeId,
        view: &ViewContext,
        options: &EditorOptions,
        pixel: Vec2,
    ) -> (bool, bool) {
        match &self.nodes[id.0].kind {
            // Catch-all-Fläche ohne Hand-Cursor
            NodeKind::Grid => (true, false),
            NodeKind::Cursor { frame } => {
                let screen_x = view.viewport.to_screen(Vec2::new(*frame as f32, 0.0)).x;
                (
                    (screen_x - pixel.x).abs() <= options.cursor_pick_half_width_px,
                    true,
                )
            }
            NodeKind::Point { pos }
            | NodeKind::Handle { pos, .. }
            | NodeKind::Keyframe { pos, .. } => (
                view.viewport.to_screen(*pos).distance(pixel) <= options.point_pick_radius_px,
                true,
            ),
            NodeKind::Curve => (false, false),
        }
    }

    // ── Drag-Verhalten pro Variante ─────────────────────────────

    fn drag_node(&mut self, id: NodeId, view: &mut ViewContext, pixel: Vec2, prev_pixel: Vec2) {
        match self.nodes[id.0].kind {
            NodeKind::Grid => view.viewport.pan_pixels(pixel - prev_pixel),
            NodeKind::Cursor { .. } => {
                // Immer auf ganze Frames gerastet, nicht Modifier-abhängig
                let frame = view.viewport.to_curve(pixel).x.round() as i32;
                if let NodeKind::Cursor { frame: f } = &mut self.nodes[id.0].kind {
                    *f = frame;
                }
            }
            NodeKind::Point { .. } => {
                let target = view.viewport.to_curve(pixel);
                self.move_point_to(id, target, view.modifiers);
            }
            NodeKind::Handle { .. } => {
                let target = view.viewport.to_curve(pixel);
                self.move_handle_to(id, target, view.modifiers, false);
            }
            NodeKind::Keyframe { .. } => {
                let target = view.viewport.to_curve(pixel);
                self.move_keyframe_to(id, target);
            }
            NodeKind::Curve => {}
        }
    }

    /// Setzt einen freien Punkt; mit gehaltenem Shift rastet x auf
    /// ganze Frames.
    fn move_point_to(&mut self, id: NodeId, target: Vec2, modifiers: ModifierSet) {
        if let NodeKind::Point { pos } = &mut self.nodes[id.0].kind {
            pos.x = if modifiers.shift {
                target.x.round()
            } else {
                target.x
            };
            pos.y = target.y;
        }
    }

    /// Starre Translation eines Keyframes: beide Handles wandern um
    /// dasselbe Delta mit (Tangentenform bleibt erhalten), der Anker
    /// rastet horizontal auf ganze Frames, y bleibt kontinuierlich.
    fn move_keyframe_to(&mut self, id: NodeId, target: Vec2) {
        let NodeKind::Keyframe {
            pos, left, right, ..
        } = self.nodes[id.0].kind
        else {
            return;
        };

        let delta = Vec2::new(target.x.round() - pos.x, target.y - pos.y);
        self.translate_point(left, delta);
        self.translate_point(right, delta);

        if let NodeKind::Keyframe { pos, .. } = &mut self.nodes[id.0].kind {
            pos.x = target.x.round();
            pos.y = target.y;
        }
    }

    /// Verschiebt eine Punkt-Variante ohne Clamping.
    fn translate_point(&mut self, id: NodeId, delta: Vec2) {
        match &mut self.nodes[id.0].kind {
            NodeKind::Point { pos } | NodeKind::Handle { pos, .. } => *pos += delta,
            _ => {}
        }
    }

    /// Setzt einen Handle auf eine Zielposition.
    ///
    /// Mit gehaltenem Ctrl bewegt der Top-Level-Aufruf zuerst den
    /// gegenüberliegenden Handle auf die Punktspiegelung
    /// `2·anker − ziel`; `mirrored` verhindert dabei endlose Rekursion.
    /// Danach wird x auf die Ankerseite geklemmt (links: min, rechts:
    /// max), y bleibt ungeklemmt.
    fn move_handle_to(&mut self, id: NodeId, target: Vec2, modifiers: ModifierSet, mirrored: bool) {
        let Some(kf) = self.nodes[id.0].parent else {
            return;
        };
        let NodeKind::Keyframe {
            pos: anchor,
            left,
            right,
            ..
        } = self.nodes[kf.0].kind
        else {
            return;
        };
        let NodeKind::Handle { side, .. } = self.nodes[id.0].kind else {
            return;
        };

        if modifiers.ctrl && !mirrored {
            let opposite = match side {
                HandleSide::Left => right,
                HandleSide::Right => left,
            };
            self.move_handle_to(opposite, 2.0 * anchor - target, modifiers, true);
        }

        if let NodeKind::Handle { pos, side } = &mut self.nodes[id.0].kind {
            pos.x = match side {
                HandleSide::Left => target.x.min(anchor.x),
                HandleSide::Right => target.x.max(anchor.x),
            };
            pos.y = target.y;
        }
    }

    // ── Zeichnen ────────────────────────────────────────────────

    /// Zeichnet die Szene in aufsteigender Z-Reihenfolge gegen die
    /// abstrakte Zeichenfläche. Das vorangestellte Relayout garantiert
    /// eine konsistente Struktur vor jedem Draw-Tick.
    pub fn draw(&mut self, view: &ViewContext, options: &EditorOptions, surface: &mut dyn Surface) {
        self.relayout();
        for i in (0..self.order.len()).rev() {
            self.draw_node(self.order[i], view, options, surface);
        }
    }

    fn draw_node(
        &self,
        id: NodeId,
        view: &ViewContext,
        options: &EditorOptions,
        surface: &mut dyn Surface,
    ) {
        match &self.nodes[id.0].kind {
            NodeKind::Grid => self.draw_grid(view, options, surface),
            NodeKind::Cursor { frame } => {
                let x = view.viewport.to_screen(Vec2::new(*frame as f32, 0.0)).x;
                let height = surface.size().y;
                let paint = Paint::stroke(options.grid_color, options.cursor_marker_width_px);
                surface.line(Vec2::new(x, 0.0), Vec2::new(x, height), &paint);
            }
            NodeKind::Point { pos } | NodeKind::Keyframe { pos, .. } => {
                self.draw_point_marker(*pos, self.nodes[id.0].selected, view, options, surface);
            }
            NodeKind::Handle { pos, .. } => {
                // Tangenten-Indikator zum Anker, dann der Punkt-Marker
                let anchor = self.nodes[id.0].parent.and_then(|kf| self.nodes[kf.0].pos());
                if let Some(anchor) = anchor {
                    let paint =
                        Paint::stroke(options.handle_line_color, options.handle_line_width_px);
                    surface.line(
                        view.viewport.to_screen(*pos),
                        view.viewport.to_screen(anchor),
                        &paint,
                    );
                }
                self.draw_point_marker(*pos, self.nodes[id.0].selected, view, options, surface);
            }
            NodeKind::Curve => self.draw_curve(id, view, options, surface),
        }
    }

    /// Hintergrund löschen, Raster im Abstand einer Kurveneinheit und
    /// die Referenzachse bei x = 0 zeichnen.
    fn draw_grid(&self, view: &ViewContext, options: &EditorOptions, surface: &mut dyn Surface) {
        surface.clear(options.background_color);

        let size = surface.size();
        let spacing = view.viewport.scale;
        let paint = Paint::stroke(options.grid_color, options.grid_stroke_width_px);

        if spacing >= 1.0 {
            let mut x = (view.viewport.origin.x * view.viewport.scale).rem_euclid(spacing);
            while x < size.x {
                surface.line(Vec2::new(x, 0.0), Vec2::new(x, size.y), &paint);
                x += spacing;
            }
            let mut y = (view.viewport.origin.y * view.viewport.scale).rem_euclid(spacing);
            while y < size.y {
                surface.line(Vec2::new(0.0, y), Vec2::new(size.x, y), &paint);
                y += spacing;
            }
        }

        let axis_x = view.viewport.to_screen(Vec2::ZERO).x;
        surface.line(Vec2::new(axis_x, 0.0), Vec2::new(axis_x, size.y), &paint);
    }

    fn draw_point_marker(
        &self,
        pos: Vec2,
        selected: bool,
        view: &ViewContext,
        options: &EditorOptions,
        surface: &mut dyn Surface,
    ) {
        let paint = if selected {
            Paint::filled(options.point_color, options.point_stroke_width_px)
        } else {
            Paint::stroke(options.point_color, options.point_stroke_width_px)
        };
        // Marker-Durchmesser = Pick-Radius (Hitbox ist doppelt so breit)
        let radius = Vec2::splat(options.point_pick_radius_px * 0.5);
        surface.ellipse(view.viewport.to_screen(pos), radius, &paint);
    }

    /// Zeichnet die Segmente einer Kurve mit Tangenten-Scaling.
    /// Ein einzelnes Keyframe ist degeneriert und zeichnet nichts.
    fn draw_curve(
        &self,
        id: NodeId,
        view: &ViewContext,
        options: &EditorOptions,
        surface: &mut dyn Surface,
    ) {
        let paint = Paint::stroke(options.curve_color, options.curve_stroke_width_px);
        for pair in self.nodes[id.0].children.windows(2) {
            let Some((a1, _, r1)) = self.keyframe_geometry(pair[0]) else {
                continue;
            };
            let Some((a2, l2, _)) = self.keyframe_geometry(pair[1]) else {
                continue;
            };

            let [p0, c1, c2, p3] = segment_control_points(a1, r1, l2, a2);
            surface.cubic_bezier(
                view.viewport.to_screen(p0),
                view.viewport.to_screen(c1),
                view.viewport.to_screen(c2),
                view.viewport.to_screen(p3),
                &paint,
            );
        }
    }

    /// Anker-, Links- und Rechts-Handle-Position eines Keyframes.
    fn keyframe_geometry(&self, id: NodeId) -> Option<(Vec2, Vec2, Vec2)> {
        let NodeKind::Keyframe {
            pos, left, right, ..
        } = self.nodes[id.0].kind
        else {
            return None;
        };
        Some((pos, self.nodes[left.0].pos()?, self.nodes[right.0].pos()?))
    }
}

#[cfg(test)]
mod tests;
