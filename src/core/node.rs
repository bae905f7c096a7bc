//! Knoten-Typen der Szenen-Arena: Id, Varianten-Tag und Z-Indizes.

use glam::Vec2;

/// Z-Index der Hintergrund-/Pan-Fläche.
pub const Z_GRID: i32 = 1;
/// Z-Index des Frame-Cursors.
pub const Z_CURSOR: i32 = 2;
/// Z-Index der Kurven.
pub const Z_CURVE: i32 = 3;
/// Z-Index von Punkten, Handles und Keyframes.
pub const Z_POINT: i32 = 4;

/// Index eines Knotens in der Szenen-Arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Roher Arena-Index (für Benchmarks und Diagnose).
    pub fn index(self) -> usize {
        self.0
    }
}

/// Seite eines Tangenten-Handles relativ zu seinem Keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleSide {
    Left,
    Right,
}

/// Rollen-Klassifikation eines Keyframes innerhalb seiner Kurve.
///
/// Wird bei jedem Relayout aus der x-Sortierung neu abgeleitet und
/// steuert, welche Handles sichtbar und greifbar sind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyframeRole {
    /// Minimales x, linker Handle ausgeblendet
    First,
    /// Innenliegend, beide Handles sichtbar
    Center,
    /// Maximales x, rechter Handle ausgeblendet
    Last,
}

/// Varianten-Tag mit den variantenspezifischen Daten eines Knotens.
///
/// Hit-Test, Drag, Relayout und Draw dispatchen über dieses Tag statt
/// über eine Typ-Hierarchie.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Hintergrund- und Pan-Fläche
    Grid,
    /// Frame-gerasteter Scrub-Marker
    Cursor { frame: i32 },
    /// Frei verschiebbare Koordinate in Kurveneinheiten
    Point { pos: Vec2 },
    /// Tangenten-Kontrollpunkt eines Keyframes
    Handle { pos: Vec2, side: HandleSide },
    /// Ankerpunkt der Kurve; besitzt genau zwei Handles
    Keyframe {
        pos: Vec2,
        role: KeyframeRole,
        left: NodeId,
        right: NodeId,
    },
    /// Geordnete Keyframe-Sammlung, rendert die Segmente
    Curve,
}

/// Ein Knoten der Szenen-Arena.
///
/// `parent` ist ein schwacher Aufwärts-Link (Anker-Lookup beim
/// Handle-Dispatch), niemals Ownership. Die besitzenden Kanten sind
/// `children`; bei Keyframes enthält `children` nur die rollenabhängig
/// sichtbare Teilmenge der beiden Handles.
#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub z_index: i32,
    pub selected: bool,
    pub kind: NodeKind,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, z_index: i32, parent: Option<NodeId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            z_index,
            selected: false,
            kind,
        }
    }

    /// Position des Knotens in Kurveneinheiten, sofern er eine trägt.
    pub fn pos(&self) -> Option<Vec2> {
        match self.kind {
            NodeKind::Point { pos }
            | NodeKind::Handle { pos, .. }
            | NodeKind::Keyframe { pos, .. } => Some(pos),
            _ => None,
        }
    }
}
