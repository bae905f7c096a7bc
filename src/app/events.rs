//! Abstrakter Eingabe-Event-Strom des Editors.
//!
//! Der Host (egui, Tests, …) übersetzt seine rohen Eingaben in diese
//! diskreten Ereignisse; der Controller wendet sie synchron auf den
//! `AppState` an. Pointer-Koordinaten sind Pixel relativ zum Viewport.

use glam::Vec2;

/// Taste mit Editor-Bedeutung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    /// Ctrl: Punktspiegelung des Gegen-Handles beim Handle-Drag
    Ctrl,
    /// Shift: Frame-Raster für frei verschiebbare Punkte
    Shift,
    /// Maßstab um einen Zoom-Schritt erhöhen
    ZoomIn,
    /// Maßstab um einen Zoom-Schritt verringern
    ZoomOut,
}

/// Diskretes Eingabe-Ereignis vom Host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    /// Primärtaste gedrückt
    PointerPressed { pos: Vec2 },
    /// Pointer bewegt (ohne gehaltene Taste)
    PointerMoved { pos: Vec2 },
    /// Pointer mit gehaltener Taste bewegt; `prev` ist die Vorposition
    PointerDragged { pos: Vec2, prev: Vec2 },
    /// Primärtaste losgelassen
    PointerReleased,
    /// Taste gedrückt
    KeyPressed { key: EditorKey },
    /// Irgendeine Taste losgelassen, leert den gesamten Modifier-Satz
    KeyReleased,
}
