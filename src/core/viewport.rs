//! Viewport-Transformation (Pan/Zoom) und Modifier-Zustand.
//!
//! Beides wird als expliziter `ViewContext` durch Hit-Tests, Drags und
//! Draw-Aufrufe gereicht statt als globaler Zustand. Pro Event-Zyklus
//! schreibt genau ein Dispatch-Pfad, alle Leser sehen den Stand des
//! zuletzt abgeschlossenen Events.

use glam::Vec2;

use crate::shared::options::{
    VIEWPORT_INITIAL_ORIGIN, VIEWPORT_INITIAL_SCALE, VIEWPORT_SCALE_MIN,
};

/// Abbildung Kurvenraum → Pixelraum: `pixel = (wert + origin) * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Ursprungs-Verschiebung in Kurveneinheiten
    pub origin: Vec2,
    /// Maßstab in Pixeln pro Kurveneinheit
    pub scale: f32,
}

impl Viewport {
    /// Erstellt einen Viewport mit gegebenem Ursprung und Maßstab.
    pub fn new(origin: Vec2, scale: f32) -> Self {
        Self { origin, scale }
    }

    /// Transformiert einen Wert aus dem Kurvenraum in den Pixelraum.
    pub fn to_screen(&self, value: Vec2) -> Vec2 {
        (value + self.origin) * self.scale
    }

    /// Rücktransformation: Pixelraum → Kurvenraum.
    pub fn to_curve(&self, pixel: Vec2) -> Vec2 {
        pixel / self.scale - self.origin
    }

    /// Verschiebt den Ursprung um ein Pixel-Delta (Pan):
    /// `origin += delta / scale` komponentenweise.
    pub fn pan_pixels(&mut self, delta: Vec2) {
        self.origin += delta / self.scale;
    }

    /// Erhöht den Maßstab um einen Zoom-Schritt.
    pub fn zoom_in(&mut self, step: f32) {
        self.scale += step;
    }

    /// Verringert den Maßstab um einen Zoom-Schritt, nach unten auf
    /// `VIEWPORT_SCALE_MIN` begrenzt.
    pub fn zoom_out(&mut self, step: f32) {
        self.scale = (self.scale - step).max(VIEWPORT_SCALE_MIN);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Vec2::from(VIEWPORT_INITIAL_ORIGIN), VIEWPORT_INITIAL_SCALE)
    }
}

/// Modifier-Taste mit Editor-Bedeutung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKey {
    /// Ctrl: Punktspiegelung des Gegen-Handles beim Handle-Drag
    Ctrl,
    /// Shift: Frame-Raster für frei verschiebbare Punkte
    Shift,
}

/// Satz der aktuell gehaltenen Modifier-Tasten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierSet {
    pub ctrl: bool,
    pub shift: bool,
}

impl ModifierSet {
    /// Markiert eine Modifier-Taste als gehalten.
    pub fn press(&mut self, key: ModifierKey) {
        match key {
            ModifierKey::Ctrl => self.ctrl = true,
            ModifierKey::Shift => self.shift = true,
        }
    }

    /// Leert den gesamten Satz. Wird bei *jedem* Key-Release aufgerufen,
    /// nicht nur für die losgelassene Taste (grobes Leeren ist hier
    /// beabsichtigtes Verhalten, siehe DESIGN.md).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Gemeinsamer Kontext für Hit-Tests, Drags und Draw-Aufrufe.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewContext {
    pub viewport: Viewport,
    pub modifiers: ModifierSet,
}
