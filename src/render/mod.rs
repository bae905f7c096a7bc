//! Zeichen-Backend-Kontrakt: abstrakte Zeichenfläche mit Linien-,
//! Ellipsen- und Bezier-Primitiven.
//!
//! Der Core besitzt keine Rendering-Technologie; er zeichnet gegen das
//! `Surface`-Trait in Pixel-Koordinaten. Die egui-Implementierung
//! liegt in `ui::EguiSurface`.

use glam::Vec2;

/// RGBA-Farbe, Kanäle 0.0–1.0.
pub type Rgba = [f32; 4];

/// Füll- und Strich-Zustand für einen Zeichenaufruf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    /// Füllfarbe (None = keine Füllung)
    pub fill: Option<Rgba>,
    /// Strichfarbe (None = kein Strich)
    pub stroke: Option<Rgba>,
    /// Strichstärke in Pixeln
    pub stroke_width: f32,
}

impl Paint {
    /// Nur Strich, keine Füllung.
    pub fn stroke(color: Rgba, width: f32) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            stroke_width: width,
        }
    }

    /// Füllung und Strich in derselben Farbe.
    pub fn filled(color: Rgba, width: f32) -> Self {
        Self {
            fill: Some(color),
            stroke: Some(color),
            stroke_width: width,
        }
    }
}

/// Abstrakte Zeichenfläche. Alle Koordinaten sind bereits in den
/// Pixel-Raum transformiert (siehe `Viewport::to_screen`).
pub trait Surface {
    /// Größe der Zeichenfläche in Pixeln.
    fn size(&self) -> Vec2;

    /// Füllt die gesamte Fläche mit einer Farbe.
    fn clear(&mut self, color: Rgba);

    /// Zeichnet eine Linie von `a` nach `b`.
    fn line(&mut self, a: Vec2, b: Vec2, paint: &Paint);

    /// Zeichnet eine Ellipse um `center` mit Halbachsen `radius`.
    fn ellipse(&mut self, center: Vec2, radius: Vec2, paint: &Paint);

    /// Zeichnet eine kubische Bezier-Kurve mit Endpunkten `p0`/`p3`
    /// und Kontrollpunkten `c1`/`c2`.
    fn cubic_bezier(&mut self, p0: Vec2, c1: Vec2, c2: Vec2, p3: Vec2, paint: &Paint);
}
