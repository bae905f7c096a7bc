//! Reine Geometrie des Tangenten-Scalings für Bezier-Segmente.
//!
//! Layer-neutral: wird vom Scene-Core und von Benchmarks verwendet,
//! ohne Abhängigkeiten auf Arena oder Rendering.

use glam::Vec2;

/// Epsilon gegen Division durch Null bei deckungsgleichen Keyframes.
pub const TANGENT_EPS: f32 = 0.01;

/// Berechnet den Stauchungsfaktor `norm` für ein Segment.
///
/// `d1`/`d2`: signierte horizontale Reichweite der ausgehenden bzw.
/// eingehenden Tangente, `d`: horizontale Spannweite des Segments.
/// `norm >= 1` bedeutet: die kombinierte Reichweite der Tangenten
/// erreicht oder übersteigt die Segmentbreite; roh gezeichnet würde
/// die Kurve überschießen oder Schleifen bilden.
pub fn tangent_norm(d1: f32, d2: f32, d: f32) -> f32 {
    ((TANGENT_EPS + d1 * d1 + d2 * d2) / (TANGENT_EPS + d * d)).sqrt()
}

/// Liefert die vier Kontrollpunkte des Segments zwischen `kf1` und `kf2`.
///
/// `right` ist der rechte Handle von `kf1`, `left` der linke Handle von
/// `kf2`. Sobald `norm >= 1`, werden beide Handle-Offsets durch `norm`
/// geteilt und damit proportional zum Anker gezogen, bis ihre
/// Reichweite gerade in das Segment passt. Gestaucht wird nur die
/// Länge, nie die Richtung der Tangenten.
pub fn segment_control_points(kf1: Vec2, right: Vec2, left: Vec2, kf2: Vec2) -> [Vec2; 4] {
    let norm = tangent_norm(kf1.x - right.x, kf2.x - left.x, kf1.x - kf2.x);
    if norm >= 1.0 {
        [
            kf1,
            kf1 + (right - kf1) / norm,
            kf2 + (left - kf2) / norm,
            kf2,
        ]
    } else {
        [kf1, right, left, kf2]
    }
}
