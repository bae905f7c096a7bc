//! Zentrale Konfiguration für den Bezier-Keyframe-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Viewport ────────────────────────────────────────────────────────

/// Anfangs-Maßstab (Pixel pro Kurveneinheit).
pub const VIEWPORT_INITIAL_SCALE: f32 = 20.0;
/// Anfangs-Ursprung in Kurveneinheiten.
pub const VIEWPORT_INITIAL_ORIGIN: [f32; 2] = [0.1, 2.0];
/// Schrittweite der Zoom-Tasten (additiv auf den Maßstab).
pub const VIEWPORT_ZOOM_KEY_STEP: f32 = 0.5;
/// Minimaler Maßstab; darunter wird die Rücktransformation instabil.
pub const VIEWPORT_SCALE_MIN: f32 = 0.5;

// ── Hit-Tests ───────────────────────────────────────────────────────

/// Pick-Radius für Punkte, Handles und Keyframes in Screen-Pixeln.
pub const POINT_PICK_RADIUS_PX: f32 = 10.0;
/// Halbe Hit-Breite des Frame-Cursors in Screen-Pixeln.
pub const CURSOR_PICK_HALF_WIDTH_PX: f32 = 30.0;

// ── Rendering ───────────────────────────────────────────────────────

/// Hintergrundfarbe (RGBA: Weiß).
pub const BACKGROUND_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
/// Farbe der Rasterlinien und der Referenzachse (RGBA: Hellgrau).
pub const GRID_COLOR: [f32; 4] = [0.784, 0.784, 0.784, 1.0];
/// Strichstärke der Rasterlinien in Pixeln.
pub const GRID_STROKE_WIDTH_PX: f32 = 0.1;
/// Farbe der Punkt-Marker (RGBA: Blau).
pub const POINT_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
/// Strichstärke der Punkt-Marker.
pub const POINT_STROKE_WIDTH_PX: f32 = 1.0;
/// Farbe der Handle-Verbindungslinien (RGBA: Rot).
pub const HANDLE_LINE_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
/// Strichstärke der Handle-Verbindungslinien.
pub const HANDLE_LINE_WIDTH_PX: f32 = 1.0;
/// Farbe der Kurvensegmente (RGBA: Schwarz).
pub const CURVE_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
/// Strichstärke der Kurvensegmente.
pub const CURVE_STROKE_WIDTH_PX: f32 = 2.0;
/// Breite des Frame-Cursor-Markers in Pixeln.
pub const CURSOR_MARKER_WIDTH_PX: f32 = 30.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `bezier_keyframe_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Viewport ────────────────────────────────────────────────
    /// Anfangs-Maßstab in Pixeln pro Kurveneinheit
    pub initial_scale: f32,
    /// Anfangs-Ursprung in Kurveneinheiten
    pub initial_origin: [f32; 2],
    /// Schrittweite der Zoom-Tasten
    pub zoom_key_step: f32,

    // ── Hit-Tests ───────────────────────────────────────────────
    /// Pick-Radius für Punkte/Handles/Keyframes in Screen-Pixeln
    pub point_pick_radius_px: f32,
    /// Halbe Hit-Breite des Frame-Cursors in Screen-Pixeln
    pub cursor_pick_half_width_px: f32,

    // ── Rendering ───────────────────────────────────────────────
    /// Hintergrundfarbe (RGBA)
    pub background_color: [f32; 4],
    /// Farbe der Rasterlinien und der Referenzachse
    pub grid_color: [f32; 4],
    /// Strichstärke der Rasterlinien in Pixeln
    pub grid_stroke_width_px: f32,
    /// Farbe der Punkt-Marker
    pub point_color: [f32; 4],
    /// Strichstärke der Punkt-Marker
    pub point_stroke_width_px: f32,
    /// Farbe der Handle-Verbindungslinien
    pub handle_line_color: [f32; 4],
    /// Strichstärke der Handle-Verbindungslinien
    pub handle_line_width_px: f32,
    /// Farbe der Kurvensegmente
    pub curve_color: [f32; 4],
    /// Strichstärke der Kurvensegmente
    pub curve_stroke_width_px: f32,
    /// Breite des Frame-Cursor-Markers in Pixeln
    pub cursor_marker_width_px: f32,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            initial_scale: VIEWPORT_INITIAL_SCALE,
            initial_origin: VIEWPORT_INITIAL_ORIGIN,
            zoom_key_step: VIEWPORT_ZOOM_KEY_STEP,

            point_pick_radius_px: POINT_PICK_RADIUS_PX,
            cursor_pick_half_width_px: CURSOR_PICK_HALF_WIDTH_PX,

            background_color: BACKGROUND_COLOR,
            grid_color: GRID_COLOR,
            grid_stroke_width_px: GRID_STROKE_WIDTH_PX,
            point_color: POINT_COLOR,
            point_stroke_width_px: POINT_STROKE_WIDTH_PX,
            handle_line_color: HANDLE_LINE_COLOR,
            handle_line_width_px: HANDLE_LINE_WIDTH_PX,
            curve_color: CURVE_COLOR,
            curve_stroke_width_px: CURVE_STROKE_WIDTH_PX,
            cursor_marker_width_px: CURSOR_MARKER_WIDTH_PX,
        }
    }
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("bezier_keyframe_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("bezier_keyframe_editor.toml")
    }
}
