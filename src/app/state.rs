//! Application State: Szene, View-Kontext, Optionen und Pointer-Zustand.

use glam::Vec2;

use crate::core::{Scene, ViewContext, Viewport};
use crate::shared::EditorOptions;

/// Gesamter veränderlicher Zustand des Editors.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Der Szenenbaum mit allen Elementen
    pub scene: Scene,
    /// Viewport-Transformation und Modifier-Satz
    pub view: ViewContext,
    /// Laufzeit-Optionen (aus TOML geladen)
    pub options: EditorOptions,
    /// Läuft gerade ein Drag (der Press hat ein Element getroffen)?
    pub dragging: bool,
    /// Schwebt der Pointer über einem Element mit Hand-Cursor?
    pub hovering: bool,
}

impl AppState {
    /// Erstellt einen Zustand mit Standard-Optionen.
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen Zustand; Viewport-Start kommt aus den Optionen.
    pub fn with_options(options: EditorOptions) -> Self {
        let viewport = Viewport::new(Vec2::from(options.initial_origin), options.initial_scale);
        Self {
            scene: Scene::new(),
            view: ViewContext {
                viewport,
                ..ViewContext::default()
            },
            options,
            dragging: false,
            hovering: false,
        }
    }
}
