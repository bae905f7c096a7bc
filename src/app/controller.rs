//! Event-Verarbeitung: wendet `EditorEvent`s auf den `AppState` an.
//!
//! Ein Ereignis pro Aufruf, strikt synchron: jede Baum-Mutation,
//! Neusortierung und Z-Neuberechnung ist abgeschlossen, bevor das
//! nächste Ereignis angenommen wird.

use super::events::{EditorEvent, EditorKey};
use super::state::AppState;
use crate::core::ModifierKey;

/// Orchestriert Eingabe-Ereignisse auf Szene, Viewport und Modifier.
#[derive(Debug, Default)]
pub struct EditorController;

impl EditorController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet ein einzelnes Eingabe-Ereignis.
    pub fn handle_event(&mut self, state: &mut AppState, event: EditorEvent) {
        match event {
            EditorEvent::PointerPressed { pos } => {
                state.dragging = state.scene.handle_press(&state.view, &state.options, pos);
            }
            EditorEvent::PointerMoved { pos } => {
                state.hovering = state.scene.handle_move(&state.view, &state.options, pos);
            }
            EditorEvent::PointerDragged { pos, prev } => {
                if state.dragging {
                    state.scene.handle_drag(&mut state.view, pos, prev);
                }
            }
            EditorEvent::PointerReleased => {
                if state.dragging {
                    state.dragging = false;
                    state.scene.handle_release();
                }
            }
            EditorEvent::KeyPressed { key } => match key {
                EditorKey::Ctrl => state.view.modifiers.press(ModifierKey::Ctrl),
                EditorKey::Shift => state.view.modifiers.press(ModifierKey::Shift),
                EditorKey::ZoomIn => state.view.viewport.zoom_in(state.options.zoom_key_step),
                EditorKey::ZoomOut => state.view.viewport.zoom_out(state.options.zoom_key_step),
            },
            EditorEvent::KeyReleased => state.view.modifiers.clear(),
        }
    }
}
