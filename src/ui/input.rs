//! Übersetzt egui-Input (Pointer, Tasten, Modifier) in `EditorEvent`s.

use glam::Vec2;

use crate::app::{AppState, EditorEvent, EditorKey};

/// Verwaltet die Übersetzung des egui-Inputs in den abstrakten
/// Event-Strom des Editors.
#[derive(Default)]
pub struct InputState {
    prev_modifiers: egui::Modifiers,
}

impl InputState {
    /// Erstellt einen neuen, leeren Input-Zustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sammelt die Ereignisse des aktuellen Frames.
    ///
    /// Modifier werden als Flanken gemeldet: Press pro Taste, Release
    /// als ein einzelnes `KeyReleased` sobald irgendein Modifier
    /// losgelassen wurde (der Controller leert dann den ganzen Satz).
    pub fn collect_events(&mut self, ui: &egui::Ui, response: &egui::Response) -> Vec<EditorEvent> {
        let mut events = Vec::new();

        let modifiers = ui.input(|i| i.modifiers);
        if modifiers.ctrl && !self.prev_modifiers.ctrl {
            events.push(EditorEvent::KeyPressed {
                key: EditorKey::Ctrl,
            });
        }
        if modifiers.shift && !self.prev_modifiers.shift {
            events.push(EditorEvent::KeyPressed {
                key: EditorKey::Shift,
            });
        }
        if (!modifiers.ctrl && self.prev_modifiers.ctrl)
            || (!modifiers.shift && self.prev_modifiers.shift)
        {
            events.push(EditorEvent::KeyReleased);
        }
        self.prev_modifiers = modifiers;

        let (zoom_in, zoom_out) = ui.input(|i| {
            (
                i.key_pressed(egui::Key::Plus),
                i.key_pressed(egui::Key::Minus),
            )
        });
        if zoom_in {
            events.push(EditorEvent::KeyPressed {
                key: EditorKey::ZoomIn,
            });
        }
        if zoom_out {
            events.push(EditorEvent::KeyPressed {
                key: EditorKey::ZoomOut,
            });
        }

        if response.drag_started_by(egui::PointerButton::Primary) {
            // press_origin() liefert die exakte Klickposition vor der
            // Drag-Schwelle, interact_pointer_pos() wäre bereits versetzt
            if let Some(pos) = ui.input(|i| i.pointer.press_origin()) {
                events.push(EditorEvent::PointerPressed {
                    pos: to_local(pos, response),
                });
            }
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = ui.input(|i| i.pointer.delta());
            if delta != egui::Vec2::ZERO {
                if let Some(pos) = response.interact_pointer_pos() {
                    let pos = to_local(pos, response);
                    events.push(EditorEvent::PointerDragged {
                        pos,
                        prev: pos - Vec2::new(delta.x, delta.y),
                    });
                }
            }
        } else if let Some(pos) = response.hover_pos() {
            events.push(EditorEvent::PointerMoved {
                pos: to_local(pos, response),
            });
        }

        if response.drag_stopped_by(egui::PointerButton::Primary) {
            events.push(EditorEvent::PointerReleased);
        }

        events
    }
}

/// Wählt das Pointer-Icon: Move während eines Drags, Hand über
/// greifbaren Elementen, sonst Standard.
pub fn cursor_icon(state: &AppState) -> egui::CursorIcon {
    if state.dragging {
        egui::CursorIcon::Move
    } else if state.hovering {
        egui::CursorIcon::PointingHand
    } else {
        egui::CursorIcon::Default
    }
}

fn to_local(pos: egui::Pos2, response: &egui::Response) -> Vec2 {
    let local = pos - response.rect.min;
    Vec2::new(local.x, local.y)
}
