//! Application-Layer: Zustand, Eingabe-Events und Controller.

pub mod controller;
pub mod events;
pub mod state;

pub use controller::EditorController;
pub use events::{EditorEvent, EditorKey};
pub use state::AppState;
