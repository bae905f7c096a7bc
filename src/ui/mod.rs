//! egui-Adapter: Input-Übersetzung und Zeichenfläche.

pub mod input;
pub mod painter;

pub use input::{cursor_icon, InputState};
pub use painter::EguiSurface;
