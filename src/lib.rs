//! Bezier-Keyframe-Editor Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod render;
pub mod shared;
pub mod ui;

pub use app::{AppState, EditorController, EditorEvent, EditorKey};
pub use core::{
    HandleSide, KeyframeRole, KeyframeSpec, ModifierKey, ModifierSet, Node, NodeId, NodeKind,
    Scene, ViewContext, Viewport,
};
pub use render::{Paint, Rgba, Surface};
pub use shared::{segment_control_points, tangent_norm, EditorOptions};
