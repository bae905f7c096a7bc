//! Core des Szenen-Graphen: Arena-Knoten, Scene-Dispatch und Viewport.

pub mod node;
pub mod scene;
pub mod viewport;

pub use node::{HandleSide, KeyframeRole, Node, NodeId, NodeKind};
pub use scene::{KeyframeSpec, Scene};
pub use viewport::{ModifierKey, ModifierSet, ViewContext, Viewport};
