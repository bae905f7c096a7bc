//! Layer-neutrale Helfer: Laufzeit-Optionen und reine Kurven-Geometrie.

pub mod curve_geometry;
pub mod options;

pub use curve_geometry::{segment_control_points, tangent_norm, TANGENT_EPS};
pub use options::EditorOptions;
