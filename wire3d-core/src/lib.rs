/// wire3d Core Library - Wireframe geometry engine
///
/// This library provides the synchronous core of a 2D/3D wireframe
/// viewer: scene objects under affine transforms, curve generation,
/// Liang-Barsky clipping with polygon reconstruction, and the
/// window-to-viewport mapping that produces per-frame polyline lists.

pub mod clip;
pub mod curve;
pub mod error;
pub mod geometry;
pub mod object;
pub mod transform;
pub mod wavefront;
pub mod world;

// Re-export commonly used types
pub use clip::{clip_line, clip_polyline, Edge, LineClip, WindowRect};
pub use error::{EngineError, EngineResult};
pub use geometry::{Color, Face, Geometry};
pub use object::{Object, MIN_WINDOW_SIZE, WINDOW_NAME};
pub use transform::RotationState;
pub use world::{RenderList, World};
