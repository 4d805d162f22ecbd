/// helio3d Core Library - CPU software 3D rendering pipeline
///
/// This library provides the pipeline core: the vector/matrix math kernel,
/// the camera/frustum render engine with its threaded per-point pipeline,
/// renderable mesh entities with painter's-algorithm face ordering, and
/// primitive shape generation plus OBJ mesh loading.

pub mod color;
pub mod draw;
pub mod entity;
pub mod figures;
pub mod math;
pub mod obj;
pub mod render;

// Re-export commonly used types
pub use color::Color;
pub use draw::{DrawOp, ScreenVertex};
pub use entity::{Entity, Face};
pub use figures::{EntityParams, Shape};
pub use math::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};
pub use obj::{MeshData, MeshError};
pub use render::{RenderConfig, RenderFigure, RenderVert, Renderer};
