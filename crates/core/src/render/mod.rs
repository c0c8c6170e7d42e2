//! WebGL2 rendering infrastructure.
//!
//! This module is only available when the `render` feature is enabled.
//! It provides shader compilation and the fixed program library, the
//! GPU-resident cube geometry, the shadow depth target, occlusion query
//! bookkeeping, and the per-frame pass sequence.
//!
//! # Module overview
//!
//! - [`shader`] -- Shader compilation, linking, and error formatting.
//! - [`sources`] -- GLSL ES 3.0 sources for the six fixed programs.
//! - [`library`] -- Linked programs with resolved binding locations.
//! - [`geometry`] -- Vertex/index buffer upload and vertex arrays.
//! - [`target`] -- Depth-only framebuffer for the shadow map.
//! - [`query`] -- Double-buffered occlusion query pair.
//! - [`context`] -- GPU context wrapper with API level detection.
//! - [`renderer`] -- The ordered multi-pass frame loop.

pub mod context;
pub mod geometry;
pub mod library;
pub mod query;
pub mod renderer;
pub mod shader;
pub mod sources;
pub mod target;

// Re-export key types at the render module level for convenience.
pub use context::GpuContext;
pub use geometry::GeometryStore;
pub use library::{ProgramDescriptor, ProgramKind, ShaderLibrary};
pub use query::OcclusionProbe;
pub use renderer::ViewerEngine;
pub use shader::{annotate_source, compile_stage, link_program, ShaderError, ShaderStage};
pub use target::ShadowTarget;
