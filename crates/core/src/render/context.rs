//! GPU context wrapper with capability detection.
//!
//! `GpuContext` wraps a `glow::Context` and verifies at initialization
//! that the surface speaks at least GL ES 3.0 / WebGL2. The pipeline
//! leans on ES 3.0 features throughout (`gl_VertexID` fullscreen draws,
//! `ANY_SAMPLES_PASSED` queries, depth-only framebuffers), so an older
//! context is rejected up front instead of failing mid-frame.

use crate::error::EngineError;

/// Wraps a `glow::Context` with the verified API level.
///
/// Created once at initialization and owned for the engine lifetime.
pub struct GpuContext {
    gl: glow::Context,
    version_major: u32,
}

impl GpuContext {
    /// Wraps the given GL context after checking its API level.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SurfaceUnavailable`] when the context
    /// reports a major version below 3.
    pub fn new(gl: glow::Context) -> Result<Self, EngineError> {
        use glow::HasContext;

        let version = gl.version();
        let (major, minor) = (version.major, version.minor);
        if major < 3 {
            return Err(EngineError::SurfaceUnavailable(format!(
                "GL {}.{} context; ES 3.0 / WebGL2 required",
                major, minor
            )));
        }

        Ok(Self {
            gl,
            version_major: major,
        })
    }

    /// Returns a reference to the underlying `glow::Context`.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Consumes this wrapper and returns the underlying `glow::Context`.
    pub fn into_gl(self) -> glow::Context {
        self.gl
    }

    /// Major API version reported by the context.
    pub fn version_major(&self) -> u32 {
        self.version_major
    }
}
