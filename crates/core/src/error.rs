//! Error types for the cubeview engine.
//!
//! Shader compilation and linking failures carry the stage name and the
//! driver's diagnostic log; they abort engine initialization (there is no
//! fallback program to render with). Degenerate inputs such as a zero-area
//! viewport or a zero-length drag delta are expected transient states from
//! input devices and are skipped silently by the components that see them,
//! so they never appear here.

use thiserror::Error;

/// Errors produced by engine initialization and GPU resource creation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No drawable GPU context could be established. Fatal: the engine
    /// cannot start without one.
    #[error("no drawable surface: {0}")]
    SurfaceUnavailable(String),

    /// A GPU object (buffer, texture, framebuffer, query) could not be
    /// allocated. Fatal for the resource's owner.
    #[error("gpu allocation failed: {0}")]
    Allocation(String),

    /// A shader stage failed to compile or a program failed to link.
    #[cfg(feature = "render")]
    #[error(transparent)]
    Shader(#[from] crate::render::shader::ShaderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_unavailable_includes_reason() {
        let err = EngineError::SurfaceUnavailable("webgl2 context request returned null".into());
        let msg = format!("{err}");
        assert!(
            msg.contains("webgl2 context request returned null"),
            "expected reason in message, got: {msg}"
        );
    }

    #[test]
    fn allocation_includes_detail() {
        let err = EngineError::Allocation("out of buffer handles".into());
        let msg = format!("{err}");
        assert!(
            msg.contains("out of buffer handles"),
            "expected detail in message, got: {msg}"
        );
    }

    #[cfg(feature = "render")]
    #[test]
    fn shader_error_passes_through_stage_and_log() {
        use crate::render::shader::{ShaderError, ShaderStage};
        let err = EngineError::from(ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "undeclared identifier".into(),
        });
        let msg = format!("{err}");
        assert!(msg.contains("fragment"), "missing stage in: {msg}");
        assert!(
            msg.contains("undeclared identifier"),
            "missing driver log in: {msg}"
        );
    }

    #[test]
    fn engine_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }

    #[test]
    fn engine_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<EngineError>();
    }
}
