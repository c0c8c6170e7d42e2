//! Shader stage compilation and program linking.
//!
//! A failed compile or link never yields a partially valid program: every
//! error path deletes the handles it created and surfaces the driver's info
//! log, annotated with numbered source lines so the log's line references
//! can be followed. Compilation is deterministic, so callers must not retry
//! with unchanged source.

use std::fmt;
use thiserror::Error;

/// The two shader stages a program is linked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Vertex stage.
    Vertex,
    /// Fragment stage.
    Fragment,
}

impl ShaderStage {
    fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Errors from shader compilation or program linking.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    Compile {
        /// The stage that failed.
        stage: ShaderStage,
        /// Driver info log, prefixed with numbered source lines.
        log: String,
    },
    /// A program failed to link.
    #[error("shader link error:\n{0}")]
    Link(String),
}

/// Prefixes each source line with a right-aligned line number and appends
/// the driver log, so error messages referencing line numbers can be read
/// against the GLSL they point at.
pub fn annotate_source(source: &str, log: &str) -> String {
    let lines: Vec<&str> = if source.is_empty() {
        Vec::new()
    } else {
        source.lines().collect()
    };
    let width = lines.len().to_string().len().max(1);

    let numbered: String = lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1, width = width))
        .collect::<Vec<_>>()
        .join("\n");

    match (numbered.is_empty(), log.is_empty()) {
        (true, true) => String::new(),
        (true, false) => log.to_string(),
        (false, true) => numbered,
        (false, false) => format!("{numbered}\n\n{log}"),
    }
}

/// Compiles one shader stage.
///
/// # Errors
///
/// Returns [`ShaderError::Compile`] with the stage and annotated driver log
/// if the source does not compile.
#[allow(unsafe_code)]
pub fn compile_stage(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    use glow::HasContext;

    // SAFETY: glow wraps raw GL calls as unsafe. The stage constant and
    // source string are valid; the shader handle is deleted on failure.
    let shader = unsafe {
        gl.create_shader(stage.gl_type())
            .map_err(|e| ShaderError::Compile { stage, log: e })?
    };

    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
    }

    let compiled = unsafe { gl.get_shader_compile_status(shader) };
    if compiled {
        Ok(shader)
    } else {
        let info_log = unsafe { gl.get_shader_info_log(shader) };
        unsafe { gl.delete_shader(shader) };
        Err(ShaderError::Compile {
            stage,
            log: annotate_source(source, &info_log),
        })
    }
}

/// Compiles both stages and links them into a program.
///
/// The stage handles are deleted after linking regardless of outcome; a
/// linked program retains its own copies.
///
/// # Errors
///
/// Returns [`ShaderError::Compile`] if either stage fails, or
/// [`ShaderError::Link`] if the link step fails.
#[allow(unsafe_code)]
pub fn link_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, ShaderError> {
    use glow::HasContext;

    let vert = compile_stage(gl, ShaderStage::Vertex, vertex_src)?;
    let frag = match compile_stage(gl, ShaderStage::Fragment, fragment_src) {
        Ok(f) => f,
        Err(e) => {
            // SAFETY: vert is a valid handle from a successful compile.
            unsafe { gl.delete_shader(vert) };
            return Err(e);
        }
    };

    // SAFETY: all handles below come from successful glow calls in this
    // function; every failure path deletes what it created.
    let program = unsafe {
        match gl.create_program() {
            Ok(p) => p,
            Err(e) => {
                gl.delete_shader(vert);
                gl.delete_shader(frag);
                return Err(ShaderError::Link(e));
            }
        }
    };

    unsafe {
        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);
        gl.detach_shader(program, vert);
        gl.detach_shader(program, frag);
        gl.delete_shader(vert);
        gl.delete_shader(frag);
    }

    let linked = unsafe { gl.get_program_link_status(program) };
    if linked {
        Ok(program)
    } else {
        let info_log = unsafe { gl.get_program_info_log(program) };
        unsafe { gl.delete_program(program) };
        Err(ShaderError::Link(info_log))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- annotate_source --

    #[test]
    fn annotate_source_prepends_line_numbers() {
        let source = "#version 300 es\nvoid main() {\n}\n";
        let log = "ERROR: 0:2: syntax error";
        let out = annotate_source(source, log);

        assert!(out.contains("1: #version 300 es"), "got:\n{out}");
        assert!(out.contains("2: void main() {"), "got:\n{out}");
        assert!(out.contains("3: }"), "got:\n{out}");
        assert!(out.contains(log), "expected driver log in:\n{out}");
    }

    #[test]
    fn annotate_source_handles_empty_source() {
        let out = annotate_source("", "some error");
        assert_eq!(out, "some error");
    }

    #[test]
    fn annotate_source_handles_empty_log() {
        let out = annotate_source("void main() {}", "");
        assert!(out.contains("1: void main() {}"), "got:\n{out}");
    }

    #[test]
    fn annotate_source_handles_both_empty() {
        assert!(annotate_source("", "").is_empty());
    }

    #[test]
    fn annotate_source_right_aligns_numbers_past_ten_lines() {
        let source = (1..=12)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let out = annotate_source(&source, "err");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with(" 1: "), "got: '{}'", lines[0]);
        assert!(lines[9].starts_with("10: "), "got: '{}'", lines[9]);
    }

    // -- ShaderStage / ShaderError --

    #[test]
    fn stage_display_names_match_driver_terminology() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }

    #[test]
    fn compile_error_display_names_the_failing_stage() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "undeclared identifier".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("fragment"), "missing stage in: {msg}");
        assert!(msg.contains("undeclared identifier"), "missing log in: {msg}");
    }

    #[test]
    fn link_error_display_includes_log() {
        let err = ShaderError::Link("varying mismatch".into());
        assert!(format!("{err}").contains("varying mismatch"));
    }

    #[test]
    fn shader_error_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ShaderError>();
    }

    // Compilation itself requires a live GL context.

    #[test]
    #[ignore = "requires GL context"]
    fn compile_stage_rejects_bad_glsl_with_fragment_stage_named() {
        // Would test: compiling a fragment shader with a syntax error yields
        // ShaderError::Compile { stage: Fragment, .. } and no program handle.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn link_program_cleans_up_stage_handles() {
        // Would test: stage shaders are deleted after a successful link.
    }
}
