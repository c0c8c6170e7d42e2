//! The fixed set of linked programs and their resolved bindings.
//!
//! [`ShaderLibrary::compile_all`] builds all six programs up front and
//! resolves every declared attribute/uniform name immediately after each
//! link. Initialization is strict: the first failure tears down whatever
//! was already built and aborts engine startup. A name that fails to
//! resolve is not an error — the driver prunes bindings a stage never
//! reads, so an unresolved name simply stays at the `None` sentinel and
//! uploads to it are skipped.

use crate::render::shader::{link_program, ShaderError};
use crate::render::sources;
use std::collections::HashMap;

/// Identifies one of the six fixed programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramKind {
    /// Phong-lit red cube faces.
    SolidLit,
    /// White cube edge lines.
    Wireframe,
    /// Green triangulation lines over the face index buffer.
    MeshOverlay,
    /// Fullscreen sphere SDF ray-march.
    RayMarch,
    /// Lit faces with a shadow-map depth comparison.
    ShadowPcf,
    /// Flat white probe drawn only inside an occlusion query.
    OcclusionProbe,
}

impl ProgramKind {
    /// All program kinds, in compilation and pass order.
    pub const ALL: [ProgramKind; 6] = [
        ProgramKind::SolidLit,
        ProgramKind::Wireframe,
        ProgramKind::MeshOverlay,
        ProgramKind::RayMarch,
        ProgramKind::ShadowPcf,
        ProgramKind::OcclusionProbe,
    ];

    /// Stable program name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ProgramKind::SolidLit => "solid-lit",
            ProgramKind::Wireframe => "wireframe",
            ProgramKind::MeshOverlay => "mesh-overlay",
            ProgramKind::RayMarch => "ray-march",
            ProgramKind::ShadowPcf => "shadow-pcf",
            ProgramKind::OcclusionProbe => "occlusion-probe",
        }
    }

    fn index(self) -> usize {
        match self {
            ProgramKind::SolidLit => 0,
            ProgramKind::Wireframe => 1,
            ProgramKind::MeshOverlay => 2,
            ProgramKind::RayMarch => 3,
            ProgramKind::ShadowPcf => 4,
            ProgramKind::OcclusionProbe => 5,
        }
    }

    fn sources(self) -> (&'static str, &'static str) {
        match self {
            ProgramKind::SolidLit => (sources::SOLID_VERTEX, sources::SOLID_FRAGMENT),
            ProgramKind::Wireframe => (sources::FLAT_VERTEX, sources::FLAT_WHITE_FRAGMENT),
            ProgramKind::MeshOverlay => (sources::FLAT_VERTEX, sources::FLAT_GREEN_FRAGMENT),
            ProgramKind::RayMarch => (sources::RAY_MARCH_VERTEX, sources::RAY_MARCH_FRAGMENT),
            ProgramKind::ShadowPcf => (sources::SHADOW_VERTEX, sources::SHADOW_FRAGMENT),
            ProgramKind::OcclusionProbe => (sources::FLAT_VERTEX, sources::FLAT_WHITE_FRAGMENT),
        }
    }

    /// Attribute names this program declares.
    pub fn attribute_names(self) -> &'static [&'static str] {
        match self {
            ProgramKind::SolidLit | ProgramKind::ShadowPcf => &["a_position", "a_normal"],
            ProgramKind::Wireframe | ProgramKind::MeshOverlay | ProgramKind::OcclusionProbe => {
                &["a_position"]
            }
            ProgramKind::RayMarch => &[],
        }
    }

    /// Uniform names this program declares.
    pub fn uniform_names(self) -> &'static [&'static str] {
        match self {
            ProgramKind::SolidLit => &[
                "u_model",
                "u_projection",
                "u_normal_matrix",
                "u_light_position",
                "u_light_color",
                "u_ambient",
            ],
            ProgramKind::Wireframe | ProgramKind::MeshOverlay | ProgramKind::OcclusionProbe => {
                &["u_model", "u_projection"]
            }
            ProgramKind::RayMarch => &[
                "u_aspect",
                "u_zoom",
                "u_projection",
                "u_light_position",
                "u_light_color",
                "u_ambient",
            ],
            ProgramKind::ShadowPcf => &[
                "u_model",
                "u_projection",
                "u_normal_matrix",
                "u_light_matrix",
                "u_light_position",
                "u_light_color",
                "u_ambient",
                "u_shadow_map",
            ],
        }
    }
}

/// One linked program with its resolved binding locations.
///
/// Created once at initialization and immutable afterward; destroyed only
/// through [`ShaderLibrary::destroy`].
pub struct ProgramDescriptor {
    kind: ProgramKind,
    program: glow::Program,
    attributes: HashMap<&'static str, Option<u32>>,
    uniforms: HashMap<&'static str, Option<glow::UniformLocation>>,
}

impl ProgramDescriptor {
    #[allow(unsafe_code)]
    fn build(gl: &glow::Context, kind: ProgramKind) -> Result<Self, ShaderError> {
        use glow::HasContext;

        let (vertex_src, fragment_src) = kind.sources();
        let program = link_program(gl, vertex_src, fragment_src)?;

        // SAFETY: program is a freshly linked handle; location queries on
        // it are plain lookups.
        let attributes = kind
            .attribute_names()
            .iter()
            .map(|&name| (name, unsafe { gl.get_attrib_location(program, name) }))
            .collect();
        let uniforms = kind
            .uniform_names()
            .iter()
            .map(|&name| (name, unsafe { gl.get_uniform_location(program, name) }))
            .collect();

        Ok(Self {
            kind,
            program,
            attributes,
            uniforms,
        })
    }

    /// Which of the six programs this is.
    pub fn kind(&self) -> ProgramKind {
        self.kind
    }

    /// The linked program handle.
    pub fn program(&self) -> glow::Program {
        self.program
    }

    /// Resolved attribute location, or `None` when the name was undeclared
    /// or pruned by the driver.
    pub fn attribute(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).copied().flatten()
    }

    /// Resolved uniform location, or `None` when unused.
    pub fn uniform(&self, name: &str) -> Option<&glow::UniformLocation> {
        self.uniforms.get(name).and_then(|loc| loc.as_ref())
    }
}

/// Owns the six linked programs for the whole engine lifetime.
pub struct ShaderLibrary {
    programs: Vec<ProgramDescriptor>,
}

impl ShaderLibrary {
    /// Compiles and links all six programs, resolving bindings after each
    /// link.
    ///
    /// # Errors
    ///
    /// Returns the first [`ShaderError`] encountered. Programs already
    /// built are deleted before returning; no partially initialized
    /// library is ever observable.
    #[allow(unsafe_code)]
    pub fn compile_all(gl: &glow::Context) -> Result<Self, ShaderError> {
        use glow::HasContext;

        let mut programs = Vec::with_capacity(ProgramKind::ALL.len());
        for kind in ProgramKind::ALL {
            match ProgramDescriptor::build(gl, kind) {
                Ok(descriptor) => programs.push(descriptor),
                Err(e) => {
                    log::error!("program '{}' failed to build: {e}", kind.name());
                    for built in &programs {
                        // SAFETY: handles were linked above and not yet
                        // deleted.
                        unsafe { gl.delete_program(built.program) };
                    }
                    return Err(e);
                }
            }
        }
        Ok(Self { programs })
    }

    /// Looks up a program descriptor.
    ///
    /// Always `Some` after a successful `compile_all`; the frame loop still
    /// treats `None` as "skip this pass" rather than trusting that.
    pub fn get(&self, kind: ProgramKind) -> Option<&ProgramDescriptor> {
        self.programs.get(kind.index())
    }

    /// Deletes all linked programs.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;
        for descriptor in &self.programs {
            // SAFETY: each handle was linked in compile_all and is deleted
            // exactly once here.
            unsafe { gl.delete_program(descriptor.program) };
        }
    }
}
