//! The ordered multi-pass frame loop.
//!
//! `ViewerEngine` owns every GPU resource (geometry, programs, shadow
//! target, occlusion queries) and runs one synchronous frame at a time:
//! clear, rebuild the per-frame matrices, cull faces against the frustum,
//! then issue the fixed pass sequence — solid faces, wireframe edges, the
//! optional mesh overlay, the ray-marched sphere, the shadow depth
//! pre-pass plus its comparison pass, and finally the occlusion-probe
//! query with its gated re-draw.
//!
//! Initialization is strict: any missing resource aborts engine startup.
//! The frame loop is graceful: a pass whose program went missing is
//! skipped with a logged diagnostic and the remaining passes still draw.

use crate::config;
use crate::culling;
use crate::error::EngineError;
use crate::geometry;
use crate::input::EngineState;
use crate::render::context::GpuContext;
use crate::render::geometry::GeometryStore;
use crate::render::library::{ProgramDescriptor, ProgramKind, ShaderLibrary};
use crate::render::query::OcclusionProbe;
use crate::render::target::ShadowTarget;
use glam::{Mat3, Mat4, Vec3};
use glow::HasContext;

/// Field of view of the light's shadow projection.
const SHADOW_FOV_RADIANS: f32 = std::f32::consts::FRAC_PI_4;
/// Near plane of the light's shadow projection.
const SHADOW_NEAR: f32 = 1.0;
/// Far plane of the light's shadow projection; the light sits ~12 units
/// from the cube, so 30 covers the whole scene with headroom.
const SHADOW_FAR: f32 = 30.0;

/// Everything a pass can upload, rebuilt once per frame.
///
/// Passes pick the subset they declare; the shadow depth pre-pass swaps
/// `projection` for the light matrix and reuses the rest unchanged.
#[derive(Debug, Clone, Copy)]
struct FrameUniforms {
    model: Mat4,
    projection: Mat4,
    normal_matrix: Mat3,
    light_matrix: Mat4,
    light_position: Vec3,
    light_color: Vec3,
    ambient: Vec3,
    aspect: f32,
    zoom: f32,
}

/// Which of the two index buffers an indexed draw reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexBuffer {
    Faces,
    Edges,
}

/// One draw call within a pass.
#[derive(Debug, Clone, Copy)]
enum DrawCall {
    /// Indexed draw: `count` u16 indices starting `byte_offset` bytes into
    /// the chosen index buffer.
    Elements {
        buffer: IndexBuffer,
        mode: u32,
        count: i32,
        byte_offset: i32,
    },
    /// Non-indexed draw, used by the bufferless fullscreen triangle.
    Arrays { mode: u32, first: i32, count: i32 },
}

/// All 36 face indices as a single triangle draw.
const DRAW_ALL_FACES: DrawCall = DrawCall::Elements {
    buffer: IndexBuffer::Faces,
    mode: glow::TRIANGLES,
    count: (geometry::FACE_COUNT * geometry::INDICES_PER_FACE) as i32,
    byte_offset: 0,
};

/// All 24 edge indices as a line draw.
const DRAW_ALL_EDGES: DrawCall = DrawCall::Elements {
    buffer: IndexBuffer::Edges,
    mode: glow::LINES,
    count: geometry::EDGE_INDICES.len() as i32,
    byte_offset: 0,
};

/// Face indices reinterpreted as lines for the triangulation overlay.
const DRAW_FACES_AS_LINES: DrawCall = DrawCall::Elements {
    buffer: IndexBuffer::Faces,
    mode: glow::LINES,
    count: (geometry::FACE_COUNT * geometry::INDICES_PER_FACE) as i32,
    byte_offset: 0,
};

/// The bufferless fullscreen triangle.
const DRAW_FULLSCREEN: DrawCall = DrawCall::Arrays {
    mode: glow::TRIANGLES,
    first: 0,
    count: 3,
};

/// Uploads every uniform the program resolved; unresolved names were
/// pruned by the driver and are skipped.
#[allow(unsafe_code)]
fn apply_uniforms(gl: &glow::Context, desc: &ProgramDescriptor, u: &FrameUniforms) {
    // SAFETY: the descriptor's program is in use and every location was
    // resolved from it after link.
    unsafe {
        if let Some(loc) = desc.uniform("u_model") {
            gl.uniform_matrix_4_f32_slice(Some(loc), false, &u.model.to_cols_array());
        }
        if let Some(loc) = desc.uniform("u_projection") {
            gl.uniform_matrix_4_f32_slice(Some(loc), false, &u.projection.to_cols_array());
        }
        if let Some(loc) = desc.uniform("u_normal_matrix") {
            gl.uniform_matrix_3_f32_slice(Some(loc), false, &u.normal_matrix.to_cols_array());
        }
        if let Some(loc) = desc.uniform("u_light_matrix") {
            gl.uniform_matrix_4_f32_slice(Some(loc), false, &u.light_matrix.to_cols_array());
        }
        if let Some(loc) = desc.uniform("u_light_position") {
            gl.uniform_3_f32(
                Some(loc),
                u.light_position.x,
                u.light_position.y,
                u.light_position.z,
            );
        }
        if let Some(loc) = desc.uniform("u_light_color") {
            gl.uniform_3_f32(Some(loc), u.light_color.x, u.light_color.y, u.light_color.z);
        }
        if let Some(loc) = desc.uniform("u_ambient") {
            gl.uniform_3_f32(Some(loc), u.ambient.x, u.ambient.y, u.ambient.z);
        }
        if let Some(loc) = desc.uniform("u_aspect") {
            gl.uniform_1_f32(Some(loc), u.aspect);
        }
        if let Some(loc) = desc.uniform("u_zoom") {
            gl.uniform_1_f32(Some(loc), u.zoom);
        }
        if let Some(loc) = desc.uniform("u_shadow_map") {
            // The shadow map is always bound to texture unit 0.
            gl.uniform_1_i32(Some(loc), 0);
        }
    }
}

/// Points each resolved attribute at its buffer; returns the enabled
/// locations so the caller can disable them after drawing.
#[allow(unsafe_code)]
fn bind_attributes(
    gl: &glow::Context,
    desc: &ProgramDescriptor,
    store: &GeometryStore,
) -> Vec<u32> {
    let mut enabled = Vec::new();
    for &name in desc.kind().attribute_names() {
        let Some(location) = desc.attribute(name) else {
            continue;
        };
        let buffer = match name {
            "a_position" => store.positions(),
            "a_normal" => store.normals(),
            _ => continue,
        };
        // SAFETY: buffer and location are live handles; the pointer layout
        // matches the tightly packed vec3 upload.
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            gl.vertex_attrib_pointer_f32(location, 3, glow::FLOAT, false, 0, 0);
            gl.enable_vertex_attrib_array(location);
        }
        enabled.push(location);
    }
    enabled
}

/// Runs one pass: activates the program, uploads uniforms, binds
/// attributes, and issues the draw calls. Returns whether the pass drew.
///
/// A missing program skips the pass with a logged diagnostic; one failed
/// shader must never take the rest of the frame down with it.
#[allow(unsafe_code)]
fn execute_pass(
    gl: &glow::Context,
    library: &ShaderLibrary,
    store: &GeometryStore,
    kind: ProgramKind,
    uniforms: &FrameUniforms,
    draws: &[DrawCall],
) -> bool {
    let Some(desc) = library.get(kind) else {
        log::warn!("pass '{}' skipped: program unavailable", kind.name());
        return false;
    };

    // SAFETY: all handles below come from live engine-owned resources.
    unsafe { gl.use_program(Some(desc.program())) };
    apply_uniforms(gl, desc, uniforms);

    if kind.attribute_names().is_empty() {
        store.bind_empty(gl);
    } else {
        store.bind_mesh(gl);
    }
    let enabled = bind_attributes(gl, desc, store);

    for draw in draws {
        match *draw {
            DrawCall::Elements {
                buffer,
                mode,
                count,
                byte_offset,
            } => {
                let handle = match buffer {
                    IndexBuffer::Faces => store.face_indices(),
                    IndexBuffer::Edges => store.edge_indices(),
                };
                // SAFETY: the index buffer holds u16 indices covering the
                // requested range.
                unsafe {
                    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(handle));
                    gl.draw_elements(mode, count, glow::UNSIGNED_SHORT, byte_offset);
                }
            }
            DrawCall::Arrays { mode, first, count } => {
                // SAFETY: the vertex stage generates positions from
                // gl_VertexID, so no attribute state is read.
                unsafe { gl.draw_arrays(mode, first, count) };
            }
        }
    }

    for location in enabled {
        // SAFETY: location was enabled above on the bound vertex array.
        unsafe { gl.disable_vertex_attrib_array(location) };
    }
    true
}

/// Owns all GPU resources and drives the per-frame pass sequence.
pub struct ViewerEngine {
    geometry: GeometryStore,
    library: ShaderLibrary,
    shadow: ShadowTarget,
    probe: OcclusionProbe,
}

impl ViewerEngine {
    /// Builds every GPU resource up front.
    ///
    /// # Errors
    ///
    /// Any failure aborts initialization and releases whatever was
    /// already created; the engine is never left half-built.
    pub fn new(ctx: &GpuContext) -> Result<Self, EngineError> {
        let gl = ctx.gl();

        let geometry = GeometryStore::new(gl)?;
        let library = match ShaderLibrary::compile_all(gl) {
            Ok(library) => library,
            Err(e) => {
                geometry.destroy(gl);
                return Err(e.into());
            }
        };
        let shadow = match ShadowTarget::new(gl, config::SHADOW_MAP_SIZE) {
            Ok(shadow) => shadow,
            Err(e) => {
                library.destroy(gl);
                geometry.destroy(gl);
                return Err(e);
            }
        };
        let probe = match OcclusionProbe::new(gl) {
            Ok(probe) => probe,
            Err(e) => {
                shadow.destroy(gl);
                library.destroy(gl);
                geometry.destroy(gl);
                return Err(e);
            }
        };

        Ok(Self {
            geometry,
            library,
            shadow,
            probe,
        })
    }

    /// Renders one frame from the current engine state.
    #[allow(unsafe_code)]
    pub fn frame(&mut self, ctx: &GpuContext, state: &mut EngineState) {
        let gl = ctx.gl();
        let width = state.camera.width() as i32;
        let height = state.camera.height() as i32;

        // SAFETY: fixed-function state setup with no pointer arguments.
        unsafe {
            gl.viewport(0, 0, width, height);
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear_depth_f32(1.0);
            gl.enable(glow::DEPTH_TEST);
            // LEQUAL instead of LESS so the shadow comparison pass can
            // re-draw the faces at identical depth.
            gl.depth_func(glow::LEQUAL);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        // The camera never moves; the model matrix carries the cube into
        // view and applies the trackball orientation.
        let model = Mat4::from_translation(Vec3::new(0.0, 0.0, -config::CAMERA_DISTANCE))
            * Mat4::from_quat(state.orientation.orientation());
        let projection = state.camera.projection_matrix();
        let light_position = Vec3::from(config::LIGHT_POSITION);
        let light_matrix = Mat4::perspective_rh_gl(SHADOW_FOV_RADIANS, 1.0, SHADOW_NEAR, SHADOW_FAR)
            * Mat4::look_at_rh(
                light_position,
                Vec3::new(0.0, 0.0, -config::CAMERA_DISTANCE),
                Vec3::Y,
            );

        let uniforms = FrameUniforms {
            model,
            projection,
            normal_matrix: Mat3::from_mat4(model.inverse().transpose()),
            light_matrix,
            light_position,
            light_color: Vec3::from(config::LIGHT_COLOR),
            ambient: Vec3::from(config::AMBIENT_COLOR),
            aspect: state.camera.aspect(),
            zoom: state.camera.zoom(),
        };

        // Cull in camera space: the view matrix is the identity, so the
        // model transform alone places vertices in the space the planes
        // were extracted for.
        let planes = culling::frustum_planes(projection);
        let camera_space: Vec<Vec3> = geometry::POSITIONS
            .iter()
            .map(|&p| model.transform_point3(Vec3::from(p)))
            .collect();
        let visible_faces: Vec<usize> = (0..geometry::FACE_COUNT)
            .filter(|&face| {
                culling::face_visible(geometry::face_indices(face), &camera_space, &planes)
            })
            .collect();

        // Pass 1: solid lit faces, one draw per visible face.
        let solid_draws: Vec<DrawCall> = visible_faces
            .iter()
            .map(|&face| DrawCall::Elements {
                buffer: IndexBuffer::Faces,
                mode: glow::TRIANGLES,
                count: geometry::INDICES_PER_FACE as i32,
                byte_offset: geometry::face_byte_offset(face),
            })
            .collect();
        execute_pass(
            gl,
            &self.library,
            &self.geometry,
            ProgramKind::SolidLit,
            &uniforms,
            &solid_draws,
        );

        // Pass 2: wireframe edges.
        execute_pass(
            gl,
            &self.library,
            &self.geometry,
            ProgramKind::Wireframe,
            &uniforms,
            &[DRAW_ALL_EDGES],
        );

        // Pass 3: triangulation overlay, only while toggled on.
        if state.mesh_overlay {
            execute_pass(
                gl,
                &self.library,
                &self.geometry,
                ProgramKind::MeshOverlay,
                &uniforms,
                &[DRAW_FACES_AS_LINES],
            );
        }

        // Pass 4: ray-marched sphere over a fullscreen triangle. It writes
        // gl_FragDepth, so it composes with the cube under the depth test.
        execute_pass(
            gl,
            &self.library,
            &self.geometry,
            ProgramKind::RayMarch,
            &uniforms,
            &[DRAW_FULLSCREEN],
        );

        // Pass 5a: depth-only pre-pass into the shadow map, drawing the
        // cube from the light. The flat probe program doubles as the depth
        // writer with the light matrix standing in for the projection.
        self.shadow.bind(gl);
        // SAFETY: clears the bound shadow framebuffer's depth attachment.
        unsafe { gl.clear(glow::DEPTH_BUFFER_BIT) };
        let light_view = FrameUniforms {
            projection: light_matrix,
            ..uniforms
        };
        execute_pass(
            gl,
            &self.library,
            &self.geometry,
            ProgramKind::OcclusionProbe,
            &light_view,
            &[DRAW_ALL_FACES],
        );
        // SAFETY: restores the default framebuffer and its viewport.
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            gl.viewport(0, 0, width, height);
        }

        // Pass 5b: re-draw the faces with the shadow comparison applied.
        // SAFETY: binds the engine-owned depth texture to unit 0.
        unsafe {
            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.shadow.texture()));
        }
        execute_pass(
            gl,
            &self.library,
            &self.geometry,
            ProgramKind::ShadowPcf,
            &uniforms,
            &[DRAW_ALL_FACES],
        );
        // SAFETY: unbinds the depth texture from unit 0.
        unsafe { gl.bind_texture(glow::TEXTURE_2D, None) };

        // Pass 6: occlusion probe. Poll the previous query without
        // blocking, then wrap an invisible redundant draw in a fresh query
        // when a slot is free.
        let verdict = self.probe.poll(gl);
        if self.probe.can_issue() {
            // SAFETY: write masks gate the probe draw out of the image.
            unsafe {
                gl.color_mask(false, false, false, false);
                gl.depth_mask(false);
            }
            self.probe.begin(gl);
            execute_pass(
                gl,
                &self.library,
                &self.geometry,
                ProgramKind::OcclusionProbe,
                &uniforms,
                &[DRAW_ALL_FACES],
            );
            self.probe.end(gl);
            // SAFETY: restores write masks for the next frame's clear.
            unsafe {
                gl.color_mask(true, true, true, true);
                gl.depth_mask(true);
            }
        }
        // Final conditional re-draw, gated on available && passed.
        if verdict == Some(true) {
            execute_pass(
                gl,
                &self.library,
                &self.geometry,
                ProgramKind::SolidLit,
                &uniforms,
                &[DRAW_ALL_FACES],
            );
        }
    }

    /// Releases every GPU resource.
    pub fn destroy(&self, ctx: &GpuContext) {
        let gl = ctx.gl();
        self.probe.destroy(gl);
        self.shadow.destroy(gl);
        self.library.destroy(gl);
        self.geometry.destroy(gl);
    }
}
