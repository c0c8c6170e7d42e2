//! GPU-resident cube geometry.
//!
//! `GeometryStore` uploads the CPU mesh once with a STATIC_DRAW hint and
//! is the sole owner of the resulting buffer objects — the renderer only
//! borrows handles and never creates or deletes GPU memory itself. The
//! buffers are immutable for the life of the engine.

use crate::error::EngineError;
use crate::geometry;

/// Serializes an `f32` slice into native-endian bytes for buffer upload.
fn f32_bytes(values: &[[f32; 3]]) -> Vec<u8> {
    values
        .iter()
        .flatten()
        .flat_map(|v| v.to_ne_bytes())
        .collect()
}

/// Serializes a `u16` slice into native-endian bytes for buffer upload.
fn u16_bytes(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_ne_bytes()).collect()
}

/// Owns the cube's vertex/index buffers and the two vertex array objects.
///
/// `mesh_vao` carries the attribute bindings for the indexed passes;
/// `empty_vao` is bound for the bufferless fullscreen ray-march draw.
pub struct GeometryStore {
    mesh_vao: glow::VertexArray,
    empty_vao: glow::VertexArray,
    positions: glow::Buffer,
    normals: glow::Buffer,
    face_indices: glow::Buffer,
    edge_indices: glow::Buffer,
}

impl GeometryStore {
    /// Creates the vertex arrays and uploads all four buffers.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Allocation`] if any GPU object cannot be
    /// created. Allocation failure is fatal to the engine — there is
    /// nothing to render without the cube.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context) -> Result<Self, EngineError> {
        use glow::HasContext;

        // SAFETY: glow wraps raw GL calls as unsafe. All handles come from
        // the create_* calls directly above their use; uploads bind a valid
        // buffer first.
        unsafe {
            let mesh_vao = gl.create_vertex_array().map_err(EngineError::Allocation)?;
            let empty_vao = gl.create_vertex_array().map_err(EngineError::Allocation)?;

            gl.bind_vertex_array(Some(mesh_vao));

            let positions = gl.create_buffer().map_err(EngineError::Allocation)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(positions));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                &f32_bytes(&geometry::POSITIONS),
                glow::STATIC_DRAW,
            );

            let normals = gl.create_buffer().map_err(EngineError::Allocation)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(normals));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                &f32_bytes(&geometry::NORMALS),
                glow::STATIC_DRAW,
            );

            let face_indices = gl.create_buffer().map_err(EngineError::Allocation)?;
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(face_indices));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                &u16_bytes(&geometry::FACE_INDICES),
                glow::STATIC_DRAW,
            );

            let edge_indices = gl.create_buffer().map_err(EngineError::Allocation)?;
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(edge_indices));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                &u16_bytes(&geometry::EDGE_INDICES),
                glow::STATIC_DRAW,
            );

            gl.bind_vertex_array(None);

            Ok(Self {
                mesh_vao,
                empty_vao,
                positions,
                normals,
                face_indices,
                edge_indices,
            })
        }
    }

    /// Binds the mesh vertex array for the indexed passes.
    #[allow(unsafe_code)]
    pub fn bind_mesh(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: mesh_vao is a valid handle from new().
        unsafe { gl.bind_vertex_array(Some(self.mesh_vao)) };
    }

    /// Binds the empty vertex array for the bufferless fullscreen pass.
    #[allow(unsafe_code)]
    pub fn bind_empty(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: empty_vao is a valid handle from new().
        unsafe { gl.bind_vertex_array(Some(self.empty_vao)) };
    }

    /// Position buffer handle (24 vec3s).
    pub fn positions(&self) -> glow::Buffer {
        self.positions
    }

    /// Normal buffer handle (24 vec3s, one per position).
    pub fn normals(&self) -> glow::Buffer {
        self.normals
    }

    /// Face triangle index buffer handle (36 u16s, 6 per face).
    pub fn face_indices(&self) -> glow::Buffer {
        self.face_indices
    }

    /// Edge line index buffer handle (24 u16s, 12 segments).
    pub fn edge_indices(&self) -> glow::Buffer {
        self.edge_indices
    }

    /// Deletes the vertex arrays and buffers.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: all handles are valid and deleted exactly once.
        unsafe {
            gl.delete_vertex_array(self.mesh_vao);
            gl.delete_vertex_array(self.empty_vao);
            gl.delete_buffer(self.positions);
            gl.delete_buffer(self.normals);
            gl.delete_buffer(self.face_indices);
            gl.delete_buffer(self.edge_indices);
        }
    }
}
