//! CPU-side cube mesh data.
//!
//! The cube is built from 24 vertices: each of the 6 faces owns its own
//! quad of 4 corners, unshared with neighboring faces, so every vertex can
//! carry the flat outward normal of its face. Face triangles are grouped
//! contiguously per face in the index buffer, which is what lets the
//! renderer draw (or skip) an individual face as one contiguous index range.

/// Number of vertices (6 faces x 4 unshared corners).
pub const VERTEX_COUNT: usize = 24;

/// Number of cube faces.
pub const FACE_COUNT: usize = 6;

/// Indices per face in [`FACE_INDICES`] (2 triangles x 3).
pub const INDICES_PER_FACE: usize = 6;

/// Vertex positions, four per face: front, back, top, bottom, right, left.
#[rustfmt::skip]
pub const POSITIONS: [[f32; 3]; VERTEX_COUNT] = [
    // Front (+Z)
    [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0],
    // Back (-Z)
    [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0, -1.0, -1.0],
    // Top (+Y)
    [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0], [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0],
    // Bottom (-Y)
    [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0],
    // Right (+X)
    [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0],
    // Left (-X)
    [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0],
];

/// One outward unit normal per vertex, constant across each face's quad.
#[rustfmt::skip]
pub const NORMALS: [[f32; 3]; VERTEX_COUNT] = [
    [ 0.0,  0.0,  1.0], [ 0.0,  0.0,  1.0], [ 0.0,  0.0,  1.0], [ 0.0,  0.0,  1.0],
    [ 0.0,  0.0, -1.0], [ 0.0,  0.0, -1.0], [ 0.0,  0.0, -1.0], [ 0.0,  0.0, -1.0],
    [ 0.0,  1.0,  0.0], [ 0.0,  1.0,  0.0], [ 0.0,  1.0,  0.0], [ 0.0,  1.0,  0.0],
    [ 0.0, -1.0,  0.0], [ 0.0, -1.0,  0.0], [ 0.0, -1.0,  0.0], [ 0.0, -1.0,  0.0],
    [ 1.0,  0.0,  0.0], [ 1.0,  0.0,  0.0], [ 1.0,  0.0,  0.0], [ 1.0,  0.0,  0.0],
    [-1.0,  0.0,  0.0], [-1.0,  0.0,  0.0], [-1.0,  0.0,  0.0], [-1.0,  0.0,  0.0],
];

/// Triangle indices, two triangles per face; face `i` occupies
/// `FACE_INDICES[6*i .. 6*i+6]`.
#[rustfmt::skip]
pub const FACE_INDICES: [u16; FACE_COUNT * INDICES_PER_FACE] = [
     0,  1,  2,   0,  2,  3, // front
     4,  5,  6,   4,  6,  7, // back
     8,  9, 10,   8, 10, 11, // top
    12, 13, 14,  12, 14, 15, // bottom
    16, 17, 18,  16, 18, 19, // right
    20, 21, 22,  20, 22, 23, // left
];

/// Line-segment indices for the 12 cube edges: the front quad perimeter,
/// the back quad perimeter, and the four front-to-back connectors. Edge
/// vertices reference the front and back face quads only; the coincident
/// corners owned by the other faces are not duplicated here.
#[rustfmt::skip]
pub const EDGE_INDICES: [u16; 24] = [
    0, 1,  1, 2,  2, 3,  3, 0, // front perimeter
    4, 5,  5, 6,  6, 7,  7, 4, // back perimeter
    0, 4,  1, 7,  2, 6,  3, 5, // connectors
];

/// Returns the triangle-index slice for one face.
///
/// # Panics
///
/// Panics if `face >= FACE_COUNT`.
pub fn face_indices(face: usize) -> &'static [u16] {
    assert!(face < FACE_COUNT, "face {face} out of range");
    &FACE_INDICES[face * INDICES_PER_FACE..(face + 1) * INDICES_PER_FACE]
}

/// Returns the byte offset of one face's index range inside the face index
/// buffer (indices are u16, two bytes each).
pub fn face_byte_offset(face: usize) -> i32 {
    (face * INDICES_PER_FACE * std::mem::size_of::<u16>()) as i32
}
