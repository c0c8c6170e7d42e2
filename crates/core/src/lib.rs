#![deny(unsafe_code)]
//! Core rendering engine for cubeview.
//!
//! Renders a single lit cube through an OpenGL ES 3.0 / WebGL2 context with
//! trackball rotation, pinch zoom, per-face frustum culling, and an ordered
//! multi-pass draw sequence (solid, wireframe, mesh overlay, SDF ray-march,
//! shadow-mapped, occlusion-probe gated re-draw).
//!
//! The math and state modules (`camera`, `orientation`, `culling`,
//! `geometry`, `input`) have no GPU dependency and are always compiled.
//! The GL-backed pipeline lives in [`render`] behind the `render` feature.

pub mod camera;
pub mod config;
pub mod culling;
pub mod error;
pub mod geometry;
pub mod input;
pub mod orientation;

#[cfg(feature = "render")]
pub mod render;

pub use camera::Camera;
pub use config::ZoomProfile;
pub use culling::{face_visible, frustum_planes, Plane};
pub use error::EngineError;
pub use input::{EngineState, InputEvent};
pub use orientation::OrientationController;
