//! Off-screen depth target for the shadow map.
//!
//! `ShadowTarget` pairs a framebuffer with a square depth texture. The
//! shadow pre-pass renders the cube from the light into it; the shadow-PCF
//! program then samples the texture as plain depth values (compare mode
//! off, nearest filtering) for its single-tap comparison.

use crate::error::EngineError;

/// A depth-only framebuffer sized for the shadow map.
pub struct ShadowTarget {
    fbo: glow::Framebuffer,
    texture: glow::Texture,
    size: u32,
}

impl ShadowTarget {
    /// Creates the depth texture, attaches it to a fresh framebuffer, and
    /// verifies completeness.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Allocation`] if the texture or framebuffer
    /// cannot be created or the framebuffer is incomplete.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context, size: u32) -> Result<Self, EngineError> {
        use glow::HasContext;

        // SAFETY: glow wraps raw GL calls as unsafe. Handles are created
        // above their use and cleaned up on every failure path.
        unsafe {
            let texture = gl.create_texture().map_err(EngineError::Allocation)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::DEPTH_COMPONENT24 as i32,
                size as i32,
                size as i32,
                0,
                glow::DEPTH_COMPONENT,
                glow::UNSIGNED_INT,
                glow::PixelUnpackData::Slice(None),
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            let fbo = match gl.create_framebuffer() {
                Ok(f) => f,
                Err(e) => {
                    gl.delete_texture(texture);
                    return Err(EngineError::Allocation(e));
                }
            };

            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::DEPTH_ATTACHMENT,
                glow::TEXTURE_2D,
                Some(texture),
                0,
            );
            // Depth-only target: no color attachment to draw or read.
            gl.draw_buffers(&[glow::NONE]);
            gl.read_buffer(glow::NONE);

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);

            if status != glow::FRAMEBUFFER_COMPLETE {
                gl.delete_framebuffer(fbo);
                gl.delete_texture(texture);
                return Err(EngineError::Allocation(format!(
                    "shadow framebuffer incomplete: status 0x{status:04X}"
                )));
            }

            Ok(Self { fbo, texture, size })
        }
    }

    /// Binds the framebuffer for the depth pre-pass and sets the viewport
    /// to the map size.
    #[allow(unsafe_code)]
    pub fn bind(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: fbo is a valid handle from new().
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.fbo));
            gl.viewport(0, 0, self.size as i32, self.size as i32);
        }
    }

    /// Depth texture handle for sampling in the shadow-PCF pass.
    pub fn texture(&self) -> glow::Texture {
        self.texture
    }

    /// Side length of the square map in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Deletes the framebuffer and depth texture.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: both handles are valid and deleted exactly once.
        unsafe {
            gl.delete_framebuffer(self.fbo);
            gl.delete_texture(self.texture);
        }
    }
}
