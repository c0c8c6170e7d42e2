//! WASM bindings: canvas setup and input event forwarding.
//!
//! The page owns the canvas, the event listeners, and the
//! requestAnimationFrame loop; this crate reduces each of those to one
//! method call on [`CubeView`]. All real behavior lives in
//! `cubeview-core` — nothing here touches GL beyond handing the WebGL2
//! context over at construction.

use cubeview_core::render::{GpuContext, ViewerEngine};
use cubeview_core::{EngineState, InputEvent, ZoomProfile};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// The engine plus its state, owned by the page for the canvas lifetime.
#[wasm_bindgen]
pub struct CubeView {
    ctx: GpuContext,
    engine: ViewerEngine,
    state: EngineState,
}

#[wasm_bindgen]
impl CubeView {
    /// Acquires a WebGL2 context from the canvas and builds the engine.
    ///
    /// `touch` selects the touch zoom profile with its higher minimum
    /// zoom; pass `false` for mouse-driven pages.
    ///
    /// # Errors
    ///
    /// Fails when the canvas cannot provide a WebGL2 context or when
    /// engine initialization fails (shader compile/link, allocation).
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: web_sys::HtmlCanvasElement, touch: bool) -> Result<CubeView, JsValue> {
        let webgl2 = canvas
            .get_context("webgl2")
            .map_err(|_| JsValue::from_str("querying the webgl2 context failed"))?
            .ok_or_else(|| JsValue::from_str("webgl2 is not available on this canvas"))?
            .dyn_into::<web_sys::WebGl2RenderingContext>()
            .map_err(|_| JsValue::from_str("canvas context is not WebGL2"))?;

        let gl = glow::Context::from_webgl2_context(webgl2);
        let ctx = GpuContext::new(gl).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let engine = ViewerEngine::new(&ctx).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let profile = if touch {
            ZoomProfile::Touch
        } else {
            ZoomProfile::Desktop
        };
        let mut state = EngineState::new(profile);
        state.handle_event(InputEvent::ViewportResized {
            width: canvas.width(),
            height: canvas.height(),
        });

        Ok(CubeView { ctx, engine, state })
    }

    /// Renders one frame; call from the page's animation loop.
    pub fn frame(&mut self) {
        self.engine.frame(&self.ctx, &mut self.state);
    }

    /// Forwards a pointer-down at canvas coordinates.
    pub fn pointer_pressed(&mut self, x: f32, y: f32) {
        self.state.handle_event(InputEvent::PointerPressed { x, y });
    }

    /// Forwards a pointer-move at canvas coordinates.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.state.handle_event(InputEvent::PointerMoved { x, y });
    }

    /// Forwards a pointer-up.
    pub fn pointer_released(&mut self) {
        self.state.handle_event(InputEvent::PointerReleased);
    }

    /// Forwards the pointer leaving the canvas; ends any drag.
    pub fn pointer_left(&mut self) {
        self.state.handle_event(InputEvent::PointerLeft);
    }

    /// Forwards a pinch gesture's incremental scale factor.
    pub fn gesture_scale(&mut self, factor: f32) {
        self.state.handle_event(InputEvent::GestureScale { factor });
    }

    /// Forwards a canvas resize in device pixels.
    pub fn viewport_resized(&mut self, width: u32, height: u32) {
        self.state
            .handle_event(InputEvent::ViewportResized { width, height });
    }

    /// Shows or hides the triangulation overlay pass.
    pub fn set_mesh_overlay(&mut self, enabled: bool) {
        self.state.handle_event(InputEvent::ToggleMeshOverlay(enabled));
    }

    /// Legacy single-axis rotation control, in degrees about Y.
    pub fn set_rotation_degrees(&mut self, degrees: f32) {
        self.state
            .handle_event(InputEvent::SetRotationDegrees(degrees));
    }

    /// Releases every GPU resource. The page calls this when tearing the
    /// canvas down before the natural end of its lifetime.
    pub fn destroy(self) {
        self.engine.destroy(&self.ctx);
    }
}
