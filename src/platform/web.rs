//! requestAnimationFrame-backed frame scheduling

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::clock::{FrameId, FrameScheduler};

/// Schedules frames with `window.requestAnimationFrame`
///
/// The callback is installed after construction because it usually needs a
/// weak handle back to the loop that owns this scheduler.
#[derive(Default)]
pub struct AnimationFrameScheduler {
    callback: Option<Closure<dyn FnMut(f64)>>,
}

impl AnimationFrameScheduler {
    pub fn new() -> Self {
        Self { callback: None }
    }

    pub fn set_callback(&mut self, callback: Closure<dyn FnMut(f64)>) {
        self.callback = Some(callback);
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) -> FrameId {
        let (Some(window), Some(callback)) = (web_sys::window(), self.callback.as_ref()) else {
            log::error!("Cannot schedule frame: no window or callback installed");
            return FrameId(0);
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(handle) => FrameId(handle),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                FrameId(0)
            }
        }
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(id.0);
        }
    }
}
