// Host side scheduling for the flow background. The field itself never schedules
// anything; this drives a ParticleCanvas from requestAnimationFrame and keeps it
// sized to the window

use crate::ParticleCanvas;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, HtmlCanvasElement, Window};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a running background animation.
#[wasm_bindgen]
pub struct FlowBackground {
    canvas: Rc<RefCell<ParticleCanvas>>,
    frame: FrameCallback,
    frame_id: Rc<Cell<Option<i32>>>,
    on_resize: Option<Closure<dyn FnMut()>>,
}

/// Sizes the canvas with id `canvas_id` to the window, fills it with the
/// default particle field, and starts animating it once per display frame.
/// Every window resize respawns the field at the new size.
#[wasm_bindgen]
pub fn start_flow_background(canvas_id: &str, seed: Option<u32>) -> Result<FlowBackground, JsValue> {
    let window = web_sys::window().ok_or("no global window")?;
    let document = window.document().ok_or("window has no document")?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| format!("no element with id '{}'", canvas_id))?
        .dyn_into::<HtmlCanvasElement>()?;

    let (width, height) = inner_size(&window)?;
    canvas.set_width(width);
    canvas.set_height(height);
    let canvas = Rc::new(RefCell::new(ParticleCanvas::new(canvas, seed)?));
    console::log_1(&format!("flow background started at {}x{}", width, height).into());

    let on_resize = {
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move || {
            let size = web_sys::window()
                .ok_or_else(|| JsValue::from_str("no global window"))
                .and_then(|window| inner_size(&window));
            match size {
                Ok((width, height)) => canvas.borrow_mut().resize(width, height),
                Err(err) => console::error_1(&err),
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let frame_id = Rc::new(Cell::new(None));
    {
        let next = frame.clone();
        let canvas = canvas.clone();
        let frame_id = frame_id.clone();
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            frame_id.set(None);
            if let Err(err) = canvas.borrow_mut().step() {
                console::error_1(&err);
                return;
            }
            match request_frame(&next) {
                Ok(id) => frame_id.set(Some(id)),
                Err(err) => console::error_1(&err),
            }
        }) as Box<dyn FnMut()>));
    }
    frame_id.set(Some(request_frame(&frame)?));

    Ok(FlowBackground {
        canvas,
        frame,
        frame_id,
        on_resize: Some(on_resize),
    })
}

#[wasm_bindgen]
impl FlowBackground {
    /// Cancels the pending frame and detaches the resize listener.
    pub fn stop(&mut self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no global window")?;
        if let Some(id) = self.frame_id.take() {
            window.cancel_animation_frame(id)?;
        }
        // dropping the callback also breaks its Rc cycle
        self.frame.borrow_mut().take();
        if let Some(on_resize) = self.on_resize.take() {
            window.remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        }
        Ok(())
    }

    /// True while a frame is scheduled. A failed step leaves nothing
    /// scheduled, so this goes false without a call to `stop`.
    pub fn is_running(&self) -> bool {
        self.frame_id.get().is_some()
    }

    pub fn particle_count(&self) -> usize {
        self.canvas.borrow().particle_count()
    }

    pub fn set_timing(&self, enabled: bool) {
        self.canvas.borrow_mut().set_timing(enabled);
    }
}

impl Drop for FlowBackground {
    fn drop(&mut self) {
        // an unstopped background keeps running for the life of the page
        if let Some(on_resize) = self.on_resize.take() {
            on_resize.forget();
        }
    }
}

fn request_frame(callback: &FrameCallback) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or("no global window")?;
    let callback = callback.borrow();
    let callback = callback.as_ref().ok_or("animation loop was stopped")?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}

fn inner_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or("innerWidth is not a number")?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or("innerHeight is not a number")?;
    Ok((width as u32, height as u32))
}
