mod animation;
pub mod color;
pub mod config;
pub mod field;
pub mod particle;
pub mod surface;
mod timer;
mod utils;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement};

pub use animation::{start_flow_background, FlowBackground};
pub use color::Color;
pub use config::FieldConfig;
pub use field::{Connection, ParticleField};
pub use particle::Particle;
pub use surface::{DrawCommand, FrameRecorder, Surface};
use timer::Timer;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

/// A particle field bound to a 2d canvas on the page.
#[wasm_bindgen]
pub struct ParticleCanvas {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    field: ParticleField<StdRng>,
    timing: bool,
}

#[wasm_bindgen]
impl ParticleCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, seed: Option<u32>) -> Result<ParticleCanvas, JsValue> {
        ParticleCanvas::with_particle_count(canvas, FieldConfig::DEFAULT_PARTICLE_COUNT, seed)
    }

    pub fn with_particle_count(
        canvas: HtmlCanvasElement,
        count: usize,
        seed: Option<u32>,
    ) -> Result<ParticleCanvas, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed as u64),
            None => StdRng::from_entropy(),
        };
        let field = ParticleField::with_config(
            FieldConfig::default().with_particle_count(count),
            canvas.width() as f64,
            canvas.height() as f64,
            rng,
        );
        Ok(ParticleCanvas {
            canvas,
            context,
            field,
            timing: false,
        })
    }

    /// Sets the canvas pixel size and respawns every particle for it.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.field.resize(width as f64, height as f64);
        console::log_1(&format!("flow canvas resized to {}x{}", width, height).into());
    }

    /// Draws the current frame onto the canvas and advances one tick.
    pub fn step(&mut self) -> Result<(), JsValue> {
        let _timer = if self.timing {
            Some(Timer::new("ParticleCanvas::step"))
        } else {
            None
        };
        self.field.step(&mut self.context)
    }

    pub fn set_timing(&mut self, enabled: bool) {
        self.timing = enabled;
    }

    pub fn particle_count(&self) -> usize {
        self.field.len()
    }

    pub fn width(&self) -> f64 {
        self.field.width()
    }

    pub fn height(&self) -> f64 {
        self.field.height()
    }
}

impl ParticleCanvas {
    pub fn field(&self) -> &ParticleField<StdRng> {
        &self.field
    }
}
