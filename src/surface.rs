//! The 2D drawing seam the particle field renders through.
//!
//! `ParticleField::step` only ever talks to a [`Surface`]. In the browser that
//! is a `CanvasRenderingContext2d`; in tests and headless hosts it is a
//! [`FrameRecorder`] that keeps every call as a [`DrawCommand`].

use crate::color::Color;
use std::convert::Infallible;
use std::f64::consts::PI;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// Immediate-mode drawing target.
pub trait Surface {
    type Error;

    /// Clears the rectangle `(0, 0, width, height)`.
    fn clear(&mut self, width: f64, height: f64) -> Result<(), Self::Error>;

    /// Strokes a single segment with the given color, alpha, and line width.
    fn line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        alpha: f64,
        width: f64,
    ) -> Result<(), Self::Error>;

    /// Fills a circle of `radius` centered on `center`.
    fn circle(
        &mut self,
        center: [f64; 2],
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), Self::Error>;
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        alpha: f64,
        width: f64,
    },
    Circle {
        center: [f64; 2],
        radius: f64,
        color: Color,
        alpha: f64,
    },
}

impl DrawCommand {
    pub fn is_line(&self) -> bool {
        matches!(self, DrawCommand::Line { .. })
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, DrawCommand::Circle { .. })
    }
}

#[derive(Default, Debug)]
pub struct FrameRecorder {
    commands: Vec<DrawCommand>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        FrameRecorder::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl Surface for FrameRecorder {
    type Error = Infallible;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Clear { width, height });
        Ok(())
    }

    fn line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        alpha: f64,
        width: f64,
    ) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            alpha,
            width,
        });
        Ok(())
    }

    fn circle(
        &mut self,
        center: [f64; 2],
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
        Ok(())
    }
}

// Alpha is baked into the rgba() style string, global alpha is never touched.
// The &JsValue style setters are deprecated upstream but are the only ones 0.3.44 has
#[allow(deprecated)]
impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        alpha: f64,
        width: f64,
    ) -> Result<(), JsValue> {
        self.set_line_width(width);
        self.set_stroke_style(&JsValue::from_str(&color.to_css_rgba(alpha)));
        self.begin_path();
        self.move_to(from[0], from[1]);
        self.line_to(to[0], to[1]);
        self.stroke();
        Ok(())
    }

    fn circle(
        &mut self,
        center: [f64; 2],
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), JsValue> {
        self.set_fill_style(&JsValue::from_str(&color.to_css_rgba(alpha)));
        self.begin_path();
        self.arc(center[0], center[1], radius, 0.0, PI * 2.0)?;
        self.fill();
        Ok(())
    }
}
