//! Drawing seam between the chart and whatever it paints on.
//!
//! On wasm the chart draws into a `<canvas>` 2d context. Natively (tests, and
//! any non-browser build of the crate) it draws into a [`RecordingSurface`]
//! that keeps the command list for inspection.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    CurveTo {
        c1: (f64, f64),
        c2: (f64, f64),
        to: (f64, f64),
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("canvas element `{0}` not found")]
    MissingCanvas(String),

    #[error("2d rendering context unavailable")]
    NoContext,

    #[error("surface has zero size")]
    ZeroSize,
}

pub trait ChartSurface {
    /// Acquire the drawing context and report the drawable size in pixels.
    fn prepare(&mut self) -> Result<(f64, f64), SurfaceError>;
    fn clear(&mut self, background: &str);
    fn stroke_path(&mut self, ops: &[PathOp], color: &str, width: f64);
    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: &str);
    fn fill_rect(&mut self, origin: (f64, f64), size: (f64, f64), color: &str);
    fn fill_text(&mut self, text: &str, at: (f64, f64), color: &str, align: TextAlign);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(String),
    Path {
        ops: Vec<PathOp>,
        color: String,
        width: f64,
    },
    Circle {
        center: (f64, f64),
        radius: f64,
        color: String,
    },
    Rect {
        origin: (f64, f64),
        size: (f64, f64),
        color: String,
    },
    Text {
        text: String,
        at: (f64, f64),
        align: TextAlign,
    },
}

/// In-memory surface that records draw calls.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
    pub prepare_calls: usize,
    /// Simulate a canvas whose context cannot be acquired.
    pub unavailable: bool,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            prepare_calls: 0,
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new(0.0, 0.0)
        }
    }

    /// Commands since the most recent clear, i.e. the current frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear(_)))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn texts(&self) -> Vec<&str> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self, color: &str) -> Vec<(f64, f64)> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { center, color: c, .. } if c == color => Some(*center),
                _ => None,
            })
            .collect()
    }

    pub fn paths(&self, color: &str) -> Vec<&[PathOp]> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Path { ops, color: c, .. } if c == color => Some(ops.as_slice()),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(800.0, 400.0)
    }
}

impl ChartSurface for RecordingSurface {
    fn prepare(&mut self) -> Result<(f64, f64), SurfaceError> {
        self.prepare_calls += 1;
        if self.unavailable {
            return Err(SurfaceError::NoContext);
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(SurfaceError::ZeroSize);
        }
        Ok((self.width, self.height))
    }

    fn clear(&mut self, background: &str) {
        self.commands.push(DrawCommand::Clear(background.to_string()));
    }

    fn stroke_path(&mut self, ops: &[PathOp], color: &str, width: f64) {
        self.commands.push(DrawCommand::Path {
            ops: ops.to_vec(),
            color: color.to_string(),
            width,
        });
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: &str) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_rect(&mut self, origin: (f64, f64), size: (f64, f64), color: &str) {
        self.commands.push(DrawCommand::Rect {
            origin,
            size,
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, at: (f64, f64), _color: &str, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            align,
        });
    }
}

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

#[cfg(target_arch = "wasm32")]
mod canvas {
    use wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use super::{ChartSurface, PathOp, SurfaceError, TextAlign};

    const FONT: &str = "12px Inter, system-ui, sans-serif";

    /// `<canvas>`-backed surface, looked up by element id.
    pub struct CanvasSurface {
        canvas_id: String,
        canvas: Option<HtmlCanvasElement>,
        ctx: Option<CanvasRenderingContext2d>,
    }

    impl CanvasSurface {
        pub fn new(canvas_id: &str) -> Self {
            Self {
                canvas_id: canvas_id.to_string(),
                canvas: None,
                ctx: None,
            }
        }
    }

    impl ChartSurface for CanvasSurface {
        fn prepare(&mut self) -> Result<(f64, f64), SurfaceError> {
            let canvas: HtmlCanvasElement = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(&self.canvas_id))
                .and_then(|el| el.dyn_into().ok())
                .ok_or_else(|| SurfaceError::MissingCanvas(self.canvas_id.clone()))?;

            // Match the backing store to the laid-out size so text stays crisp.
            let width = canvas.client_width().max(0) as u32;
            let height = canvas.client_height().max(0) as u32;
            if width > 0 && height > 0 {
                canvas.set_width(width);
                canvas.set_height(height);
            }

            let ctx: CanvasRenderingContext2d = canvas
                .get_context("2d")
                .map_err(|_| SurfaceError::NoContext)?
                .ok_or(SurfaceError::NoContext)?
                .dyn_into()
                .map_err(|_| SurfaceError::NoContext)?;

            let size = (canvas.width() as f64, canvas.height() as f64);
            if size.0 <= 0.0 || size.1 <= 0.0 {
                return Err(SurfaceError::ZeroSize);
            }
            self.canvas = Some(canvas);
            self.ctx = Some(ctx);
            Ok(size)
        }

        fn clear(&mut self, background: &str) {
            let (Some(ctx), Some(canvas)) = (self.ctx.as_ref(), self.canvas.as_ref()) else {
                return;
            };
            ctx.set_fill_style_str(background);
            ctx.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
        }

        fn stroke_path(&mut self, ops: &[PathOp], color: &str, width: f64) {
            let Some(ctx) = self.ctx.as_ref() else {
                return;
            };
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(width);
            ctx.begin_path();
            for op in ops {
                match *op {
                    PathOp::MoveTo(x, y) => ctx.move_to(x, y),
                    PathOp::LineTo(x, y) => ctx.line_to(x, y),
                    PathOp::CurveTo { c1, c2, to } => {
                        ctx.bezier_curve_to(c1.0, c1.1, c2.0, c2.1, to.0, to.1)
                    }
                }
            }
            ctx.stroke();
        }

        fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: &str) {
            let Some(ctx) = self.ctx.as_ref() else {
                return;
            };
            ctx.set_fill_style_str(color);
            ctx.begin_path();
            let _ = ctx.arc(center.0, center.1, radius, 0.0, std::f64::consts::TAU);
            ctx.fill();
        }

        fn fill_rect(&mut self, origin: (f64, f64), size: (f64, f64), color: &str) {
            let Some(ctx) = self.ctx.as_ref() else {
                return;
            };
            ctx.set_fill_style_str(color);
            ctx.fill_rect(origin.0, origin.1, size.0, size.1);
        }

        fn fill_text(&mut self, text: &str, at: (f64, f64), color: &str, align: TextAlign) {
            let Some(ctx) = self.ctx.as_ref() else {
                return;
            };
            ctx.set_fill_style_str(color);
            ctx.set_font(FONT);
            ctx.set_text_align(align.as_str());
            let _ = ctx.fill_text(text, at.0, at.1);
        }
    }
}
