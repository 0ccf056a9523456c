//! Draw commands produced by the simulation and the canvas painter that
//! replays them. Keeping the simulation output as plain data lets the
//! frame logic run (and be tested) without a browser.

use std::f64::consts::TAU;
use std::fmt;

use web_sys::CanvasRenderingContext2d;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba { rgb: self, alpha }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

/// CSS color string, e.g. `rgba(12, 200, 7, 0.5)`.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb { r, g, b } = self.rgb;
        write!(f, "rgba({r}, {g}, {b}, {})", self.alpha)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawCommand {
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Rgba,
    },
}

pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    pub fn paint(&self, commands: &[DrawCommand]) {
        for cmd in commands {
            match cmd {
                DrawCommand::FillRect { x, y, width, height, color } => {
                    self.ctx.set_fill_style_str(&color.to_string());
                    self.ctx.fill_rect(*x, *y, *width, *height);
                }
                DrawCommand::Circle { x, y, radius, color } => {
                    self.ctx.begin_path();
                    // arc only fails on a negative radius
                    self.ctx.arc(*x, *y, *radius, 0.0, TAU).ok();
                    self.ctx.set_fill_style_str(&color.to_string());
                    self.ctx.fill();
                    self.ctx.close_path();
                }
            }
        }
    }
}
