//! Drawing surface abstraction
//!
//! Renderers paint through the [`Canvas`] trait rather than against a
//! concrete backend. [`DisplayList`] records draw commands so a render pass
//! can be composed off-screen and replayed onto a target only when the
//! whole pass succeeds; [`svg::SvgCanvas`] writes an SVG document.

use nalgebra::Point2;

pub mod svg;

pub use svg::SvgCanvas;

/// sRGB color used for strokes, fills, and text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Hex triplet form, e.g. `#00CCFF`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Horizontal anchoring of drawn text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A drawing surface the renderers can paint on
pub trait Canvas {
    /// Reset the surface to its blank state
    fn clear(&mut self);

    /// Stroke a line segment
    fn line(&mut self, from: Point2<f64>, to: Point2<f64>, color: Color, width: f64);

    /// Stroke a circle outline
    fn circle(&mut self, center: Point2<f64>, radius: f64, color: Color, width: f64);

    /// Fill a circle
    fn fill_circle(&mut self, center: Point2<f64>, radius: f64, color: Color);

    /// Stroke a rectangle outline from its top-left corner
    fn rect(&mut self, origin: Point2<f64>, width: f64, height: f64, color: Color, stroke: f64);

    /// Fill a rectangle from its top-left corner
    fn fill_rect(&mut self, origin: Point2<f64>, width: f64, height: f64, color: Color);

    /// Draw text anchored at a baseline point
    fn text(&mut self, content: &str, at: Point2<f64>, size: f64, color: Color, align: TextAlign);
}

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear,
    Line {
        from: Point2<f64>,
        to: Point2<f64>,
        color: Color,
        width: f64,
    },
    Circle {
        center: Point2<f64>,
        radius: f64,
        color: Color,
        width: f64,
    },
    FillCircle {
        center: Point2<f64>,
        radius: f64,
        color: Color,
    },
    Rect {
        origin: Point2<f64>,
        width: f64,
        height: f64,
        color: Color,
        stroke: f64,
    },
    FillRect {
        origin: Point2<f64>,
        width: f64,
        height: f64,
        color: Color,
    },
    Text {
        content: String,
        at: Point2<f64>,
        size: f64,
        color: Color,
        align: TextAlign,
    },
}

/// Recording canvas: a flat list of draw commands
///
/// Render passes compose into a fresh display list and replay it onto the
/// real target only on success, so an ephemeris failure mid-pass never
/// leaves a half-painted frame.
#[derive(Debug, Default)]
pub struct DisplayList {
    commands: Vec<DrawCmd>,
}

impl DisplayList {
    pub fn new() -> Self {
        DisplayList {
            commands: Vec::new(),
        }
    }

    /// Recorded commands in draw order
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay every recorded command onto another canvas
    pub fn replay(&self, target: &mut dyn Canvas) {
        for cmd in &self.commands {
            match cmd {
                DrawCmd::Clear => target.clear(),
                DrawCmd::Line {
                    from,
                    to,
                    color,
                    width,
                } => target.line(*from, *to, *color, *width),
                DrawCmd::Circle {
                    center,
                    radius,
                    color,
                    width,
                } => target.circle(*center, *radius, *color, *width),
                DrawCmd::FillCircle {
                    center,
                    radius,
                    color,
                } => target.fill_circle(*center, *radius, *color),
                DrawCmd::Rect {
                    origin,
                    width,
                    height,
                    color,
                    stroke,
                } => target.rect(*origin, *width, *height, *color, *stroke),
                DrawCmd::FillRect {
                    origin,
                    width,
                    height,
                    color,
                } => target.fill_rect(*origin, *width, *height, *color),
                DrawCmd::Text {
                    content,
                    at,
                    size,
                    color,
                    align,
                } => target.text(content, *at, *size, *color, *align),
            }
        }
    }
}

impl Canvas for DisplayList {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCmd::Clear);
    }

    fn line(&mut self, from: Point2<f64>, to: Point2<f64>, color: Color, width: f64) {
        self.commands.push(DrawCmd::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn circle(&mut self, center: Point2<f64>, radius: f64, color: Color, width: f64) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: Point2<f64>, radius: f64, color: Color) {
        self.commands.push(DrawCmd::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn rect(&mut self, origin: Point2<f64>, width: f64, height: f64, color: Color, stroke: f64) {
        self.commands.push(DrawCmd::Rect {
            origin,
            width,
            height,
            color,
            stroke,
        });
    }

    fn fill_rect(&mut self, origin: Point2<f64>, width: f64, height: f64, color: Color) {
        self.commands.push(DrawCmd::FillRect {
            origin,
            width,
            height,
            color,
        });
    }

    fn text(&mut self, content: &str, at: Point2<f64>, size: f64, color: Color, align: TextAlign) {
        self.commands.push(DrawCmd::Text {
            content: content.to_string(),
            at,
            size,
            color,
            align,
        });
    }
}
