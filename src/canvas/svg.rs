//! SVG canvas backend
//!
//! Accumulates draw commands as SVG elements over a black background; the
//! finished document is retrieved with [`SvgCanvas::document`].

use nalgebra::Point2;

use super::{Canvas, Color, TextAlign};

/// Canvas writing an SVG document
#[derive(Debug)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    elements: Vec<String>,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        SvgCanvas {
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Complete SVG document for the commands drawn so far
    pub fn document(&self) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" \
             viewBox=\"0 0 {} {}\">\n",
            self.width, self.height, self.width, self.height
        );
        out.push_str(&format!(
            "  <rect width=\"{}\" height=\"{}\" fill=\"black\"/>\n",
            self.width, self.height
        ));
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    fn anchor(align: TextAlign) -> &'static str {
        match align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        }
    }
}

impl Canvas for SvgCanvas {
    fn clear(&mut self) {
        self.elements.clear();
    }

    fn line(&mut self, from: Point2<f64>, to: Point2<f64>, color: Color, width: f64) {
        self.elements.push(format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" \
             stroke=\"{}\" stroke-width=\"{}\"/>",
            from.x,
            from.y,
            to.x,
            to.y,
            color.to_hex(),
            width
        ));
    }

    fn circle(&mut self, center: Point2<f64>, radius: f64, color: Color, width: f64) {
        self.elements.push(format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"none\" \
             stroke=\"{}\" stroke-width=\"{}\"/>",
            center.x,
            center.y,
            radius,
            color.to_hex(),
            width
        ));
    }

    fn fill_circle(&mut self, center: Point2<f64>, radius: f64, color: Color) {
        self.elements.push(format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
            center.x,
            center.y,
            radius,
            color.to_hex()
        ));
    }

    fn rect(&mut self, origin: Point2<f64>, width: f64, height: f64, color: Color, stroke: f64) {
        self.elements.push(format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" \
             stroke=\"{}\" stroke-width=\"{}\"/>",
            origin.x,
            origin.y,
            width,
            height,
            color.to_hex(),
            stroke
        ));
    }

    fn fill_rect(&mut self, origin: Point2<f64>, width: f64, height: f64, color: Color) {
        self.elements.push(format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
            origin.x,
            origin.y,
            width,
            height,
            color.to_hex()
        ));
    }

    fn text(&mut self, content: &str, at: Point2<f64>, size: f64, color: Color, align: TextAlign) {
        let escaped = content
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        self.elements.push(format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{}\" fill=\"{}\" \
             text-anchor=\"{}\">{}</text>",
            at.x,
            at.y,
            size,
            color.to_hex(),
            Self::anchor(align),
            escaped
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_wraps_elements() {
        let mut canvas = SvgCanvas::new(600.0, 600.0);
        canvas.circle(Point2::new(300.0, 300.0), 240.0, Color::WHITE, 1.0);
        let doc = canvas.document();
        assert!(doc.starts_with("<svg"));
        assert!(doc.contains("r=\"240.00\""));
        assert!(doc.contains("stroke=\"#FFFFFF\""));
        assert!(doc.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_clear_resets_elements() {
        let mut canvas = SvgCanvas::new(100.0, 100.0);
        canvas.line(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Color::WHITE,
            1.0,
        );
        canvas.clear();
        assert!(!canvas.document().contains("<line"));
    }

    #[test]
    fn test_text_is_escaped_and_anchored() {
        let mut canvas = SvgCanvas::new(100.0, 100.0);
        canvas.text(
            "a<b",
            Point2::new(10.0, 10.0),
            12.0,
            Color::BLACK,
            TextAlign::Right,
        );
        let doc = canvas.document();
        assert!(doc.contains("a&lt;b"));
        assert!(doc.contains("text-anchor=\"end\""));
    }
}
