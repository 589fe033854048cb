//! PDF Content Stream Generation
//!
//! Builder for the operators that paint a page: graphics state (q/Q, cm,
//! w), colour (rg/RG), paths (m, l, re, S, f, B, n), text (BT/ET, Tf, Tm,
//! Tj) and XObjects (Do). Coordinates are PDF user space, origin at the
//! bottom-left.

use super::encoding::encode_win_ansi;
use super::objects::format_real;
use std::io::Write;

/// Content stream builder
#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    fn op(&mut self, operands: &[f64], operator: &str) -> &mut Self {
        for n in operands {
            self.data.extend_from_slice(format_real(*n).as_bytes());
            self.data.push(b' ');
        }
        self.data.extend_from_slice(operator.as_bytes());
        self.data.push(b'\n');
        self
    }

    pub fn save_state(&mut self) -> &mut Self {
        self.op(&[], "q")
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.op(&[], "Q")
    }

    /// Concatenate a transformation matrix (cm)
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        self.op(&[a, b, c, d, e, f], "cm")
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.op(&[width], "w")
    }

    /// Fill colour from 0..=1 components (rg)
    pub fn set_fill_rgb(&mut self, r: f64, g: f64, b: f64) -> &mut Self {
        self.op(&[r, g, b], "rg")
    }

    /// Stroke colour from 0..=1 components (RG)
    pub fn set_stroke_rgb(&mut self, r: f64, g: f64, b: f64) -> &mut Self {
        self.op(&[r, g, b], "RG")
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.op(&[x, y], "m")
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.op(&[x, y], "l")
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.op(&[x, y, width, height], "re")
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.op(&[], "S")
    }

    pub fn fill(&mut self) -> &mut Self {
        self.op(&[], "f")
    }

    pub fn fill_and_stroke(&mut self) -> &mut Self {
        self.op(&[], "B")
    }

    /// End the path without painting (n)
    pub fn end_path(&mut self) -> &mut Self {
        self.op(&[], "n")
    }

    pub fn begin_text(&mut self) -> &mut Self {
        self.op(&[], "BT")
    }

    pub fn end_text(&mut self) -> &mut Self {
        self.op(&[], "ET")
    }

    /// Select a font resource and size (Tf)
    pub fn set_font(&mut self, font_name: &str, size: f64) -> &mut Self {
        let _ = write!(self.data, "/{font_name} ");
        self.op(&[size], "Tf")
    }

    /// Set the text matrix (Tm)
    pub fn set_text_matrix(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        self.op(&[a, b, c, d, e, f], "Tm")
    }

    /// Show a WinAnsi-encoded string (Tj)
    pub fn show_text(&mut self, text: &str) -> &mut Self {
        self.data.push(b'(');
        for byte in encode_win_ansi(text) {
            match byte {
                b'(' | b')' | b'\\' => {
                    self.data.push(b'\\');
                    self.data.push(byte);
                }
                0x20..=0x7E => self.data.push(byte),
                _ => {
                    let _ = write!(self.data, "\\{byte:03o}");
                }
            }
        }
        self.data.extend_from_slice(b") Tj\n");
        self
    }

    /// Paint an XObject resource (Do)
    pub fn draw_xobject(&mut self, name: &str) -> &mut Self {
        let _ = writeln!(self.data, "/{name} Do");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: ContentStream) -> String {
        String::from_utf8(content.into_bytes()).unwrap()
    }

    #[test]
    fn test_content_stream_rect() {
        let mut content = ContentStream::new();
        content
            .save_state()
            .set_fill_rgb(1.0, 0.5, 0.0)
            .rect(10.0, 20.0, 30.5, 40.0)
            .fill()
            .restore_state();
        assert_eq!(text(content), "q\n1 0.5 0 rg\n10 20 30.5 40 re\nf\nQ\n");
    }

    #[test]
    fn test_content_stream_text() {
        let mut content = ContentStream::new();
        content
            .begin_text()
            .set_font("F0", 11.0)
            .set_text_matrix(1.0, 0.0, 0.0, 1.0, 72.0, 700.25)
            .show_text("Hello (world)")
            .end_text();
        assert_eq!(
            text(content),
            "BT\n/F0 11 Tf\n1 0 0 1 72 700.25 Tm\n(Hello \\(world\\)) Tj\nET\n"
        );
    }

    #[test]
    fn test_show_text_encodes_bullet() {
        let mut content = ContentStream::new();
        content.show_text("\u{2022} A");
        assert_eq!(text(content), "(\\225 A) Tj\n");
    }

    #[test]
    fn test_draw_xobject() {
        let mut content = ContentStream::new();
        content.transform(50.0, 0.0, 0.0, 20.0, 72.0, 700.0).draw_xobject("Im0");
        assert_eq!(text(content), "50 0 0 20 72 700 cm\n/Im0 Do\n");
    }
}
