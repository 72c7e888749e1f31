//! Minimal PDF emitter for single-template documents.
//!
//! Writes uncompressed PDF 1.4 with the two built-in Helvetica fonts and a
//! small set of drawing primitives (text, lines, rectangles, dots). This is
//! deliberately not a charting or layout library: callers place everything at
//! fixed coordinates. Coordinates use points with the origin at the top-left
//! of an A4 page; the flip to PDF's bottom-left origin happens here.

pub const A4_WIDTH: f64 = 595.0;
pub const A4_HEIGHT: f64 = 842.0;

/// Bézier circle constant.
const CIRCLE_K: f64 = 0.5523;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "/F1",
            Font::Bold => "/F2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// One page of drawing operations.
#[derive(Debug, Default)]
pub struct Page {
    ops: String,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    fn flip(y_top: f64) -> f64 {
        A4_HEIGHT - y_top
    }

    /// Draws `text` with its baseline at `y_top` points from the page top.
    pub fn text(&mut self, x: f64, y_top: f64, size: f64, font: Font, color: Rgb, text: &str) {
        self.ops.push_str(&format!(
            "BT {:.3} {:.3} {:.3} rg {} {:.1} Tf {:.2} {:.2} Td ({}) Tj ET\n",
            color.r,
            color.g,
            color.b,
            font.resource(),
            size,
            x,
            Self::flip(y_top),
            sanitize(text)
        ));
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Rgb) {
        self.ops.push_str(&format!(
            "{:.3} {:.3} {:.3} RG {:.2} w {:.2} {:.2} m {:.2} {:.2} l S\n",
            color.r,
            color.g,
            color.b,
            width,
            x1,
            Self::flip(y1),
            x2,
            Self::flip(y2)
        ));
    }

    /// Horizontal dashed line drawn with the PDF dash pattern operator.
    pub fn dashed_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Rgb) {
        self.ops.push_str("[3 3] 0 d\n");
        self.line(x1, y1, x2, y2, width, color);
        self.ops.push_str("[] 0 d\n");
    }

    /// Filled rectangle; `y_top` is the top edge.
    pub fn rect_filled(&mut self, x: f64, y_top: f64, w: f64, h: f64, color: Rgb) {
        self.ops.push_str(&format!(
            "{:.3} {:.3} {:.3} rg {:.2} {:.2} {:.2} {:.2} re f\n",
            color.r,
            color.g,
            color.b,
            x,
            Self::flip(y_top + h),
            w,
            h
        ));
    }

    /// Stroked rectangle outline; `y_top` is the top edge.
    pub fn rect_stroked(&mut self, x: f64, y_top: f64, w: f64, h: f64, width: f64, color: Rgb) {
        self.ops.push_str(&format!(
            "{:.3} {:.3} {:.3} RG {:.2} w {:.2} {:.2} {:.2} {:.2} re S\n",
            color.r,
            color.g,
            color.b,
            width,
            x,
            Self::flip(y_top + h),
            w,
            h
        ));
    }

    /// Small filled circle (data-point marker) approximated with four Bézier
    /// curves.
    pub fn dot(&mut self, cx: f64, cy_top: f64, r: f64, color: Rgb) {
        let cy = Self::flip(cy_top);
        let k = CIRCLE_K * r;
        self.ops.push_str(&format!(
            "{:.3} {:.3} {:.3} rg {:.2} {:.2} m \
             {:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c \
             {:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c \
             {:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c \
             {:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c f\n",
            color.r,
            color.g,
            color.b,
            cx + r,
            cy,
            cx + r,
            cy + k,
            cx + k,
            cy + r,
            cx,
            cy + r,
            cx - k,
            cy + r,
            cx - r,
            cy + k,
            cx - r,
            cy,
            cx - r,
            cy - k,
            cx - k,
            cy - r,
            cx,
            cy - r,
            cx + k,
            cy - r,
            cx + r,
            cy - k,
            cx + r,
            cy,
        ));
    }

    fn content_stream(&self) -> &str {
        &self.ops
    }
}

/// Serialises pages into a complete PDF document.
pub fn build_document(pages: &[Page]) -> Vec<u8> {
    // Object layout: 1 catalog, 2 page tree, 3/4 fonts, then per page a
    // content object followed by its page object.
    let mut objects: Vec<String> = Vec::new();

    let first_page_obj = 5;
    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", first_page_obj + i * 2 + 1))
        .collect();

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>".to_string());

    for (i, page) in pages.iter().enumerate() {
        let stream = page.content_stream();
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            stream.len(),
            stream
        ));
        let content_id = first_page_obj + i * 2;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.0} {:.0}] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
            A4_WIDTH, A4_HEIGHT, content_id
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        out.push_str(&format!("{:010} 00000 n \n", offset));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));

    out.into_bytes()
}

/// Escapes PDF string delimiters and maps text onto the ASCII subset the
/// built-in fonts render predictably. The bullet glyph becomes a hyphen.
fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\u{2022}' => out.push('-'),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_has_pdf_header_and_trailer() {
        let mut page = Page::new();
        page.text(50.0, 60.0, 12.0, Font::Regular, Rgb::new(0.0, 0.0, 0.0), "hello");
        let bytes = build_document(&[page]);
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("(hello) Tj"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let bytes = build_document(&[Page::new()]);
        let text = String::from_utf8(bytes).unwrap();
        let xref_pos = text.find("xref\n").unwrap();
        let offsets: Vec<usize> = text[xref_pos..]
            .lines()
            .skip(3)
            .take(6)
            .map(|line| line.split_whitespace().next().unwrap().parse().unwrap())
            .collect();
        for (i, offset) in offsets.iter().enumerate() {
            assert!(text[*offset..].starts_with(&format!("{} 0 obj", i + 1)));
        }
    }

    #[test]
    fn test_sanitize_escapes_and_maps_bullet() {
        assert_eq!(sanitize("a(b)c\\"), "a\\(b\\)c\\\\");
        assert_eq!(sanitize("\u{2022} point"), "- point");
        assert_eq!(sanitize("caf\u{e9}"), "caf?");
    }
}
