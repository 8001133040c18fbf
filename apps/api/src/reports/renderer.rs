//! Report document rendering.
//!
//! Serializes a [`ReportDocument`] into a self-contained PDF 1.4 file:
//! catalog, pages tree, one content stream per page, built-in Helvetica
//! Type1 fonts, xref table and trailer. No external PDF library — the
//! documents are plain paginated text, so the writer stays small.

use chrono::Utc;

use crate::reports::document::ReportDocument;

// US letter in points, 1" margins.
const PAGE_WIDTH: f64 = 612.0;
const PAGE_HEIGHT: f64 = 792.0;
const MARGIN: f64 = 72.0;

const TITLE_SIZE: f64 = 18.0;
const HEADING_SIZE: f64 = 13.0;
const BODY_SIZE: f64 = 11.0;
const LINE_FACTOR: f64 = 1.4;

// Average Helvetica glyph width as a fraction of the font size. Good enough
// for wrapping and centering plain report text.
const AVG_CHAR_WIDTH: f64 = 0.55;

/// Renders the document to PDF bytes. Infallible: any text fits, long
/// content flows onto additional pages.
pub fn render_pdf(doc: &ReportDocument) -> Vec<u8> {
    let page_streams = layout_pages(doc);
    assemble_pdf(&doc.title, &page_streams)
}

// ────────────────────────────────────────────────────────────────────────────
// Layout: document model → per-page content streams
// ────────────────────────────────────────────────────────────────────────────

struct PageWriter {
    pages: Vec<String>,
    stream: String,
    y: f64,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            stream: String::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Starts a new page if fewer than `needed` points remain below the cursor.
    fn ensure_room(&mut self, needed: f64) {
        if self.y - needed < MARGIN {
            self.pages.push(std::mem::take(&mut self.stream));
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    /// Emits one line of text at the cursor and advances it.
    fn text_line(&mut self, x: f64, font: &str, size: f64, text: &str) {
        let line_height = size * LINE_FACTOR;
        self.ensure_room(line_height);
        self.y -= line_height;
        self.stream.push_str("BT\n");
        self.stream.push_str(&format!("/{font} {size:.1} Tf\n"));
        self.stream.push_str(&format!("{x:.2} {:.2} Td\n", self.y));
        self.stream
            .push_str(&format!("({}) Tj\n", escape_pdf_string(text)));
        self.stream.push_str("ET\n");
    }

    fn gap(&mut self, points: f64) {
        self.y -= points;
    }

    fn finish(mut self) -> Vec<String> {
        self.pages.push(self.stream);
        self.pages
    }
}

fn layout_pages(doc: &ReportDocument) -> Vec<String> {
    let mut writer = PageWriter::new();

    // Centered title.
    let title_width = doc.title.chars().count() as f64 * TITLE_SIZE * AVG_CHAR_WIDTH;
    let title_x = ((PAGE_WIDTH - title_width) / 2.0).max(MARGIN);
    writer.text_line(title_x, "F2", TITLE_SIZE, &doc.title);
    writer.gap(TITLE_SIZE);

    let max_line_chars = ((PAGE_WIDTH - 2.0 * MARGIN) / (BODY_SIZE * AVG_CHAR_WIDTH)) as usize;

    for section in &doc.sections {
        // Keep a heading attached to at least one body line.
        writer.ensure_room(HEADING_SIZE * LINE_FACTOR + BODY_SIZE * LINE_FACTOR);
        writer.text_line(MARGIN, "F2", HEADING_SIZE, &section.title);
        writer.gap(HEADING_SIZE * 0.3);

        for raw_line in section.body.lines() {
            if raw_line.is_empty() {
                writer.gap(BODY_SIZE * LINE_FACTOR * 0.5);
                continue;
            }
            for line in wrap_line(raw_line, max_line_chars) {
                writer.text_line(MARGIN, "F1", BODY_SIZE, &line);
            }
        }

        writer.gap(BODY_SIZE * LINE_FACTOR);
    }

    writer.finish()
}

/// Word-wraps a single line to at most `max_chars` characters, hard-breaking
/// words longer than a whole line.
fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    let mut wrapped = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if current_len > 0 && current_len + 1 + word_len > max_chars {
            wrapped.push(std::mem::take(&mut current));
        }

        if word_len > max_chars {
            // Flush, then split the oversized word across lines.
            if !current.is_empty() {
                wrapped.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                wrapped.push(chunk.iter().collect());
            }
            continue;
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        wrapped.push(current);
    }
    if wrapped.is_empty() {
        wrapped.push(String::new());
    }
    wrapped
}

/// Escapes a string for a PDF literal. Characters outside the printable
/// ASCII range are replaced since the built-in fonts use WinAnsi encoding.
fn escape_pdf_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            '\\' => escaped.push_str("\\\\"),
            ' '..='~' => escaped.push(c),
            _ => escaped.push('?'),
        }
    }
    escaped
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly: content streams → PDF object graph
// ────────────────────────────────────────────────────────────────────────────

fn assemble_pdf(title: &str, page_streams: &[String]) -> Vec<u8> {
    let page_count = page_streams.len();
    let mut pdf = Vec::new();

    pdf.extend_from_slice(b"%PDF-1.4\n");
    pdf.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

    let mut xref_positions: Vec<usize> = Vec::new();

    // Object 1: catalog.
    xref_positions.push(pdf.len());
    pdf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    // Object 2: pages tree — position patched after the kids are known.
    let pages_slot = xref_positions.len();
    xref_positions.push(0);

    // Objects 3..: page + content stream pairs, then fonts, then info.
    let font_obj_start = 3 + page_count * 2;
    let mut page_obj_ids: Vec<usize> = Vec::new();

    for (page_idx, content_stream) in page_streams.iter().enumerate() {
        let page_obj_id = 3 + page_idx * 2;
        let content_obj_id = page_obj_id + 1;
        page_obj_ids.push(page_obj_id);

        xref_positions.push(pdf.len());
        let page_obj = format!(
            "{page_obj_id} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH:.2} {PAGE_HEIGHT:.2}] /Contents {content_obj_id} 0 R /Resources << /Font << /F1 {font_obj_start} 0 R /F2 {} 0 R >> >> >>\nendobj\n",
            font_obj_start + 1
        );
        pdf.extend_from_slice(page_obj.as_bytes());

        xref_positions.push(pdf.len());
        let content_obj = format!(
            "{content_obj_id} 0 obj\n<< /Length {} >>\nstream\n{content_stream}\nendstream\nendobj\n",
            content_stream.len()
        );
        pdf.extend_from_slice(content_obj.as_bytes());
    }

    xref_positions[pages_slot] = pdf.len();
    let kids: Vec<String> = page_obj_ids.iter().map(|id| format!("{id} 0 R")).collect();
    let pages_obj = format!(
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {page_count} >>\nendobj\n",
        kids.join(" ")
    );
    pdf.extend_from_slice(pages_obj.as_bytes());

    xref_positions.push(pdf.len());
    pdf.extend_from_slice(
        format!(
            "{font_obj_start} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>\nendobj\n"
        )
        .as_bytes(),
    );

    xref_positions.push(pdf.len());
    pdf.extend_from_slice(
        format!(
            "{} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>\nendobj\n",
            font_obj_start + 1
        )
        .as_bytes(),
    );

    let info_obj_id = font_obj_start + 2;
    xref_positions.push(pdf.len());
    let info_obj = format!(
        "{info_obj_id} 0 obj\n<< /Title ({}) /Producer (Look 4 Fundings) /CreationDate (D:{}) >>\nendobj\n",
        escape_pdf_string(title),
        Utc::now().format("%Y%m%d%H%M%S")
    );
    pdf.extend_from_slice(info_obj.as_bytes());

    // Cross-reference table and trailer.
    let xref_start = pdf.len();
    pdf.extend_from_slice(b"xref\n");
    pdf.extend_from_slice(format!("0 {}\n", xref_positions.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for pos in &xref_positions {
        pdf.extend_from_slice(format!("{pos:010} 00000 n \n").as_bytes());
    }

    pdf.extend_from_slice(b"trailer\n");
    pdf.extend_from_slice(
        format!(
            "<< /Size {} /Root 1 0 R /Info {info_obj_id} 0 R >>\n",
            xref_positions.len() + 1
        )
        .as_bytes(),
    );
    pdf.extend_from_slice(b"startxref\n");
    pdf.extend_from_slice(format!("{xref_start}\n").as_bytes());
    pdf.extend_from_slice(b"%%EOF\n");

    pdf
}
