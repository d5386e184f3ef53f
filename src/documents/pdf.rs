use std::io::Write;

use crate::{Result, SuiteError};

const PAGE_WIDTH: f64 = 595.28;
const PAGE_HEIGHT: f64 = 841.89;
const MM: f64 = 72.0 / 25.4;
const MARGIN: f64 = 10.0 * MM;
const BOTTOM_MARGIN: f64 = 20.0 * MM;
const CELL_PADDING: f64 = 1.0 * MM;
const LINE_HEIGHT: f64 = 10.0 * MM;
const FONT_SIZE: f64 = 12.0;

/// Helvetica advance widths for printable ASCII, in 1/1000 em
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

fn char_width(c: char) -> f64 {
    let units = match c as u32 {
        code @ 0x20..=0x7e => HELVETICA_WIDTHS[(code - 0x20) as usize],
        _ => 556,
    };
    f64::from(units) * FONT_SIZE / 1000.0
}

fn text_width(text: &str) -> f64 {
    text.chars().map(char_width).sum()
}

/// Greedy word wrap of each input line to the given width in points
pub fn wrap_lines(text: &str, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        let raw = raw.trim_end_matches('\r');
        let mut current = String::new();

        for word in raw.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            // Break words wider than a whole line
            for c in word.chars() {
                if !current.is_empty() && text_width(&current) + char_width(c) > max_width {
                    lines.push(std::mem::take(&mut current));
                }
                current.push(c);
            }
        }

        lines.push(current);
    }

    lines
}

/// Encode a line as a PDF literal string in WinAnsi
fn pdf_string(line: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(line.len() + 2);
    out.push(b'(');
    for c in line.chars() {
        let byte = match c as u32 {
            0x80..=0x9f => b'?',
            code @ 0x20..=0xff => code as u8,
            _ => b'?',
        };
        if matches!(byte, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out.push(b')');
    out
}

fn page_content(lines: &[String]) -> Vec<u8> {
    let mut content = Vec::new();
    let mut y = MARGIN;

    for line in lines {
        if !line.is_empty() {
            let baseline = y + 0.5 * LINE_HEIGHT + 0.3 * FONT_SIZE;
            content.extend_from_slice(
                format!(
                    "BT /F1 {:.2} Tf {:.2} {:.2} Td ",
                    FONT_SIZE,
                    MARGIN + CELL_PADDING,
                    PAGE_HEIGHT - baseline
                )
                .as_bytes(),
            );
            content.extend_from_slice(&pdf_string(line));
            content.extend_from_slice(b" Tj ET\n");
        }
        y += LINE_HEIGHT;
    }

    content
}

/// Render text onto A4 pages in 12 pt Helvetica, one wrapped line per 10 mm row
pub fn write_text_pdf(text: &str) -> Result<Vec<u8>> {
    if text.trim().is_empty() {
        return Err(SuiteError::EmptyInput(
            "Please enter text to convert.".to_string(),
        ));
    }

    let usable_width = PAGE_WIDTH - 2.0 * MARGIN - 2.0 * CELL_PADDING;
    let lines = wrap_lines(text, usable_width);

    let lines_per_page = ((PAGE_HEIGHT - MARGIN - BOTTOM_MARGIN) / LINE_HEIGHT).floor() as usize;
    let pages: Vec<&[String]> = lines.chunks(lines_per_page.max(1)).collect();

    let mut objects: Vec<Vec<u8>> = Vec::new();
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| 4 + 2 * i).collect();
    let kids = page_ids
        .iter()
        .map(|id| format!("{} 0 R", id))
        .collect::<Vec<_>>()
        .join(" ");

    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
    objects.push(
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()).into_bytes(),
    );
    objects.push(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    );

    for (page, page_id) in pages.iter().zip(&page_ids) {
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                PAGE_WIDTH,
                PAGE_HEIGHT,
                page_id + 1
            )
            .into_bytes(),
        );

        let content = page_content(page);
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(&content);
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }

    let mut pdf: Vec<u8> = Vec::new();
    pdf.write_all(b"%PDF-1.4\n")?;

    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        write!(pdf, "{} 0 obj\n", index + 1)?;
        pdf.write_all(body)?;
        pdf.write_all(b"\nendobj\n")?;
    }

    let xref_offset = pdf.len();
    write!(pdf, "xref\n0 {}\n", objects.len() + 1)?;
    pdf.write_all(b"0000000000 65535 f \n")?;
    for offset in offsets {
        write!(pdf, "{:010} 00000 n \n", offset)?;
    }
    write!(
        pdf,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    )?;

    tracing::debug!("Rendered {} line(s) on {} page(s)", lines.len(), pages.len());
    Ok(pdf)
}
