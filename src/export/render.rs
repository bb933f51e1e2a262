use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::LedgerError;

use super::labels::Labels;
use super::table::TextTable;
use super::ReportDocument;

pub const DEFAULT_ROWS_PER_PAGE: usize = 40;
const PAGE_BREAK: &str = "\n\u{0c}\n";

/// Lays a [`ReportDocument`] out as a file format.
pub trait ReportRenderer {
    fn extension(&self) -> &'static str;
    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, LedgerError>;
}

/// Splits rows into pages; an empty table still gets one page.
fn paginate(rows: &[Vec<String>], rows_per_page: usize) -> Vec<&[Vec<String>]> {
    if rows.is_empty() {
        return vec![rows];
    }
    rows.chunks(rows_per_page.max(1)).collect()
}

/// Paginated plain text: title and summary on the first page, the table header
/// repeated on every page, form feeds between pages. Plain text cannot carry
/// the logo, so it is left out.
pub struct TextReportRenderer {
    rows_per_page: usize,
    labels: &'static Labels,
}

impl TextReportRenderer {
    pub fn new(rows_per_page: usize, labels: &'static Labels) -> Self {
        Self {
            rows_per_page,
            labels,
        }
    }
}

impl ReportRenderer for TextReportRenderer {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, LedgerError> {
        let table = TextTable::new(document.table.headers.clone(), document.table.rows.clone());
        let pages = paginate(&table.rows, self.rows_per_page);
        let total = pages.len();

        let rendered: Vec<String> = pages
            .iter()
            .enumerate()
            .map(|(idx, rows)| {
                let mut lines = Vec::new();
                if idx == 0 {
                    lines.push(document.title.clone());
                    lines.push("=".repeat(document.title.chars().count()));
                    lines.push(String::new());
                    lines.extend(document.summary_lines.iter().cloned());
                    lines.push(String::new());
                }
                lines.push(table.render_slice(rows));
                lines.push(String::new());
                lines.push(format!("{} {}/{}", self.labels.page, idx + 1, total));
                lines.join("\n")
            })
            .collect();

        let mut out = rendered.join(PAGE_BREAK);
        out.push('\n');
        Ok(out.into_bytes())
    }
}

/// Printable HTML: one `<section>` per page with print page breaks between
/// them and the logo embedded as a data URI.
pub struct HtmlReportRenderer {
    rows_per_page: usize,
    labels: &'static Labels,
}

impl HtmlReportRenderer {
    pub fn new(rows_per_page: usize, labels: &'static Labels) -> Self {
        Self {
            rows_per_page,
            labels,
        }
    }
}

const HTML_STYLE: &str = "body{font-family:sans-serif;font-size:11pt}\
header{display:flex;align-items:center;gap:1em}\
header img{width:26mm;height:26mm;object-fit:contain}\
table{border-collapse:collapse;width:100%;font-size:10pt}\
th{background:#0c7779;color:#fff;text-align:left}\
th,td{padding:4px 6px;border-bottom:1px solid #ddd}\
footer{margin-top:1em;font-size:9pt;text-align:right}\
.page+.page{break-before:page}";

impl ReportRenderer for HtmlReportRenderer {
    fn extension(&self) -> &'static str {
        "html"
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, LedgerError> {
        let pages = paginate(&document.table.rows, self.rows_per_page);
        let total = pages.len();
        let head_row: String = document
            .table
            .headers
            .iter()
            .map(|header| format!("<th>{}</th>", escape_html(header)))
            .collect();

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(&document.title)));
        html.push_str(&format!("<style>{HTML_STYLE}</style>\n</head>\n<body>\n"));

        for (idx, rows) in pages.iter().enumerate() {
            html.push_str("<section class=\"page\">\n");
            if idx == 0 {
                html.push_str("<header>");
                if let Some(logo) = document.logo.as_deref() {
                    html.push_str(&format!(
                        "<img alt=\"logo\" src=\"data:{};base64,{}\">",
                        sniff_mime(logo),
                        BASE64.encode(logo)
                    ));
                }
                html.push_str(&format!("<h1>{}</h1></header>\n", escape_html(&document.title)));
                for line in &document.summary_lines {
                    html.push_str(&format!("<p>{}</p>\n", escape_html(line)));
                }
            }
            html.push_str(&format!("<table>\n<thead><tr>{head_row}</tr></thead>\n<tbody>\n"));
            for row in rows.iter() {
                let cells: String = row
                    .iter()
                    .map(|cell| format!("<td>{}</td>", escape_html(cell)))
                    .collect();
                html.push_str(&format!("<tr>{cells}</tr>\n"));
            }
            html.push_str("</tbody>\n</table>\n");
            html.push_str(&format!(
                "<footer>{} {}/{}</footer>\n</section>\n",
                self.labels.page,
                idx + 1,
                total
            ));
        }

        html.push_str("</body>\n</html>\n");
        Ok(html.into_bytes())
    }
}

fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(&[0xff, 0xd8]) {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.starts_with(b"<svg") || bytes.starts_with(b"<?xml") {
        "image/svg+xml"
    } else {
        "application/octet-stream"
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{labels::SPANISH, ReportTable};

    fn document(rows: usize) -> ReportDocument {
        ReportDocument {
            title: "Reporte de misiones".into(),
            logo: None,
            summary_lines: vec!["Persona: Ana".into()],
            table: ReportTable {
                headers: vec!["Mes".into(), "Abonado".into()],
                rows: (0..rows)
                    .map(|idx| vec![format!("m{idx}"), "₡1,00".into()])
                    .collect(),
            },
            file_stem: "reporte_misiones_ana".into(),
        }
    }

    #[test]
    fn text_report_paginates_and_repeats_headers() {
        let renderer = TextReportRenderer::new(2, &SPANISH);
        let text = String::from_utf8(renderer.render(&document(5)).unwrap()).unwrap();
        let pages: Vec<&str> = text.split('\u{0c}').collect();
        assert_eq!(pages.len(), 3);
        assert!(pages[0].starts_with("Reporte de misiones\n"));
        assert!(pages[0].contains("Persona: Ana"));
        assert!(!pages[1].contains("Persona: Ana"));
        for (idx, page) in pages.iter().enumerate() {
            assert!(page.contains("Mes"), "page {idx} lacks header");
            assert!(page.contains(&format!("Página {}/3", idx + 1)));
        }
        assert!(pages[2].contains("m4"));
    }

    #[test]
    fn empty_table_still_renders_one_page() {
        let renderer = TextReportRenderer::new(10, &SPANISH);
        let text = String::from_utf8(renderer.render(&document(0)).unwrap()).unwrap();
        assert!(!text.contains('\u{0c}'));
        assert!(text.contains("Página 1/1"));
    }

    #[test]
    fn html_report_embeds_logo_and_escapes_text() {
        let mut doc = document(3);
        doc.summary_lines.push("Nota: <b>&</b>".into());
        let doc = doc.with_logo(Some(vec![0x89, b'P', b'N', b'G', 1, 2]));
        let renderer = HtmlReportRenderer::new(2, &SPANISH);
        let html = String::from_utf8(renderer.render(&doc).unwrap()).unwrap();
        assert!(html.contains("data:image/png;base64,"));
        assert!(html.contains("Nota: &lt;b&gt;&amp;&lt;/b&gt;"));
        assert_eq!(html.matches("<section class=\"page\">").count(), 2);
        assert_eq!(html.matches("<thead>").count(), 2);
    }

    #[test]
    fn html_report_without_logo_has_no_image() {
        let renderer = HtmlReportRenderer::new(10, &SPANISH);
        let html = String::from_utf8(renderer.render(&document(1)).unwrap()).unwrap();
        assert!(!html.contains("<img"));
    }
}
