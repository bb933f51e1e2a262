/// Describes how a column should align its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Plain-text table layout shared by the text report and the shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextTable {
    pub headers: Vec<String>,
    pub alignments: Vec<Alignment>,
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    /// First column left-aligned, the rest right-aligned.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let alignments = (0..headers.len())
            .map(|idx| if idx == 0 { Alignment::Left } else { Alignment::Right })
            .collect();
        Self {
            headers,
            alignments,
            rows,
        }
    }

    /// Widest cell per column, headers included.
    pub fn compute_widths(&self, rows: &[Vec<String>]) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                rows.iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| visible_width(cell))
                    .fold(visible_width(header), usize::max)
            })
            .collect()
    }

    pub fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        widths
            .iter()
            .enumerate()
            .map(|(idx, width)| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                let alignment = self.alignments.get(idx).copied().unwrap_or(Alignment::Left);
                pad(text, *width, alignment)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }

    /// Renders `rows` (a slice of this table's rows, or all of them) under the
    /// header and a rule, sized to the whole table so pages line up.
    pub fn render_slice(&self, rows: &[Vec<String>]) -> String {
        let widths = self.compute_widths(&self.rows);
        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(self.render_row(&self.headers, &widths));
        lines.push(horizontal_rule(&widths));
        lines.extend(rows.iter().map(|row| self.render_row(row, &widths)));
        lines.join("\n")
    }

    pub fn render(&self) -> String {
        self.render_slice(&self.rows)
    }
}

fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    let fill = " ".repeat(width.saturating_sub(visible_width(text)));
    match alignment {
        Alignment::Left => format!("{text}{fill}"),
        Alignment::Right => format!("{fill}{text}"),
    }
}

fn horizontal_rule(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Character count ignoring ANSI colour escapes.
pub fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' && chars.peek() == Some(&'[') {
            chars.next();
            for next in chars.by_ref() {
                if ('\u{40}'..='\u{7e}').contains(&next) {
                    break;
                }
            }
            continue;
        }
        width += 1;
    }
    width
}
