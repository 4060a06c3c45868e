//! Plain-text aligned table rendering.

/// Rendering knobs taken from the resolved UI preferences.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// A rectangular table of string cells.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub fn new<H: Into<String>>(headers: impl IntoIterator<Item = H>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<C: Into<String>>(&mut self, cells: impl IntoIterator<Item = C>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    #[must_use]
    pub fn render(&self, options: RenderOptions) -> String {
        if self.headers.is_empty() {
            return String::from("(no columns)");
        }

        let widths = self.column_widths(options.max_width);

        let mut out = String::new();
        for (index, header) in self.headers.iter().enumerate() {
            if index > 0 {
                out.push_str("  ");
            }
            out.push_str(&pad(&clip(header, widths[index]), widths[index], false));
        }
        let header_len = out.len();
        out.push('\n');
        out.push_str(&"-".repeat(header_len));

        for row in &self.rows {
            out.push('\n');
            for (index, width) in widths.iter().enumerate() {
                if index > 0 {
                    out.push_str("  ");
                }
                let raw = row.get(index).map_or("-", String::as_str);
                let clipped = clip(raw, *width);
                let right_align = is_numeric(&clipped);
                let padded = pad(&clipped, *width, right_align);
                if options.color {
                    out.push_str(&paint_status(&padded));
                } else {
                    out.push_str(&padded);
                }
            }
        }
        out
    }

    fn column_widths(&self, max_width: Option<usize>) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| cell.chars().count())
                    .chain([header.chars().count(), 4])
                    .max()
                    .unwrap_or(4)
            })
            .collect();

        if let Some(limit) = max_width {
            let gaps = widths.len().saturating_sub(1) * 2;
            // Shave the widest shrinkable column until the table fits.
            while widths.iter().sum::<usize>() + gaps > limit {
                let Some((index, _)) = widths
                    .iter()
                    .enumerate()
                    .filter(|(i, w)| **w > self.headers[*i].chars().count().max(4))
                    .max_by_key(|(_, w)| **w)
                else {
                    break;
                };
                widths[index] -= 1;
            }
        }

        widths
    }
}

fn clip(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count <= width {
        return value.to_string();
    }
    let keep = width.saturating_sub(1);
    let mut clipped: String = value.chars().take(keep).collect();
    clipped.push('…');
    clipped
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim_start_matches('$').trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+' | ','))
}

/// ANSI-color a cell when its trimmed value is a known status word.
fn paint_status(padded: &str) -> String {
    let code = match padded.trim() {
        "deployed" | "healthy" | "ok" | "true" | "compatible" => Some("32"),
        "deploying" | "updating" | "destroying" | "warning" | "pending" | "draft" => Some("33"),
        "error" | "failed" | "false" | "missing" | "incompatible" => Some("31"),
        _ => None,
    };
    match code {
        Some(code) => format!("\u{1b}[{code}m{padded}\u{1b}[0m"),
        None => padded.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn columns_align_across_rows() {
        let mut table = Table::new(["id", "status", "cost"]);
        table.row(["acme-co", "deployed", "70.30"]);
        table.row(["bigshop-international", "draft", "302.50"]);

        let rendered = table.render(RenderOptions::default());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        // Every row is the same width as the header line.
        assert_eq!(lines[0].len(), lines[2].len());
        assert_eq!(lines[0].len(), lines[3].len());
    }

    #[test]
    fn numeric_cells_right_align() {
        let mut table = Table::new(["name", "total"]);
        table.row(["a", "5.00"]);
        table.row(["b", "123.45"]);

        let rendered = table.render(RenderOptions::default());
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[2].ends_with("  5.00"));
        assert!(lines[3].ends_with("123.45"));
    }

    #[test]
    fn long_cells_clip_with_ellipsis() {
        let mut table = Table::new(["note"]);
        table.row(["a very long note that should get clipped"]);

        let rendered = table.render(RenderOptions {
            max_width: Some(12),
            color: false,
        });
        let last = rendered.lines().last().expect("row line");
        assert!(last.trim_end().ends_with('…'));
        assert!(last.chars().count() <= 12);
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let mut table = Table::new(["a", "b"]);
        table.row(["only-one"]);
        let rendered = table.render(RenderOptions::default());
        assert!(rendered.lines().last().expect("row").contains('-'));
    }
}
