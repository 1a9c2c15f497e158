//! Column-aligned tables for `check` output.

use console::measure_text_width;

/// Rows of cells aligned under a header, separated by two spaces.
///
/// Widths are measured with [`measure_text_width`], so styled cells line up
/// with plain ones.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&str>) -> Self {
        Self {
            headers: headers.into_iter().map(str::to_string).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row. Missing trailing cells render empty; extra cells are dropped.
    pub fn add_row(&mut self, row: Vec<&str>) {
        let mut cells: Vec<String> = row
            .into_iter()
            .take(self.headers.len())
            .map(str::to_string)
            .collect();
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| measure_text_width(&row[i]))
                    .chain(std::iter::once(measure_text_width(header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render header, a dashed rule, then one line per row.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

        let mut lines = vec![render_line(&self.headers, &widths), render_line(&rule, &widths)];
        lines.extend(self.rows.iter().map(|row| render_line(row, &widths)));
        lines.join("\n")
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        line.push_str(cell);
        if i < last {
            let pad = width.saturating_sub(measure_text_width(cell)) + 2;
            line.push_str(&" ".repeat(pad));
        }
    }
    line.trim_end().to_string()
}
