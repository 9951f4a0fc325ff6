//! Plain-text tables with per-column colour

use colored::{Color, Colorize};

#[derive(Debug, Clone)]
struct Column {
    header: String,
    color: Option<Color>,
}

/// A titled table rendered with padded columns
#[derive(Debug, Clone, Default)]
pub struct Table {
    title: Option<String>,
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with a title
    pub fn new(title: impl Into<String>) -> Self {
        Table {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Add an uncoloured column
    pub fn column(mut self, header: impl Into<String>) -> Self {
        self.columns.push(Column {
            header: header.into(),
            color: None,
        });
        self
    }

    /// Add a column whose cells are drawn in `color`
    pub fn colored_column(mut self, header: impl Into<String>, color: Color) -> Self {
        self.columns.push(Column {
            header: header.into(),
            color: Some(color),
        });
        self
    }

    /// Append a row; missing cells render blank, extra cells are dropped
    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.columns.len())
            .map(Into::into)
            .collect();
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(col.header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render the table to a string
    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut lines = Vec::new();

        if let Some(title) = &self.title {
            lines.push(title.bold().to_string());
        }

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| pad(&col.header, *w).bold().to_string())
            .collect();
        lines.push(header.join("  ").trim_end().to_string());

        let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
        lines.push(rule.join("  "));

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&self.columns)
                .zip(&widths)
                .map(|((cell, col), w)| {
                    let padded = pad(cell, *w);
                    match col.color {
                        Some(color) => padded.color(color).to_string(),
                        None => padded,
                    }
                })
                .collect();
            lines.push(cells.join("  ").trim_end().to_string());
        }

        lines.join("\n")
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}
