//! ASCII result tables.
//!
//! Renders query results in the bordered style MySQL clients print:
//!
//! ```text
//! +----+-------+
//! | id | name  |
//! +----+-------+
//! | 1  | alice |
//! +----+-------+
//! ```

use crate::sqltypes::QueryResult;

/// Renders a query result as a bordered text table.
pub struct ResultTable<'a> {
    result: &'a QueryResult,
}

impl<'a> ResultTable<'a> {
    /// Creates a new table renderer for `result`.
    pub fn new(result: &'a QueryResult) -> Self {
        Self { result }
    }

    /// Calculates the width of each column, in characters.
    fn calculate_column_widths(&self, cells: &[Vec<String>]) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .result
            .fields
            .iter()
            .map(|field| field.name.chars().count())
            .collect();

        for row in cells {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        widths
    }

    /// Renders the table, one line per `\n`. Results without fields, such as
    /// those of DML statements, render as an empty frame.
    pub fn render(&self) -> String {
        if self.result.fields.is_empty() {
            let border = Self::render_border(&[]);
            return format!("{border}{border}");
        }

        let cells: Vec<Vec<String>> = self
            .result
            .rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_display_string()).collect())
            .collect();
        let widths = self.calculate_column_widths(&cells);
        let border = Self::render_border(&widths);

        let mut out = String::new();
        out.push_str(&border);

        let headers: Vec<String> = self.result.column_names().map(String::from).collect();
        out.push_str(&Self::render_row(&headers, &widths));
        out.push_str(&border);

        if !cells.is_empty() {
            for row in &cells {
                out.push_str(&Self::render_row(row, &widths));
            }
            out.push_str(&border);
        }

        out
    }

    fn render_border(widths: &[usize]) -> String {
        let mut line = String::from("+");
        for &w in widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line.push('\n');
        line
    }

    fn render_row(cells: &[String], widths: &[usize]) -> String {
        let mut line = String::from("|");
        for (i, &w) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = w - cell.chars().count();
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(pad + 1));
            line.push('|');
        }
        line.push('\n');
        line
    }
}
