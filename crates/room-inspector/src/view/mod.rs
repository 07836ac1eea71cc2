//! Tabular display of columns and rows.
//!
//! A [`TableView`] owns one screenful of data and renders it as a padded
//! text grid, an HTML table or JSON. Row selection is reported by
//! positional index through the callbacks registered with
//! [`TableView::on_click`] and [`TableView::on_long_click`].

mod html;

use std::fmt;

use room_inspector_sqlite::{ColumnInfo, ResultSet, NULL_TEXT};
use serde::Serialize;

use crate::config::OutputFormat;

/// Callback receiving a row's positional index.
pub type RowCallback = Box<dyn FnMut(usize) + Send>;

/// Header of the index column in text output.
const INDEX_HEADER: &str = "#";

/// Column names plus rows of cells, with optional row callbacks.
#[derive(Serialize)]
pub struct TableView {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    #[serde(skip)]
    on_click: Option<RowCallback>,
    #[serde(skip)]
    on_long_click: Option<RowCallback>,
}

impl TableView {
    /// Creates a view; each row is aligned with `columns`.
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            columns,
            rows,
            on_click: None,
            on_long_click: None,
        }
    }

    /// One-column view listing `names` under `header`.
    #[must_use]
    pub fn list(header: &str, names: &[String]) -> Self {
        Self::new(
            vec![header.to_string()],
            names.iter().map(|n| vec![n.clone()]).collect(),
        )
    }

    /// Schema view: one row per column of a table.
    #[must_use]
    pub fn schema(columns: &[ColumnInfo]) -> Self {
        let header = ["cid", "name", "type", "notnull", "dflt_value", "pk"];
        let rows = columns
            .iter()
            .map(|c| {
                vec![
                    c.cid.to_string(),
                    c.name.clone(),
                    c.declared_type.clone(),
                    u8::from(c.not_null).to_string(),
                    c.default_value
                        .clone()
                        .unwrap_or_else(|| String::from(NULL_TEXT)),
                    c.primary_key.to_string(),
                ]
            })
            .collect();
        Self::new(header.iter().map(ToString::to_string).collect(), rows)
    }

    /// Field view of a single row: one `column | value` line per column.
    #[must_use]
    pub fn record<V: ToString>(columns: &[String], values: &[V]) -> Self {
        let rows = columns
            .iter()
            .zip(values)
            .map(|(c, v)| vec![c.clone(), v.to_string()])
            .collect();
        Self::new(vec!["column".to_string(), "value".to_string()], rows)
    }

    /// Registers the row selection callback.
    #[must_use]
    pub fn on_click(mut self, callback: impl FnMut(usize) + Send + 'static) -> Self {
        self.on_click = Some(Box::new(callback));
        self
    }

    /// Registers the row long-press callback.
    #[must_use]
    pub fn on_long_click(mut self, callback: impl FnMut(usize) + Send + 'static) -> Self {
        self.on_long_click = Some(Box::new(callback));
        self
    }

    /// Selects row `index`. Returns false, without calling anything, when
    /// the index is out of range or no callback is registered.
    pub fn click(&mut self, index: usize) -> bool {
        dispatch(self.rows.len(), self.on_click.as_mut(), index)
    }

    /// Long-presses row `index`. Same contract as [`Self::click`].
    pub fn long_click(&mut self, index: usize) -> bool {
        dispatch(self.rows.len(), self.on_long_click.as_mut(), index)
    }

    /// Column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders a padded text grid with a leading row index column.
    #[must_use]
    pub fn render_text(&self) -> String {
        let header: Vec<&str> = std::iter::once(INDEX_HEADER)
            .chain(self.columns.iter().map(String::as_str))
            .collect();
        let indices: Vec<String> = (0..self.rows.len()).map(|i| i.to_string()).collect();
        let body: Vec<Vec<&str>> = self
            .rows
            .iter()
            .zip(&indices)
            .map(|(row, index)| {
                std::iter::once(index.as_str())
                    .chain(row.iter().map(String::as_str))
                    .collect()
            })
            .collect();

        let mut widths = vec![0; header.len()];
        for line in std::iter::once(&header).chain(&body) {
            if widths.len() < line.len() {
                widths.resize(line.len(), 0);
            }
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let rule = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-");

        let mut lines = vec![render_line(&header, &widths), rule];
        lines.extend(body.iter().map(|line| render_line(line, &widths)));
        lines.join("\n")
    }

    /// Serialises columns and rows as JSON.
    ///
    /// # Errors
    ///
    /// Returns the serialiser's error; never expected for string data.
    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Renders in the requested format.
    ///
    /// # Errors
    ///
    /// Only JSON output can fail, see [`Self::render_json`].
    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Html => Ok(self.render_html()),
            OutputFormat::Json => self.render_json(),
        }
    }
}

impl From<ResultSet> for TableView {
    fn from(set: ResultSet) -> Self {
        let rows = set
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();
        Self::new(set.columns, rows)
    }
}

impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text())
    }
}

impl fmt::Debug for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("on_click", &self.on_click.is_some())
            .field("on_long_click", &self.on_long_click.is_some())
            .finish()
    }
}

fn dispatch(len: usize, callback: Option<&mut RowCallback>, index: usize) -> bool {
    match callback {
        Some(callback) if index < len => {
            callback(index);
            true
        }
        _ => false,
    }
}

fn render_line(cells: &[&str], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    line.trim_end().to_string()
}
