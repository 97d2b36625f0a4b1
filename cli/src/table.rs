// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// A column of a [`Table`] rendering rows of type `T`.
pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;
    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;
    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }
    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

/// How a table is rendered.
pub trait TableStyle {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result;
}

pub struct Table<'a, S, T, C> {
    style: S,
    columns: &'a [C],
    data: &'a [T],
}

impl<'a, S: TableStyle, T, C: TableColumn<T>> Table<'a, S, T, C> {
    pub fn new(style: S, columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            style,
            columns,
            data,
        }
    }
}

impl<S: TableStyle, T, C: TableColumn<T>> fmt::Display for Table<'_, S, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.style.write(f, self.columns, self.data)
    }
}

/// Aligned, colored columns separated by a fixed string.
#[derive(Debug, Clone)]
pub struct TableStyleBasic {
    separator: &'static str,
    header: bool,
}

impl TableStyleBasic {
    pub fn new() -> Self {
        Self {
            separator: "  ",
            header: false,
        }
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}

impl TableStyle for TableStyleBasic {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let names: Vec<Cow<'_, str>> = columns.iter().map(|c| c.name()).collect();
        let rows: Vec<Vec<Cow<'_, str>>> = data
            .iter()
            .map(|row| columns.iter().map(|col| col.format(row)).collect())
            .collect();

        let mut widths: Vec<usize> = if self.header {
            names.iter().map(|n| n.width()).collect()
        } else {
            vec![0; columns.len()]
        };
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.width());
            }
        }

        let last = columns.len().saturating_sub(1);
        if self.header {
            for (i, (name, width)) in names.iter().zip(&widths).enumerate() {
                let cell = pad(name, *width, PaddingDirection::Left, i == last);
                write!(f, "{}", cell.bold())?;
                f.write_str(if i == last { "\n" } else { self.separator })?;
            }
        }

        for (row, data) in rows.iter().zip(data) {
            for (i, ((cell, col), width)) in row.iter().zip(columns).zip(&widths).enumerate() {
                let cell = pad(cell, *width, col.padding_direction(), i == last);
                match col.color(data) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => f.write_str(&cell)?,
                }
                f.write_str(if i == last { "\n" } else { self.separator })?;
            }
        }
        Ok(())
    }
}

/// A JSON array of objects keyed by column name.
#[derive(Debug, Clone, Copy)]
pub struct TableStyleJson;

impl TableStyleJson {
    pub fn new() -> Self {
        Self
    }
}

impl TableStyle for TableStyleJson {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let rows: Vec<serde_json::Value> = data
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|col| {
                        let key = col.name().to_lowercase().replace(' ', "_");
                        (key, serde_json::Value::from(col.format(row).into_owned()))
                    })
                    .collect::<serde_json::Map<_, _>>()
                    .into()
            })
            .collect();

        let json = serde_json::to_string_pretty(&rows).map_err(|_| fmt::Error)?;
        writeln!(f, "{json}")
    }
}

fn pad(cell: &str, width: usize, direction: PaddingDirection, last: bool) -> String {
    let fill = width.saturating_sub(cell.width());
    match direction {
        // trailing spaces on the last column are noise
        PaddingDirection::Left if last => cell.to_string(),
        PaddingDirection::Left => format!("{cell}{}", " ".repeat(fill)),
        PaddingDirection::Right => format!("{}{cell}", " ".repeat(fill)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Col(&'static str, usize, PaddingDirection);

    impl TableColumn<(&'static str, &'static str)> for Col {
        fn name(&self) -> Cow<'_, str> {
            self.0.into()
        }

        fn format<'a>(&self, data: &'a (&'static str, &'static str)) -> Cow<'a, str> {
            match self.1 {
                0 => data.0.into(),
                _ => data.1.into(),
            }
        }

        fn padding_direction(&self) -> PaddingDirection {
            self.2
        }
    }

    fn columns() -> Vec<Col> {
        vec![
            Col("Id", 0, PaddingDirection::Right),
            Col("Studio Name", 1, PaddingDirection::Left),
        ]
    }

    #[test]
    fn basic_style_aligns_columns() {
        colored::control::set_override(false);
        let data = vec![("1", "Loft"), ("22", "Studio A")];
        let out = Table::new(TableStyleBasic::new(), &columns(), &data).to_string();
        assert_eq!(out, " 1  Loft\n22  Studio A\n");
    }

    #[test]
    fn basic_style_handles_wide_characters() {
        colored::control::set_override(false);
        let data = vec![("1", "工作室"), ("22", "A")];
        let out = Table::new(TableStyleBasic::new(), &columns(), &data).to_string();
        assert_eq!(out, " 1  工作室\n22  A\n");
    }

    #[test]
    fn json_style_keys_by_column_name() {
        let data = vec![("1", "Loft")];
        let out = Table::new(TableStyleJson::new(), &columns(), &data).to_string();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, serde_json::json!([{"id": "1", "studio_name": "Loft"}]));
    }
}
