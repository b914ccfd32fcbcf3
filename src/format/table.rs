// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Aligned, boxed text tables.
//!
//! Column widths are computed against *visible* width (via
//! [`WidthTable`]), not code-point count, so cells carrying symbolic
//! glyphs align with plain-text cells in a monospace terminal.

use crate::error::TableError;

use super::width::WidthTable;

/// Renders rows of cells into a box-drawn table.
///
/// # Examples
///
/// ```
/// use tradgw_lib::format::TableFormatter;
///
/// let formatter = TableFormatter::new();
/// let table = formatter.render(
///     &["ID", "Name"],
///     &[
///         vec!["65540".to_string(), "Kitchen outlet".to_string()],
///         vec!["65541".to_string(), "Hall blind".to_string()],
///     ],
/// )?;
/// assert!(table.starts_with('╔'));
/// assert!(table.ends_with("╝\n"));
/// # Ok::<(), tradgw_lib::error::TableError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableFormatter {
    widths: WidthTable,
}

impl TableFormatter {
    /// Creates a formatter using the default glyph width table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter with a custom glyph width table.
    #[must_use]
    pub const fn with_width_table(widths: WidthTable) -> Self {
        Self { widths }
    }

    /// Renders a header and data rows into one aligned table string.
    ///
    /// Every row must have the same column count as the header. The output
    /// is complete or absent: a shape error produces no partial table.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::EmptyHeader`] for a zero-column header and
    /// [`TableError::ColumnCountMismatch`] when a row's cell count differs
    /// from the header's.
    pub fn render(&self, header: &[&str], rows: &[Vec<String>]) -> Result<String, TableError> {
        if header.is_empty() {
            return Err(TableError::EmptyHeader);
        }
        for (index, row) in rows.iter().enumerate() {
            if row.len() != header.len() {
                return Err(TableError::ColumnCountMismatch {
                    row: index,
                    expected: header.len(),
                    actual: row.len(),
                });
            }
        }

        let widths = self.column_widths(header, rows);

        let mut out = String::new();
        self.frame_line(&mut out, &widths, '╔', '╦', '╗');
        self.cell_line(&mut out, &widths, header.iter().copied());
        self.frame_line(&mut out, &widths, '╠', '╬', '╣');
        for row in rows {
            self.cell_line(&mut out, &widths, row.iter().map(String::as_str));
        }
        self.frame_line(&mut out, &widths, '╚', '╩', '╝');
        Ok(out)
    }

    /// Maximum visible width per column over header and all rows.
    fn column_widths(&self, header: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
        let mut widths: Vec<usize> = header
            .iter()
            .map(|cell| self.widths.visible_width(cell))
            .collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(self.widths.visible_width(cell));
            }
        }
        widths
    }

    fn frame_line(&self, out: &mut String, widths: &[usize], left: char, junction: char, right: char) {
        out.push(left);
        for (index, width) in widths.iter().enumerate() {
            if index > 0 {
                out.push(junction);
            }
            for _ in 0..(width + 2) {
                out.push('═');
            }
        }
        out.push(right);
        out.push('\n');
    }

    fn cell_line<'a>(
        &self,
        out: &mut String,
        widths: &[usize],
        cells: impl Iterator<Item = &'a str>,
    ) {
        for (cell, width) in cells.zip(widths) {
            out.push('║');
            out.push(' ');
            out.push_str(cell);
            let padding = width.saturating_sub(self.widths.visible_width(cell));
            for _ in 0..padding {
                out.push(' ');
            }
            out.push(' ');
        }
        out.push('║');
        out.push('\n');
    }
}
