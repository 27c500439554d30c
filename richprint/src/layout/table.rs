// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic tables.
//!
//! Every row is laid out as a single line without wrapping. Columns get a
//! fixed width, a share of the table width, or split whatever is left
//! equally. Cells are aligned inside their columns when the row is
//! committed.

use smallvec::SmallVec;

use crate::markup::{resolve_or, Length, TextAlign};

/// A column as read from the markup.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ColumnSpec {
    pub(crate) align: TextAlign,
    /// Relative to the table width. Zero or unset means automatic.
    pub(crate) width: Option<Length>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Column {
    pub(crate) left: i32,
    pub(crate) width: i32,
    pub(crate) align: TextAlign,
}

/// A cell of the current row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    /// Index of the first glyph of the cell in the row.
    pub(crate) first: usize,
    pub(crate) column: usize,
    pub(crate) span: usize,
    pub(crate) align: TextAlign,
}

#[derive(Clone, Debug)]
pub(crate) struct Table {
    columns: SmallVec<[Column; 8]>,
    left: i32,
    width: i32,
    pub(crate) outer_border: bool,
    cells: SmallVec<[Cell; 8]>,
}

/// Sizes columns within `width`, starting at `left`.
pub(crate) fn size_columns(specs: &[ColumnSpec], left: i32, width: i32) -> SmallVec<[Column; 8]> {
    let widths: SmallVec<[i32; 8]> = specs
        .iter()
        .map(|spec| resolve_or(spec.width, width, 0).max(0))
        .collect();
    let fixed: i32 = widths.iter().sum();
    let autos = i32::try_from(widths.iter().filter(|&&w| w == 0).count()).unwrap_or(i32::MAX);
    let share = if autos > 0 {
        (width - fixed).max(0) / autos
    } else {
        0
    };
    let mut x = left;
    specs
        .iter()
        .zip(&widths)
        .map(|(spec, &w)| {
            let width = if w == 0 { share } else { w };
            let column = Column {
                left: x,
                width,
                align: spec.align,
            };
            x += width;
            column
        })
        .collect()
}

impl Table {
    pub(crate) fn new(specs: &[ColumnSpec], left: i32, width: i32, outer_border: bool) -> Self {
        let mut table = Self {
            columns: size_columns(specs, left, width),
            left,
            width,
            outer_border,
            cells: SmallVec::new(),
        };
        table.start_row();
        table
    }

    fn column_align(&self, column: usize) -> TextAlign {
        self.columns
            .get(column)
            .map_or(TextAlign::Left, |c| c.align)
    }

    pub(crate) fn start_row(&mut self) {
        self.cells.clear();
        self.cells.push(Cell {
            first: 0,
            column: 0,
            span: 1,
            align: self.column_align(0),
        });
    }

    /// Starts a new cell whose first glyph will be `first`.
    pub(crate) fn next_cell(&mut self, first: usize) {
        let column = self.cells.last().map_or(0, |c| c.column + c.span);
        self.cells.push(Cell {
            first,
            column,
            span: 1,
            align: self.column_align(column),
        });
    }

    /// Makes the current cell span `columns` columns.
    pub(crate) fn span(&mut self, columns: u8, align: TextAlign) {
        if let Some(cell) = self.cells.last_mut() {
            cell.span = usize::from(columns.max(1));
            cell.align = align;
        }
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Left edge and width of a cell. Cells past the last column collapse
    /// onto the right edge of the table.
    pub(crate) fn extent(&self, cell: &Cell) -> (i32, i32) {
        let Some(first) = self.columns.get(cell.column) else {
            return (self.left + self.width.max(0), 0);
        };
        let last_column = (cell.column + cell.span - 1).min(self.columns.len() - 1);
        let last = self.columns[last_column];
        (first.left, last.left + last.width - first.left)
    }

    /// Left edge of the cell being filled.
    pub(crate) fn cell_left(&self) -> i32 {
        self.cells
            .last()
            .map_or(self.left, |cell| self.extent(cell).0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(pixels: i32, percent: f32) -> ColumnSpec {
        ColumnSpec {
            align: TextAlign::Left,
            width: Some(Length {
                pixels,
                rel: percent,
                percent: 0.,
            }),
        }
    }

    #[test]
    fn automatic_columns_share_the_rest() {
        let columns = size_columns(&[spec(40, 0.), spec(0, 0.), spec(0, 0.)], 10, 100);
        let widths: SmallVec<[i32; 3]> = columns.iter().map(|c| c.width).collect();
        assert_eq!(widths.as_slice(), &[40, 30, 30]);
        assert_eq!(columns[2].left, 80);
    }

    #[test]
    fn percent_columns_use_table_width() {
        let columns = size_columns(&[spec(0, 0.25), spec(10, 0.)], 0, 200);
        assert_eq!(columns[0].width, 50);
        assert_eq!(columns[1].left, 50);
    }

    #[test]
    fn spans_join_columns() {
        let mut table = Table::new(&[spec(20, 0.), spec(30, 0.), spec(40, 0.)], 0, 90, false);
        table.span(2, TextAlign::Center);
        assert_eq!(table.extent(&table.cells()[0]), (0, 50));
        table.next_cell(3);
        assert_eq!(table.cells()[1].column, 2);
        assert_eq!(table.cell_left(), 50);
        table.next_cell(5);
        assert_eq!(table.cell_left(), 90);
    }
}
