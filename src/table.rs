use crate::error::ConfigError;
use crate::paragraph::Paragraph;
use crate::style::{check_positive, TableCellStyle};
use crate::units::Pt;

/// A table cell holding zero or more paragraphs. A cell can span several rows and/or
/// columns; the slots it covers stay empty in the rows below and the columns to its
/// right.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub paragraphs: Vec<Paragraph>,
    pub style: TableCellStyle,
    row_span: usize,
    column_span: usize,
}

impl Default for TableCell {
    fn default() -> Self {
        TableCell {
            paragraphs: Vec::default(),
            style: TableCellStyle::default(),
            row_span: 1,
            column_span: 1,
        }
    }
}

impl TableCell {
    pub fn new<I: IntoIterator<Item = Paragraph>>(paragraphs: I) -> TableCell {
        TableCell {
            paragraphs: paragraphs.into_iter().collect(),
            ..TableCell::default()
        }
    }

    pub fn styled<I: IntoIterator<Item = Paragraph>>(
        style: TableCellStyle,
        paragraphs: I,
    ) -> TableCell {
        TableCell {
            paragraphs: paragraphs.into_iter().collect(),
            style,
            ..TableCell::default()
        }
    }

    /// A cell holding one default-styled paragraph of text
    pub fn text<S: Into<String>>(text: S) -> TableCell {
        TableCell::new([Paragraph::text(text)])
    }

    pub fn with_row_span(self, rows: usize) -> Result<TableCell, ConfigError> {
        if rows == 0 {
            return Err(ConfigError::ZeroSpan);
        }
        Ok(TableCell {
            row_span: rows,
            ..self
        })
    }

    pub fn with_column_span(self, columns: usize) -> Result<TableCell, ConfigError> {
        if columns == 0 {
            return Err(ConfigError::ZeroSpan);
        }
        Ok(TableCell {
            column_span: columns,
            ..self
        })
    }

    pub fn row_span(&self) -> usize {
        self.row_span
    }

    pub fn column_span(&self) -> usize {
        self.column_span
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    /// Default style for the row's cells
    pub style: TableCellStyle,
    pub header: bool,
}

impl TableRow {
    pub fn new<I: IntoIterator<Item = TableCell>>(cells: I) -> TableRow {
        TableRow {
            cells: cells.into_iter().collect(),
            ..TableRow::default()
        }
    }

    /// A row repeated at the top of each page the table continues onto, when the table
    /// enables header repetition
    pub fn header<I: IntoIterator<Item = TableCell>>(cells: I) -> TableRow {
        TableRow {
            header: true,
            ..TableRow::new(cells)
        }
    }

    pub fn with_style(self, style: TableCellStyle) -> TableRow {
        TableRow { style, ..self }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub rows: Vec<TableRow>,
    /// Default style for every cell of the table
    pub style: TableCellStyle,
    column_widths: Vec<Option<Pt>>,
    column_count: Option<usize>,
    repeat_header: bool,
}

impl Table {
    pub fn new() -> Table {
        Table::default()
    }

    /// A table with a fixed number of columns; cells spanning past it are rejected
    pub fn with_column_count(columns: usize) -> Table {
        Table {
            column_count: Some(columns),
            ..Table::default()
        }
    }

    pub fn add_row(mut self, row: TableRow) -> Table {
        self.rows.push(row);
        self
    }

    pub fn with_style(self, style: TableCellStyle) -> Table {
        Table { style, ..self }
    }

    pub fn set_column_width<P: Into<Pt>>(
        &mut self,
        column: usize,
        width: P,
    ) -> Result<&mut Self, ConfigError> {
        let width = width.into();
        check_positive("column width", width)?;
        if self.column_widths.len() <= column {
            self.column_widths.resize(column + 1, None);
        }
        self.column_widths[column] = Some(width);
        Ok(self)
    }

    pub fn column_widths(&self) -> &[Option<Pt>] {
        &self.column_widths
    }

    pub fn set_repeat_header(&mut self, repeat: bool) -> &mut Self {
        self.repeat_header = repeat;
        self
    }

    pub fn repeat_header(&self) -> bool {
        self.repeat_header
    }

    /// Number of leading rows marked as header rows
    pub fn header_row_count(&self) -> usize {
        self.rows.iter().take_while(|row| row.header).count()
    }

    /// Check the spans and column widths against the table bounds
    pub fn validate(&self) -> Result<TableGrid, ConfigError> {
        TableGrid::build(self)
    }
}

/// Where a cell sits in the table's slot grid
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlacedCell {
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
    pub column_span: usize,
    /// Index of the cell within its row's `cells`
    pub index: usize,
}

/// The slot occupancy of a table: which cell anchors where, and which slots are
/// covered by spans from other cells.
#[derive(Debug, Clone, PartialEq)]
pub struct TableGrid {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<PlacedCell>,
    owners: Vec<Vec<Option<usize>>>,
}

impl TableGrid {
    pub fn build(table: &Table) -> Result<TableGrid, ConfigError> {
        let rows = table.rows.len();
        let mut owners: Vec<Vec<Option<usize>>> = vec![Vec::new(); rows];
        let mut cells = Vec::new();

        for (r, row) in table.rows.iter().enumerate() {
            let mut column = 0usize;
            for (index, cell) in row.cells.iter().enumerate() {
                while owners[r].get(column).copied().flatten().is_some() {
                    column += 1;
                }

                if r + cell.row_span > rows {
                    return Err(ConfigError::RowSpanOutOfBounds {
                        row: r,
                        row_span: cell.row_span,
                        rows,
                    });
                }
                if let Some(columns) = table.column_count {
                    if column + cell.column_span > columns {
                        return Err(ConfigError::ColumnSpanOutOfBounds {
                            row: r,
                            column,
                            columns,
                        });
                    }
                }

                let id = cells.len();
                for slots in owners.iter_mut().skip(r).take(cell.row_span) {
                    if slots.len() < column + cell.column_span {
                        slots.resize(column + cell.column_span, None);
                    }
                    for (c, slot) in slots
                        .iter_mut()
                        .enumerate()
                        .skip(column)
                        .take(cell.column_span)
                    {
                        if slot.is_some() {
                            return Err(ConfigError::OverlappingSpan { row: r, column: c });
                        }
                        *slot = Some(id);
                    }
                }

                cells.push(PlacedCell {
                    row: r,
                    column,
                    row_span: cell.row_span,
                    column_span: cell.column_span,
                    index,
                });
                column += cell.column_span;
            }
        }

        let extent = owners.iter().map(Vec::len).max().unwrap_or(0);
        let columns = table.column_count.unwrap_or(extent);
        if let Some(column) = table
            .column_widths
            .iter()
            .rposition(Option::is_some)
            .filter(|&c| c >= columns)
        {
            return Err(ConfigError::ColumnWidthOutOfBounds { column, columns });
        }
        for slots in owners.iter_mut() {
            slots.resize(columns, None);
        }

        Ok(TableGrid {
            rows,
            columns,
            cells,
            owners,
        })
    }

    /// The placed cell owning a slot, or [None] for an empty slot
    pub fn owner(&self, row: usize, column: usize) -> Option<&PlacedCell> {
        self.owners
            .get(row)
            .and_then(|slots| slots.get(column))
            .copied()
            .flatten()
            .map(|id| &self.cells[id])
    }

    /// Number of slots owned by some cell
    pub fn occupied_slots(&self) -> usize {
        self.owners.iter().flatten().filter(|o| o.is_some()).count()
    }

    /// Rows `[start, end)` that must stay on one page: the smallest range from `start`
    /// such that no row span crosses its end
    pub fn row_group_end(&self, start: usize) -> usize {
        let mut end = start + 1;
        let mut r = start;
        while r < end && r < self.rows {
            for cell in self.cells.iter().filter(|c| c.row == r) {
                end = end.max(cell.row + cell.row_span);
            }
            r += 1;
        }
        end.min(self.rows)
    }
}
