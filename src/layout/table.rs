use super::flow::{Overflow, PageFlow};
use super::paragraph::ParagraphLines;
use super::LayoutContext;
use crate::error::LayoutError;
use crate::metrics::FontMetrics;
use crate::page::{CellLayout, Page};
use crate::rect::Rect;
use crate::style::ResolvedCellStyle;
use crate::table::{PlacedCell, Table, TableGrid};
use crate::units::Pt;

/// A cell with its content wrapped to the width of the columns it spans
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredCell {
    pub placed: PlacedCell,
    pub style: ResolvedCellStyle,
    pub paragraphs: Vec<ParagraphLines>,
    /// Content plus vertical padding
    pub height: Pt,
}

/// Column widths, row heights, and wrapped cell content of a table, independent of
/// where it ends up on the page
#[derive(Debug, Clone, PartialEq)]
pub struct TableMeasure {
    pub column_widths: Vec<Pt>,
    pub row_heights: Vec<Pt>,
    pub cells: Vec<MeasuredCell>,
}

impl TableMeasure {
    pub fn measure<M: FontMetrics + ?Sized>(
        table: &Table,
        grid: &TableGrid,
        available: Pt,
        ctx: &LayoutContext<'_, M>,
    ) -> Result<TableMeasure, LayoutError> {
        let column_widths = column_widths(table.column_widths(), grid.columns, available);

        let mut cells = Vec::with_capacity(grid.cells.len());
        for placed in grid.cells.iter() {
            let row = &table.rows[placed.row];
            let cell = &row.cells[placed.index];
            let style = cell.style.or(&row.style).or(&table.style).resolve();

            let width = span_width(&column_widths, placed.column, placed.column_span);
            let content_width = (width - style.padding.horizontal()).max(Pt::ZERO);
            let paragraphs = cell
                .paragraphs
                .iter()
                .map(|p| ParagraphLines::wrap(p, content_width, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            let height = paragraphs.iter().map(ParagraphLines::height).sum::<Pt>()
                + style.padding.vertical();

            cells.push(MeasuredCell {
                placed: *placed,
                style,
                paragraphs,
                height,
            });
        }

        let row_heights = row_heights(grid.rows, &cells);
        Ok(TableMeasure {
            column_widths,
            row_heights,
            cells,
        })
    }

    pub fn rows_height(&self, start: usize, end: usize) -> Pt {
        self.row_heights[start..end].iter().copied().sum()
    }

    pub fn width(&self) -> Pt {
        self.column_widths.iter().copied().sum()
    }

    /// Draw rows `[start, end)` with the top of row `start` at `top`
    fn draw_rows(&self, page: &mut Page, start: usize, end: usize, left: Pt, top: Pt) {
        for cell in self
            .cells
            .iter()
            .filter(|c| c.placed.row >= start && c.placed.row < end)
        {
            let placed = &cell.placed;
            let x = left + span_width(&self.column_widths, 0, placed.column);
            let y = top + self.rows_height(start, placed.row);
            let width = span_width(&self.column_widths, placed.column, placed.column_span);
            let height = self.rows_height(placed.row, placed.row + placed.row_span);
            page.add_cell(CellLayout {
                position: Rect::from_origin(x, y, width, height),
                style: cell.style,
            });

            let padding = cell.style.padding;
            let mut y = y + padding.top;
            for paragraph in cell.paragraphs.iter() {
                y = paragraph.draw(page, x + padding.left, y);
            }
        }
    }
}

/// Explicit widths are used as given. Columns without one share whatever the explicit
/// ones leave of `available`, never going below zero.
pub fn column_widths(explicit: &[Option<Pt>], columns: usize, available: Pt) -> Vec<Pt> {
    let given = |c: usize| explicit.get(c).copied().flatten();
    let used: Pt = (0..columns).filter_map(given).sum();
    let unset = (0..columns).filter(|&c| given(c).is_none()).count();
    let share = if unset > 0 {
        ((available - used) / unset as f32).max(Pt::ZERO)
    } else {
        Pt::ZERO
    };
    (0..columns)
        .map(|c| given(c).unwrap_or(share))
        .collect()
}

fn row_too_tall(row: usize, overflow: Overflow) -> LayoutError {
    LayoutError::RowTooTall {
        row,
        height: overflow.height,
        available: overflow.available,
    }
}

fn span_width(widths: &[Pt], column: usize, span: usize) -> Pt {
    widths.iter().skip(column).take(span).copied().sum()
}

/// Each row is as tall as its tallest single-row cell. A cell spanning rows that
/// needs more than its rows add up to stretches the last row it covers.
fn row_heights(rows: usize, cells: &[MeasuredCell]) -> Vec<Pt> {
    let mut heights = vec![Pt::ZERO; rows];
    for cell in cells.iter().filter(|c| c.placed.row_span == 1) {
        let row = cell.placed.row;
        heights[row] = heights[row].max(cell.height);
    }

    let mut spanning: Vec<&MeasuredCell> =
        cells.iter().filter(|c| c.placed.row_span > 1).collect();
    spanning.sort_by_key(|c| c.placed.row + c.placed.row_span);
    for cell in spanning {
        let start = cell.placed.row;
        let end = start + cell.placed.row_span;
        let covered: Pt = heights[start..end].iter().copied().sum();
        if cell.height > covered {
            heights[end - 1] += cell.height - covered;
        }
    }
    heights
}

/// Place a validated table at the cursor, breaking pages between row groups. Rows
/// joined by a row span always share a page. Leading header rows are kept with the
/// first group of body rows and, when the table asks for it, drawn again at the top
/// of every page the table continues on.
pub fn layout_table<M: FontMetrics + ?Sized>(
    table: &Table,
    grid: &TableGrid,
    flow: &mut PageFlow,
    ctx: &LayoutContext<'_, M>,
) -> Result<(), LayoutError> {
    let measure = TableMeasure::measure(table, grid, flow.content_box().width(), ctx)?;

    let mut groups = Vec::new();
    let mut start = 0;
    while start < grid.rows {
        let end = grid.row_group_end(start);
        groups.push((start, end));
        start = end;
    }

    // header rows only count as such if no span ties them to the body
    let header_rows = table.header_row_count();
    let header_end = if groups.iter().any(|&(_, end)| end == header_rows) {
        header_rows
    } else {
        if header_rows > 0 {
            log::warn!("header rows are joined to the body by a row span; not repeating them");
        }
        0
    };
    let header_height = measure.rows_height(0, header_end);
    let repeat = table.repeat_header() && header_end > 0;
    log::debug!(
        "table of {} rows x {} columns in {} groups, {} header rows",
        grid.rows,
        grid.columns,
        groups.len(),
        header_end
    );

    let body = groups.iter().skip_while(|&&(_, end)| end <= header_end);

    if header_end > 0 {
        let first_body = body
            .clone()
            .next()
            .map(|&(s, e)| measure.rows_height(s, e))
            .unwrap_or(Pt::ZERO);
        flow.reserve(header_height + first_body)
            .map_err(|o| row_too_tall(0, o))?;
        let top = flow
            .place(header_height)
            .map_err(|o| row_too_tall(0, o))?;
        let left = flow.content_box().x1;
        measure.draw_rows(flow.page_mut(), 0, header_end, left, top);
    }

    for &(start, end) in body {
        let height = measure.rows_height(start, end);
        if repeat && !flow.fits(height) {
            if !flow.fits_on_empty_page(header_height + height) {
                return Err(LayoutError::RowTooTall {
                    row: start,
                    height: header_height + height,
                    available: flow.page_style().content_height(),
                });
            }
            flow.new_page();
            let top = flow.cursor_y();
            flow.advance(header_height);
            let left = flow.content_box().x1;
            measure.draw_rows(flow.page_mut(), 0, header_end, left, top);
        }
        let top = flow.place(height).map_err(|o| row_too_tall(start, o))?;
        let left = flow.content_box().x1;
        measure.draw_rows(flow.page_mut(), start, end, left, top);
    }
    Ok(())
}
