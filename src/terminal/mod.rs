//! Terminal screen model: a cell grid driven by an ANSI/VT100 byte-stream parser.
//!
//! ## terminal/ Invariants
//! - `0 <= cursor_row < rows` always; `cursor_col` may transiently equal `cols` between a
//!   character write and the next write's wrap.
//! - `cells` is row-major and always has exactly `rows * cols` entries.
//! - SGR state (`current_fg`/`current_bg`/`current_attrs`) applies to every subsequent
//!   `write_char` until changed again; it is never implicitly reset by cursor movement.

pub mod color;
pub mod parser;

use color::{Color, DEFAULT_BG, DEFAULT_FG};
use unicode_width::UnicodeWidthChar;

bitflags::bitflags! {
    /// Text style attributes set by SGR parameters.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CellAttrs: u8 {
        const BOLD          = 0b0000_0001;
        const DIM           = 0b0000_0010;
        const ITALIC        = 0b0000_0100;
        const UNDERLINE     = 0b0000_1000;
        const BLINK         = 0b0001_0000;
        const REVERSE       = 0b0010_0000;
        const HIDDEN        = 0b0100_0000;
        const STRIKETHROUGH = 0b1000_0000;
    }
}

/// One styled character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub codepoint: char,
    pub fg: Color,
    pub bg: Color,
    pub attrs: CellAttrs,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            codepoint: ' ',
            fg: DEFAULT_FG,
            bg: DEFAULT_BG,
            attrs: CellAttrs::empty(),
        }
    }
}

/// A fixed-size grid of cells with a cursor and current SGR state.
#[derive(Debug)]
pub struct ScreenBuffer {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
    pub cursor_row: usize,
    pub cursor_col: usize,
    current_fg: Color,
    current_bg: Color,
    current_attrs: CellAttrs,
    saved_cursor: (usize, usize),
}

impl ScreenBuffer {
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            cells: vec![Cell::default(); rows * cols],
            rows,
            cols,
            cursor_row: 0,
            cursor_col: 0,
            current_fg: DEFAULT_FG,
            current_bg: DEFAULT_BG,
            current_attrs: CellAttrs::empty(),
            saved_cursor: (0, 0),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.cols + col]
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.cells[row * self.cols + col]
    }

    pub fn current_fg(&self) -> Color {
        self.current_fg
    }

    pub fn current_bg(&self) -> Color {
        self.current_bg
    }

    pub fn current_attrs(&self) -> CellAttrs {
        self.current_attrs
    }

    pub fn set_fg(&mut self, color: Color) {
        self.current_fg = color;
    }

    pub fn set_bg(&mut self, color: Color) {
        self.current_bg = color;
    }

    pub fn insert_attrs(&mut self, attrs: CellAttrs) {
        self.current_attrs.insert(attrs);
    }

    pub fn remove_attrs(&mut self, attrs: CellAttrs) {
        self.current_attrs.remove(attrs);
    }

    pub fn reset_sgr(&mut self) {
        self.current_fg = DEFAULT_FG;
        self.current_bg = DEFAULT_BG;
        self.current_attrs = CellAttrs::empty();
    }

    /// Writes `cp` at the cursor with the current SGR state, then advances the cursor by the
    /// character's display width (double for wide CJK/fullwidth codepoints, zero for combining
    /// marks), wrapping to the next row (and scrolling if already at the last row) on overflow.
    pub fn write_char(&mut self, cp: char) {
        let width = cp.width().unwrap_or(1).max(1);
        if self.cursor_col + width > self.cols {
            self.cursor_col = 0;
            self.advance_row();
        }
        let (row, col, fg, bg, attrs) = (
            self.cursor_row,
            self.cursor_col,
            self.current_fg,
            self.current_bg,
            self.current_attrs,
        );
        *self.cell_mut(row, col) = Cell {
            codepoint: cp,
            fg,
            bg,
            attrs,
        };
        self.cursor_col += width;
    }

    fn advance_row(&mut self) {
        if self.cursor_row + 1 < self.rows {
            self.cursor_row += 1;
        } else {
            // cursor_row would overflow to `rows`; shift content up without scroll_up's own
            // cursor decrement, so the net effect leaves the cursor on the last row.
            self.shift_rows_up();
        }
    }

    pub fn move_cursor(&mut self, row: usize, col: usize) {
        self.cursor_row = row.min(self.rows - 1);
        self.cursor_col = col.min(self.cols.saturating_sub(1));
    }

    pub fn move_cursor_relative(&mut self, d_row: isize, d_col: isize) {
        let row = (self.cursor_row as isize + d_row).clamp(0, self.rows as isize - 1) as usize;
        let col = (self.cursor_col as isize + d_col).clamp(0, self.cols as isize - 1) as usize;
        self.cursor_row = row;
        self.cursor_col = col;
    }

    pub fn carriage_return(&mut self) {
        self.cursor_col = 0;
    }

    pub fn line_feed(&mut self) {
        self.advance_row();
    }

    pub fn backspace(&mut self) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    pub fn tab(&mut self) {
        self.cursor_col = ((self.cursor_col / 8) + 1) * 8;
        if self.cursor_col >= self.cols {
            self.cursor_col = self.cols - 1;
        }
    }

    fn shift_rows_up(&mut self) {
        if self.rows > 1 {
            self.cells.copy_within(self.cols.., 0);
        }
        let last_row_start = (self.rows - 1) * self.cols;
        for cell in &mut self.cells[last_row_start..] {
            *cell = Cell::default();
        }
    }

    /// Shifts rows `[1, rows)` up into `[0, rows-1)` and clears the last row. If the cursor was
    /// below the top row, decrements `cursor_row` to keep it pointing at the same line of content.
    ///
    /// This is the standalone scroll operation, not the one `write_char`/line-feed overflow uses
    /// internally — that path shifts rows without this decrement, since incrementing past the
    /// last row and then undoing one row nets out to leaving the cursor on the last row.
    pub fn scroll_up(&mut self) {
        self.shift_rows_up();
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
        }
    }

    /// Shifts rows `[0, rows-1)` down into `[1, rows)` and clears the first row. Used by reverse
    /// index (`ESC M`) when the cursor is already at the top margin.
    fn scroll_down(&mut self) {
        if self.rows > 1 {
            self.cells.copy_within(..(self.rows - 1) * self.cols, self.cols);
        }
        for cell in &mut self.cells[..self.cols] {
            *cell = Cell::default();
        }
    }

    pub fn erase_to_end_of_line(&mut self) {
        let row = self.cursor_row;
        let start = row * self.cols + self.cursor_col;
        let end = (row + 1) * self.cols;
        for cell in &mut self.cells[start..end] {
            *cell = Cell::default();
        }
    }

    pub fn erase_to_end_of_screen(&mut self) {
        self.erase_to_end_of_line();
        let start = (self.cursor_row + 1) * self.cols;
        for cell in &mut self.cells[start..] {
            *cell = Cell::default();
        }
    }

    pub fn clear_all(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
        self.cursor_row = 0;
        self.cursor_col = 0;
    }

    pub fn save_cursor(&mut self) {
        self.saved_cursor = (self.cursor_row, self.cursor_col);
    }

    pub fn restore_cursor(&mut self) {
        (self.cursor_row, self.cursor_col) = self.saved_cursor;
    }
}
