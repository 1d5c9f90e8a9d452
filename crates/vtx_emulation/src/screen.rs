//! The abstract mutation surface the emulator drives.
//!
//! Storage of lines, cells and scrollback lives behind this trait; the
//! emulator only invokes operations and reads the few values its replies
//! need (cursor position, geometry, cell snapshots for region checksums).

use bitflags::bitflags;

bitflags! {
    /// Character rendition attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Rendition: u16 {
        const BOLD = 1;
        const BLINK = 2;
        const UNDERLINE = 4;
        const REVERSE = 8;
        const ITALIC = 16;
        const FAINT = 32;
        const STRIKEOUT = 64;
        const CONCEAL = 128;
        const OVERLINE = 256;
    }
}

/// Which palette a color value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// The terminal default foreground/background.
    Default,
    /// The 16-color system palette (0..=7 normal, 8..=15 intensive).
    System,
    /// The xterm 256-color palette.
    Indexed,
    /// Direct color, value packed as `(r << 16) | (g << 8) | b`.
    Rgb,
}

/// Per-line display attributes (DECDWL / DECDHL).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineProperty {
    DoubleWidth,
    DoubleHeightTop,
    DoubleHeightBottom,
}

/// Modes that live in the screen so they travel with save/restore and the
/// primary/alternate switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    /// Cursor visibility (DECTCEM).
    Cursor,
    /// Insert vs replace (IRM).
    Insert,
    /// Cursor addressing relative to the margins (DECOM).
    Origin,
    /// Wrap at the right margin (DECAWM).
    Wrap,
    /// Reverse video (DECSCNM).
    ReverseVideo,
    /// Newline implies carriage return (LNM).
    NewLine,
}

/// Snapshot of one cell, as needed by the region checksum report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSnapshot {
    pub character: char,
    pub rendition: Rendition,
}

impl Default for CellSnapshot {
    fn default() -> Self {
        CellSnapshot {
            character: ' ',
            rendition: Rendition::empty(),
        }
    }
}

pub trait Screen {
    // Cursor motion
    fn cursor_up(&mut self, n: i32);
    fn cursor_down(&mut self, n: i32);
    fn cursor_left(&mut self, n: i32);
    fn cursor_right(&mut self, n: i32);
    /// 1-based column.
    fn set_cursor_x(&mut self, x: i32);
    /// 1-based line.
    fn set_cursor_y(&mut self, y: i32);
    /// 1-based line and column; (1, 1) is the home position.
    fn set_cursor_yx(&mut self, y: i32, x: i32);
    /// Move down one line, scrolling the region at the bottom margin.
    fn index(&mut self);
    /// Move up one line, scrolling the region at the top margin.
    fn reverse_index(&mut self);
    fn next_line(&mut self);
    fn to_start_of_line(&mut self);

    // Character output
    fn display_character(&mut self, c: char);
    fn backspace(&mut self);
    fn tab(&mut self, n: i32);
    fn backtab(&mut self, n: i32);
    fn new_line(&mut self);
    fn insert_chars(&mut self, n: i32);
    fn delete_chars(&mut self, n: i32);
    fn erase_chars(&mut self, n: i32);
    /// Repeat the preceding displayed character.
    fn repeat_chars(&mut self, n: i32);
    fn insert_lines(&mut self, n: i32);
    fn delete_lines(&mut self, n: i32);

    // Clearing
    fn clear_to_end_of_line(&mut self);
    fn clear_to_begin_of_line(&mut self);
    fn clear_entire_line(&mut self);
    fn clear_to_end_of_screen(&mut self);
    fn clear_to_begin_of_screen(&mut self);
    fn clear_entire_screen(&mut self);

    // Scrolling, margins, tab stops
    fn scroll_up(&mut self, n: i32);
    fn scroll_down(&mut self, n: i32);
    /// 1-based inclusive top and bottom margin.
    fn set_margins(&mut self, top: i32, bottom: i32);
    fn set_default_margins(&mut self);
    fn change_tab_stop(&mut self, set: bool);
    fn clear_tab_stops(&mut self);

    // Rendition
    fn set_rendition(&mut self, rendition: Rendition);
    fn reset_rendition(&mut self, rendition: Rendition);
    fn set_default_rendition(&mut self);
    fn set_fore_color(&mut self, space: ColorSpace, color: i32);
    fn set_back_color(&mut self, space: ColorSpace, color: i32);
    fn set_line_property(&mut self, property: LineProperty, enable: bool);

    // State
    fn save_cursor(&mut self);
    fn restore_cursor(&mut self);
    fn set_mode(&mut self, mode: ScreenMode);
    fn reset_mode(&mut self, mode: ScreenMode);
    fn save_mode(&mut self, mode: ScreenMode);
    fn restore_mode(&mut self, mode: ScreenMode);
    fn get_mode(&self, mode: ScreenMode) -> bool;
    fn set_image_size(&mut self, lines: i32, columns: i32);
    /// Fill the screen with `E` (DECALN).
    fn help_align(&mut self);
    fn clear_selection(&mut self);

    // Read access for device reports
    /// 0-based cursor column.
    fn cursor_x(&self) -> i32;
    /// 0-based cursor line.
    fn cursor_y(&self) -> i32;
    /// 0-based top margin line.
    fn top_margin(&self) -> i32;
    fn lines(&self) -> i32;
    fn columns(&self) -> i32;
    /// Cell at a 0-based (line, column) position.
    fn cell(&self, line: i32, column: i32) -> CellSnapshot;
}
