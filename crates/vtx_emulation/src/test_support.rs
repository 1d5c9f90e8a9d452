//! Shared fixtures: a recording screen, a capturing host and a manually
//! driven flush timer.

use std::cell::RefCell;
use std::rc::Rc;

use vtx_parser_core::{OscTerminator, ParseError};

use crate::emulator::Emulator;
use crate::host::{CursorShape, ScrollCommand, TerminalHost};
use crate::screen::{CellSnapshot, ColorSpace, LineProperty, Rendition, Screen, ScreenMode};
use crate::session::FlushTimer;

fn mode_index(mode: ScreenMode) -> usize {
    match mode {
        ScreenMode::Cursor => 0,
        ScreenMode::Insert => 1,
        ScreenMode::Origin => 2,
        ScreenMode::Wrap => 3,
        ScreenMode::ReverseVideo => 4,
        ScreenMode::NewLine => 5,
    }
}

/// In-memory screen that records every operation (for ordering
/// assertions) and keeps just enough state for the report round-trips:
/// cursor position, margins, modes, a character grid with renditions.
pub(crate) struct TestScreen {
    pub ops: Vec<String>,
    pub lines: i32,
    pub columns: i32,
    pub cursor_x: i32,
    pub cursor_y: i32,
    saved_cursor: (i32, i32),
    pub top_margin: i32,
    pub bottom_margin: i32,
    pub cells: Vec<Vec<CellSnapshot>>,
    pub rendition: Rendition,
    last_char: char,
    modes: [bool; 6],
    saved_modes: [bool; 6],
}

impl TestScreen {
    pub fn new(lines: i32, columns: i32) -> Self {
        let mut modes = [false; 6];
        modes[mode_index(ScreenMode::Cursor)] = true;
        modes[mode_index(ScreenMode::Wrap)] = true;
        TestScreen {
            ops: Vec::new(),
            lines,
            columns,
            cursor_x: 0,
            cursor_y: 0,
            saved_cursor: (0, 0),
            top_margin: 0,
            bottom_margin: lines - 1,
            cells: vec![vec![CellSnapshot::default(); columns as usize]; lines as usize],
            rendition: Rendition::empty(),
            last_char: ' ',
            modes,
            saved_modes: [false; 6],
        }
    }

    fn op(&mut self, op: impl Into<String>) {
        self.ops.push(op.into());
    }

    fn clamp(&mut self) {
        self.cursor_x = self.cursor_x.clamp(0, self.columns - 1);
        self.cursor_y = self.cursor_y.clamp(0, self.lines - 1);
    }

    fn put(&mut self, c: char) {
        let (y, x) = (self.cursor_y as usize, self.cursor_x as usize);
        if y < self.cells.len() && x < self.cells[y].len() {
            self.cells[y][x] = CellSnapshot {
                character: c,
                rendition: self.rendition,
            };
        }
        self.cursor_x += 1;
        self.clamp();
    }

    /// Operations matching one of the given prefixes, in order.
    pub fn ops_matching(&self, prefixes: &[&str]) -> Vec<String> {
        self.ops
            .iter()
            .filter(|op| prefixes.iter().any(|prefix| op.starts_with(prefix)))
            .cloned()
            .collect()
    }

    pub fn row_text(&self, line: usize) -> String {
        self.cells[line]
            .iter()
            .map(|cell| cell.character)
            .collect::<String>()
            .trim_end()
            .to_string()
    }
}

pub(crate) type ScreenHandle = Rc<RefCell<TestScreen>>;

impl Screen for ScreenHandle {
    fn cursor_up(&mut self, n: i32) {
        let mut s = self.borrow_mut();
        s.cursor_y -= n;
        s.clamp();
        s.op(format!("up {n}"));
    }

    fn cursor_down(&mut self, n: i32) {
        let mut s = self.borrow_mut();
        s.cursor_y += n;
        s.clamp();
        s.op(format!("down {n}"));
    }

    fn cursor_left(&mut self, n: i32) {
        let mut s = self.borrow_mut();
        s.cursor_x -= n;
        s.clamp();
        s.op(format!("left {n}"));
    }

    fn cursor_right(&mut self, n: i32) {
        let mut s = self.borrow_mut();
        s.cursor_x += n;
        s.clamp();
        s.op(format!("right {n}"));
    }

    fn set_cursor_x(&mut self, x: i32) {
        let mut s = self.borrow_mut();
        s.cursor_x = x - 1;
        s.clamp();
        s.op(format!("set_x {x}"));
    }

    fn set_cursor_y(&mut self, y: i32) {
        let mut s = self.borrow_mut();
        s.cursor_y = y - 1;
        s.clamp();
        s.op(format!("set_y {y}"));
    }

    fn set_cursor_yx(&mut self, y: i32, x: i32) {
        let mut s = self.borrow_mut();
        s.cursor_y = y - 1;
        s.cursor_x = x - 1;
        s.clamp();
        s.op(format!("set_yx {y} {x}"));
    }

    fn index(&mut self) {
        self.borrow_mut().op("index");
    }

    fn reverse_index(&mut self) {
        self.borrow_mut().op("reverse_index");
    }

    fn next_line(&mut self) {
        let mut s = self.borrow_mut();
        s.cursor_x = 0;
        s.cursor_y += 1;
        s.clamp();
        s.op("next_line");
    }

    fn to_start_of_line(&mut self) {
        let mut s = self.borrow_mut();
        s.cursor_x = 0;
        s.op("cr");
    }

    fn display_character(&mut self, c: char) {
        let mut s = self.borrow_mut();
        s.last_char = c;
        s.put(c);
        s.op(format!("chr {c}"));
    }

    fn backspace(&mut self) {
        let mut s = self.borrow_mut();
        s.cursor_x -= 1;
        s.clamp();
        s.op("backspace");
    }

    fn tab(&mut self, n: i32) {
        self.borrow_mut().op(format!("tab {n}"));
    }

    fn backtab(&mut self, n: i32) {
        self.borrow_mut().op(format!("backtab {n}"));
    }

    fn new_line(&mut self) {
        let mut s = self.borrow_mut();
        s.cursor_y += 1;
        s.clamp();
        s.op("new_line");
    }

    fn insert_chars(&mut self, n: i32) {
        self.borrow_mut().op(format!("insert_chars {n}"));
    }

    fn delete_chars(&mut self, n: i32) {
        self.borrow_mut().op(format!("delete_chars {n}"));
    }

    fn erase_chars(&mut self, n: i32) {
        self.borrow_mut().op(format!("erase_chars {n}"));
    }

    fn repeat_chars(&mut self, n: i32) {
        let mut s = self.borrow_mut();
        let c = s.last_char;
        for _ in 0..n {
            s.put(c);
        }
        s.op(format!("repeat_chars {n}"));
    }

    fn insert_lines(&mut self, n: i32) {
        self.borrow_mut().op(format!("insert_lines {n}"));
    }

    fn delete_lines(&mut self, n: i32) {
        self.borrow_mut().op(format!("delete_lines {n}"));
    }

    fn clear_to_end_of_line(&mut self) {
        self.borrow_mut().op("clear_line_end");
    }

    fn clear_to_begin_of_line(&mut self) {
        self.borrow_mut().op("clear_line_begin");
    }

    fn clear_entire_line(&mut self) {
        self.borrow_mut().op("clear_line");
    }

    fn clear_to_end_of_screen(&mut self) {
        self.borrow_mut().op("clear_screen_end");
    }

    fn clear_to_begin_of_screen(&mut self) {
        self.borrow_mut().op("clear_screen_begin");
    }

    fn clear_entire_screen(&mut self) {
        let mut s = self.borrow_mut();
        let (lines, columns) = (s.lines as usize, s.columns as usize);
        s.cells = vec![vec![CellSnapshot::default(); columns]; lines];
        s.op("clear_screen");
    }

    fn scroll_up(&mut self, n: i32) {
        self.borrow_mut().op(format!("scroll_up {n}"));
    }

    fn scroll_down(&mut self, n: i32) {
        self.borrow_mut().op(format!("scroll_down {n}"));
    }

    fn set_margins(&mut self, top: i32, bottom: i32) {
        let mut s = self.borrow_mut();
        s.top_margin = top - 1;
        s.bottom_margin = bottom - 1;
        s.op(format!("margins {top} {bottom}"));
    }

    fn set_default_margins(&mut self) {
        let mut s = self.borrow_mut();
        s.top_margin = 0;
        s.bottom_margin = s.lines - 1;
        s.op("default_margins");
    }

    fn change_tab_stop(&mut self, set: bool) {
        self.borrow_mut().op(format!("tab_stop {set}"));
    }

    fn clear_tab_stops(&mut self) {
        self.borrow_mut().op("clear_tab_stops");
    }

    fn set_rendition(&mut self, rendition: Rendition) {
        let mut s = self.borrow_mut();
        s.rendition |= rendition;
        s.op(format!("rendition+{rendition:?}"));
    }

    fn reset_rendition(&mut self, rendition: Rendition) {
        let mut s = self.borrow_mut();
        s.rendition -= rendition;
        s.op(format!("rendition-{rendition:?}"));
    }

    fn set_default_rendition(&mut self) {
        let mut s = self.borrow_mut();
        s.rendition = Rendition::empty();
        s.op("default_rendition");
    }

    fn set_fore_color(&mut self, space: ColorSpace, color: i32) {
        self.borrow_mut().op(format!("fore {space:?} {color}"));
    }

    fn set_back_color(&mut self, space: ColorSpace, color: i32) {
        self.borrow_mut().op(format!("back {space:?} {color}"));
    }

    fn set_line_property(&mut self, property: LineProperty, enable: bool) {
        self.borrow_mut()
            .op(format!("line_property {property:?} {enable}"));
    }

    fn save_cursor(&mut self) {
        let mut s = self.borrow_mut();
        s.saved_cursor = (s.cursor_y, s.cursor_x);
        s.op("save_cursor");
    }

    fn restore_cursor(&mut self) {
        let mut s = self.borrow_mut();
        let (y, x) = s.saved_cursor;
        s.cursor_y = y;
        s.cursor_x = x;
        s.op("restore_cursor");
    }

    fn set_mode(&mut self, mode: ScreenMode) {
        let mut s = self.borrow_mut();
        s.modes[mode_index(mode)] = true;
        s.op(format!("mode+{mode:?}"));
    }

    fn reset_mode(&mut self, mode: ScreenMode) {
        let mut s = self.borrow_mut();
        s.modes[mode_index(mode)] = false;
        s.op(format!("mode-{mode:?}"));
    }

    fn save_mode(&mut self, mode: ScreenMode) {
        let mut s = self.borrow_mut();
        s.saved_modes[mode_index(mode)] = s.modes[mode_index(mode)];
    }

    fn restore_mode(&mut self, mode: ScreenMode) {
        let mut s = self.borrow_mut();
        s.modes[mode_index(mode)] = s.saved_modes[mode_index(mode)];
    }

    fn get_mode(&self, mode: ScreenMode) -> bool {
        self.borrow().modes[mode_index(mode)]
    }

    fn set_image_size(&mut self, lines: i32, columns: i32) {
        let mut s = self.borrow_mut();
        s.lines = lines;
        s.columns = columns;
        s.bottom_margin = lines - 1;
        s.cells = vec![vec![CellSnapshot::default(); columns as usize]; lines as usize];
        s.clamp();
        s.op(format!("size {lines}x{columns}"));
    }

    fn help_align(&mut self) {
        self.borrow_mut().op("help_align");
    }

    fn clear_selection(&mut self) {
        self.borrow_mut().op("clear_selection");
    }

    fn cursor_x(&self) -> i32 {
        self.borrow().cursor_x
    }

    fn cursor_y(&self) -> i32 {
        self.borrow().cursor_y
    }

    fn top_margin(&self) -> i32 {
        self.borrow().top_margin
    }

    fn lines(&self) -> i32 {
        self.borrow().lines
    }

    fn columns(&self) -> i32 {
        self.borrow().columns
    }

    fn cell(&self, line: i32, column: i32) -> CellSnapshot {
        self.borrow().cells[line as usize][column as usize]
    }
}

/// Captures every host event.
#[derive(Default)]
pub(crate) struct TestHost {
    pub sent: Vec<u8>,
    pub bells: usize,
    pub resizes: Vec<(i32, i32)>,
    pub cursor_styles: Vec<(CursorShape, bool)>,
    pub cursor_style_resets: usize,
    pub mouse_tracking: Vec<bool>,
    pub bracketed_paste: Vec<bool>,
    pub alternate_scrolling: Vec<bool>,
    pub attributes_changed: Vec<(i32, String)>,
    pub attribute_requests: Vec<(i32, OscTerminator)>,
    pub flow_control: Vec<bool>,
    pub scrolls: Vec<ScrollCommand>,
    pub hyperlinks: Vec<String>,
    pub errors: Vec<ParseError>,
}

impl TerminalHost for TestHost {
    fn send_data(&mut self, data: &[u8]) {
        self.sent.extend_from_slice(data);
    }

    fn bell(&mut self) {
        self.bells += 1;
    }

    fn image_resize_request(&mut self, columns: i32, lines: i32) {
        self.resizes.push((columns, lines));
    }

    fn set_cursor_style_request(&mut self, shape: CursorShape, blinking: bool) {
        self.cursor_styles.push((shape, blinking));
    }

    fn reset_cursor_style_request(&mut self) {
        self.cursor_style_resets += 1;
    }

    fn mouse_tracking_requested(&mut self, enabled: bool) {
        self.mouse_tracking.push(enabled);
    }

    fn bracketed_paste_mode_changed(&mut self, enabled: bool) {
        self.bracketed_paste.push(enabled);
    }

    fn alternate_scrolling_changed(&mut self, enabled: bool) {
        self.alternate_scrolling.push(enabled);
    }

    fn session_attribute_changed(&mut self, id: i32, value: &str) {
        self.attributes_changed.push((id, value.to_string()));
    }

    fn session_attribute_request(&mut self, id: i32, terminator: OscTerminator) {
        self.attribute_requests.push((id, terminator));
    }

    fn flow_control_key_pressed(&mut self, suspend: bool) {
        self.flow_control.push(suspend);
    }

    fn scroll_command(&mut self, command: ScrollCommand) {
        self.scrolls.push(command);
    }

    fn hyperlink(&mut self, url: &str) {
        self.hyperlinks.push(url.to_string());
    }

    fn report_error(&mut self, error: &ParseError) {
        self.errors.push(error.clone());
    }
}

#[derive(Debug, Default)]
pub(crate) struct SharedTimer {
    pub armed: bool,
}

pub(crate) type TimerHandle = Rc<RefCell<SharedTimer>>;

impl FlushTimer for TimerHandle {
    fn arm(&mut self) {
        self.borrow_mut().armed = true;
    }

    fn disarm(&mut self) {
        self.borrow_mut().armed = false;
    }

    fn is_armed(&self) -> bool {
        self.borrow().armed
    }
}

pub(crate) struct Fixture {
    pub emulator: Emulator,
    pub primary: ScreenHandle,
    pub alternate: ScreenHandle,
    pub timer: TimerHandle,
    pub host: TestHost,
}

pub(crate) fn fixture() -> Fixture {
    let primary: ScreenHandle = Rc::new(RefCell::new(TestScreen::new(24, 80)));
    let alternate: ScreenHandle = Rc::new(RefCell::new(TestScreen::new(24, 80)));
    let timer: TimerHandle = Rc::new(RefCell::new(SharedTimer::default()));
    let emulator = Emulator::new(
        Box::new(primary.clone()),
        Box::new(alternate.clone()),
        Box::new(timer.clone()),
    );
    Fixture {
        emulator,
        primary,
        alternate,
        timer,
        host: TestHost::default(),
    }
}

impl Fixture {
    pub fn feed(&mut self, input: &str) {
        for cc in input.chars() {
            self.emulator.receive_char(&mut self.host, cc);
        }
    }

    pub fn feed_bytes(&mut self, data: &[u8]) {
        self.emulator.receive_bytes(&mut self.host, data);
    }

    pub fn sent_text(&self) -> String {
        String::from_utf8_lossy(&self.host.sent).into_owned()
    }
}
