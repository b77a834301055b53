//! Byte-stream ANSI/VT100 parser: a 4-state machine driving a [`super::ScreenBuffer`].
//!
//! Malformed or unrecognized sequences are dropped silently; the parser never fails or aborts on
//! bad input, matching how real terminals behave.

use super::color::{BRIGHT_PALETTE, DEFAULT_BG, DEFAULT_FG, PALETTE};
use super::{CellAttrs, ScreenBuffer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    Escape,
    Csi,
    Osc,
}

/// Parser state carried across calls to [`Parser::feed`]; byte streams may be split across
/// arbitrary chunk boundaries.
#[derive(Debug)]
pub struct Parser {
    state: State,
    params_buf: String,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::Normal,
            params_buf: String::new(),
        }
    }

    /// Feeds `bytes` through the parser, mutating `screen` in place.
    pub fn feed(&mut self, screen: &mut ScreenBuffer, bytes: &[u8]) {
        for &b in bytes {
            self.feed_byte(screen, b);
        }
    }

    fn feed_byte(&mut self, screen: &mut ScreenBuffer, b: u8) {
        match self.state {
            State::Normal => self.feed_normal(screen, b),
            State::Escape => self.feed_escape(screen, b),
            State::Csi => self.feed_csi(screen, b),
            State::Osc => self.feed_osc(b),
        }
    }

    fn feed_normal(&mut self, screen: &mut ScreenBuffer, b: u8) {
        match b {
            0x1B => {
                self.params_buf.clear();
                self.state = State::Escape;
            }
            b'\r' => screen.carriage_return(),
            b'\n' => screen.line_feed(),
            0x09 => screen.tab(),
            0x08 => screen.backspace(),
            _ if b >= 0x20 => {
                if let Some(cp) = decode_ascii_or_pass(b) {
                    screen.write_char(cp);
                }
            }
            _ => {}
        }
    }

    fn feed_escape(&mut self, screen: &mut ScreenBuffer, b: u8) {
        match b {
            b'[' => {
                self.params_buf.clear();
                self.state = State::Csi;
            }
            b']' => {
                self.params_buf.clear();
                self.state = State::Osc;
            }
            b'c' => {
                screen.clear_all();
                screen.reset_sgr();
                self.state = State::Normal;
            }
            b'7' => {
                screen.save_cursor();
                self.state = State::Normal;
            }
            b'8' => {
                screen.restore_cursor();
                self.state = State::Normal;
            }
            b'M' => {
                if screen.cursor_row > 0 {
                    screen.move_cursor_relative(-1, 0);
                } else {
                    screen.scroll_down();
                }
                self.state = State::Normal;
            }
            _ => {
                tracing::debug!(byte = b, "dropping unrecognized escape sequence");
                self.state = State::Normal;
            }
        }
    }

    fn feed_csi(&mut self, screen: &mut ScreenBuffer, b: u8) {
        if b.is_ascii_alphabetic() {
            self.dispatch_csi(screen, b as char);
            self.state = State::Normal;
        } else {
            self.params_buf.push(b as char);
        }
    }

    fn feed_osc(&mut self, b: u8) {
        if b == 0x07 {
            // OSC payload is intentionally discarded: window-title/hyperlink semantics are not
            // implemented.
            self.state = State::Normal;
        } else {
            self.params_buf.push(b as char);
        }
    }

    fn params(&self) -> Vec<i64> {
        if self.params_buf.is_empty() {
            return Vec::new();
        }
        self.params_buf
            .split(';')
            .map(|p| p.parse::<i64>().unwrap_or(0))
            .collect()
    }

    fn dispatch_csi(&mut self, screen: &mut ScreenBuffer, final_byte: char) {
        let params = self.params();
        let p = |idx: usize, default: i64| -> i64 {
            params.get(idx).copied().filter(|&v| v != 0).unwrap_or(default)
        };

        match final_byte {
            'A' => screen.move_cursor_relative(-(p(0, 1)) as isize, 0),
            'B' => screen.move_cursor_relative(p(0, 1) as isize, 0),
            'C' => screen.move_cursor_relative(0, p(0, 1) as isize),
            'D' => screen.move_cursor_relative(0, -(p(0, 1)) as isize),
            'H' | 'f' => {
                let row = p(0, 1).max(1) as usize - 1;
                let col = p(1, 1).max(1) as usize - 1;
                screen.move_cursor(row, col);
            }
            'J' => match params.first().copied().unwrap_or(0) {
                2 => screen.clear_all(),
                _ => screen.erase_to_end_of_screen(),
            },
            'K' => screen.erase_to_end_of_line(),
            'm' => apply_sgr(screen, &params),
            _ => tracing::debug!(%final_byte, "ignoring unrecognized CSI final byte"),
        }
    }
}

fn decode_ascii_or_pass(b: u8) -> Option<char> {
    Some(b as char)
}

fn apply_sgr(screen: &mut ScreenBuffer, params: &[i64]) {
    if params.is_empty() {
        screen.reset_sgr();
        return;
    }
    for &param in params {
        match param {
            0 => screen.reset_sgr(),
            1 => screen.insert_attrs(CellAttrs::BOLD),
            2 => screen.insert_attrs(CellAttrs::DIM),
            3 => screen.insert_attrs(CellAttrs::ITALIC),
            4 => screen.insert_attrs(CellAttrs::UNDERLINE),
            5 => screen.insert_attrs(CellAttrs::BLINK),
            7 => screen.insert_attrs(CellAttrs::REVERSE),
            8 => screen.insert_attrs(CellAttrs::HIDDEN),
            9 => screen.insert_attrs(CellAttrs::STRIKETHROUGH),
            22 => screen.remove_attrs(CellAttrs::BOLD | CellAttrs::DIM),
            23 => screen.remove_attrs(CellAttrs::ITALIC),
            24 => screen.remove_attrs(CellAttrs::UNDERLINE),
            25 => screen.remove_attrs(CellAttrs::BLINK),
            27 => screen.remove_attrs(CellAttrs::REVERSE),
            28 => screen.remove_attrs(CellAttrs::HIDDEN),
            29 => screen.remove_attrs(CellAttrs::STRIKETHROUGH),
            30..=37 => screen.set_fg(PALETTE[(param - 30) as usize]),
            39 => screen.set_fg(DEFAULT_FG),
            40..=47 => screen.set_bg(PALETTE[(param - 40) as usize]),
            49 => screen.set_bg(DEFAULT_BG),
            90..=97 => screen.set_fg(BRIGHT_PALETTE[(param - 90) as usize]),
            100..=107 => screen.set_bg(BRIGHT_PALETTE[(param - 100) as usize]),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
