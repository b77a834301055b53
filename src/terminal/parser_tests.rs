use super::*;
use crate::terminal::color;

fn run(bytes: &[u8]) -> (Parser, ScreenBuffer) {
    let mut parser = Parser::new();
    let mut screen = ScreenBuffer::new(24, 80);
    parser.feed(&mut screen, bytes);
    (parser, screen)
}

#[test]
fn test_plain_text_written_verbatim() {
    let (_, screen) = run(b"Hello");
    assert_eq!(screen.cell(0, 0).codepoint, 'H');
    assert_eq!(screen.cell(0, 4).codepoint, 'o');
}

#[test]
fn test_sgr_red_foreground() {
    let (_, screen) = run(b"Hello\x1b[31mRed\x1b[0m");
    assert_eq!(screen.cell(0, 5).codepoint, 'R');
    assert_eq!(screen.cell(0, 5).fg, color::RED);
    assert_eq!(screen.cell(0, 5).bg, color::DEFAULT_BG);
    // after reset, fg goes back to default
    assert_eq!(screen.current_fg(), color::DEFAULT_FG);
}

#[test]
fn test_csi_2j_clears_and_resets_cursor() {
    let (_, mut screen) = run(b"abc");
    let mut parser = Parser::new();
    parser.feed(&mut screen, b"\x1b[2J");
    assert_eq!(screen.cell(0, 0).codepoint, ' ');
    assert_eq!((screen.cursor_row, screen.cursor_col), (0, 0));
}

#[test]
fn test_cursor_save_restore_escape_sequences() {
    let (_, mut screen) = run(b"");
    screen.move_cursor(5, 5);
    let mut parser = Parser::new();
    parser.feed(&mut screen, b"\x1b7");
    screen.move_cursor(10, 10);
    parser.feed(&mut screen, b"\x1b8");
    assert_eq!((screen.cursor_row, screen.cursor_col), (5, 5));
}

#[test]
fn test_csi_cursor_position_clamped() {
    let (_, screen) = run(b"\x1b[999;999H");
    assert_eq!((screen.cursor_row, screen.cursor_col), (23, 79));
}

#[test]
fn test_malformed_sequence_does_not_panic_or_write() {
    let (_, screen) = run(b"\x1b[9999999999999999999m\x1b[z");
    assert_eq!(screen.cell(0, 0).codepoint, ' ');
}

#[test]
fn test_osc_sequence_is_recognized_and_skipped() {
    let (_, screen) = run(b"\x1b]0;window title\x07X");
    assert_eq!(screen.cell(0, 0).codepoint, 'X');
}

#[test]
fn test_split_escape_sequence_across_feeds() {
    let mut parser = Parser::new();
    let mut screen = ScreenBuffer::new(24, 80);
    parser.feed(&mut screen, b"\x1b[3");
    parser.feed(&mut screen, b"1mR");
    assert_eq!(screen.cell(0, 0).fg, color::RED);
    assert_eq!(screen.cell(0, 0).codepoint, 'R');
}

#[test]
fn test_tab_advances_to_next_stop() {
    let (_, screen) = run(b"a\tb");
    assert_eq!(screen.cell(0, 0).codepoint, 'a');
    assert_eq!(screen.cell(0, 8).codepoint, 'b');
}

#[test]
fn test_backspace_moves_cursor_back() {
    let (_, screen) = run(b"ab\x08c");
    assert_eq!(screen.cell(0, 0).codepoint, 'a');
    assert_eq!(screen.cell(0, 1).codepoint, 'c');
}

#[test]
fn test_reverse_index_at_top_margin_scrolls_down() {
    let (_, mut screen) = run(b"top");
    let mut parser = Parser::new();
    parser.feed(&mut screen, b"\x1bM");
    assert_eq!(screen.cell(0, 0).codepoint, ' ');
    assert_eq!(screen.cell(1, 0).codepoint, 't');
    assert_eq!((screen.cursor_row, screen.cursor_col), (0, 3));
}

#[test]
fn test_reverse_index_moves_cursor_up_when_not_at_top() {
    let (_, mut screen) = run(b"");
    screen.move_cursor(5, 2);
    let mut parser = Parser::new();
    parser.feed(&mut screen, b"\x1bM");
    assert_eq!((screen.cursor_row, screen.cursor_col), (4, 2));
}
