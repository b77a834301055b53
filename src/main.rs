//! Exercises the editing core end to end: a rope edit under undo tracking, a handful of ANSI
//! bytes through the terminal parser, and a fuzzy-picker pass over the current directory.

use glyphcore::fuzzy::{find_files, Finder};
use glyphcore::rope::Rope;
use glyphcore::terminal::parser::Parser;
use glyphcore::terminal::ScreenBuffer;
use glyphcore::undo::UndoStack;

fn run() -> glyphcore::Result<()> {
    let mut rope = Rope::new();
    let mut undo = UndoStack::new(100);

    rope.insert(0, b"hello")?;
    undo.record(&rope, rope.len(), "insert hello");
    rope.insert(5, b" world")?;
    undo.record(&rope, rope.len(), "insert world");

    tracing::info!(content = %rope.to_string_lossy(), "buffer after edits");

    if let Some(snap) = undo.undo() {
        tracing::info!(content = ?String::from_utf8_lossy(&snap.content), "after undo");
    }

    let mut parser = Parser::new();
    let mut screen = ScreenBuffer::new(4, 40);
    parser.feed(&mut screen, b"Hello, \x1b[31mworld\x1b[0m!");
    let row: String = (0..screen.cols())
        .map(|c| screen.cell(0, c).codepoint)
        .collect();
    println!("{}", row.trim_end());

    let mut finder = Finder::new();
    find_files(&mut finder, &std::env::current_dir()?, 4);
    for scored in finder.filter("rope").into_iter().take(5) {
        println!("{:>5} {}", scored.score, scored.entry.display);
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
