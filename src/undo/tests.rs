use super::*;
use crate::rope::Rope;

fn rope_with(s: &str) -> Rope {
    let mut rope = Rope::new();
    rope.insert(0, s.as_bytes()).unwrap();
    rope
}

#[test]
fn test_empty_stack() {
    let stack = UndoStack::new(10);
    assert!(!stack.can_undo());
    assert!(!stack.can_redo());
    assert!(stack.current().is_none());
}

#[test]
fn test_record_then_undo_restores_prior_content() {
    let mut stack = UndoStack::new(10);
    let r1 = rope_with("hello");
    stack.record(&r1, 5, "insert hello");

    let r2 = rope_with("hello world");
    stack.record(&r2, 11, "insert world");

    assert!(stack.can_undo());
    let snap = stack.undo().unwrap();
    assert_eq!(snap.content, b"hello");
    assert_eq!(snap.cursor_offset, 5);
}

#[test]
fn test_undo_then_redo_restores_tip() {
    let mut stack = UndoStack::new(10);
    stack.record(&rope_with("a"), 1, "a");
    stack.record(&rope_with("ab"), 2, "b");

    stack.undo();
    let snap = stack.redo().unwrap();
    assert_eq!(snap.content, b"ab");
    assert!(!stack.can_redo());
}

#[test]
fn test_undo_past_start_returns_none() {
    let mut stack = UndoStack::new(10);
    stack.record(&rope_with("a"), 1, "a");
    assert!(stack.undo().is_none());
    assert!(!stack.can_undo());
    assert!(stack.redo().is_some());
}

#[test]
fn test_redo_unavailable_at_tip() {
    let mut stack = UndoStack::new(10);
    stack.record(&rope_with("a"), 1, "a");
    assert!(!stack.can_redo());
    assert!(stack.redo().is_none());
}

#[test]
fn test_record_at_non_tip_truncates_redo() {
    let mut stack = UndoStack::new(10);
    stack.record(&rope_with("a"), 1, "a");
    stack.record(&rope_with("ab"), 2, "b");
    stack.record(&rope_with("abc"), 3, "c");

    stack.undo(); // back to "ab"
    stack.record(&rope_with("abx"), 3, "x"); // diverges from "abc"

    assert!(!stack.can_redo());
    assert_eq!(stack.len(), 3);
    assert_eq!(stack.current().unwrap().content, b"abx");
}

#[test]
fn test_eviction_bounds_stack_size() {
    let mut stack = UndoStack::new(3);
    for i in 0..5 {
        let content = "x".repeat(i + 1);
        stack.record(&rope_with(&content), i, format!("edit {i}"));
    }
    assert_eq!(stack.len(), 3);
    // oldest two (lengths 1, 2) were evicted; the stack now holds lengths 3, 4, 5
    assert_eq!(stack.current().unwrap().content, "xxxxx".as_bytes());
    stack.undo();
    stack.undo();
    assert_eq!(stack.current().unwrap().content, "xxx".as_bytes());
    assert!(!stack.can_undo());
}
