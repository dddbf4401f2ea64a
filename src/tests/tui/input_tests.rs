use super::*;

#[test]
fn edits_at_the_cursor_with_multibyte_text() {
    let mut input = Input::with_text("bié");
    assert_eq!(input.cursor, 3);
    input.move_left();
    input.insert_char('x');
    assert_eq!(input.buf, "bixé");
    input.backspace();
    input.delete();
    assert_eq!(input.buf, "bi");
    input.move_right();
    input.move_right();
    assert_eq!(input.cursor, 2);
    input.clear();
    assert!(input.buf.is_empty());
    input.backspace();
    assert_eq!(input.cursor, 0);
}
