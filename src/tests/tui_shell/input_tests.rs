use super::*;

#[test]
fn editing_handles_multibyte_chars() {
    let mut input = Input::default();
    for c in "mv é.txt".chars() {
        input.insert_char(c);
    }
    input.move_left();
    input.move_left();
    input.move_left();
    input.move_left();
    input.backspace();
    assert_eq!(input.buf, "mv .txt");
    input.insert_char('ü');
    assert_eq!(input.buf, "mv ü.txt");
    input.delete();
    assert_eq!(input.buf, "mv ütxt");
}

#[test]
fn submit_records_history_without_duplicates() {
    let mut input = Input::default();
    input.set("refresh".to_string());
    assert_eq!(input.submit(), "refresh");
    input.set(" refresh ".to_string());
    input.submit();
    input.set("open a.txt".to_string());
    input.submit();
    assert_eq!(input.history, vec!["refresh", "open a.txt"]);
    assert!(input.buf.is_empty());
    assert_eq!(input.cursor, 0);
}

#[test]
fn history_walks_back_and_forward() {
    let mut input = Input::default();
    input.set("one".to_string());
    input.submit();
    input.set("two".to_string());
    input.submit();

    input.history_up();
    assert_eq!(input.buf, "two");
    input.history_up();
    assert_eq!(input.buf, "one");
    input.history_up();
    assert_eq!(input.buf, "one");
    input.history_down();
    assert_eq!(input.buf, "two");
    input.history_down();
    assert!(input.buf.is_empty());
    assert_eq!(input.history_pos, None);
}
