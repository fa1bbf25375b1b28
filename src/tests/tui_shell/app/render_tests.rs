use super::*;

#[test]
fn window_keeps_cursor_visible() {
    assert_eq!(window_start(0, 5, 10), 0);
    assert_eq!(window_start(3, 20, 5), 0);
    assert_eq!(window_start(7, 20, 5), 3);
    assert_eq!(window_start(19, 20, 5), 15);
    assert_eq!(window_start(4, 20, 0), 0);
}
