use super::*;

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn text_input_requires_a_value() {
    let mut m = Modal::text_input(
        "New folder",
        vec![],
        "path: ",
        "",
        TextInputAction::NewFolder {
            parent: "root".to_string(),
        },
    );
    assert!(matches!(
        handle_modal_key(&mut m, press(KeyCode::Enter)),
        ModalOutcome::None
    ));
    assert_eq!(m.lines, vec!["error: value required"]);

    for c in "docs".chars() {
        handle_modal_key(&mut m, press(KeyCode::Char(c)));
    }
    match handle_modal_key(&mut m, press(KeyCode::Enter)) {
        ModalOutcome::Submit { action, value } => {
            assert_eq!(value, "docs");
            assert_eq!(
                action,
                TextInputAction::NewFolder {
                    parent: "root".to_string()
                }
            );
        }
        _ => panic!("expected submit"),
    }
}

#[test]
fn rename_prompt_starts_with_current_path() {
    let m = Modal::text_input(
        "Rename",
        vec![],
        "to: ",
        "root/a.txt",
        TextInputAction::Rename {
            from: "root/a.txt".to_string(),
        },
    );
    assert_eq!(m.input.buf, "root/a.txt");
    assert_eq!(m.input.cursor, 10);
}

#[test]
fn confirm_answers_yes_or_no() {
    let mut m = Modal::confirm("Wipe", vec![], PendingAction::Wipe);
    assert!(matches!(
        handle_modal_key(&mut m, press(KeyCode::Char('y'))),
        ModalOutcome::Confirm(PendingAction::Wipe)
    ));
    assert!(matches!(
        handle_modal_key(&mut m, press(KeyCode::Esc)),
        ModalOutcome::Close
    ));
    assert!(matches!(
        handle_modal_key(&mut m, press(KeyCode::Char('x'))),
        ModalOutcome::None
    ));
}

#[test]
fn viewer_scroll_is_bounded() {
    let mut m = Modal::viewer("Status", vec!["a".into(), "b".into()]);
    handle_modal_key(&mut m, press(KeyCode::PageDown));
    assert_eq!(m.scroll, 1);
    handle_modal_key(&mut m, press(KeyCode::Up));
    handle_modal_key(&mut m, press(KeyCode::Up));
    assert_eq!(m.scroll, 0);
}
