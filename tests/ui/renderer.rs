use chatlist::ui::renderer::restore_terminal;

#[test]
fn test_restore_terminal_leaves_alternate_screen() {
    let mut out: Vec<u8> = Vec::new();
    restore_terminal(&mut out, true).unwrap();

    let written = String::from_utf8(out).unwrap();
    assert!(written.contains("\x1b[?1000l"));
    assert!(written.contains("\x1b[?1049l"));
    assert!(written.contains("\x1b[?25h"));
}

#[test]
fn test_restore_terminal_without_mouse() {
    let mut out: Vec<u8> = Vec::new();
    restore_terminal(&mut out, false).unwrap();

    let written = String::from_utf8(out).unwrap();
    assert!(!written.contains("\x1b[?1000l"));
    assert!(written.contains("\x1b[?1049l"));
}
