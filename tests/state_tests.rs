use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use faro::app::browser::BrowserMode;
use faro::app::state::{ActionMode, AppState};
use faro::config::ViewOptions;
use rand::Rng;
use rand::rng;
use std::error;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

fn options(mode: BrowserMode) -> ViewOptions {
    ViewOptions {
        mode,
        ..ViewOptions::default()
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut AppState, text: &str) {
    for c in text.chars() {
        app.handle_keypress(key(KeyCode::Char(c)));
    }
}

#[test]
fn test_browse_filter_and_open_directory() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let docs = dir.path().join("docs");
    fs::create_dir(&docs)?;
    File::create(docs.join("notes.txt"))?;
    File::create(docs.join("draft.txt"))?;
    File::create(docs.join("footnotes.md"))?;
    File::create(dir.path().join("top.txt"))?;

    let mut app = AppState::from_dir(options(BrowserMode::Table), dir.path())?;
    assert_eq!(app.snapshot().len(), 2);

    app.navigate(&docs)?;
    assert_eq!(app.current_dir(), docs.as_path());
    assert_eq!(app.cursor_row(), 1, "entering a fresh directory starts at the first entry");
    assert_eq!(app.snapshot().len(), 3);

    // filter narrows to the substring matches
    app.handle_keypress(key(KeyCode::Char('/')));
    type_text(&mut app, "note");
    app.handle_keypress(key(KeyCode::Enter));
    assert_eq!(app.filter(), "note");
    assert_eq!(app.snapshot().len(), 2);
    assert!(
        app.snapshot()
            .entries()
            .iter()
            .all(|e| e.name_str().contains("note"))
    );

    // leaving the directory drops the filter
    app.handle_keypress(key(KeyCode::Char('h')));
    assert_eq!(app.current_dir(), dir.path());
    assert_eq!(app.filter(), "");
    Ok(())
}

#[test]
fn test_selection_remembered_per_directory() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let sub = dir.path().join("sub");
    fs::create_dir(&sub)?;
    for i in 0..5 {
        File::create(dir.path().join(format!("a{i}.txt")))?;
        File::create(sub.join(format!("b{i}.txt")))?;
    }

    let mut app = AppState::from_dir(options(BrowserMode::Table), dir.path())?;
    for _ in 0..3 {
        app.handle_keypress(key(KeyCode::Char('j')));
    }
    let parked = app.cursor_row();
    assert_eq!(parked, 4);

    app.navigate(&sub)?;
    assert_eq!(app.cursor_row(), 1);

    app.handle_keypress(key(KeyCode::Char('h')));
    assert_eq!(app.current_dir(), dir.path());
    assert_eq!(app.cursor_row(), parked, "the parked row survives a round trip");
    Ok(())
}

#[test]
fn test_copy_paste_and_name_conflict() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let src_dir = dir.path().join("src");
    let dst_dir = dir.path().join("dst");
    fs::create_dir(&src_dir)?;
    fs::create_dir(&dst_dir)?;
    let mut f = File::create(src_dir.join("payload.txt"))?;
    writeln!(f, "hello")?;

    let mut app = AppState::from_dir(options(BrowserMode::Table), &src_dir)?;

    // yank the only entry, then paste it under a new name elsewhere
    app.handle_keypress(key(KeyCode::Char('y')));
    assert!(app.register().pending().is_some());

    app.navigate(&dst_dir)?;
    app.handle_keypress(key(KeyCode::Char('p')));
    app.handle_keypress(key(KeyCode::Enter));
    assert!(dst_dir.join("payload.txt").exists());
    assert!(src_dir.join("payload.txt").exists(), "copy leaves the source in place");
    assert!(app.register().pending().is_none(), "a completed paste clears the slot");

    // a second identical paste must refuse and keep nothing half-written
    app.handle_keypress(key(KeyCode::Char('p')));
    assert!(
        matches!(app.mode(), ActionMode::Normal),
        "an empty register opens no prompt"
    );
    Ok(())
}

#[test]
fn test_paste_conflict_keeps_register_for_retry() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("orig.txt"))?;
    File::create(dir.path().join("taken.txt"))?;

    let mut app = AppState::from_dir(options(BrowserMode::Table), dir.path())?;

    // select orig.txt
    while app
        .selected_entry()
        .map(|e| e.name_str() != "orig.txt")
        .unwrap_or(false)
    {
        app.handle_keypress(key(KeyCode::Char('j')));
    }
    app.handle_keypress(key(KeyCode::Char('y')));

    // pasting over an existing name fails with no partial copy
    app.handle_keypress(key(KeyCode::Char('p')));
    for _ in 0..8 {
        app.handle_keypress(key(KeyCode::Backspace));
    }
    type_text(&mut app, "taken.txt");
    app.handle_keypress(key(KeyCode::Enter));
    assert!(matches!(app.mode(), ActionMode::Error { .. }));
    assert!(app.register().pending().is_some(), "the slot survives a failed paste");

    // acknowledge and retry under a free name
    app.handle_keypress(key(KeyCode::Enter));
    app.handle_keypress(key(KeyCode::Char('p')));
    for _ in 0..8 {
        app.handle_keypress(key(KeyCode::Backspace));
    }
    type_text(&mut app, "free.txt");
    app.handle_keypress(key(KeyCode::Enter));
    assert!(dir.path().join("free.txt").exists());
    assert!(app.register().pending().is_none());
    Ok(())
}

#[test]
fn test_cut_paste_exclusivity() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let dst = dir.path().join("dst");
    fs::create_dir(&dst)?;
    File::create(dir.path().join("moving.txt"))?;

    let mut app = AppState::from_dir(options(BrowserMode::Table), dir.path())?;
    while app
        .selected_entry()
        .map(|e| e.name_str() != "moving.txt")
        .unwrap_or(false)
    {
        app.handle_keypress(key(KeyCode::Char('j')));
    }

    // yank then cut: the later mark wins
    app.handle_keypress(key(KeyCode::Char('y')));
    app.handle_keypress(key(KeyCode::Char('x')));

    app.navigate(&dst)?;
    app.handle_keypress(key(KeyCode::Char('p')));
    app.handle_keypress(key(KeyCode::Enter));

    assert!(dst.join("moving.txt").exists());
    assert!(!dir.path().join("moving.txt").exists(), "a move removes the source");
    Ok(())
}

#[test]
fn test_tree_expansion_survives_refresh() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let nested = dir.path().join("outer").join("inner");
    fs::create_dir_all(&nested)?;
    File::create(nested.join("deep.txt"))?;

    let mut app = AppState::from_dir(options(BrowserMode::Tree), dir.path())?;
    assert_eq!(app.rows().len(), 1);

    // expand outer, then inner
    app.handle_keypress(key(KeyCode::Char('l')));
    assert_eq!(app.rows().len(), 2);
    app.handle_keypress(key(KeyCode::Char('j')));
    app.handle_keypress(key(KeyCode::Char('l')));
    assert_eq!(app.rows().len(), 3);

    // an unrelated change plus a refresh keeps the whole expanded shape
    File::create(dir.path().join("sibling.txt"))?;
    app.handle_keypress(key(KeyCode::Char('R')));
    assert_eq!(app.rows().len(), 4);

    // removing the subtree on disk drops its rows without an error
    fs::remove_dir_all(dir.path().join("outer"))?;
    app.handle_keypress(key(KeyCode::Char('R')));
    assert!(matches!(app.mode(), ActionMode::Normal));
    assert_eq!(app.rows().len(), 1);
    Ok(())
}

#[test]
fn test_history_truncates_forward_branch() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    let c = dir.path().join("c");
    for p in [&a, &b, &c] {
        fs::create_dir(p)?;
    }

    let mut app = AppState::from_dir(options(BrowserMode::Table), dir.path())?;
    app.navigate(&a)?;
    app.navigate(&b)?;

    // step back to a, then branch off to c: b is no longer reachable forward
    app.handle_keypress(key(KeyCode::Char('H')));
    assert_eq!(app.current_dir(), a.as_path());
    app.navigate(&c)?;

    app.handle_keypress(key(KeyCode::Char('L')));
    assert_eq!(app.current_dir(), c.as_path(), "forward stays on the new branch");

    app.handle_keypress(key(KeyCode::Char('H')));
    assert_eq!(app.current_dir(), a.as_path());
    Ok(())
}

#[test]
fn test_rapid_random_navigation_stays_in_bounds() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let file_count = 12;
    for i in 0..file_count {
        File::create(dir.path().join(format!("testfile_{i}.txt")))?;
    }

    let mut app = AppState::from_dir(options(BrowserMode::Table), dir.path())?;
    let mut rng = rng();

    for _ in 0..500 {
        let code = match rng.random_range(0..4) {
            0 => KeyCode::Char('j'),
            1 => KeyCode::Char('k'),
            2 => KeyCode::Down,
            _ => KeyCode::Up,
        };
        app.handle_keypress(key(code));
        let row = app.cursor_row();
        assert!(
            (1..=file_count).contains(&row),
            "cursor row {row} escaped the valid range"
        );
        assert!(app.selected_entry().is_some());
    }
    Ok(())
}
