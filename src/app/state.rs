//! Application state and view controller for faro.
//!
//! [AppState] is the facade the event loop talks to. It owns the current
//! snapshot, the active browser variant, the per-path selection memory, the
//! expansion set, the navigation history and the register, and keeps them
//! consistent across user actions, background refresh ticks and view-mode
//! rules:
//!
//! - every mutation happens on the UI loop's turn (the refresh timer only
//!   posts a signal, see [crate::core::refresh]);
//! - a failed scan never clears the view, the prior snapshot stays on
//!   screen with an error overlay;
//! - a rebuilt view never leaves the cursor out of range.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::browser::{BrowserMode, BrowserRow, FileBrowser, ScanParams, make_browser};
use crate::app::history::HistoryNavigator;
use crate::app::memory::{Cursor, SelectionMemory};
use crate::app::register::{PasteKind, Register};
use crate::app::tree::ExpansionSet;
use crate::config::ViewOptions;
use crate::core::entry::Entry;
use crate::core::error::OpError;
use crate::core::fsops;
use crate::core::scan::{DirSnapshot, scan};
use crate::utils::{open_with_os, run_editor};

/// Result of one processed keypress.
pub enum KeypressResult {
    Continue,
    Quit,
    /// An external program had the terminal; the loop does a full redraw.
    OpenedEditor,
}

/// Which prompt is open and what it will do on submit.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptKind {
    Search,
    NewFile,
    NewDir,
    Rename { target: PathBuf },
    PasteName,
}

/// The view controller's interaction state machine. `Normal` is browsing;
/// a failure moves to `Error` while the last good snapshot stays displayed.
/// `Error` carries the mode it interrupted so acknowledging with any key
/// returns there, e.g. a refresh tick failing mid-prompt hands the prompt
/// back with its buffer intact.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionMode {
    Normal,
    Prompt { kind: PromptKind, buffer: String },
    ConfirmDelete { target: PathBuf },
    /// Metadata dialog for the selected entry; any key dismisses it.
    Info,
    Error { message: String, prior: Box<ActionMode> },
}

pub struct AppState {
    options: ViewOptions,
    current_dir: PathBuf,
    snapshot: DirSnapshot,
    browser: Box<dyn FileBrowser>,
    memory: SelectionMemory,
    expansions: ExpansionSet,
    history: HistoryNavigator,
    register: Register,
    filter: String,
    mode: ActionMode,
    status: Option<String>,
}

impl AppState {
    /// Starts in the process's working directory. Failing to determine it
    /// is the one fatal startup condition.
    pub fn new(options: ViewOptions) -> io::Result<Self> {
        let current_dir = env::current_dir()?;
        Self::from_dir(options, &current_dir)
    }

    pub fn from_dir(options: ViewOptions, initial: &Path) -> io::Result<Self> {
        let current_dir = if initial.is_dir() {
            initial.to_path_buf()
        } else {
            env::current_dir()?
        };

        let snapshot = scan(&current_dir, "", options.ignore_case, options.show_hidden)
            .map_err(io::Error::other)?;

        let mut app = Self {
            browser: make_browser(options.mode),
            options,
            current_dir: current_dir.clone(),
            snapshot,
            memory: SelectionMemory::new(),
            expansions: ExpansionSet::new(),
            history: HistoryNavigator::new(),
            register: Register::new(),
            filter: String::new(),
            mode: ActionMode::Normal,
            status: None,
        };
        app.sync_browser();
        app.history.save(app.browser.cursor_row(), current_dir);
        Ok(app)
    }

    // Accessors

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn snapshot(&self) -> &DirSnapshot {
        &self.snapshot
    }

    #[inline]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[inline]
    pub fn mode(&self) -> &ActionMode {
        &self.mode
    }

    #[inline]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[inline]
    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    #[inline]
    pub fn register(&self) -> &Register {
        &self.register
    }

    #[inline]
    pub fn history(&self) -> &HistoryNavigator {
        &self.history
    }

    pub fn rows(&self) -> Vec<BrowserRow<'_>> {
        self.browser.rows()
    }

    pub fn cursor_row(&self) -> usize {
        self.browser.cursor_row()
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.browser.selected()
    }

    fn scan_params(&self) -> ScanParams {
        ScanParams {
            ignore_case: self.options.ignore_case,
            show_hidden: self.options.show_hidden,
        }
    }

    fn sync_browser(&mut self) {
        let params = self.scan_params();
        self.browser
            .sync(&self.snapshot, &self.memory, &mut self.expansions, params);
    }

    fn fail(&mut self, message: String) {
        // a second failure replaces the message but keeps the original
        // interrupted mode
        let prior = match std::mem::replace(&mut self.mode, ActionMode::Normal) {
            ActionMode::Error { prior, .. } => prior,
            other => Box::new(other),
        };
        self.mode = ActionMode::Error { message, prior };
    }

    // Core operations

    /// Re-scans the current path with the active filter. Selection memory
    /// for other paths is untouched and an in-progress filter is kept; the
    /// cursor is re-validated against the new entry count. Invoked by the
    /// user and by the background refresh tick alike.
    pub fn refresh(&mut self) {
        match scan(
            &self.current_dir,
            &self.filter,
            self.options.ignore_case,
            self.options.show_hidden,
        ) {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.sync_browser();
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// Moves to `target`: remembers the cursor under the current path,
    /// scans the target (failing without touching displayed state), updates
    /// the process working directory, restores the remembered cursor for
    /// the target and pushes a history entry. The active filter does not
    /// follow across directories.
    pub fn navigate(&mut self, target: &Path) -> Result<(), crate::core::error::ScanError> {
        let next = scan(
            target,
            "",
            self.options.ignore_case,
            self.options.show_hidden,
        )?;

        self.history.update_current_row(self.browser.cursor_row());
        self.browser.remember(&mut self.memory, &self.current_dir);
        self.filter.clear();
        self.current_dir = target.to_path_buf();
        self.snapshot = next;

        if let Err(e) = env::set_current_dir(&self.current_dir) {
            self.status = Some(e.to_string());
        }

        self.sync_browser();
        self.history
            .save(self.browser.cursor_row(), self.current_dir.clone());
        Ok(())
    }

    /// Applies a new filter to the current path. The table cursor falls
    /// back to the default row; the tree keeps the focused node when it
    /// still matches.
    pub fn set_filter(&mut self, text: &str) {
        match scan(
            &self.current_dir,
            text,
            self.options.ignore_case,
            self.options.show_hidden,
        ) {
            Ok(snapshot) => {
                self.filter = text.to_string();
                self.snapshot = snapshot;
                self.sync_browser();
                self.browser.on_filter_changed();
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// Removes `path` (file, or directory with its subtree), purges every
    /// expansion and selection memory rooted there, and re-scans so the
    /// view reflects whatever remains on disk even after a partial failure.
    pub fn delete(&mut self, path: &Path) {
        match fsops::remove(path) {
            Ok(()) => {
                self.expansions.purge_subtree(path);
                self.memory.purge_subtree(path);
                self.status = Some("Deleted".to_string());
            }
            Err(e) => self.fail(e.to_string()),
        }
        self.refresh();
    }

    fn history_back(&mut self) {
        self.history.update_current_row(self.browser.cursor_row());
        let target = self.history.previous().map(|e| (e.path().to_path_buf(), e.row()));
        if let Some((target, row)) = target {
            self.goto_history(target, row);
        }
    }

    fn history_forward(&mut self) {
        self.history.update_current_row(self.browser.cursor_row());
        let target = self.history.next().map(|e| (e.path().to_path_buf(), e.row()));
        if let Some((target, row)) = target {
            self.goto_history(target, row);
        }
    }

    /// History moves re-enter a directory without writing a new history
    /// entry and restore the cursor row the entry carries; everything else
    /// behaves like [AppState::navigate].
    fn goto_history(&mut self, target: PathBuf, row: usize) {
        if target == self.current_dir {
            return;
        }
        match scan(
            &target,
            "",
            self.options.ignore_case,
            self.options.show_hidden,
        ) {
            Ok(next) => {
                self.browser.remember(&mut self.memory, &self.current_dir);
                if self.browser.mode() == BrowserMode::Table {
                    self.memory.remember(&target, Cursor::Table { row, col: 0 });
                }
                self.filter.clear();
                self.current_dir = target;
                self.snapshot = next;
                let _ = env::set_current_dir(&self.current_dir);
                self.sync_browser();
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    // Prompt handling

    /// Applies one edit to an open prompt. The search prompt re-filters on
    /// every keystroke; a failed re-scan replaces the prompt with the error
    /// overlay.
    fn edit_prompt(&mut self, kind: PromptKind, buffer: String) {
        if kind == PromptKind::Search {
            let text = buffer.clone();
            self.set_filter(&text);
            if matches!(self.mode, ActionMode::Error { .. }) {
                return;
            }
        }
        self.mode = ActionMode::Prompt { kind, buffer };
    }

    fn submit_prompt(&mut self, kind: PromptKind, buffer: String) {
        match kind {
            PromptKind::Search => {
                // the live filter is already applied; Enter just closes
            }
            PromptKind::NewFile => self.run_op(&buffer, |target| fsops::new_file(target)),
            PromptKind::NewDir => self.run_op(&buffer, |target| fsops::new_dir(target)),
            PromptKind::Rename { target } => {
                let name = buffer.trim();
                if name.is_empty() {
                    self.fail(OpError::EmptyName.to_string());
                    return;
                }
                let new_path = self.current_dir.join(name);
                match fsops::rename(&target, &new_path) {
                    Ok(()) => {
                        self.status = Some("Renamed".to_string());
                        self.refresh();
                    }
                    Err(e) => self.fail(e.to_string()),
                }
            }
            PromptKind::PasteName => {
                let name = buffer.trim();
                let dest_dir = self.current_dir.clone();
                match self.register.paste(&dest_dir, name) {
                    Ok(Some(PasteKind::Copy)) => {
                        self.status = Some("Copied".to_string());
                        self.refresh();
                    }
                    Ok(Some(PasteKind::Move)) => {
                        self.status = Some("Moved".to_string());
                        self.refresh();
                    }
                    Ok(None) => {}
                    // the register keeps the source, the user may retry
                    Err(e) => self.fail(e.to_string()),
                }
            }
        }
    }

    /// Shared create path: validates the name, runs the operation against
    /// `current_dir/name`, refreshes on success.
    fn run_op<F>(&mut self, buffer: &str, op: F)
    where
        F: FnOnce(&Path) -> Result<(), OpError>,
    {
        let name = buffer.trim();
        if name.is_empty() {
            self.fail(OpError::EmptyName.to_string());
            return;
        }
        let target = self.current_dir.join(name);
        match op(&target) {
            Ok(()) => {
                self.status = Some("Created".to_string());
                self.refresh();
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    // Key handling

    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        self.status = None;

        match self.mode.clone() {
            ActionMode::Error { prior, .. } => {
                // any key acknowledges and returns to the interrupted mode
                self.mode = *prior;
                KeypressResult::Continue
            }
            ActionMode::Info => {
                self.mode = ActionMode::Normal;
                KeypressResult::Continue
            }
            ActionMode::ConfirmDelete { target } => {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => {
                        self.mode = ActionMode::Normal;
                        self.delete(&target);
                    }
                    KeyCode::Char('n') | KeyCode::Esc => {
                        self.mode = ActionMode::Normal;
                    }
                    _ => {}
                }
                KeypressResult::Continue
            }
            ActionMode::Prompt { kind, mut buffer } => {
                match key.code {
                    KeyCode::Esc => {
                        self.mode = ActionMode::Normal;
                        if kind == PromptKind::Search {
                            self.set_filter("");
                        }
                    }
                    KeyCode::Enter => {
                        self.mode = ActionMode::Normal;
                        self.submit_prompt(kind, buffer);
                    }
                    KeyCode::Backspace => {
                        buffer.pop();
                        self.edit_prompt(kind, buffer);
                    }
                    KeyCode::Char(c) => {
                        buffer.push(c);
                        self.edit_prompt(kind, buffer);
                    }
                    _ => {}
                }
                KeypressResult::Continue
            }
            ActionMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> KeypressResult {
        match key.code {
            KeyCode::Char('q') => return KeypressResult::Quit,

            KeyCode::Char('j') | KeyCode::Down => self.browser.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.browser.move_up(),

            KeyCode::Char('h') | KeyCode::Left => {
                let parent = self.current_dir.parent().map(Path::to_path_buf);
                if let Some(parent) = parent
                    && let Err(e) = self.navigate(&parent)
                {
                    self.fail(e.to_string());
                }
            }

            KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => self.enter_selected(),

            KeyCode::Char('f') | KeyCode::Char('/') => {
                self.mode = ActionMode::Prompt {
                    kind: PromptKind::Search,
                    buffer: self.filter.clone(),
                };
            }

            KeyCode::Char('i') => {
                if self.browser.selected().is_some() {
                    self.mode = ActionMode::Info;
                }
            }

            KeyCode::Char('d') => {
                if let Some(entry) = self.browser.selected() {
                    self.mode = ActionMode::ConfirmDelete {
                        target: entry.path().to_path_buf(),
                    };
                }
            }

            KeyCode::Char('y') => {
                if let Some(entry) = self.browser.selected() {
                    let entry = entry.clone();
                    self.status = Some(format!("Copy source: {}", entry.name_str()));
                    self.register.set_copy_source(entry);
                }
            }

            KeyCode::Char('x') => {
                if let Some(entry) = self.browser.selected() {
                    let entry = entry.clone();
                    self.status = Some(format!("Move source: {}", entry.name_str()));
                    self.register.set_move_source(entry);
                }
            }

            KeyCode::Char('p') => {
                if let Some(source) = self.register.marked_path() {
                    let buffer = source
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    self.mode = ActionMode::Prompt {
                        kind: PromptKind::PasteName,
                        buffer,
                    };
                }
            }

            KeyCode::Char('n') => {
                self.mode = ActionMode::Prompt {
                    kind: PromptKind::NewFile,
                    buffer: String::new(),
                };
            }

            KeyCode::Char('m') => {
                self.mode = ActionMode::Prompt {
                    kind: PromptKind::NewDir,
                    buffer: String::new(),
                };
            }

            KeyCode::Char('r') => {
                if let Some(entry) = self.browser.selected() {
                    self.mode = ActionMode::Prompt {
                        kind: PromptKind::Rename {
                            target: entry.path().to_path_buf(),
                        },
                        buffer: entry.name_str().into_owned(),
                    };
                }
            }

            KeyCode::Char('e') => {
                if let Some(entry) = self.browser.selected() {
                    let path = entry.path().to_path_buf();
                    let editor = self.options.editor.clone();
                    if let Err(e) = run_editor(&editor, &path) {
                        self.fail(e.to_string());
                    }
                    self.refresh();
                    return KeypressResult::OpenedEditor;
                }
            }

            KeyCode::Char('o') => {
                if let Some(entry) = self.browser.selected() {
                    let path = entry.path().to_path_buf();
                    if let Err(e) = open_with_os(&path) {
                        self.fail(e.to_string());
                    }
                    self.refresh();
                }
            }

            KeyCode::Char('H') | KeyCode::F(7) => self.history_back(),
            KeyCode::Char('L') | KeyCode::F(8) => self.history_forward(),

            KeyCode::Char('R') | KeyCode::F(5) => self.refresh(),

            KeyCode::Esc => {
                if !self.filter.is_empty() {
                    self.set_filter("");
                }
            }

            _ => {}
        }
        KeypressResult::Continue
    }

    /// `l`/Enter: the table descends into a directory; the tree toggles its
    /// expansion in place.
    fn enter_selected(&mut self) {
        let Some(entry) = self.browser.selected() else {
            return;
        };
        if !entry.is_dir() {
            return;
        }
        let path = entry.path().to_path_buf();

        if self.browser.toggle_expand(&mut self.expansions) {
            self.sync_browser();
            return;
        }

        if let Err(e) = self.navigate(&path) {
            self.fail(e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn options(mode: BrowserMode) -> ViewOptions {
        ViewOptions {
            mode,
            ..ViewOptions::default()
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, crossterm::event::KeyModifiers::NONE)
    }

    #[test]
    fn navigate_defaults_cursor_and_pushes_history() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        let docs = tmp.path().join("docs");
        fs::create_dir(&docs)?;
        File::create(docs.join("inner.txt"))?;

        let mut app = AppState::from_dir(options(BrowserMode::Table), tmp.path())?;
        assert_eq!(app.history().len(), 1);

        app.navigate(&docs)?;
        assert_eq!(app.current_dir(), docs.as_path());
        assert_eq!(app.cursor_row(), 1, "fresh directory starts at the default row");
        assert_eq!(app.history().len(), 2);
        Ok(())
    }

    #[test]
    fn navigate_failure_leaves_displayed_state_untouched() -> Result<(), Box<dyn std::error::Error>>
    {
        let tmp = tempdir()?;
        File::create(tmp.path().join("a.txt"))?;
        let mut app = AppState::from_dir(options(BrowserMode::Table), tmp.path())?;
        let shown_before = app.snapshot().len();

        let missing = tmp.path().join("nope");
        assert!(app.navigate(&missing).is_err());
        assert_eq!(app.current_dir(), tmp.path());
        assert_eq!(app.snapshot().len(), shown_before);
        assert_eq!(app.history().len(), 1);
        Ok(())
    }

    #[test]
    fn filter_narrows_and_resets_table_cursor() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        for name in ["notes.txt", "other.txt", "footnote.md"] {
            File::create(tmp.path().join(name))?;
        }
        let mut app = AppState::from_dir(options(BrowserMode::Table), tmp.path())?;

        app.handle_keypress(key(KeyCode::Char('j')));
        app.handle_keypress(key(KeyCode::Char('j')));
        assert_eq!(app.cursor_row(), 3);

        app.set_filter("note");
        assert_eq!(app.snapshot().len(), 2);
        assert_eq!(app.cursor_row(), 1);
        assert_eq!(app.filter(), "note");

        // esc clears the filter
        app.handle_keypress(key(KeyCode::Esc));
        assert_eq!(app.filter(), "");
        assert_eq!(app.snapshot().len(), 3);
        Ok(())
    }

    #[test]
    fn refresh_keeps_prior_snapshot_on_scan_failure() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        let sub = tmp.path().join("sub");
        fs::create_dir(&sub)?;
        File::create(sub.join("x.txt"))?;

        let mut app = AppState::from_dir(options(BrowserMode::Table), &sub)?;
        assert_eq!(app.snapshot().len(), 1);

        fs::remove_dir_all(&sub)?;
        app.refresh();

        assert!(matches!(app.mode(), ActionMode::Error { .. }));
        assert_eq!(app.snapshot().len(), 1, "last good snapshot stays displayed");

        // acknowledgement returns to browsing
        app.handle_keypress(key(KeyCode::Char('k')));
        assert!(matches!(app.mode(), ActionMode::Normal));
        Ok(())
    }

    #[test]
    fn refresh_revalidates_cursor_against_shrunk_dir() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        for i in 0..6 {
            File::create(tmp.path().join(format!("f{i}.txt")))?;
        }
        let mut app = AppState::from_dir(options(BrowserMode::Table), tmp.path())?;
        for _ in 0..5 {
            app.handle_keypress(key(KeyCode::Char('j')));
        }
        assert_eq!(app.cursor_row(), 6);

        for i in 2..6 {
            fs::remove_file(tmp.path().join(format!("f{i}.txt")))?;
        }
        app.refresh();
        assert_eq!(app.cursor_row(), 2, "clamps to the last remaining row");
        assert!(app.selected_entry().is_some());
        Ok(())
    }

    #[test]
    fn refresh_of_unchanged_dir_leaves_cursor_in_place() -> Result<(), Box<dyn std::error::Error>>
    {
        let tmp = tempdir()?;
        for i in 0..6 {
            File::create(tmp.path().join(format!("f{i}.txt")))?;
        }
        let mut app = AppState::from_dir(options(BrowserMode::Table), tmp.path())?;
        for _ in 0..4 {
            app.handle_keypress(key(KeyCode::Char('j')));
        }
        assert_eq!(app.cursor_row(), 5);

        // what the background tick does: nothing on disk changed, so the
        // cursor must not move
        app.refresh();
        assert_eq!(app.cursor_row(), 5);
        app.refresh();
        assert_eq!(app.cursor_row(), 5);
        Ok(())
    }

    #[test]
    fn history_restores_the_row_a_directory_was_left_at()
    -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        let a = tmp.path().join("a");
        fs::create_dir(&a)?;
        for i in 0..6 {
            File::create(a.join(format!("f{i}.txt")))?;
        }

        let mut app = AppState::from_dir(options(BrowserMode::Table), tmp.path())?;
        app.navigate(&a)?;
        for _ in 0..3 {
            app.handle_keypress(key(KeyCode::Char('j')));
        }
        assert_eq!(app.cursor_row(), 4);

        app.handle_keypress(key(KeyCode::Char('H')));
        assert_eq!(app.current_dir(), tmp.path());

        // drop the per-path memory so only the history entry carries the row
        app.memory.purge_subtree(&a);

        app.handle_keypress(key(KeyCode::Char('L')));
        assert_eq!(app.current_dir(), a.as_path());
        assert_eq!(app.cursor_row(), 4);
        Ok(())
    }

    #[test]
    fn error_mid_prompt_hands_the_prompt_back() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        let sub = tmp.path().join("sub");
        fs::create_dir(&sub)?;
        let mut app = AppState::from_dir(options(BrowserMode::Table), &sub)?;

        app.handle_keypress(key(KeyCode::Char('n')));
        for c in "dr".chars() {
            app.handle_keypress(key(KeyCode::Char(c)));
        }

        // a refresh tick fails while the prompt is open
        fs::remove_dir_all(&sub)?;
        app.refresh();
        assert!(matches!(app.mode(), ActionMode::Error { .. }));

        // acknowledging returns to the half-typed prompt, not to browsing
        app.handle_keypress(key(KeyCode::Char('x')));
        match app.mode() {
            ActionMode::Prompt {
                kind: PromptKind::NewFile,
                buffer,
            } => assert_eq!(buffer, "dr"),
            other => panic!("expected the interrupted prompt back, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn info_dialog_opens_on_selection_and_any_key_closes()
    -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        let mut app = AppState::from_dir(options(BrowserMode::Table), tmp.path())?;

        // nothing selected in an empty directory
        app.handle_keypress(key(KeyCode::Char('i')));
        assert!(matches!(app.mode(), ActionMode::Normal));

        File::create(tmp.path().join("a.txt"))?;
        app.refresh();
        app.handle_keypress(key(KeyCode::Char('i')));
        assert!(matches!(app.mode(), ActionMode::Info));

        app.handle_keypress(key(KeyCode::Char('j')));
        assert!(matches!(app.mode(), ActionMode::Normal));
        Ok(())
    }

    #[test]
    fn delete_purges_expansion_and_memory_subtrees() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        let a = tmp.path().join("a");
        let b = a.join("b");
        fs::create_dir_all(&b)?;

        let mut app = AppState::from_dir(options(BrowserMode::Tree), tmp.path())?;
        app.expansions.insert(&a);
        app.expansions.insert(&b);
        app.refresh();
        assert!(app.rows().len() >= 2);

        app.delete(&a);
        assert!(!a.exists());
        assert!(!app.expansions.contains(&a));
        assert!(!app.expansions.contains(&b));
        assert!(matches!(app.mode(), ActionMode::Normal));
        Ok(())
    }

    #[test]
    fn confirm_flow_guards_delete() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        File::create(tmp.path().join("doomed.txt"))?;
        let mut app = AppState::from_dir(options(BrowserMode::Table), tmp.path())?;

        app.handle_keypress(key(KeyCode::Char('d')));
        assert!(matches!(app.mode(), ActionMode::ConfirmDelete { .. }));

        // declining keeps the file
        app.handle_keypress(key(KeyCode::Char('n')));
        assert!(tmp.path().join("doomed.txt").exists());

        app.handle_keypress(key(KeyCode::Char('d')));
        app.handle_keypress(key(KeyCode::Char('y')));
        assert!(!tmp.path().join("doomed.txt").exists());
        assert_eq!(app.snapshot().len(), 0);
        Ok(())
    }

    #[test]
    fn history_back_and_forward_walk_visits() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::create_dir(&a)?;
        fs::create_dir(&b)?;

        let mut app = AppState::from_dir(options(BrowserMode::Table), tmp.path())?;
        app.navigate(&a)?;
        app.navigate(&tmp.path().to_path_buf())?;
        app.navigate(&b)?;

        app.handle_keypress(key(KeyCode::Char('H')));
        assert_eq!(app.current_dir(), tmp.path());
        app.handle_keypress(key(KeyCode::Char('H')));
        assert_eq!(app.current_dir(), a.as_path());

        app.handle_keypress(key(KeyCode::Char('L')));
        assert_eq!(app.current_dir(), tmp.path());
        Ok(())
    }

    #[test]
    fn search_prompt_filters_live_and_esc_restores() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        for name in ["alpha.txt", "beta.txt"] {
            File::create(tmp.path().join(name))?;
        }
        let mut app = AppState::from_dir(options(BrowserMode::Table), tmp.path())?;

        app.handle_keypress(key(KeyCode::Char('/')));
        assert!(matches!(
            app.mode(),
            ActionMode::Prompt {
                kind: PromptKind::Search,
                ..
            }
        ));

        for c in "alp".chars() {
            app.handle_keypress(key(KeyCode::Char(c)));
        }
        assert_eq!(app.snapshot().len(), 1);

        app.handle_keypress(key(KeyCode::Esc));
        assert_eq!(app.filter(), "");
        assert_eq!(app.snapshot().len(), 2);
        Ok(())
    }

    #[test]
    fn create_rename_flow() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        let mut app = AppState::from_dir(options(BrowserMode::Table), tmp.path())?;

        app.handle_keypress(key(KeyCode::Char('n')));
        for c in "fresh.txt".chars() {
            app.handle_keypress(key(KeyCode::Char(c)));
        }
        app.handle_keypress(key(KeyCode::Enter));
        assert!(tmp.path().join("fresh.txt").exists());

        // empty name is rejected before touching disk
        app.handle_keypress(key(KeyCode::Char('m')));
        app.handle_keypress(key(KeyCode::Enter));
        assert!(matches!(app.mode(), ActionMode::Error { .. }));
        app.handle_keypress(key(KeyCode::Esc));

        // rename through the prompt
        app.refresh();
        app.handle_keypress(key(KeyCode::Char('r')));
        if let ActionMode::Prompt { buffer, .. } = app.mode() {
            assert_eq!(buffer, "fresh.txt");
        } else {
            panic!("expected a rename prompt");
        }
        for _ in 0..4 {
            app.handle_keypress(key(KeyCode::Backspace));
        }
        for c in "er.md".chars() {
            app.handle_keypress(key(KeyCode::Char(c)));
        }
        app.handle_keypress(key(KeyCode::Enter));
        assert!(tmp.path().join("fresher.md").exists());
        assert!(!tmp.path().join("fresh.txt").exists());
        Ok(())
    }
}
