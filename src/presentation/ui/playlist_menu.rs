//! Playlist actions menu with its confirm and input dialogs.
//!
//! The menu never changes playlists itself. Every confirmed action becomes
//! one [`PlaylistCommand`] dispatched to the model, and the menu learns about
//! the result through the model's change notification.

use std::mem;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use tracing::{debug, trace};

use crate::domain::entities::{PlaylistSnapshot, SortColumn};
use crate::domain::ports::{PlaylistCommand, PlaylistPort, SubscriptionId};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{ConfirmDialog, Dropdown, DropdownRow, InputDialog, TextInput};

const MENU_TITLE: &str = "Playlist";
const ADD_URL_PROMPT: &str = "Add URL to playlist:";
const RENAME_PROMPT: &str = "Enter new playlist name:";

/// The dialog currently shown, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Dialog {
    #[default]
    None,
    /// Asks before removing the playlist titled `title`.
    RemoveConfirm { title: String },
    /// Asks before clearing the playlist titled `title`.
    ClearConfirm { title: String },
    /// Collects a URL to append.
    AddUrl { input: TextInput },
    /// Collects a new title; `original` is the title when the dialog opened.
    Rename { input: TextInput, original: String },
}

/// Dialog variants without their payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Remove,
    Clear,
    AddUrl,
    Rename,
}

impl Dialog {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }

    #[must_use]
    pub const fn kind(&self) -> Option<DialogKind> {
        match self {
            Self::None => None,
            Self::RemoveConfirm { .. } => Some(DialogKind::Remove),
            Self::ClearConfirm { .. } => Some(DialogKind::Clear),
            Self::AddUrl { .. } => Some(DialogKind::AddUrl),
            Self::Rename { .. } => Some(DialogKind::Rename),
        }
    }

    /// Frame title of the dialog.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::RemoveConfirm { .. } => "Remove playlist",
            Self::ClearConfirm { .. } => "Clear playlist",
            Self::AddUrl { .. } => "Add URL",
            Self::Rename { .. } => "Rename playlist",
        }
    }
}

/// Something the menu can do when an entry is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddPlaylist,
    RemovePlaylist,
    RenamePlaylist,
    ClearPlaylist,
    AddUrl,
    /// Sort by the column at this index.
    SortBy(usize),
}

/// One row of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Item(MenuAction),
    Separator,
    Label(&'static str),
}

/// Result of routing a key through the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistMenuAction {
    /// The menu did not use the key.
    Ignored,
    /// The key changed menu or dialog state only.
    Consumed,
    /// The key led to this command being dispatched.
    Issued(PlaylistCommand),
}

impl From<Option<PlaylistCommand>> for PlaylistMenuAction {
    fn from(command: Option<PlaylistCommand>) -> Self {
        command.map_or(Self::Consumed, Self::Issued)
    }
}

/// Playlist actions dropdown and its dialogs, bound to one model.
pub struct PlaylistMenu {
    model: Arc<dyn PlaylistPort>,
    columns: Vec<SortColumn>,
    snapshot: PlaylistSnapshot,
    dialog: Dialog,
    menu_open: bool,
    /// Index into [`PlaylistMenu::entries`]; always an item.
    selected: usize,
    stale: Arc<AtomicBool>,
    subscription: SubscriptionId,
}

impl PlaylistMenu {
    /// Creates the menu and subscribes to model changes.
    #[must_use]
    pub fn new(model: Arc<dyn PlaylistPort>, columns: Vec<SortColumn>) -> Self {
        let stale = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stale);
        let subscription = model.subscribe(Arc::new(move || {
            flag.store(true, Ordering::Release);
        }));

        let snapshot = PlaylistSnapshot::new(model.current_playlist_id(), model.current_playlist());
        debug!(
            subscription = subscription.0,
            title = %snapshot.title,
            columns = columns.len(),
            "Playlist menu created"
        );

        Self {
            model,
            columns,
            snapshot,
            dialog: Dialog::None,
            menu_open: false,
            selected: 0,
            stale,
            subscription,
        }
    }

    /// Playlist state as of the last refresh.
    #[must_use]
    pub const fn snapshot(&self) -> &PlaylistSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub const fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    #[must_use]
    pub const fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Opens or closes the dropdown. Opening highlights the first item.
    pub fn toggle_menu(&mut self, open: bool) {
        if open && !self.menu_open {
            self.selected = 0;
        }
        self.menu_open = open;
    }

    /// Creates a new playlist right away.
    pub fn add_playlist(&mut self) -> PlaylistCommand {
        self.issue(PlaylistCommand::AddPlaylist)
    }

    /// Asks to remove the current playlist.
    pub fn open_remove(&mut self) {
        self.dialog = Dialog::RemoveConfirm {
            title: self.snapshot.title.clone(),
        };
    }

    /// Asks to clear the current playlist.
    pub fn open_clear(&mut self) {
        self.dialog = Dialog::ClearConfirm {
            title: self.snapshot.title.clone(),
        };
    }

    /// Opens an empty URL input.
    pub fn open_add_url(&mut self) {
        self.dialog = Dialog::AddUrl {
            input: TextInput::default(),
        };
    }

    /// Opens the rename input prefilled with the current title.
    pub fn open_rename(&mut self) {
        self.dialog = Dialog::Rename {
            input: TextInput::with_value(self.snapshot.title.as_str()),
            original: self.snapshot.title.clone(),
        };
    }

    /// Stores the raw text of the open input dialog.
    pub fn update(&mut self, text: &str) {
        match &mut self.dialog {
            Dialog::AddUrl { input } | Dialog::Rename { input, .. } => input.set_value(text),
            _ => {}
        }
    }

    /// Closes the dialog and dispatches its command, if it has one.
    pub fn confirm(&mut self) -> Option<PlaylistCommand> {
        let command = match mem::take(&mut self.dialog) {
            Dialog::None => None,
            Dialog::RemoveConfirm { .. } => Some(PlaylistCommand::RemovePlaylist),
            Dialog::ClearConfirm { .. } => Some(PlaylistCommand::ClearPlaylist),
            Dialog::AddUrl { input } => {
                let url = input.value().trim();
                (!url.is_empty()).then(|| PlaylistCommand::AddItems(vec![url.to_string()]))
            }
            Dialog::Rename { input, original } => {
                let title = input.value().trim();
                (title != original).then(|| PlaylistCommand::RenamePlaylist(title.to_string()))
            }
        };

        command.map(|command| self.issue(command))
    }

    /// Closes the dialog without touching the model.
    pub fn cancel(&mut self) {
        self.dialog = Dialog::None;
    }

    /// Sorts the current playlist by the column at `index`.
    pub fn sort_by(&mut self, index: usize) -> Option<PlaylistCommand> {
        let Some(column) = self.columns.get(index) else {
            debug!(
                index,
                columns = self.columns.len(),
                "Ignoring sort by unknown column"
            );
            return None;
        };
        let command = PlaylistCommand::SortPlaylist(column.clone());
        Some(self.issue(command))
    }

    /// Re-reads the current playlist from the model.
    pub fn on_model_changed(&mut self) {
        self.stale.store(false, Ordering::Release);
        self.snapshot = PlaylistSnapshot::new(
            self.model.current_playlist_id(),
            self.model.current_playlist(),
        );
        trace!(title = %self.snapshot.title, "Playlist snapshot refreshed");
    }

    /// Refreshes the snapshot if the model changed since the last refresh.
    pub fn sync(&mut self) -> bool {
        if self.stale.swap(false, Ordering::AcqRel) {
            self.on_model_changed();
            true
        } else {
            false
        }
    }

    /// Question or prompt of the open dialog.
    #[must_use]
    pub fn dialog_message(&self) -> Option<String> {
        match &self.dialog {
            Dialog::None => None,
            Dialog::RemoveConfirm { title } => {
                Some(format!("Do you want to remove '{title}' playlist?"))
            }
            Dialog::ClearConfirm { title } => {
                Some(format!("Do you want to clear '{title}' playlist?"))
            }
            Dialog::AddUrl { .. } => Some(ADD_URL_PROMPT.to_string()),
            Dialog::Rename { .. } => Some(RENAME_PROMPT.to_string()),
        }
    }

    /// Raw text of the open input dialog.
    #[must_use]
    pub fn pending_text(&self) -> Option<&str> {
        match &self.dialog {
            Dialog::AddUrl { input } | Dialog::Rename { input, .. } => Some(input.value()),
            _ => None,
        }
    }

    /// Menu rows in display order.
    #[must_use]
    pub fn entries(&self) -> Vec<MenuEntry> {
        let mut entries = vec![
            MenuEntry::Item(MenuAction::AddPlaylist),
            MenuEntry::Item(MenuAction::RemovePlaylist),
            MenuEntry::Separator,
            MenuEntry::Item(MenuAction::RenamePlaylist),
            MenuEntry::Item(MenuAction::ClearPlaylist),
            MenuEntry::Item(MenuAction::AddUrl),
            MenuEntry::Separator,
            MenuEntry::Label("Sort by"),
        ];
        entries.extend((0..self.columns.len()).map(|i| MenuEntry::Item(MenuAction::SortBy(i))));
        entries
    }

    /// Currently highlighted menu action.
    #[must_use]
    pub fn selected_action(&self) -> Option<MenuAction> {
        match self.entries().get(self.selected) {
            Some(MenuEntry::Item(action)) => Some(*action),
            _ => None,
        }
    }

    /// Runs a menu action and closes the menu.
    pub fn activate(&mut self, action: MenuAction) -> PlaylistMenuAction {
        self.menu_open = false;
        match action {
            MenuAction::AddPlaylist => PlaylistMenuAction::Issued(self.add_playlist()),
            MenuAction::RemovePlaylist => {
                self.open_remove();
                PlaylistMenuAction::Consumed
            }
            MenuAction::RenamePlaylist => {
                self.open_rename();
                PlaylistMenuAction::Consumed
            }
            MenuAction::ClearPlaylist => {
                self.open_clear();
                PlaylistMenuAction::Consumed
            }
            MenuAction::AddUrl => {
                self.open_add_url();
                PlaylistMenuAction::Consumed
            }
            MenuAction::SortBy(index) => self.sort_by(index).into(),
        }
    }

    /// Routes a key to the open dialog, then to the open menu.
    pub fn handle_key(&mut self, key: KeyEvent) -> PlaylistMenuAction {
        match self.dialog.kind() {
            Some(DialogKind::Remove | DialogKind::Clear) => self.handle_confirm_key(key),
            Some(DialogKind::AddUrl | DialogKind::Rename) => self.handle_input_key(key),
            None if self.menu_open => self.handle_menu_key(key),
            None => PlaylistMenuAction::Ignored,
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> PlaylistMenuAction {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y' | 'Y') => self.confirm().into(),
            KeyCode::Esc | KeyCode::Char('n' | 'N') => {
                self.cancel();
                PlaylistMenuAction::Consumed
            }
            _ => PlaylistMenuAction::Consumed,
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> PlaylistMenuAction {
        match key.code {
            KeyCode::Enter => self.confirm().into(),
            KeyCode::Esc => {
                self.cancel();
                PlaylistMenuAction::Consumed
            }
            _ => {
                if let Dialog::AddUrl { input } | Dialog::Rename { input, .. } = &mut self.dialog
                    && input.handle_key(key)
                {
                    trace!(len = input.value().len(), "Dialog text updated");
                }
                PlaylistMenuAction::Consumed
            }
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> PlaylistMenuAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return PlaylistMenuAction::Ignored;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(false);
                PlaylistMenuAction::Consumed
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(true);
                PlaylistMenuAction::Consumed
            }
            KeyCode::Enter => match self.selected_action() {
                Some(action) => self.activate(action),
                None => PlaylistMenuAction::Consumed,
            },
            KeyCode::Esc => {
                self.menu_open = false;
                PlaylistMenuAction::Consumed
            }
            _ => PlaylistMenuAction::Ignored,
        }
    }

    /// Moves the highlight to the next item, skipping separators and labels.
    fn move_selection(&mut self, forward: bool) {
        let entries = self.entries();
        let len = entries.len();
        let mut index = self.selected;

        for _ in 0..len {
            index = if forward {
                (index + 1) % len
            } else {
                (index + len - 1) % len
            };
            if matches!(entries[index], MenuEntry::Item(_)) {
                self.selected = index;
                return;
            }
        }
    }

    fn issue(&self, command: PlaylistCommand) -> PlaylistCommand {
        debug!(command = command.name(), "Dispatching playlist command");
        command.dispatch(self.model.as_ref());
        command
    }

    fn entry_label(&self, action: MenuAction) -> &str {
        match action {
            MenuAction::AddPlaylist => "Add playlist",
            MenuAction::RemovePlaylist => "Remove playlist",
            MenuAction::RenamePlaylist => "Rename playlist",
            MenuAction::ClearPlaylist => "Clear playlist",
            MenuAction::AddUrl => "Add URL",
            MenuAction::SortBy(index) => self
                .columns
                .get(index)
                .map_or("", |column| column.title.as_str()),
        }
    }
}

impl Drop for PlaylistMenu {
    fn drop(&mut self) {
        self.model.unsubscribe(self.subscription);
    }
}

/// Draws the dropdown and the open dialog of a [`PlaylistMenu`].
pub struct PlaylistMenuWidget<'a> {
    menu: &'a PlaylistMenu,
    theme: &'a Theme,
}

impl<'a> PlaylistMenuWidget<'a> {
    #[must_use]
    pub const fn new(menu: &'a PlaylistMenu, theme: &'a Theme) -> Self {
        Self { menu, theme }
    }
}

impl Widget for PlaylistMenuWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.menu.menu_open {
            let rows: Vec<DropdownRow> = self
                .menu
                .entries()
                .into_iter()
                .map(|entry| match entry {
                    MenuEntry::Item(action) => DropdownRow::Item(self.menu.entry_label(action).into()),
                    MenuEntry::Separator => DropdownRow::Separator,
                    MenuEntry::Label(text) => DropdownRow::Label(text.into()),
                })
                .collect();

            Dropdown::new(&rows, self.theme)
                .title(MENU_TITLE)
                .selected(Some(self.menu.selected))
                .render(area, buf);
        }

        let Some(message) = self.menu.dialog_message() else {
            return;
        };
        let heading = self.menu.dialog.heading();

        match &self.menu.dialog {
            Dialog::None => {}
            Dialog::RemoveConfirm { .. } | Dialog::ClearConfirm { .. } => {
                ConfirmDialog::new(heading, &message, self.theme).render(area, buf);
            }
            Dialog::AddUrl { input } | Dialog::Rename { input, .. } => {
                InputDialog::new(heading, &message, input, self.theme).render(area, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SortKey;
    use crate::domain::ports::MockPlaylistPort;
    use crate::domain::ports::mocks::RecordingPlaylistPort;
    use test_case::test_case;

    fn four_columns() -> Vec<SortColumn> {
        vec![
            SortColumn::new("Artist", SortKey::Artist),
            SortColumn::new("Album", SortKey::Album),
            SortColumn::new("Date", SortKey::Date),
            SortColumn::new("Title", SortKey::Title),
        ]
    }

    fn menu_with_title(title: &str) -> (Arc<RecordingPlaylistPort>, PlaylistMenu) {
        let port = Arc::new(RecordingPlaylistPort::with_title(title));
        let menu = PlaylistMenu::new(port.clone(), four_columns());
        (port, menu)
    }

    fn open(menu: &mut PlaylistMenu, kind: DialogKind) {
        match kind {
            DialogKind::Remove => menu.open_remove(),
            DialogKind::Clear => menu.open_clear(),
            DialogKind::AddUrl => menu.open_add_url(),
            DialogKind::Rename => menu.open_rename(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(menu: &mut PlaylistMenu, text: &str) {
        for c in text.chars() {
            assert_eq!(
                menu.handle_key(key(KeyCode::Char(c))),
                PlaylistMenuAction::Consumed
            );
        }
    }

    #[test_case(DialogKind::Remove ; "remove")]
    #[test_case(DialogKind::Clear ; "clear")]
    #[test_case(DialogKind::AddUrl ; "add_url")]
    #[test_case(DialogKind::Rename ; "rename")]
    fn test_open_then_cancel_leaves_model_untouched(kind: DialogKind) {
        let (port, mut menu) = menu_with_title("Favorites");

        open(&mut menu, kind);
        assert_eq!(menu.dialog().kind(), Some(kind));
        menu.update("http://x/a.mp3");
        menu.cancel();

        assert_eq!(menu.dialog(), &Dialog::None);
        assert!(port.commands().is_empty());
    }

    #[test_case(DialogKind::Remove, PlaylistCommand::RemovePlaylist ; "remove")]
    #[test_case(DialogKind::Clear, PlaylistCommand::ClearPlaylist ; "clear")]
    #[test_case(
        DialogKind::AddUrl,
        PlaylistCommand::AddItems(vec!["http://x/a.mp3".to_string()])
        ; "add_url"
    )]
    #[test_case(
        DialogKind::Rename,
        PlaylistCommand::RenamePlaylist("http://x/a.mp3".to_string())
        ; "rename"
    )]
    fn test_open_then_confirm_issues_one_command(kind: DialogKind, expected: PlaylistCommand) {
        let (port, mut menu) = menu_with_title("Favorites");

        open(&mut menu, kind);
        menu.update("http://x/a.mp3");
        let issued = menu.confirm();

        assert_eq!(issued, Some(expected.clone()));
        assert_eq!(port.commands(), vec![expected]);
        assert!(!menu.dialog().is_open());
    }

    #[test]
    fn test_add_url_blank_is_silent() {
        let (port, mut menu) = menu_with_title("Favorites");

        menu.open_add_url();
        assert_eq!(menu.pending_text(), Some(""));
        menu.update("  ");

        assert_eq!(menu.confirm(), None);
        assert!(port.commands().is_empty());
        assert!(!menu.dialog().is_open());
    }

    #[test]
    fn test_add_url_is_trimmed() {
        let (port, mut menu) = menu_with_title("Favorites");

        menu.open_add_url();
        menu.update("  http://x/a.mp3  ");
        assert_eq!(menu.pending_text(), Some("  http://x/a.mp3  "));
        menu.confirm();

        assert_eq!(
            port.commands(),
            vec![PlaylistCommand::AddItems(vec!["http://x/a.mp3".to_string()])]
        );
    }

    #[test]
    fn test_rename_seeds_current_title() {
        let (_port, mut menu) = menu_with_title("Favorites");

        menu.open_rename();

        assert_eq!(menu.pending_text(), Some("Favorites"));
        assert_eq!(
            menu.dialog_message().as_deref(),
            Some("Enter new playlist name:")
        );
    }

    #[test_case("Favorites" ; "unchanged")]
    #[test_case("  Favorites " ; "unchanged_after_trim")]
    fn test_rename_without_change_is_silent(text: &str) {
        let (port, mut menu) = menu_with_title("Favorites");

        menu.open_rename();
        menu.update(text);

        assert_eq!(menu.confirm(), None);
        assert!(port.commands().is_empty());
    }

    #[test]
    fn test_rename_sends_trimmed_title() {
        let (port, mut menu) = menu_with_title("Favorites");

        menu.open_rename();
        menu.update(" My Mix ");
        menu.confirm();

        assert_eq!(
            port.commands(),
            vec![PlaylistCommand::RenamePlaylist("My Mix".to_string())]
        );
    }

    #[test_case(false ; "menu_closed")]
    #[test_case(true ; "menu_open")]
    fn test_sort_by_uses_indexed_column(menu_open: bool) {
        let (port, mut menu) = menu_with_title("Favorites");
        menu.toggle_menu(menu_open);

        let issued = menu.sort_by(2);

        let expected = PlaylistCommand::SortPlaylist(SortColumn::new("Date", SortKey::Date));
        assert_eq!(issued, Some(expected.clone()));
        assert_eq!(port.commands(), vec![expected]);
        assert_eq!(menu.is_menu_open(), menu_open);
    }

    #[test]
    fn test_sort_by_out_of_range_is_ignored() {
        let (port, mut menu) = menu_with_title("Favorites");

        assert_eq!(menu.sort_by(4), None);
        assert!(port.commands().is_empty());
    }

    #[test]
    fn test_add_playlist_is_immediate() {
        let (port, mut menu) = menu_with_title("Favorites");

        menu.add_playlist();

        assert_eq!(port.commands(), vec![PlaylistCommand::AddPlaylist]);
        assert!(!menu.dialog().is_open());
    }

    #[test]
    fn test_dialog_keeps_title_captured_at_open() {
        let (port, mut menu) = menu_with_title("A");

        menu.open_remove();
        port.set_title("B");
        port.notify();
        assert!(menu.sync());

        assert_eq!(menu.snapshot().title, "B");
        assert_eq!(
            menu.dialog_message().as_deref(),
            Some("Do you want to remove 'A' playlist?")
        );

        menu.cancel();
        menu.open_remove();
        assert_eq!(
            menu.dialog_message().as_deref(),
            Some("Do you want to remove 'B' playlist?")
        );
    }

    #[test]
    fn test_sync_only_refreshes_after_notification() {
        let (port, mut menu) = menu_with_title("A");

        assert!(!menu.sync());
        port.set_title("B");
        assert!(!menu.sync());
        assert_eq!(menu.snapshot().title, "A");

        port.notify();
        assert!(menu.sync());
        assert!(!menu.sync());
        assert_eq!(menu.snapshot().title, "B");
    }

    #[test]
    fn test_missing_playlist_gives_empty_title() {
        let (port, mut menu) = menu_with_title("A");

        port.clear_current();
        menu.on_model_changed();

        assert_eq!(menu.snapshot(), &PlaylistSnapshot::default());
        menu.open_clear();
        assert_eq!(
            menu.dialog_message().as_deref(),
            Some("Do you want to clear '' playlist?")
        );
    }

    #[test]
    fn test_drop_unsubscribes() {
        let port = Arc::new(RecordingPlaylistPort::with_title("A"));
        let menu = PlaylistMenu::new(port.clone(), Vec::new());
        assert_eq!(port.subscriber_count(), 1);

        drop(menu);
        assert_eq!(port.subscriber_count(), 0);
    }

    #[test]
    fn test_menu_state_is_independent_of_dialog() {
        let (_port, mut menu) = menu_with_title("A");

        menu.toggle_menu(true);
        menu.open_clear();
        assert!(menu.is_menu_open());

        menu.cancel();
        assert!(menu.is_menu_open());
        menu.toggle_menu(false);
        assert!(!menu.is_menu_open());
    }

    #[test]
    fn test_entries_layout() {
        let (_port, menu) = menu_with_title("A");
        let entries = menu.entries();

        assert_eq!(entries.len(), 12);
        assert_eq!(entries[2], MenuEntry::Separator);
        assert_eq!(entries[7], MenuEntry::Label("Sort by"));
        assert_eq!(entries[11], MenuEntry::Item(MenuAction::SortBy(3)));
    }

    #[test]
    fn test_menu_navigation_skips_non_items() {
        let (_port, mut menu) = menu_with_title("A");
        menu.toggle_menu(true);
        assert_eq!(menu.selected_action(), Some(MenuAction::AddPlaylist));

        menu.handle_key(key(KeyCode::Down));
        assert_eq!(menu.selected_action(), Some(MenuAction::RemovePlaylist));
        menu.handle_key(key(KeyCode::Char('j')));
        assert_eq!(menu.selected_action(), Some(MenuAction::RenamePlaylist));

        menu.handle_key(key(KeyCode::Down));
        menu.handle_key(key(KeyCode::Down));
        menu.handle_key(key(KeyCode::Down));
        assert_eq!(menu.selected_action(), Some(MenuAction::SortBy(0)));

        menu.handle_key(key(KeyCode::Char('k')));
        assert_eq!(menu.selected_action(), Some(MenuAction::AddUrl));
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let (_port, mut menu) = menu_with_title("A");
        menu.toggle_menu(true);

        menu.handle_key(key(KeyCode::Up));
        assert_eq!(menu.selected_action(), Some(MenuAction::SortBy(3)));

        menu.handle_key(key(KeyCode::Down));
        assert_eq!(menu.selected_action(), Some(MenuAction::AddPlaylist));
    }

    #[test]
    fn test_enter_opens_dialog_and_closes_menu() {
        let (port, mut menu) = menu_with_title("Favorites");
        menu.toggle_menu(true);
        menu.handle_key(key(KeyCode::Down));

        assert_eq!(
            menu.handle_key(key(KeyCode::Enter)),
            PlaylistMenuAction::Consumed
        );
        assert!(!menu.is_menu_open());
        assert_eq!(menu.dialog().kind(), Some(DialogKind::Remove));

        assert_eq!(
            menu.handle_key(key(KeyCode::Char('y'))),
            PlaylistMenuAction::Issued(PlaylistCommand::RemovePlaylist)
        );
        assert_eq!(port.commands(), vec![PlaylistCommand::RemovePlaylist]);
    }

    #[test]
    fn test_enter_on_sort_entry_issues_sort() {
        let (port, mut menu) = menu_with_title("Favorites");
        menu.toggle_menu(true);
        menu.handle_key(key(KeyCode::Up));

        let action = menu.handle_key(key(KeyCode::Enter));

        let expected = PlaylistCommand::SortPlaylist(SortColumn::new("Title", SortKey::Title));
        assert_eq!(action, PlaylistMenuAction::Issued(expected.clone()));
        assert_eq!(port.commands(), vec![expected]);
        assert!(!menu.is_menu_open());
    }

    #[test]
    fn test_confirm_dialog_keys() {
        let (port, mut menu) = menu_with_title("Favorites");
        menu.open_clear();

        assert_eq!(
            menu.handle_key(key(KeyCode::Char('x'))),
            PlaylistMenuAction::Consumed
        );
        assert!(menu.dialog().is_open());

        assert_eq!(
            menu.handle_key(key(KeyCode::Char('n'))),
            PlaylistMenuAction::Consumed
        );
        assert!(!menu.dialog().is_open());
        assert!(port.commands().is_empty());
    }

    #[test]
    fn test_input_dialog_typing_then_enter() {
        let (port, mut menu) = menu_with_title("Favorites");
        menu.open_add_url();

        type_text(&mut menu, "http://x/a.mp3");
        assert_eq!(menu.pending_text(), Some("http://x/a.mp3"));

        assert_eq!(
            menu.handle_key(key(KeyCode::Enter)),
            PlaylistMenuAction::Issued(PlaylistCommand::AddItems(vec![
                "http://x/a.mp3".to_string()
            ]))
        );
        assert_eq!(port.commands().len(), 1);
    }

    #[test]
    fn test_input_dialog_escape_cancels() {
        let (port, mut menu) = menu_with_title("Favorites");
        menu.open_rename();
        type_text(&mut menu, "!!");

        assert_eq!(
            menu.handle_key(key(KeyCode::Esc)),
            PlaylistMenuAction::Consumed
        );
        assert!(!menu.dialog().is_open());
        assert!(port.commands().is_empty());
    }

    #[test]
    fn test_keys_are_ignored_when_nothing_is_open() {
        let (_port, mut menu) = menu_with_title("Favorites");

        assert_eq!(
            menu.handle_key(key(KeyCode::Enter)),
            PlaylistMenuAction::Ignored
        );
        assert_eq!(
            menu.handle_key(key(KeyCode::Char('q'))),
            PlaylistMenuAction::Ignored
        );
    }

    fn mock_with_title(title: &'static str) -> MockPlaylistPort {
        let mut mock = MockPlaylistPort::new();
        mock.expect_subscribe().times(1).returning(|_| SubscriptionId(7));
        mock.expect_unsubscribe()
            .withf(|id| *id == SubscriptionId(7))
            .times(1)
            .return_const(());
        mock.expect_current_playlist_id().returning(|| None);
        mock.expect_current_playlist().returning(move || {
            Some(crate::domain::entities::PlaylistInfo {
                id: crate::domain::entities::PlaylistId::generate(),
                title: title.to_string(),
                item_count: 0,
            })
        });
        mock
    }

    #[test]
    fn test_confirm_remove_calls_model_once() {
        let mut mock = mock_with_title("Favorites");
        mock.expect_remove_playlist().times(1).return_const(());

        let mut menu = PlaylistMenu::new(Arc::new(mock), Vec::new());
        menu.open_remove();
        menu.confirm();
        menu.confirm();
    }

    #[test]
    fn test_cancel_never_calls_model() {
        let mut mock = mock_with_title("Favorites");
        mock.expect_remove_playlist().never();
        mock.expect_clear_playlist().never();
        mock.expect_rename_playlist().never();
        mock.expect_add_items().never();

        let mut menu = PlaylistMenu::new(Arc::new(mock), Vec::new());
        for kind in [
            DialogKind::Remove,
            DialogKind::Clear,
            DialogKind::AddUrl,
            DialogKind::Rename,
        ] {
            open(&mut menu, kind);
            menu.cancel();
        }
    }

    #[test]
    fn test_render_menu_and_dialog() {
        let (_port, mut menu) = menu_with_title("Favorites");
        let theme = Theme::default();
        menu.toggle_menu(true);
        menu.open_remove();

        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        PlaylistMenuWidget::new(&menu, &theme).render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(text.contains("Add playlist"));
        assert!(text.contains("Do you want to remove 'Favorites' playlist?"));
    }
}
