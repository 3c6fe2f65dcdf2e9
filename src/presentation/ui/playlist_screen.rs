//! Playlist tabs, item table and the playlist menu.

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Cell, Row, StatefulWidget, Table, TableState, Tabs, Widget},
};
use tracing::debug;

use crate::domain::entities::{PlaylistInfo, PlaylistItem, SortColumn};
use crate::domain::keybinding::{Action, Keybind};
use crate::domain::ports::{PlaylistCommand, PlaylistPort};
use crate::presentation::commands::{CommandRegistry, HasCommands};
use crate::presentation::theme::Theme;
use crate::presentation::ui::playlist_menu::{PlaylistMenu, PlaylistMenuAction, PlaylistMenuWidget};
use crate::presentation::widgets::{FocusContext, FooterBar, FooterBarStyle, StatusBar};
use crate::{NAME, VERSION};

/// What the app should do after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenKeyResult {
    Continue,
    Quit,
    Issued(PlaylistCommand),
}

pub struct PlaylistScreenState {
    model: Arc<dyn PlaylistPort>,
    menu: PlaylistMenu,
    playlists: Vec<PlaylistInfo>,
    items: Vec<PlaylistItem>,
    table_state: TableState,
    status: StatusBar,
    registry: CommandRegistry,
    theme: Theme,
}

impl PlaylistScreenState {
    #[must_use]
    pub fn new(model: Arc<dyn PlaylistPort>, columns: Vec<SortColumn>, theme: Theme) -> Self {
        let menu = PlaylistMenu::new(Arc::clone(&model), columns);
        let mut state = Self {
            model,
            menu,
            playlists: Vec::new(),
            items: Vec::new(),
            table_state: TableState::default(),
            status: StatusBar::info("Press m to open the playlist menu"),
            registry: CommandRegistry::new(),
            theme,
        };
        state.reload();
        state
    }

    #[must_use]
    pub const fn menu(&self) -> &PlaylistMenu {
        &self.menu
    }

    #[must_use]
    pub fn playlists(&self) -> &[PlaylistInfo] {
        &self.playlists
    }

    #[must_use]
    pub fn items(&self) -> &[PlaylistItem] {
        &self.items
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<usize> {
        self.table_state.selected()
    }

    #[must_use]
    pub const fn status(&self) -> &StatusBar {
        &self.status
    }

    pub fn set_status(&mut self, status: StatusBar) {
        self.status = status;
    }

    /// Picks up model changes. Returns whether anything was re-read.
    pub fn sync(&mut self) -> bool {
        if self.menu.sync() {
            self.reload();
            true
        } else {
            false
        }
    }

    fn reload(&mut self) {
        self.playlists = self.model.playlists();
        self.items = self.model.current_items();

        let selected = match self.table_state.selected() {
            _ if self.items.is_empty() => None,
            Some(i) => Some(i.min(self.items.len() - 1)),
            None => Some(0),
        };
        self.table_state.select(selected);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenKeyResult {
        match self.menu.handle_key(key) {
            PlaylistMenuAction::Issued(command) => return ScreenKeyResult::Issued(command),
            PlaylistMenuAction::Consumed => return ScreenKeyResult::Continue,
            PlaylistMenuAction::Ignored => {}
        }

        let Some(action) = self.registry.find_action(key) else {
            return ScreenKeyResult::Continue;
        };

        match action {
            Action::Quit => return ScreenKeyResult::Quit,
            Action::ToggleMenu => self.menu.toggle_menu(!self.menu.is_menu_open()),
            Action::NextPlaylist => self.select_relative(true),
            Action::PreviousPlaylist => self.select_relative(false),
            Action::NavigateUp => self.move_cursor(false),
            Action::NavigateDown => self.move_cursor(true),
            Action::SelectFirst if !self.items.is_empty() => self.table_state.select(Some(0)),
            Action::SelectLast if !self.items.is_empty() => {
                self.table_state.select(Some(self.items.len() - 1));
            }
            Action::SelectFirst | Action::SelectLast | Action::Select | Action::Cancel => {}
        }
        ScreenKeyResult::Continue
    }

    fn select_relative(&self, forward: bool) {
        let len = self.playlists.len();
        if len < 2 {
            return;
        }

        let current = self.menu.snapshot().id;
        let index = self
            .playlists
            .iter()
            .position(|info| Some(info.id) == current)
            .unwrap_or(0);
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };

        let id = self.playlists[next].id;
        debug!(playlist = %id, "Switching playlist");
        self.model.select_playlist(id);
    }

    fn move_cursor(&mut self, down: bool) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        let next = match self.table_state.selected() {
            None => 0,
            Some(i) if down => (i + 1).min(last),
            Some(i) => i.saturating_sub(1),
        };
        self.table_state.select(Some(next));
    }

    fn focus_context(&self) -> FocusContext {
        if self.menu.dialog().is_open() {
            FocusContext::Dialog
        } else if self.menu.is_menu_open() {
            FocusContext::Menu
        } else {
            FocusContext::Items
        }
    }

    fn current_index(&self) -> Option<usize> {
        let current = self.menu.snapshot().id?;
        self.playlists.iter().position(|info| info.id == current)
    }
}

impl HasCommands for PlaylistScreenState {
    fn get_commands(&self, registry: &CommandRegistry) -> Vec<Keybind> {
        let bindings: &[(Action, &'static str)] = match self.focus_context() {
            FocusContext::Dialog => &[(Action::Select, "Confirm"), (Action::Cancel, "Cancel")],
            FocusContext::Menu => &[
                (Action::NavigateDown, "Next"),
                (Action::Select, "Choose"),
                (Action::Cancel, "Close"),
            ],
            FocusContext::Items => &[
                (Action::ToggleMenu, "Menu"),
                (Action::NextPlaylist, "Next playlist"),
                (Action::NavigateDown, "Down"),
                (Action::Quit, "Quit"),
            ],
        };

        bindings
            .iter()
            .filter_map(|(action, label)| registry.keybind(*action, *label))
            .collect()
    }
}

/// Describes a command that went through.
#[must_use]
pub fn describe_command(command: &PlaylistCommand) -> String {
    match command {
        PlaylistCommand::AddPlaylist => "Playlist added".to_string(),
        PlaylistCommand::RemovePlaylist => "Playlist removed".to_string(),
        PlaylistCommand::RenamePlaylist(title) => format!("Playlist renamed to '{title}'"),
        PlaylistCommand::ClearPlaylist => "Playlist cleared".to_string(),
        PlaylistCommand::AddItems(urls) if urls.len() == 1 => "Added 1 item".to_string(),
        PlaylistCommand::AddItems(urls) => format!("Added {} items", urls.len()),
        PlaylistCommand::SortPlaylist(column) => format!("Sorted by {}", column.title),
    }
}

pub struct PlaylistScreen;

impl StatefulWidget for PlaylistScreen {
    type State = PlaylistScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [tabs_area, body_area, status_area, footer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let theme = state.theme;

        let titles: Vec<Line> = state
            .playlists
            .iter()
            .map(|info| Line::from(format!(" {} ", info.title)))
            .collect();
        Tabs::new(titles)
            .select(state.current_index().unwrap_or(0))
            .style(theme.base_style)
            .highlight_style(theme.selection_style)
            .divider("│")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.accent))
                    .title(format!(" {NAME} v{VERSION} ")),
            )
            .render(tabs_area, buf);

        let rows = state.items.iter().enumerate().map(|(i, item)| {
            let track = item.track_number.map(|n| n.to_string()).unwrap_or_default();
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(item.display_title()),
                Cell::from(item.artist.as_deref().unwrap_or_default()),
                Cell::from(item.album.as_deref().unwrap_or_default()),
                Cell::from(item.date.as_deref().unwrap_or_default()),
                Cell::from(track),
            ])
        });
        let header = Row::new(vec!["#", "Title", "Artist", "Album", "Date", "Track"])
            .style(theme.dimmed_style);
        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Fill(3),
                Constraint::Fill(2),
                Constraint::Fill(2),
                Constraint::Length(10),
                Constraint::Length(5),
            ],
        )
        .header(header)
        .row_highlight_style(theme.selection_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.dimmed_style),
        );
        StatefulWidget::render(table, body_area, buf, &mut state.table_state);

        PlaylistMenuWidget::new(&state.menu, &theme).render(body_area, buf);

        let summary = format!("{} items", state.items.len());
        (&state.status.clone().summary(summary)).render(status_area, buf);

        let keybinds = state.get_commands(&state.registry);
        FooterBar::new(&keybinds)
            .focus_context(state.focus_context())
            .style(FooterBarStyle::from_theme(&theme))
            .render(footer_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Playlist, SortKey, default_sort_columns};
    use crate::domain::ports::mocks::RecordingPlaylistPort;
    use crate::infrastructure::InMemoryPlaylistStore;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn store_with_two_playlists() -> Arc<InMemoryPlaylistStore> {
        let mut first = Playlist::new("First");
        first.items.push(PlaylistItem::from_url("http://x/a.mp3"));
        first.items.push(PlaylistItem::from_url("http://x/b.mp3"));
        let second = Playlist::new("Second");
        Arc::new(InMemoryPlaylistStore::with_playlists(
            "New playlist",
            vec![first, second],
            None,
        ))
    }

    #[test]
    fn test_initial_load() {
        let store = store_with_two_playlists();
        let state = PlaylistScreenState::new(store, default_sort_columns(), Theme::default());

        assert_eq!(state.playlists().len(), 2);
        assert_eq!(state.items().len(), 2);
        assert_eq!(state.selected_item(), Some(0));
        assert_eq!(state.menu().snapshot().title, "First");
    }

    #[test]
    fn test_next_playlist_switches_after_sync() {
        let store = store_with_two_playlists();
        let mut state =
            PlaylistScreenState::new(store.clone(), default_sort_columns(), Theme::default());

        assert_eq!(state.handle_key(key(KeyCode::Tab)), ScreenKeyResult::Continue);
        assert!(state.sync());

        assert_eq!(state.menu().snapshot().title, "Second");
        assert!(state.items().is_empty());
        assert_eq!(state.selected_item(), None);

        state.handle_key(key(KeyCode::Left));
        state.sync();
        assert_eq!(state.menu().snapshot().title, "First");
    }

    #[test]
    fn test_menu_issue_reaches_store() {
        let store = store_with_two_playlists();
        let mut state =
            PlaylistScreenState::new(store.clone(), default_sort_columns(), Theme::default());

        state.handle_key(key(KeyCode::Char('m')));
        assert!(state.menu().is_menu_open());

        let result = state.handle_key(key(KeyCode::Enter));
        assert_eq!(result, ScreenKeyResult::Issued(PlaylistCommand::AddPlaylist));

        assert!(state.sync());
        assert_eq!(state.playlists().len(), 3);
        assert_eq!(state.menu().snapshot().title, "New playlist");
    }

    #[test]
    fn test_dialog_swallows_global_keys() {
        let port = Arc::new(RecordingPlaylistPort::with_title("A"));
        let mut state =
            PlaylistScreenState::new(port.clone(), default_sort_columns(), Theme::default());

        state.handle_key(key(KeyCode::Char('m')));
        state.handle_key(key(KeyCode::Down));
        state.handle_key(key(KeyCode::Enter));
        assert!(state.menu().dialog().is_open());

        assert_eq!(
            state.handle_key(key(KeyCode::Char('q'))),
            ScreenKeyResult::Continue
        );
        assert_eq!(
            state.handle_key(key(KeyCode::Esc)),
            ScreenKeyResult::Continue
        );
        assert_eq!(
            state.handle_key(key(KeyCode::Char('q'))),
            ScreenKeyResult::Quit
        );
        assert!(port.commands().is_empty());
    }

    #[test]
    fn test_item_cursor_stays_in_bounds() {
        let store = store_with_two_playlists();
        let mut state = PlaylistScreenState::new(store, default_sort_columns(), Theme::default());

        state.handle_key(key(KeyCode::Down));
        state.handle_key(key(KeyCode::Down));
        assert_eq!(state.selected_item(), Some(1));

        state.handle_key(key(KeyCode::Char('g')));
        assert_eq!(state.selected_item(), Some(0));
        state.handle_key(key(KeyCode::Up));
        assert_eq!(state.selected_item(), Some(0));
    }

    #[test]
    fn test_footer_follows_focus() {
        let port = Arc::new(RecordingPlaylistPort::with_title("A"));
        let mut state = PlaylistScreenState::new(port, Vec::new(), Theme::default());
        let registry = CommandRegistry::new();

        let labels = |state: &PlaylistScreenState| -> Vec<String> {
            state
                .get_commands(&registry)
                .into_iter()
                .map(|k| k.label.into_owned())
                .collect()
        };

        assert_eq!(labels(&state)[0], "Menu");
        state.handle_key(key(KeyCode::F(2)));
        assert_eq!(labels(&state), vec!["Next", "Choose", "Close"]);
    }

    #[test]
    fn test_describe_command() {
        assert_eq!(
            describe_command(&PlaylistCommand::SortPlaylist(SortColumn::new(
                "Artist",
                SortKey::Artist
            ))),
            "Sorted by Artist"
        );
        assert_eq!(
            describe_command(&PlaylistCommand::AddItems(vec!["a".into(), "b".into()])),
            "Added 2 items"
        );
    }

    #[test]
    fn test_render_smoke() {
        let store = store_with_two_playlists();
        let mut state = PlaylistScreenState::new(store, default_sort_columns(), Theme::default());
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);

        PlaylistScreen.render(area, &mut buf, &mut state);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(text.contains("First"));
        assert!(text.contains("a.mp3"));
        assert!(text.contains("2 items"));
    }
}
