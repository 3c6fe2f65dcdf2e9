//! In-memory playlist model.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::sorter;
use crate::domain::entities::{Playlist, PlaylistId, PlaylistInfo, PlaylistItem, SortColumn};
use crate::domain::errors::PlaylistError;
use crate::domain::ports::{ChangeListener, PlaylistPort, SubscriptionId};

/// Default title given to new playlists.
pub const DEFAULT_NEW_PLAYLIST_TITLE: &str = "New playlist";

#[derive(Debug, Default)]
struct StoreState {
    playlists: Vec<Playlist>,
    current: Option<PlaylistId>,
    last_error: Option<PlaylistError>,
}

impl StoreState {
    fn current_index(&self) -> Option<usize> {
        let current = self.current?;
        self.playlists.iter().position(|p| p.id == current)
    }

    fn current_mut(&mut self) -> Result<&mut Playlist, PlaylistError> {
        let index = self
            .current_index()
            .ok_or(PlaylistError::NoCurrentPlaylist)?;
        Ok(&mut self.playlists[index])
    }

    fn unique_title(&self, base: &str) -> String {
        let taken = |title: &str| self.playlists.iter().any(|p| p.title == title);

        if !taken(base) {
            return base.to_string();
        }

        (2..)
            .map(|n| format!("{base} ({n})"))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}

/// Thread-safe playlist model kept in memory.
///
/// Successful mutations notify subscribers after the internal lock is
/// released, so listeners may read the store. Failed mutations are logged and
/// kept as the last error.
pub struct InMemoryPlaylistStore {
    state: RwLock<StoreState>,
    listeners: Mutex<Vec<(SubscriptionId, ChangeListener)>>,
    next_subscription: AtomicU64,
    new_playlist_title: String,
}

impl InMemoryPlaylistStore {
    /// Creates an empty store.
    ///
    /// A blank `new_playlist_title` falls back to [`DEFAULT_NEW_PLAYLIST_TITLE`].
    #[must_use]
    pub fn new(new_playlist_title: impl Into<String>) -> Self {
        let title = new_playlist_title.into();
        let new_playlist_title = match title.trim() {
            "" => DEFAULT_NEW_PLAYLIST_TITLE.to_string(),
            trimmed => trimmed.to_string(),
        };

        Self {
            state: RwLock::new(StoreState::default()),
            listeners: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
            new_playlist_title,
        }
    }

    /// Creates a store holding `playlists`.
    ///
    /// Falls back to the first playlist when `current` is missing or unknown.
    #[must_use]
    pub fn with_playlists(
        new_playlist_title: impl Into<String>,
        playlists: Vec<Playlist>,
        current: Option<PlaylistId>,
    ) -> Self {
        let current = current
            .filter(|id| playlists.iter().any(|p| p.id == *id))
            .or_else(|| playlists.first().map(|p| p.id));

        let store = Self::new(new_playlist_title);
        {
            let mut state = store.state.write();
            state.playlists = playlists;
            state.current = current;
        }
        store
    }

    /// Returns a copy of all playlists and the current selection.
    #[must_use]
    pub fn export(&self) -> (Vec<Playlist>, Option<PlaylistId>) {
        let state = self.state.read();
        (state.playlists.clone(), state.current)
    }

    /// Takes the error left by the last failed command.
    pub fn take_last_error(&self) -> Option<PlaylistError> {
        self.state.write().last_error.take()
    }

    fn mutate<F>(&self, operation: &'static str, f: F)
    where
        F: FnOnce(&mut StoreState, &str) -> Result<(), PlaylistError>,
    {
        let result = {
            let mut state = self.state.write();
            let result = f(&mut *state, &self.new_playlist_title);
            match &result {
                Ok(()) => state.last_error = None,
                Err(e) => state.last_error = Some(e.clone()),
            }
            result
        };

        match result {
            Ok(()) => {
                debug!(operation, "Playlist model updated");
                self.notify();
            }
            Err(e) => warn!(operation, error = %e, "Playlist command rejected"),
        }
    }

    fn notify(&self) {
        let listeners: Vec<ChangeListener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener();
        }
    }
}

impl Default for InMemoryPlaylistStore {
    fn default() -> Self {
        Self::new(DEFAULT_NEW_PLAYLIST_TITLE)
    }
}

impl PlaylistPort for InMemoryPlaylistStore {
    fn current_playlist_id(&self) -> Option<PlaylistId> {
        let state = self.state.read();
        state.current_index().map(|i| state.playlists[i].id)
    }

    fn current_playlist(&self) -> Option<PlaylistInfo> {
        let state = self.state.read();
        state.current_index().map(|i| state.playlists[i].info())
    }

    fn playlists(&self) -> Vec<PlaylistInfo> {
        self.state.read().playlists.iter().map(Playlist::info).collect()
    }

    fn current_items(&self) -> Vec<PlaylistItem> {
        let state = self.state.read();
        state
            .current_index()
            .map(|i| state.playlists[i].items.clone())
            .unwrap_or_default()
    }

    fn select_playlist(&self, id: PlaylistId) {
        self.mutate("select_playlist", |state, _| {
            if !state.playlists.iter().any(|p| p.id == id) {
                return Err(PlaylistError::unknown(id));
            }
            state.current = Some(id);
            Ok(())
        });
    }

    fn add_playlist(&self) {
        self.mutate("add_playlist", |state, base_title| {
            let playlist = Playlist::new(state.unique_title(base_title));
            info!(id = %playlist.id, title = %playlist.title, "Playlist added");
            state.current = Some(playlist.id);
            state.playlists.push(playlist);
            Ok(())
        });
    }

    fn remove_playlist(&self) {
        self.mutate("remove_playlist", |state, _| {
            let index = state
                .current_index()
                .ok_or(PlaylistError::NoCurrentPlaylist)?;
            let removed = state.playlists.remove(index);
            info!(id = %removed.id, title = %removed.title, "Playlist removed");

            state.current = state
                .playlists
                .get(index)
                .or_else(|| state.playlists.last())
                .map(|p| p.id);
            Ok(())
        });
    }

    fn rename_playlist(&self, title: &str) {
        let title = title.trim().to_string();
        self.mutate("rename_playlist", move |state, _| {
            if title.is_empty() {
                return Err(PlaylistError::EmptyTitle);
            }
            let playlist = state.current_mut()?;
            info!(id = %playlist.id, from = %playlist.title, to = %title, "Playlist renamed");
            playlist.title = title;
            Ok(())
        });
    }

    fn clear_playlist(&self) {
        self.mutate("clear_playlist", |state, _| {
            let playlist = state.current_mut()?;
            info!(id = %playlist.id, count = playlist.items.len(), "Playlist cleared");
            playlist.items.clear();
            Ok(())
        });
    }

    fn add_items(&self, urls: &[String]) {
        let items: Vec<PlaylistItem> = urls
            .iter()
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .map(PlaylistItem::from_url)
            .collect();

        self.mutate("add_items", move |state, _| {
            if items.is_empty() {
                return Err(PlaylistError::nothing_to_add("no non-blank URLs"));
            }
            let playlist = state.current_mut()?;
            info!(id = %playlist.id, count = items.len(), "Items added");
            playlist.items.extend(items);
            Ok(())
        });
    }

    fn sort_playlist(&self, column: &SortColumn) {
        let key = column.key;
        self.mutate("sort_playlist", move |state, _| {
            let playlist = state.current_mut()?;
            debug!(id = %playlist.id, ?key, "Sorting playlist");
            sorter::sort_items(&mut playlist.items, key);
            Ok(())
        });
    }

    fn subscribe(&self, listener: ChangeListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, listener));
        debug!(subscription = id.0, "Listener subscribed");
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.lock().retain(|(existing, _)| *existing != id);
        debug!(subscription = id.0, "Listener unsubscribed");
    }
}
