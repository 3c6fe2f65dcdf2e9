//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info};

use crate::domain::entities::SortColumn;
use crate::domain::ports::{PlaylistPort, SubscriptionId};
use crate::infrastructure::InMemoryPlaylistStore;
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::theme::Theme;
use crate::presentation::ui::playlist_screen::{
    PlaylistScreen, PlaylistScreenState, ScreenKeyResult, describe_command,
};
use crate::presentation::widgets::StatusBar;

const REDRAW_TICK_RATE: Duration = Duration::from_millis(250);

pub struct App {
    store: Arc<InMemoryPlaylistStore>,
    screen: PlaylistScreenState,
    model_rx: mpsc::UnboundedReceiver<()>,
    subscription: SubscriptionId,
    running: bool,
}

impl App {
    #[must_use]
    pub fn new(store: Arc<InMemoryPlaylistStore>, columns: Vec<SortColumn>, theme: Theme) -> Self {
        let (model_tx, model_rx) = mpsc::unbounded_channel();
        let subscription = store.subscribe(Arc::new(move || {
            let _ = model_tx.send(());
        }));

        let model: Arc<dyn PlaylistPort> = store.clone();
        let screen = PlaylistScreenState::new(model, columns, theme);

        Self {
            store,
            screen,
            model_rx,
            subscription,
            running: true,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut redraw_interval = interval(REDRAW_TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                biased;

                Some(()) = self.model_rx.recv() => {
                    while self.model_rx.try_recv().is_ok() {}
                    if self.screen.sync() {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if self.handle_terminal_event(event) == EventResult::Exit {
                        self.running = false;
                    }
                    self.screen.sync();
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = redraw_interval.tick() => {
                    if self.screen.sync() {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }
            }
        }

        info!("Application exiting normally");
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        frame.render_stateful_widget(PlaylistScreen, frame.area(), &mut self.screen);
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(..) => EventResult::Consumed,
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if EventHandler::is_force_quit_event(&key) {
            return EventResult::Exit;
        }

        match self.screen.handle_key(key) {
            ScreenKeyResult::Quit => EventResult::Exit,
            ScreenKeyResult::Issued(command) => {
                let status = match self.store.take_last_error() {
                    Some(error) => StatusBar::from_error(&error),
                    None => StatusBar::info(describe_command(&command)),
                };
                debug!(command = command.name(), status = status.message(), "Command finished");
                self.screen.set_status(status);
                EventResult::Consumed
            }
            ScreenKeyResult::Continue => EventResult::Continue,
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}
