use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use setlist::infrastructure::{
    AppConfig, CliArgs, InMemoryPlaylistStore, StateConfig, StorageManager,
};
use setlist::presentation::{App, Theme};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(storage: &StorageManager) -> Result<AppConfig> {
    let args = CliArgs::parse();
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let storage = StorageManager::new()?;
    let config = load_config(&storage)?;

    init_logging(&config)?;

    info!(version = setlist::VERSION, "Starting {}", setlist::NAME);

    let state = storage.load_state(config.state_path.as_deref())?;
    let store = Arc::new(InMemoryPlaylistStore::with_playlists(
        config.new_playlist_title.clone(),
        state.playlists,
        state.current_playlist,
    ));

    let app = App::new(
        Arc::clone(&store),
        config.effective_sort_columns(),
        Theme::new(&config.theme.accent_color),
    );

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal).await;
    ratatui::restore();

    let (playlists, current_playlist) = store.export();
    let state = StateConfig {
        current_playlist,
        playlists,
    };
    if let Err(e) = storage.save_state(&state, config.state_path.as_deref()) {
        warn!(error = %e, "Failed to save playlists");
    }

    result
}
