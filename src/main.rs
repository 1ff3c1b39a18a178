use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use anyhow::Result;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use tilawah_core::{Config, CredentialStore, FileStore, KeyValueStore, MemoryStore, Session};

mod app;
mod handler;
mod tui;
mod ui;

use app::{App, Credentials};
use tui::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    let (config, config_error) = config_or_default(Config::load());
    init_tracing(&config)?;
    if let Some(e) = config_error {
        warn!(error = %e, "could not read config, using defaults");
    }

    let store: Box<dyn KeyValueStore + Send> = match FileStore::open_default() {
        Ok(store) => {
            debug!(path = %store.path().display(), "opened local storage");
            Box::new(store)
        }
        Err(e) => {
            warn!(error = %e, "local storage unavailable, sessions will not persist");
            Box::new(MemoryStore::default())
        }
    };
    let credentials: Credentials = CredentialStore::new(store);
    let session = credentials.restore_session().unwrap_or_else(|e| {
        warn!(error = %e, "could not restore session");
        None
    });

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &config, credentials, session).await;
    tui::restore()?;

    result
}

async fn run(
    terminal: &mut tui::Tui,
    config: &Config,
    credentials: Credentials,
    session: Option<Session>,
) -> Result<()> {
    let mut events = EventHandler::new();
    let mut app = App::new(config, credentials, session, events.sender());
    info!(
        api = config.api_base_url(),
        edition = config.translation_edition(),
        "starting reader"
    );
    app.start_index_load();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(&mut app, event),
            None => break,
        }
    }

    Ok(())
}

/// Fall back to defaults on a bad config file, holding on to the error
/// until there is somewhere to log it
fn config_or_default(loaded: Result<Config>) -> (Config, Option<anyhow::Error>) {
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::new(), Some(e)),
    }
}

/// Log to `<config_dir>/tilawah/tilawah.log`; the terminal belongs to the UI.
fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    let log_dir = tilawah_core::config::app_dir()?;
    fs::create_dir_all(&log_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("tilawah.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_bad_config_falls_back_but_keeps_error() {
        let (config, error) = config_or_default(Err(anyhow!("expected value at line 1")));
        assert_eq!(config.api_base_url(), Config::new().api_base_url());
        assert!(error.unwrap().to_string().contains("line 1"));
    }

    #[test]
    fn test_good_config_is_used() {
        let loaded = Config {
            translation_edition: Some("en.sahih".to_string()),
            ..Config::default()
        };
        let (config, error) = config_or_default(Ok(loaded));
        assert_eq!(config.translation_edition(), "en.sahih");
        assert!(error.is_none());
    }
}
