use crossterm::event::{Event as CEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::select;

use casebook::events::handle_event;
use casebook::state::AppState;
use casebook::theme::KeyMap;
use casebook::ui::{render_fatal, ui};

use super::channels::Channels;
use super::init::{load_settings, open_catalog, open_favorites};
use super::terminal::TerminalSession;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
type Term = Terminal<CrosstermBackend<std::io::Stdout>>;

/// What: Run the browser end-to-end: load settings, dataset and favorites, drive the
/// event loop and restore the terminal on exit.
///
/// Inputs:
/// - `data_override`: `--data` path, if given.
///
/// Output:
/// - `Ok(())` when the user quits; `Err` on terminal failures, or on a dataset
///   failure when running headless.
///
/// Details:
/// - Terminal events and deferred commands are applied one at a time, in arrival order.
/// - A dataset that cannot be loaded leaves a persistent error screen until the user quits.
/// - With `CASEBOOK_TEST_HEADLESS=1` no terminal is touched and the loop ends at once.
///
/// # Errors
/// - Terminal setup, drawing or teardown failures.
/// - The dataset load error, when running headless.
pub async fn run(data_override: Option<&str>) -> Result<()> {
    let headless = std::env::var("CASEBOOK_TEST_HEADLESS").ok().as_deref() == Some("1");
    let settings = load_settings();
    let keymap = settings.keymap.clone();
    let loaded = open_catalog(data_override, &settings);

    let session = if headless {
        None
    } else {
        Some(TerminalSession::enter()?)
    };
    let mut terminal = if headless {
        None
    } else {
        Some(Terminal::new(CrosstermBackend::new(std::io::stdout()))?)
    };
    let mut channels = Channels::start(headless);

    let result = match loaded {
        Ok(store) => {
            let favorites = open_favorites(&settings, &store);
            let mut app = AppState::new(store, favorites, settings);
            event_loop(&mut app, &mut terminal, &mut channels).await
        }
        Err(err) => {
            tracing::error!(error = %err, "[Runtime] Dataset unavailable");
            if headless {
                Err(err.into())
            } else {
                fatal_loop(&err.to_string(), &keymap, &mut terminal, &mut channels).await
            }
        }
    };

    channels.cancel_events();
    drop(terminal);
    drop(session);
    result
}

/// Render, then apply the next terminal event or deferred command, until quit.
async fn event_loop(
    app: &mut AppState,
    terminal: &mut Option<Term>,
    channels: &mut Channels,
) -> Result<()> {
    loop {
        if let Some(t) = terminal.as_mut() {
            t.draw(|f| ui(f, app))?;
        }
        select! {
            ev = channels.event_rx.recv() => {
                let Some(ev) = ev else { break };
                let dispatch = handle_event(ev, app);
                channels.schedule(&dispatch.effects);
                if dispatch.exit {
                    tracing::info!("[Runtime] Quit requested");
                    break;
                }
            }
            Some(cmd) = channels.cmd_rx.recv() => {
                let fx = app.apply(cmd);
                channels.schedule(std::slice::from_ref(&fx));
            }
        }
    }
    Ok(())
}

/// Show the fatal error screen until a quit chord arrives.
async fn fatal_loop(
    message: &str,
    keymap: &KeyMap,
    terminal: &mut Option<Term>,
    channels: &mut Channels,
) -> Result<()> {
    loop {
        if let Some(t) = terminal.as_mut() {
            t.draw(|f| render_fatal(f, message, &keymap.quit))?;
        }
        match channels.event_rx.recv().await {
            Some(CEvent::Key(ke))
                if ke.kind == KeyEventKind::Press
                    && keymap.quit.iter().any(|c| c.matches(ke.code, ke.modifiers)) =>
            {
                break;
            }
            Some(_) => {}
            None => break,
        }
    }
    Ok(())
}
