use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::event::Event as CEvent;
use tokio::{
    sync::mpsc,
    time::{Duration, sleep},
};

use casebook::state::{Command, Effects};

/// Interval of the housekeeping tick.
pub const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// What: Channels feeding the single event-processing loop.
///
/// Details:
/// - Terminal events come from a blocking reader thread.
/// - Deferred commands (ticks, transition settles) come from tokio tasks.
pub struct Channels {
    /// Terminal events from the reader thread.
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    /// Stop flag for the reader thread.
    pub event_thread_cancelled: Arc<AtomicBool>,
    /// Sender for deferred commands.
    pub cmd_tx: mpsc::UnboundedSender<Command>,
    /// Deferred commands awaiting the loop.
    pub cmd_rx: mpsc::UnboundedReceiver<Command>,
}

impl Channels {
    /// What: Create the channels and start the event reader and tick workers.
    ///
    /// Inputs:
    /// - `headless`: Skip the terminal reader; the event channel is closed immediately.
    ///
    /// Output:
    /// - Receivers for the event loop plus the command sender for deferred work.
    pub fn start(headless: bool) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<CEvent>();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<Command>();
        let event_thread_cancelled = Arc::new(AtomicBool::new(false));
        if headless {
            drop(event_tx);
        } else {
            spawn_event_thread(event_tx, event_thread_cancelled.clone());
        }
        spawn_tick_worker(cmd_tx.clone());
        Self {
            event_rx,
            event_thread_cancelled,
            cmd_tx,
            cmd_rx,
        }
    }

    /// Ask the reader thread to stop.
    pub fn cancel_events(&self) {
        self.event_thread_cancelled.store(true, Ordering::Relaxed);
    }

    /// What: Schedule the deferred work requested by processed commands.
    ///
    /// Inputs:
    /// - `effects`: Effects in the order their commands were applied.
    ///
    /// Details:
    /// - Each settle request sleeps for its delay, then posts
    ///   `Command::SettleTransition` back into the loop. Stale generations are
    ///   ignored by the panel when they arrive.
    pub fn schedule(&self, effects: &[Effects]) {
        for fx in effects {
            if let Some((generation, delay)) = fx.settle_after {
                let tx = self.cmd_tx.clone();
                tokio::spawn(async move {
                    sleep(delay).await;
                    let _ = tx.send(Command::SettleTransition(generation));
                });
            }
        }
    }
}

/// Read terminal events on a blocking thread until cancelled or the loop goes away.
fn spawn_event_thread(event_tx: mpsc::UnboundedSender<CEvent>, cancelled: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        while !cancelled.load(Ordering::Relaxed) {
            match crossterm::event::poll(std::time::Duration::from_millis(50)) {
                Ok(true) => match crossterm::event::read() {
                    Ok(ev) => {
                        if cancelled.load(Ordering::Relaxed) || event_tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::debug!(error = %e, "[Runtime] Ignoring event read error"),
                },
                Ok(false) => {}
                Err(e) => tracing::debug!(error = %e, "[Runtime] Ignoring event poll error"),
            }
        }
    });
}

/// Post `Command::Tick` every [`TICK_INTERVAL`] until the loop goes away.
fn spawn_tick_worker(cmd_tx: mpsc::UnboundedSender<Command>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        loop {
            interval.tick().await;
            if cmd_tx.send(Command::Tick).is_err() {
                break;
            }
        }
    });
}
