use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Raw-mode, alternate-screen session with mouse capture; restored on drop.
pub struct TerminalSession;

impl TerminalSession {
    /// What: Put the terminal into TUI mode.
    ///
    /// Output:
    /// - Session guard; `Err` when raw mode or the alternate screen cannot be entered.
    ///
    /// Details:
    /// - A failure after raw mode was enabled still restores the terminal.
    ///
    /// # Errors
    /// Returns the crossterm error when raw mode, the alternate screen or mouse
    /// capture cannot be enabled.
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let session = Self;
        execute!(std::io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        tracing::debug!("[Terminal] Entered alternate screen");
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!(error = %e, "[Terminal] Failed to leave raw mode");
        }
        if let Err(e) = execute!(
            std::io::stdout(),
            DisableMouseCapture,
            LeaveAlternateScreen,
            Show
        ) {
            tracing::warn!(error = %e, "[Terminal] Failed to restore screen");
        }
    }
}
