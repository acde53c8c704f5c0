//! Terminal session and its input stream.
//!
//! [`Session`] owns raw mode, the alternate screen, bracketed paste and
//! focus reporting, and puts all of them back on drop or panic. [`Input`]
//! merges crossterm's event stream with the tick and render clocks.

use std::io::{Stdout, stdout};
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    cursor,
    event::{
        DisableBracketedPaste, DisableFocusChange, EnableBracketedPaste, EnableFocusChange,
        Event as TermEvent, EventStream, KeyEvent, KeyEventKind,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// What the app loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// Text pasted in one piece (bracketed paste).
    Paste(String),
    /// The terminal window got focus back; repaint in case it was obscured.
    FocusGained,
    Resize(u16, u16),
    Tick,
    Render,
}

/// Map a raw terminal event; `None` for anything the app ignores.
pub fn translate(event: TermEvent) -> Option<Event> {
    match event {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        TermEvent::Paste(text) if !text.is_empty() => Some(Event::Paste(text)),
        TermEvent::FocusGained => Some(Event::FocusGained),
        TermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

/// Raw-mode terminal for the lifetime of the app.
pub struct Session {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Session {
    pub fn start() -> Result<Self> {
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            EnableFocusChange,
            cursor::Hide
        )?;
        terminal.clear()?;
        Ok(Self { terminal })
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        restore();
    }
}

/// Undo everything [`Session::start`] did. Errors are ignored: this also
/// runs from the panic hook.
fn restore() {
    let _ = execute!(
        stdout(),
        DisableFocusChange,
        DisableBracketedPaste,
        LeaveAlternateScreen,
        cursor::Show
    );
    let _ = terminal::disable_raw_mode();
}

/// Route panics and eyre reports through terminal restoration.
///
/// Call before [`Session::start`].
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;

    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        panic_hook(info);
    }));
    Ok(())
}

fn clock(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Terminal events plus tick/render clocks, read on a background task.
pub struct Input {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl Input {
    pub fn spawn(tick: Duration, render: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let stop = cancel.clone();

        tokio::spawn(async move {
            let mut stream = EventStream::new();
            let mut tick = clock(tick);
            let mut render = clock(render);
            loop {
                let event = tokio::select! {
                    () = stop.cancelled() => break,
                    _ = tick.tick() => Event::Tick,
                    _ = render.tick() => Event::Render,
                    Some(Ok(raw)) = stream.next() => match translate(raw) {
                        Some(event) => event,
                        None => continue,
                    },
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, cancel }
    }

    /// `None` once the reader task is gone.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for Input {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(kind: KeyEventKind) -> TermEvent {
        TermEvent::Key(KeyEvent {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn only_key_presses_pass() {
        assert!(matches!(translate(key(KeyEventKind::Press)), Some(Event::Key(_))));
        assert_eq!(translate(key(KeyEventKind::Release)), None);
        assert_eq!(translate(key(KeyEventKind::Repeat)), None);
    }

    #[test]
    fn paste_focus_and_resize() {
        assert_eq!(
            translate(TermEvent::Paste("red shoes".into())),
            Some(Event::Paste("red shoes".into()))
        );
        assert_eq!(translate(TermEvent::Paste(String::new())), None);
        assert_eq!(translate(TermEvent::FocusGained), Some(Event::FocusGained));
        assert_eq!(translate(TermEvent::FocusLost), None);
        assert_eq!(translate(TermEvent::Resize(100, 40)), Some(Event::Resize(100, 40)));
    }
}
