//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use storefront_core::{CategoryDataSource, ProductDataSource};

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::terminal::{Event, Input, Session};
use crate::theme;

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    /// Service host shown in the status bar.
    host: String,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new<C>(catalog: C, host: String, category: Option<String>) -> Self
    where
        C: ProductDataSource + CategoryDataSource + Clone,
    {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(catalog, category.clone()).into_iter().collect();

        // The search screen mounts with `category` on its first focus.

        let active_screen = if category.is_some() {
            ScreenId::Search
        } else {
            ScreenId::Home
        };

        Self {
            active_screen,
            previous_screen: None,
            screens,
            running: true,
            help_visible: false,
            host,
            action_tx,
            action_rx,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut session = Session::start()?;
        let (w, h) = session.size().unwrap_or((80, 24));
        debug!(w, h, "terminal size");
        self.init_screens()?;

        // 4 Hz animation tick, ~30 FPS redraw
        let mut events = Input::spawn(Duration::from_millis(250), Duration::from_millis(33));

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Paste(text) => self.handle_paste(&text)?,
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::FocusGained | Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    session.draw(|frame| self.render(frame))?;
                }
            }
        }

        drop(events);
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here unless
    /// the active screen owns the keyboard; everything else is delegated.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        let captured = self
            .screens
            .get(&self.active_screen)
            .is_some_and(|s| s.captures_input());

        if !captured {
            match (key.modifiers, key.code) {
                (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
                (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
                (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='2')) => {
                    let n = u8::try_from(c).map_or(0, |b| b - b'0');
                    if let Some(screen) = ScreenId::from_number(n) {
                        return Ok(Some(Action::SwitchScreen(screen)));
                    }
                }
                (KeyModifiers::NONE, KeyCode::Tab) => {
                    return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
                }
                (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                    return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
                }
                _ => {}
            }
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Pastes only reach the active screen; there are no global paste actions.
    fn handle_paste(&mut self, text: &str) -> Result<()> {
        if self.help_visible {
            return Ok(());
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            if let Some(action) = screen.handle_paste(text)? {
                self.action_tx.send(action)?;
            }
        }
        Ok(())
    }

    fn switch_to(&mut self, target: ScreenId) {
        if target == self.active_screen {
            return;
        }
        debug!("switching screen: {} → {}", self.active_screen, target);
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        self.previous_screen = Some(self.active_screen);
        self.active_screen = target;
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
    }

    /// Forward `action` to one screen and queue any follow-up.
    fn forward(&mut self, id: ScreenId, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&id) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Process a single action — update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                debug!(w, h, "terminal resized");
            }

            Action::SwitchScreen(target) => self.switch_to(*target),

            Action::GoBack => {
                let target = self.previous_screen.take().unwrap_or(ScreenId::Home);
                self.switch_to(target);
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            // Route first so focusing the screen does not mount it a second time.
            Action::OpenSearch(_) => {
                self.forward(ScreenId::Search, action)?;
                self.switch_to(ScreenId::Search);
            }

            // Both screens keep a copy of the category list.
            Action::CategoriesLoaded(_) => {
                self.forward(ScreenId::Home, action)?;
                self.forward(ScreenId::Search, action)?;
            }

            Action::ProductsChanged => self.forward(ScreenId::Search, action)?,

            Action::ReloadCategories => self.forward(ScreenId::Home, action)?,

            Action::Tick => self.forward(self.active_screen, action)?,

            // Render is handled in the main loop
            Action::Render => {}
        }

        Ok(())
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = theme::tab(id == self.active_screen);
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Service host plus the active screen's key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::raw(" "),
            Span::styled(
                format!("● {}", self.host),
                theme::connected(),
            ),
            Span::styled(" │", theme::hint()),
        ];

        let screen_hints = self
            .screens
            .get(&self.active_screen)
            .map(|s| s.key_hints())
            .unwrap_or_default();
        for &(key, label) in screen_hints.iter().chain(&[("?", "help"), ("q", "quit")]) {
            spans.push(Span::styled(format!(" {key}"), theme::hint_key()));
            spans.push(Span::styled(format!(" {label} "), theme::hint()));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn help_row(key: &'static str, label: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {key:<10}"), theme::hint_key()),
        Span::styled(label, theme::hint()),
    ])
}

/// Render the help overlay centered on screen.
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_width = 56u16.min(area.width.saturating_sub(4));
    let help_height = 24u16.min(area.height.saturating_sub(2));

    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::heading())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::frame(true))
        .style(theme::overlay());

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(
            format!("  {title}"),
            theme::accent(),
        ))
    };

    let help_text = vec![
        Line::from(""),
        section("Navigation"),
        help_row("1/2", "Jump to screen"),
        help_row("Tab", "Next screen"),
        help_row("j/k ↑/↓", "Move up/down"),
        help_row("g/G", "Top / bottom"),
        help_row("Enter", "Open category"),
        help_row("Esc", "Back / dismiss error"),
        Line::from(""),
        section("Search"),
        help_row("/", "Edit search text, Enter submits"),
        help_row("r", "Refresh results"),
        help_row("f", "Filter by category and sort"),
        help_row("x", "Reset filter (in filter)"),
        Line::from(""),
        section("Global"),
        help_row("?", "This help"),
        help_row("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "                    Esc or ? to close",
            theme::hint(),
        )),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}
