//! Home screen — category list; Enter opens a search seeded with the category.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use storefront_core::{CategoryDataSource, CategoryState, category_route};

use crate::action::Action;
use crate::component::Component;
use crate::data_bridge;
use crate::theme;

const SKELETON_ROWS: usize = 6;

pub struct HomeScreen<S> {
    source: S,
    focused: bool,
    state: CategoryState,
    table_state: TableState,
    throbber_state: throbber_widgets_tui::ThrobberState,
    action_tx: Option<UnboundedSender<Action>>,
}

impl<S: CategoryDataSource + Clone> HomeScreen<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            focused: false,
            state: CategoryState::default(),
            table_state: TableState::default(),
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            action_tx: None,
        }
    }

    fn spawn_load(&mut self) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        self.state = CategoryState::default();
        tokio::spawn(data_bridge::load_categories(self.source.clone(), tx));
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.state.categories.len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.table_state.select(Some(next));
    }

    fn render_skeleton(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

        if let Some(ref error) = self.state.error {
            let line = Line::from(vec![
                Span::styled(format!(" Couldn't load categories: {error}  "), theme::alert()),
                Span::styled("r", theme::hint_key()),
                Span::styled(" retry", theme::hint()),
            ]);
            frame.render_widget(Paragraph::new(line), layout[0]);
        } else {
            let throbber = theme::throbber(" Loading categories...");
            frame.render_stateful_widget(throbber, layout[0], &mut self.throbber_state.clone());
        }

        let bars: Vec<Line> = (0..SKELETON_ROWS)
            .map(|i| {
                let width = 18 + (i * 7) % 13;
                Line::from(Span::styled(format!(" {}", "▆".repeat(width)), theme::placeholder()))
            })
            .collect();
        frame.render_widget(Paragraph::new(bars), layout[2]);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        if self.state.categories.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(" No categories yet.", theme::hint())),
                area,
            );
            return;
        }

        let header = Row::new(vec![Cell::from("Category"), Cell::from("Search as")])
            .style(theme::column_header());
        let rows = self.state.categories.iter().map(|c| {
            let route = category_route(c).category.unwrap_or_default();
            Row::new(vec![Cell::from(c.name.clone()), Cell::from(route)]).style(theme::row())
        });
        let widths = [Constraint::Percentage(60), Constraint::Percentage(40)];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::row_selected())
            .highlight_symbol("▸ ");

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }
}

impl<S: CategoryDataSource + Clone> Component for HomeScreen<S> {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        self.spawn_load();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.move_selection(isize::MIN);
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.move_selection(isize::MAX);
                None
            }
            KeyCode::Char('r') => Some(Action::ReloadCategories),
            KeyCode::Enter if !self.state.show_skeleton() => self
                .table_state
                .selected()
                .and_then(|i| self.state.categories.get(i))
                .map(|c| Action::OpenSearch(category_route(c))),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::CategoriesLoaded(state) => {
                debug!(categories = state.categories.len(), "home: categories updated");
                self.state = state.clone();
                let selected = (!self.state.categories.is_empty()).then_some(0);
                self.table_state.select(selected);
            }
            Action::ReloadCategories => self.spawn_load(),
            Action::Tick if self.state.loading => self.throbber_state.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let border = theme::frame(self.focused);
        let block = Block::default()
            .title(" Categories ")
            .title_style(theme::heading())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.state.show_skeleton() {
            self.render_skeleton(frame, inner);
        } else {
            self.render_table(frame, inner);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn key_hints(&self) -> &'static [(&'static str, &'static str)] {
        &[("j/k", "move"), ("Enter", "search"), ("r", "reload")]
    }
}
