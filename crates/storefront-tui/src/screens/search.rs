//! Search screen — search box, product list with infinite scroll,
//! pull-to-refresh and the filter modal.
//!
//! Key presses become [`SearchEvent`]s for the core [`SearchScreen`];
//! any fetch work it asks for runs on a spawned task, and the fetch
//! bridge reports each new controller snapshot back as
//! [`Action::ProductsChanged`].

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tui_input::{Input, InputRequest};

use storefront_core::{
    Category, FetchIntent, FilterState, ProductDataSource, ProductFetchController, ScrollMetrics,
    SearchBody, SearchEvent, SearchScreen, SearchView,
};

use crate::action::Action;
use crate::component::Component;
use crate::data_bridge;
use crate::screens::filter_modal::{FilterModal, ModalOutcome};
use crate::theme;

/// Rows from the bottom at which the next page is requested.
const LOAD_MORE_ROWS: f64 = 3.0;

const SKELETON_ROWS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Typing,
}

/// What a key press maps to before anything is run.
#[derive(Debug, Clone, PartialEq)]
enum KeyOutcome {
    Search(SearchEvent),
    Action(Action),
    /// Clear a failed page and request it again.
    RetryPage,
    Ignored,
}

pub struct SearchPane<S: ProductDataSource> {
    screen: SearchScreen<S>,
    focused: bool,
    mounted: bool,
    mode: Mode,
    input: Input,
    modal: Option<FilterModal>,
    categories: Vec<Category>,
    table_state: TableState,
    throbber_state: throbber_widgets_tui::ThrobberState,
    action_tx: Option<UnboundedSender<Action>>,
    bridge_cancel: CancellationToken,
}

impl<S: ProductDataSource> SearchPane<S> {
    pub fn new(controller: ProductFetchController<S>, initial_category: Option<String>) -> Self {
        Self {
            screen: SearchScreen::new(controller, initial_category)
                .with_near_end_padding(LOAD_MORE_ROWS),
            focused: false,
            mounted: false,
            mode: Mode::Browse,
            input: Input::default(),
            modal: None,
            categories: Vec::new(),
            table_state: TableState::default(),
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            action_tx: None,
            bridge_cancel: CancellationToken::new(),
        }
    }

    /// Feed `event` to the core screen and run the resulting fetch, if any,
    /// on a background task.
    fn send(&mut self, event: SearchEvent) {
        if let Some(intent) = self.screen.handle(event) {
            self.run(intent);
        }
    }

    fn run(&self, intent: FetchIntent) {
        debug!(?intent, "search: dispatching fetch");
        let controller = self.screen.controller().clone();
        tokio::spawn(async move {
            controller.dispatch(intent).await;
        });
    }

    /// First activation mounts; later ones re-focus with the route's category.
    fn activate(&mut self, category: Option<String>) {
        let event = if self.mounted {
            SearchEvent::Focused { category }
        } else {
            self.mounted = true;
            match category {
                Some(category) => SearchEvent::Focused {
                    category: Some(category),
                },
                None => SearchEvent::Mounted,
            }
        };
        self.send(event);
    }

    /// A later page failed while earlier ones are still shown.
    fn page_failed(&self) -> bool {
        let state = self.screen.controller().snapshot();
        state.error().is_some() && state.has_more && !state.products.is_empty()
    }

    fn item_count(&self) -> usize {
        self.screen.controller().snapshot().items().len()
    }

    /// Scroll position in rows: the selected row is the viewport.
    fn scroll_metrics(&self) -> ScrollMetrics {
        let rows = |n: usize| f64::from(u32::try_from(n).unwrap_or(u32::MAX));
        ScrollMetrics {
            offset: rows(self.table_state.selected().unwrap_or(0)),
            viewport: 1.0,
            content: rows(self.item_count()),
        }
    }

    fn move_selection(&mut self, delta: isize) -> KeyOutcome {
        let len = self.item_count();
        if len == 0 {
            return KeyOutcome::Ignored;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.table_state.select(Some(next));
        KeyOutcome::Search(SearchEvent::Scrolled(self.scroll_metrics()))
    }

    /// Keep the selection valid after the collection changed.
    fn sync_selection(&mut self) {
        let len = self.item_count();
        let selected = match self.table_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.table_state.select(selected);
    }

    fn edit_text(&mut self, request: InputRequest) -> KeyOutcome {
        self.input.handle(request);
        KeyOutcome::Search(SearchEvent::TextChanged(self.input.value().to_owned()))
    }

    fn typing_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                KeyOutcome::Ignored
            }
            KeyCode::Enter => {
                self.mode = Mode::Browse;
                KeyOutcome::Search(SearchEvent::Submit)
            }
            KeyCode::Char(c) => self.edit_text(InputRequest::InsertChar(c)),
            KeyCode::Backspace => self.edit_text(InputRequest::DeletePrevChar),
            KeyCode::Delete => self.edit_text(InputRequest::DeleteNextChar),
            KeyCode::Left => self.edit_text(InputRequest::GoToPrevChar),
            KeyCode::Right => self.edit_text(InputRequest::GoToNextChar),
            KeyCode::Home => self.edit_text(InputRequest::GoToStart),
            KeyCode::End => self.edit_text(InputRequest::GoToEnd),
            _ => KeyOutcome::Ignored,
        }
    }

    fn modal_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let Some(ref mut modal) = self.modal else {
            return KeyOutcome::Ignored;
        };
        let outcome = modal.handle_key(key);
        match outcome {
            ModalOutcome::Consumed => KeyOutcome::Ignored,
            ModalOutcome::Close => {
                self.modal = None;
                KeyOutcome::Search(SearchEvent::DismissFilter)
            }
            ModalOutcome::Apply(selection) => {
                self.modal = None;
                KeyOutcome::Search(SearchEvent::ApplyFilter(selection))
            }
            ModalOutcome::Reset => {
                self.modal = None;
                KeyOutcome::Search(SearchEvent::ResetFilter)
            }
        }
    }

    fn browse_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Char('/') => {
                self.mode = Mode::Typing;
                KeyOutcome::Ignored
            }
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(10),
            KeyCode::PageUp => self.move_selection(-10),
            KeyCode::Char('g') | KeyCode::Home => self.move_selection(isize::MIN),
            KeyCode::Char('G') | KeyCode::End => self.move_selection(isize::MAX),
            KeyCode::Char('r') if self.page_failed() => KeyOutcome::RetryPage,
            KeyCode::Char('r') => KeyOutcome::Search(SearchEvent::PullToRefresh),
            KeyCode::Char('f') => {
                let filter = self.screen.controller().filter();
                self.modal = Some(FilterModal::open(&self.categories, &filter));
                KeyOutcome::Search(SearchEvent::OpenFilter)
            }
            KeyCode::Esc if self.screen.controller().status().error().is_some() => {
                KeyOutcome::Search(SearchEvent::DismissError)
            }
            KeyCode::Esc => KeyOutcome::Action(Action::GoBack),
            _ => KeyOutcome::Ignored,
        }
    }

    fn map_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if self.modal.is_some() {
            self.modal_key(key)
        } else if self.mode == Mode::Typing {
            self.typing_key(key)
        } else {
            self.browse_key(key)
        }
    }

    // ── Rendering ───────────────────────────────────────────────

    fn render_search_box(&self, frame: &mut Frame, area: Rect, filter: &FilterState) {
        let typing = self.mode == Mode::Typing;
        let border = theme::frame(typing);

        let mut summary = Vec::new();
        if let Some(ref category) = filter.category {
            summary.push(format!("category: {category}"));
        }
        if let Some(sort) = filter.sort {
            summary.push(format!("sort: {}", sort.label()));
        }
        if let Some(ref keyword) = filter.keyword {
            summary.push(format!("keyword: {keyword}"));
        }
        let summary = if summary.is_empty() {
            " all products ".to_owned()
        } else {
            format!(" {} ", summary.join(" · "))
        };

        let block = Block::default()
            .title(" Search ")
            .title_style(theme::heading())
            .title(Line::from(Span::styled(summary, theme::hint())).right_aligned())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = usize::from(inner.width.max(1) - 1);
        let scroll = self.input.visual_scroll(width);
        let text = if self.input.value().is_empty() && !typing {
            Span::styled("press / to search", theme::hint())
        } else {
            Span::styled(self.input.value(), theme::accent())
        };
        frame.render_widget(
            Paragraph::new(Line::from(text)).scroll((0, u16::try_from(scroll).unwrap_or(0))),
            inner,
        );

        if typing {
            let cursor = self.input.visual_cursor().saturating_sub(scroll);
            let x = inner.x + u16::try_from(cursor).unwrap_or(0);
            frame.set_cursor_position(Position::new(x, inner.y));
        }
    }

    fn render_skeleton(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(area);
        let throbber = theme::throbber(" Loading products...");
        frame.render_stateful_widget(throbber, layout[0], &mut self.throbber_state.clone());

        let bars: Vec<Line> = (0..SKELETON_ROWS)
            .map(|i| {
                let width = 24 + (i * 11) % 17;
                Line::from(vec![
                    Span::styled(format!(" {}", "▆".repeat(width)), theme::placeholder()),
                    Span::styled(format!("   {}", "▆".repeat(6)), theme::placeholder()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(bars), layout[1]);
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, view: &SearchView) {
        let SearchBody::Grid(ref items) = view.body else {
            return;
        };
        if view.show_empty {
            frame.render_widget(
                Paragraph::new(Span::styled(" No products match.", theme::hint())),
                area,
            );
            return;
        }

        let header = Row::new(vec![
            Cell::from("Name"),
            Cell::from("Price"),
            Cell::from("Category"),
        ])
        .style(theme::column_header());
        let rows = items.iter().map(|p| {
            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(Span::styled(format!("{:.2}", p.price), theme::price())),
                Cell::from(p.category.clone().unwrap_or_default()),
            ])
            .style(theme::row())
        });
        let widths = [
            Constraint::Percentage(55),
            Constraint::Length(12),
            Constraint::Percentage(30),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::row_selected())
            .highlight_symbol("▸ ");

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, view: &SearchView) {
        let busy_label = if view.show_spinner {
            Some(" Loading more...")
        } else if view.refreshing {
            Some(" Refreshing...")
        } else {
            None
        };
        if let Some(label) = busy_label {
            let throbber = theme::throbber(label);
            frame.render_stateful_widget(throbber, area, &mut self.throbber_state.clone());
            return;
        }

        let count = match view.body {
            SearchBody::Grid(ref items) => items.len(),
            SearchBody::Skeleton => 0,
        };
        let mut spans = vec![Span::styled(format!(" {count} items"), theme::hint())];
        if view.show_end_notice {
            spans.push(Span::styled(
                "  · no more items",
                theme::notice(),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl<S: ProductDataSource> Component for SearchPane<S> {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        tokio::spawn(data_bridge::spawn_fetch_bridge(
            self.screen.controller().subscribe(),
            action_tx.clone(),
            self.bridge_cancel.clone(),
        ));
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.map_key(key) {
            KeyOutcome::Search(event) => {
                self.send(event);
                Ok(None)
            }
            KeyOutcome::Action(action) => Ok(Some(action)),
            KeyOutcome::RetryPage => {
                self.send(SearchEvent::DismissError);
                self.run(FetchIntent::LoadMore);
                Ok(None)
            }
            KeyOutcome::Ignored => Ok(None),
        }
    }

    fn handle_paste(&mut self, text: &str) -> Result<Option<Action>> {
        if self.mode != Mode::Typing || self.modal.is_some() {
            return Ok(None);
        }
        for c in text.chars().filter(|c| !c.is_control()) {
            self.input.handle(InputRequest::InsertChar(c));
        }
        self.send(SearchEvent::TextChanged(self.input.value().to_owned()));
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::OpenSearch(route) => {
                self.table_state.select(None);
                self.activate(route.category.clone());
            }
            Action::CategoriesLoaded(state) => {
                self.categories.clone_from(&state.categories);
            }
            Action::ProductsChanged => {
                self.sync_selection();
                if self.focused && self.modal.is_none() {
                    let metrics = self.scroll_metrics();
                    self.send(SearchEvent::Scrolled(metrics));
                }
            }
            Action::Tick if self.screen.controller().status().is_in_flight() => {
                self.throbber_state.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let view = self.screen.view();
        let banner_h = u16::from(view.error.is_some());
        let layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(banner_h),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

        self.render_search_box(frame, layout[0], &view.filter);

        if let Some(ref error) = view.error {
            let banner = Line::from(vec![
                Span::styled(format!(" ✗ {error}  "), theme::alert()),
                Span::styled("Esc", theme::hint_key()),
                Span::styled(" dismiss  ", theme::hint()),
                Span::styled("r", theme::hint_key()),
                Span::styled(" retry", theme::hint()),
            ]);
            frame.render_widget(Paragraph::new(banner), layout[1]);
        }

        let border = theme::frame(self.focused && self.mode == Mode::Browse);
        let block = Block::default()
            .title(" Products ")
            .title_style(theme::heading())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let body = block.inner(layout[2]);
        frame.render_widget(block, layout[2]);

        match view.body {
            SearchBody::Skeleton => self.render_skeleton(frame, body),
            SearchBody::Grid(_) => self.render_grid(frame, body, &view),
        }

        self.render_footer(frame, layout[3], &view);

        if let Some(ref modal) = self.modal {
            modal.render(frame, area);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if focused && !self.mounted {
            self.activate(None);
        }
    }

    fn captures_input(&self) -> bool {
        self.mode == Mode::Typing || self.modal.is_some()
    }

    fn key_hints(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("/", "search"),
            ("j/k", "move"),
            ("f", "filter"),
            ("r", "refresh"),
        ]
    }
}

impl<S: ProductDataSource> Drop for SearchPane<S> {
    fn drop(&mut self) {
        self.bridge_cancel.cancel();
        self.screen.controller().close();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc;

    use storefront_core::{
        CoreError, FetchState, Product, ProductId, ProductPage, SearchRoute,
        SortOrder,
    };

    use super::*;

    // ── Fake catalog ─────────────────────────────────────────────

    /// Page `n` (1-based) is `pages[n - 1]`: `Ok((count, has_more))` or an
    /// error message. Pages past the end are empty.
    struct Catalog {
        pages: Vec<Result<(usize, bool), &'static str>>,
        requests: Mutex<Vec<FilterState>>,
    }

    impl Catalog {
        fn new(pages: Vec<Result<(usize, bool), &'static str>>) -> Arc<Self> {
            Arc::new(Self {
                pages,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn last_request(&self) -> FilterState {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl ProductDataSource for Catalog {
        async fn fetch_page(&self, filter: &FilterState) -> Result<ProductPage, CoreError> {
            self.requests.lock().unwrap().push(filter.clone());
            let page = filter.page();
            let index = usize::try_from(page - 1).unwrap();
            match self.pages.get(index) {
                Some(Ok((count, has_more))) => Ok(ProductPage {
                    items: (0..*count)
                        .map(|i| Product {
                            id: ProductId::new(format!("p{page}-{i}")),
                            name: format!("Item {page}-{i}"),
                            price: 10.0,
                            description: None,
                            category: Some("shoes".into()),
                            image_url: None,
                        })
                        .collect(),
                    has_more: *has_more,
                }),
                Some(Err(message)) => Err(CoreError::Api {
                    message: (*message).into(),
                    status: Some(503),
                }),
                None => Ok(ProductPage::default()),
            }
        }
    }

    fn pane(catalog: &Arc<Catalog>, category: Option<&str>) -> SearchPane<Arc<Catalog>> {
        let controller = ProductFetchController::new(Arc::clone(catalog));
        SearchPane::new(controller, category.map(str::to_owned))
    }

    fn request_count(catalog: &Catalog) -> usize {
        catalog.requests.lock().unwrap().len()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn settle(pane: &SearchPane<Arc<Catalog>>, done: impl Fn(&FetchState) -> bool) {
        let mut rx = pane.screen.controller().subscribe();
        tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| done(s)))
            .await
            .unwrap()
            .unwrap();
    }

    fn screen_text(pane: &SearchPane<Arc<Catalog>>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| pane.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    // ── Key mapping ──────────────────────────────────────────────

    #[test]
    fn typing_mode_captures_keys_until_enter() {
        let catalog = Catalog::new(vec![]);
        let mut pane = pane(&catalog, None);

        assert_eq!(pane.map_key(key(KeyCode::Char('/'))), KeyOutcome::Ignored);
        assert!(pane.captures_input());
        assert_eq!(
            pane.map_key(key(KeyCode::Char('q'))),
            KeyOutcome::Search(SearchEvent::TextChanged("q".into()))
        );
        assert_eq!(
            pane.map_key(key(KeyCode::Enter)),
            KeyOutcome::Search(SearchEvent::Submit)
        );
        assert!(!pane.captures_input());
    }

    #[test]
    fn paste_only_lands_in_the_search_field() {
        let catalog = Catalog::new(vec![]);
        let mut pane = pane(&catalog, None);

        pane.handle_paste("ignored").unwrap();
        assert_eq!(pane.input.value(), "");

        pane.map_key(key(KeyCode::Char('/')));
        pane.handle_paste("red\nshoes").unwrap();
        assert_eq!(pane.input.value(), "redshoes");
        assert_eq!(pane.screen.text(), "redshoes");
    }

    #[test]
    fn filter_modal_opens_and_closes() {
        let catalog = Catalog::new(vec![]);
        let mut pane = pane(&catalog, None);

        pane.handle_key_event(key(KeyCode::Char('f'))).unwrap();
        assert!(pane.captures_input());
        assert!(pane.screen.filter_open());

        pane.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(!pane.captures_input());
        assert!(!pane.screen.filter_open());
    }

    #[test]
    fn unloaded_pane_is_not_reported_empty() {
        let catalog = Catalog::new(vec![]);
        let pane = pane(&catalog, None);

        let text = screen_text(&pane);
        assert!(!text.contains("No products match."));
        assert!(!text.contains("no more items"));
        assert!(text.contains('▆'));
    }

    #[test]
    fn escape_without_error_goes_back() {
        let catalog = Catalog::new(vec![]);
        let mut pane = pane(&catalog, None);
        assert_eq!(
            pane.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::GoBack)
        );
    }

    // ── Fetch flows ──────────────────────────────────────────────

    #[tokio::test]
    async fn first_focus_loads_seeded_category_once() {
        let catalog = Catalog::new(vec![Ok((3, false))]);
        let mut pane = pane(&catalog, Some("shoes"));

        pane.set_focused(true);
        settle(&pane, |s| s.loaded && s.status.is_idle()).await;
        assert_eq!(catalog.last_request().category.as_deref(), Some("shoes"));

        pane.set_focused(false);
        pane.set_focused(true);
        tokio::task::yield_now().await;
        assert_eq!(request_count(&catalog), 1);
        assert_eq!(pane.item_count(), 3);
    }

    #[tokio::test]
    async fn opening_with_category_loads_filtered_first_page() {
        let catalog = Catalog::new(vec![Ok((5, false))]);
        let mut pane = pane(&catalog, None);

        pane.update(&Action::OpenSearch(SearchRoute {
            category: Some("shoes".into()),
        }))
        .unwrap();
        settle(&pane, |s| s.status.is_idle() && s.items().len() == 5).await;

        let request = catalog.last_request();
        assert_eq!(request.category.as_deref(), Some("shoes"));
        assert_eq!(request.page(), 1);
    }

    #[tokio::test]
    async fn submit_applies_typed_keyword() {
        let catalog = Catalog::new(vec![Ok((2, false))]);
        let mut pane = pane(&catalog, Some("shoes"));
        pane.update(&Action::OpenSearch(SearchRoute::default())).unwrap();
        settle(&pane, |s| s.status.is_idle() && s.items().len() == 2).await;

        for code in [
            KeyCode::Char('/'),
            KeyCode::Char(' '),
            KeyCode::Char('r'),
            KeyCode::Char('u'),
            KeyCode::Char('n'),
            KeyCode::Enter,
        ] {
            pane.handle_key_event(key(code)).unwrap();
        }
        settle(&pane, |s| {
            s.status.is_idle() && s.filter.keyword.as_deref() == Some("run")
        })
        .await;

        let request = catalog.last_request();
        assert_eq!(request.keyword.as_deref(), Some("run"));
        assert_eq!(request.category.as_deref(), Some("shoes"));
    }

    #[tokio::test]
    async fn reaching_the_end_loads_the_next_page() {
        let catalog = Catalog::new(vec![Ok((10, true)), Ok((5, false))]);
        let mut pane = pane(&catalog, None);
        pane.update(&Action::OpenSearch(SearchRoute::default())).unwrap();
        settle(&pane, |s| s.status.is_idle() && s.items().len() == 10).await;
        pane.update(&Action::ProductsChanged).unwrap();

        pane.handle_key_event(key(KeyCode::Char('G'))).unwrap();
        settle(&pane, |s| s.status.is_idle() && s.items().len() == 15).await;

        let state = pane.screen.controller().snapshot();
        assert!(!state.has_more);
        assert_eq!(state.page(), 2);
    }

    #[tokio::test]
    async fn applying_sort_keeps_category() {
        let catalog = Catalog::new(vec![Ok((3, false))]);
        let mut pane = pane(&catalog, Some("shoes"));
        pane.update(&Action::OpenSearch(SearchRoute::default())).unwrap();
        settle(&pane, |s| s.status.is_idle() && s.items().len() == 3).await;

        for code in [KeyCode::Char('f'), KeyCode::Tab, KeyCode::Char('j'), KeyCode::Enter] {
            pane.handle_key_event(key(code)).unwrap();
        }
        settle(&pane, |s| s.status.is_idle() && s.filter.sort.is_some()).await;

        let request = catalog.last_request();
        assert_eq!(request.category.as_deref(), Some("shoes"));
        assert_eq!(request.sort, Some(SortOrder::Newest));
    }

    #[tokio::test]
    async fn reset_clears_every_constraint() {
        let catalog = Catalog::new(vec![Ok((3, false))]);
        let mut pane = pane(&catalog, Some("shoes"));
        pane.update(&Action::OpenSearch(SearchRoute::default())).unwrap();
        settle(&pane, |s| s.status.is_idle() && s.items().len() == 3).await;

        pane.handle_key_event(key(KeyCode::Char('f'))).unwrap();
        pane.handle_key_event(key(KeyCode::Char('x'))).unwrap();
        settle(&pane, |s| s.status.is_idle() && s.filter.category.is_none()).await;

        let request = catalog.last_request();
        assert!(!request.is_constrained());
        assert_eq!(request.page(), 1);
    }

    // ── Rendering ────────────────────────────────────────────────

    #[tokio::test]
    async fn failed_page_keeps_items_and_shows_banner() {
        let catalog = Catalog::new(vec![Ok((4, true)), Err("catalog offline")]);
        let mut pane = pane(&catalog, None);
        pane.update(&Action::OpenSearch(SearchRoute::default())).unwrap();
        pane.set_focused(true);
        settle(&pane, |s| s.status.is_idle() && s.items().len() == 4).await;

        pane.update(&Action::ProductsChanged).unwrap();
        settle(&pane, |s| s.error().is_some()).await;

        let text = screen_text(&pane);
        assert!(text.contains("catalog offline"));
        assert!(text.contains("Item 1-0"));
        assert!(!text.contains("no more items"));

        pane.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(pane.screen.controller().status().is_idle());
        assert_eq!(pane.item_count(), 4);
    }

    #[tokio::test]
    async fn retry_requests_the_failed_page_again() {
        let catalog = Catalog::new(vec![Ok((4, true)), Err("catalog offline")]);
        let mut pane = pane(&catalog, None);
        pane.update(&Action::OpenSearch(SearchRoute::default())).unwrap();
        settle(&pane, |s| s.status.is_idle() && s.items().len() == 4).await;
        pane.handle_key_event(key(KeyCode::Char('G'))).unwrap();
        settle(&pane, |s| s.error().is_some()).await;
        assert_eq!(request_count(&catalog), 2);

        pane.handle_key_event(key(KeyCode::Char('r'))).unwrap();
        settle(&pane, |s| s.error().is_some()).await;

        assert_eq!(request_count(&catalog), 3);
        assert_eq!(catalog.last_request().page(), 2);
        assert_eq!(pane.item_count(), 4);
    }

    #[tokio::test]
    async fn empty_results_show_message_and_end_notice() {
        let catalog = Catalog::new(vec![Ok((0, false))]);
        let mut pane = pane(&catalog, None);
        pane.update(&Action::OpenSearch(SearchRoute::default())).unwrap();
        settle(&pane, |s| s.loaded && s.status.is_idle()).await;

        let text = screen_text(&pane);
        assert!(text.contains("No products match."));
        assert!(text.contains("no more items"));
    }

    #[tokio::test]
    async fn bridge_reports_snapshots() {
        let catalog = Catalog::new(vec![Ok((1, false))]);
        let mut pane = pane(&catalog, None);
        let (tx, mut rx) = mpsc::unbounded_channel();
        pane.init(tx).unwrap();

        pane.update(&Action::OpenSearch(SearchRoute::default())).unwrap();
        let action = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap();
        assert_eq!(action, Some(Action::ProductsChanged));
    }
}
