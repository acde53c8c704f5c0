//! Filter modal — category and sort pickers for the search screen.
//!
//! Only fields the user actually moved end up in the resulting
//! [`FilterSelection`]; untouched fields stay `None` so the current filter
//! keeps them.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use strum::IntoEnumIterator;

use storefront_core::{Category, FilterSelection, FilterState, SortOrder};

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Category,
    Sort,
}

/// What a key press in the modal asks the search screen to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    Apply(FilterSelection),
    Reset,
    Close,
    /// Key handled inside the modal.
    Consumed,
}

pub struct FilterModal {
    categories: Vec<String>,
    sorts: Vec<SortOrder>,
    field: Field,
    category: Option<usize>,
    sort: Option<usize>,
    category_touched: bool,
    sort_touched: bool,
}

impl FilterModal {
    /// Open with the cursor on whatever `current` already selects.
    pub fn open(categories: &[Category], current: &FilterState) -> Self {
        let categories: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();
        let sorts: Vec<SortOrder> = SortOrder::iter().collect();
        let category = current
            .category
            .as_deref()
            .and_then(|cur| categories.iter().position(|n| n.to_lowercase() == cur));
        let sort = current.sort.and_then(|s| sorts.iter().position(|&o| o == s));
        Self {
            categories,
            sorts,
            field: Field::Category,
            category,
            sort,
            category_touched: false,
            sort_touched: false,
        }
    }

    /// The changed fields, ready for `FilterState::merge`.
    pub fn selection(&self) -> FilterSelection {
        let category = if self.category_touched {
            self.category
                .and_then(|i| self.categories.get(i))
                .map(|name| name.to_lowercase())
        } else {
            None
        };
        let sort = if self.sort_touched {
            self.sort.and_then(|i| self.sorts.get(i).copied())
        } else {
            None
        };
        FilterSelection { category, sort }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ModalOutcome {
        match key.code {
            KeyCode::Esc => ModalOutcome::Close,
            KeyCode::Enter => ModalOutcome::Apply(self.selection()),
            KeyCode::Char('x') => ModalOutcome::Reset,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.field = match self.field {
                    Field::Category => Field::Sort,
                    Field::Sort => Field::Category,
                };
                ModalOutcome::Consumed
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.step(1);
                ModalOutcome::Consumed
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.step(-1);
                ModalOutcome::Consumed
            }
            _ => ModalOutcome::Consumed,
        }
    }

    fn step(&mut self, delta: isize) {
        let (cursor, len, touched) = match self.field {
            Field::Category => (
                &mut self.category,
                self.categories.len(),
                &mut self.category_touched,
            ),
            Field::Sort => (&mut self.sort, self.sorts.len(), &mut self.sort_touched),
        };
        if len == 0 {
            return;
        }
        let next = match *cursor {
            None => 0,
            Some(i) => i.saturating_add_signed(delta).min(len - 1),
        };
        *cursor = Some(next);
        *touched = true;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let list_len = self.categories.len().max(self.sorts.len());
        let wanted_h = u16::try_from(list_len).unwrap_or(u16::MAX).saturating_add(6);
        let overlay_w = 64u16.min(area.width.saturating_sub(4));
        let overlay_h = wanted_h.min(area.height.saturating_sub(2));
        let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
        let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
        let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

        frame.render_widget(Clear, overlay_area);

        let block = Block::default()
            .title(" Filter ")
            .title_style(
                theme::modal_heading(),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(theme::frame(true))
            .style(theme::overlay());
        let inner = block.inner(overlay_area);
        frame.render_widget(block, overlay_area);

        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        let columns =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(rows[0]);

        let categories: Vec<&str> = self.categories.iter().map(String::as_str).collect();
        let sorts: Vec<&str> = self.sorts.iter().map(|s| s.label()).collect();
        self.render_column(frame, columns[0], "Category", &categories, self.category, Field::Category);
        self.render_column(frame, columns[1], "Sort", &sorts, self.sort, Field::Sort);

        let hints = Line::from(vec![
            Span::styled(" Tab", theme::hint_key()),
            Span::styled(" field  ", theme::hint()),
            Span::styled("j/k", theme::hint_key()),
            Span::styled(" choose  ", theme::hint()),
            Span::styled("Enter", theme::hint_key()),
            Span::styled(" apply  ", theme::hint()),
            Span::styled("x", theme::hint_key()),
            Span::styled(" reset  ", theme::hint()),
            Span::styled("Esc", theme::hint_key()),
            Span::styled(" close", theme::hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), rows[1]);
    }

    fn render_column(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        options: &[&str],
        chosen: Option<usize>,
        field: Field,
    ) {
        let focused = self.field == field;
        let title_style = if focused {
            theme::heading()
        } else {
            theme::muted()
        };
        let mut lines = vec![Line::from(Span::styled(format!(" {title}"), title_style))];
        if options.is_empty() {
            lines.push(Line::from(Span::styled("   (unavailable)", theme::hint())));
        }
        for (i, option) in options.iter().enumerate() {
            let is_chosen = chosen == Some(i);
            let marker = if is_chosen { " ▸ " } else { "   " };
            let style = if is_chosen && focused {
                theme::row_selected()
            } else if is_chosen {
                theme::chosen()
            } else {
                theme::row()
            };
            lines.push(Line::from(Span::styled(format!("{marker}{option}"), style)));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    use super::*;

    fn categories() -> Vec<Category> {
        ["Shoes", "Bags"]
            .iter()
            .enumerate()
            .map(|(i, name)| Category {
                id: format!("c{i}"),
                name: (*name).into(),
                image_url: None,
            })
            .collect()
    }

    fn press(modal: &mut FilterModal, code: KeyCode) -> ModalOutcome {
        modal.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn untouched_modal_changes_nothing() {
        let mut modal = FilterModal::open(&categories(), &FilterState::for_category("shoes"));
        assert_eq!(
            press(&mut modal, KeyCode::Enter),
            ModalOutcome::Apply(FilterSelection::default())
        );
    }

    #[test]
    fn sort_only_keeps_category_untouched() {
        let mut modal = FilterModal::open(&categories(), &FilterState::for_category("shoes"));
        press(&mut modal, KeyCode::Tab);
        press(&mut modal, KeyCode::Char('j'));

        let selection = modal.selection();
        assert_eq!(selection.category, None);
        assert_eq!(selection.sort, SortOrder::iter().next());
    }

    #[test]
    fn category_cursor_starts_on_current_and_lowercases() {
        let mut modal = FilterModal::open(&categories(), &FilterState::for_category("shoes"));
        press(&mut modal, KeyCode::Down);
        assert_eq!(modal.selection().category.as_deref(), Some("bags"));

        press(&mut modal, KeyCode::Down);
        assert_eq!(modal.selection().category.as_deref(), Some("bags"));
    }

    #[test]
    fn escape_and_reset_are_reported() {
        let mut modal = FilterModal::open(&[], &FilterState::default());
        press(&mut modal, KeyCode::Char('j'));
        assert_eq!(modal.selection().category, None);
        assert_eq!(press(&mut modal, KeyCode::Char('x')), ModalOutcome::Reset);
        assert_eq!(press(&mut modal, KeyCode::Esc), ModalOutcome::Close);
    }
}
