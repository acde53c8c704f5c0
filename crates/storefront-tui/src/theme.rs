//! Storefront styling. Screens ask for a role (`price`, `alert`, `frame`)
//! rather than a color, so the palette lives only here.

use ratatui::style::{Color, Modifier, Style};
use throbber_widgets_tui::Throbber;

const BRAND: Color = Color::Rgb(255, 159, 67);
const SKY: Color = Color::Rgb(116, 215, 236);
const MINT: Color = Color::Rgb(129, 230, 146);
const RED: Color = Color::Rgb(255, 107, 107);
const AMBER: Color = Color::Rgb(255, 206, 84);
const TEXT: Color = Color::Rgb(205, 208, 218);
const MUTED: Color = Color::Rgb(110, 118, 140);
const SURFACE: Color = Color::Rgb(36, 38, 48);
const BACKDROP: Color = Color::Rgb(24, 25, 32);
const PLACEHOLDER: Color = Color::Rgb(62, 64, 80);

fn fg(color: Color) -> Style {
    Style::default().fg(color)
}

/// Panel and section titles.
pub fn heading() -> Style {
    fg(SKY).add_modifier(Modifier::BOLD)
}

/// Title of a popup that needs a decision.
pub fn modal_heading() -> Style {
    fg(AMBER).add_modifier(Modifier::BOLD)
}

/// Panel border; the focused panel is drawn in the brand color.
pub fn frame(focused: bool) -> Style {
    if focused { fg(BRAND) } else { fg(MUTED) }
}

/// Fill behind popups so the screen below does not show through.
pub fn overlay() -> Style {
    Style::default().bg(BACKDROP)
}

pub fn tab(active: bool) -> Style {
    if active {
        fg(BRAND).add_modifier(Modifier::BOLD)
    } else {
        fg(TEXT)
    }
}

pub fn column_header() -> Style {
    fg(SKY).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn row() -> Style {
    fg(TEXT)
}

pub fn row_selected() -> Style {
    fg(BRAND).bg(SURFACE).add_modifier(Modifier::BOLD)
}

/// A chosen option in a list that is not focused.
pub fn chosen() -> Style {
    fg(BRAND)
}

/// Secondary labels, e.g. an unfocused column title.
pub fn muted() -> Style {
    fg(TEXT)
}

/// Entered text and section labels.
pub fn accent() -> Style {
    fg(SKY)
}

pub fn hint() -> Style {
    fg(MUTED)
}

pub fn hint_key() -> Style {
    fg(SKY).add_modifier(Modifier::BOLD)
}

/// Bars standing in for rows that have not loaded.
pub fn placeholder() -> Style {
    fg(PLACEHOLDER)
}

pub fn alert() -> Style {
    fg(RED).add_modifier(Modifier::BOLD)
}

/// End of results and similar one-off remarks.
pub fn notice() -> Style {
    fg(AMBER)
}

pub fn price() -> Style {
    fg(MINT)
}

/// Dot next to the service host in the status bar.
pub fn connected() -> Style {
    fg(MINT)
}

/// Spinner with a label, used for every loading line.
pub fn throbber(label: &str) -> Throbber<'_> {
    Throbber::default()
        .label(label)
        .style(accent())
        .throbber_style(fg(BRAND))
}
