//! Layout calculations shared by rendering and mouse hit-testing

use {
    super::state::TabKey,
    crate::i18n::Locale,
    ratatui::layout::{Constraint, Direction, Layout, Rect},
    unicode_width::UnicodeWidthStr,
};

pub const HEADER_HEIGHT: u16 = 2;
pub const LOGS_HEIGHT: u16 = 8;
pub const FOOTER_HEIGHT: u16 = 3;
/// Lines per row in the narrow card layout: name, four field lines, spacer
pub const CARD_HEIGHT: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub content: Rect,
    pub logs: Option<Rect>,
    pub footer: Rect,
}

pub fn app_layout(size: Rect, show_logs: bool) -> AppLayout {
    let constraints: Vec<Constraint> = if show_logs {
        vec![
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(LOGS_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ]
    } else {
        vec![
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    if show_logs {
        AppLayout {
            header: chunks[0],
            content: chunks[1],
            logs: Some(chunks[2]),
            footer: chunks[3],
        }
    } else {
        AppLayout {
            header: chunks[0],
            content: chunks[1],
            logs: None,
            footer: chunks[2],
        }
    }
}

/// Full table at or above the breakpoint, cards below it
pub fn is_wide(width: u16, breakpoint: u16) -> bool {
    width >= breakpoint
}

pub fn tab_title(key: TabKey, locale: Locale) -> String {
    format!("{} [{}]", locale.t(key.label_key()), key.index() + 1)
}

/// Which tab title sits under column `x` of the tab line.
///
/// Mirrors the `Tabs` widget: one space of padding on each side of a title
/// and a one-column divider between titles.
pub fn tab_at(x: u16, y: u16, header: Rect, locale: Locale) -> Option<TabKey> {
    if y != header.y || x < header.x {
        return None;
    }

    let mut start = header.x;
    for key in TabKey::ALL {
        let width = tab_title(key, locale).width() as u16 + 2;
        if (start..start + width).contains(&x) {
            return Some(key);
        }
        start += width + 1;
    }
    None
}

fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Row index (in display order) under a click in the bordered wide table
pub fn table_row_at(x: u16, y: u16, content: Rect, offset: usize) -> Option<usize> {
    let inner = inner(content);
    let first_row_y = inner.y + 1; // header row
    let bottom = inner.y + inner.height;
    if x < inner.x || x >= inner.x + inner.width || y < first_row_y || y >= bottom {
        return None;
    }
    Some(offset + (y - first_row_y) as usize)
}

/// Row index (in display order) under a click in the bordered card list
pub fn card_row_at(x: u16, y: u16, content: Rect, card_offset: usize) -> Option<usize> {
    let inner = inner(content);
    let bottom = inner.y + inner.height;
    if x < inner.x || x >= inner.x + inner.width || y < inner.y || y >= bottom {
        return None;
    }
    Some(card_offset + ((y - inner.y) / CARD_HEIGHT) as usize)
}

/// Number of whole cards that fit in the bordered content area
pub fn visible_cards(content: Rect) -> usize {
    (inner(content).height / CARD_HEIGHT).max(1) as usize
}

/// Keep `selected` on screen, returning the new first visible index
pub fn scroll_to_show(selected: usize, offset: usize, visible: usize) -> usize {
    let visible = visible.max(1);
    if selected < offset {
        selected
    } else if selected >= offset + visible {
        selected + 1 - visible
    } else {
        offset
    }
}
