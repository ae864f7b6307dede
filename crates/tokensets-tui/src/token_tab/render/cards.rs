//! Narrow layout: each token set as a stacked card.
//!
//! Cards read right to left: values lead, labels trail, everything flush right.

use {
    super::{change_spans, utils::SELECTED_COLOR, utils::truncate_to_width},
    crate::{
        i18n::Locale,
        token_tab::{
            columns::{COLUMNS, CellContent, cell},
            layout::{CARD_HEIGHT, scroll_to_show, visible_cards},
            state::TokenSetTabState,
        },
    },
    ratatui::{
        Frame,
        layout::{Alignment, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, BorderType, Borders, Paragraph},
    },
};

/// Fields shown per line under the card title
const FIELDS_PER_LINE: usize = 2;

fn field_spans(content: &CellContent, label: &str) -> Vec<Span<'static>> {
    let mut spans = match content {
        CellContent::Change(change) => change_spans(change),
        CellContent::Bold(text) => vec![Span::styled(
            text.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )],
        CellContent::Name(text) | CellContent::Plain(text) => vec![Span::raw(text.clone())],
    };
    spans.push(Span::styled(
        format!(" {}", label),
        Style::default().fg(Color::DarkGray),
    ));
    spans
}

pub fn render_cards(
    f: &mut Frame,
    tab: &mut TokenSetTabState,
    locale: Locale,
    area: Rect,
    title: String,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible = visible_cards(area);
    let selected = tab.selected_index().unwrap_or(0);
    tab.card_offset = scroll_to_show(selected, tab.card_offset, visible);

    for (slot, (view_idx, (set, historical))) in tab
        .view_entries()
        .enumerate()
        .skip(tab.card_offset)
        .take(visible)
        .enumerate()
    {
        let y = inner.y + slot as u16 * CARD_HEIGHT;
        let bottom = inner.y + inner.height;
        if y >= bottom {
            break;
        }
        let card_area = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height: CARD_HEIGHT.min(bottom - y),
        };

        let name = cell(COLUMNS[0], set, historical);
        let mut lines = vec![Line::from(Span::styled(
            truncate_to_width(name.text(), inner.width as usize),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))];

        let fields: Vec<Vec<Span>> = COLUMNS[1..]
            .iter()
            .map(|column| field_spans(&cell(*column, set, historical), column.header(locale)))
            .collect();
        for chunk in fields.chunks(FIELDS_PER_LINE) {
            let mut spans = Vec::new();
            for (i, field) in chunk.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw("   "));
                }
                spans.extend(field.iter().cloned());
            }
            lines.push(Line::from(spans));
        }

        let style = if view_idx == selected {
            Style::default().bg(SELECTED_COLOR)
        } else {
            Style::default()
        };
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Right)
            .style(style);
        f.render_widget(paragraph, card_area);
    }
}
