//! Wide layout: one table row per token set

use {
    super::{cell_widget, utils::ZEBRA_COLOR, utils::SELECTED_COLOR},
    crate::{
        i18n::Locale,
        token_tab::{
            columns::{COLUMNS, Column, cell},
            state::TokenSetTabState,
        },
    },
    ratatui::{
        Frame,
        layout::{Constraint, Rect},
        style::{Color, Modifier, Style},
        widgets::{Block, BorderType, Borders, Cell, Row, Table},
    },
};

fn column_width(column: Column) -> Constraint {
    match column {
        Column::Name => Constraint::Fill(1),
        Column::MarketCap => Constraint::Length(18),
        Column::Price => Constraint::Length(12),
        Column::Change(_) => Constraint::Length(11),
    }
}

pub fn render_table(
    f: &mut Frame,
    tab: &mut TokenSetTabState,
    locale: Locale,
    area: Rect,
    title: String,
) {
    let header_cells: Vec<Cell> = COLUMNS
        .iter()
        .map(|column| {
            let mut label = column.header(locale).to_string();
            if tab.sort.column == Some(*column) {
                label.push_str(if tab.sort.descending {
                    " ↓"
                } else {
                    " ↑"
                });
            }
            Cell::from(label)
        })
        .collect();
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = tab
        .view_entries()
        .enumerate()
        .map(|(idx, (set, historical))| {
            let cells: Vec<Cell> = COLUMNS
                .iter()
                .map(|column| cell_widget(&cell(*column, set, historical)))
                .collect();

            // Zebra striping
            let bg_color = if idx % 2 == 0 {
                Color::Reset
            } else {
                ZEBRA_COLOR
            };
            Row::new(cells).style(Style::default().bg(bg_color))
        })
        .collect();

    let table = Table::new(rows, COLUMNS.map(column_width))
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(title),
        )
        .row_highlight_style(
            Style::default()
                .bg(SELECTED_COLOR)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    f.render_stateful_widget(table, area, &mut tab.table_state);
}
